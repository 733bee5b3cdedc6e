pub mod auth;
pub mod health;
pub mod numbers;
pub mod tasks;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::login)
            .service(auth::register),
    )
    .service(
        web::scope("/tasks")
            .service(tasks::get_tasks)
            .service(tasks::create_task)
            // "/all" must be registered before the "/{id}" routes
            .service(tasks::delete_all_tasks)
            .service(tasks::get_task)
            .service(tasks::update_task)
            .service(tasks::delete_task),
    )
    .service(
        web::scope("/numbers")
            .service(numbers::bubble_sort_numbers)
            .service(numbers::filter_even)
            .service(numbers::sum_elements)
            .service(numbers::max_value)
            .service(numbers::binary_search_numbers)
            .service(numbers::check_prime),
    );
}
