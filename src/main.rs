use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};

use taskprime::auth::AuthMiddleware;
use taskprime::config::Config;
use taskprime::routes;
use taskprime::routes::health;
use taskprime::store::{TaskStore, UserStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    // The stores are process-local; sharing the same Data across workers is
    // what makes them behave as one store.
    let task_store = web::Data::new(TaskStore::new());
    let user_store = web::Data::new(UserStore::new());

    log::info!("Starting TaskPrime server at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .app_data(task_store.clone())
            .app_data(user_store.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(health::health)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .configure(routes::config),
            )
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
