use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{test, web, App};
use dotenv::dotenv;
use serde_json::json;
use taskprime::routes; // For routes::config
use taskprime::routes::health; // For the health service
use taskprime::store::{TaskStore, UserStore};

fn init_test_env() {
    dotenv().ok();
    std::env::set_var("JWT_SECRET", "integration-test-secret");
}

#[actix_rt::test]
async fn test_register_and_login_flow() {
    init_test_env();

    // Inline App setup with fresh stores; nothing survives the test.
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(TaskStore::new()))
            .app_data(web::Data::new(UserStore::new()))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(health::health) // health is outside /api and AuthMiddleware
            .service(
                web::scope("/api")
                    .wrap(taskprime::auth::AuthMiddleware)
                    .configure(routes::config),
            ),
    )
    .await;

    // Register a new user
    let register_payload = json!({
        "username": "integration_user",
        "password": "Password123!"
    });
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(&register_payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let body_bytes = test::read_body(resp).await;
    assert_eq!(
        status,
        actix_web::http::StatusCode::CREATED,
        "Registration failed. Body: {:?}",
        String::from_utf8_lossy(&body_bytes)
    );

    // Try to register the same user again (should fail)
    let req_conflict = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(&register_payload)
        .to_request();
    let resp_conflict = test::call_service(&app, req_conflict).await;
    let status_conflict = resp_conflict.status();
    let body_bytes_conflict = test::read_body(resp_conflict).await;
    assert_eq!(
        status_conflict,
        actix_web::http::StatusCode::BAD_REQUEST,
        "Duplicate registration did not fail as expected. Body: {:?}",
        String::from_utf8_lossy(&body_bytes_conflict)
    );

    // Login with the registered user
    let login_payload = json!({
        "username": "integration_user",
        "password": "Password123!"
    });
    let req_login = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(&login_payload)
        .to_request();
    let resp_login = test::call_service(&app, req_login).await;
    let status_login = resp_login.status();
    let body_bytes_login = test::read_body(resp_login).await;

    assert_eq!(
        status_login,
        actix_web::http::StatusCode::OK,
        "Login failed. Body: {:?}",
        String::from_utf8_lossy(&body_bytes_login)
    );

    let login_response: taskprime::auth::AuthResponse =
        serde_json::from_slice(&body_bytes_login).expect("Failed to parse login response JSON");

    let token = login_response.token.clone();
    let user_id_from_login = login_response.user_id;

    assert!(!token.is_empty(), "Token should be a non-empty string");

    // Use the token to access a protected route (create a task)
    let create_task_payload = json!({
        "title": "Task created by token test"
    });

    let req_create_task = test::TestRequest::post()
        .uri("/api/tasks")
        .append_header(("Authorization", format!("Bearer {}", token)))
        .set_json(&create_task_payload)
        .to_request();

    let resp_create_task = test::call_service(&app, req_create_task).await;
    let status_create_task = resp_create_task.status();
    let body_bytes_create_task = test::read_body(resp_create_task).await;

    assert_eq!(
        status_create_task,
        actix_web::http::StatusCode::CREATED,
        "Create task with token failed. Expected 201, got {}. Body: {:?}",
        status_create_task,
        String::from_utf8_lossy(&body_bytes_create_task)
    );

    let created_task_response: serde_json::Value = serde_json::from_slice(&body_bytes_create_task)
        .expect("Failed to parse create task response JSON");
    assert_eq!(
        created_task_response.get("title").and_then(|t| t.as_str()),
        Some("Task created by token test")
    );
    assert_eq!(
        created_task_response
            .get("completed")
            .and_then(|c| c.as_bool()),
        Some(false)
    );
    assert_eq!(
        created_task_response
            .get("user_id")
            .and_then(|uid| uid.as_i64()),
        Some(user_id_from_login as i64)
    );
}

#[actix_rt::test]
async fn test_invalid_registration_inputs() {
    init_test_env();

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(UserStore::new()))
            .wrap(Logger::default())
            .service(web::scope("/api").configure(routes::config)),
    )
    .await;

    let test_cases = vec![
        // Deserialization errors (expect 400 for missing fields)
        (
            json!({ "password": "Password123!" }),
            actix_web::http::StatusCode::BAD_REQUEST,
            "missing username",
        ),
        (
            json!({ "username": "testuser" }),
            actix_web::http::StatusCode::BAD_REQUEST,
            "missing password",
        ),
        // Validation errors (expect 422 for invalid formats/lengths after successful deserialization)
        (
            json!({ "username": "u", "password": "Password123!" }),
            actix_web::http::StatusCode::UNPROCESSABLE_ENTITY,
            "username too short",
        ),
        (
            json!({ "username": "a".repeat(33), "password": "Password123!" }),
            actix_web::http::StatusCode::UNPROCESSABLE_ENTITY,
            "username too long",
        ),
        (
            json!({ "username": "user name!", "password": "Password123!" }),
            actix_web::http::StatusCode::UNPROCESSABLE_ENTITY,
            "username with invalid chars", // This depends on USERNAME_REGEX
        ),
        (
            json!({ "username": "testuser", "password": "123" }),
            actix_web::http::StatusCode::UNPROCESSABLE_ENTITY,
            "password too short",
        ),
    ];

    for (payload, expected_status, description) in test_cases {
        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(&payload)
            .to_request();

        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        let body_bytes = test::read_body(resp).await;

        assert_eq!(
            status,
            expected_status,
            "Test case failed: {}. Expected {}, got {}. Body: {:?}",
            description,
            expected_status,
            status,
            String::from_utf8_lossy(&body_bytes)
        );
    }
}

#[actix_rt::test]
async fn test_invalid_login_inputs() {
    init_test_env();

    // One store instance shared by setup and the login attempts.
    let user_store = web::Data::new(UserStore::new());

    let app = test::init_service(
        App::new()
            .app_data(user_store.clone())
            .wrap(Logger::default())
            .service(web::scope("/api").configure(routes::config)),
    )
    .await;

    // --- Setup a valid user for some test cases ---
    let register_payload = json!({
        "username": "login_test_user",
        "password": "Password123!"
    });
    let reg_req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(&register_payload)
        .to_request();
    let reg_resp = test::call_service(&app, reg_req).await;
    assert!(
        reg_resp.status().is_success(),
        "Setup: Failed to register test user"
    );
    // --- End user setup ---

    let test_cases = vec![
        // Deserialization errors (expect 400 for missing fields)
        (
            json!({ "password": "Password123!" }),
            actix_web::http::StatusCode::BAD_REQUEST,
            "missing username",
        ),
        (
            json!({ "username": "login_test_user" }),
            actix_web::http::StatusCode::BAD_REQUEST,
            "missing password",
        ),
        // Validation errors (expect 422 for invalid lengths after successful deserialization)
        (
            json!({ "username": "login_test_user", "password": "123" }),
            actix_web::http::StatusCode::UNPROCESSABLE_ENTITY,
            "password too short",
        ),
        // Authentication errors (expect 401)
        (
            json!({ "username": "login_test_user", "password": "WrongPassword123!" }),
            actix_web::http::StatusCode::UNAUTHORIZED,
            "incorrect password",
        ),
        (
            json!({ "username": "nonexistent_user", "password": "Password123!" }),
            actix_web::http::StatusCode::UNAUTHORIZED,
            "non-existent user",
        ),
    ];

    for (payload, expected_status, description) in test_cases {
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(&payload)
            .to_request();

        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        let body_bytes = test::read_body(resp).await;

        assert_eq!(
            status,
            expected_status,
            "Test case failed: {}. Expected {}, got {}. Body: {:?}",
            description,
            expected_status,
            status,
            String::from_utf8_lossy(&body_bytes)
        );
    }
}
