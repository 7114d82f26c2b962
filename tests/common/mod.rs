#![allow(dead_code)]

use axum::Router;
use axum_test::TestServer;
use serde_json::json;
use std::sync::Arc;
use user_service::api::routes::user_routes;
use user_service::application::services::UserService;
use user_service::infrastructure::persistence::InMemoryUserRepository;
use user_service::infrastructure::security::Argon2PasswordHasher;
use user_service::state::AppState;

pub fn create_test_state() -> AppState {
    let user_service = Arc::new(UserService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(Argon2PasswordHasher::new()),
    ));

    AppState::new(user_service)
}

pub fn make_server() -> TestServer {
    let app = Router::new().merge(user_routes()).with_state(create_test_state());
    TestServer::new(app).unwrap()
}

/// Creates a user through the API and returns its id.
pub async fn create_test_user(server: &TestServer, name: &str, email: &str) -> i64 {
    let response = server
        .post("/users")
        .json(&json!({
            "name": name,
            "email": email,
            "password": "secret",
            "passwordConfirmation": "secret"
        }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<serde_json::Value>()["id"].as_i64().unwrap()
}
