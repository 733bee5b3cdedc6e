use actix_web::{get, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;

/// Health check endpoint
///
/// Reports the service name, current status, and a timestamp. Lives outside
/// the authenticated `/api` scope so probes never need a token.
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "service": "taskprime",
        "status": "ok",
        "timestamp": Utc::now()
    }))
}
