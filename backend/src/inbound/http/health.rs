//! Liveness probe.

use actix_web::{get, HttpResponse};
use serde_json::json;

/// Report process liveness.
#[get("/healthz")]
pub async fn healthz() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}
