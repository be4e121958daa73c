use std::sync::Arc;

use axum::extract::{Extension, Json};
use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};

use crate::config::Settings;
use crate::server::ENDPOINTS;

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub async fn health(Extension(settings): Extension<Arc<Settings>>) -> Json<Value> {
    tracing::debug!("health check requested");

    Json(json!({
        "status": "OK",
        "message": "Backend server is running perfectly",
        "timestamp": timestamp(),
        "port": settings.port,
        "endpoints": ENDPOINTS.iter().map(|(_, path)| *path).collect::<Vec<_>>(),
    }))
}

pub async fn test(Extension(settings): Extension<Arc<Settings>>) -> Json<Value> {
    Json(json!({
        "message": "Backend is working perfectly!",
        "timestamp": timestamp(),
        "server": format!("{} API", settings.contact.name),
    }))
}
