use axum::extract::Json;
use axum::http::{Method, StatusCode, Uri};
use serde_json::json;

use crate::server::ENDPOINTS;

pub async fn not_found(method: Method, uri: Uri) -> (StatusCode, Json<serde_json::Value>) {
    tracing::info!("route not found: {} {}", method, uri);

    let available: Vec<String> = ENDPOINTS
        .iter()
        .map(|(method, path)| format!("{method} {path}"))
        .collect();

    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "message": format!("Route {} not found", uri.path()),
            "availableEndpoints": available,
        })),
    )
}
