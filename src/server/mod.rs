mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    handler::Handler,
    http::{header, HeaderName, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tokio::signal;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::{BusinessContact, Settings};
use crate::error::{unexpected_error, Error};
use crate::server::handlers::{bookings, estimates, fallback, health};
use crate::api::API;

pub type DynAPI = Arc<dyn API + Send + Sync>;

pub const ENDPOINTS: [(&str, &str); 4] = [
    ("GET", "/api/health"),
    ("GET", "/api/test"),
    ("POST", "/api/estimate"),
    ("POST", "/api/book"),
];

/// Success envelope shared by every JSON endpoint.
#[derive(Debug, Serialize)]
pub struct Reply<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T> Reply<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ContactInfo {
    pub phone: String,
    pub email: String,
}

impl From<&BusinessContact> for ContactInfo {
    fn from(contact: &BusinessContact) -> Self {
        Self {
            phone: contact.phone.clone(),
            email: contact.email.clone(),
        }
    }
}

pub fn router(api: DynAPI, settings: Arc<Settings>) -> Router {
    let cors = cors_layer(&settings.cors_origins);

    Router::new()
        .route("/api/health", get(health::health))
        .route("/api/test", get(health::test))
        .route("/api/estimate", post(estimates::create))
        .route("/api/book", post(bookings::create))
        .fallback(fallback::not_found.into_service())
        .layer(Extension(api))
        .layer(Extension(settings))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ];

    if origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(methods)
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            header::ORIGIN,
            HeaderName::from_static("x-requested-with"),
        ])
        .allow_credentials(true)
}

pub async fn serve<T: API + Sync + Send + 'static>(api: T, settings: Settings) -> Result<(), Error> {
    let addr = SocketAddr::new(settings.host, settings.port);
    let api = Arc::new(api) as DynAPI;

    let app = router(api, Arc::new(settings));

    tracing::info!("listening on {}", addr);

    axum::Server::try_bind(&addr)
        .map_err(unexpected_error)?
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(unexpected_error)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!("failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutting down gracefully");
}
