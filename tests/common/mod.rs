#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use droptaxi::config::Settings;
use droptaxi::engine::Engine;
use droptaxi::error::{notification_error, Error};
use droptaxi::notifications::{BookingEvent, Dispatcher, Notifier};
use droptaxi::server::router;
use serde_json::{json, Value};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tower::ServiceExt;

/// Forwards every delivered event to the test.
pub struct Recorder(UnboundedSender<BookingEvent>);

#[async_trait]
impl Notifier for Recorder {
    fn name(&self) -> &'static str {
        "recorder"
    }

    async fn notify(&self, event: &BookingEvent) -> Result<(), Error> {
        self.0.send(event.clone()).ok();
        Ok(())
    }
}

pub struct Failing;

#[async_trait]
impl Notifier for Failing {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn notify(&self, _event: &BookingEvent) -> Result<(), Error> {
        Err(notification_error("smtp relay unreachable"))
    }
}

/// Accepts the event and never finishes delivering it.
pub struct Stalled;

#[async_trait]
impl Notifier for Stalled {
    fn name(&self) -> &'static str {
        "stalled"
    }

    async fn notify(&self, _event: &BookingEvent) -> Result<(), Error> {
        std::future::pending().await
    }
}

pub fn recorder() -> (Arc<dyn Notifier>, UnboundedReceiver<BookingEvent>) {
    let (sender, receiver) = unbounded_channel();
    (Arc::new(Recorder(sender)), receiver)
}

pub async fn next_event(receiver: &mut UnboundedReceiver<BookingEvent>) -> BookingEvent {
    tokio::time::timeout(Duration::from_secs(2), receiver.recv())
        .await
        .expect("notification delivered in time")
        .expect("worker alive")
}

pub fn app(settings: Settings, notifiers: Vec<Arc<dyn Notifier>>) -> Router {
    let dispatcher = Dispatcher::start(notifiers, settings.notification_timeout);
    let engine = Engine::new(&settings, dispatcher).unwrap();

    router(Arc::new(engine), Arc::new(settings))
}

pub fn booking() -> Value {
    json!({
        "pickupLocation": "Chennai",
        "dropLocation": "Bangalore",
        "tripType": "one-way",
        "date": "2025-01-01",
        "time": "10:00",
        "carType": "suv",
        "name": "Test User",
        "phone": "9876543210",
        "distance": 350
    })
}

pub async fn post(app: Router, uri: &str, body: String) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();

    (status, serde_json::from_slice(&bytes).unwrap())
}

pub async fn post_json(app: Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    post(app, uri, body.to_string()).await
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();

    (status, serde_json::from_slice(&bytes).unwrap())
}
