mod common;

use std::time::Duration;

use axum::http::StatusCode;
use droptaxi::config::{GoogleMapsSettings, Settings};
use droptaxi::entities::Coordinates;
use droptaxi::external::google_maps::GoogleMaps;
use serde_json::{json, Value};
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{app, booking, post_json};

const MATRIX_PATH: &str = "/maps/api/distancematrix/json";

fn chennai() -> Coordinates {
    Coordinates::new(13.0827, 80.2707)
}

fn bangalore() -> Coordinates {
    Coordinates::new(12.9716, 77.5946)
}

fn settings(server: &MockServer) -> GoogleMapsSettings {
    GoogleMapsSettings {
        api_key: "maps-key".into(),
        api_base: server.uri(),
    }
}

fn matrix(meters: u64, duration: &str) -> Value {
    json!({
        "status": "OK",
        "rows": [{
            "elements": [{
                "status": "OK",
                "distance": { "text": "346 km", "value": meters },
                "duration": { "text": duration, "value": 20400 }
            }]
        }]
    })
}

#[tokio::test]
async fn parses_driving_distance() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(MATRIX_PATH))
        .and(query_param("key", "maps-key"))
        .and(query_param("origins", "13.0827,80.2707"))
        .and(query_param("destinations", "12.9716,77.5946"))
        .and(query_param("mode", "driving"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(matrix(346_480, "5 hours 40 mins")))
        .expect(1)
        .mount(&server)
        .await;

    let maps = GoogleMaps::new(&settings(&server), Duration::from_secs(5)).unwrap();
    let route = assert_ok!(maps.driving_distance(chennai(), bangalore()).await);

    assert_eq!(route.distance_km, 346.0);
    assert_eq!(route.duration.as_deref(), Some("5 hours 40 mins"));
}

#[tokio::test]
async fn rejects_denied_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(MATRIX_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "REQUEST_DENIED",
            "rows": []
        })))
        .mount(&server)
        .await;

    let maps = GoogleMaps::new(&settings(&server), Duration::from_secs(5)).unwrap();
    let err = assert_err!(maps.driving_distance(chennai(), bangalore()).await);

    assert!(err.is_internal());
}

#[tokio::test]
async fn rejects_unroutable_element() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(MATRIX_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "rows": [{ "elements": [{ "status": "ZERO_RESULTS" }] }]
        })))
        .mount(&server)
        .await;

    let maps = GoogleMaps::new(&settings(&server), Duration::from_secs(5)).unwrap();

    assert_err!(maps.driving_distance(chennai(), bangalore()).await);
}

#[tokio::test]
async fn client_error_is_an_upstream_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(MATRIX_PATH))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let maps = GoogleMaps::new(&settings(&server), Duration::from_secs(5)).unwrap();
    let err = assert_err!(maps.driving_distance(chennai(), bangalore()).await);

    assert!(err.is_internal());
    assert_eq!(err.code, 4);
}

#[tokio::test]
async fn estimate_uses_driving_distance() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(MATRIX_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(matrix(350_400, "5 hours 50 mins")))
        .expect(1)
        .mount(&server)
        .await;

    let app = app(
        Settings {
            google_maps: Some(settings(&server)),
            ..Settings::default()
        },
        vec![],
    );
    let mut request = booking();
    request["distance"] = json!(null);
    request["pickupCoordinates"] = json!({ "lat": 13.0827, "lng": 80.2707 });
    request["dropCoordinates"] = json!({ "lat": 12.9716, "lng": 77.5946 });

    let (status, body) = post_json(app, "/api/estimate", &request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["estimatedDistance"], 350.0);
    assert_eq!(body["data"]["estimatedDuration"], "5 hours 50 mins");
    assert_eq!(body["data"]["totalPrice"], 7050);
}

#[tokio::test]
async fn estimate_survives_lookup_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(MATRIX_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let app = app(
        Settings {
            google_maps: Some(settings(&server)),
            ..Settings::default()
        },
        vec![],
    );
    let mut request = booking();
    request["distance"] = json!(null);
    request["pickupCoordinates"] = json!({ "lat": 13.0827, "lng": 80.2707 });
    request["dropCoordinates"] = json!({ "lat": 12.9716, "lng": 77.5946 });

    let (status, body) = post_json(app, "/api/estimate", &request).await;

    assert_eq!(status, StatusCode::OK);
    let distance = body["data"]["estimatedDistance"].as_f64().unwrap();
    assert!((280.0..=300.0).contains(&distance), "got {distance}");
    assert_eq!(body["data"]["estimatedDuration"], "Calculating...");
}

#[tokio::test]
async fn measured_distance_skips_lookup() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(MATRIX_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(matrix(500_000, "8 hours")))
        .expect(0)
        .mount(&server)
        .await;

    let app = app(
        Settings {
            google_maps: Some(settings(&server)),
            ..Settings::default()
        },
        vec![],
    );
    let mut request = booking();
    request["pickupCoordinates"] = json!({ "lat": 13.0827, "lng": 80.2707 });
    request["dropCoordinates"] = json!({ "lat": 12.9716, "lng": 77.5946 });

    let (status, body) = post_json(app, "/api/estimate", &request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["estimatedDistance"], 350.0);
}

#[tokio::test]
async fn stalled_lookup_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(MATRIX_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(matrix(350_400, "5 hours 50 mins"))
                .set_delay(Duration::from_secs(30)),
        )
        .mount(&server)
        .await;

    let maps = GoogleMaps::new(&settings(&server), Duration::from_millis(200)).unwrap();
    let lookup = tokio::time::timeout(
        Duration::from_secs(5),
        maps.driving_distance(chennai(), bangalore()),
    )
    .await
    .expect("lookup gives up on its own");

    assert_err!(lookup);
}

#[tokio::test]
async fn estimate_survives_stalled_lookup() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(MATRIX_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(matrix(350_400, "5 hours 50 mins"))
                .set_delay(Duration::from_secs(30)),
        )
        .mount(&server)
        .await;

    let app = app(
        Settings {
            google_maps: Some(settings(&server)),
            http_timeout: Duration::from_millis(300),
            ..Settings::default()
        },
        vec![],
    );
    let mut request = booking();
    request["distance"] = json!(null);
    request["pickupCoordinates"] = json!({ "lat": 13.0827, "lng": 80.2707 });
    request["dropCoordinates"] = json!({ "lat": 12.9716, "lng": 77.5946 });

    let (status, body) = tokio::time::timeout(
        Duration::from_secs(5),
        post_json(app, "/api/estimate", &request),
    )
    .await
    .expect("estimate answers despite the stalled lookup");

    assert_eq!(status, StatusCode::OK);
    let distance = body["data"]["estimatedDistance"].as_f64().unwrap();
    assert!((280.0..=300.0).contains(&distance), "got {distance}");
    assert_eq!(body["data"]["estimatedDuration"], "Calculating...");
}
