mod common;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use cluster_navigation::cache::{KeyValueStore, MemoryStore, NavigationCache};
use cluster_navigation::config::environment::EnvironmentConfig;
use cluster_navigation::routes::create_app_router;
use cluster_navigation::services::{NavigationService, NavigationSettings, WeatherService};
use cluster_navigation::state::AppState;

use common::*;

fn create_test_app(geocoder: Arc<FakeGeocoder>, router: Arc<FakeRouter>) -> Router {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let navigation = Arc::new(NavigationService::new(
        geocoder,
        router,
        NavigationCache::new(store.clone()),
        NavigationSettings::default(),
    ));
    let weather = Arc::new(WeatherService::new(FakeWeather::returning(sunny()), store));

    create_app_router(AppState::new(EnvironmentConfig::default(), navigation, weather))
}

fn default_app() -> Router {
    create_test_app(
        FakeGeocoder::returning(vec![brooklyn_bridge()]),
        FakeRouter::returning(manhattan_route()),
    )
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn route_request(destination: &str, latitude: f64, longitude: f64) -> Value {
    json!({
        "destination": destination,
        "latitude": latitude,
        "longitude": longitude,
    })
}

#[tokio::test]
async fn test_health_check() {
    let app = default_app();
    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "cluster-navigation");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_resolve_route_live() {
    let app = default_app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/navigation/route",
        Some(route_request("Brooklyn Bridge", 40.7580, -73.9855)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["source"], "live");
    assert_eq!(body["data"]["route"]["duration"], 1260);
    assert_eq!(body["data"]["route"]["eta"], "21 min");
    assert_eq!(body["data"]["route"]["polyline"].as_array().unwrap().len(), 3);
    assert!(body["data"]["reason"].is_null());

    let (status, body) = send(&app, "GET", "/api/navigation/destination", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], "Brooklyn Bridge");

    let (status, body) = send(&app, "GET", "/api/navigation/route", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["destination"], "Brooklyn Bridge");
}

#[tokio::test]
async fn test_resolve_route_fallback_reports_reason() {
    let app = create_test_app(
        FakeGeocoder::returning(vec![brooklyn_bridge()]),
        FakeRouter::failing("timeout"),
    );

    let (status, body) = send(
        &app,
        "POST",
        "/api/navigation/route",
        Some(route_request("Brooklyn Bridge", 40.7580, -73.9855)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["source"], "fallback");
    assert_eq!(body["data"]["reason_code"], "ROUTING_PROVIDER_ERROR");
    assert_eq!(body["data"]["route"]["duration"], 900);
    assert_eq!(body["data"]["route"]["distance"], "5.0 km");
}

#[tokio::test]
async fn test_unavailable_route_is_not_an_http_error() {
    let app = create_test_app(FakeGeocoder::returning(Vec::new()), FakeRouter::failing("down"));

    let (status, body) = send(
        &app,
        "POST",
        "/api/navigation/route",
        Some(route_request("Atlantis", 40.7580, -73.9855)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert!(body["data"]["route"].is_null());
    assert_eq!(body["data"]["reason_code"], "DESTINATION_NOT_FOUND");
    assert!(body["message"].as_str().unwrap().contains("Atlantis"));
}

#[tokio::test]
async fn test_invalid_coordinates_are_rejected() {
    let app = default_app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/navigation/route",
        Some(route_request("Brooklyn Bridge", 120.0, -73.9855)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, body) = send(
        &app,
        "POST",
        "/api/navigation/route",
        Some(route_request("   ", 40.7580, -73.9855)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_current_route_not_found_without_journey() {
    let app = default_app();

    let (status, body) = send(&app, "GET", "/api/navigation/route", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, _) = send(&app, "GET", "/api/navigation/destination", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_and_clear_route() {
    let app = default_app();
    send(
        &app,
        "POST",
        "/api/navigation/route",
        Some(route_request("Brooklyn Bridge", 40.7580, -73.9855)),
    )
    .await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/navigation/route/update",
        Some(json!({ "latitude": 40.7581, "longitude": -73.9855 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["source"], "unchanged");

    let (status, body) = send(&app, "DELETE", "/api/navigation/route", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, body) = send(
        &app,
        "POST",
        "/api/navigation/route/update",
        Some(json!({ "latitude": 40.7581, "longitude": -73.9855 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["data"]["reason_code"], "NO_ACTIVE_DESTINATION");
}

#[tokio::test]
async fn test_search_endpoint() {
    let app = create_test_app(
        FakeGeocoder::returning(vec![
            place("Central Park", 40.7829, -73.9654),
            place("Empire State Building", 40.7484, -73.9857),
        ]),
        FakeRouter::returning(manhattan_route()),
    );

    let (status, body) = send(
        &app,
        "GET",
        "/api/navigation/search?q=landmark&lat=40.758&lon=-73.9855",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["nearby"], true);
    assert_eq!(
        body["data"]["results"][0]["display_name"],
        "Empire State Building"
    );

    let (status, body) = send(&app, "GET", "/api/navigation/search?q=landmark", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["nearby"], false);
    assert_eq!(body["data"]["results"][0]["display_name"], "Central Park");
}

#[tokio::test]
async fn test_weather_requires_location() {
    let app = default_app();

    let (status, _) = send(&app, "GET", "/api/weather", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "GET", "/api/weather?lat=40.758&lon=-73.9855", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["description"], "clear sky");
    assert_eq!(body["data"]["humidity"], 40);
}

#[tokio::test]
async fn test_dashboard_overview() {
    let app = default_app();
    send(
        &app,
        "POST",
        "/api/navigation/route",
        Some(route_request("Brooklyn Bridge", 40.7580, -73.9855)),
    )
    .await;

    let (status, body) = send(&app, "GET", "/api/dashboard?lat=40.758&lon=-73.9855", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["destination"], "Brooklyn Bridge");
    assert_eq!(body["data"]["route"]["eta"], "21 min");
    assert_eq!(body["data"]["weather"]["icon"], "01d");
    let progress = body["data"]["progress"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&progress));
}
