use std::io::Write;
use std::time::Duration;

use axum::http::StatusCode;
use axum_test::TestServer;
use hospital_router::libraries::haversine_km;
use hospital_router::models::{
    DiagnosticLevel, Hospital, HospitalTable, HospitalTableSummary, LocationPoint,
    NearestHospitalResponse,
};
use hospital_router::services::{HospitalStore, RouteClient, RouteClientConfig};
use hospital_router::{app, AppState};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn hospitals() -> HospitalTable {
    HospitalTable::new(
        vec![
            Hospital::new("Far Hospital", 41.0, -75.0),
            Hospital::new("Test Hospital", 40.0, -75.1),
            Hospital::new("Other Hospital", 40.0, -76.0),
        ],
        "fixture.csv",
    )
}

fn route_client(base_url: &str) -> RouteClient {
    RouteClient::new(RouteClientConfig {
        base_url: base_url.to_string(),
        api_key: "test-key".to_string(),
        timeout: Duration::from_secs(2),
        ..Default::default()
    })
    .unwrap()
}

fn test_server(store: HospitalStore, routing_url: &str) -> TestServer {
    TestServer::new(app(AppState::new(store, route_client(routing_url)))).unwrap()
}

async fn mock_directions(server: &MockServer, distance_m: f64, duration_s: f64) {
    Mock::given(method("POST"))
        .and(path("/v2/directions/driving-car/geojson"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[-75.0, 40.0], [-75.04, 40.015], [-75.1, 40.0]]
                },
                "properties": {"segments": [{"distance": distance_m, "duration": duration_s}]}
            }]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn click_returns_nearest_hospital_and_route() {
    let routing = MockServer::start().await;
    mock_directions(&routing, 10_500.0, 780.0).await;
    let server = test_server(HospitalStore::with_table(hospitals()), &routing.uri());

    let response = server
        .post("/api/nearest")
        .json(&json!({"last_clicked": {"lat": 40.0, "lng": -75.0}}))
        .await;
    response.assert_status_ok();
    let body: NearestHospitalResponse = response.json();

    assert!(body.success);
    let hospital = body.hospital.expect("nearest hospital");
    assert_eq!(hospital.name, "Test Hospital");
    assert_eq!(hospital.location, LocationPoint::new(40.0, -75.1));

    let expected = haversine_km(&LocationPoint::new(40.0, -75.0), &LocationPoint::new(40.0, -75.1));
    assert!((hospital.distance_km - expected).abs() < 1e-9);

    let route = body.route.expect("route");
    assert!(route.geometry.is_some());
    assert!(route.distance_km > 0.0);
    assert!(route.distance_km >= hospital.distance_km);
    assert!((route.duration_min - 13.0).abs() < 1e-9);

    assert!(body.diagnostics.is_empty());
    assert!(body.bounds.is_some());
    assert!(body
        .messages
        .contains(&"Nearest hospital: Test Hospital".to_string()));
    assert!(body.messages.contains(&"Driving distance: 10.50 km".to_string()));
}

#[tokio::test]
async fn routing_failure_still_returns_hospital() {
    let routing = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"features": []})))
        .mount(&routing)
        .await;
    let server = test_server(HospitalStore::with_table(hospitals()), &routing.uri());

    let body: NearestHospitalResponse = server
        .post("/api/nearest")
        .json(&json!({"last_clicked": {"lat": 40.0, "lng": -75.0}}))
        .await
        .json();

    assert!(body.success);
    assert_eq!(body.hospital.unwrap().name, "Test Hospital");

    let route = body.route.unwrap();
    assert!(route.geometry.is_none());
    assert_eq!(route.distance_km, 0.0);
    assert_eq!(route.duration_min, 0.0);

    let levels: Vec<_> = body.diagnostics.iter().map(|d| d.level).collect();
    assert_eq!(levels, vec![DiagnosticLevel::Error]);
    assert!(body.diagnostics[0].message.contains("No route found"));
    assert!(body
        .messages
        .contains(&"Could not retrieve driving route information.".to_string()));
}

#[tokio::test]
async fn missing_click_is_no_selection() {
    let server = test_server(HospitalStore::with_table(hospitals()), "http://127.0.0.1:1");

    let body: NearestHospitalResponse = server
        .post("/api/nearest")
        .json(&json!({"last_clicked": null}))
        .await
        .json();

    assert!(body.success);
    assert!(body.hospital.is_none());
    assert_eq!(
        body.messages,
        vec!["Click on the map to select your starting location.".to_string()]
    );
}

#[tokio::test]
async fn out_of_range_click_is_rejected() {
    let server = test_server(HospitalStore::with_table(hospitals()), "http://127.0.0.1:1");

    let body: NearestHospitalResponse = server
        .post("/api/nearest")
        .json(&json!({"last_clicked": {"lat": 120.0, "lng": -75.0}}))
        .await
        .json();

    assert!(!body.success);
    assert_eq!(body.error.as_deref(), Some("Invalid coordinates provided."));
}

#[tokio::test]
async fn missing_dataset_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let store = HospitalStore::new(dir.path().join("missing.csv"));
    let server = test_server(store, "http://127.0.0.1:1");

    let body: NearestHospitalResponse = server
        .post("/api/nearest")
        .json(&json!({"last_clicked": {"lat": 40.0, "lng": -75.0}}))
        .await
        .json();

    assert!(!body.success);
    assert!(body
        .error
        .unwrap()
        .starts_with("Failed to load hospital data: hospital data file not found"));

    let summary = server.get("/api/hospitals").await;
    summary.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn hospitals_load_lazily_and_reload() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "NAME,LATITUDE,LONGITUDE").unwrap();
    writeln!(file, "Test Hospital,40.0,-75.1").unwrap();
    writeln!(file, "Missing Coordinates,,").unwrap();
    file.flush().unwrap();

    let server = test_server(HospitalStore::new(file.path()), "http://127.0.0.1:1");

    let summary: HospitalTableSummary = server.get("/api/hospitals").await.json();
    assert_eq!(summary.count, 1);

    writeln!(file, "Another Hospital,41.0,-75.0").unwrap();
    file.flush().unwrap();

    let summary: HospitalTableSummary = server.get("/api/hospitals").await.json();
    assert_eq!(summary.count, 1, "cached table is reused until reload");

    let reloaded = server.post("/api/hospitals/reload").await;
    reloaded.assert_status_ok();
    assert_eq!(reloaded.json::<HospitalTableSummary>().count, 2);
}

#[tokio::test]
async fn health_check() {
    let server = test_server(HospitalStore::with_table(hospitals()), "http://127.0.0.1:1");

    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "hospital-router");
}
