//! End-to-end refresh runs against mocked weather and geocoding services.

use weather_core::{
    Config, Coordinates, DisplayState, ErrorKind, LocationMode, RecordingRenderer, RefreshOutcome,
    WeatherApp,
    error::{GENERIC_FAILURE_MESSAGE, PERMISSION_DENIED_MESSAGE},
    model::{STATUS_LOADING_WEATHER, STATUS_LOCATING},
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> Config {
    let mut config = Config {
        weather_url: server.uri(),
        geocode_url: format!("{}/reverse", server.uri()),
        ip_location_url: format!("{}/json/", server.uri()),
        ..Config::default()
    };
    config.set_fixed_location(Coordinates::new(40.7128, -74.006));
    config
}

async fn mount_weather(server: &MockServer, code: i32, temperature: f64) {
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "current": {
                "temperature_2m": temperature,
                "apparent_temperature": 70.2,
                "relative_humidity_2m": 58,
                "weather_code": code,
                "wind_speed_10m": 8.6
            }
        })))
        .mount(server)
        .await;
}

async fn mount_geocoder(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "address": { "city": "New York", "country": "United States" }
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn clear_sky_run_ends_in_content() {
    let server = MockServer::start().await;
    mount_weather(&server, 0, 72.6).await;
    mount_geocoder(&server).await;

    let app = WeatherApp::from_config(&config_for(&server)).expect("app");
    let renderer = RecordingRenderer::new();

    assert_eq!(app.refresh(&renderer).await, RefreshOutcome::Content);

    let states = renderer.states();
    assert_eq!(states[0], DisplayState::Loading { status: STATUS_LOCATING });
    assert_eq!(states[1], DisplayState::Loading { status: STATUS_LOADING_WEATHER });

    let Some(DisplayState::Content(view)) = renderer.last() else {
        panic!("expected content state, got {:?}", renderer.last());
    };
    assert_eq!(view.temperature, 73);
    assert_eq!(view.feels_like, 70);
    assert_eq!(view.humidity, 58.0);
    assert_eq!(view.wind_speed, 9);
    assert_eq!(view.icon, "☀️");
    assert_eq!(view.location, "New York, United States");
}

#[tokio::test]
async fn geocoder_outage_still_renders_content() {
    let server = MockServer::start().await;
    mount_weather(&server, 95, 80.0).await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let app = WeatherApp::from_config(&config_for(&server)).expect("app");
    let renderer = RecordingRenderer::new();

    assert_eq!(app.refresh(&renderer).await, RefreshOutcome::Content);

    let Some(DisplayState::Content(view)) = renderer.last() else {
        panic!("expected content state");
    };
    assert_eq!(view.location, "40.71°, -74.01°");
    assert_eq!(view.icon, "⛈️");
}

#[tokio::test]
async fn disabled_location_ends_in_permission_error() {
    let server = MockServer::start().await;
    mount_weather(&server, 0, 72.6).await;

    let mut config = config_for(&server);
    config.location.mode = LocationMode::Disabled;

    let app = WeatherApp::from_config(&config).expect("app");
    let renderer = RecordingRenderer::new();

    assert_eq!(
        app.refresh(&renderer).await,
        RefreshOutcome::Error(ErrorKind::PermissionDenied)
    );
    assert!(!renderer.states().iter().any(DisplayState::is_content));
    assert_eq!(
        renderer.last(),
        Some(DisplayState::Error {
            kind: ErrorKind::PermissionDenied,
            message: PERMISSION_DENIED_MESSAGE.to_string(),
        })
    );
    // Weather is never requested when the location is refused.
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn weather_server_error_ends_in_generic_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;
    mount_geocoder(&server).await;

    let app = WeatherApp::from_config(&config_for(&server)).expect("app");
    let renderer = RecordingRenderer::new();

    assert_eq!(app.refresh(&renderer).await, RefreshOutcome::Error(ErrorKind::Http));
    assert_eq!(
        renderer.last(),
        Some(DisplayState::Error {
            kind: ErrorKind::Http,
            message: GENERIC_FAILURE_MESSAGE.to_string(),
        })
    );
}

#[tokio::test]
async fn auto_location_uses_ip_lookup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "latitude": 40.7128,
            "longitude": -74.006
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_weather(&server, 2, 64.4).await;
    mount_geocoder(&server).await;

    let mut config = config_for(&server);
    config.location.mode = LocationMode::Auto;

    let app = WeatherApp::from_config(&config).expect("app");
    let renderer = RecordingRenderer::new();

    assert_eq!(app.refresh(&renderer).await, RefreshOutcome::Content);
    let Some(DisplayState::Content(view)) = renderer.last() else {
        panic!("expected content state");
    };
    assert_eq!(view.icon, "⛅");
    assert_eq!(view.temperature, 64);
}

#[tokio::test]
async fn repeated_runs_render_the_same_view() {
    let server = MockServer::start().await;
    mount_weather(&server, 45, 50.5).await;
    mount_geocoder(&server).await;

    let app = WeatherApp::from_config(&config_for(&server)).expect("app");

    let mut views = Vec::new();
    for _ in 0..3 {
        let renderer = RecordingRenderer::new();
        app.refresh(&renderer).await;
        let Some(DisplayState::Content(view)) = renderer.last() else {
            panic!("expected content state");
        };
        views.push(view);
    }

    assert!(views.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(views[0].temperature, 51);
}
