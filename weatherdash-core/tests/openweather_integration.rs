//! Integration tests for OpenWeatherProvider using wiremock.
//!
//! These tests run the client and the full refresh pipeline against a mock
//! HTTP server standing in for api.openweathermap.org.

use weatherdash_core::{
    Dashboard, FixedPosition, LocationQuery, OpenWeatherProvider, TemperatureUnit, WeatherError,
    WeatherProvider, fetch_view,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "test-key";

/// Helper to create a current-conditions payload
fn current_json(name: &str, temp: f64, feels_like: f64, condition: &str) -> serde_json::Value {
    serde_json::json!({
        "coord": {"lon": -0.1257, "lat": 51.5085},
        "weather": [{"id": 803, "main": condition, "description": "broken clouds", "icon": "04d"}],
        "main": {"temp": temp, "feels_like": feels_like, "temp_min": temp - 1.0,
                 "temp_max": temp + 1.0, "pressure": 1012, "humidity": 72},
        "visibility": 9000,
        "wind": {"speed": 4.12, "deg": 250},
        "dt": 1705320000,
        "sys": {"country": "GB", "sunrise": 1705305000, "sunset": 1705335000},
        "name": name,
        "cod": 200
    })
}

/// Helper to create a 40-sample forecast payload
fn forecast_json() -> serde_json::Value {
    let list: Vec<_> = (0..40)
        .map(|i| {
            serde_json::json!({
                "dt": 1_705_276_800_i64 + i * 10_800,
                "main": {"temp": 10.0, "feels_like": 9.0, "temp_min": 8.0 + i as f64,
                         "temp_max": 14.0 + i as f64, "pressure": 1010, "humidity": 60},
                "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
                "dt_txt": "2024-01-15 00:00:00"
            })
        })
        .collect();

    serde_json::json!({
        "cod": "200",
        "cnt": 40,
        "list": list,
        "city": {"name": "London", "country": "GB"}
    })
}

async fn mount_london(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "London"))
        .and(query_param("appid", KEY))
        .and(query_param("units", "metric"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(current_json("London", 15.0, 13.5, "Clouds")),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .and(query_param("q", "London"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_json()))
        .mount(server)
        .await;
}

fn provider(server: &MockServer) -> OpenWeatherProvider {
    OpenWeatherProvider::new_with_base_url(KEY.to_string(), &server.uri())
}

#[tokio::test]
async fn test_fetch_current_success() {
    let mock_server = MockServer::start().await;
    mount_london(&mock_server).await;

    let raw = provider(&mock_server)
        .fetch_current(&LocationQuery::city("London"))
        .await
        .unwrap();

    assert_eq!(raw.name, "London");
    assert_eq!(raw.country, "GB");
    assert_eq!(raw.temperature_c, 15.0);
    assert_eq!(raw.visibility_m, Some(9000.0));
    assert_eq!(raw.condition, "Clouds");
}

#[tokio::test]
async fn test_fetch_forecast_returns_all_samples() {
    let mock_server = MockServer::start().await;
    mount_london(&mock_server).await;

    let entries = provider(&mock_server)
        .fetch_forecast(&LocationQuery::city("London"))
        .await
        .unwrap();

    assert_eq!(entries.len(), 40);
    assert_eq!(entries[0].temp_min_c, 8.0);
    assert_eq!(entries[39].temp_max_c, 53.0);
}

#[tokio::test]
async fn test_fetch_view_end_to_end() {
    let mock_server = MockServer::start().await;
    mount_london(&mock_server).await;

    let view = fetch_view(&provider(&mock_server), &LocationQuery::city("London"))
        .await
        .unwrap();

    assert_eq!(view.current.location, "London, GB");
    assert_eq!(view.current.visibility_km, Some(9.0));
    assert_eq!(view.current.uv_index, None);
    assert_eq!(view.forecast.len(), 5);

    let lows: Vec<f64> = view.forecast.iter().map(|d| d.low).collect();
    assert_eq!(lows, [8.0, 16.0, 24.0, 32.0, 40.0]);
}

#[tokio::test]
async fn test_unknown_city_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "cod": "404",
            "message": "city not found"
        })))
        .mount(&mock_server)
        .await;

    let mut dash = Dashboard::new(
        provider(&mock_server),
        TemperatureUnit::Celsius,
        LocationQuery::default(),
    );
    let state = dash.search("Nonexistentville").await;

    assert_eq!(state.error.as_deref(), Some("City not found"));
    assert!(!state.loading);
    assert!(state.view.is_none());
}

#[tokio::test]
async fn test_rejected_key_is_configuration_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "cod": 401,
            "message": "Invalid API key."
        })))
        .mount(&mock_server)
        .await;

    let err = provider(&mock_server)
        .fetch_current(&LocationQuery::city("London"))
        .await
        .unwrap_err();

    assert!(err.is_configuration());
}

#[tokio::test]
async fn test_forecast_server_error_fails_refresh() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(current_json("London", 15.0, 13.5, "Clouds")),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let err = fetch_view(&provider(&mock_server), &LocationQuery::city("London"))
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::Network(_)));
}

#[tokio::test]
async fn test_malformed_body_is_unknown_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let err = provider(&mock_server)
        .fetch_current(&LocationQuery::city("London"))
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::Unknown(_)));
}

#[tokio::test]
async fn test_geolocated_refresh_resolves_name_then_searches() {
    let mock_server = MockServer::start().await;
    mount_london(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("lat", "51.5"))
        .and(query_param("lon", "-0.12"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(current_json("London", 15.0, 13.5, "Clouds")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut by_position = Dashboard::new(
        provider(&mock_server),
        TemperatureUnit::Celsius,
        LocationQuery::default(),
    );
    let located = by_position
        .locate(&FixedPosition::new(51.5, -0.12))
        .await
        .clone();

    let mut by_name = Dashboard::new(
        provider(&mock_server),
        TemperatureUnit::Celsius,
        LocationQuery::default(),
    );
    let searched = by_name.search("London").await.clone();

    assert_eq!(located, searched);
    assert_eq!(by_position.last_query(), &LocationQuery::city("London"));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let provider = OpenWeatherProvider::new_with_base_url(KEY.to_string(), "http://127.0.0.1:1");

    let err = provider
        .fetch_current(&LocationQuery::city("London"))
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::Network(_)));
}
