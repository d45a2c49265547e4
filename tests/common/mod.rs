#![allow(dead_code)]

use std::time::Duration;

use chrono::{TimeZone, Utc};
use serde_json::{Value, json};
use sunset_dashboard::{
    app::{settings::Settings, state::AppState},
    data::{
        geocode::{GeocodeClient, GeocodeProvider},
        geolocate::Geolocator,
        solar::SolarClient,
    },
    domain::solar::{Coordinate, SolarEvents},
    pipeline::{PipelineStage, ResolutionPipeline, SolarReport, format_sections},
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

pub const PARIS_LAT: f64 = 48.8566;
pub const PARIS_LON: f64 = 2.3522;

pub fn http() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .expect("http client")
}

/// Sunrise-sunset payload for 2024-06-21 in Paris, reported in `timezone`.
pub fn solar_body(timezone: &str) -> Value {
    json!({
        "results": {
            "sunrise": "2024-06-21T03:47:00+00:00",
            "sunset": "2024-06-21T19:58:00+00:00",
            "solar_noon": "2024-06-21T11:52:30+00:00",
            "day_length": 58200,
            "civil_twilight_begin": "2024-06-21T03:05:00+00:00",
            "civil_twilight_end": "2024-06-21T20:40:00+00:00",
            "nautical_twilight_begin": "2024-06-21T02:03:00+00:00",
            "nautical_twilight_end": "2024-06-21T21:42:00+00:00",
            "timezone": timezone
        },
        "status": "OK",
        "tzid": timezone
    })
}

pub fn open_meteo_body(name: &str, latitude: f64, longitude: f64) -> Value {
    json!({
        "results": [
            {
                "name": name,
                "latitude": latitude,
                "longitude": longitude,
                "country": "France",
                "population": 2_138_551
            }
        ]
    })
}

pub async fn mount_place(server: &MockServer, name: &str, latitude: f64, longitude: f64) {
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", name))
        .respond_with(ResponseTemplate::new(200).set_body_json(open_meteo_body(
            name, latitude, longitude,
        )))
        .mount(server)
        .await;
}

pub async fn mount_solar(server: &MockServer, latitude: &str, timezone: &str, delay: Duration) {
    Mock::given(method("GET"))
        .and(path("/json"))
        .and(query_param("lat", latitude))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(solar_body(timezone))
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

pub fn pipeline_for(server: &MockServer) -> ResolutionPipeline {
    let client = http();
    ResolutionPipeline::new(
        GeocodeClient::new(
            client.clone(),
            GeocodeProvider::OpenMeteo,
            format!("{}/v1/search", server.uri()),
        ),
        SolarClient::new(client.clone(), format!("{}/json", server.uri())),
        Some(Geolocator::new(client, format!("{}/ipapi/json/", server.uri()))),
    )
}

pub fn settings_for(server: &MockServer) -> Settings {
    Settings {
        geocode_url: Some(format!("{}/v1/search", server.uri())),
        solar_url: format!("{}/json", server.uri()),
        geolocation_url: format!("{}/ipapi/json/", server.uri()),
        request_timeout_secs: 5,
        geolocation_timeout_secs: 5,
        ..Settings::default()
    }
}

/// State whose pipeline points at a closed port.
pub fn offline_state() -> AppState {
    let settings = Settings {
        geocode_url: Some("http://127.0.0.1:9/v1/search".to_string()),
        solar_url: "http://127.0.0.1:9/json".to_string(),
        geolocation_url: "http://127.0.0.1:9/json/".to_string(),
        request_timeout_secs: 1,
        geolocation_timeout_secs: 1,
        ..Settings::default()
    };
    let pipeline = ResolutionPipeline::from_settings(&settings).expect("offline pipeline");
    AppState::with_pipeline(pipeline, 60, None)
}

pub fn paris_report(label: &str, timezone: &str) -> SolarReport {
    let events = SolarEvents {
        sunrise: Utc.with_ymd_and_hms(2024, 6, 21, 3, 47, 0).unwrap(),
        sunset: Utc.with_ymd_and_hms(2024, 6, 21, 19, 58, 0).unwrap(),
        civil_twilight_begin: Utc.with_ymd_and_hms(2024, 6, 21, 3, 5, 0).unwrap(),
        civil_twilight_end: Utc.with_ymd_and_hms(2024, 6, 21, 20, 40, 0).unwrap(),
        solar_noon: Utc.with_ymd_and_hms(2024, 6, 21, 11, 52, 30).unwrap(),
        day_length_seconds: 58_200,
        timezone: timezone.to_string(),
    };
    SolarReport {
        label: label.to_string(),
        coordinate: Coordinate::new(PARIS_LAT, PARIS_LON).unwrap(),
        sections: format_sections(&events).expect("fixture zone"),
        events,
    }
}

/// Stage callback that records every stage it sees.
pub fn stage_recorder() -> (
    std::sync::Arc<std::sync::Mutex<Vec<PipelineStage>>>,
    impl FnMut(PipelineStage) + Send,
) {
    let seen = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
    let sink = seen.clone();
    (seen, move |stage| sink.lock().unwrap().push(stage))
}
