use chrono::{TimeZone, Utc};

use crate::{
    app::{settings::Settings, state::AppState},
    domain::solar::{Coordinate, SolarEvents},
    pipeline::{ResolutionPipeline, SolarReport, format_sections},
};

/// Endpoints nothing listens on; runs started against them fail fast.
pub(crate) fn offline_settings() -> Settings {
    Settings {
        geocode_url: Some("http://127.0.0.1:9/v1/search".to_string()),
        solar_url: "http://127.0.0.1:9/json".to_string(),
        geolocation_url: "http://127.0.0.1:9/json/".to_string(),
        request_timeout_secs: 1,
        geolocation_timeout_secs: 1,
        ..Settings::default()
    }
}

pub(crate) fn offline_state() -> AppState {
    let pipeline =
        ResolutionPipeline::from_settings(&offline_settings()).expect("offline pipeline");
    AppState::with_pipeline(pipeline, 60, None)
}

pub(crate) fn sample_report(label: &str, timezone: &str) -> SolarReport {
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
        coordinate: Coordinate::new(48.8566, 2.3522).unwrap(),
        sections: format_sections(&events).expect("valid fixture zone"),
        events,
    }
}
