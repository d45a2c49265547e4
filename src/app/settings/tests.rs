use std::io::Write;

use clap::Parser;
use tempfile::NamedTempFile;

use super::{Settings, load_settings, read_settings_file};
use crate::cli::{Cli, GeocoderArg};

fn write_config(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp config file");
    file.write_all(json.as_bytes()).expect("write config");
    file
}

#[test]
fn defaults_match_documented_timings() {
    let settings = Settings::default();
    assert_eq!(settings.request_timeout_secs, 10);
    assert_eq!(settings.geolocation_timeout_secs, 5);
    assert_eq!(settings.refresh_interval_secs, 60);
    assert!(settings.geolocation_enabled);
    assert_eq!(
        settings.effective_geocode_url(),
        "https://geocoding-api.open-meteo.com/v1/search"
    );
}

#[test]
fn partial_file_keeps_remaining_defaults() {
    let file = write_config(r#"{"geocoder": "geocode-xyz", "refresh_interval_secs": 120}"#);
    let settings = read_settings_file(file.path()).expect("read config");

    assert_eq!(settings.geocoder, GeocoderArg::GeocodeXyz);
    assert_eq!(settings.refresh_interval_secs, 120);
    assert_eq!(settings.request_timeout_secs, 10);
    assert_eq!(settings.effective_geocode_url(), "https://geocode.xyz");
}

#[test]
fn explicit_config_path_must_parse() {
    let file = write_config("{ not json");
    let path = file.path().to_string_lossy().to_string();
    let cli = Cli::parse_from(["sunset-dashboard", "--config", path.as_str()]);

    let err = load_settings(&cli).expect_err("malformed config should fail");
    assert!(format!("{err:#}").contains("parsing config file"));
}

#[test]
fn cli_flags_override_file_values() {
    let file = write_config(
        r#"{"solar_url": "http://file.invalid/json", "request_timeout_secs": 30}"#,
    );
    let path = file.path().to_string_lossy().to_string();
    let cli = Cli::parse_from([
        "sunset-dashboard",
        "--config",
        path.as_str(),
        "--solar-url",
        "http://cli.invalid/json",
        "--timeout",
        "4",
        "--refresh-interval",
        "90",
    ]);

    let settings = load_settings(&cli).expect("load config");
    assert_eq!(settings.solar_url, "http://cli.invalid/json");
    assert_eq!(settings.request_timeout_secs, 4);
    assert_eq!(settings.refresh_interval_secs, 90);
}

#[test]
fn switching_provider_drops_file_url_for_the_old_one() {
    let mut settings = Settings {
        geocode_url: Some("https://geocoding-api.open-meteo.com/v1/search".to_string()),
        ..Settings::default()
    };
    let cli = Cli::parse_from(["sunset-dashboard", "--geocoder", "geocode-xyz"]);
    settings.apply_cli(&cli);

    assert_eq!(settings.geocoder, GeocoderArg::GeocodeXyz);
    assert_eq!(settings.effective_geocode_url(), "https://geocode.xyz");
}

#[test]
fn api_key_override_ignores_blank_values() {
    let mut settings = Settings {
        geocode_api_key: Some("from-file".to_string()),
        ..Settings::default()
    };
    settings.apply_api_key_override(Some("   ".to_string()));
    assert_eq!(settings.geocode_api_key.as_deref(), Some("from-file"));

    settings.apply_api_key_override(Some("from-env".to_string()));
    assert_eq!(settings.geocode_api_key.as_deref(), Some("from-env"));

    settings.apply_api_key_override(None);
    assert_eq!(settings.geocode_api_key.as_deref(), Some("from-env"));
}
