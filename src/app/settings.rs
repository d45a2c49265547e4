use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    cli::{Cli, GeocoderArg},
    data::{
        geocode::GeocodeProvider, geolocate::IPAPI_URL, solar::SUNRISE_SUNSET_URL,
    },
};

pub const API_KEY_ENV: &str = "SUNSET_DASHBOARD_GEOCODE_API_KEY";
pub const CONFIG_DIR_ENV: &str = "SUNSET_DASHBOARD_CONFIG_DIR";

/// Service endpoints, credentials and timings. Read at startup, never written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub geocoder: GeocoderArg,
    pub geocode_url: Option<String>,
    pub geocode_api_key: Option<String>,
    pub solar_url: String,
    pub geolocation_url: String,
    pub geolocation_enabled: bool,
    pub request_timeout_secs: u64,
    pub geolocation_timeout_secs: u64,
    pub refresh_interval_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            geocoder: GeocoderArg::OpenMeteo,
            geocode_url: None,
            geocode_api_key: None,
            solar_url: SUNRISE_SUNSET_URL.to_string(),
            geolocation_url: IPAPI_URL.to_string(),
            geolocation_enabled: true,
            request_timeout_secs: 10,
            geolocation_timeout_secs: 5,
            refresh_interval_secs: 60,
        }
    }
}

impl Settings {
    #[must_use]
    pub fn effective_geocode_url(&self) -> String {
        self.geocode_url
            .clone()
            .unwrap_or_else(|| GeocodeProvider::from(self.geocoder).default_url().to_string())
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(geocoder) = cli.geocoder {
            if geocoder != self.geocoder {
                self.geocode_url = None;
            }
            self.geocoder = geocoder;
        }
        if let Some(url) = cli.geocode_url.as_ref() {
            self.geocode_url = Some(url.clone());
        }
        if let Some(url) = cli.solar_url.as_ref() {
            self.solar_url.clone_from(url);
        }
        if let Some(url) = cli.geolocation_url.as_ref() {
            self.geolocation_url.clone_from(url);
        }
        if let Some(timeout) = cli.timeout {
            self.request_timeout_secs = timeout;
        }
        if let Some(interval) = cli.refresh_interval {
            self.refresh_interval_secs = interval;
        }
    }

    pub fn apply_api_key_override(&mut self, key: Option<String>) {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.geocode_api_key = Some(key);
        }
    }
}

/// Defaults, then the config file, then the API key variable, then CLI flags.
///
/// A missing or malformed default config file is tolerated; an explicit `--config`
/// path must load.
pub fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let mut settings = match cli.config.as_deref() {
        Some(path) => read_settings_file(path)?,
        None => default_config_path()
            .filter(|path| path.exists())
            .map(|path| {
                read_settings_file(&path).unwrap_or_else(|err| {
                    warn!(path = %path.display(), error = %err, "ignoring unreadable config");
                    Settings::default()
                })
            })
            .unwrap_or_default(),
    };
    settings.apply_api_key_override(std::env::var(API_KEY_ENV).ok());
    settings.apply_cli(cli);
    Ok(settings)
}

pub fn read_settings_file(path: &Path) -> anyhow::Result<Settings> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading config file {} failed", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("parsing config file {} failed", path.display()))
}

pub fn default_config_path() -> Option<PathBuf> {
    if let Some(base) = std::env::var_os(CONFIG_DIR_ENV) {
        return Some(PathBuf::from(base).join("config.json"));
    }

    let home = std::env::var_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("sunset-dashboard")
            .join("config.json"),
    )
}

#[cfg(test)]
mod tests;
