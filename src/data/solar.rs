use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    data::describe_transport,
    domain::solar::{Coordinate, SolarEvents},
    error::SolarDataError,
};

pub const SUNRISE_SUNSET_URL: &str = "https://api.sunrise-sunset.org/json";

#[derive(Debug, Clone)]
pub struct SolarClient {
    client: Client,
    base_url: String,
}

impl SolarClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Fetches one day of solar events; `date` defaults to the service's "today".
    pub async fn resolve(
        &self,
        coordinate: Coordinate,
        date: Option<NaiveDate>,
    ) -> Result<SolarEvents, SolarDataError> {
        let mut params = vec![
            ("lat", coordinate.latitude().to_string()),
            ("lng", coordinate.longitude().to_string()),
            ("formatted", "0".to_string()),
        ];
        if let Some(date) = date {
            params.push(("date", date.format("%Y-%m-%d").to_string()));
        }

        debug!(%coordinate, ?date, "solar data request");
        let response = self
            .client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|err| {
                warn!(error = %err, "solar data request failed");
                SolarDataError::Transport(describe_transport("sunrise/sunset", &err))
            })?;

        let payload: SolarResponse = response.json().await.map_err(|err| {
            SolarDataError::Transport(describe_transport("sunrise/sunset", &err))
        })?;
        validate(payload)
    }
}

#[derive(Debug, Deserialize)]
struct SolarResponse {
    results: Option<serde_json::Value>,
    status: Option<String>,
    tzid: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawResults {
    sunrise: Option<String>,
    sunset: Option<String>,
    civil_twilight_begin: Option<String>,
    civil_twilight_end: Option<String>,
    solar_noon: Option<String>,
    day_length: Option<i64>,
    timezone: Option<String>,
}

/// Checks the payload and builds [`SolarEvents`].
///
/// The zone is whatever the service reports: `results.timezone` if present, else
/// the top-level `tzid`. The public api.sunrise-sunset.org omits `results.timezone`
/// and answers `tzid: "UTC"` unless a zone is requested, so against it every place
/// renders in UTC.
fn validate(payload: SolarResponse) -> Result<SolarEvents, SolarDataError> {
    if let Some(status) = payload.status.as_deref()
        && status != "OK"
    {
        return Err(SolarDataError::Transport(format!(
            "sunrise/sunset service answered {status}"
        )));
    }

    let raw = payload.results.ok_or_else(|| missing("results"))?;
    let results: RawResults = serde_json::from_value(raw)
        .map_err(|err| SolarDataError::InvalidData(format!("malformed results: {err}")))?;

    let day_length = results.day_length.ok_or_else(|| missing("day_length"))?;
    let day_length_seconds = u64::try_from(day_length).map_err(|_| {
        SolarDataError::InvalidData(format!("negative day_length {day_length}"))
    })?;

    let timezone = results
        .timezone
        .or(payload.tzid)
        .filter(|zone| !zone.trim().is_empty())
        .ok_or_else(|| missing("timezone"))?;

    Ok(SolarEvents {
        sunrise: instant("sunrise", results.sunrise.as_deref())?,
        sunset: instant("sunset", results.sunset.as_deref())?,
        civil_twilight_begin: instant(
            "civil_twilight_begin",
            results.civil_twilight_begin.as_deref(),
        )?,
        civil_twilight_end: instant("civil_twilight_end", results.civil_twilight_end.as_deref())?,
        solar_noon: instant("solar_noon", results.solar_noon.as_deref())?,
        day_length_seconds,
        timezone,
    })
}

fn instant(field: &str, value: Option<&str>) -> Result<DateTime<Utc>, SolarDataError> {
    let value = value.ok_or_else(|| missing(field))?;
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| SolarDataError::InvalidData(format!("unparseable {field} '{value}'")))
}

fn missing(field: &str) -> SolarDataError {
    SolarDataError::InvalidData(format!("missing {field}"))
}
