use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{data::describe_transport, domain::solar::Coordinate, error::GeocodeError};

pub const OPEN_METEO_GEOCODE_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const GEOCODE_XYZ_URL: &str = "https://geocode.xyz";

/// geocode.xyz answers unmatched queries with this error code.
const XYZ_NO_RESULT: &str = "018";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeocodeProvider {
    OpenMeteo,
    GeocodeXyz,
}

impl GeocodeProvider {
    #[must_use]
    pub fn default_url(self) -> &'static str {
        match self {
            Self::OpenMeteo => OPEN_METEO_GEOCODE_URL,
            Self::GeocodeXyz => GEOCODE_XYZ_URL,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeocodeClient {
    client: Client,
    base_url: String,
    provider: GeocodeProvider,
    api_key: Option<String>,
}

impl GeocodeClient {
    pub fn new(client: Client, provider: GeocodeProvider, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            provider,
            api_key: None,
        }
    }

    #[must_use]
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|key| !key.trim().is_empty());
        self
    }

    pub async fn resolve(&self, search_text: &str) -> Result<Coordinate, GeocodeError> {
        let query = search_text.trim();
        if query.is_empty() {
            return Err(GeocodeError::EmptyQuery);
        }

        debug!(query, provider = ?self.provider, "geocoding request");
        match self.provider {
            GeocodeProvider::OpenMeteo => self.resolve_open_meteo(query).await,
            GeocodeProvider::GeocodeXyz => self.resolve_geocode_xyz(query).await,
        }
    }

    async fn resolve_open_meteo(&self, query: &str) -> Result<Coordinate, GeocodeError> {
        let mut request = self.client.get(&self.base_url).query(&[
            ("name", query),
            ("count", "5"),
            ("language", "en"),
            ("format", "json"),
        ]);
        if let Some(key) = self.api_key.as_deref() {
            request = request.query(&[("apikey", key)]);
        }

        let payload: OpenMeteoResponse = fetch_json(request).await?;
        let candidates = payload.results.unwrap_or_default();
        rank_candidates(candidates, query)
            .into_iter()
            .find_map(|candidate| Coordinate::new(candidate.latitude, candidate.longitude).ok())
            .ok_or_else(|| GeocodeError::NotFound(query.to_string()))
    }

    async fn resolve_geocode_xyz(&self, query: &str) -> Result<Coordinate, GeocodeError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|err| GeocodeError::Transport(format!("invalid geocoding url: {err}")))?;
        url.path_segments_mut()
            .map_err(|()| GeocodeError::Transport("invalid geocoding url".to_string()))?
            .pop_if_empty()
            .push(query);

        let mut request = self.client.get(url).query(&[("json", "1")]);
        if let Some(key) = self.api_key.as_deref() {
            request = request.query(&[("auth", key)]);
        }

        let payload: XyzResponse = fetch_json(request).await?;
        xyz_coordinate(payload, query)
    }
}

async fn fetch_json<T: serde::de::DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<T, GeocodeError> {
    let response = request
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|err| {
            warn!(error = %err, "geocoding request failed");
            GeocodeError::Transport(describe_transport("geocoding", &err))
        })?;
    response
        .json()
        .await
        .map_err(|err| GeocodeError::Transport(describe_transport("geocoding", &err)))
}

#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    results: Option<Vec<OpenMeteoResult>>,
}

#[derive(Debug, Deserialize)]
struct OpenMeteoResult {
    name: String,
    latitude: f64,
    longitude: f64,
    population: Option<u64>,
}

#[derive(Debug)]
struct ScoredCandidate {
    latitude: f64,
    longitude: f64,
    exact_name_match: bool,
    population: u64,
    api_order: usize,
}

fn rank_candidates(results: Vec<OpenMeteoResult>, query: &str) -> Vec<ScoredCandidate> {
    let normalized_query = normalize(query);

    let mut scored: Vec<ScoredCandidate> = results
        .into_iter()
        .enumerate()
        .map(|(idx, entry)| ScoredCandidate {
            latitude: entry.latitude,
            longitude: entry.longitude,
            exact_name_match: normalize(&entry.name) == normalized_query,
            population: entry.population.unwrap_or_default(),
            api_order: idx,
        })
        .collect();

    scored.sort_by(|a, b| {
        b.exact_name_match
            .cmp(&a.exact_name_match)
            .then_with(|| b.population.cmp(&a.population))
            .then_with(|| a.api_order.cmp(&b.api_order))
    });

    scored
}

fn normalize(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .replace(['-', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Deserialize)]
struct XyzResponse {
    latt: Option<XyzNumber>,
    longt: Option<XyzNumber>,
    error: Option<XyzError>,
}

/// geocode.xyz reports coordinates as strings, some mirrors as numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum XyzNumber {
    Number(f64),
    Text(String),
}

impl XyzNumber {
    fn value(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct XyzError {
    code: Option<String>,
    description: Option<String>,
}

fn xyz_coordinate(payload: XyzResponse, query: &str) -> Result<Coordinate, GeocodeError> {
    if let Some(error) = payload.error
        && error.code.as_deref() != Some(XYZ_NO_RESULT)
    {
        let reason = error
            .description
            .unwrap_or_else(|| "geocoding service reported an error".to_string());
        return Err(GeocodeError::Transport(reason));
    }

    let latitude = payload.latt.as_ref().and_then(XyzNumber::value);
    let longitude = payload.longt.as_ref().and_then(XyzNumber::value);
    match (latitude, longitude) {
        (Some(lat), Some(lon)) => {
            Coordinate::new(lat, lon).map_err(|_| GeocodeError::NotFound(query.to_string()))
        }
        _ => Err(GeocodeError::NotFound(query.to_string())),
    }
}
