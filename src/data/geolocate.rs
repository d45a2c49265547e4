use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{Instrument, info, info_span, warn};

use crate::{domain::solar::Coordinate, error::GeolocationError};

pub const IPAPI_URL: &str = "https://ipapi.co/json/";

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    latitude: Option<f64>,
    longitude: Option<f64>,
    city: Option<String>,
    #[serde(default)]
    error: bool,
    reason: Option<String>,
}

/// Approximates the device position from the public IP address.
#[derive(Debug, Clone)]
pub struct Geolocator {
    client: Client,
    url: String,
}

impl Geolocator {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub async fn locate(&self) -> Result<Coordinate, GeolocationError> {
        let span = info_span!("geolocation.lookup", url = %self.url);
        async move {
            let response = self
                .client
                .get(&self.url)
                .send()
                .await
                .map_err(|err| classify_transport(&err))?;

            let status = response.status();
            if !status.is_success() {
                warn!(%status, "geolocation service rejected the request");
                return Err(classify_status(status));
            }

            let payload: IpApiResponse = response
                .json()
                .await
                .map_err(|err| classify_transport(&err))?;
            let coordinate = coordinate_from(&payload)?;
            info!(
                lat = coordinate.latitude(),
                lon = coordinate.longitude(),
                city = payload.city.as_deref().unwrap_or("?"),
                "geolocation resolved"
            );
            Ok(coordinate)
        }
        .instrument(span)
        .await
    }
}

fn coordinate_from(payload: &IpApiResponse) -> Result<Coordinate, GeolocationError> {
    if payload.error {
        warn!(reason = payload.reason.as_deref().unwrap_or("none"), "geolocation refused");
        return Err(GeolocationError::Unavailable);
    }
    let (Some(lat), Some(lon)) = (payload.latitude, payload.longitude) else {
        return Err(GeolocationError::Unavailable);
    };
    Coordinate::new(lat, lon).map_err(|_| GeolocationError::Unavailable)
}

fn classify_status(status: StatusCode) -> GeolocationError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GeolocationError::Denied,
        StatusCode::TOO_MANY_REQUESTS | StatusCode::SERVICE_UNAVAILABLE => {
            GeolocationError::Unavailable
        }
        _ => GeolocationError::Unknown,
    }
}

fn classify_transport(err: &reqwest::Error) -> GeolocationError {
    warn!(error = %err, "geolocation request failed");
    if err.is_timeout() {
        GeolocationError::TimedOut
    } else if err.is_connect() {
        GeolocationError::Unavailable
    } else {
        GeolocationError::Unknown
    }
}
