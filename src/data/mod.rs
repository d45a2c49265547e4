pub mod geocode;
pub mod geolocate;
pub mod solar;

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;

pub(crate) fn http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("sunset-dashboard/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("building HTTP client failed")
}

/// Renders a transport-level failure for display, naming the request that failed.
pub(crate) fn describe_transport(what: &str, err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("{what} request timed out")
    } else if let Some(status) = err.status() {
        format!("{what} request returned status {status}")
    } else if err.is_decode() {
        format!("failed to decode {what} response")
    } else {
        format!("{what} request failed: {err}")
    }
}
