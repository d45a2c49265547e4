#![allow(clippy::missing_errors_doc)]

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::{
    data::geocode::GeocodeProvider,
    domain::solar::{Coordinate, LocationQuery},
    pipeline::RunRequest,
};

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum GeocoderArg {
    #[default]
    OpenMeteo,
    #[serde(alias = "geocode.xyz", alias = "xyz")]
    GeocodeXyz,
}

impl From<GeocoderArg> for GeocodeProvider {
    fn from(arg: GeocoderArg) -> Self {
        match arg {
            GeocoderArg::OpenMeteo => Self::OpenMeteo,
            GeocoderArg::GeocodeXyz => Self::GeocodeXyz,
        }
    }
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Parser, Clone, Default)]
#[command(
    name = "sunset-dashboard",
    version,
    about = "Sunrise, sunset and twilight times in your terminal"
)]
pub struct Cli {
    /// Place to look up (city, address, landmark)
    pub location: Option<String>,

    /// Direct latitude (requires --lon)
    #[arg(long, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Direct longitude (requires --lat)
    #[arg(long, allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Start from the current position (IP geolocation)
    #[arg(long, conflicts_with_all = ["location", "lat", "lon"])]
    pub here: bool,

    /// Geocoding provider
    #[arg(long, value_enum)]
    pub geocoder: Option<GeocoderArg>,

    /// Geocoding endpoint override
    #[arg(long)]
    pub geocode_url: Option<String>,

    /// Sunrise/sunset endpoint override
    #[arg(long)]
    pub solar_url: Option<String>,

    /// Geolocation endpoint override
    #[arg(long)]
    pub geolocation_url: Option<String>,

    /// HTTP timeout for geocoding and solar requests, in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=120))]
    pub timeout: Option<u64>,

    /// Refresh interval in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(10..))]
    pub refresh_interval: Option<u64>,

    /// Configuration file (default: ~/.config/sunset-dashboard/config.json)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Print today's solar times to stdout and exit (non-interactive)
    #[arg(long)]
    pub one_shot: bool,

    /// With --one-shot, print the report as JSON
    #[arg(long, requires = "one_shot")]
    pub json: bool,
}

impl Cli {
    pub fn validate(&self) -> anyhow::Result<()> {
        match (self.lat, self.lon) {
            (Some(_), None) | (None, Some(_)) => {
                anyhow::bail!("--lat and --lon must be provided together")
            }
            (Some(lat), Some(lon)) => {
                Coordinate::new(lat, lon)?;
                Ok(())
            }
            (None, None) => Ok(()),
        }
    }

    /// The run implied by the command line, if any.
    #[must_use]
    pub fn initial_request(&self) -> Option<RunRequest> {
        if self.here {
            return Some(RunRequest::CurrentPosition);
        }
        if let (Some(lat), Some(lon)) = (self.lat, self.lon)
            && let Ok(coordinate) = Coordinate::new(lat, lon)
        {
            return Some(RunRequest::Query(LocationQuery::Coordinates(coordinate)));
        }
        self.location
            .clone()
            .map(|text| RunRequest::Query(LocationQuery::SearchText(text)))
    }
}
