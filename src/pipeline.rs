use std::time::Duration;

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    app::settings::Settings,
    data::{geocode::GeocodeClient, geolocate::Geolocator, http_client, solar::SolarClient},
    domain::{
        solar::{Coordinate, LocationQuery, RenderSection, SolarEvents},
        time_format::{clock_in, duration_breakdown, parse_zone},
    },
    error::{GeolocationError, PipelineError},
};

pub const SECTION_TITLES: [&str; 7] = [
    "Sunrise Today",
    "Sunset Today",
    "Dawn Today",
    "Dusk Today",
    "Day Length Today",
    "Solar Noon Today",
    "Time Zone",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Idle,
    ResolvingLocation,
    ResolvingSolarData,
    Formatting,
    Done,
    Errored,
}

impl PipelineStage {
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::ResolvingLocation => "Resolving location...",
            Self::ResolvingSolarData => "Fetching sunrise/sunset data...",
            Self::Formatting => "Formatting...",
            Self::Done => "Up to date",
            Self::Errored => "Failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RunRequest {
    Query(LocationQuery),
    CurrentPosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunId(u64);

impl RunId {
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Hands out run ids in start order; only the latest started run is current.
#[derive(Debug, Default)]
pub struct RunSequence {
    latest_started: u64,
}

impl RunSequence {
    pub fn begin(&mut self) -> RunId {
        self.latest_started += 1;
        RunId(self.latest_started)
    }

    #[must_use]
    pub fn is_current(&self, run: RunId) -> bool {
        run.0 == self.latest_started
    }

    #[must_use]
    pub fn latest(&self) -> Option<RunId> {
        (self.latest_started > 0).then_some(RunId(self.latest_started))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolarReport {
    pub label: String,
    pub coordinate: Coordinate,
    pub events: SolarEvents,
    pub sections: Vec<RenderSection>,
}

#[derive(Debug, Clone)]
pub struct ResolutionPipeline {
    geocoder: GeocodeClient,
    solar: SolarClient,
    geolocator: Option<Geolocator>,
}

impl ResolutionPipeline {
    pub fn new(
        geocoder: GeocodeClient,
        solar: SolarClient,
        geolocator: Option<Geolocator>,
    ) -> Self {
        Self {
            geocoder,
            solar,
            geolocator,
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let client = http_client(Duration::from_secs(settings.request_timeout_secs.max(1)))?;
        let geocoder = GeocodeClient::new(
            client.clone(),
            settings.geocoder.into(),
            settings.effective_geocode_url(),
        )
        .with_api_key(settings.geocode_api_key.clone());
        let solar = SolarClient::new(client, settings.solar_url.clone());

        let geolocator = if settings.geolocation_enabled {
            let client =
                http_client(Duration::from_secs(settings.geolocation_timeout_secs.max(1)))?;
            Some(Geolocator::new(client, settings.geolocation_url.clone()))
        } else {
            None
        };

        Ok(Self::new(geocoder, solar, geolocator))
    }

    pub async fn execute<F>(
        &self,
        request: RunRequest,
        on_stage: F,
    ) -> Result<SolarReport, PipelineError>
    where
        F: FnMut(PipelineStage) + Send,
    {
        match request {
            RunRequest::Query(query) => self.run(query, on_stage).await,
            RunRequest::CurrentPosition => self.run_current_position(on_stage).await,
        }
    }

    /// Resolves `query` into a report, reporting each stage entered to `on_stage`.
    pub async fn run<F>(
        &self,
        query: LocationQuery,
        mut on_stage: F,
    ) -> Result<SolarReport, PipelineError>
    where
        F: FnMut(PipelineStage) + Send,
    {
        let label = query.label();
        let outcome = match query {
            LocationQuery::Coordinates(coordinate) => {
                self.resolve_solar(coordinate, label, &mut on_stage).await
            }
            LocationQuery::SearchText(text) => {
                on_stage(PipelineStage::ResolvingLocation);
                match self.geocoder.resolve(&text).await {
                    Ok(coordinate) => {
                        debug!(query = %label, %coordinate, "geocoding resolved");
                        self.resolve_solar(coordinate, label, &mut on_stage).await
                    }
                    Err(err) => Err(err.into()),
                }
            }
        };
        finish(outcome, &mut on_stage)
    }

    pub async fn run_current_position<F>(
        &self,
        mut on_stage: F,
    ) -> Result<SolarReport, PipelineError>
    where
        F: FnMut(PipelineStage) + Send,
    {
        on_stage(PipelineStage::ResolvingLocation);
        let outcome = match self.locate().await {
            Ok(coordinate) => {
                let label = format!("Current location ({coordinate})");
                self.resolve_solar(coordinate, label, &mut on_stage).await
            }
            Err(err) => Err(err.into()),
        };
        finish(outcome, &mut on_stage)
    }

    async fn locate(&self) -> Result<Coordinate, GeolocationError> {
        let Some(geolocator) = self.geolocator.as_ref() else {
            return Err(GeolocationError::Unsupported);
        };
        geolocator.locate().await
    }

    async fn resolve_solar<F>(
        &self,
        coordinate: Coordinate,
        label: String,
        on_stage: &mut F,
    ) -> Result<SolarReport, PipelineError>
    where
        F: FnMut(PipelineStage) + Send,
    {
        on_stage(PipelineStage::ResolvingSolarData);
        let events = self.solar.resolve(coordinate, None).await?;
        on_stage(PipelineStage::Formatting);
        let sections = format_sections(&events)?;
        Ok(SolarReport {
            label,
            coordinate,
            events,
            sections,
        })
    }
}

fn finish<F>(
    outcome: Result<SolarReport, PipelineError>,
    on_stage: &mut F,
) -> Result<SolarReport, PipelineError>
where
    F: FnMut(PipelineStage),
{
    match &outcome {
        Ok(report) => {
            info!(label = %report.label, timezone = %report.events.timezone, "run complete");
            on_stage(PipelineStage::Done);
        }
        Err(err) => {
            warn!(error = %err, stage = ?err.stage(), "run failed");
            on_stage(PipelineStage::Errored);
        }
    }
    outcome
}

/// Builds the seven dashboard sections in display order, all in the service's zone.
pub fn format_sections(events: &SolarEvents) -> Result<Vec<RenderSection>, PipelineError> {
    let zone = parse_zone(&events.timezone)
        .map_err(|err| PipelineError::InvalidSolarData(err.to_string()))?;
    let contents = [
        clock_in(events.sunrise, zone),
        clock_in(events.sunset, zone),
        clock_in(events.civil_twilight_begin, zone),
        clock_in(events.civil_twilight_end, zone),
        duration_breakdown(events.day_length_seconds).to_string(),
        clock_in(events.solar_noon, zone),
        events.timezone.clone(),
    ];
    Ok(SECTION_TITLES
        .iter()
        .zip(contents)
        .map(|(title, content)| RenderSection::new(*title, content))
        .collect())
}
