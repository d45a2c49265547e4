use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("geolocation is not available in this configuration")]
    Unsupported,
    #[error("permission denied by the geolocation service")]
    Denied,
    #[error("position unavailable")]
    Unavailable,
    #[error("geolocation timed out")]
    TimedOut,
    #[error("unknown geolocation failure")]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodeError {
    #[error("empty query")]
    EmptyQuery,
    #[error("no coordinates found for \"{0}\"")]
    NotFound(String),
    #[error("{0}")]
    Transport(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolarDataError {
    #[error("{0}")]
    Transport(String),
    #[error("{0}")]
    InvalidData(String),
}

/// Which half of a run produced a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    Location,
    SolarData,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("Error getting current location: {0}")]
    Geolocation(GeolocationError),
    #[error("Error searching for location: {0}")]
    GeocodingFailed(String),
    #[error("Error searching for location: no coordinates found for \"{0}\"")]
    LocationNotFound(String),
    #[error("Error fetching sunrise/sunset data: {0}")]
    SolarDataFailed(String),
    #[error("Error fetching sunrise/sunset data: invalid response ({0})")]
    InvalidSolarData(String),
}

impl PipelineError {
    #[must_use]
    pub fn stage(&self) -> FailureStage {
        match self {
            Self::Geolocation(_) | Self::GeocodingFailed(_) | Self::LocationNotFound(_) => {
                FailureStage::Location
            }
            Self::SolarDataFailed(_) | Self::InvalidSolarData(_) => FailureStage::SolarData,
        }
    }
}

impl From<GeolocationError> for PipelineError {
    fn from(err: GeolocationError) -> Self {
        Self::Geolocation(err)
    }
}

impl From<GeocodeError> for PipelineError {
    fn from(err: GeocodeError) -> Self {
        match err {
            GeocodeError::EmptyQuery => {
                Self::GeocodingFailed(GeocodeError::EmptyQuery.to_string())
            }
            GeocodeError::NotFound(query) => Self::LocationNotFound(query),
            GeocodeError::Transport(reason) => Self::GeocodingFailed(reason),
        }
    }
}

impl From<SolarDataError> for PipelineError {
    fn from(err: SolarDataError) -> Self {
        match err {
            SolarDataError::Transport(reason) => Self::SolarDataFailed(reason),
            SolarDataError::InvalidData(reason) => Self::InvalidSolarData(reason),
        }
    }
}
