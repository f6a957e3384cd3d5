use thiserror::Error;

/// Top-level error type for the Shipwright generator.
#[derive(Debug, Error)]
pub enum ShipwrightError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Topology(#[from] TopologyError),
}

/// Errors in a generator configuration. These abort a run before any
/// mesh work begins.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("range {parameter} is inverted: min {min} > max {max}")]
    InvalidRange {
        parameter: &'static str,
        min: usize,
        max: usize,
    },

    #[error("probability {parameter} = {value} is outside [0, 1]")]
    ProbabilityOutOfRange { parameter: &'static str, value: f64 },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Errors related to mesh topology lookups.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("stale or unknown {0} handle")]
    StaleHandle(&'static str),
}

/// Convenience type alias for results using [`ShipwrightError`].
pub type Result<T> = std::result::Result<T, ShipwrightError>;
