use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Nominal trigger spacing proposed by the caller must be a finite
    /// and strictly positive distance, in meters.
    #[error("invalid trigger spacing threshold: {0}m")]
    InvalidThreshold(f64),

    /// Threshold could not be interpreted as a distance.
    #[error("failed to parse threshold \"{0}\"")]
    ThresholdParsing(String),

    /// The too-close filter factor scales the baseline minimum spacing
    /// and must be finite and positive.
    #[error("invalid minimum spacing factor: {0}")]
    InvalidMinSpacingFactor(f64),

    /// Leading baseline window needs at least one interval.
    #[error("baseline window requires at least one interval")]
    InvalidBaselineWindow,

    #[error("unknown baseline window")]
    UnknownBaselineWindow,

    /// Coalescing distance and minimal record separation must be positive.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    /// Tabular export failure
    #[error("csv export error: {0}")]
    Csv(String),
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Self::Csv(e.to_string())
    }
}
