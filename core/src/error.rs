use thiserror::Error;

#[derive(Error, Debug)]
pub enum VizError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Degenerate {axis} scale: domain [{lo}, {hi}] has zero span")]
    DegenerateDomain { axis: &'static str, lo: f64, hi: f64 },

    #[error("Degenerate {axis} scale: range [{lo}, {hi}] has zero span")]
    DegenerateRange { axis: &'static str, lo: f64, hi: f64 },

    #[error("Guide line range is degenerate: both ends at {0}")]
    DegenerateGuideRange(f64),

    #[error("Unknown output type: {0}")]
    UnknownOutputType(String),

    #[error("Unknown mitigation arm: {0}")]
    UnknownMitigation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type VizResult<T> = Result<T, VizError>;
