use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Not enough data to compute {0}")]
    InsufficientData(&'static str),

    #[error("Required column '{0}' not found in table")]
    MissingColumn(String),

    #[error("Series '{series}' is not strictly increasing at index {position}")]
    UnorderedIndex { series: String, position: usize },

    #[error("Resampling step must be positive, got {0}")]
    InvalidStep(chrono::Duration),

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}
