use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("Not enough data to plot {0}")]
    InsufficientData(&'static str),

    #[error("Required column '{0}' not found in table")]
    MissingColumn(String),

    #[error("Plotting backend failed: {0}")]
    Backend(String),

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}
