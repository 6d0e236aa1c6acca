//! Builds the "last week vs forecast" temperature chart.

use crate::plotting::error::PlotError;
use crate::types::time_series::TimeSeries;
use crate::types::time_table::TimeTable;
use chrono::Duration;
use log::info;

const COL_AIR_TEMPERATURE: &str = "airTemperature";

/// How far back from the newest observation the historical line reaches.
pub const HISTORY_WINDOW: Duration = Duration::days(7);

pub const HISTORICAL_LABEL: &str = "Historical (last week)";
pub const FORECAST_LABEL: &str = "Forecast";

/// Everything a backend needs to draw the comparison.
///
/// Each series is drawn as one line; its [`TimeSeries::name`] is the legend label.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<TimeSeries>,
    pub show_markers: bool,
    pub show_grid: bool,
    pub show_legend: bool,
}

/// The rendering collaborator. It may open a window, write a file or record the
/// chart for inspection.
pub trait PlotBackend {
    fn draw(&self, chart: &ComparisonChart) -> Result<(), PlotError>;
}

/// Selects the plotted data and describes the chart, without drawing it.
///
/// The historical line holds `airTemperature` rows no older than
/// [`HISTORY_WINDOW`] before the newest observation; the forecast line holds the
/// whole forecast.
///
/// # Errors
///
/// * [`PlotError::InsufficientData`] when `historical` has no rows.
/// * [`PlotError::MissingColumn`] when a non-empty table lacks `airTemperature`.
pub fn build_comparison(
    historical: &TimeTable,
    forecast: &TimeTable,
) -> Result<ComparisonChart, PlotError> {
    let newest = historical
        .last_time()?
        .ok_or(PlotError::InsufficientData("historical temperatures"))?;
    let last_week = temperature_series(&historical.since(newest - HISTORY_WINDOW)?, HISTORICAL_LABEL)?;
    let upcoming = temperature_series(forecast, FORECAST_LABEL)?;

    Ok(ComparisonChart {
        title: "Temperature Comparison: Last Week vs Forecast".to_string(),
        x_label: "Time".to_string(),
        y_label: "Temperature (°C)".to_string(),
        series: vec![last_week, upcoming],
        show_markers: true,
        show_grid: true,
        show_legend: true,
    })
}

/// Builds the comparison chart and hands it to `backend`.
pub fn render_comparison(
    backend: &dyn PlotBackend,
    historical: &TimeTable,
    forecast: &TimeTable,
) -> Result<(), PlotError> {
    let chart = build_comparison(historical, forecast)?;
    info!(
        "Rendering {} historical and {} forecast points",
        chart.series[0].len(),
        chart.series[1].len()
    );
    backend.draw(&chart)
}

fn temperature_series(table: &TimeTable, label: &str) -> Result<TimeSeries, PlotError> {
    if table.is_empty() {
        return Ok(TimeSeries::new(label, Vec::new()));
    }
    if !table.has_column(COL_AIR_TEMPERATURE) {
        return Err(PlotError::MissingColumn(COL_AIR_TEMPERATURE.to_string()));
    }
    let values = table.series(COL_AIR_TEMPERATURE)?;
    Ok(TimeSeries::new(label, values.points().to_vec()))
}
