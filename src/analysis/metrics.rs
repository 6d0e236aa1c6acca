//! Yearly descriptive statistics over a historical [`TimeTable`].

use crate::analysis::error::AnalysisError;
use crate::types::time_table::{TimeTable, TIME_COLUMN};
use chrono::{Datelike, Timelike};
use chrono_tz::Tz;
use polars::prelude::*;
use serde::Serialize;
use std::fmt;

const COL_AIR_TEMPERATURE: &str = "airTemperature";
const COL_RELATIVE_HUMIDITY: &str = "relativeHumidity";
const COL_CONDITION_CODE: &str = "conditionCode";

// Derived local-calendar columns
const COL_LOCAL_HOUR: &str = "_local_hour";
const COL_LOCAL_WEEKDAY: &str = "_local_weekday";
const COL_ISO_YEAR: &str = "_iso_year";
const COL_ISO_WEEK: &str = "_iso_week";
const COL_IS_RAINY: &str = "_is_rainy";

/// First local hour of the day window, inclusive.
pub const DAY_START_HOUR: u32 = 8;
/// End of the day window, exclusive: 20:00 already belongs to the night.
pub const DAY_END_HOUR: u32 = 20;

/// Whether a local clock hour falls in the day window `[08:00, 20:00)`.
pub fn is_daytime_hour(hour: u32) -> bool {
    (DAY_START_HOUR..DAY_END_HOUR).contains(&hour)
}

/// Summary statistics of one year of observations.
///
/// Means are `None` when no row contributed a value, e.g. `avg_day_temp` for a
/// table holding only night hours.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyMetrics {
    pub avg_temp: Option<f64>,
    pub avg_humidity: Option<f64>,
    pub avg_day_temp: Option<f64>,
    pub avg_night_temp: Option<f64>,
    /// Distinct ISO weeks with at least one rainy Saturday or Sunday hour.
    pub rainy_weekend_count: usize,
}

struct TwoDecimals(Option<f64>);

impl fmt::Display for TwoDecimals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{:.2}", value),
            None => f.write_str("n/a"),
        }
    }
}

impl fmt::Display for YearlyMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Average yearly temperature: {} °C", TwoDecimals(self.avg_temp))?;
        writeln!(f, "Average yearly humidity: {} %", TwoDecimals(self.avg_humidity))?;
        writeln!(f, "Average day temperature: {} °C", TwoDecimals(self.avg_day_temp))?;
        writeln!(f, "Average night temperature: {} °C", TwoDecimals(self.avg_night_temp))?;
        write!(f, "Weekends with rain: {}", self.rainy_weekend_count)
    }
}

/// Computes [`YearlyMetrics`] with the day/night split and weekends taken in
/// Europe/Vilnius local time.
///
/// # Errors
///
/// * [`AnalysisError::InsufficientData`] for `None` (no day had observations) or an empty table.
/// * [`AnalysisError::MissingColumn`] when `airTemperature` or `relativeHumidity` is absent.
pub fn compute_yearly_metrics(table: Option<&TimeTable>) -> Result<YearlyMetrics, AnalysisError> {
    compute_yearly_metrics_in(table, crate::CIVIL_TIMEZONE)
}

/// [`compute_yearly_metrics`] for an arbitrary civil timezone.
pub fn compute_yearly_metrics_in(
    table: Option<&TimeTable>,
    timezone: Tz,
) -> Result<YearlyMetrics, AnalysisError> {
    let table = table
        .filter(|table| !table.is_empty())
        .ok_or(AnalysisError::InsufficientData("yearly metrics"))?;
    for required in [COL_AIR_TEMPERATURE, COL_RELATIVE_HUMIDITY] {
        if !table.has_column(required) {
            return Err(AnalysisError::MissingColumn(required.to_string()));
        }
    }

    let calendar = local_calendar_columns(table, timezone)?;
    let frame = table.frame().hstack(&calendar)?.lazy();

    let temperature = col(COL_AIR_TEMPERATURE).cast(DataType::Float64);
    let is_day = col(COL_LOCAL_HOUR)
        .gt_eq(lit(DAY_START_HOUR as i32))
        .and(col(COL_LOCAL_HOUR).lt(lit(DAY_END_HOUR as i32)));

    let means = frame
        .clone()
        .select([
            temperature.clone().mean().alias("avg_temp"),
            col(COL_RELATIVE_HUMIDITY)
                .cast(DataType::Float64)
                .mean()
                .alias("avg_humidity"),
            temperature
                .clone()
                .filter(is_day.clone())
                .mean()
                .alias("avg_day_temp"),
            temperature
                .filter(is_day.not())
                .mean()
                .alias("avg_night_temp"),
        ])
        .collect()?;

    let rainy_weeks = frame
        .filter(
            col(COL_LOCAL_WEEKDAY)
                .gt_eq(lit(6))
                .and(col(COL_IS_RAINY)),
        )
        .group_by([col(COL_ISO_YEAR), col(COL_ISO_WEEK)])
        .agg([col(TIME_COLUMN).count().alias("rainy_hours")])
        .collect()?;

    Ok(YearlyMetrics {
        avg_temp: scalar(&means, "avg_temp")?,
        avg_humidity: scalar(&means, "avg_humidity")?,
        avg_day_temp: scalar(&means, "avg_day_temp")?,
        avg_night_temp: scalar(&means, "avg_night_temp")?,
        rainy_weekend_count: rainy_weeks.height(),
    })
}

/// Local hour, ISO weekday (Mon = 1) and ISO week of each row, plus the rain flag.
fn local_calendar_columns(table: &TimeTable, timezone: Tz) -> PolarsResult<Vec<Column>> {
    let local: Vec<_> = table
        .instants()?
        .into_iter()
        .map(|instant| instant.with_timezone(&timezone))
        .collect();

    let hours: Vec<i32> = local.iter().map(|t| t.hour() as i32).collect();
    let weekdays: Vec<i32> = local
        .iter()
        .map(|t| t.weekday().number_from_monday() as i32)
        .collect();
    let iso_years: Vec<i32> = local.iter().map(|t| t.iso_week().year()).collect();
    let iso_weeks: Vec<i32> = local.iter().map(|t| t.iso_week().week() as i32).collect();

    // case-sensitive substring match, nulls never match
    let rainy: Vec<bool> = if table.has_column(COL_CONDITION_CODE) {
        table
            .string_values(COL_CONDITION_CODE)?
            .iter()
            .map(|code| code.as_deref().is_some_and(|code| code.contains("rain")))
            .collect()
    } else {
        vec![false; local.len()]
    };

    Ok(vec![
        Column::new(COL_LOCAL_HOUR.into(), hours),
        Column::new(COL_LOCAL_WEEKDAY.into(), weekdays),
        Column::new(COL_ISO_YEAR.into(), iso_years),
        Column::new(COL_ISO_WEEK.into(), iso_weeks),
        Column::new(COL_IS_RAINY.into(), rainy),
    ])
}

fn scalar(frame: &DataFrame, name: &str) -> PolarsResult<Option<f64>> {
    Ok(frame.column(name)?.f64()?.get(0))
}
