//! Linear up-sampling of an hourly series onto a fixed 5-minute grid.

use crate::analysis::error::AnalysisError;
use crate::types::time_series::TimeSeries;
use chrono::{DateTime, Duration, Utc};

/// Spacing of the grid produced by [`interpolate_to_5min`].
pub const FIVE_MINUTES: Duration = Duration::minutes(5);

/// Re-indexes `series` at 5-minute steps, interpolating linearly in time.
///
/// The grid starts at the first sample rounded up to a 5-minute boundary and stops
/// at the last grid point not after the last sample, so nothing is extrapolated.
/// Grid points that coincide with a sample keep its value exactly. Samples with a
/// missing value are skipped and the gap is bridged by their neighbours.
///
/// # Errors
///
/// [`AnalysisError::UnorderedIndex`] if the index is not strictly increasing.
///
/// # Examples
///
/// ```
/// use meteo_lt::{interpolate_to_5min, TimeSeries};
/// use chrono::{TimeZone, Utc};
///
/// let t0 = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
/// let t1 = Utc.with_ymd_and_hms(2024, 6, 1, 13, 0, 0).unwrap();
/// let hourly = TimeSeries::new("airTemperature", vec![(t0, Some(10.0)), (t1, Some(16.0))]);
///
/// let fine = interpolate_to_5min(&hourly).unwrap();
/// assert_eq!(fine.len(), 13);
/// assert_eq!(fine.points()[6].1, Some(13.0)); // 12:30
/// ```
pub fn interpolate_to_5min(series: &TimeSeries) -> Result<TimeSeries, AnalysisError> {
    resample_linear(series, FIVE_MINUTES)
}

/// [`interpolate_to_5min`] with an arbitrary positive step.
///
/// # Errors
///
/// [`AnalysisError::InvalidStep`] for a step below one millisecond, and
/// [`AnalysisError::UnorderedIndex`] as for [`interpolate_to_5min`].
pub fn resample_linear(series: &TimeSeries, step: Duration) -> Result<TimeSeries, AnalysisError> {
    let step_ms = step.num_milliseconds();
    if step_ms <= 0 {
        return Err(AnalysisError::InvalidStep(step));
    }
    if let Some(position) = series
        .points()
        .windows(2)
        .position(|pair| pair[0].0 >= pair[1].0)
    {
        return Err(AnalysisError::UnorderedIndex {
            series: series.name().to_string(),
            position: position + 1,
        });
    }

    let samples: Vec<(DateTime<Utc>, f64)> = series
        .points()
        .iter()
        .filter_map(|(time, value)| value.map(|value| (*time, value)))
        .collect();
    let (Some(first), Some(last)) = (samples.first(), samples.last()) else {
        return Ok(TimeSeries::new(series.name(), Vec::new()));
    };

    let first_ms = first.0.timestamp_millis();
    let start_ms = first_ms + (step_ms - first_ms.rem_euclid(step_ms)) % step_ms;
    let end_ms = last.0.timestamp_millis();

    let mut points = Vec::new();
    let mut upper = 0;
    let mut grid_ms = start_ms;
    while grid_ms <= end_ms {
        while samples[upper].0.timestamp_millis() < grid_ms {
            upper += 1;
        }
        let (t1, v1) = samples[upper];
        let t1_ms = t1.timestamp_millis();
        let value = if t1_ms == grid_ms {
            v1
        } else {
            // grid_ms > first sample here, so upper >= 1
            let (t0, v0) = samples[upper - 1];
            let t0_ms = t0.timestamp_millis();
            let fraction = (grid_ms - t0_ms) as f64 / (t1_ms - t0_ms) as f64;
            v0 + (v1 - v0) * fraction
        };
        if let Some(time) = DateTime::from_timestamp_millis(grid_ms) {
            points.push((time, Some(value)));
        }
        grid_ms += step_ms;
    }

    Ok(TimeSeries::new(series.name(), points))
}
