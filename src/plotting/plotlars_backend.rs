//! [`PlotBackend`] drawing with `plotlars`, shown in the browser.

use crate::plotting::comparison::{ComparisonChart, PlotBackend};
use crate::plotting::error::PlotError;
use chrono::{DateTime, Utc};
use log::warn;
use plotlars::{Axis, Legend, Plot, Rgb, Shape, Text, TimeSeriesPlot};
use polars::prelude::{Column, DataFrame};
use std::collections::BTreeSet;

const COL_X: &str = "time";

/// Renders a [`ComparisonChart`] as a plotly time-series plot.
#[derive(Debug, Clone, Default)]
pub struct PlotlarsBackend;

impl PlotlarsBackend {
    pub fn new() -> Self {
        Self
    }

    /// Lays the series out side by side on the union of their instants, leaving
    /// nulls where a series has no point.
    fn chart_frame(chart: &ComparisonChart) -> Result<DataFrame, PlotError> {
        let instants: BTreeSet<DateTime<Utc>> = chart
            .series
            .iter()
            .flat_map(|series| series.points().iter().map(|(time, _)| *time))
            .collect();

        let labels: Vec<String> = instants
            .iter()
            .map(|time| time.format("%Y-%m-%d %H:%M").to_string())
            .collect();
        let mut columns = vec![Column::new(COL_X.into(), labels)];
        for series in &chart.series {
            let values: Vec<Option<f64>> = instants
                .iter()
                .map(|time| series.value_at(*time))
                .collect();
            columns.push(Column::new(series.name().into(), values));
        }
        Ok(DataFrame::new(columns)?)
    }

    /// Chart options the plotlars builder has no switch for.
    fn ignored_options(chart: &ComparisonChart) -> Vec<&'static str> {
        let mut ignored = Vec::new();
        if !chart.show_legend {
            // plotlars always draws the legend
            ignored.push("show_legend = false");
        }
        ignored
    }
}

impl PlotBackend for PlotlarsBackend {
    fn draw(&self, chart: &ComparisonChart) -> Result<(), PlotError> {
        let (first, rest) = chart
            .series
            .split_first()
            .ok_or(PlotError::InsufficientData("an empty chart"))?;
        for option in Self::ignored_options(chart) {
            warn!("PlotlarsBackend ignores {} for '{}'", option, chart.title);
        }
        let data = Self::chart_frame(chart)?;
        let additional: Vec<&str> = rest.iter().map(|series| series.name()).collect();
        let shape = if chart.show_markers {
            Shape::Circle
        } else {
            Shape::Square
        };

        TimeSeriesPlot::builder()
            .data(&data)
            .x(COL_X)
            .y(first.name())
            .additional_series(additional)
            .size(6)
            .colors(vec![Rgb(69, 157, 230), Rgb(235, 117, 0)])
            .with_shape(chart.show_markers)
            .shapes(vec![shape; chart.series.len()])
            .plot_title(Text::from(chart.title.as_str()).font("Arial").size(18))
            .legend(&Legend::new().x(0.05).y(0.95))
            .x_title(chart.x_label.as_str())
            .y_title(Text::from(chart.y_label.as_str()).color(Rgb(0, 0, 0)))
            .x_axis(&Axis::new().show_grid(chart.show_grid))
            .y_axis(
                &Axis::new()
                    .value_color(Rgb(0, 0, 0))
                    .show_grid(chart.show_grid)
                    .zero_line_color(Rgb(0, 0, 0)),
            )
            .build()
            .plot();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::time_series::TimeSeries;
    use chrono::TimeZone;

    fn chart(show_legend: bool) -> ComparisonChart {
        let at = |hour| Utc.with_ymd_and_hms(2024, 6, 1, hour, 0, 0).unwrap();
        ComparisonChart {
            title: "t".to_string(),
            x_label: "x".to_string(),
            y_label: "y".to_string(),
            series: vec![
                TimeSeries::new("a", vec![(at(0), Some(1.0)), (at(1), Some(2.0))]),
                TimeSeries::new("b", vec![(at(1), Some(3.0))]),
            ],
            show_markers: true,
            show_grid: true,
            show_legend,
        }
    }

    #[test]
    fn test_hidden_legend_is_reported_as_ignored() {
        assert!(PlotlarsBackend::ignored_options(&chart(true)).is_empty());
        assert_eq!(
            PlotlarsBackend::ignored_options(&chart(false)),
            vec!["show_legend = false"]
        );
    }

    #[test]
    fn test_chart_frame_aligns_series_on_union_of_instants() {
        let frame = PlotlarsBackend::chart_frame(&chart(true)).unwrap();
        assert_eq!(frame.height(), 2);
        let b: Vec<Option<f64>> = frame.column("b").unwrap().f64().unwrap().into_iter().collect();
        assert_eq!(b, vec![None, Some(3.0)]);
    }
}
