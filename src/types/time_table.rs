//! Contains [`TimeTable`], the UTC time-indexed frame produced by both loaders.

use crate::types::time_series::TimeSeries;
use chrono::{DateTime, Utc};
use log::debug;
use polars::prelude::*;

/// Name of the index column every [`TimeTable`] carries in first position.
pub const TIME_COLUMN: &str = "time";

/// The polars dtype of [`TIME_COLUMN`]: millisecond precision, tagged UTC.
pub fn time_dtype() -> DataType {
    DataType::Datetime(TimeUnit::Milliseconds, Some("UTC".into()))
}

pub(crate) fn time_column(instants: &[DateTime<Utc>]) -> Column {
    let millis: Vec<i64> = instants.iter().map(DateTime::timestamp_millis).collect();
    Int64Chunked::from_vec(TIME_COLUMN.into(), millis)
        .into_datetime(TimeUnit::Milliseconds, Some("UTC".into()))
        .into_series()
        .into()
}

/// A wrapper around a polars `DataFrame` indexed by a UTC instant.
///
/// The first column is always [`TIME_COLUMN`] with dtype [`time_dtype`]. Rows are
/// strictly ascending by that column: the constructor sorts and drops repeated
/// instants (first occurrence wins), so a table built from a backward day-by-day
/// fetch still reads oldest to newest. The remaining columns are whatever fields
/// the source feed carried, e.g. `airTemperature` or `conditionCode`.
#[derive(Debug, Clone)]
pub struct TimeTable {
    frame: DataFrame,
}

impl TimeTable {
    /// Wraps `frame`, establishing the index invariants.
    ///
    /// # Errors
    ///
    /// Fails with a polars error when `frame` has no [`TIME_COLUMN`], when that
    /// column is not a UTC datetime, or when it contains nulls.
    pub fn from_frame(frame: DataFrame) -> PolarsResult<Self> {
        let index = frame.column(TIME_COLUMN)?;
        if index.dtype() != &time_dtype() {
            return Err(PolarsError::SchemaMismatch(
                format!(
                    "index column '{}' must be {:?}, found {:?}",
                    TIME_COLUMN,
                    time_dtype(),
                    index.dtype()
                )
                .into(),
            ));
        }
        if index.null_count() > 0 {
            return Err(PolarsError::ComputeError(
                format!("index column '{}' contains null instants", TIME_COLUMN).into(),
            ));
        }

        let mut order: Vec<PlSmallStr> = vec![TIME_COLUMN.into()];
        order.extend(
            frame
                .get_column_names()
                .into_iter()
                .filter(|name| name.as_str() != TIME_COLUMN)
                .cloned(),
        );
        let sorted = frame.select(order)?.sort(
            [TIME_COLUMN],
            SortMultipleOptions::default().with_maintain_order(true),
        )?;

        let millis = index_millis(&sorted)?;
        let keep: Vec<bool> = millis
            .iter()
            .enumerate()
            .map(|(i, ms)| i == 0 || millis[i - 1] != *ms)
            .collect();
        let duplicates = keep.iter().filter(|kept| !**kept).count();
        let frame = if duplicates > 0 {
            debug!("Dropping {} rows with a repeated instant", duplicates);
            sorted.filter(&BooleanChunked::from_slice("keep".into(), &keep))?
        } else {
            sorted
        };
        Ok(Self { frame })
    }

    /// A table with just the typed index column and no rows.
    pub fn empty() -> Self {
        // a single, correctly typed column always forms a valid frame
        let frame = DataFrame::new(vec![time_column(&[])]).unwrap_or_default();
        Self { frame }
    }

    /// Stacks `tables` vertically over the union of their columns.
    ///
    /// Columns keep their first-seen order. A table lacking a column contributes
    /// nulls for it; a column whose dtype differs between tables is widened to
    /// `Float64` when all variants are numeric and to `String` otherwise. The result
    /// is re-sorted and deduplicated like any other table.
    pub fn concat_diagonal(tables: Vec<TimeTable>) -> PolarsResult<Self> {
        let mut names: Vec<PlSmallStr> = Vec::new();
        for table in &tables {
            for name in table.frame.get_column_names() {
                if !names.contains(name) {
                    names.push(name.clone());
                }
            }
        }
        if names.is_empty() {
            return Ok(Self::empty());
        }

        let dtypes: Vec<DataType> = names
            .iter()
            .map(|name| {
                let seen: Vec<&DataType> = tables
                    .iter()
                    .filter_map(|table| table.frame.column(name).ok())
                    .map(Column::dtype)
                    .collect();
                resolve_dtype(name, &seen)
            })
            .collect();

        let mut stacked: Option<DataFrame> = None;
        for table in &tables {
            let height = table.frame.height();
            let columns = names
                .iter()
                .zip(&dtypes)
                .map(|(name, dtype)| match table.frame.column(name) {
                    Ok(column) if column.dtype() == dtype => Ok(column.clone()),
                    Ok(column) => column.cast(dtype),
                    Err(_) => Ok(Column::full_null(name.clone(), height, dtype)),
                })
                .collect::<PolarsResult<Vec<Column>>>()?;
            let aligned = DataFrame::new(columns)?;
            match stacked.as_mut() {
                Some(acc) => {
                    acc.vstack_mut(&aligned)?;
                }
                None => stacked = Some(aligned),
            }
        }

        match stacked {
            Some(frame) => Self::from_frame(frame),
            None => Ok(Self::empty()),
        }
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn into_frame(self) -> DataFrame {
        self.frame
    }

    pub fn len(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.frame.column(name).is_ok()
    }

    /// The index values, ascending.
    pub fn instants(&self) -> PolarsResult<Vec<DateTime<Utc>>> {
        index_millis(&self.frame)?
            .into_iter()
            .map(|ms| {
                DateTime::from_timestamp_millis(ms).ok_or_else(|| {
                    PolarsError::ComputeError(format!("instant {} ms is out of range", ms).into())
                })
            })
            .collect()
    }

    pub fn first_time(&self) -> PolarsResult<Option<DateTime<Utc>>> {
        Ok(self.instants()?.first().copied())
    }

    pub fn last_time(&self) -> PolarsResult<Option<DateTime<Utc>>> {
        Ok(self.instants()?.last().copied())
    }

    /// Values of `name` cast to `Float64`.
    pub fn f64_values(&self, name: &str) -> PolarsResult<Vec<Option<f64>>> {
        let column = self.frame.column(name)?.cast(&DataType::Float64)?;
        Ok(column.f64()?.into_iter().collect())
    }

    /// Values of `name` cast to `String`.
    pub fn string_values(&self, name: &str) -> PolarsResult<Vec<Option<String>>> {
        let column = self.frame.column(name)?.cast(&DataType::String)?;
        Ok(column
            .str()?
            .into_iter()
            .map(|value| value.map(str::to_owned))
            .collect())
    }

    /// Extracts one numeric column as a [`TimeSeries`].
    pub fn series(&self, name: &str) -> PolarsResult<TimeSeries> {
        let points = self
            .instants()?
            .into_iter()
            .zip(self.f64_values(name)?)
            .collect();
        Ok(TimeSeries::new(name, points))
    }

    /// Rows whose instant is at or after `instant`.
    pub fn since(&self, instant: DateTime<Utc>) -> PolarsResult<TimeTable> {
        let threshold = instant.timestamp_millis();
        let keep: Vec<bool> = index_millis(&self.frame)?
            .into_iter()
            .map(|ms| ms >= threshold)
            .collect();
        let frame = self
            .frame
            .filter(&BooleanChunked::from_slice("keep".into(), &keep))?;
        Ok(Self { frame })
    }
}

fn index_millis(frame: &DataFrame) -> PolarsResult<Vec<i64>> {
    let physical = frame.column(TIME_COLUMN)?.cast(&DataType::Int64)?;
    physical
        .i64()?
        .into_iter()
        .map(|ms| {
            ms.ok_or_else(|| {
                PolarsError::ComputeError(
                    format!("index column '{}' contains null instants", TIME_COLUMN).into(),
                )
            })
        })
        .collect()
}

fn resolve_dtype(name: &str, seen: &[&DataType]) -> DataType {
    let concrete: Vec<&DataType> = seen
        .iter()
        .copied()
        .filter(|dtype| **dtype != DataType::Null)
        .collect();
    let Some(first) = concrete.first() else {
        return DataType::Null;
    };
    if concrete.iter().all(|dtype| dtype == first) {
        return (*first).clone();
    }
    let widened = if concrete.iter().all(|dtype| is_number(dtype)) {
        DataType::Float64
    } else {
        DataType::String
    };
    debug!(
        "Column '{}' has conflicting dtypes {:?}, widening to {:?}",
        name, concrete, widened
    );
    widened
}

fn is_number(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float64
            | DataType::Float32
            | DataType::Int64
            | DataType::Int32
            | DataType::Int16
            | DataType::Int8
            | DataType::UInt64
            | DataType::UInt32
            | DataType::UInt16
            | DataType::UInt8
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, day, hour, 0, 0).unwrap()
    }

    fn table(instants: &[DateTime<Utc>], extra: Vec<Column>) -> TimeTable {
        let mut columns = vec![time_column(instants)];
        columns.extend(extra);
        TimeTable::from_frame(DataFrame::new(columns).unwrap()).unwrap()
    }

    #[test]
    fn test_from_frame_sorts_and_dedups() {
        let t = table(
            &[at(2, 0), at(1, 0), at(2, 0)],
            vec![Column::new("airTemperature".into(), [2.0, 1.0, 99.0])],
        );
        assert_eq!(t.instants().unwrap(), vec![at(1, 0), at(2, 0)]);
        assert_eq!(
            t.f64_values("airTemperature").unwrap(),
            vec![Some(1.0), Some(2.0)]
        );
    }

    #[test]
    fn test_from_frame_moves_index_first() {
        let columns = vec![
            Column::new("airTemperature".into(), [1.0]),
            time_column(&[at(1, 0)]),
        ];
        let t = TimeTable::from_frame(DataFrame::new(columns).unwrap()).unwrap();
        assert_eq!(t.frame().get_column_names(), ["time", "airTemperature"]);
    }

    #[test]
    fn test_from_frame_rejects_naive_index() {
        let naive = Int64Chunked::from_vec(TIME_COLUMN.into(), vec![0])
            .into_datetime(TimeUnit::Milliseconds, None)
            .into_series();
        let frame = DataFrame::new(vec![naive.into()]).unwrap();
        assert!(TimeTable::from_frame(frame).is_err());
    }

    #[test]
    fn test_empty_table_is_typed() {
        let t = TimeTable::empty();
        assert!(t.is_empty());
        assert_eq!(t.frame().column(TIME_COLUMN).unwrap().dtype(), &time_dtype());
        assert_eq!(t.last_time().unwrap(), None);
    }

    #[test]
    fn test_concat_diagonal_fills_missing_and_widens() {
        let newer = table(
            &[at(2, 0)],
            vec![
                Column::new("airTemperature".into(), [5i64]),
                Column::new("conditionCode".into(), ["rain"]),
            ],
        );
        let older = table(
            &[at(1, 0)],
            vec![
                Column::new("airTemperature".into(), [1.5f64]),
                Column::new("windGust".into(), [7.0f64]),
            ],
        );
        let t = TimeTable::concat_diagonal(vec![newer, older]).unwrap();

        assert_eq!(t.instants().unwrap(), vec![at(1, 0), at(2, 0)]);
        assert_eq!(
            t.frame().get_column_names(),
            ["time", "airTemperature", "conditionCode", "windGust"]
        );
        assert_eq!(
            t.frame().column("airTemperature").unwrap().dtype(),
            &DataType::Float64
        );
        assert_eq!(
            t.f64_values("airTemperature").unwrap(),
            vec![Some(1.5), Some(5.0)]
        );
        assert_eq!(
            t.string_values("conditionCode").unwrap(),
            vec![None, Some("rain".to_string())]
        );
        assert_eq!(t.f64_values("windGust").unwrap(), vec![Some(7.0), None]);
    }

    #[test]
    fn test_concat_of_nothing_is_empty() {
        let t = TimeTable::concat_diagonal(Vec::new()).unwrap();
        assert!(t.is_empty());
    }

    #[test]
    fn test_since_and_series() {
        let t = table(
            &[at(1, 0), at(2, 0), at(3, 0)],
            vec![Column::new("airTemperature".into(), [1.0, 2.0, 3.0])],
        );
        let recent = t.since(at(2, 0)).unwrap();
        assert_eq!(recent.len(), 2);
        let series = recent.series("airTemperature").unwrap();
        assert_eq!(series.points(), &[(at(2, 0), Some(2.0)), (at(3, 0), Some(3.0))]);
    }
}
