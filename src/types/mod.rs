pub mod date_range;
pub mod into_utc_trait;
pub mod records;
pub mod time_series;
pub mod time_table;
pub mod weather_condition;
