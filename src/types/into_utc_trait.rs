use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};

pub trait IntoUtcDateTime {
    fn into_utc(self) -> DateTime<Utc>;
}

impl IntoUtcDateTime for NaiveDateTime {
    fn into_utc(self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self)
    }
}

impl IntoUtcDateTime for DateTime<FixedOffset> {
    fn into_utc(self) -> DateTime<Utc> {
        self.with_timezone(&Utc)
    }
}

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parses an ISO-8601 timestamp into a UTC instant.
///
/// Values carrying an offset (`Z`, `+03:00`) are converted to UTC; values without
/// one are taken to already be UTC, which is how the meteo.lt feeds write them
/// (`2024-05-01 12:00:00`).
pub fn parse_utc_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(with_offset.into_utc());
    }
    if let Ok(with_offset) = DateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%:z") {
        return Some(with_offset.into_utc());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(IntoUtcDateTime::into_utc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_naive_space_separated() {
        let parsed = parse_utc_timestamp("2024-05-01 12:00:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_naive_t_separated_with_fraction() {
        let parsed = parse_utc_timestamp("2024-05-01T12:00:00.250").unwrap();
        assert_eq!(parsed.timestamp_millis() % 1000, 250);
    }

    #[test]
    fn test_parse_offset_is_converted_to_utc() {
        let parsed = parse_utc_timestamp("2024-05-01T15:00:00+03:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());

        let zulu = parse_utc_timestamp("2024-05-01T12:00:00Z").unwrap();
        assert_eq!(zulu, parsed);
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_utc_timestamp("yesterday").is_none());
        assert!(parse_utc_timestamp("").is_none());
    }

    #[test]
    fn test_into_utc_for_naive_and_offset_values() {
        let naive = NaiveDateTime::parse_from_str("2024-05-01 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        assert_eq!(naive.into_utc(), expected);

        let vilnius_summer = FixedOffset::east_opt(3 * 3600).unwrap();
        let shifted = vilnius_summer.with_ymd_and_hms(2024, 5, 1, 15, 0, 0).unwrap();
        assert_eq!(shifted.into_utc(), expected);
    }
}
