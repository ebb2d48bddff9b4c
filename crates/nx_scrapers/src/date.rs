use chrono::NaiveDateTime;
use nx_core::{Error, Result};

/// Layout of the `datetime` attribute once the zone marker is gone,
/// e.g. `2020-04-11T19:01:56.000`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// `11 April 2020`
pub const DISPLAY_FORMAT: &str = "%d %B %Y";

/// Turns a machine timestamp into the display date used in records.
///
/// The trailing `Z` is dropped and the rest is read as a naive local time, so
/// the calendar day is never shifted by a timezone conversion.
pub fn normalize_timestamp(raw: &str) -> Result<String> {
    let naive = raw.trim_end_matches('Z');
    let parsed = NaiveDateTime::parse_from_str(naive, TIMESTAMP_FORMAT).map_err(|source| {
        Error::DateParse {
            value: raw.to_string(),
            source,
        }
    })?;
    Ok(parsed.format(DISPLAY_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_bbc_timestamp() {
        assert_eq!(
            normalize_timestamp("2020-04-11T19:01:56.000Z").unwrap(),
            "11 April 2020"
        );
    }

    #[test]
    fn test_no_timezone_shift() {
        // A late UTC time stays on the same calendar day.
        assert_eq!(
            normalize_timestamp("2020-04-01T23:59:59.999Z").unwrap(),
            "01 April 2020"
        );
    }

    #[test]
    fn test_zero_padded_day_and_full_month() {
        assert_eq!(
            normalize_timestamp("2019-09-03T08:00:00.123456Z").unwrap(),
            "03 September 2019"
        );
    }

    #[test]
    fn test_malformed_timestamp() {
        for raw in ["11/04/2020", "2020-13-11T19:01:56.000Z", "", "Z"] {
            match normalize_timestamp(raw) {
                Err(Error::DateParse { value, .. }) => assert_eq!(value, raw),
                other => panic!("expected DateParse for {:?}, got {:?}", raw, other),
            }
        }
    }

    #[test]
    fn test_is_deterministic() {
        let raw = "2020-04-11T19:01:56.000Z";
        assert_eq!(normalize_timestamp(raw).unwrap(), normalize_timestamp(raw).unwrap());
    }
}
