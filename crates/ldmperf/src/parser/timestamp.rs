//! Timestamp helpers for arrival (line prefix) and insertion (embedded) times.
//!
//! Arrival times come in whatever form the logger was configured with, so a few
//! ISO-8601 spellings are accepted and normalised to naive UTC. Insertion times
//! always use the fixed `YYYYMMDDHHMMSS.ffffff` product-queue format.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Zone-less spellings. `%.f` also accepts a missing fraction.
const NAIVE_FORMATS: &[&str] = &[
    "%Y%m%dT%H%M%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y%m%d%H%M%S%.f",
];

const OFFSET_FORMATS: &[&str] = &[
    "%Y%m%dT%H%M%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

/// Parse a line's leading timestamp into naive UTC.
///
/// Timestamps carrying an offset are converted to UTC; timestamps without one
/// are taken to already be UTC.
pub fn parse_arrival(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }

    if let Some(naive) = raw.strip_suffix('Z').or_else(|| raw.strip_suffix('z')) {
        return parse_naive(naive);
    }

    OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.naive_utc())
        .or_else(|| parse_naive(raw))
}

fn parse_naive(raw: &str) -> Option<NaiveDateTime> {
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// Parse an insertion time in `YYYYMMDDHHMMSS.ffffff` form (1–6 fraction digits).
pub fn parse_insertion(raw: &str) -> Option<NaiveDateTime> {
    let (whole, frac) = raw.split_once('.')?;
    if whole.len() != 14 || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if frac.is_empty() || frac.len() > 6 || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let num = |from: usize, to: usize| whole[from..to].parse::<u32>().ok();
    let year = whole[0..4].parse::<i32>().ok()?;
    let micros = format!("{frac:0<6}").parse::<u32>().ok()?;

    NaiveDate::from_ymd_opt(year, num(4, 6)?, num(6, 8)?)?
        .and_hms_micro_opt(num(8, 10)?, num(10, 12)?, num(12, 14)?, micros)
}

/// Signed seconds from `inserted` to `arrival`, microsecond precision.
pub fn elapsed_secs(arrival: NaiveDateTime, inserted: NaiveDateTime) -> f64 {
    let delta = arrival.signed_duration_since(inserted);
    match delta.num_microseconds() {
        Some(us) => us as f64 / 1_000_000.0,
        None => delta.num_milliseconds() as f64 / 1_000.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn utc(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f").unwrap()
    }

    #[test]
    fn test_insertion_full_precision() {
        let ts = parse_insertion("20151103021207.123456").unwrap();
        assert_eq!(ts, utc("2015-11-03 02:12:07.123456"));
    }

    #[test]
    fn test_insertion_short_fraction_is_left_aligned() {
        let ts = parse_insertion("20151103021207.5").unwrap();
        assert_eq!(ts.nanosecond(), 500_000_000);
    }

    #[test]
    fn test_insertion_rejects_bad_shapes() {
        assert!(parse_insertion("20151103021207").is_none());
        assert!(parse_insertion("2015110302120.000000").is_none());
        assert!(parse_insertion("20151303021207.000000").is_none());
        assert!(parse_insertion("20151103021207.1234567").is_none());
        assert!(parse_insertion("INFO").is_none());
    }

    #[test]
    fn test_arrival_rfc3339_offset_is_converted() {
        let ts = parse_arrival("2015-11-02T21:12:08.000000-05:00").unwrap();
        assert_eq!(ts, utc("2015-11-03 02:12:08.0"));
    }

    #[test]
    fn test_arrival_compact_zulu() {
        let ts = parse_arrival("20151103T021208.250000Z").unwrap();
        assert_eq!(ts, utc("2015-11-03 02:12:08.25"));
    }

    #[test]
    fn test_arrival_compact_offset() {
        let ts = parse_arrival("20151102T211208.000000-0500").unwrap();
        assert_eq!(ts, utc("2015-11-03 02:12:08.0"));
    }

    #[test]
    fn test_arrival_naive_taken_as_utc() {
        let ts = parse_arrival("2015-11-03T02:12:08").unwrap();
        assert_eq!(ts, utc("2015-11-03 02:12:08.0"));
    }

    #[test]
    fn test_arrival_garbage() {
        assert!(parse_arrival("node2").is_none());
        assert!(parse_arrival("").is_none());
    }

    #[test]
    fn test_elapsed_can_be_negative() {
        let a = utc("2015-11-03 02:12:07.0");
        let b = utc("2015-11-03 02:12:08.5");
        assert!((elapsed_secs(a, b) + 1.5).abs() < 1e-9);
        assert_eq!(elapsed_secs(a, a), 0.0);
    }
}
