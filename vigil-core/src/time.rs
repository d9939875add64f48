//! Time utilities: normalizing raw source timestamps to UTC.

use anyhow::Result;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Interpret a naive source stamp as UTC.
///
/// This is the default contract with task sources: raw rows carry UTC-naive
/// stamps, normalized exactly once at construction. Values that are already
/// zoned are `DateTime<Utc>` and never pass through here.
pub fn utc_from_naive(naive: NaiveDateTime) -> DateTime<Utc> {
    Utc.from_utc_datetime(&naive)
}

/// Interpret a naive source stamp in an IANA tz like "America/Chicago",
/// returning UTC. For sources that store wall-clock local times.
pub fn local_naive_to_utc(naive: NaiveDateTime, tz: &str) -> Result<DateTime<Utc>> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))?;

    let local_dt = tz
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| anyhow::anyhow!("ambiguous or invalid local time (DST?): {naive} {tz}"))?;

    Ok(local_dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn naive(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 14)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn naive_is_taken_as_utc() {
        let utc = utc_from_naive(naive(9, 30));
        assert_eq!(utc.to_rfc3339(), "2026-03-14T09:30:00+00:00");
    }

    #[test]
    fn local_chicago_converts() {
        // March 14 is still CST (UTC-6)
        let utc = local_naive_to_utc(naive(9, 30), "America/Chicago").unwrap();
        assert_eq!(utc.to_rfc3339(), "2026-03-14T15:30:00+00:00");
    }

    #[test]
    fn bad_zone_is_rejected() {
        let err = local_naive_to_utc(naive(9, 30), "Mars/Olympus").unwrap_err();
        assert!(err.to_string().contains("invalid timezone"));
    }
}
