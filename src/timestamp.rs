//! MS-DOS timestamp handling.
//!
//! This module provides the [`DosDateTime`] type for working with the
//! timestamps stored in ZIP archive entries. The ZIP format inherits the
//! MS-DOS encoding: two 16-bit fields with 2-second resolution, no time
//! zone, and a year range of 1980-2107.
//!
//! # Encoding
//!
//! ```text
//! time bits: 15-11 hour | 10-5 minute | 4-0 second/2
//! date bits: 15-9 year-1980 | 8-5 month | 4-0 day
//! ```
//!
//! Raw fields from an archive are not trusted: [`DosDateTime::validated`]
//! rejects impossible component combinations (month 13, hour 25, ...) so
//! that malformed archives degrade to an "unknown" timestamp instead of
//! producing nonsense dates.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// First year representable in a DOS timestamp.
pub const DOS_EPOCH_YEAR: u16 = 1980;

/// Last year representable in a DOS timestamp (1980 + 127).
pub const DOS_MAX_YEAR: u16 = 2107;

/// Unix seconds for 1980-01-01 00:00:00 UTC.
const DOS_EPOCH_UNIX_SECS: i64 = 315_532_800;

/// A timestamp in MS-DOS encoding, as stored in ZIP entry headers.
///
/// Resolution is 2 seconds and the value is time-zone naive: conversions to
/// and from [`SystemTime`] treat it as UTC, matching how most ZIP tools
/// behave on non-Windows platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DosDateTime {
    dos_date: u16,
    dos_time: u16,
}

impl DosDateTime {
    /// Creates a timestamp from the raw header fields, unvalidated.
    #[inline]
    pub const fn from_raw(dos_date: u16, dos_time: u16) -> Self {
        Self { dos_date, dos_time }
    }

    /// Returns the raw `(date, time)` header fields.
    #[inline]
    pub const fn raw(&self) -> (u16, u16) {
        (self.dos_date, self.dos_time)
    }

    /// Returns `Some(self)` if all date/time components are in range.
    ///
    /// A zero date field (day 0, month 0) is the most common malformed
    /// value in the wild; it is rejected here so callers fall back to the
    /// "unknown" rendering rather than displaying `1980-00-00`.
    pub fn validated(self) -> Option<Self> {
        let (month, day) = (self.month(), self.day());
        let in_range = (1..=12).contains(&month)
            && (1..=31).contains(&day)
            && self.hour() < 24
            && self.minute() < 60
            && self.second() < 60;
        in_range.then_some(self)
    }

    /// The full year (1980-2107).
    #[inline]
    pub const fn year(&self) -> u16 {
        DOS_EPOCH_YEAR + (self.dos_date >> 9)
    }

    /// The month (1-12 for valid timestamps).
    #[inline]
    pub const fn month(&self) -> u8 {
        ((self.dos_date >> 5) & 0x0F) as u8
    }

    /// The day of month (1-31 for valid timestamps).
    #[inline]
    pub const fn day(&self) -> u8 {
        (self.dos_date & 0x1F) as u8
    }

    /// The hour (0-23 for valid timestamps).
    #[inline]
    pub const fn hour(&self) -> u8 {
        (self.dos_time >> 11) as u8
    }

    /// The minute (0-59 for valid timestamps).
    #[inline]
    pub const fn minute(&self) -> u8 {
        ((self.dos_time >> 5) & 0x3F) as u8
    }

    /// The second (0-58, always even: 2-second resolution).
    #[inline]
    pub const fn second(&self) -> u8 {
        ((self.dos_time & 0x1F) * 2) as u8
    }

    /// Converts to Unix seconds, treating the timestamp as UTC.
    ///
    /// Returns `None` for timestamps that fail [`validated`](Self::validated).
    pub fn as_unix_secs(&self) -> Option<i64> {
        self.validated()?;
        let days = days_from_civil(
            self.year() as i64,
            self.month() as i64,
            self.day() as i64,
        );
        Some(
            days * 86_400
                + self.hour() as i64 * 3_600
                + self.minute() as i64 * 60
                + self.second() as i64,
        )
    }

    /// Converts to a [`SystemTime`], treating the timestamp as UTC.
    pub fn as_system_time(&self) -> Option<SystemTime> {
        let secs = self.as_unix_secs()?;
        // DOS timestamps cannot predate 1980, so secs is always positive.
        Some(UNIX_EPOCH + Duration::from_secs(secs as u64))
    }

    /// Creates a timestamp from Unix seconds, clamping to the DOS range.
    ///
    /// Times before 1980 clamp to the DOS epoch and times after 2107 clamp
    /// to the maximum representable value; sub-2-second precision is
    /// truncated. This mirrors what common ZIP tools write for out-of-range
    /// mtimes.
    pub fn from_unix_secs(secs: i64) -> Self {
        let secs = secs.max(DOS_EPOCH_UNIX_SECS);
        let days = secs.div_euclid(86_400);
        let rem = secs.rem_euclid(86_400);
        let (year, month, day) = civil_from_days(days);
        if year > DOS_MAX_YEAR as i64 {
            return Self::from_raw(0xFF9F, 0xBF7D); // 2107-12-31 23:59:58
        }
        let dos_date =
            (((year - DOS_EPOCH_YEAR as i64) as u16) << 9) | ((month as u16) << 5) | day as u16;
        let (hour, minute, second) = (rem / 3_600, (rem % 3_600) / 60, rem % 60);
        let dos_time = ((hour as u16) << 11) | ((minute as u16) << 5) | (second as u16 / 2);
        Self { dos_date, dos_time }
    }

    /// Creates a timestamp from a [`SystemTime`], clamping to the DOS range.
    pub fn from_system_time(time: SystemTime) -> Self {
        let secs = match time.duration_since(UNIX_EPOCH) {
            Ok(d) => d.as_secs() as i64,
            Err(_) => 0, // pre-1970 clamps to the DOS epoch below
        };
        Self::from_unix_secs(secs)
    }

    /// Creates a timestamp for the current time.
    pub fn now() -> Self {
        Self::from_system_time(SystemTime::now())
    }
}

impl std::fmt::Display for DosDateTime {
    /// Formats as `YYYY-MM-DD HH:MM:SS`, or `Unknown` for invalid fields.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.validated().is_none() {
            return write!(f, "Unknown");
        }
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year(),
            self.month(),
            self.day(),
            self.hour(),
            self.minute(),
            self.second()
        )
    }
}

/// Days since 1970-01-01 for a proleptic Gregorian civil date.
///
/// Hinnant's algorithm; exact for the whole DOS year range.
fn days_from_civil(year: i64, month: i64, day: i64) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let doy = (153 * (month + if month > 2 { -3 } else { 9 }) + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Inverse of [`days_from_civil`].
fn civil_from_days(days: i64) -> (i64, i64, i64) {
    let z = days + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = mp + if mp < 10 { 3 } else { -9 };
    (if m <= 2 { y + 1 } else { y }, m, d)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dos_epoch() {
        // 1980-01-01 00:00:00 -> date 0x0021, time 0x0000
        let ts = DosDateTime::from_raw(0x0021, 0x0000);
        assert_eq!(ts.year(), 1980);
        assert_eq!(ts.month(), 1);
        assert_eq!(ts.day(), 1);
        assert_eq!(ts.as_unix_secs(), Some(DOS_EPOCH_UNIX_SECS));
    }

    #[test]
    fn test_known_timestamp() {
        // 2024-06-15 12:30:42
        let ts = DosDateTime::from_unix_secs(1_718_454_642);
        assert_eq!(ts.year(), 2024);
        assert_eq!(ts.month(), 6);
        assert_eq!(ts.day(), 15);
        assert_eq!(ts.hour(), 12);
        assert_eq!(ts.minute(), 30);
        assert_eq!(ts.second(), 42);
    }

    #[test]
    fn test_two_second_truncation() {
        let ts = DosDateTime::from_unix_secs(1_718_454_643); // :43 truncates to :42
        assert_eq!(ts.second(), 42);
    }

    #[test]
    fn test_pre_epoch_clamps() {
        let ts = DosDateTime::from_unix_secs(0); // 1970 < DOS epoch
        assert_eq!(ts.year(), 1980);
        assert_eq!(ts.month(), 1);
        assert_eq!(ts.day(), 1);
    }

    #[test]
    fn test_invalid_fields_display_unknown() {
        // Zeroed date field: month 0, day 0
        let ts = DosDateTime::from_raw(0, 0);
        assert!(ts.validated().is_none());
        assert_eq!(ts.to_string(), "Unknown");
        assert_eq!(ts.as_unix_secs(), None);
    }

    #[test]
    fn test_display_format() {
        let ts = DosDateTime::from_unix_secs(1_718_454_642);
        assert_eq!(ts.to_string(), "2024-06-15 12:30:42");
    }

    #[test]
    fn test_roundtrip_through_raw() {
        let ts = DosDateTime::from_unix_secs(1_718_454_642);
        let (date, time) = ts.raw();
        assert_eq!(DosDateTime::from_raw(date, time), ts);
    }

    #[test]
    fn test_civil_conversion_roundtrip() {
        for &days in &[0i64, 3_652, 10_957, 20_000, 50_000] {
            let (y, m, d) = civil_from_days(days);
            assert_eq!(days_from_civil(y, m, d), days);
        }
    }
}
