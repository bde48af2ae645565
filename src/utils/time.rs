//! Conversions between Modified Julian Date and civil UTC time.
//!
//! MJD 0 is 1858-11-17 00:00:00 UTC; MJD 40587 is the Unix epoch.

use chrono::{DateTime, NaiveDateTime, Utc};

/// MJD of 1970-01-01 00:00:00 UTC
pub const MJD_UNIX_EPOCH: f64 = 40587.0;

/// Seconds per day
pub const SECONDS_PER_DAY: f64 = 86400.0;

/// Formats accepted by [`isotime_to_mjd`], tried in order.
const ISO_FORMATS: [&str; 4] = [
	"%Y-%m-%d %H:%M:%S%.f",
	"%Y-%m-%dT%H:%M:%S%.f",
	"%Y-%m-%d %H:%M",
	"%Y-%m-%dT%H:%M",
];

/// `None` when `mjd` is not finite or falls outside the range chrono can represent.
pub fn mjd_to_datetime(mjd: f64) -> Option<DateTime<Utc>> {
	if !mjd.is_finite() {
		return None;
	}
	let secs = (mjd - MJD_UNIX_EPOCH) * SECONDS_PER_DAY;
	let whole = secs.floor();
	if whole < i64::MIN as f64 || whole > i64::MAX as f64 {
		return None;
	}
	let nanos = ((secs - whole) * 1e9).round().min(999_999_999.0) as u32;
	DateTime::from_timestamp(whole as i64, nanos)
}

pub fn datetime_to_mjd(dt: DateTime<Utc>) -> f64 {
	let secs = dt.timestamp() as f64 + f64::from(dt.timestamp_subsec_nanos()) / 1e9;
	secs / SECONDS_PER_DAY + MJD_UNIX_EPOCH
}

/// Parses a UTC ISO time such as `2022-05-13 07:25:26` (a date alone means midnight).
pub fn isotime_to_mjd(isotime: &str) -> Result<f64, chrono::ParseError> {
	let isotime = isotime.trim();
	let mut last_err = None;
	for format in ISO_FORMATS {
		match NaiveDateTime::parse_from_str(isotime, format) {
			Ok(naive) => return Ok(datetime_to_mjd(naive.and_utc())),
			Err(e) => last_err = Some(e),
		}
	}
	match chrono::NaiveDate::parse_from_str(isotime, "%Y-%m-%d") {
		Ok(date) => Ok(datetime_to_mjd(date.and_time(chrono::NaiveTime::MIN).and_utc())),
		Err(e) => Err(last_err.unwrap_or(e)),
	}
}

/// Formats as `YYYY-MM-DD HH:MM:SS.sss`.
pub fn mjd_to_isotime(mjd: f64) -> Option<String> {
	mjd_to_datetime(mjd).map(|dt| dt.format("%Y-%m-%d %H:%M:%S%.3f").to_string())
}

/// Length of an MJD interval in completed minutes; a partial minute is dropped.
pub fn mjd_span_minutes(start: f64, end: f64) -> i64 {
	((end - start) * 1440.0).floor() as i64
}
