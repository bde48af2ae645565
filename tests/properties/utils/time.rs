use proptest::prelude::*;

use ztf_too_queue::utils::{
	datetime_to_mjd, isotime_to_mjd, mjd_span_minutes, mjd_to_datetime, mjd_to_isotime,
};

use crate::properties::strategies::mjd_strategy;

/// Millisecond formatting drops at most one millisecond.
const ONE_MS_IN_DAYS: f64 = 0.001 / 86400.0;

proptest! {
	#[test]
	fn isotime_preserves_mjd_to_the_millisecond(mjd in mjd_strategy()) {
		let parsed = isotime_to_mjd(&mjd_to_isotime(mjd).unwrap()).unwrap();
		prop_assert!((parsed - mjd).abs() <= ONE_MS_IN_DAYS * 1.01);
	}

	#[test]
	fn mjd_order_matches_time_order(a in mjd_strategy(), b in mjd_strategy()) {
		let (da, db) = (mjd_to_datetime(a).unwrap(), mjd_to_datetime(b).unwrap());
		if a <= b {
			prop_assert!(da <= db);
		} else {
			prop_assert!(da >= db);
		}
		prop_assert!((datetime_to_mjd(da) - a).abs() < 1e-8);
	}

	#[test]
	fn span_drops_partial_minutes(start in mjd_strategy(), minutes in 0i64..10_000) {
		let end = start + (minutes as f64 + 0.5) / 1440.0;
		prop_assert_eq!(mjd_span_minutes(start, end), minutes);
	}
}
