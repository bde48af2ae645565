//! Alert and trigger naming conventions.

use lazy_static::lazy_static;
use regex::Regex;

/// Prefix every ToO queue name must carry.
pub const TOO_PREFIX: &str = "ToO_";

/// Prefix accepted for test queues that the scheduler never executes.
pub const TEST_PREFIX: &str = "TEST_";

lazy_static! {
	/// ZTF transient names, e.g. `ZTF21abcdefg`.
	static ref ZTF_NAME: Regex = Regex::new(r"^ZTF[1-2]\d[a-z]{7}$").unwrap();

	/// IceCube alert names, e.g. `IC220513A`; the date part must be a real calendar day.
	static ref ICECUBE_NAME: Regex = Regex::new(
		r"^IC((\d{2}((0[13578]|1[02])(0[1-9]|[12]\d|3[01])|(0[13456789]|1[012])(0[1-9]|[12]\d|30)|02(0[1-9]|1\d|2[0-8])))|([02468][048]|[13579][26])0229)[a-zA-Z]$"
	)
	.unwrap();
}

pub fn is_ztf_name(name: &str) -> bool {
	ZTF_NAME.is_match(name)
}

pub fn is_icecube_name(name: &str) -> bool {
	ICECUBE_NAME.is_match(name)
}

/// True when `name` starts with `ToO_` or `TEST_`.
pub fn has_queue_prefix(name: &str) -> bool {
	name.starts_with(TOO_PREFIX) || name.starts_with(TEST_PREFIX)
}

/// Builds the conventional queue name for a follow-up of `alert` on `field_id`,
/// e.g. `ToO_IC220513A_427`.
pub fn too_trigger_name(alert: &str, field_id: u32) -> String {
	format!("{}{}_{}", TOO_PREFIX, alert, field_id)
}
