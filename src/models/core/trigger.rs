use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::core::TooTarget;

/// Validity window length used when only a start is given, in days.
pub const DEFAULT_WINDOW_DAYS: f64 = 1.0;

/// Queue type of every ToO trigger: targets are observed in list order.
pub const QUEUE_TYPE_LIST: &str = "list";

/// Interval (MJD) during which the scheduler may execute a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidityWindow {
	pub start_mjd: f64,
	pub end_mjd: f64,
}

impl ValidityWindow {
	pub fn new(start_mjd: f64, end_mjd: f64) -> Self {
		Self { start_mjd, end_mjd }
	}

	/// A window of [`DEFAULT_WINDOW_DAYS`] beginning at `start_mjd`.
	pub fn starting_at(start_mjd: f64) -> Self {
		Self::new(start_mjd, start_mjd + DEFAULT_WINDOW_DAYS)
	}

	/// Wire representation `[start, end]`.
	pub fn to_array(self) -> [f64; 2] {
		[self.start_mjd, self.end_mjd]
	}
}

/// Lifecycle of a trigger as observed by this session.
///
/// `Pending -> Submitted -> Deleted`, or `Pending -> Rejected`. `Rejected` and `Deleted` are
/// terminal; a rejected trigger may be added again as a new pending trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "lowercase")]
pub enum TriggerStatus {
	Pending,
	Submitted,
	Rejected(String),
	Deleted,
}

impl fmt::Display for TriggerStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			TriggerStatus::Pending => write!(f, "pending"),
			TriggerStatus::Submitted => write!(f, "submitted"),
			TriggerStatus::Rejected(reason) => write!(f, "rejected ({})", reason),
			TriggerStatus::Deleted => write!(f, "deleted"),
		}
	}
}

/// A named ToO request owned by one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
	/// Queue name, unique among active remote queues
	pub name: String,
	pub user: String,
	pub validity_window: ValidityWindow,
	/// Observed in order; never empty once validated
	pub targets: Vec<TooTarget>,
	pub status: TriggerStatus,
}

impl Trigger {
	/// Payload sent to `PUT /api/triggers/ztf`.
	pub fn to_request(&self) -> TriggerRequest {
		TriggerRequest {
			user: self.user.clone(),
			queue_name: self.name.clone(),
			queue_type: QUEUE_TYPE_LIST.to_string(),
			validity_window_mjd: self.validity_window.to_array(),
			targets: self.targets.clone(),
		}
	}
}

/// Wire form of one trigger submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerRequest {
	pub user: String,
	pub queue_name: String,
	pub queue_type: String,
	pub validity_window_mjd: [f64; 2],
	pub targets: Vec<TooTarget>,
}

/// Wire form of a deletion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRequest {
	pub user: String,
	pub queue_name: String,
}
