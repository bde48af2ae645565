use serde::{Deserialize, Serialize};
use std::fmt;

use crate::services::queue::QueueError;

/// A trigger the service (or the local batch check) declined during submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedTrigger {
	pub name: String,
	pub reason: String,
}

impl fmt::Display for RejectedTrigger {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "trigger '{}' rejected: {}", self.name, self.reason)
	}
}

/// Per-trigger outcome of one submission.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SubmissionReport {
	/// Accepted trigger names, in submission order
	pub accepted: Vec<String>,
	pub rejected: Vec<RejectedTrigger>,
	/// Names still pending because the batch stopped before sending them
	#[serde(default)]
	pub unsent: Vec<String>,
	/// Remote failure that stopped the batch
	#[serde(skip)]
	pub aborted: Option<QueueError>,
}

impl SubmissionReport {
	/// True when every trigger was sent and none was rejected.
	pub fn is_complete(&self) -> bool {
		self.rejected.is_empty() && self.aborted.is_none()
	}

	pub fn is_empty(&self) -> bool {
		self.accepted.is_empty() && self.rejected.is_empty() && self.unsent.is_empty()
	}

	pub fn rejection_for(&self, name: &str) -> Option<&RejectedTrigger> {
		self.rejected.iter().find(|r| r.name == name)
	}
}
