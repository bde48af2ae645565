use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::time::{mjd_span_minutes, mjd_to_datetime};

const NOT_AVAILABLE: &str = "*not available*";

/// Server-side snapshot of one queue, as returned by `GET /api/triggers/ztf`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueEntry {
	pub queue_name: String,
	#[serde(default)]
	pub queue_type: Option<String>,
	#[serde(default)]
	pub user: Option<String>,
	#[serde(rename = "is_TOO", default)]
	pub is_too: bool,
	#[serde(default)]
	pub validity_window_mjd: Option<Vec<f64>>,
	/// Queued targets; Kowalski returns them either as an array or as JSON text.
	#[serde(default)]
	pub queue: Value,
}

impl QueueEntry {
	/// Targets of this queue as raw JSON objects.
	pub fn targets(&self) -> Vec<Value> {
		match &self.queue {
			Value::Array(items) => items.clone(),
			Value::String(text) => match serde_json::from_str::<Value>(text) {
				Ok(Value::Array(items)) => items,
				_ => Vec::new(),
			},
			_ => Vec::new(),
		}
	}

	/// `(start, end)` of the validity window when the server reported both ends.
	pub fn window(&self) -> Option<(f64, f64)> {
		match self.validity_window_mjd.as_deref() {
			Some([start, end, ..]) => Some((*start, *end)),
			_ => None,
		}
	}

	/// One-line description used by the CLI, e.g.
	/// `ToO_IC220513A: 2022-05-20 07:25 UT / window length: 60 min / exp: 300s / field: 427`.
	pub fn summary(&self) -> String {
		let (date, duration) = match self.window() {
			Some((start, end)) => (
				mjd_to_datetime(start)
					.map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
					.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
				mjd_span_minutes(start, end).to_string(),
			),
			None => (NOT_AVAILABLE.to_string(), NOT_AVAILABLE.to_string()),
		};

		let targets = self.targets();
		let (exposure, field) = match targets.first() {
			Some(first) => (
				format!("{}s", display_value(first.get("exposure_time"))),
				display_value(first.get("field_id")),
			),
			None => (NOT_AVAILABLE.to_string(), NOT_AVAILABLE.to_string()),
		};

		format!(
			"{}: {} UT / window length: {} min / exp: {} / field: {}",
			self.queue_name, date, duration, exposure, field
		)
	}
}

fn display_value(value: Option<&Value>) -> String {
	match value {
		Some(Value::String(s)) => s.clone(),
		Some(Value::Null) | None => NOT_AVAILABLE.to_string(),
		Some(other) => other.to_string(),
	}
}

/// Result of a listing query: full entries, or names only.
#[derive(Debug, Clone, PartialEq)]
pub enum QueueListing {
	Entries(Vec<QueueEntry>),
	Names(Vec<String>),
}

impl QueueListing {
	/// Queue names in server order, whichever form was requested.
	pub fn names(&self) -> Vec<String> {
		match self {
			QueueListing::Entries(entries) => {
				entries.iter().map(|e| e.queue_name.clone()).collect()
			}
			QueueListing::Names(names) => names.clone(),
		}
	}

	pub fn contains(&self, name: &str) -> bool {
		match self {
			QueueListing::Entries(entries) => entries.iter().any(|e| e.queue_name == name),
			QueueListing::Names(names) => names.iter().any(|n| n == name),
		}
	}

	pub fn len(&self) -> usize {
		match self {
			QueueListing::Entries(entries) => entries.len(),
			QueueListing::Names(names) => names.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}
