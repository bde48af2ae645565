//! The contract between the queue client and the Kowalski trigger API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
	models::{DeleteRequest, QueueEntry, TriggerRequest},
	services::queue::QueueError,
};

/// Path of the ZTF trigger resource, relative to the service base URL.
pub const TRIGGERS_PATH: &str = "api/triggers/ztf";

/// Envelope wrapping every Kowalski response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
	pub status: String,
	#[serde(default)]
	pub message: Option<String>,
	#[serde(default)]
	pub data: Value,
}

impl ApiResponse {
	pub fn is_success(&self) -> bool {
		self.status == "success"
	}

	/// Server message, or the status itself when no message was given.
	pub fn reason(&self) -> String {
		self.message
			.clone()
			.filter(|m| !m.trim().is_empty())
			.unwrap_or_else(|| format!("status '{}'", self.status))
	}
}

/// Server verdict on a single trigger submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
	Accepted,
	/// Declined with the server's reason, e.g. a queue of that name already exists
	Rejected(String),
}

/// Operations the queue client needs from Kowalski.
///
/// Each call performs at most one HTTP exchange and never retries.
#[async_trait]
pub trait KowalskiApi: Send + Sync {
	/// Checks that the service is reachable and accepts the token.
	async fn ping(&self) -> Result<(), QueueError>;

	/// Submits one trigger. A per-trigger refusal is `Ok(SubmitOutcome::Rejected)`;
	/// transport and authentication failures are errors.
	async fn submit_trigger(&self, request: &TriggerRequest) -> Result<SubmitOutcome, QueueError>;

	/// Lists every queue known to the service.
	async fn list_queues(&self) -> Result<Vec<QueueEntry>, QueueError>;

	/// Deletes one queue; `QueueError::NotFound` when no such queue exists.
	async fn delete_queue(&self, request: &DeleteRequest) -> Result<(), QueueError>;
}
