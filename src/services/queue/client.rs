//! Stateful ToO queue client.
//!
//! A [`QueueClient`] owns the triggers created in this session. Each one carries an explicit
//! [`TriggerStatus`]; the pending batch is the set still marked `Pending`. Submission sends one
//! request per pending trigger and records per-trigger outcomes instead of failing the batch.

use std::collections::{HashMap, HashSet};
use tracing::{debug, info, instrument, warn};

use crate::{
	models::{
		DeleteRequest, KowalskiConfig, QueueEntry, QueueListing, RejectedTrigger,
		SubmissionReport, TooTarget, Trigger, TriggerStatus, ValidityWindow,
	},
	services::{
		kowalski::{HttpKowalskiClient, KowalskiApi, SubmitOutcome},
		queue::{QueueError, TriggerBuilder},
	},
};

/// Reason recorded when a second trigger of the same name appears in one batch.
pub const DUPLICATE_IN_BATCH: &str = "duplicate trigger name in batch";

/// Which server queues the listing operations return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueueScope {
	/// Every queue Kowalski reports
	#[default]
	AllUsers,
	/// Only queues whose `user` matches the client's user
	OwnUser,
}

/// Outcome of deleting every submitted trigger of the session.
#[derive(Debug, Default)]
pub struct DeletionReport {
	pub deleted: Vec<String>,
	pub failed: Vec<(String, QueueError)>,
}

impl DeletionReport {
	pub fn is_complete(&self) -> bool {
		self.failed.is_empty()
	}
}

/// Client for building, submitting, listing and deleting ZTF ToO triggers.
pub struct QueueClient<K: KowalskiApi = HttpKowalskiClient> {
	user: String,
	api: K,
	scope: QueueScope,
	triggers: Vec<Trigger>,
}

impl QueueClient<HttpKowalskiClient> {
	/// Client over HTTP with explicit connection settings.
	pub fn new(user: impl Into<String>, config: KowalskiConfig) -> Result<Self, QueueError> {
		let user = require_user(user.into())?;
		let api = HttpKowalskiClient::new(config)?;
		Ok(Self::with_api(user, api))
	}

	/// Client over HTTP configured from `KOWALSKI_*` environment variables.
	pub fn from_env(user: impl Into<String>) -> Result<Self, QueueError> {
		let user = require_user(user.into())?;
		let config = KowalskiConfig::from_env()?;
		Self::new(user, config)
	}
}

impl<K: KowalskiApi> QueueClient<K> {
	pub fn with_api(user: impl Into<String>, api: K) -> Self {
		Self {
			user: user.into(),
			api,
			scope: QueueScope::default(),
			triggers: Vec::new(),
		}
	}

	pub fn with_scope(mut self, scope: QueueScope) -> Self {
		self.scope = scope;
		self
	}

	pub fn user(&self) -> &str {
		&self.user
	}

	pub fn api(&self) -> &K {
		&self.api
	}

	/// Validates a trigger with a default-length window and appends it to the pending batch.
	///
	/// On error the batch is unchanged.
	pub fn add_trigger_to_queue(
		&mut self,
		name: impl Into<String>,
		start_mjd: f64,
		targets: Vec<TooTarget>,
	) -> Result<&Trigger, QueueError> {
		let builder = TriggerBuilder::new(self.user.clone())
			.name(name)
			.starting_at(start_mjd)
			.targets(targets);
		self.push(builder)
	}

	/// Like [`add_trigger_to_queue`](Self::add_trigger_to_queue) with an explicit window.
	pub fn add_trigger_with_window(
		&mut self,
		name: impl Into<String>,
		window: ValidityWindow,
		targets: Vec<TooTarget>,
	) -> Result<&Trigger, QueueError> {
		let builder = TriggerBuilder::new(self.user.clone())
			.name(name)
			.window(window)
			.targets(targets);
		self.push(builder)
	}

	fn push(&mut self, builder: TriggerBuilder) -> Result<&Trigger, QueueError> {
		let trigger = builder.build()?;
		debug!(
			trigger = %trigger.name,
			targets = trigger.targets.len(),
			"Added trigger to pending batch"
		);
		self.triggers.push(trigger);
		Ok(&self.triggers[self.triggers.len() - 1])
	}

	/// Triggers not yet submitted, in insertion order.
	pub fn pending(&self) -> Vec<&Trigger> {
		self.triggers
			.iter()
			.filter(|t| t.status == TriggerStatus::Pending)
			.collect()
	}

	/// Every trigger created in this session with its current status.
	pub fn triggers(&self) -> &[Trigger] {
		&self.triggers
	}

	/// Status of the most recent trigger with this name.
	pub fn status_of(&self, name: &str) -> Option<&TriggerStatus> {
		self.triggers
			.iter()
			.rev()
			.find(|t| t.name == name)
			.map(|t| &t.status)
	}

	/// Drops pending triggers without sending them. Returns how many were discarded.
	pub fn clear_pending(&mut self) -> usize {
		let before = self.triggers.len();
		self.triggers.retain(|t| t.status != TriggerStatus::Pending);
		before - self.triggers.len()
	}

	/// Checks that Kowalski is reachable with the configured token.
	pub async fn ping(&self) -> Result<(), QueueError> {
		self.api.ping().await
	}

	/// Submits every pending trigger, one request each, in insertion order.
	///
	/// Service refusals and in-batch duplicates are reported per trigger in the returned
	/// [`SubmissionReport`]. A transport, timeout or authentication failure stops the batch: the
	/// error lands in `aborted`, the names not sent land in `unsent` and those triggers stay
	/// pending, while outcomes recorded before the failure are kept.
	#[instrument(skip(self), fields(user = %self.user))]
	pub async fn submit_queue(&mut self) -> SubmissionReport {
		let mut report = SubmissionReport::default();
		let batch: Vec<usize> = self
			.triggers
			.iter()
			.enumerate()
			.filter(|(_, t)| t.status == TriggerStatus::Pending)
			.map(|(i, _)| i)
			.collect();

		if batch.is_empty() {
			debug!("No pending triggers to submit");
			return report;
		}

		let mut seen = HashSet::new();
		let mut remaining = batch.into_iter();
		for index in remaining.by_ref() {
			let name = self.triggers[index].name.clone();

			if !seen.insert(name.clone()) {
				warn!(trigger = %name, "Rejecting duplicate trigger in batch");
				self.reject(index, &mut report, DUPLICATE_IN_BATCH.to_string());
				continue;
			}

			let request = self.triggers[index].to_request();
			match self.api.submit_trigger(&request).await {
				Ok(SubmitOutcome::Accepted) => {
					info!(trigger = %name, "Trigger accepted by Kowalski");
					self.triggers[index].status = TriggerStatus::Submitted;
					report.accepted.push(name);
				}
				Ok(SubmitOutcome::Rejected(reason)) => {
					warn!(trigger = %name, %reason, "Trigger rejected by Kowalski");
					self.reject(index, &mut report, reason);
				}
				Err(err) => {
					warn!(trigger = %name, error = %err, "Stopping submission after remote failure");
					report.unsent.push(name);
					report.aborted = Some(err);
					break;
				}
			}
		}
		report
			.unsent
			.extend(remaining.map(|i| self.triggers[i].name.clone()));

		info!(
			accepted = report.accepted.len(),
			rejected = report.rejected.len(),
			unsent = report.unsent.len(),
			"Submitted trigger batch"
		);
		report
	}

	fn reject(&mut self, index: usize, report: &mut SubmissionReport, reason: String) {
		let trigger = &mut self.triggers[index];
		trigger.status = TriggerStatus::Rejected(reason.clone());
		report.rejected.push(RejectedTrigger {
			name: trigger.name.clone(),
			reason,
		});
	}

	/// All queues visible in the configured scope.
	pub async fn get_all_queues(&self) -> Result<Vec<QueueEntry>, QueueError> {
		let entries = self.api.list_queues().await?;
		let entries: Vec<QueueEntry> = match self.scope {
			QueueScope::AllUsers => entries,
			QueueScope::OwnUser => entries
				.into_iter()
				.filter(|e| e.user.as_deref() == Some(self.user.as_str()))
				.collect(),
		};
		debug!(count = entries.len(), "Fetched queues");
		Ok(entries)
	}

	pub async fn get_all_queue_names(&self) -> Result<Vec<String>, QueueError> {
		Ok(self
			.get_all_queues()
			.await?
			.into_iter()
			.map(|e| e.queue_name)
			.collect())
	}

	/// Queues Kowalski flags as ToO, whatever their name prefix.
	pub async fn get_too_queues(&self, names_only: bool) -> Result<QueueListing, QueueError> {
		let entries: Vec<QueueEntry> = self
			.get_all_queues()
			.await?
			.into_iter()
			.filter(|e| e.is_too)
			.collect();

		Ok(if names_only {
			QueueListing::Names(entries.into_iter().map(|e| e.queue_name).collect())
		} else {
			QueueListing::Entries(entries)
		})
	}

	/// One human-readable line per active ToO queue.
	pub async fn get_too_queue_summaries(&self) -> Result<Vec<String>, QueueError> {
		match self.get_too_queues(false).await? {
			QueueListing::Entries(entries) => Ok(entries.iter().map(QueueEntry::summary).collect()),
			QueueListing::Names(names) => Ok(names),
		}
	}

	/// Deletes one queue by name.
	///
	/// Only an empty name is refused locally; Kowalski decides whether any other name exists and
	/// answers `QueueError::NotFound` when it does not. A matching trigger submitted in this
	/// session is marked `Deleted`.
	#[instrument(skip(self), fields(user = %self.user))]
	pub async fn delete_trigger(&mut self, name: &str) -> Result<(), QueueError> {
		if name.trim().is_empty() {
			return Err(QueueError::validation_error(
				"trigger_name",
				"trigger name must not be empty",
			));
		}

		let request = DeleteRequest {
			user: self.user.clone(),
			queue_name: name.to_string(),
		};
		self.api.delete_queue(&request).await?;

		if let Some(trigger) = self
			.triggers
			.iter_mut()
			.rev()
			.find(|t| t.name == name && t.status == TriggerStatus::Submitted)
		{
			trigger.status = TriggerStatus::Deleted;
		}
		info!(trigger = %name, "Deleted trigger");
		Ok(())
	}

	/// Deletes every trigger this session submitted and has not yet deleted.
	pub async fn delete_submitted(&mut self) -> DeletionReport {
		let names: Vec<String> = self
			.triggers
			.iter()
			.filter(|t| t.status == TriggerStatus::Submitted)
			.map(|t| t.name.clone())
			.collect();

		let mut report = DeletionReport::default();
		for name in names {
			match self.delete_trigger(&name).await {
				Ok(()) => report.deleted.push(name),
				Err(err) => report.failed.push((name, err)),
			}
		}
		report
	}

	/// Count of session triggers per status label.
	pub fn status_counts(&self) -> HashMap<&'static str, usize> {
		let mut counts = HashMap::new();
		for trigger in &self.triggers {
			let label = match trigger.status {
				TriggerStatus::Pending => "pending",
				TriggerStatus::Submitted => "submitted",
				TriggerStatus::Rejected(_) => "rejected",
				TriggerStatus::Deleted => "deleted",
			};
			*counts.entry(label).or_insert(0) += 1;
		}
		counts
	}
}

fn require_user(user: String) -> Result<String, QueueError> {
	if user.trim().is_empty() {
		return Err(QueueError::configuration_error(
			"A Kowalski user name is required",
			None,
			None,
		));
	}
	Ok(user)
}
