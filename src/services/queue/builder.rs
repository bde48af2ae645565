//! Validation and assembly of ToO triggers.
//!
//! [`TriggerBuilder`] never touches the network. [`TriggerBuilder::build`] either returns a
//! complete pending [`Trigger`] or a validation error naming the first offending field.

use crate::{
	models::{
		Filter, TooTarget, Trigger, TriggerStatus, ValidityWindow, MAX_EXPOSURE_TIME, PROGRAM_IDS,
	},
	services::queue::QueueError,
	utils::naming::{has_queue_prefix, TEST_PREFIX, TOO_PREFIX},
};

/// Assembles one trigger for a user.
#[derive(Debug, Clone)]
pub struct TriggerBuilder {
	user: String,
	name: String,
	window: Option<ValidityWindow>,
	targets: Vec<TooTarget>,
}

impl TriggerBuilder {
	pub fn new(user: impl Into<String>) -> Self {
		Self {
			user: user.into(),
			name: String::new(),
			window: None,
			targets: Vec::new(),
		}
	}

	pub fn name(mut self, name: impl Into<String>) -> Self {
		self.name = name.into();
		self
	}

	/// Window of the default length starting at `start_mjd`.
	pub fn starting_at(mut self, start_mjd: f64) -> Self {
		self.window = Some(ValidityWindow::starting_at(start_mjd));
		self
	}

	pub fn window(mut self, window: ValidityWindow) -> Self {
		self.window = Some(window);
		self
	}

	pub fn target(mut self, target: TooTarget) -> Self {
		self.targets.push(target);
		self
	}

	pub fn targets(mut self, targets: impl IntoIterator<Item = TooTarget>) -> Self {
		self.targets.extend(targets);
		self
	}

	/// Validates and returns a pending trigger.
	pub fn build(self) -> Result<Trigger, QueueError> {
		validate_name(&self.name)?;
		let window = self.window.ok_or_else(|| {
			QueueError::validation_error("validity_window", "a validity window start is required")
		})?;
		validate_window(&window)?;
		validate_targets(&self.targets)?;

		Ok(Trigger {
			name: self.name,
			user: self.user,
			validity_window: window,
			targets: self.targets,
			status: TriggerStatus::Pending,
		})
	}
}

/// Queue names are non-empty and carry the `ToO_` or `TEST_` prefix.
pub fn validate_name(name: &str) -> Result<(), QueueError> {
	if name.trim().is_empty() {
		return Err(QueueError::validation_error(
			"trigger_name",
			"trigger name must not be empty",
		));
	}
	if !has_queue_prefix(name) {
		return Err(QueueError::validation_error(
			"trigger_name",
			format!(
				"trigger names must begin with '{}' or '{}', got '{}'",
				TOO_PREFIX, TEST_PREFIX, name
			),
		));
	}
	Ok(())
}

fn validate_window(window: &ValidityWindow) -> Result<(), QueueError> {
	if !window.start_mjd.is_finite() || !window.end_mjd.is_finite() {
		return Err(QueueError::validation_error(
			"validity_window",
			"validity window bounds must be finite MJD values",
		));
	}
	if window.end_mjd <= window.start_mjd {
		return Err(QueueError::validation_error(
			"validity_window",
			format!(
				"validity window end {} must be after its start {}",
				window.end_mjd, window.start_mjd
			),
		));
	}
	Ok(())
}

fn validate_targets(targets: &[TooTarget]) -> Result<(), QueueError> {
	if targets.is_empty() {
		return Err(QueueError::validation_error(
			"targets",
			"a trigger needs at least one target",
		));
	}

	for (index, target) in targets.iter().enumerate() {
		if target.field_id == 0 {
			return Err(QueueError::validation_error(
				"field_id",
				format!("target {}: field id must be positive", index),
			));
		}
		if Filter::try_from(target.filter_id).is_err() {
			return Err(QueueError::validation_error(
				"filter_id",
				format!(
					"target {}: filter id {} is not one of 1 (r), 2 (g), 3 (i)",
					index, target.filter_id
				),
			));
		}
		if target.exposure_time == 0 || target.exposure_time > MAX_EXPOSURE_TIME {
			return Err(QueueError::validation_error(
				"exposure_time",
				format!(
					"target {}: exposure time {} s is outside 1..={} s",
					index, target.exposure_time, MAX_EXPOSURE_TIME
				),
			));
		}
		if !PROGRAM_IDS.contains(&target.program_id) {
			return Err(QueueError::validation_error(
				"program_id",
				format!(
					"target {}: program id {} is not one of {:?}",
					index, target.program_id, PROGRAM_IDS
				),
			));
		}
	}
	Ok(())
}
