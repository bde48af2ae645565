use async_trait::async_trait;
use proptest::{prelude::*, test_runner::Config};

use ztf_too_queue::{
	models::{DeleteRequest, QueueEntry, TooTarget, TriggerRequest, MAX_EXPOSURE_TIME},
	services::{
		kowalski::{KowalskiApi, SubmitOutcome},
		queue::{QueueClient, QueueError, RemoteErrorKind},
	},
};

use crate::properties::strategies::{
	mjd_strategy, targets_with_invalid_filter_strategy, trigger_name_strategy,
	valid_targets_strategy,
};

/// Service that is never reachable; adding triggers must not need it.
struct OfflineKowalski;

fn offline() -> QueueError {
	QueueError::remote_error(RemoteErrorKind::Transport, None, "offline", None, None)
}

#[async_trait]
impl KowalskiApi for OfflineKowalski {
	async fn ping(&self) -> Result<(), QueueError> {
		Err(offline())
	}
	async fn submit_trigger(&self, _: &TriggerRequest) -> Result<SubmitOutcome, QueueError> {
		Err(offline())
	}
	async fn list_queues(&self) -> Result<Vec<QueueEntry>, QueueError> {
		Err(offline())
	}
	async fn delete_queue(&self, _: &DeleteRequest) -> Result<(), QueueError> {
		Err(offline())
	}
}

fn client_with(pending: usize) -> QueueClient<OfflineKowalski> {
	let mut client = QueueClient::with_api("DESY", OfflineKowalski);
	for i in 0..pending {
		client
			.add_trigger_to_queue(
				format!("TEST_existing-{}", i),
				59719.0,
				vec![TooTarget::new(427, 1, 300)],
			)
			.unwrap();
	}
	client
}

proptest! {
	#![proptest_config(Config {
		failure_persistence: None,
		..Config::default()
	})]

	#[test]
	fn valid_trigger_appears_exactly_once(
		name in trigger_name_strategy(),
		start in mjd_strategy(),
		targets in valid_targets_strategy(),
		existing in 0usize..5,
	) {
		let mut client = client_with(existing);

		let trigger = client.add_trigger_to_queue(name.as_str(), start, targets.clone()).unwrap();
		prop_assert_eq!(&trigger.targets, &targets);
		prop_assert!(trigger.validity_window.end_mjd > trigger.validity_window.start_mjd);

		let pending = client.pending();
		prop_assert_eq!(pending.len(), existing + 1);
		prop_assert_eq!(pending.iter().filter(|t| t.name == name).count(), 1);
	}

	#[test]
	fn invalid_filter_leaves_batch_unchanged(
		name in trigger_name_strategy(),
		start in mjd_strategy(),
		targets in targets_with_invalid_filter_strategy(),
		existing in 0usize..5,
	) {
		let mut client = client_with(existing);

		let err = client.add_trigger_to_queue(name, start, targets).unwrap_err();

		prop_assert_eq!(err.invalid_field(), Some("filter_id"));
		prop_assert_eq!(client.pending().len(), existing);
	}

	#[test]
	fn exposure_outside_bounds_is_rejected(
		start in mjd_strategy(),
		mut targets in valid_targets_strategy(),
		exposure in prop_oneof![Just(0u32), (MAX_EXPOSURE_TIME + 1)..100_000],
	) {
		let mut client = client_with(0);
		let last = targets.len() - 1;
		targets[last].exposure_time = exposure;

		let err = client.add_trigger_to_queue("ToO_x", start, targets).unwrap_err();

		prop_assert_eq!(err.invalid_field(), Some("exposure_time"));
		prop_assert!(client.pending().is_empty());
	}

	#[test]
	fn unprefixed_names_are_rejected(
		name in "[a-z][A-Za-z0-9]{0,16}",
		targets in valid_targets_strategy(),
	) {
		let mut client = client_with(0);

		let err = client.add_trigger_to_queue(name, 59719.0, targets).unwrap_err();

		prop_assert_eq!(err.invalid_field(), Some("trigger_name"));
	}
}
