use async_trait::async_trait;
use proptest::{prelude::*, test_runner::Config};
use std::sync::Mutex;
use tokio::runtime::Runtime;

use ztf_too_queue::{
	models::{DeleteRequest, QueueEntry, TriggerRequest},
	services::{
		kowalski::{KowalskiApi, SubmitOutcome},
		queue::{QueueClient, QueueError},
	},
	utils::tests::queue_entry::QueueEntryBuilder,
};

use crate::properties::strategies::{mjd_strategy, trigger_name_strategy, valid_targets_strategy};

/// Accepts every submission and lists it back as a ToO queue.
#[derive(Default)]
struct AcceptingKowalski {
	queues: Mutex<Vec<QueueEntry>>,
}

#[async_trait]
impl KowalskiApi for AcceptingKowalski {
	async fn ping(&self) -> Result<(), QueueError> {
		Ok(())
	}
	async fn submit_trigger(&self, request: &TriggerRequest) -> Result<SubmitOutcome, QueueError> {
		self.queues
			.lock()
			.unwrap()
			.push(QueueEntryBuilder::new().queue_name(&request.queue_name).build());
		Ok(SubmitOutcome::Accepted)
	}
	async fn list_queues(&self) -> Result<Vec<QueueEntry>, QueueError> {
		Ok(self.queues.lock().unwrap().clone())
	}
	async fn delete_queue(&self, request: &DeleteRequest) -> Result<(), QueueError> {
		self.queues
			.lock()
			.unwrap()
			.retain(|e| e.queue_name != request.queue_name);
		Ok(())
	}
}

proptest! {
	#![proptest_config(Config {
		failure_persistence: None,
		cases: 64,
		..Config::default()
	})]

	#[test]
	fn submitted_names_are_listed_as_too(
		names in prop::collection::btree_set(trigger_name_strategy(), 1..6),
		start in mjd_strategy(),
		targets in valid_targets_strategy(),
	) {
		let runtime = Runtime::new().unwrap();
		let mut client = QueueClient::with_api("DESY", AcceptingKowalski::default());
		for name in &names {
			client.add_trigger_to_queue(name.as_str(), start, targets.clone()).unwrap();
		}

		let (report, listed) = runtime.block_on(async {
			let report = client.submit_queue().await;
			let listed = client.get_too_queues(true).await.unwrap();
			(report, listed)
		});

		prop_assert!(report.is_complete());
		prop_assert!(client.pending().is_empty());
		for name in &names {
			prop_assert!(report.accepted.contains(name));
			prop_assert!(listed.contains(name));
		}
	}
}
