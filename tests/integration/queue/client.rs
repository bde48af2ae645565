use ztf_too_queue::{
	models::{QueueListing, TooTarget, TriggerStatus, ValidityWindow},
	services::queue::{QueueClient, QueueError, DUPLICATE_IN_BATCH},
	utils::tests::{queue_entry::QueueEntryBuilder, target::TargetBuilder},
};

use crate::integration::mocks::InMemoryKowalski;

const IC220513A_START: f64 = 59719.309333333334;

fn create_test_client() -> QueueClient<InMemoryKowalski> {
	QueueClient::with_api("DESY", InMemoryKowalski::new())
}

fn ic220513a_targets() -> Vec<TooTarget> {
	vec![TooTarget::new(427, 1, 300)]
}

#[tokio::test]
async fn test_ic220513a_submit_list_delete() {
	let mut client = create_test_client();

	client
		.add_trigger_to_queue("ToO_IC220513A_test", IC220513A_START, ic220513a_targets())
		.unwrap();
	let report = client.submit_queue().await;

	assert_eq!(report.accepted, vec!["ToO_IC220513A_test".to_string()]);
	assert!(report.is_complete());
	assert!(client.pending().is_empty());

	let names = client.get_too_queues(true).await.unwrap();
	assert!(names.contains("ToO_IC220513A_test"));

	client.delete_trigger("ToO_IC220513A_test").await.unwrap();
	assert_eq!(
		client.status_of("ToO_IC220513A_test"),
		Some(&TriggerStatus::Deleted)
	);

	let names = client.get_too_queues(true).await.unwrap();
	assert!(!names.contains("ToO_IC220513A_test"));
	assert!(names.is_empty());
}

#[tokio::test]
async fn test_submitted_triggers_listed_by_name() {
	let mut client = create_test_client();
	let names = ["ToO_IC220513A_427", "ToO_IC220513A_428", "ToO_IC220513A_429"];
	for (i, name) in names.iter().enumerate() {
		let target = TargetBuilder::new().field_id(427 + i as u32).build();
		client
			.add_trigger_to_queue(*name, IC220513A_START, vec![target])
			.unwrap();
	}

	let report = client.submit_queue().await;
	let listed = client.get_too_queues(true).await.unwrap();

	assert!(client.pending().is_empty());
	for name in names {
		assert!(report.accepted.iter().any(|a| a == name));
		assert!(listed.contains(name));
	}
}

#[tokio::test]
async fn test_submit_empty_batch_is_noop() {
	let mut client = create_test_client();

	let report = client.submit_queue().await;

	assert!(report.accepted.is_empty());
	assert!(report.rejected.is_empty());
	assert_eq!(client.api().calls(), 0);
}

#[tokio::test]
async fn test_duplicate_names_in_one_batch() {
	let mut client = create_test_client();
	client
		.add_trigger_to_queue("ToO_dup", IC220513A_START, ic220513a_targets())
		.unwrap();
	client
		.add_trigger_to_queue("ToO_dup", IC220513A_START + 1.0, ic220513a_targets())
		.unwrap();

	let report = client.submit_queue().await;

	assert_eq!(report.accepted, vec!["ToO_dup".to_string()]);
	assert_eq!(report.rejected.len(), 1);
	assert_eq!(report.rejected[0].name, "ToO_dup");
	assert_eq!(report.rejected[0].reason, DUPLICATE_IN_BATCH);
	assert_eq!(client.api().calls(), 1);
}

#[tokio::test]
async fn test_name_collision_with_active_queue_is_reported() {
	let mut client = create_test_client();
	client
		.api()
		.seed(QueueEntryBuilder::new().queue_name("ToO_taken").build());
	client
		.add_trigger_to_queue("ToO_taken", IC220513A_START, ic220513a_targets())
		.unwrap();
	client
		.add_trigger_to_queue("ToO_free", IC220513A_START, ic220513a_targets())
		.unwrap();

	let report = client.submit_queue().await;

	assert_eq!(report.accepted, vec!["ToO_free".to_string()]);
	let rejection = report.rejection_for("ToO_taken").unwrap();
	assert!(rejection.reason.contains("already exists"));
	assert!(matches!(
		client.status_of("ToO_taken"),
		Some(TriggerStatus::Rejected(_))
	));
}

#[tokio::test]
async fn test_unknown_field_rejected_remotely() {
	let mut client = QueueClient::with_api("DESY", InMemoryKowalski::with_unknown_fields([99999]));
	client
		.add_trigger_to_queue(
			"ToO_far_away",
			IC220513A_START,
			vec![TooTarget::new(99999, 2, 30)],
		)
		.unwrap();

	let report = client.submit_queue().await;

	assert!(report.accepted.is_empty());
	assert!(report
		.rejection_for("ToO_far_away")
		.unwrap()
		.reason
		.contains("99999"));
}

#[tokio::test]
async fn test_rejected_trigger_can_be_added_again() {
	let mut client = create_test_client();
	client
		.add_trigger_to_queue("ToO_retry", IC220513A_START, ic220513a_targets())
		.unwrap();
	client
		.add_trigger_to_queue("ToO_retry", IC220513A_START, ic220513a_targets())
		.unwrap();
	let _ = client.submit_queue().await;
	client.delete_trigger("ToO_retry").await.unwrap();

	client
		.add_trigger_to_queue("ToO_retry", IC220513A_START, ic220513a_targets())
		.unwrap();
	let report = client.submit_queue().await;

	assert_eq!(report.accepted, vec!["ToO_retry".to_string()]);
	assert_eq!(client.status_of("ToO_retry"), Some(&TriggerStatus::Submitted));
	assert_eq!(client.triggers().len(), 3);
}

#[tokio::test]
async fn test_delete_absent_trigger_is_not_found() {
	let mut client = create_test_client();

	let err = client.delete_trigger("ToO_never_submitted").await.unwrap_err();

	assert!(matches!(err, QueueError::NotFound(_)));
}

#[tokio::test]
async fn test_delete_twice_is_not_found() {
	let mut client = create_test_client();
	client
		.add_trigger_to_queue("ToO_once", IC220513A_START, ic220513a_targets())
		.unwrap();
	let _ = client.submit_queue().await;

	client.delete_trigger("ToO_once").await.unwrap();
	let err = client.delete_trigger("ToO_once").await.unwrap_err();

	assert!(matches!(err, QueueError::NotFound(_)));
	assert_eq!(client.status_of("ToO_once"), Some(&TriggerStatus::Deleted));
}

#[tokio::test]
async fn test_validation_failure_never_reaches_service() {
	let mut client = create_test_client();

	let err = client
		.add_trigger_to_queue("ToO_bad", IC220513A_START, vec![TooTarget::new(427, 5, 300)])
		.unwrap_err();
	let report = client.submit_queue().await;

	assert_eq!(err.invalid_field(), Some("filter_id"));
	assert!(report.is_empty());
	assert_eq!(client.api().calls(), 0);
}

#[tokio::test]
async fn test_explicit_window_is_submitted() {
	let mut client = create_test_client();
	let window = ValidityWindow::new(59702.399305555555, 59702.42638888889);
	client
		.add_trigger_with_window("TEST_0", window, vec![TooTarget::new(593, 1, 300)])
		.unwrap();

	let _ = client.submit_queue().await;
	let queues = client.get_all_queues().await.unwrap();

	assert_eq!(queues.len(), 1);
	assert_eq!(queues[0].window(), Some((59702.399305555555, 59702.42638888889)));
	assert!(client.get_too_queues(true).await.unwrap().contains("TEST_0"));
}

#[tokio::test]
async fn test_test_prefixed_trigger_submit_list_delete() {
	let mut client = create_test_client();
	client
		.add_trigger_to_queue("TEST_IC220513A", IC220513A_START, ic220513a_targets())
		.unwrap();

	let report = client.submit_queue().await;
	assert_eq!(report.accepted, vec!["TEST_IC220513A".to_string()]);

	let names = client.get_too_queues(true).await.unwrap();
	assert_eq!(names, QueueListing::Names(vec!["TEST_IC220513A".to_string()]));

	client.delete_trigger("TEST_IC220513A").await.unwrap();
	assert!(client.get_too_queues(true).await.unwrap().is_empty());
	assert_eq!(client.status_of("TEST_IC220513A"), Some(&TriggerStatus::Deleted));
}

#[tokio::test]
async fn test_delete_unprefixed_absent_name_is_not_found() {
	let mut client = create_test_client();

	let err = client.delete_trigger("IC220513A_followup").await.unwrap_err();

	assert!(matches!(err, QueueError::NotFound(_)));
	assert_eq!(client.api().calls(), 1);
}

#[tokio::test]
async fn test_delete_unprefixed_remote_queue() {
	let mut client = create_test_client();
	client
		.api()
		.seed(QueueEntryBuilder::new().queue_name("IC220513A_followup").build());

	client.delete_trigger("IC220513A_followup").await.unwrap();

	assert!(client.api().queue_names().is_empty());
}

#[tokio::test]
async fn test_summaries_and_full_entries() {
	let mut client = create_test_client();
	client
		.add_trigger_to_queue("ToO_IC220513A_test", IC220513A_START, ic220513a_targets())
		.unwrap();
	let _ = client.submit_queue().await;

	let summaries = client.get_too_queue_summaries().await.unwrap();
	assert_eq!(summaries.len(), 1);
	assert!(summaries[0].starts_with("ToO_IC220513A_test: 2022-05-20 07:25 UT"));
	assert!(summaries[0].contains("window length: 1440 min"));
	assert!(summaries[0].contains("exp: 300s"));
	assert!(summaries[0].contains("field: 427"));

	match client.get_too_queues(false).await.unwrap() {
		QueueListing::Entries(entries) => {
			assert_eq!(entries.len(), 1);
			assert_eq!(entries[0].user.as_deref(), Some("DESY"));
		}
		other => panic!("expected entries, got {:?}", other),
	}
}

#[tokio::test]
async fn test_delete_submitted_cleans_up_session() {
	let mut client = create_test_client();
	client
		.add_trigger_to_queue("ToO_a", IC220513A_START, ic220513a_targets())
		.unwrap();
	client
		.add_trigger_to_queue("ToO_b", IC220513A_START, ic220513a_targets())
		.unwrap();
	let _ = client.submit_queue().await;

	let report = client.delete_submitted().await;

	assert!(report.is_complete());
	assert_eq!(report.deleted, vec!["ToO_a".to_string(), "ToO_b".to_string()]);
	assert!(client.api().queue_names().is_empty());
}
