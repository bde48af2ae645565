//! Core domain models.
//!
//! - `target`: one exposure of a sky field (`TooTarget`, `Filter`)
//! - `trigger`: a named ToO request, its validity window, status and wire payloads
//! - `queue_entry`: server-side queue snapshots and listings
//! - `submission`: per-trigger outcome of a submission

mod queue_entry;
mod submission;
mod target;
mod trigger;

pub use queue_entry::{QueueEntry, QueueListing};
pub use submission::{RejectedTrigger, SubmissionReport};
pub use target::{
	Filter, TooTarget, DEFAULT_PROGRAM_ID, DEFAULT_PROGRAM_PI, DEFAULT_REQUEST_ID,
	DEFAULT_SUBPROGRAM, MAX_EXPOSURE_TIME, PROGRAM_IDS,
};
pub use trigger::{
	DeleteRequest, Trigger, TriggerRequest, TriggerStatus, ValidityWindow, DEFAULT_WINDOW_DAYS,
	QUEUE_TYPE_LIST,
};
