//! Domain models and data structures for ToO planning.
//!
//! - `config`: Kowalski connection settings
//! - `core`: targets, triggers, queue entries and submission outcomes
//! - `security`: credential storage

mod config;
mod core;
mod security;

pub use config::{
	ConfigError, KowalskiConfig, DEFAULT_PORT, DEFAULT_PROTOCOL, DEFAULT_TIMEOUT, ENV_API_TOKEN,
	ENV_HOST, ENV_PORT, ENV_PROTOCOL, ENV_TIMEOUT_SECS,
};

pub use core::{
	DeleteRequest, Filter, QueueEntry, QueueListing, RejectedTrigger, SubmissionReport,
	TooTarget, Trigger, TriggerRequest, TriggerStatus, ValidityWindow, DEFAULT_PROGRAM_ID,
	DEFAULT_PROGRAM_PI, DEFAULT_REQUEST_ID, DEFAULT_SUBPROGRAM, DEFAULT_WINDOW_DAYS,
	MAX_EXPOSURE_TIME, PROGRAM_IDS, QUEUE_TYPE_LIST,
};

pub use security::SecretString;
