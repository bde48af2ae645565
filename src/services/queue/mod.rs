//! ToO queue service.
//!
//! - `builder`: trigger validation and assembly
//! - `client`: the stateful [`QueueClient`] driving Kowalski
//! - `error`: error types for queue operations

mod builder;
mod client;
mod error;

pub use builder::{validate_name, TriggerBuilder};
pub use client::{DeletionReport, QueueClient, QueueScope, DUPLICATE_IN_BATCH};
pub use error::{QueueError, RemoteErrorKind};
