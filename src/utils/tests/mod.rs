//! Test helper utilities
//!
//! - `builders`: builders for test instances of targets, queue entries and connection settings

pub mod builders {
	pub mod config;
	pub mod queue_entry;
	pub mod target;
}

pub use builders::*;
