//! Utility modules for common functionality.
//!
//! - logging: Logging setup and error context
//! - naming: Trigger and alert naming conventions
//! - time: MJD and ISO time conversions
//! - tests: Test utilities

pub mod logging;
pub mod naming;
pub mod tests;
pub mod time;

pub use naming::*;
pub use time::*;
