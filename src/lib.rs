//! Client for the ZTF Target-of-Opportunity queue.
//!
//! Builds ToO triggers (named observation requests over ZTF sky fields), validates them locally
//! and submits, lists and deletes them through the Kowalski API.
//!
//! # Module Structure
//!
//! - `bootstrap`: Builds a client from the environment
//! - `models`: Targets, triggers, queue entries and connection settings
//! - `services`: The Kowalski transport and the queue client
//! - `utils`: Logging, time conversions and naming helpers

pub mod bootstrap;
pub mod models;
pub mod services;
pub mod utils;
