//! Bootstrap module for building a queue client at the program entry point.
//!
//! The environment is read exactly once here; everything below receives an explicit
//! [`KowalskiConfig`].

use std::error::Error;
use tracing::{debug, info};

use crate::{
	models::KowalskiConfig,
	services::queue::{QueueClient, QueueError},
};

/// Type alias for handling ServiceResult
pub type Result<T> = std::result::Result<T, Box<dyn Error + Send + Sync>>;

/// Reads `KOWALSKI_*` settings from the environment and builds an HTTP queue client.
///
/// # Errors
/// Returns `QueueError::Configuration` when a required variable is missing or malformed, before
/// any request is attempted.
pub fn initialize_client(user: &str) -> std::result::Result<QueueClient, QueueError> {
	let config = KowalskiConfig::from_env()?;
	debug!(base_url = %config.base_url, timeout = ?config.timeout, "Loaded Kowalski settings");
	let client = QueueClient::new(user, config)?;
	info!(user = %user, "Queue client ready");
	Ok(client)
}

/// Like [`initialize_client`], then verifies the token with one authenticated request.
pub async fn connect(user: &str) -> std::result::Result<QueueClient, QueueError> {
	let client = initialize_client(user)?;
	client.ping().await?;
	Ok(client)
}
