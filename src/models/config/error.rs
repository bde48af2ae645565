//! Configuration error types.

use crate::utils::logging::error::{BoxedSource, ErrorContext, TraceableError};
use std::collections::HashMap;
use thiserror::Error as ThisError;

/// Represents errors that can occur while reading configuration from the environment
#[derive(ThisError, Debug)]
pub enum ConfigError {
	/// A required variable is unset or empty
	#[error("Missing configuration: {0}")]
	MissingVariable(ErrorContext),

	/// A variable is set but cannot be parsed
	#[error("Invalid configuration: {0}")]
	InvalidValue(ErrorContext),
}

impl ConfigError {
	// Missing variable; logged by the caller, which knows whether it is fatal
	pub fn missing_variable(name: &str) -> Self {
		Self::MissingVariable(ErrorContext::new(
			format!("{} is not set", name),
			None,
			Some(HashMap::from([("variable".to_string(), name.to_string())])),
		))
	}

	// Invalid value
	pub fn invalid_value(
		name: &str,
		msg: impl Into<String>,
		source: Option<BoxedSource>,
	) -> Self {
		Self::InvalidValue(ErrorContext::new(
			msg,
			source,
			Some(HashMap::from([("variable".to_string(), name.to_string())])),
		))
	}

	/// Name of the offending environment variable.
	pub fn variable(&self) -> Option<&str> {
		match self {
			Self::MissingVariable(ctx) | Self::InvalidValue(ctx) => ctx.metadata_value("variable"),
		}
	}
}

impl TraceableError for ConfigError {
	fn trace_id(&self) -> String {
		match self {
			Self::MissingVariable(ctx) => ctx.trace_id.clone(),
			Self::InvalidValue(ctx) => ctx.trace_id.clone(),
		}
	}
}
