//! Queue error types and handling.
//!
//! Provides the error type returned by trigger validation and by every
//! Kowalski queue operation.

use crate::{
	models::ConfigError,
	utils::logging::error::{BoxedSource, ErrorContext, TraceableError},
};
use reqwest::StatusCode;
use std::{collections::HashMap, fmt};
use thiserror::Error as ThisError;

/// What went wrong talking to Kowalski, detailed enough to decide on a retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteErrorKind {
	/// Connection refused, DNS failure, broken pipe
	Transport,
	/// No response within the configured timeout
	Timeout,
	/// 401 or 403: the token was refused
	Authentication,
	/// Any other non-success status without a usable body
	HttpStatus,
	/// The body could not be decoded
	MalformedResponse,
	/// The service answered with `status != "success"`
	Api,
}

impl RemoteErrorKind {
	/// Whether repeating the same request may succeed.
	pub fn is_transient(self) -> bool {
		matches!(self, Self::Transport | Self::Timeout | Self::HttpStatus)
	}
}

impl fmt::Display for RemoteErrorKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::Transport => "transport",
			Self::Timeout => "timeout",
			Self::Authentication => "authentication",
			Self::HttpStatus => "http status",
			Self::MalformedResponse => "malformed response",
			Self::Api => "api",
		};
		f.write_str(name)
	}
}

/// Represents errors that can occur during queue operations
#[derive(ThisError, Debug)]
pub enum QueueError {
	/// Required connection settings are missing or malformed
	#[error("Configuration error: {0}")]
	Configuration(ErrorContext),

	/// A trigger or target failed local validation; nothing was sent
	#[error("Validation error: {0}")]
	Validation(ErrorContext),

	/// The exchange with Kowalski failed
	#[error("Remote service error ({kind}): {context}")]
	RemoteService {
		kind: RemoteErrorKind,
		status: Option<StatusCode>,
		context: ErrorContext,
	},

	/// Kowalski does not know the named trigger
	#[error("Not found: {0}")]
	NotFound(ErrorContext),
}

impl QueueError {
	// Configuration error
	pub fn configuration_error(
		msg: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::Configuration(ErrorContext::new_with_log(msg, source, metadata))
	}

	// Validation error; not logged, the caller decides how loud a typo should be
	pub fn validation_error(field: &str, msg: impl Into<String>) -> Self {
		Self::Validation(
			ErrorContext::new(msg, None, None).with_metadata("field", field.to_string()),
		)
	}

	// Remote service error
	pub fn remote_error(
		kind: RemoteErrorKind,
		status: Option<StatusCode>,
		msg: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		let mut context = ErrorContext::new_with_log(msg, source, metadata);
		if let Some(status) = status {
			context = context.with_metadata("status", status.as_u16().to_string());
		}
		Self::RemoteService {
			kind,
			status,
			context,
		}
	}

	// Not found error
	pub fn not_found(
		msg: impl Into<String>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::NotFound(ErrorContext::new_with_log(msg, None, metadata))
	}

	/// Field that failed validation.
	pub fn invalid_field(&self) -> Option<&str> {
		match self {
			Self::Validation(ctx) => ctx.metadata_value("field"),
			_ => None,
		}
	}

	/// Category of a remote failure.
	pub fn remote_kind(&self) -> Option<RemoteErrorKind> {
		match self {
			Self::RemoteService { kind, .. } => Some(*kind),
			_ => None,
		}
	}

	/// HTTP status of a remote failure, when a response was received.
	pub fn status(&self) -> Option<StatusCode> {
		match self {
			Self::RemoteService { status, .. } => *status,
			_ => None,
		}
	}

	pub fn context(&self) -> &ErrorContext {
		match self {
			Self::Configuration(ctx) | Self::Validation(ctx) | Self::NotFound(ctx) => ctx,
			Self::RemoteService { context, .. } => context,
		}
	}
}

impl From<ConfigError> for QueueError {
	fn from(err: ConfigError) -> Self {
		let metadata = err
			.variable()
			.map(|v| HashMap::from([("variable".to_string(), v.to_string())]));
		Self::configuration_error(
			"Kowalski connection settings are incomplete",
			Some(Box::new(err)),
			metadata,
		)
	}
}

impl TraceableError for QueueError {
	fn trace_id(&self) -> String {
		self.context().trace_id.clone()
	}
}
