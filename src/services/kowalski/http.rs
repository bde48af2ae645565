//! HTTP implementation of [`KowalskiApi`].
//!
//! One authenticated request per call, bounded by the configured timeout. No retry middleware
//! is installed; retrying is left to the caller.

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use std::{collections::HashMap, time::Duration};
use tracing::debug;
use url::Url;

use crate::{
	models::{DeleteRequest, KowalskiConfig, QueueEntry, TriggerRequest},
	services::{
		kowalski::api::{ApiResponse, KowalskiApi, SubmitOutcome, TRIGGERS_PATH},
		queue::{QueueError, RemoteErrorKind},
	},
	utils::logging::error::BoxedSource,
};

/// Connection establishment never waits longer than this, even with a long request timeout.
const MAX_CONNECT_TIMEOUT: Duration = Duration::from_secs(20);

/// Kowalski client over reqwest.
#[derive(Debug, Clone)]
pub struct HttpKowalskiClient {
	client: reqwest::Client,
	config: KowalskiConfig,
	triggers_url: Url,
}

impl HttpKowalskiClient {
	/// Builds the underlying HTTP client; fails only on an unusable configuration.
	pub fn new(config: KowalskiConfig) -> Result<Self, QueueError> {
		let triggers_url = config.endpoint(TRIGGERS_PATH).map_err(|e| {
			QueueError::configuration_error(
				format!("Cannot derive the trigger endpoint from {}", config.base_url),
				Some(Box::new(e)),
				None,
			)
		})?;

		let client = reqwest::ClientBuilder::new()
			.timeout(config.timeout)
			.connect_timeout(config.timeout.min(MAX_CONNECT_TIMEOUT))
			.build()
			.map_err(|e| {
				QueueError::configuration_error(
					"Failed to create HTTP client",
					Some(Box::new(e)),
					None,
				)
			})?;

		Ok(Self {
			client,
			config,
			triggers_url,
		})
	}

	pub fn config(&self) -> &KowalskiConfig {
		&self.config
	}

	/// Sends one request and returns the status and raw body.
	async fn send<B: Serialize + ?Sized>(
		&self,
		method: Method,
		url: Url,
		body: Option<&B>,
	) -> Result<(StatusCode, String), QueueError> {
		let mut request = self
			.client
			.request(method.clone(), url.clone())
			.bearer_auth(self.config.token.as_str());
		if let Some(body) = body {
			request = request.json(body);
		}

		let metadata = HashMap::from([
			("method".to_string(), method.to_string()),
			("url".to_string(), url.to_string()),
		]);

		let response = request
			.send()
			.await
			.map_err(|e| transport_error(e, metadata.clone()))?;
		let status = response.status();
		let text = response
			.text()
			.await
			.map_err(|e| transport_error(e, metadata.clone()))?;

		debug!(%method, %url, %status, body = %text, "Kowalski response");

		if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
			return Err(QueueError::remote_error(
				RemoteErrorKind::Authentication,
				Some(status),
				"Kowalski refused the API token",
				None,
				Some(metadata),
			));
		}

		Ok((status, text))
	}
}

fn transport_error(err: reqwest::Error, metadata: HashMap<String, String>) -> QueueError {
	let (kind, msg) = if err.is_timeout() {
		(RemoteErrorKind::Timeout, "Request to Kowalski timed out")
	} else {
		(RemoteErrorKind::Transport, "Failed to reach Kowalski")
	};
	QueueError::remote_error(kind, err.status(), msg, Some(Box::new(err)), Some(metadata))
}

/// Decodes the response envelope; `None` when the body is not one.
fn parse_envelope(body: &str) -> Option<ApiResponse> {
	serde_json::from_str::<ApiResponse>(body).ok()
}

fn malformed(status: StatusCode, what: &str, source: Option<serde_json::Error>) -> QueueError {
	QueueError::remote_error(
		RemoteErrorKind::MalformedResponse,
		Some(status),
		format!("Kowalski returned an unreadable {} response", what),
		source.map(|e| Box::new(e) as BoxedSource),
		None,
	)
}

fn unexpected_status(status: StatusCode, what: &str) -> QueueError {
	QueueError::remote_error(
		RemoteErrorKind::HttpStatus,
		Some(status),
		format!("Kowalski {} request failed with status {}", what, status),
		None,
		None,
	)
}

fn api_error(status: StatusCode, what: &str, response: &ApiResponse) -> QueueError {
	QueueError::remote_error(
		RemoteErrorKind::Api,
		Some(status),
		format!("Kowalski {} call failed: {}", what, response.reason()),
		None,
		None,
	)
}

fn mentions_missing_queue(message: &str) -> bool {
	let message = message.to_lowercase();
	message.contains("not found") || message.contains("does not exist")
}

#[async_trait]
impl KowalskiApi for HttpKowalskiClient {
	async fn ping(&self) -> Result<(), QueueError> {
		let (status, _) = self
			.send::<()>(Method::GET, self.config.base_url.clone(), None)
			.await?;
		if status.is_success() {
			Ok(())
		} else {
			Err(unexpected_status(status, "ping"))
		}
	}

	async fn submit_trigger(&self, request: &TriggerRequest) -> Result<SubmitOutcome, QueueError> {
		let (status, body) = self
			.send(Method::PUT, self.triggers_url.clone(), Some(request))
			.await?;

		if status.is_server_error() {
			return Err(unexpected_status(status, "submit"));
		}

		match parse_envelope(&body) {
			Some(response) if status.is_success() && response.is_success() => {
				Ok(SubmitOutcome::Accepted)
			}
			Some(response) if status.is_success() || status.is_client_error() => {
				Ok(SubmitOutcome::Rejected(response.reason()))
			}
			Some(_) => Err(unexpected_status(status, "submit")),
			None if status.is_success() => Err(malformed(status, "submit", None)),
			None => Err(unexpected_status(status, "submit")),
		}
	}

	async fn list_queues(&self) -> Result<Vec<QueueEntry>, QueueError> {
		let (status, body) = self
			.send::<()>(Method::GET, self.triggers_url.clone(), None)
			.await?;

		let response = match parse_envelope(&body) {
			Some(response) => response,
			None if status.is_success() => return Err(malformed(status, "list", None)),
			None => return Err(unexpected_status(status, "list")),
		};
		if !status.is_success() || !response.is_success() {
			return Err(api_error(status, "list", &response));
		}

		match response.data {
			serde_json::Value::Null => Ok(Vec::new()),
			data => serde_json::from_value(data).map_err(|e| malformed(status, "list", Some(e))),
		}
	}

	async fn delete_queue(&self, request: &DeleteRequest) -> Result<(), QueueError> {
		let (status, body) = self
			.send(Method::DELETE, self.triggers_url.clone(), Some(request))
			.await?;
		let not_found = || {
			QueueError::not_found(
				format!("Kowalski has no queue named {}", request.queue_name),
				Some(HashMap::from([(
					"trigger".to_string(),
					request.queue_name.clone(),
				)])),
			)
		};

		if status == StatusCode::NOT_FOUND {
			return Err(not_found());
		}

		match parse_envelope(&body) {
			Some(response) if status.is_success() && response.is_success() => Ok(()),
			Some(response) if mentions_missing_queue(&response.reason()) => Err(not_found()),
			Some(response) => Err(api_error(status, "delete", &response)),
			None if status.is_success() => Err(malformed(status, "delete", None)),
			None => Err(unexpected_status(status, "delete")),
		}
	}
}
