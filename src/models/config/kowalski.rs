//! Connection settings for the Kowalski API.

use std::{env, time::Duration};
use url::Url;

use crate::models::{config::error::ConfigError, security::SecretString};

pub const ENV_HOST: &str = "KOWALSKI_HOST";
pub const ENV_API_TOKEN: &str = "KOWALSKI_API_TOKEN";
pub const ENV_PROTOCOL: &str = "KOWALSKI_PROTOCOL";
pub const ENV_PORT: &str = "KOWALSKI_PORT";
pub const ENV_TIMEOUT_SECS: &str = "KOWALSKI_TIMEOUT_SECS";

pub const DEFAULT_PROTOCOL: &str = "https";
pub const DEFAULT_PORT: u16 = 443;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where and how to reach Kowalski.
#[derive(Debug, Clone, PartialEq)]
pub struct KowalskiConfig {
	/// Scheme, host and port of the service
	pub base_url: Url,
	/// Bearer token
	pub token: SecretString,
	/// Upper bound for one request, connection included
	pub timeout: Duration,
}

impl KowalskiConfig {
	pub fn new(base_url: Url, token: SecretString) -> Self {
		Self {
			base_url,
			token,
			timeout: DEFAULT_TIMEOUT,
		}
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	/// Reads the process environment once.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|key| env::var(key).ok())
	}

	/// Builds the configuration from an arbitrary variable source.
	///
	/// `KOWALSKI_HOST` and `KOWALSKI_API_TOKEN` are required; a host containing `://` is used
	/// as the full base URL, otherwise it is combined with `KOWALSKI_PROTOCOL` and
	/// `KOWALSKI_PORT`.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let read = |key: &str| {
			lookup(key)
				.map(|v| v.trim().to_string())
				.filter(|v| !v.is_empty())
		};

		let host = read(ENV_HOST).ok_or_else(|| ConfigError::missing_variable(ENV_HOST))?;
		let token =
			read(ENV_API_TOKEN).ok_or_else(|| ConfigError::missing_variable(ENV_API_TOKEN))?;

		let raw_url = if host.contains("://") {
			host
		} else {
			let protocol = read(ENV_PROTOCOL).unwrap_or_else(|| DEFAULT_PROTOCOL.to_string());
			let port = match read(ENV_PORT) {
				Some(port) => port.parse::<u16>().map_err(|e| {
					ConfigError::invalid_value(
						ENV_PORT,
						format!("{} must be a port number, got '{}'", ENV_PORT, port),
						Some(Box::new(e)),
					)
				})?,
				None => DEFAULT_PORT,
			};
			format!("{}://{}:{}", protocol, host, port)
		};

		let base_url = Url::parse(&raw_url).map_err(|e| {
			ConfigError::invalid_value(
				ENV_HOST,
				format!("'{}' is not a valid Kowalski address", raw_url),
				Some(Box::new(e)),
			)
		})?;

		let timeout = match read(ENV_TIMEOUT_SECS) {
			Some(secs) => match secs.parse::<u64>() {
				Ok(secs) if secs > 0 => Duration::from_secs(secs),
				_ => {
					return Err(ConfigError::invalid_value(
						ENV_TIMEOUT_SECS,
						format!(
							"{} must be a positive number of seconds, got '{}'",
							ENV_TIMEOUT_SECS, secs
						),
						None,
					))
				}
			},
			None => DEFAULT_TIMEOUT,
		};

		Ok(Self {
			base_url,
			token: SecretString::new(token),
			timeout,
		})
	}

	/// Absolute URL of `path` on the service.
	pub fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
		self.base_url.join(path)
	}
}
