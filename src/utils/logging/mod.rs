//! ## Sets up logging by reading configuration from environment variables.
//!
//! Environment variables used:
//! - LOG_MODE: "stdout" (default) or "file"
//! - LOG_LEVEL: log level ("trace", "debug", "info", "warn", "error"); default is "info"
//! - LOG_DATA_DIR: directory for log files; default is "logs/"

pub mod error;

use std::{env, fs::create_dir_all, path::PathBuf};
use tracing::info;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// File name the daily appender rolls, e.g. `ztf-too-queue.log.2026-10-19`.
pub const LOG_FILE_PREFIX: &str = "ztf-too-queue.log";

/// Logging settings resolved from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
	pub to_file: bool,
	pub level: tracing::Level,
	pub directory: PathBuf,
}

impl LogSettings {
	/// Reads `LOG_MODE`, `LOG_LEVEL` and `LOG_DATA_DIR`.
	pub fn from_env() -> Self {
		let log_mode = env::var("LOG_MODE").unwrap_or_else(|_| "stdout".to_string());
		let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
		let directory = env::var("LOG_DATA_DIR").unwrap_or_else(|_| "logs/".to_string());

		Self {
			to_file: log_mode.eq_ignore_ascii_case("file"),
			level: parse_level(&log_level),
			directory: PathBuf::from(directory),
		}
	}
}

/// Unknown levels fall back to `info`.
pub fn parse_level(level: &str) -> tracing::Level {
	match level.to_lowercase().as_str() {
		"trace" => tracing::Level::TRACE,
		"debug" => tracing::Level::DEBUG,
		"warn" => tracing::Level::WARN,
		"error" => tracing::Level::ERROR,
		_ => tracing::Level::INFO,
	}
}

fn create_log_format(with_ansi: bool) -> fmt::format::Format<fmt::format::Compact> {
	fmt::format()
		.with_level(true)
		.with_target(true)
		.with_thread_ids(false)
		.with_thread_names(false)
		.with_ansi(with_ansi)
		.compact()
}

/// Installs the global subscriber described by [`LogSettings::from_env`].
pub fn setup_logging() -> Result<(), Box<dyn std::error::Error>> {
	let settings = LogSettings::from_env();
	let subscriber =
		tracing_subscriber::registry().with(EnvFilter::new(settings.level.to_string()));

	if settings.to_file {
		create_dir_all(&settings.directory)?;
		let file_appender = tracing_appender::rolling::daily(&settings.directory, LOG_FILE_PREFIX);

		subscriber
			.with(
				fmt::layer()
					.event_format(create_log_format(false))
					.with_ansi(false)
					.with_writer(file_appender),
			)
			.try_init()?;
	} else {
		subscriber
			.with(fmt::layer().event_format(create_log_format(true)))
			.try_init()?;
	}

	info!(
		"Logging is configured (mode: {}, level: {})",
		if settings.to_file { "file" } else { "stdout" },
		settings.level
	);
	Ok(())
}
