//! Configuration models.
//!
//! - `kowalski`: connection settings read from the environment
//! - `error`: configuration errors

mod error;
mod kowalski;

pub use error::ConfigError;
pub use kowalski::{
	KowalskiConfig, DEFAULT_PORT, DEFAULT_PROTOCOL, DEFAULT_TIMEOUT, ENV_API_TOKEN, ENV_HOST,
	ENV_PORT, ENV_PROTOCOL, ENV_TIMEOUT_SECS,
};
