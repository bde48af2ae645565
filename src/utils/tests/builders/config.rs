//! Test helper utilities for Kowalski connection settings

use std::time::Duration;
use url::Url;

use crate::models::{KowalskiConfig, SecretString};

/// Token used by every test configuration.
pub const TEST_TOKEN: &str = "test-kowalski-token";

/// Settings pointing at `base_url` with [`TEST_TOKEN`] and a short timeout.
///
/// Panics on an unparsable URL; test use only.
pub fn test_config(base_url: &str) -> KowalskiConfig {
	let url = Url::parse(base_url).expect("test base URL must parse");
	KowalskiConfig::new(url, SecretString::new(TEST_TOKEN.to_string()))
		.with_timeout(Duration::from_secs(5))
}
