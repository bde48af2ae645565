//! Security models
//!
//! - `secret`: zeroizing storage for credentials

mod secret;

pub use secret::SecretString;
