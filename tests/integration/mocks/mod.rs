//! Mock implementations for testing purposes.
//!
//! - `InMemoryKowalski`: a stateful stand-in for the Kowalski trigger API


#[allow(unused_imports)]
pub use kowalski::*;
