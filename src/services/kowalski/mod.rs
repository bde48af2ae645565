//! Kowalski API access.
//!
//! - `api`: the [`KowalskiApi`] trait, response envelope and submission outcome
//! - `http`: reqwest implementation

mod api;
mod http;

pub use api::{ApiResponse, KowalskiApi, SubmitOutcome, TRIGGERS_PATH};
pub use http::HttpKowalskiClient;
