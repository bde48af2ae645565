//! Core services implementing the business logic.
//!
//! - `kowalski`: Kowalski API contract and its HTTP implementation
//! - `queue`: trigger validation and the stateful queue client

pub mod kowalski;
pub mod queue;
