//! Shared HTTP plumbing for the provider adapters.
//!
//! One `reqwest` client per adapter, built with the configured timeout.
//! Every call is a single attempt.

mod client;
mod error;

pub use client::JsonHttpClient;
pub use error::HttpError;
