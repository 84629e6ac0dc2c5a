//! Application Layer
//!
//! Ports for the external providers, the two user-triggered use cases, and
//! the per-user session state that holds the last fetch.

pub mod ports;
pub mod session;
pub mod use_cases;

pub use session::Session;
