//! Port Interfaces
//!
//! Driven (outbound) ports implemented by infrastructure adapters:
//!
//! - `QuoteSourcePort`: one GET against a quotes provider, returning the raw payload
//! - `TextGenerationPort`: one prompt submitted to a hosted model

mod quote_source_port;
mod text_generation_port;

pub use quote_source_port::{QuoteSourceError, QuoteSourcePort};
pub use text_generation_port::{GenerationError, TextGenerationPort};
