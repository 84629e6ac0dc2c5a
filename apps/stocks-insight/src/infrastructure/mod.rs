//! Infrastructure Layer
//!
//! Adapters for the ports defined in the application layer, plus renderers
//! that turn domain values into files and terminal text.

pub mod http;
pub mod llm;
pub mod quotes;
pub mod render;
