//! Shared domain types.

mod errors;
mod symbol;

pub use errors::DomainError;
pub use symbol::{OTHER_CHOICE, POPULAR_SYMBOLS, Symbol, SymbolChoice};
