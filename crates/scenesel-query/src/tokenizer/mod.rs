//! Selector tokenizer module.

/// Selector token types.
pub mod token;
/// Selector tokenizer implementation.
#[allow(clippy::module_inception)]
pub mod tokenizer;

pub use token::Token;
pub use tokenizer::{SelectorTokenizer, tokenize};
