//! Recursive-descent parser for definition files
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens (trivia skipped)
//!     ↓
//! Parser → DefinitionBlock list + ParseErrors
//!     ↓
//! Lowering (syntax) → Definition records
//! ```
//!
//! The parser recovers at statement and block boundaries, so one broken
//! statement never costs more than that statement, and one broken block
//! header never costs more than that block.

mod errors;
mod lexer;
#[allow(clippy::module_inception)]
mod parser;

pub use errors::ParseError;
pub use lexer::{Lexer, Token, TokenKind, tokenize};
pub use parser::{Parse, parse};
