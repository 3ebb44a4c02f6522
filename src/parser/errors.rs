//! Parse error types

use thiserror::Error;

use crate::base::Span;

/// An error found while parsing a definition file.
///
/// Syntax errors come from malformed token sequences; statement errors from
/// well-formed calls the engine does not know how to apply.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected {expected}, found {found}")]
    Unexpected {
        expected: &'static str,
        found: String,
        span: Span,
    },

    #[error("expected {expected}, found end of file")]
    UnexpectedEof { expected: &'static str, span: Span },

    #[error("unknown definition kind '{keyword}'")]
    UnknownKind { keyword: String, span: Span },

    #[error("unknown statement '{name}'")]
    UnknownStatement { name: String, span: Span },

    #[error("'{name}' expects {expected}")]
    BadArguments {
        name: String,
        expected: &'static str,
        span: Span,
    },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::Unexpected { span, .. }
            | ParseError::UnexpectedEof { span, .. }
            | ParseError::UnknownKind { span, .. }
            | ParseError::UnknownStatement { span, .. }
            | ParseError::BadArguments { span, .. } => *span,
        }
    }

    /// True for well-formed calls that are not valid statements, as opposed
    /// to malformed syntax.
    pub fn is_statement_error(&self) -> bool {
        matches!(
            self,
            ParseError::UnknownStatement { .. } | ParseError::BadArguments { .. }
        )
    }
}
