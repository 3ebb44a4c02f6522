//! Definition record model.
//!
//! - [`DefinitionBlock`] / [`Statement`] - the abstract statement list the
//!   engine consumes, independent of any textual syntax
//! - [`Definition`] - one lowered, still unresolved definition record
//! - [`lower_block`] - statement list → definition record

mod definition;
mod kind;
mod lower;
mod statement;

pub use definition::{AttributeDefinition, AttributeType, ChildDecl, Definition, TargetSpec};
pub use kind::{ChildKind, DefinitionKind};
pub use lower::{StatementError, lower_block};
pub use statement::{AttributeBlock, AttributeStatement, DefinitionBlock, Statement};

// Re-export Position and Span from base for convenience
pub use crate::base::{Origin, Position, Span};
