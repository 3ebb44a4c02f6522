//! Foundation types for the metadata engine.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`SourceId`] - Identifier of one input source (file or in-memory text)
//! - [`Position`], [`Span`] - Line/column positions for definitions and diagnostics
//! - [`LineIndex`] - Byte offset to line/column conversion
//! - [`Name`] - Entity and property names
//! - Domain constants (file extension, target property keys)
//!
//! This module has NO dependencies on other crate modules.

pub mod constants;
mod line_index;
mod position;
mod source_id;

pub use line_index::LineIndex;
pub use position::{Origin, Position, Span};
pub use source_id::SourceId;

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};

/// Name of an entity, attribute or property.
///
/// Names are short and compared often; `SmolStr` keeps them inline and
/// makes clones cheap.
pub type Name = smol_str::SmolStr;
