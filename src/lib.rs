//! # uimeta-base
//!
//! Core library for loading declarative UI metadata: types, commands, menus,
//! tables and forms, defined by name and linked by name.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! project   → Source sets, file loading, ConfigHost (atomic reload)
//!   ↓
//! hir       → Symbol table, inheritance, cascade, linking, menu graph
//!   ↓
//! syntax    → Statement model, Definition records, lowering
//!   ↓
//! parser    → Logos lexer, recursive-descent parser
//!   ↓
//! config    → LoadOptions
//!   ↓
//! base      → Primitives (SourceId, Name, Span/Position, LineIndex)
//! ```
//!
//! ## Quick start
//!
//! ```ignore
//! use uimeta::{LoadOptions, project};
//!
//! let result = project::load_path("definitions/", &LoadOptions::default())?;
//! for diagnostic in result.diagnostics() {
//!     eprintln!("{diagnostic}");
//! }
//! let main = result.get("Main_Menu");
//! ```

// ============================================================================
// MODULES (dependency order: base → config → parser → syntax → hir → project)
// ============================================================================

/// Foundation types: SourceId, Name, Span/Position, LineIndex
pub mod base;

/// Load options
pub mod config;

/// Parser: Logos lexer, recursive-descent parser
pub mod parser;

/// Syntax: statement model, definition records, lowering
pub mod syntax;

/// High-level IR: resolution into a linked graph
pub mod hir;

/// Project loading: source sets, ConfigHost
pub mod project;

// Re-export foundation types
pub use base::{LineIndex, Name, Origin, Position, SourceId, Span, TextRange, TextSize};
pub use config::LoadOptions;

// Re-export the load surface
pub use hir::{
    DefId, Diagnostic, DiagnosticKind, LoadResult, Reference, ResolvedEntity, ResolvedGraph,
    Severity,
};
pub use project::{ConfigHost, LoadError, SourceSet};
pub use syntax::{Definition, DefinitionBlock, DefinitionKind};
