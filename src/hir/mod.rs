//! High-level IR (HIR): resolution of definitions into a linked graph.
//!
//! This module turns lowered [`Definition`](crate::syntax::Definition)
//! records into resolved entities. Every phase after registration reads a
//! closed [`SymbolTable`] only, so phases that work per entity run on the
//! rayon pool and merge their results in handle order.
//!
//! ## Key Types
//!
//! - [`SymbolTableBuilder`] / [`SymbolTable`] - write phase / read phase of the name space
//! - [`DefId`] - Handle of a registered definition
//! - [`Reference`] - A by-name link, resolved or not
//! - [`ResolvedEntity`] - A fully resolved type, command, menu, table or form
//! - [`LoadResult`] - Resolved graph plus diagnostics; always produced
//!
//! ## Resolution Layers
//!
//! ```text
//! register(definition)      ← first name (and UUID) wins
//!     │
//!     ▼
//! close()                   ← no registration after this point
//!     │
//!     ▼
//! resolve_inheritance       ← ancestor chains, cycle detection
//!     │
//!     ▼
//! cascade_all               ← effective properties and attributes
//!     │
//!     ▼
//! link_all                  ← children, targets, type links
//!     │
//!     ▼
//! MenuGraph::build          ← menu cycles, roots, trees
//! ```

mod cascade;
mod diagnostics;
mod error;
mod graph;
mod ids;
mod inheritance;
mod linker;
mod load;
#[cfg(feature = "report")]
mod report;
mod resolved;
mod symbol_table;

pub use cascade::{AttributeSlot, Cascade, cascade_all, cascade_type};
pub use diagnostics::{Diagnostic, DiagnosticCollector, DiagnosticKind, Severity, codes};
pub use error::ResolveError;
pub use graph::{Cycle, MenuGraph, MenuTree, TreeNode};
pub use ids::DefId;
pub use inheritance::{Inheritance, resolve_inheritance};
pub use linker::{Links, link_all, link_entity, split_expand};
pub use load::{LoadResult, ResolvedGraph, resolve, resolve_with};
#[cfg(feature = "report")]
pub use report::to_json;
pub use resolved::{
    ExpandPath, Reference, ResolvedAttribute, ResolvedChild, ResolvedEntity, ResolvedTarget,
};
pub use symbol_table::{SymbolTable, SymbolTableBuilder};
