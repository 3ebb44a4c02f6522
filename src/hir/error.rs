//! Resolution error taxonomy.
//!
//! Every variant is recoverable: the pipeline turns it into a
//! [`Diagnostic`](super::Diagnostic) and keeps going.

use thiserror::Error;
use uuid::Uuid;

use super::diagnostics::{DiagnosticKind, Severity};
use crate::base::Name;
use crate::syntax::{ChildKind, DefinitionKind};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// A second definition with an already registered name. The first stands.
    #[error("duplicate definition: '{name}' is already defined as a {existing}")]
    DuplicateName {
        name: Name,
        kind: DefinitionKind,
        existing: DefinitionKind,
    },

    /// A second definition with an already registered UUID. The first stands.
    #[error("duplicate UUID {uuid} on '{name}': already used by '{owner}'")]
    DuplicateUuid { name: Name, uuid: Uuid, owner: Name },

    #[error("unresolved parent type '{parent}' of '{name}'")]
    UnresolvedParent { name: Name, parent: Name },

    /// `name` is one of the members of an inheritance cycle.
    #[error("cyclic inheritance: {}", render_cycle(.cycle))]
    CyclicInheritance { name: Name, cycle: Vec<Name> },

    /// `name` is not on the cycle, but its ancestor chain runs into one.
    #[error("ancestor chain of '{name}' runs into cyclic inheritance: {}", render_cycle(.cycle))]
    InheritsCycle { name: Name, cycle: Vec<Name> },

    #[error("duplicate attribute '{attribute}' on '{name}': already declared by '{declared_by}'")]
    DuplicateAttribute {
        name: Name,
        attribute: Name,
        declared_by: Name,
    },

    #[error("unresolved reference '{target}' in {field} of '{name}'")]
    UnresolvedReference {
        name: Name,
        field: String,
        target: Name,
    },

    #[error("link attribute '{attribute}' of '{name}' declares no type link")]
    MissingTypeLink { name: Name, attribute: Name },

    #[error("type mismatch in {field} of '{name}': '{target}' is a {found}, expected {expected}")]
    TypeMismatch {
        name: Name,
        field: String,
        target: Name,
        expected: &'static str,
        found: DefinitionKind,
    },

    /// Child declared with the wrong ref kind; still linked.
    #[error("{field} of '{name}' is declared as {} but '{target}' is a {found}", .declared.keyword())]
    ChildRefKindMismatch {
        name: Name,
        field: String,
        target: Name,
        declared: ChildKind,
        found: DefinitionKind,
    },

    #[error("cyclic menu graph: {}", render_cycle(.cycle))]
    CyclicMenuGraph { name: Name, cycle: Vec<Name> },

    /// Malformed source text; `name` is the source's display name.
    #[error("{message}")]
    Syntax { name: Name, message: String },

    #[error("invalid statement in '{name}': {message}")]
    InvalidStatement { name: Name, message: String },
}

/// `A -> B -> A`
fn render_cycle(cycle: &[Name]) -> String {
    let mut parts: Vec<&str> = cycle.iter().map(Name::as_str).collect();
    if let Some(first) = cycle.first() {
        parts.push(first.as_str());
    }
    parts.join(" -> ")
}

impl ResolveError {
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            ResolveError::DuplicateName { .. } => DiagnosticKind::DuplicateName,
            ResolveError::DuplicateUuid { .. } => DiagnosticKind::DuplicateUuid,
            ResolveError::UnresolvedParent { .. } => DiagnosticKind::UnresolvedParent,
            ResolveError::CyclicInheritance { .. } | ResolveError::InheritsCycle { .. } => {
                DiagnosticKind::CyclicInheritance
            }
            ResolveError::DuplicateAttribute { .. } => DiagnosticKind::DuplicateAttribute,
            ResolveError::UnresolvedReference { .. } | ResolveError::MissingTypeLink { .. } => {
                DiagnosticKind::UnresolvedReference
            }
            ResolveError::TypeMismatch { .. } | ResolveError::ChildRefKindMismatch { .. } => {
                DiagnosticKind::TypeMismatch
            }
            ResolveError::CyclicMenuGraph { .. } => DiagnosticKind::CyclicMenuGraph,
            ResolveError::Syntax { .. } => DiagnosticKind::Syntax,
            ResolveError::InvalidStatement { .. } => DiagnosticKind::InvalidStatement,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            ResolveError::ChildRefKindMismatch { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// The entity (or source, for syntax errors) the error is about.
    pub fn subject(&self) -> &Name {
        match self {
            ResolveError::DuplicateName { name, .. }
            | ResolveError::DuplicateUuid { name, .. }
            | ResolveError::UnresolvedParent { name, .. }
            | ResolveError::CyclicInheritance { name, .. }
            | ResolveError::InheritsCycle { name, .. }
            | ResolveError::DuplicateAttribute { name, .. }
            | ResolveError::UnresolvedReference { name, .. }
            | ResolveError::MissingTypeLink { name, .. }
            | ResolveError::TypeMismatch { name, .. }
            | ResolveError::ChildRefKindMismatch { name, .. }
            | ResolveError::CyclicMenuGraph { name, .. }
            | ResolveError::Syntax { name, .. }
            | ResolveError::InvalidStatement { name, .. } => name,
        }
    }

    /// The single field the error is scoped to, if any.
    pub fn field(&self) -> Option<String> {
        match self {
            ResolveError::UnresolvedReference { field, .. }
            | ResolveError::TypeMismatch { field, .. }
            | ResolveError::ChildRefKindMismatch { field, .. } => Some(field.clone()),
            ResolveError::UnresolvedParent { .. } => Some("parentType".to_string()),
            ResolveError::MissingTypeLink { attribute, .. } => {
                Some(format!("attributes.{attribute}.typeLink"))
            }
            ResolveError::DuplicateAttribute { attribute, .. } => {
                Some(format!("attributes.{attribute}"))
            }
            _ => None,
        }
    }

    /// Other entity names involved.
    pub fn related(&self) -> Vec<Name> {
        match self {
            ResolveError::DuplicateUuid { owner, .. } => vec![owner.clone()],
            ResolveError::UnresolvedParent { parent, .. } => vec![parent.clone()],
            ResolveError::CyclicInheritance { cycle, .. }
            | ResolveError::InheritsCycle { cycle, .. }
            | ResolveError::CyclicMenuGraph { cycle, .. } => cycle.clone(),
            ResolveError::DuplicateAttribute { declared_by, .. } => vec![declared_by.clone()],
            ResolveError::UnresolvedReference { target, .. }
            | ResolveError::TypeMismatch { target, .. }
            | ResolveError::ChildRefKindMismatch { target, .. } => vec![target.clone()],
            ResolveError::DuplicateName { .. }
            | ResolveError::MissingTypeLink { .. }
            | ResolveError::Syntax { .. }
            | ResolveError::InvalidStatement { .. } => Vec::new(),
        }
    }
}
