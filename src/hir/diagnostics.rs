//! Diagnostics: load error reporting.
//!
//! Every problem found while loading becomes a [`Diagnostic`]. Diagnostics
//! never abort a load; they are collected and handed back with the result.

use std::sync::Arc;

use rustc_hash::FxHashSet;

use super::error::ResolveError;
use crate::base::{Name, Origin};

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "report", derive(serde::Serialize))]
#[cfg_attr(feature = "report", serde(rename_all = "lowercase"))]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        })
    }
}

/// The category of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "report", derive(serde::Serialize))]
pub enum DiagnosticKind {
    DuplicateName,
    DuplicateUuid,
    UnresolvedParent,
    CyclicInheritance,
    DuplicateAttribute,
    UnresolvedReference,
    TypeMismatch,
    CyclicMenuGraph,
    Syntax,
    InvalidStatement,
}

impl DiagnosticKind {
    pub fn code(self) -> &'static str {
        match self {
            DiagnosticKind::DuplicateName => codes::DUPLICATE_NAME,
            DiagnosticKind::UnresolvedParent => codes::UNRESOLVED_PARENT,
            DiagnosticKind::CyclicInheritance => codes::CYCLIC_INHERITANCE,
            DiagnosticKind::DuplicateAttribute => codes::DUPLICATE_ATTRIBUTE,
            DiagnosticKind::UnresolvedReference => codes::UNRESOLVED_REFERENCE,
            DiagnosticKind::TypeMismatch => codes::TYPE_MISMATCH,
            DiagnosticKind::CyclicMenuGraph => codes::CYCLIC_MENU_GRAPH,
            DiagnosticKind::DuplicateUuid => codes::DUPLICATE_UUID,
            DiagnosticKind::Syntax => codes::SYNTAX,
            DiagnosticKind::InvalidStatement => codes::INVALID_STATEMENT,
        }
    }
}

/// A diagnostic message about one entity (or one source, for syntax errors).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Severity level.
    pub severity: Severity,
    /// Error code (e.g., "E0001").
    pub code: &'static str,
    /// Name of the entity the diagnostic is about.
    pub subject: Name,
    /// The field of `subject` the diagnostic is scoped to, e.g. `target.table`.
    pub field: Option<String>,
    /// The diagnostic message.
    pub message: Arc<str>,
    /// Other entity names involved (cycle members, the missing target, ...).
    pub related: Vec<Name>,
    /// Where `subject` was declared, when known.
    pub origin: Option<Origin>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(kind: DiagnosticKind, subject: impl Into<Name>, message: impl Into<Arc<str>>) -> Self {
        Self::new(kind, Severity::Error, subject.into(), message.into())
    }

    /// Create a new warning diagnostic.
    pub fn warning(
        kind: DiagnosticKind,
        subject: impl Into<Name>,
        message: impl Into<Arc<str>>,
    ) -> Self {
        Self::new(kind, Severity::Warning, subject.into(), message.into())
    }

    fn new(kind: DiagnosticKind, severity: Severity, subject: Name, message: Arc<str>) -> Self {
        Self {
            kind,
            severity,
            code: kind.code(),
            subject,
            field: None,
            message,
            related: Vec::new(),
            origin: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_related(mut self, related: impl IntoIterator<Item = Name>) -> Self {
        self.related.extend(related);
        self
    }

    pub fn with_origin(mut self, origin: Option<Origin>) -> Self {
        self.origin = origin;
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl From<ResolveError> for Diagnostic {
    fn from(error: ResolveError) -> Self {
        let mut diag = Diagnostic::new(
            error.kind(),
            error.severity(),
            error.subject().clone(),
            Arc::from(error.to_string()),
        );
        diag.field = error.field();
        diag.related = error.related();
        diag
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)?;
        if let Some(origin) = &self.origin {
            write!(f, " at {origin}")?;
        }
        Ok(())
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Standard diagnostic codes.
///
/// ## Error Code Ranges
///
/// - **E0001-E0099**: Resolution errors (symbol table, inheritance, linking, menu graph)
/// - **E0100-E0199**: Source errors (syntax, statements)
pub mod codes {
    /// Name already registered.
    pub const DUPLICATE_NAME: &str = "E0001";
    /// Parent type not found.
    pub const UNRESOLVED_PARENT: &str = "E0002";
    /// Inheritance cycle.
    pub const CYCLIC_INHERITANCE: &str = "E0003";
    /// Attribute re-declared down the inheritance chain.
    pub const DUPLICATE_ATTRIBUTE: &str = "E0004";
    /// Reference target not found.
    pub const UNRESOLVED_REFERENCE: &str = "E0005";
    /// Reference target has the wrong kind.
    pub const TYPE_MISMATCH: &str = "E0006";
    /// Cycle among menus and commands.
    pub const CYCLIC_MENU_GRAPH: &str = "E0007";
    /// UUID already registered.
    pub const DUPLICATE_UUID: &str = "E0008";

    /// Malformed source text.
    pub const SYNTAX: &str = "E0100";
    /// Statement that cannot be applied.
    pub const INVALID_STATEMENT: &str = "E0101";
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects diagnostics during a load.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Add a resolution error, tagged with where its subject was declared.
    pub fn report(&mut self, error: ResolveError, origin: Option<Origin>) {
        self.add(Diagnostic::from(error).with_origin(origin));
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(diagnostics);
    }

    /// Get all diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Get diagnostics about a specific entity.
    pub fn diagnostics_for(&self, subject: &str) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.subject == subject)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Get the number of errors.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    /// Get the number of warnings.
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Take all diagnostics, leaving the collector empty.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Get the collected diagnostics, deduplicated.
    pub fn finish(self) -> Vec<Diagnostic> {
        let mut seen = FxHashSet::default();
        self.diagnostics
            .into_iter()
            .filter(|d| {
                // Deduplicate by (kind, subject, field, message, origin)
                let key = (
                    d.kind,
                    d.subject.clone(),
                    d.field.clone(),
                    d.message.clone(),
                    d.origin,
                );
                seen.insert(key)
            })
            .collect()
    }
}
