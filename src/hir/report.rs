//! JSON diagnostics report.

use serde::Serialize;

use super::diagnostics::{Diagnostic, DiagnosticKind, Severity};
use super::load::LoadResult;

#[derive(Debug, Serialize)]
struct Report<'a> {
    entities: usize,
    errors: usize,
    warnings: usize,
    diagnostics: Vec<DiagnosticRecord<'a>>,
}

#[derive(Debug, Serialize)]
struct DiagnosticRecord<'a> {
    kind: DiagnosticKind,
    severity: Severity,
    code: &'static str,
    subject: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'a str>,
    message: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    related: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    origin: Option<OriginRecord>,
}

/// 1-indexed, like the `Display` of positions.
#[derive(Debug, Serialize)]
struct OriginRecord {
    source: u32,
    line: usize,
    column: usize,
}

impl<'a> From<&'a Diagnostic> for DiagnosticRecord<'a> {
    fn from(d: &'a Diagnostic) -> Self {
        Self {
            kind: d.kind,
            severity: d.severity,
            code: d.code,
            subject: d.subject.as_str(),
            field: d.field.as_deref(),
            message: &d.message,
            related: d.related.iter().map(|n| n.as_str()).collect(),
            origin: d.origin.map(|o| OriginRecord {
                source: o.source.0,
                line: o.span.start.line + 1,
                column: o.span.start.column + 1,
            }),
        }
    }
}

/// Render the diagnostics of a load as pretty-printed JSON.
pub fn to_json(result: &LoadResult) -> serde_json::Result<String> {
    let report = Report {
        entities: result.graph().len(),
        errors: result.error_count(),
        warnings: result.warning_count(),
        diagnostics: result.diagnostics().iter().map(DiagnosticRecord::from).collect(),
    };
    serde_json::to_string_pretty(&report)
}
