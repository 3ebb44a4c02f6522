//! Diagnostics tests: duplicate names and UUIDs, codes, origins.

use rstest::rstest;
use uimeta::hir::{DiagnosticKind, codes};
use uimeta::project::SourceSet;
use uimeta::{LoadOptions, Severity, project};

use crate::helpers::load_helpers::*;

#[test]
fn test_duplicate_name_first_wins() {
    let result = load_sources(&[
        r#"Type("Dup") { addProperty("v", "first"); }"#,
        r#"Menu("Dup") { addProperty("v", "second"); }"#,
    ]);

    let duplicates = diagnostics_of_kind(&result, DiagnosticKind::DuplicateName);
    assert_eq!(duplicates.len(), 1);
    assert_eq!(duplicates[0].code, codes::DUPLICATE_NAME);
    assert_eq!(result.graph().len(), 1);
    let dup = result.get("Dup").unwrap();
    assert_eq!(dup.kind, uimeta::DefinitionKind::Type);
    assert_eq!(dup.property("v"), Some("first"));
}

#[test]
fn test_duplicate_uuid_rejects_later_definition() {
    let result = load_source(
        r#"
Menu("First") { setUUID("2b0e5a1c-8f6e-4d8c-9a53-3c1f0e6b7d21"); }
Menu("Second") { setUUID("2b0e5a1c-8f6e-4d8c-9a53-3c1f0e6b7d21"); }
"#,
    );
    let duplicates = diagnostics_of_kind(&result, DiagnosticKind::DuplicateUuid);
    assert_eq!(duplicates.len(), 1);
    assert_eq!(duplicates[0].subject, "Second");
    assert!(result.get("First").is_some());
    assert!(result.get("Second").is_none());
}

#[rstest]
#[case::unknown_statement(r#"Menu("M") { addFoo("x"); }"#, codes::INVALID_STATEMENT)]
#[case::not_allowed(r#"Menu("M") { setParentType("T"); }"#, codes::INVALID_STATEMENT)]
#[case::bad_uuid(r#"Menu("M") { setUUID("nope"); }"#, codes::INVALID_STATEMENT)]
#[case::missing_semicolon(r#"Menu("M") { addIcon("i") }"#, codes::SYNTAX)]
#[case::unresolved_parent(r#"Type("T") { setParentType("P"); }"#, codes::UNRESOLVED_PARENT)]
#[case::unresolved_child(r#"Menu("M") { addChild(MenuRef("X")); }"#, codes::UNRESOLVED_REFERENCE)]
fn test_single_diagnostic_code(#[case] source: &str, #[case] code: &str) {
    let result = load_source(source);
    assert_eq!(result.diagnostics().len(), 1, "{:?}", result.diagnostics());
    assert_eq!(result.diagnostics()[0].code, code);
    assert_eq!(result.diagnostics()[0].severity, Severity::Error);
    // The definition survives its broken statement
    assert!(result.graph().len() >= 1);
}

#[test]
fn test_diagnostics_carry_origin() {
    let mut sources = SourceSet::new();
    let id = sources.add_text("menus.ci", "\n\nMenu(\"M\") { addChild(MenuRef(\"X\")); }");
    let result = project::load(&sources, &LoadOptions::default());

    let origin = result.diagnostics()[0].origin.unwrap();
    assert_eq!(origin.source, id);
    assert_eq!(origin.span.start.line, 2);
}

#[test]
fn test_diagnostics_for_subject() {
    let result = load_source(
        r#"
Menu("M") { addChild(MenuRef("X")); addChild(MenuRef("Y")); }
Menu("N") { addChild(MenuRef("Z")); }
"#,
    );
    assert_eq!(result.diagnostics_for("M").count(), 2);
    assert_eq!(result.diagnostics_for("N").count(), 1);
    assert!(result.has_errors());
}

#[test]
fn test_empty_load_is_clean() {
    let result = load_sources(&[]);
    assert_clean(&result);
    assert!(result.graph().is_empty());
}

#[test]
fn test_every_rejected_duplicate_is_reported() {
    let mut sources = SourceSet::new();
    for name in ["a.ci", "b.ci", "c.ci"] {
        sources.add_text(name, r#"Menu("X") { }"#);
    }
    let result = project::load(&sources, &LoadOptions::default());

    let duplicates = diagnostics_of_kind(&result, DiagnosticKind::DuplicateName);
    assert_eq!(duplicates.len(), 2);
    let origins: Vec<_> = duplicates
        .iter()
        .map(|d| d.origin.unwrap().source)
        .collect();
    assert_eq!(origins, vec![uimeta::SourceId::new(1), uimeta::SourceId::new(2)]);
}

#[test]
fn test_same_statement_error_in_two_blocks() {
    let result = load_source(
        r#"
Menu("M") { setParentType("T"); }
Menu("M") { setParentType("T"); }
"#,
    );
    // Two invalid statements plus the rejected duplicate
    assert_eq!(diagnostics_of_kind(&result, DiagnosticKind::InvalidStatement).len(), 2);
    assert_eq!(diagnostics_of_kind(&result, DiagnosticKind::DuplicateName).len(), 1);
}
