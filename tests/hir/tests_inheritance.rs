//! Inheritance chain tests.

use rstest::rstest;
use uimeta::hir::DiagnosticKind;

use crate::helpers::load_helpers::*;
use crate::helpers::source_fixtures::*;

// =============================================================================
// CHAINS
// =============================================================================

#[test]
fn test_chain_is_self_to_root() {
    let result = load_source(CASCADE_CHAIN);
    assert_clean(&result);
    assert_eq!(
        chain_names(&result, "U"),
        Some(vec!["U".to_string(), "S".to_string(), "R".to_string()])
    );
    assert_eq!(chain_names(&result, "R"), Some(vec!["R".to_string()]));
}

#[test]
fn test_parent_declared_after_child() {
    let result = load_sources(&[
        r#"Type("Child") { setParentType("Parent"); }"#,
        r#"Type("Parent") { }"#,
    ]);
    assert_clean(&result);
    let child = result.get("Child").unwrap();
    assert_eq!(
        child.parent.as_ref().and_then(|p| p.target),
        Some(result.get("Parent").unwrap().id)
    );
}

// =============================================================================
// CYCLES
// =============================================================================

#[test]
fn test_two_cycle_reported_exactly_once() {
    let result = load_source(INHERITANCE_CYCLE);

    let cycles = diagnostics_of_kind(&result, DiagnosticKind::CyclicInheritance);
    assert_eq!(cycles.len(), 1, "{:?}", result.diagnostics());
    assert_eq!(cycles[0].message.as_ref(), "cyclic inheritance: A -> B -> A");
    assert_eq!(cycles[0].related.len(), 2);

    // Neither member is cascaded
    for name in ["A", "B"] {
        let entity = result.get(name).unwrap();
        assert!(entity.ancestors.is_none());
        assert!(entity.properties.is_none());
    }
}

#[rstest]
#[case::self_parent(&[("A", "A")], 1)]
#[case::two(&[("A", "B"), ("B", "A")], 2)]
#[case::three(&[("A", "B"), ("B", "C"), ("C", "A")], 3)]
fn test_each_cycle_reported_once(#[case] links: &[(&str, &str)], #[case] members: usize) {
    let source: String = links
        .iter()
        .map(|(name, parent)| format!("Type(\"{name}\") {{ setParentType(\"{parent}\"); }}\n"))
        .collect();
    let result = load_source(&source);

    let cycles = diagnostics_of_kind(&result, DiagnosticKind::CyclicInheritance);
    assert_eq!(cycles.len(), 1);
    assert_eq!(cycles[0].related.len(), members);
    assert_eq!(cycles[0].subject, "A");
}

#[test]
fn test_descendant_of_cycle_is_excluded_with_own_diagnostic() {
    let result = load_sources(&[INHERITANCE_CYCLE, r#"Type("C") { setParentType("A"); }"#]);

    let cycles = diagnostics_of_kind(&result, DiagnosticKind::CyclicInheritance);
    assert_eq!(cycles.len(), 2);
    assert!(cycles.iter().any(|d| d.subject == "C"));
    assert!(result.get("C").unwrap().ancestors.is_none());
}

#[test]
fn test_cycle_does_not_affect_unrelated_types() {
    let result = load_sources(&[INHERITANCE_CYCLE, CASCADE_CHAIN]);
    assert_eq!(result.error_count(), 1);
    assert_eq!(result.get("U").unwrap().property("x"), Some("2"));
}

// =============================================================================
// BROKEN PARENTS
// =============================================================================

#[test]
fn test_unresolved_parent_partial_chain() {
    let result = load_source(
        r#"
Type("A") { setParentType("Missing"); addProperty("k", "a"); }
Type("B") { setParentType("A"); }
"#,
    );

    let errors = diagnostics_of_kind(&result, DiagnosticKind::UnresolvedParent);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].subject, "A");
    assert_eq!(errors[0].field.as_deref(), Some("parentType"));

    let a = result.get("A").unwrap();
    assert!(!a.parent.as_ref().unwrap().is_resolved());
    assert_eq!(a.parent.as_ref().unwrap().name, "Missing");
    assert_eq!(chain_names(&result, "B"), Some(vec!["B".to_string(), "A".to_string()]));
    assert_eq!(result.get("B").unwrap().property("k"), Some("a"));
}

#[test]
fn test_parent_of_wrong_kind() {
    let result = load_source(
        r#"
Menu("NotAType") { }
Type("T") { setParentType("NotAType"); }
"#,
    );
    let errors = diagnostics_of_kind(&result, DiagnosticKind::TypeMismatch);
    assert_eq!(errors.len(), 1);
    assert_eq!(chain_names(&result, "T"), Some(vec!["T".to_string()]));
}
