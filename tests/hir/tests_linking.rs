//! Reference linking tests: children, targets, type links and tombstones.

use uimeta::hir::DiagnosticKind;
use uimeta::{DefinitionKind, Severity};

use crate::helpers::load_helpers::*;
use crate::helpers::source_fixtures::*;

// =============================================================================
// FORWARD REFERENCES
// =============================================================================

#[test]
fn test_target_menu_registered_in_later_source() {
    let result = load_sources(&[
        r#"Command("Open") { addTargetMenu("Later"); }"#,
        r#"Menu("Later") { }"#,
    ]);
    assert_clean(&result);

    let open = result.get("Open").unwrap();
    let menu = open.target.as_ref().unwrap().menu.as_ref().unwrap();
    assert_eq!(menu.target, Some(result.get("Later").unwrap().id));
}

#[test]
fn test_child_declared_before_definition() {
    let result = load_source(ORDERED_MENU);
    assert_clean(&result);
    let m = result.get("M").unwrap();
    assert!(m.children.iter().all(|c| c.reference.is_resolved()));
}

// =============================================================================
// TOMBSTONES
// =============================================================================

#[test]
fn test_single_unresolved_target_table() {
    let result = load_source(r#"Command("Search") { addTargetTable("NoSuchTable"); }"#);

    assert_eq!(result.diagnostics().len(), 1);
    let diagnostic = &result.diagnostics()[0];
    assert_eq!(diagnostic.kind, DiagnosticKind::UnresolvedReference);
    assert_eq!(diagnostic.subject, "Search");
    assert_eq!(diagnostic.field.as_deref(), Some("target.table"));
    assert_eq!(diagnostic.related, vec!["NoSuchTable"]);

    // The command itself stays in the graph, its table as a tombstone
    let search = result.get("Search").unwrap();
    let table = search.target.as_ref().unwrap().table.as_ref().unwrap();
    assert_eq!(table.name, "NoSuchTable");
    assert!(!table.is_resolved());
}

#[test]
fn test_unresolved_child_keeps_position() {
    let result = load_source(
        r#"
Menu("M") {
    addChild(CommandRef("A"));
    addChild(CommandRef("Missing"));
    addChild(CommandRef("B"));
}
Command("A") { }
Command("B") { }
"#,
    );

    assert_eq!(result.error_count(), 1);
    assert_eq!(child_names(&result, "M"), vec!["A", "Missing", "B"]);
    let m = result.get("M").unwrap();
    assert!(!m.children[1].reference.is_resolved());
    assert_eq!(
        result.diagnostics()[0].field.as_deref(),
        Some("children[1]")
    );

    // Rendering skips the tombstone
    let rendered: Vec<_> = result
        .graph()
        .children(m.id)
        .map(|e| e.name.to_string())
        .collect();
    assert_eq!(rendered, vec!["A", "B"]);
}

#[test]
fn test_target_of_wrong_kind() {
    let result = load_source(
        r#"
Form("F") { }
Command("C") { addTargetTable("F"); }
"#,
    );
    let mismatches = diagnostics_of_kind(&result, DiagnosticKind::TypeMismatch);
    assert_eq!(mismatches.len(), 1);
    assert_eq!(mismatches[0].field.as_deref(), Some("target.table"));
    let table = result.get("C").unwrap().target.as_ref().unwrap().table.clone().unwrap();
    assert!(!table.is_resolved());
}

#[test]
fn test_child_ref_kind_mismatch_is_warning_and_links() {
    let result = load_source(
        r#"
Menu("M") { addChild(CommandRef("Sub")); }
Menu("Sub") { }
"#,
    );
    assert_eq!(result.error_count(), 0);
    assert_eq!(result.warning_count(), 1);
    assert_eq!(result.diagnostics()[0].severity, Severity::Warning);
    assert!(result.get("M").unwrap().children[0].reference.is_resolved());

    let unchecked = load_sources_with(
        &[r#"Menu("M") { addChild(CommandRef("Sub")); } Menu("Sub") { }"#],
        &sequential().with_child_ref_kind_check(false),
    );
    assert_clean(&unchecked);
}

#[test]
fn test_link_attribute_without_type_link() {
    let result = load_source(
        r#"Type("T") { addAttribute("Owner") { setAttributeType("Link"); } }"#,
    );
    assert_eq!(result.error_count(), 1);
    assert_eq!(
        result.diagnostics()[0].field.as_deref(),
        Some("attributes.Owner.typeLink")
    );
}

// =============================================================================
// FULL MODULE
// =============================================================================

#[test]
fn test_sales_module_loads_clean() {
    let result = load_sources(SALES_MODULE);
    assert_clean(&result);
    let graph = result.graph();
    assert_eq!(graph.len(), 8);
    assert_eq!(graph.of_kind(DefinitionKind::Type).count(), 3);

    // Inherited link attribute resolves against the owning type's links
    let invoice = result.get("Sales_Invoice").unwrap();
    assert_eq!(attribute_names(&result, "Sales_Invoice"), vec!["Number", "Contact", "DueDate"]);
    let contact = invoice.attribute("Contact").unwrap();
    assert_eq!(
        contact.type_link.as_ref().and_then(|r| r.target),
        Some(result.get("Contacts_Contact").unwrap().id)
    );
    assert_eq!(invoice.property("Icon"), Some("Document"));
    assert_eq!(invoice.property("Label"), Some("Invoice"));
    let by_uuid = graph
        .by_uuid(&"fe9d94fd-2ed8-4c44-b1f0-6ba1a2f5ae4f".parse().unwrap())
        .unwrap();
    assert_eq!(by_uuid.name, "Sales_Invoice");

    // Command target
    let search = result.get("Sales_InvoiceSearch").unwrap();
    let target = search.target.as_ref().unwrap();
    assert_eq!(target.target.as_deref(), Some("content"));
    assert_eq!(target.mode.as_deref(), Some("view"));
    assert!(target.table.as_ref().unwrap().is_resolved());
    assert!(target.form.as_ref().unwrap().is_resolved());
    assert_eq!(target.query_types.len(), 1);
    assert_eq!(target.query_types[0].target, Some(invoice.id));
    let expand = target.expand.as_ref().unwrap();
    assert_eq!(expand.head.target, Some(invoice.id));
    assert_eq!(expand.tail, "\\Contact");

    // Menu structure
    let roots: Vec<_> = graph.roots().map(|e| e.name.to_string()).collect();
    assert_eq!(roots, vec!["Sales_Menu"]);
    let tree = graph.tree("Sales_Menu").unwrap();
    assert_eq!(tree.node_count(), 4);
}
