//! Property cascade and attribute accumulation tests.

use uimeta::hir::DiagnosticKind;

use crate::helpers::load_helpers::*;
use crate::helpers::source_fixtures::*;

#[test]
fn test_closest_definition_wins() {
    let result = load_source(CASCADE_CHAIN);
    let u = result.get("U").unwrap();
    assert_eq!(u.property("x"), Some("2"));
    assert_eq!(u.property("Icon"), Some("RootIcon"));
    assert_eq!(result.get("R").unwrap().property("x"), Some("1"));
}

#[test]
fn test_property_order_is_root_first() {
    let result = load_source(
        r#"
Type("R") { addProperty("a", "1"); addProperty("b", "1"); }
Type("S") { setParentType("R"); addProperty("c", "2"); addProperty("a", "2"); }
"#,
    );
    let keys: Vec<_> = result
        .get("S")
        .unwrap()
        .properties
        .as_ref()
        .unwrap()
        .keys()
        .map(|k| k.to_string())
        .collect();
    assert_eq!(keys, vec!["a", "b", "c"]);
}

#[test]
fn test_attributes_are_additive_with_duplicate_reported() {
    let result = load_source(DUPLICATE_ATTRIBUTE);

    assert_eq!(attribute_names(&result, "S"), vec!["A", "B"]);
    let duplicates = diagnostics_of_kind(&result, DiagnosticKind::DuplicateAttribute);
    assert_eq!(duplicates.len(), 1);
    assert_eq!(duplicates[0].subject, "S");
    assert_eq!(duplicates[0].related, vec!["R"]);

    // The ancestor's declaration stands
    let s = result.get("S").unwrap();
    let a = s.attribute("A").unwrap();
    assert_eq!(a.owner, result.get("R").unwrap().id);
    assert_eq!(a.sql_table.as_deref(), Some("T_R"));
}

#[test]
fn test_non_types_keep_declared_properties() {
    let result = load_source(
        r#"Menu("M") { addProperty("Label", "Main"); addProperty("Label", "Main menu"); }"#,
    );
    assert_clean(&result);
    let menu = result.get("M").unwrap();
    assert_eq!(menu.property("Label"), Some("Main menu"));
    assert!(menu.ancestors.is_none());
    assert!(menu.attributes.is_empty());
}

#[test]
fn test_cyclic_type_keeps_own_attributes_only() {
    let result = load_source(
        r#"
Type("A") { setParentType("B"); addAttribute("Own") { setAttributeType("String"); } }
Type("B") { setParentType("A"); addAttribute("Other") { setAttributeType("String"); } }
"#,
    );
    assert_eq!(attribute_names(&result, "A"), vec!["Own"]);
}

#[test]
fn test_cyclic_type_reports_own_duplicate_attribute() {
    let result = load_source(
        r#"
Type("A") {
    setParentType("B");
    addAttribute("X") { setAttributeType("String"); setSQLColumn("X1"); }
    addAttribute("X") { setAttributeType("String"); setSQLColumn("X2"); }
}
Type("B") { setParentType("A"); }
"#,
    );

    let duplicates = diagnostics_of_kind(&result, DiagnosticKind::DuplicateAttribute);
    assert_eq!(duplicates.len(), 1);
    assert_eq!(duplicates[0].subject, "A");

    let a = result.get("A").unwrap();
    assert_eq!(attribute_names(&result, "A"), vec!["X"]);
    assert_eq!(a.attribute("X").unwrap().sql_column.as_deref(), Some("X1"));
    assert!(a.properties.is_none());
}
