//! Load results do not depend on the order definitions arrive in, nor on
//! whether phases run in parallel.

use crate::helpers::load_helpers::*;
use crate::helpers::source_fixtures::*;

/// Everything observable about one entity that must not depend on load order.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct EntityPrint {
    name: String,
    chain: Option<Vec<String>>,
    /// Effective properties as ordered (key, value) pairs.
    properties: Option<Vec<(String, String)>>,
    attributes: Vec<String>,
    children: Vec<String>,
}

fn fingerprint(result: &uimeta::LoadResult) -> Vec<EntityPrint> {
    let mut entities: Vec<_> = result
        .graph()
        .iter()
        .map(|e| EntityPrint {
            name: e.name.to_string(),
            chain: chain_names(result, &e.name),
            properties: e.properties.as_ref().map(|properties| {
                properties
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.clone()))
                    .collect()
            }),
            attributes: e.attribute_names().map(str::to_string).collect(),
            children: e.child_names().map(str::to_string).collect(),
        })
        .collect();
    entities.sort();
    entities
}

#[test]
fn test_inheritance_cycle_any_order() {
    let blocks = [
        r#"Type("A") { setParentType("B"); }"#,
        r#"Type("B") { setParentType("C"); }"#,
        r#"Type("C") { setParentType("A"); }"#,
        r#"Type("D") { setParentType("C"); }"#,
    ];
    let expected = diagnostic_set(&load_sources_with(&blocks, &sequential()));
    assert_eq!(expected.len(), 2);

    for order in permutations(&blocks) {
        let result = load_sources_with(&order, &sequential());
        assert_eq!(diagnostic_set(&result), expected, "order: {order:?}");
    }
}

#[test]
fn test_menu_cycle_any_order() {
    let blocks = [
        r#"Menu("A") { addChild(MenuRef("B")); }"#,
        r#"Menu("B") { addChild(MenuRef("C")); }"#,
        r#"Menu("C") { addChild(MenuRef("A")); addChild(CommandRef("X")); }"#,
        r#"Command("X") { }"#,
    ];
    let expected = diagnostic_set(&load_sources(&blocks));
    for order in permutations(&blocks) {
        assert_eq!(diagnostic_set(&load_sources(&order)), expected, "order: {order:?}");
    }
}

#[test]
fn test_sales_module_any_rotation() {
    let baseline = load_sources(SALES_MODULE);
    for shift in 1..SALES_MODULE.len() {
        let mut rotated = SALES_MODULE.to_vec();
        rotated.rotate_left(shift);
        let result = load_sources(&rotated);
        assert_clean(&result);
        assert_eq!(fingerprint(&result), fingerprint(&baseline));
    }
}

#[test]
fn test_parallel_matches_sequential() {
    let mut blocks: Vec<&str> = SALES_MODULE.to_vec();
    // R and S are defined twice; the duplicates are part of the comparison
    blocks.extend([CASCADE_CHAIN, DUPLICATE_ATTRIBUTE, MENU_CYCLE]);
    let parallel = load_sources(&blocks);
    let sequential = load_sources_with(&blocks, &sequential());
    assert_eq!(diagnostic_set(&parallel), diagnostic_set(&sequential));
    assert_eq!(fingerprint(&parallel), fingerprint(&sequential));
}

#[test]
fn test_cascade_any_order() {
    let blocks = [
        r#"Type("R") { addProperty("Icon", "r"); addProperty("Label", "root"); addProperty("x", "1"); }"#,
        r#"Type("S") { setParentType("R"); addProperty("x", "2"); addProperty("Extra", "s"); }"#,
        r#"Type("U") { setParentType("S"); addProperty("Label", "u"); }"#,
        r#"Type("V") { setParentType("U"); addProperty("Icon", "v"); }"#,
    ];
    let baseline = load_sources_with(&blocks, &sequential());
    assert_clean(&baseline);
    let v = baseline.get("V").unwrap();
    let effective: Vec<_> = v
        .properties
        .as_ref()
        .unwrap()
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    assert_eq!(
        effective,
        vec![("Icon", "v"), ("Label", "u"), ("x", "2"), ("Extra", "s")]
    );

    let expected = fingerprint(&baseline);
    for order in permutations(&blocks) {
        let result = load_sources(&order);
        assert_eq!(fingerprint(&result), expected, "order: {order:?}");
    }
}
