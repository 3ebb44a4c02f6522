//! Error recovery tests: one broken piece never costs more than itself.

use rstest::rstest;
use uimeta::SourceId;
use uimeta::parser::{ParseError, parse};

#[rstest]
#[case::unknown_statement(r#"Menu("M") { addFoo("x"); addIcon("i"); }"#, 1)]
#[case::missing_semicolon(r#"Menu("M") { addIcon("i") addProperty("a", "b"); }"#, 2)]
#[case::stray_tokens(r#"Menu("M") { ) ( "x"; addIcon("i"); }"#, 1)]
#[case::bad_child_ref(r#"Menu("M") { addChild(TypeRef("T")); addIcon("i"); }"#, 1)]
#[case::wrong_arity(r#"Menu("M") { addIcon("a", "b"); addIcon("i"); }"#, 1)]
fn test_block_survives_broken_statement(#[case] input: &str, #[case] kept: usize) {
    let parse = parse(SourceId::new(0), input);
    assert_eq!(parse.errors.len(), 1, "{:?}", parse.errors);
    assert_eq!(parse.blocks.len(), 1);
    assert_eq!(parse.blocks[0].statements.len(), kept);
}

#[test]
fn test_unknown_kind_costs_only_its_block() {
    let parse = parse(
        SourceId::new(0),
        r#"
Widget("W") { addIcon("w"); }
Menu("M") { addIcon("m"); }
Command("C") { }
"#,
    );
    assert!(matches!(
        &parse.errors[..],
        [ParseError::UnknownKind { keyword, .. }] if keyword == "Widget"
    ));
    let names: Vec<_> = parse.blocks.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["M", "C"]);
}

#[test]
fn test_errors_carry_positions() {
    let parse = parse(SourceId::new(0), "Menu(\"M\") {\n  addFoo(\"x\");\n}");
    assert_eq!(parse.errors.len(), 1);
    let span = parse.errors[0].span();
    assert_eq!(span.start.line, 1);
    assert_eq!(span.start.column, 2);
}

#[test]
fn test_truncated_input() {
    let parse = parse(SourceId::new(0), r#"Menu("M") { addIcon("i"); addChild(MenuRef("#);
    assert!(!parse.ok());
    assert_eq!(parse.blocks.len(), 1);
    assert_eq!(parse.blocks[0].statements.len(), 1);
}
