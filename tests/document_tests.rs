//! Integration tests for parsing and serialization.

use textquill::document::node::{JsonNumber, JsonValue};
use textquill::document::parser::{parse_json, validate_json};
use textquill::document::serializer::{minify, serialize, IndentSpec};

#[test]
fn test_format_simple_document() {
    let value = parse_json(r#"{"a":1,"b":[1,2,3]}"#).unwrap();
    let pretty = serialize(&value, IndentSpec::Spaces(2));
    assert_eq!(
        pretty,
        "{\n  \"a\": 1,\n  \"b\": [\n    1,\n    2,\n    3\n  ]\n}"
    );
}

#[test]
fn test_minify_is_exact() {
    let input = r#"{"a":1,"b":[1,2,3]}"#;
    let value = parse_json(input).unwrap();
    assert_eq!(minify(&value), input);
}

#[test]
fn test_round_trip_preserves_structure() {
    let input = r#"
    {
        "users": [
            {"id": 1, "name": "Alice", "active": true, "score": 9.5},
            {"id": 2, "name": "Bob", "active": false, "score": null}
        ],
        "empty_list": [],
        "empty_map": {},
        "meta": {"nested": {"deep": [[1], [2, 3]]}}
    }"#;

    let value = parse_json(input).unwrap();
    for indent in [IndentSpec::Spaces(2), IndentSpec::Spaces(4), IndentSpec::Tab] {
        let text = serialize(&value, indent);
        let reparsed = parse_json(&text).unwrap();
        assert_eq!(value, reparsed, "round trip failed for {:?}", indent);
    }
}

#[test]
fn test_key_order_survives_round_trip() {
    let input = r#"{"zebra":1,"apple":2,"mango":3}"#;
    let value = parse_json(input).unwrap();
    assert_eq!(minify(&value), input);
}

#[test]
fn test_string_escapes_survive() {
    let input = r#"{"text":"line\nbreak \"quoted\" \\ tab\t"}"#;
    let value = parse_json(input).unwrap();
    let reparsed = parse_json(&minify(&value)).unwrap();
    assert_eq!(value, reparsed);
}

#[test]
fn test_trailing_comma_error_position() {
    let input = r#"{"a": 1,}"#;
    let err = parse_json(input).unwrap_err();

    // Position points at the spot where the trailing comma breaks the
    // object; line/column must match manual computation from the offset
    let offset = err.offset.unwrap();
    let before = &input[..offset];
    let line = before.matches('\n').count() + 1;
    let column = offset - before.rfind('\n').map(|p| p + 1).unwrap_or(0) + 1;
    assert_eq!(err.line, line);
    assert_eq!(err.column, column);
}

#[test]
fn test_error_report_shape() {
    let input = "{\n  \"a\": 1,\n  \"b\": ,\n}";
    let err = parse_json(input).unwrap_err();
    assert_eq!(err.line, 3);

    let report = err.report(input);
    // Marked line, caret, and the hint block
    assert!(report.contains("> 3:"));
    assert!(report.contains("^"));
    assert!(report.contains("Common issues"));

    // Caret aligns under the reported column
    let caret_line = report
        .lines()
        .find(|l| l.trim_end().ends_with('^') && l.trim_start() == "^")
        .unwrap();
    let marked_line = report.lines().find(|l| l.starts_with("> 3:")).unwrap();
    let prefix_len = marked_line.find(input.lines().nth(2).unwrap()).unwrap();
    assert_eq!(caret_line.len(), prefix_len + err.column - 1 + 1);
}

#[test]
fn test_validate_passthrough() {
    assert!(validate_json(r#"{"ok": [1, 2, 3]}"#).is_ok());
    let err = validate_json(r#"{"ok": [1, 2, 3}"#).unwrap_err();
    assert!(err.line >= 1);
}

#[test]
fn test_number_fidelity() {
    let value = parse_json(r#"[0, -7, 3.25, 1e2]"#).unwrap();
    match value.get_path(&[1]).unwrap() {
        JsonValue::Number(JsonNumber::Integer(-7)) => {}
        other => panic!("expected integer -7, got {:?}", other),
    }
    assert_eq!(minify(&value), "[0,-7,3.25,100]");
}
