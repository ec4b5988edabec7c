#![allow(non_snake_case)]

use super::*;
use crate::schema::Range;
use serde_json::json;
use test_case::test_case;

fn integer_rule(min: i64, max: Option<i64>) -> SchemaRule {
    SchemaRule::integer("value", true, Range { min, max })
}

// ============================================================================
// Integer bounds are inclusive
// ============================================================================

#[test_case(json!(0), false ; "one below min")]
#[test_case(json!(1), true ; "at min")]
#[test_case(json!(11), true ; "inside")]
#[test_case(json!(21), true ; "at max")]
#[test_case(json!(22), false ; "one above max")]
fn check_value___integer_bounds___are_inclusive(value: Value, accepted: bool) {
    let rule = integer_rule(1, Some(21));

    assert_eq!(check_value(&value, &rule).is_none(), accepted);
}

#[test_case(json!(1_000_000), true ; "large value")]
#[test_case(json!(0), false ; "below min")]
fn check_value___integer_without_max___is_unbounded_above(value: Value, accepted: bool) {
    let rule = integer_rule(1, None);

    assert_eq!(check_value(&value, &rule).is_none(), accepted);
}

#[test_case(json!(2.5) ; "fraction")]
#[test_case(json!("3") ; "numeric string")]
#[test_case(json!(true) ; "boolean")]
#[test_case(Value::Null ; "null")]
fn check_value___integer_wrong_type___is_rejected(value: Value) {
    let rule = integer_rule(1, Some(21));

    assert!(matches!(
        check_value(&value, &rule),
        Some(ViolationKind::WrongType {
            expected: FieldType::Integer,
            ..
        })
    ));
}

#[test]
fn check_value___integral_float___counts_as_integer() {
    let rule = integer_rule(1, Some(21));

    assert!(check_value(&json!(4.0), &rule).is_none());
}

// ============================================================================
// Decimal
// ============================================================================

#[test_case(json!(0), true ; "zero")]
#[test_case(json!(0.0), true ; "zero float")]
#[test_case(json!("0"), true ; "zero string")]
#[test_case(json!(1.5), true ; "positive")]
#[test_case(json!("2.75"), true ; "numeric string")]
#[test_case(json!("1.0.3"), true ; "semver string")]
#[test_case(json!(" 3 beta"), true ; "number with suffix")]
#[test_case(json!(".5"), true ; "leading dot")]
#[test_case(json!("-1.0.3"), false ; "negative semver string")]
#[test_case(json!(-0.1), false ; "negative")]
fn check_value___decimal_min_zero(value: Value, accepted: bool) {
    let rule = SchemaRule::decimal("version", true, Range::at_least(0));

    assert_eq!(check_value(&value, &rule).is_none(), accepted);
}

#[test_case(json!("abc") ; "text")]
#[test_case(json!("v1.0") ; "prefixed version")]
#[test_case(json!("") ; "empty string")]
#[test_case(json!("NaN") ; "nan")]
#[test_case(json!(false) ; "boolean")]
#[test_case(json!([1]) ; "sequence")]
fn check_value___decimal_wrong_type___is_rejected(value: Value) {
    let rule = SchemaRule::decimal("version", true, Range::at_least(0));

    assert!(matches!(
        check_value(&value, &rule),
        Some(ViolationKind::WrongType {
            expected: FieldType::Decimal,
            ..
        })
    ));
}

// ============================================================================
// Boolean
// ============================================================================

#[test_case(json!(true), true)]
#[test_case(json!(false), true)]
#[test_case(json!("true"), false)]
#[test_case(json!(1), false)]
#[test_case(Value::Null, false)]
fn check_value___boolean(value: Value, accepted: bool) {
    let rule = SchemaRule::boolean("isActive", false);

    assert_eq!(check_value(&value, &rule).is_none(), accepted);
}

// ============================================================================
// String length
// ============================================================================

#[test_case(49, true ; "below max")]
#[test_case(50, true ; "at max")]
#[test_case(51, false ; "above max")]
fn check_value___string_length___is_bounded(length: usize, accepted: bool) {
    let rule = SchemaRule::string("name", true, Some(50));
    let value = json!("x".repeat(length));

    assert_eq!(check_value(&value, &rule).is_none(), accepted);
}

#[test]
fn check_value___string_length___counts_characters_not_bytes() {
    let rule = SchemaRule::string("name", true, Some(3));

    assert!(check_value(&json!("äöü"), &rule).is_none());
}

#[test]
fn check_value___unbounded_string___accepts_anything_textual() {
    let rule = SchemaRule::string("code", true, None);

    assert!(check_value(&json!("x".repeat(100_000)), &rule).is_none());
}

#[test_case(json!({"a": 1}) ; "mapping")]
#[test_case(json!(["a"]) ; "sequence")]
fn check_value___string_with_collection___is_wrong_type(value: Value) {
    let rule = SchemaRule::string("caption", true, Some(255));

    assert!(matches!(
        check_value(&value, &rule),
        Some(ViolationKind::WrongType {
            expected: FieldType::String,
            ..
        })
    ));
}

#[test]
fn check_value___array___is_never_value_checked() {
    let rule = SchemaRule::array("menus", crate::schema::Level::Menu);

    assert!(check_value(&json!(42), &rule).is_none());
}

// ============================================================================
// Schema bound constants drive the document checks
// ============================================================================

#[test_case(0, 1 ; "below page range")]
#[test_case(1, 0 ; "first page")]
#[test_case(21, 0 ; "last page")]
#[test_case(22, 1 ; "above page range")]
fn validate___page_id_bounds(page_id: i64, expected_errors: usize) {
    let manifest = json!({
        "guid": "g",
        "name": "n",
        "version": 1,
        "pageContents": [{ "pageId": page_id, "name": "p", "code": "x" }]
    });

    let report = validate(&manifest, &Schema::default());

    assert_eq!(report.error_count(), expected_errors);
}
