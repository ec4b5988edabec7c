//! Manifest validation against the schema tables.
//!
//! Validation never stops at the first problem: every violation in the
//! document is collected so the author can fix them all in one pass.

use crate::schema::{FieldType, Level, Schema, SchemaRule};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use std::fmt;

// Longest leading decimal number, so `"1.0.3"` reads as `1.0`.
static LEADING_DECIMAL: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)] // Safe: constant pattern
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("decimal pattern is valid")
});

/// What is wrong at a given location in the manifest.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationKind {
    /// The key is not declared for this level.
    KeyNotAllowed,

    /// A required key is absent.
    RequiredKeyMissing,

    /// A collection element is not a mapping.
    NotAMapping,

    /// The value has the wrong primitive type.
    WrongType { expected: FieldType, found: String },

    /// A numeric value lies outside its inclusive bounds.
    OutOfRange {
        value: f64,
        min: Option<f64>,
        max: Option<f64>,
    },

    /// A string is longer than its maximum character count.
    TooLong { length: usize, max: usize },
}

/// A single schema violation.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Dotted path to the offending key, e.g. `menus[0].entries[1].caption`.
    pub path: String,
    pub kind: ViolationKind,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() {
            "root"
        } else {
            &self.path
        };

        match &self.kind {
            ViolationKind::KeyNotAllowed => write!(f, "{path}: key is not allowed"),
            ViolationKind::RequiredKeyMissing => write!(f, "{path}: required key not found"),
            ViolationKind::NotAMapping => write!(f, "{path}: expected a mapping"),
            ViolationKind::WrongType { expected, found } => {
                write!(f, "{path}: {expected} expected, but got {found}")
            }
            ViolationKind::OutOfRange { value, min, max } => {
                let min = min.map_or_else(|| "-".to_string(), |m| m.to_string());
                let max = max.map_or_else(|| "-".to_string(), |m| m.to_string());
                write!(
                    f,
                    "{path}: {value} was not in the allowed range of {min} to {max}"
                )
            }
            ViolationKind::TooLong { length, max } => write!(
                f,
                "{path}: the string is too long ({length} characters) - it must be at most {max} characters"
            ),
        }
    }
}

/// Outcome of validating a manifest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    /// Number of violations found. Only zero passes.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.violations.len()
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    fn push(&mut self, path: String, kind: ViolationKind) {
        self.violations.push(Violation { path, kind });
    }
}

/// Validate a whole manifest document against `schema`.
#[must_use]
pub fn validate(document: &Value, schema: &Schema) -> ValidationReport {
    let mut report = ValidationReport::default();
    check_node(document, Level::Root, String::new(), schema, &mut report);

    tracing::debug!(
        schema_version = schema.version(),
        violations = report.error_count(),
        "manifest validated"
    );

    report
}

/// Check a single value against its rule.
///
/// Returns `None` when the value is acceptable. Array fields are never
/// value-checked here; their elements are handled by the caller.
#[must_use]
pub fn check_value(value: &Value, rule: &SchemaRule) -> Option<ViolationKind> {
    match rule.field_type {
        FieldType::Boolean => (!value.is_boolean()).then(|| wrong_type(FieldType::Boolean, value)),
        FieldType::Integer => match as_integer(value) {
            Some(number) => check_range(number, rule),
            None => Some(wrong_type(FieldType::Integer, value)),
        },
        FieldType::Decimal => match as_decimal(value) {
            Some(number) => check_range(number, rule),
            None => Some(wrong_type(FieldType::Decimal, value)),
        },
        FieldType::String => check_length(value, rule),
        FieldType::Array => None,
    }
}

fn check_node(
    node: &Value,
    level: Level,
    path: String,
    schema: &Schema,
    report: &mut ValidationReport,
) {
    match node.as_object() {
        Some(object) => check_object(object, level, &path, schema, report),
        None => report.push(path, ViolationKind::NotAMapping),
    }
}

fn check_object(
    object: &Map<String, Value>,
    level: Level,
    path: &str,
    schema: &Schema,
    report: &mut ValidationReport,
) {
    for (key, value) in object {
        let key_path = join(path, key);

        let Some(rule) = schema.rule(level, key) else {
            report.push(key_path, ViolationKind::KeyNotAllowed);
            continue;
        };

        if let Some(kind) = check_value(value, rule) {
            report.push(key_path.clone(), kind);
        }

        if let (Some(nested), Some(items)) = (rule.nested, value.as_array()) {
            for (index, item) in items.iter().enumerate() {
                check_node(item, nested, format!("{key_path}[{index}]"), schema, report);
            }
        }
    }

    for rule in schema.rules_for(level).iter().filter(|rule| rule.required) {
        if !object.contains_key(rule.name) {
            report.push(join(path, rule.name), ViolationKind::RequiredKeyMissing);
        }
    }
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

fn as_integer(value: &Value) -> Option<f64> {
    let number = value.as_f64()?;
    (number.is_finite() && number.fract() == 0.0).then_some(number)
}

// Numbers and strings that start with a number both count. Zero is a valid
// decimal.
fn as_decimal(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => leading_decimal(text),
        _ => None,
    }
}

fn leading_decimal(text: &str) -> Option<f64> {
    LEADING_DECIMAL
        .find(text.trim_start())
        .and_then(|number| number.as_str().parse::<f64>().ok())
        .filter(|number| number.is_finite())
}

fn check_range(number: f64, rule: &SchemaRule) -> Option<ViolationKind> {
    let below = rule.min.is_some_and(|min| number < min);
    let above = rule.max.is_some_and(|max| number > max);

    (below || above).then_some(ViolationKind::OutOfRange {
        value: number,
        min: rule.min,
        max: rule.max,
    })
}

fn check_length(value: &Value, rule: &SchemaRule) -> Option<ViolationKind> {
    let length = match value {
        Value::String(text) => text.chars().count(),
        Value::Number(number) => number.to_string().chars().count(),
        Value::Bool(flag) => flag.to_string().len(),
        Value::Null => 0,
        Value::Array(_) | Value::Object(_) => return Some(wrong_type(FieldType::String, value)),
    };

    let max = rule.max? as usize;
    (length > max).then_some(ViolationKind::TooLong { length, max })
}

fn wrong_type(expected: FieldType, found: &Value) -> ViolationKind {
    ViolationKind::WrongType {
        expected,
        found: describe(found),
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => format!("{text:?}"),
        Value::Array(_) => "a sequence".to_string(),
        Value::Object(_) => "a mapping".to_string(),
    }
}

#[cfg(test)]
#[path = "validate/validate_tests.rs"]
mod validate_tests;

#[cfg(test)]
#[path = "validate/validate_parameterized_tests.rs"]
mod validate_parameterized_tests;
