//! Record validation against a table schema
//!
//! Insert semantics:
//! - Every declared column is present (checked in declaration order)
//! - Every declared column's value satisfies its type
//! - No undeclared columns, unless the schema is empty
//!
//! Update semantics:
//! - Patch columns must be declared and their values must satisfy the type
//! - Tables with an empty schema fall back to the target record: the column
//!   must already exist there and keep the JSON kind of its current value
//!
//! Type checks dispatch on the descriptor family with its parameters
//! resolved, so `INT(10)` and `INT` are both checked as integers.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

use super::errors::{ValidationError, ValidationResult};
use super::types::{Record, Schema};
use crate::types::TypeDescriptor;

/// Optional sign, integer digits, optional fraction digits.
static DECIMAL_PATTERN: OnceLock<Regex> = OnceLock::new();

fn decimal_pattern() -> &'static Regex {
    DECIMAL_PATTERN.get_or_init(|| {
        Regex::new(r"^-?([0-9]+)(?:\.([0-9]+))?$").expect("decimal pattern is valid")
    })
}

/// Checks a single value against a descriptor.
///
/// Null never satisfies a descriptor.
pub fn validate(descriptor: &TypeDescriptor, value: &Value) -> bool {
    match descriptor {
        TypeDescriptor::Int { .. } => is_integral(value),
        TypeDescriptor::TinyInt => {
            integral_value(value).map_or(false, |n| (-128.0..=127.0).contains(&n))
        }
        TypeDescriptor::Varchar { size } | TypeDescriptor::Char { size } => match value {
            Value::String(s) => size.map_or(true, |max| s.chars().count() <= max as usize),
            _ => false,
        },
        TypeDescriptor::Text => value.is_string(),
        TypeDescriptor::Boolean => {
            value.is_boolean() || value.as_u64().map_or(false, |n| n <= 1)
        }
        TypeDescriptor::Float | TypeDescriptor::Double => value.is_number(),
        TypeDescriptor::Decimal { digits } => value
            .as_str()
            .map_or(false, |s| is_decimal(s, *digits)),
        TypeDescriptor::Date => value
            .as_str()
            .map_or(false, |s| NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()),
        TypeDescriptor::Time => value
            .as_str()
            .map_or(false, |s| NaiveTime::parse_from_str(s, "%H:%M:%S").is_ok()),
        TypeDescriptor::DateTime => value.as_str().map_or(false, is_datetime),
    }
}

/// Validator bound to one table schema.
///
/// Does not mutate records. Deterministic.
pub struct RecordValidator<'a> {
    schema: &'a Schema,
}

impl<'a> RecordValidator<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// Validates a record for insertion.
    ///
    /// # Errors
    ///
    /// - `MissingColumn` for the first declared column absent from the record
    /// - `InvalidType` for the first declared column whose value fails its type
    /// - `UnknownColumn` for the first record column not declared
    pub fn validate_record(&self, record: &Record) -> ValidationResult<()> {
        for column in self.schema.columns() {
            let value = record
                .get(&column.name)
                .ok_or_else(|| ValidationError::MissingColumn(column.name.clone()))?;

            if !validate(&column.descriptor, value) {
                return Err(ValidationError::invalid_type(
                    &column.name,
                    column.descriptor.render(),
                    json_type_name(value),
                ));
            }
        }

        if !self.schema.is_empty() {
            if let Some(unknown) = record.keys().find(|k| !self.schema.contains(k)) {
                return Err(ValidationError::UnknownColumn(unknown.clone()));
            }
        }

        Ok(())
    }

    /// Validates a partial update against the record it will be merged into.
    pub fn validate_patch(&self, target: &Record, patch: &Record) -> ValidationResult<()> {
        for (column, value) in patch {
            if self.schema.is_empty() {
                let current = target
                    .get(column)
                    .ok_or_else(|| ValidationError::UnknownColumn(column.clone()))?;

                if json_kind(current) != json_kind(value) {
                    return Err(ValidationError::invalid_type(
                        column,
                        json_kind(current),
                        json_kind(value),
                    ));
                }
                continue;
            }

            let descriptor = self
                .schema
                .get(column)
                .ok_or_else(|| ValidationError::UnknownColumn(column.clone()))?;

            if !validate(descriptor, value) {
                return Err(ValidationError::invalid_type(
                    column,
                    descriptor.render(),
                    json_type_name(value),
                ));
            }
        }

        Ok(())
    }
}

fn integral_value(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n,
        _ => return None,
    };
    if let Some(i) = n.as_i64() {
        return Some(i as f64);
    }
    if let Some(u) = n.as_u64() {
        return Some(u as f64);
    }
    n.as_f64().filter(|f| f.is_finite() && f.fract() == 0.0)
}

/// Integral numbers, including floats with no fractional part (`3.0`).
fn is_integral(value: &Value) -> bool {
    integral_value(value).is_some()
}

/// `digits.fraction` where the fraction has exactly `scale` digits and the
/// total digit count fits `precision`. Unparameterized DECIMAL takes any
/// decimal string.
fn is_decimal(s: &str, digits: Option<(u32, u32)>) -> bool {
    let caps = match decimal_pattern().captures(s) {
        Some(caps) => caps,
        None => return false,
    };

    let (precision, scale) = match digits {
        Some(d) => d,
        None => return true,
    };

    let integer_digits = caps.get(1).map_or(0, |m| m.as_str().len());
    let fraction_digits = caps.get(2).map_or(0, |m| m.as_str().len());

    fraction_digits == scale as usize && integer_digits + fraction_digits <= precision as usize
}

fn is_datetime(s: &str) -> bool {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").is_ok()
        || NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").is_ok()
        || DateTime::parse_from_rfc3339(s).is_ok()
}

/// Returns the JSON type name for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "int"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Coarse runtime kind; integers and floats are both `number`.
fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Number(_) => "number",
        other => json_type_name(other),
    }
}
