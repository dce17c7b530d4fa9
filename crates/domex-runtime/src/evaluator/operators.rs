//! Operator table and typed comparator

use crate::error::{Result, RuntimeError};
use domex_core::{Operator, Value};
use std::cmp::Ordering;

/// Apply `operator` to an already-resolved operand and value.
///
/// `None` means the condition does not take part in its clause.
pub(crate) fn apply(operand: &Value, operator: &Operator, value: &Value) -> Option<bool> {
    match operator.normalized(operand.is_number()) {
        Operator::Is => emptiness_check(operand, value),
        Operator::IsNot => emptiness_check(operand, value).map(|verdict| !verdict),
        Operator::In => Some(as_list(value).contains(operand)),
        Operator::NotIn => Some(!as_list(value).contains(operand)),
        Operator::Contains => match operand {
            Value::Array(items) => Some(items.contains(value)),
            _ => {
                tracing::debug!("Skipping contains on non-array operand {}", operand);
                None
            }
        },
        op => match execute_compare(operand, &op, value) {
            Ok(verdict) => Some(verdict),
            Err(e) => {
                tracing::warn!("Cannot evaluate {} {} {}: {}", operand, op, value, e);
                Some(false)
            }
        },
    }
}

/// `is` semantics. A true-ish value checks truthiness, a false/null/empty
/// value checks emptiness, anything else gives no verdict.
fn emptiness_check(operand: &Value, value: &Value) -> Option<bool> {
    match value {
        Value::Bool(true) => Some(operand.is_truthy()),
        Value::String(s) if s == "true" => Some(operand.is_truthy()),
        Value::Bool(false) | Value::Null => Some(operand.is_empty_like()),
        Value::String(s) if matches!(s.as_str(), "false" | "null" | "empty") => {
            Some(operand.is_empty_like())
        }
        _ => {
            tracing::debug!("Skipping is-check against {}", value);
            None
        }
    }
}

fn as_list(value: &Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items.clone(),
        other => vec![other.clone()],
    }
}

/// A value usable on the numeric side of an equality or ordering check
fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => Some(*n),
        Value::String(s) if !s.trim().is_empty() => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Execute a generic comparison.
///
/// `<` and `>` are numeric: the value is coerced (0 when not a number) and
/// the operand converted. `==`, `!=`, `<=`, `>=` are numeric for a numeric
/// operand and a numeric value, and compare text otherwise. `like`/`ilike`
/// are pattern matches.
pub(crate) fn execute_compare(left: &Value, op: &Operator, right: &Value) -> Result<bool> {
    match op {
        Operator::Gt | Operator::Lt => {
            let rhs = right.to_number();
            let rhs = if rhs.is_nan() { 0.0 } else { rhs };
            let lhs = left.to_number();
            Ok(match op {
                Operator::Gt => lhs > rhs,
                _ => lhs < rhs,
            })
        }
        Operator::Eq | Operator::Ne | Operator::Le | Operator::Ge => {
            let ordering = match (left, numeric(right)) {
                (Value::Number(l), Some(r)) => l.partial_cmp(&r),
                _ => Some(left.to_string().cmp(&right.to_string())),
            };
            Ok(match (op, ordering) {
                (Operator::Eq, ordering) => ordering == Some(Ordering::Equal),
                (Operator::Ne, ordering) => ordering != Some(Ordering::Equal),
                (Operator::Le, Some(ordering)) => ordering != Ordering::Greater,
                (Operator::Ge, Some(ordering)) => ordering != Ordering::Less,
                _ => false,
            })
        }
        Operator::Like => Ok(like_match(&left.to_string(), &right.to_string())),
        Operator::ILike => Ok(like_match(
            &left.to_string().to_lowercase(),
            &right.to_string().to_lowercase(),
        )),
        Operator::Unsupported(token) => Err(RuntimeError::UnsupportedOperator(token.clone())),
        other => Err(RuntimeError::InvalidOperation(format!(
            "{} is not a comparison operator",
            other
        ))),
    }
}

/// SQL-style pattern match: `%` is any run, `_` any single character.
/// A pattern without wildcards must equal the whole text.
fn like_match(text: &str, pattern: &str) -> bool {
    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();

    // matched[j]: text[..i] matches pattern[..j]
    let mut matched = vec![false; pattern.len() + 1];
    matched[0] = true;
    for j in 1..=pattern.len() {
        matched[j] = matched[j - 1] && pattern[j - 1] == '%';
    }

    for &c in &text {
        let mut next = vec![false; pattern.len() + 1];
        for j in 1..=pattern.len() {
            next[j] = match pattern[j - 1] {
                '%' => next[j - 1] || matched[j],
                '_' => matched[j - 1],
                p => matched[j - 1] && p == c,
            };
        }
        matched = next;
    }

    matched[pattern.len()]
}
