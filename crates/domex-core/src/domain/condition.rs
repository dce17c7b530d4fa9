//! Atomic `(operand, operator, value)` predicate

use crate::types::{Operator, Value};

/// A single condition of a clause.
///
/// Nothing is validated at construction: an operator outside the supported
/// set is kept as `Operator::Unsupported` and only rejected at evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// Field name, literal, or symbolic reference
    pub operand: Value,
    pub operator: Operator,
    /// Literal, array, or symbolic reference (`object.`, `user.`, `parent.`, `env.`, `date.`)
    pub value: Value,
}

impl Condition {
    pub fn new(operand: impl Into<Value>, operator: Operator, value: impl Into<Value>) -> Self {
        Self {
            operand: operand.into(),
            operator,
            value: value.into(),
        }
    }

    /// Build a condition from its positional form. Missing positions become null.
    pub fn from_array(items: &[Value]) -> Self {
        let operator = match items.get(1) {
            Some(Value::String(token)) => Operator::from_token(token),
            Some(other) => Operator::Unsupported(other.to_string()),
            None => Operator::Unsupported(String::new()),
        };

        Self {
            operand: items.first().cloned().unwrap_or_default(),
            operator,
            value: items.get(2).cloned().unwrap_or_default(),
        }
    }

    /// Positional form. A null value is written as the string `"null"`, which
    /// is what the backend query encoder expects.
    pub fn to_array(&self) -> Value {
        let value = match &self.value {
            Value::Null => Value::String("null".to_string()),
            other => other.clone(),
        };

        Value::Array(vec![
            self.operand.clone(),
            Value::String(self.operator.as_str().to_string()),
            value,
        ])
    }
}
