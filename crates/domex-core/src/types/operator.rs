//! Operators for domain conditions

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Every token a condition array may carry at position 1.
pub const OPERATOR_TOKENS: [&str; 15] = [
    "=", "==", "!=", "<>", ">", "<", "<=", ">=", "like", "ilike", "is", "is not", "in", "not in",
    "contains",
];

/// Condition operator.
///
/// Aliases (`=`/`==`, `!=`/`<>`) are kept as distinct variants so a domain
/// serializes back with the token it was built from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    // Equality
    /// Equal (=)
    Assign,
    /// Equal (==)
    Eq,
    /// Not equal (!=)
    Ne,
    /// Not equal (<>)
    NeAlt,

    // Ordering
    /// Greater than (>)
    Gt,
    /// Less than (<)
    Lt,
    /// Less than or equal (<=)
    Le,
    /// Greater than or equal (>=)
    Ge,

    // Pattern matching
    /// Case-sensitive pattern match (like)
    Like,
    /// Case-insensitive pattern match (ilike)
    ILike,

    // Emptiness
    /// Truthiness / emptiness test (is)
    Is,
    /// Negated truthiness / emptiness test (is not)
    IsNot,

    // Membership
    /// In (element in array/list)
    In,
    /// Not in
    NotIn,
    /// Array operand contains value
    Contains,

    /// Any token outside the supported set, carried until evaluation
    Unsupported(String),
}

impl Operator {
    /// Parse a token; anything outside the fixed set becomes `Unsupported`.
    pub fn from_token(token: &str) -> Self {
        match token {
            "=" => Operator::Assign,
            "==" => Operator::Eq,
            "!=" => Operator::Ne,
            "<>" => Operator::NeAlt,
            ">" => Operator::Gt,
            "<" => Operator::Lt,
            "<=" => Operator::Le,
            ">=" => Operator::Ge,
            "like" => Operator::Like,
            "ilike" => Operator::ILike,
            "is" => Operator::Is,
            "is not" => Operator::IsNot,
            "in" => Operator::In,
            "not in" => Operator::NotIn,
            "contains" => Operator::Contains,
            other => Operator::Unsupported(other.to_string()),
        }
    }

    /// Returns true if `token` belongs to the supported operator set
    pub fn is_known(token: &str) -> bool {
        OPERATOR_TOKENS.contains(&token)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Operator::Assign => "=",
            Operator::Eq => "==",
            Operator::Ne => "!=",
            Operator::NeAlt => "<>",
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Ge => ">=",
            Operator::Like => "like",
            Operator::ILike => "ilike",
            Operator::Is => "is",
            Operator::IsNot => "is not",
            Operator::In => "in",
            Operator::NotIn => "not in",
            Operator::Contains => "contains",
            Operator::Unsupported(token) => token,
        }
    }

    /// Evaluation-time rewrite: `=` becomes `==`, `<>` becomes `!=`, and for a
    /// numeric operand `is` / `is not` become `==` / `!=`.
    pub fn normalized(&self, operand_is_number: bool) -> Operator {
        match self {
            Operator::Assign => Operator::Eq,
            Operator::NeAlt => Operator::Ne,
            Operator::Is if operand_is_number => Operator::Eq,
            Operator::IsNot if operand_is_number => Operator::Ne,
            other => other.clone(),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Operator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Operator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Ok(Operator::from_token(&token))
    }
}
