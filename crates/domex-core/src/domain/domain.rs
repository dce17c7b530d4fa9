//! Disjunction of clauses: normalization, fan-out and merge

use super::clause::Clause;
use super::condition::Condition;
use crate::error::{CoreError, Result};
use crate::types::{Operator, Value};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// OR of clauses. An empty domain matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Domain {
    clauses: Vec<Clause>,
}

/// A length-3 array whose second element is a supported operator token.
fn is_condition_array(value: &Value) -> bool {
    match value.as_array() {
        Some(items) if items.len() == 3 => {
            matches!(&items[1], Value::String(token) if Operator::is_known(token))
        }
        _ => false,
    }
}

fn condition_from(value: &Value) -> Result<Condition> {
    value
        .as_array()
        .map(|items| Condition::from_array(items))
        .ok_or_else(|| CoreError::InvalidCondition(format!("expected an array, got {}", value)))
}

fn clause_from(items: &[Value]) -> Result<Clause> {
    items.iter().map(condition_from).collect()
}

impl Domain {
    /// Create an empty domain
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a domain from any of the accepted shapes
    pub fn from_value(raw: &Value) -> Self {
        let mut domain = Self::new();
        domain.from_array(raw);
        domain
    }

    /// Replace every clause with the normalized form of `raw`
    #[allow(clippy::wrong_self_convention)]
    pub fn from_array(&mut self, raw: &Value) -> &mut Self {
        self.clauses = Self::normalize(raw);
        self
    }

    /// Normalize raw input into clauses.
    ///
    /// Never fails: input in none of the accepted shapes logs a warning and
    /// yields no clauses, so the domain matches everything.
    pub fn normalize(raw: &Value) -> Vec<Clause> {
        match Self::try_normalize(raw) {
            Ok(clauses) => clauses,
            Err(e) => {
                log::warn!("{}; treating domain as empty", e);
                Vec::new()
            }
        }
    }

    /// Normalize raw input into clauses, reporting why malformed input was rejected
    pub fn try_normalize(raw: &Value) -> Result<Vec<Clause>> {
        let items = match raw {
            Value::Null => return Ok(Vec::new()),
            Value::Array(items) => items,
            other => {
                return Err(CoreError::InvalidDomain(format!(
                    "expected an array, got {}",
                    other
                )))
            }
        };

        if items.is_empty() {
            return Ok(Vec::new());
        }

        // ["field", "=", value]
        if is_condition_array(raw) {
            let clause: Clause = vec![Condition::from_array(items)].into();
            return Ok(vec![clause]);
        }

        // [["field", "=", value], ...]
        let first = &items[0];
        if is_condition_array(first) {
            return Ok(vec![clause_from(items)?]);
        }

        // [[["field", "=", value], ...], ...]
        let first_of_first = first.as_array().and_then(|inner| inner.first());
        if first_of_first.is_some_and(is_condition_array) {
            return items
                .iter()
                .map(|clause| match clause.as_array() {
                    Some(conditions) => clause_from(conditions),
                    None => Err(CoreError::InvalidDomain(format!(
                        "expected a clause array, got {}",
                        clause
                    ))),
                })
                .collect();
        }

        Err(CoreError::InvalidDomain(format!(
            "unrecognized domain shape: {}",
            serde_json::Value::from(raw.clone())
        )))
    }

    /// Parse a domain from its JSON text form
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: serde_json::Value = serde_json::from_str(json)?;
        Ok(Self::from_value(&Value::from(raw)))
    }

    /// Canonical JSON text, as sent in a backend `domain=` query parameter
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(&serde_json::Value::from(self.to_array()))?)
    }

    /// Append a whole clause (a new disjunct)
    pub fn add_clause(&mut self, clause: Clause) -> &mut Self {
        self.clauses.push(clause);
        self
    }

    /// Append `condition` to every existing clause.
    ///
    /// This ANDs the condition into each disjunct; on a domain with no
    /// clauses it does nothing.
    pub fn add_condition(&mut self, condition: Condition) -> &mut Self {
        for clause in &mut self.clauses {
            clause.add_condition(condition.clone());
        }
        self
    }

    /// Conjunctive merge: `(A1 | A2) & (B1 | B2)` becomes
    /// `(A1 & B1) | (A1 & B2) | (A2 & B1) | (A2 & B2)`.
    ///
    /// The outer loop runs over `other`'s clauses and each merged clause lists
    /// `other`'s conditions first. An empty side yields the other side.
    pub fn merge(&mut self, other: &Domain) -> &mut Self {
        let a = clause_arrays(&other.to_array());
        let b = clause_arrays(&self.to_array());

        let merged: Vec<Vec<Value>> = if a.is_empty() {
            b
        } else if b.is_empty() {
            a
        } else {
            let mut result = Vec::with_capacity(a.len() * b.len());
            for clause_a in &a {
                for clause_b in &b {
                    let mut conditions = clause_a.clone();
                    conditions.extend(clause_b.iter().cloned());
                    result.push(conditions);
                }
            }
            result
        };

        let canonical = merged.into_iter().map(Value::Array).collect();
        self.from_array(&Value::Array(canonical))
    }

    /// Canonical three-level array form
    pub fn to_array(&self) -> Value {
        Value::Array(self.clauses.iter().map(Clause::to_array).collect())
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn clauses_mut(&mut self) -> &mut [Clause] {
        &mut self.clauses
    }

    /// Every condition of every clause, in order
    pub fn conditions(&self) -> impl Iterator<Item = &Condition> {
        self.clauses.iter().flat_map(|clause| clause.conditions().iter())
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

/// Split a canonical array into its clause arrays
fn clause_arrays(canonical: &Value) -> Vec<Vec<Value>> {
    canonical
        .as_array()
        .map(|clauses| {
            clauses
                .iter()
                .filter_map(|clause| clause.as_array().cloned())
                .collect()
        })
        .unwrap_or_default()
}

impl From<Vec<Clause>> for Domain {
    fn from(clauses: Vec<Clause>) -> Self {
        Self { clauses }
    }
}

impl From<&Value> for Domain {
    fn from(raw: &Value) -> Self {
        Self::from_value(raw)
    }
}

impl From<serde_json::Value> for Domain {
    fn from(raw: serde_json::Value) -> Self {
        Self::from_value(&Value::from(raw))
    }
}

impl Serialize for Domain {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serde_json::Value::from(self.to_array()).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Domain {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(Domain::from(raw))
    }
}
