//! Conjunction of conditions

use super::condition::Condition;
use crate::types::Value;

/// Ordered conditions, all of which must hold
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Clause {
    conditions: Vec<Condition>,
}

impl Clause {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a condition. No de-duplication.
    pub fn add_condition(&mut self, condition: Condition) {
        self.conditions.push(condition);
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn conditions_mut(&mut self) -> &mut [Condition] {
        &mut self.conditions
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn to_array(&self) -> Value {
        Value::Array(self.conditions.iter().map(Condition::to_array).collect())
    }
}

impl From<Vec<Condition>> for Clause {
    fn from(conditions: Vec<Condition>) -> Self {
        Self { conditions }
    }
}

impl FromIterator<Condition> for Clause {
    fn from_iter<I: IntoIterator<Item = Condition>>(iter: I) -> Self {
        Self {
            conditions: iter.into_iter().collect(),
        }
    }
}
