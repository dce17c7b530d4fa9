//! Immutable result of resolving a domain against a context

use crate::context::Record;
use crate::evaluator::{clause_verdict, condition_verdict, domain_verdict};
use domex_core::{Operator, Value};

/// A condition whose value has gone through reference substitution
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCondition {
    pub operand: Value,
    pub operator: Operator,
    /// `None` when the value was a reference that could not be resolved
    pub value: Option<Value>,
}

/// Resolved clauses, ready to be evaluated any number of times
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedDomain {
    clauses: Vec<Vec<ResolvedCondition>>,
}

impl ResolvedDomain {
    pub(crate) fn new(clauses: Vec<Vec<ResolvedCondition>>) -> Self {
        Self { clauses }
    }

    pub fn clauses(&self) -> &[Vec<ResolvedCondition>] {
        &self.clauses
    }

    pub fn conditions(&self) -> impl Iterator<Item = &ResolvedCondition> {
        self.clauses.iter().flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Evaluate with operands looked up on `object`
    pub fn evaluate(&self, object: &Record) -> bool {
        self.verdict(Some(object))
    }

    /// Evaluate with operands taken as literals
    pub fn test(&self) -> bool {
        self.verdict(None)
    }

    fn verdict(&self, object: Option<&Record>) -> bool {
        domain_verdict(self.clauses.iter().map(|clause| {
            clause_verdict(clause.iter().map(|condition| {
                condition_verdict(
                    &condition.operand,
                    &condition.operator,
                    condition.value.as_ref(),
                    object,
                )
            }))
        }))
    }
}
