//! Domain evaluation
//!
//! A condition yields `Some(bool)` or `None`; `None` drops it from its
//! clause's conjunction. A clause holds when every remaining condition
//! holds, a domain when any clause holds, and a domain without clauses
//! always holds.

mod operators;

use crate::context::{EvalContext, Record};
use crate::resolver::{self, ResolvedDomain};
use domex_core::{Domain, Operator, Value};

pub(crate) use operators::apply;

/// Runtime operations on a [`Domain`]
pub trait DomainExt {
    /// Substitute symbolic values in place against `ctx`
    fn parse(&mut self, ctx: &EvalContext) -> &mut Self;

    /// Substitute symbolic values into a new structure, leaving `self` untouched
    fn resolve(&self, ctx: &EvalContext) -> ResolvedDomain;

    /// Resolve against `ctx` and evaluate with operands read from `ctx.object`.
    ///
    /// The domain is not modified, so the same instance can be evaluated
    /// against any number of records.
    fn evaluate(&self, ctx: &EvalContext) -> bool;

    /// Evaluate the stored values with operands taken as literals
    fn test(&self) -> bool;
}

impl DomainExt for Domain {
    fn parse(&mut self, ctx: &EvalContext) -> &mut Self {
        resolver::parse_in_place(self, ctx);
        self
    }

    fn resolve(&self, ctx: &EvalContext) -> ResolvedDomain {
        resolver::resolve(self, ctx)
    }

    fn evaluate(&self, ctx: &EvalContext) -> bool {
        if self.is_empty() {
            return true;
        }
        self.resolve(ctx).evaluate(&ctx.object)
    }

    fn test(&self) -> bool {
        domain_verdict(self.clauses().iter().map(|clause| {
            clause_verdict(clause.conditions().iter().map(|condition| {
                condition_verdict(
                    &condition.operand,
                    &condition.operator,
                    Some(&condition.value),
                    None,
                )
            }))
        }))
    }
}

/// Look a field-name operand up on the record.
///
/// A related record collapses to its `id` (null without one). Operands that
/// are not a key of the record are used as literals.
fn resolve_operand(operand: &Value, object: &Record) -> Value {
    let Value::String(field) = operand else {
        return operand.clone();
    };

    match object.get(field) {
        Some(Value::Object(map)) => map.get("id").cloned().unwrap_or(Value::Null),
        Some(value) => value.clone(),
        None => operand.clone(),
    }
}

/// Verdict for one condition; `object` is `None` when operands are literals
pub(crate) fn condition_verdict(
    operand: &Value,
    operator: &Operator,
    value: Option<&Value>,
    object: Option<&Record>,
) -> Option<bool> {
    let Some(value) = value else {
        tracing::debug!("Skipping {} {}: unresolved reference", operand, operator);
        return None;
    };

    match object {
        Some(record) => apply(&resolve_operand(operand, record), operator, value),
        None => apply(operand, operator, value),
    }
}

/// AND over the conditions that produced a verdict
pub(crate) fn clause_verdict(verdicts: impl IntoIterator<Item = Option<bool>>) -> bool {
    verdicts
        .into_iter()
        .flatten()
        .fold(true, |acc, verdict| acc && verdict)
}

/// OR over clauses; no clauses at all is true
pub(crate) fn domain_verdict(clauses: impl IntoIterator<Item = bool>) -> bool {
    let mut seen = false;
    let mut result = false;
    for verdict in clauses {
        seen = true;
        result |= verdict;
    }
    !seen || result
}
