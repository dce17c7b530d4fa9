//! Symbolic reference resolution
//!
//! Two entry points over the same substitution rules:
//! - [`parse_in_place`] rewrites condition values inside the domain itself
//! - [`resolve`] leaves the domain untouched and returns a [`ResolvedDomain`]
//!
//! Only condition values are substituted; operands are looked up against the
//! current record at evaluation time.

mod resolved;
mod symbol;

pub use resolved::{ResolvedCondition, ResolvedDomain};
pub use symbol::SymbolicRef;
pub(crate) use symbol::{resolve_object_path, resolve_parent_key, resolve_user_key, Resolution};

use crate::context::EvalContext;
use domex_core::Domain;

/// Substitute every resolvable reference in place.
///
/// Values whose reference cannot be resolved keep their literal string, and a
/// substituted value is not re-resolved on a later call unless it still looks
/// like a reference.
pub fn parse_in_place(domain: &mut Domain, ctx: &EvalContext) {
    for clause in domain.clauses_mut() {
        for condition in clause.conditions_mut() {
            let resolution = SymbolicRef::classify(&condition.value).resolve(ctx);
            match resolution {
                Resolution::Resolved(value) => condition.value = value,
                Resolution::Unresolved => {
                    tracing::debug!("Leaving unresolved reference {}", condition.value);
                }
                Resolution::Literal => {}
            }
        }
    }
}

/// Resolve every reference into a new structure; the domain is not modified
pub fn resolve(domain: &Domain, ctx: &EvalContext) -> ResolvedDomain {
    let clauses = domain
        .clauses()
        .iter()
        .map(|clause| {
            clause
                .conditions()
                .iter()
                .map(|condition| {
                    let value = match SymbolicRef::classify(&condition.value).resolve(ctx) {
                        Resolution::Resolved(value) => Some(value),
                        Resolution::Literal => Some(condition.value.clone()),
                        Resolution::Unresolved => None,
                    };
                    ResolvedCondition {
                        operand: condition.operand.clone(),
                        operator: condition.operator.clone(),
                        value,
                    }
                })
                .collect()
        })
        .collect();

    ResolvedDomain::new(clauses)
}
