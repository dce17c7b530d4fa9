//! Domain expressions
//!
//! A domain is a disjunction (OR) of clauses, each clause a conjunction (AND)
//! of `(operand, operator, value)` conditions.
//!
//! # Accepted input shapes
//!
//! ```text
//! []                                         -> empty, always true
//! ["state", "=", "draft"]                    -> one clause, one condition
//! [["state", "=", "draft"], ["a", ">", 1]]   -> one clause, AND of conditions
//! [[["state", "=", "draft"]], [["a", ">", 1]]] -> canonical: OR of clauses
//! ```
//!
//! Shape detection looks for a length-3 array whose second element is a
//! known operator token, at the top level, then at the first element, then at
//! the first element's first element. Input that matches none of them
//! normalizes to an empty domain with a warning.

mod clause;
mod condition;
#[allow(clippy::module_inception)]
mod domain;

pub use clause::Clause;
pub use condition::Condition;
pub use domain::Domain;
