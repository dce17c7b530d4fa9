//! Evaluation context module
//!
//! Holds the records symbolic references are resolved against.

#[allow(clippy::module_inception)]
mod context;
mod field_lookup;

pub use context::{to_record, EvalContext, Record};
pub(crate) use field_lookup::lookup_path;
