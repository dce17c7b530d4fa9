//! Domex Runtime - Context resolution and evaluation for domain expressions
//!
//! This crate turns the symbolic values of a domain (`object.`, `user.`,
//! `parent.`, `env.`, `date.` references) into concrete values and evaluates
//! the domain against a record.

pub mod context;
pub mod date_reference;
pub mod error;
pub mod evaluator;
pub mod loader;
pub mod reference;
pub mod resolver;

// Re-export main types
pub use context::{to_record, EvalContext, Record};
pub use date_reference::DateReference;
pub use error::{Result, RuntimeError};
pub use evaluator::DomainExt;
pub use loader::DomainDocument;
pub use reference::Reference;
pub use resolver::{ResolvedCondition, ResolvedDomain, SymbolicRef};
