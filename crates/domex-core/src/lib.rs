//! Domex Core - Core types for the domain expression engine
//!
//! This crate provides the data model shared by every consumer of filter domains:
//! - Value types for record data
//! - The fixed operator set
//! - Condition / Clause / Domain structures, normalization and merging
//! - Error types

pub mod domain;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use domain::{Clause, Condition, Domain};
pub use error::CoreError;
pub use types::{Operator, Value};
