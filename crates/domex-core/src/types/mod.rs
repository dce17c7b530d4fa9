//! Type system for domain expressions
//!
//! This module contains:
//! - Value types
//! - The operator set

pub mod operator;
pub mod value;

pub use operator::Operator;
pub use value::Value;
