//! Evaluation context implementation

use chrono::{DateTime, Local};
use domex_core::Value;
use serde::Deserialize;
use std::collections::HashMap;

/// A flat key-value record (the current record, user, parent or environment)
pub type Record = HashMap<String, Value>;

/// Convert a JSON object into a record. Anything else gives an empty record.
pub fn to_record(json: serde_json::Value) -> Record {
    match Value::from(json) {
        Value::Object(map) => map,
        _ => Record::new(),
    }
}

/// Context a domain is resolved and evaluated against
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EvalContext {
    /// Current record (`object.` references and field operands)
    pub object: Record,
    /// Logged-in user (`user.` references)
    pub user: Record,
    /// Parent record of a nested view (`parent.` references)
    pub parent: Record,
    /// Environment flags (`env.` references)
    pub env: Record,
    /// Fixed clock for `date.` references; the system clock when unset
    pub now: Option<DateTime<Local>>,
}

impl EvalContext {
    /// Create a context with only the current record
    pub fn new(object: Record) -> Self {
        Self {
            object,
            ..Self::default()
        }
    }

    /// Builder method to add the user record
    pub fn with_user(mut self, user: Record) -> Self {
        self.user = user;
        self
    }

    /// Builder method to add the parent record
    pub fn with_parent(mut self, parent: Record) -> Self {
        self.parent = parent;
        self
    }

    /// Builder method to add environment values
    pub fn with_env(mut self, env: Record) -> Self {
        self.env = env;
        self
    }

    /// Builder method to pin the clock
    pub fn with_now(mut self, now: DateTime<Local>) -> Self {
        self.now = Some(now);
        self
    }

    pub fn now(&self) -> DateTime<Local> {
        self.now.unwrap_or_else(Local::now)
    }
}
