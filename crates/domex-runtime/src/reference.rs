//! Single-value references
//!
//! The non-boolean counterpart of condition value resolution, used for things
//! like action parameters (`"object.id"` becomes the current record's id).
//! Only the `object.`, `user.` and `parent.` prefixes are understood.

use crate::context::Record;
use crate::resolver::{resolve_object_path, resolve_parent_key, resolve_user_key, SymbolicRef};
use domex_core::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    value: Value,
}

impl Reference {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Resolve against the given records. Anything that is not a resolvable
    /// `object.` / `user.` / `parent.` reference comes back unchanged.
    pub fn parse(&self, object: &Record, user: &Record, parent: &Record) -> Value {
        let resolved = match SymbolicRef::classify(&self.value) {
            SymbolicRef::Object(path) => resolve_object_path(object, path),
            SymbolicRef::User(key) => resolve_user_key(user, key),
            SymbolicRef::Parent(key) => resolve_parent_key(parent, key),
            SymbolicRef::Literal | SymbolicRef::Date(_) | SymbolicRef::Env(_) => None,
        };

        resolved.unwrap_or_else(|| self.value.clone())
    }
}

impl From<Value> for Reference {
    fn from(value: Value) -> Self {
        Self { value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::to_record;
    use serde_json::json;

    fn parse(value: Value) -> Value {
        let object = to_record(json!({"id": 12, "partner": {"id": 3}, "note": null}));
        let user = to_record(json!({"id": 42}));
        let parent = to_record(json!({"stage": {"name": "New"}, "owner": null}));
        Reference::new(value).parse(&object, &user, &parent)
    }

    #[test]
    fn test_object_reference() {
        assert_eq!(parse(Value::from("object.id")), Value::Number(12.0));
        assert_eq!(parse(Value::from("object.partner")), Value::Number(3.0));
        assert_eq!(parse(Value::from("object.note")), Value::from("null"));
    }

    #[test]
    fn test_user_and_parent_reference() {
        assert_eq!(parse(Value::from("user.id")), Value::Number(42.0));
        assert_eq!(parse(Value::from("parent.stage")), Value::from("New"));
        assert_eq!(parse(Value::from("parent.owner")), Value::Null);
    }

    #[test]
    fn test_unresolved_returns_input_unchanged() {
        assert_eq!(parse(Value::from("object.missing")), Value::from("object.missing"));
        assert_eq!(parse(Value::from("user.lang")), Value::from("user.lang"));
    }

    #[test]
    fn test_non_reference_values_unchanged() {
        assert_eq!(parse(Value::Number(7.0)), Value::Number(7.0));
        assert_eq!(parse(Value::from("draft")), Value::from("draft"));
        // date and env references are not resolved here
        assert_eq!(parse(Value::from("env.lang")), Value::from("env.lang"));
        assert_eq!(parse(Value::from("date.this.day")), Value::from("date.this.day"));
    }
}
