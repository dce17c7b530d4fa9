//! Classification and substitution of symbolic references

use crate::context::{lookup_path, EvalContext, Record};
use crate::date_reference::DateReference;
use domex_core::Value;

const OBJECT_PREFIX: &str = "object.";
const USER_PREFIX: &str = "user.";
const PARENT_PREFIX: &str = "parent.";
const DATE_PREFIX: &str = "date.";
const ENV_PREFIX: &str = "env.";

/// What a condition value refers to.
///
/// The wire form is a plain string with one of the prefixes `object.`,
/// `user.`, `parent.`, `date.` or `env.`; everything else is a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolicRef<'a> {
    Literal,
    /// Dot path into the current record
    Object(&'a str),
    /// Key of the user record
    User(&'a str),
    /// Key of the parent record
    Parent(&'a str),
    /// Full date descriptor, prefix included
    Date(&'a str),
    /// Key of the environment record
    Env(&'a str),
}

/// Outcome of substituting one value
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Resolution {
    /// Not a reference; keep the value
    Literal,
    Resolved(Value),
    /// A reference whose target is missing
    Unresolved,
}

impl From<Option<Value>> for Resolution {
    fn from(value: Option<Value>) -> Self {
        value.map_or(Resolution::Unresolved, Resolution::Resolved)
    }
}

impl<'a> SymbolicRef<'a> {
    pub fn classify(value: &'a Value) -> Self {
        let Value::String(s) = value else {
            return SymbolicRef::Literal;
        };

        if let Some(path) = s.strip_prefix(OBJECT_PREFIX) {
            SymbolicRef::Object(path)
        } else if let Some(key) = s.strip_prefix(USER_PREFIX) {
            SymbolicRef::User(key)
        } else if let Some(key) = s.strip_prefix(PARENT_PREFIX) {
            SymbolicRef::Parent(key)
        } else if s.starts_with(DATE_PREFIX) {
            SymbolicRef::Date(s)
        } else if let Some(key) = s.strip_prefix(ENV_PREFIX) {
            SymbolicRef::Env(key)
        } else {
            SymbolicRef::Literal
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, SymbolicRef::Literal)
    }

    pub(crate) fn resolve(&self, ctx: &EvalContext) -> Resolution {
        match *self {
            SymbolicRef::Literal => Resolution::Literal,
            SymbolicRef::Object(path) => resolve_object_path(&ctx.object, path).into(),
            SymbolicRef::User(key) => resolve_user_key(&ctx.user, key).into(),
            SymbolicRef::Parent(key) => resolve_parent_key(&ctx.parent, key).into(),
            SymbolicRef::Date(descriptor) => Resolution::Resolved(Value::String(
                DateReference::at(descriptor, ctx.now()).to_iso_string(),
            )),
            // a missing env key is false, never unresolved
            SymbolicRef::Env(key) => {
                Resolution::Resolved(ctx.env.get(key).cloned().unwrap_or(Value::Bool(false)))
            }
        }
    }
}

/// Walk `path` through the current record.
///
/// An object at the end of the path collapses to its `id`, else its `name`,
/// else the string `"null"`; a null collapses to `"null"` too.
pub(crate) fn resolve_object_path(object: &Record, path: &str) -> Option<Value> {
    let segments: Vec<&str> = path.split('.').collect();
    let value = lookup_path(object, &segments)?;

    let resolved = match value {
        Value::Object(map) => map
            .get("id")
            .or_else(|| map.get("name"))
            .cloned()
            .unwrap_or_else(|| Value::String("null".to_string())),
        Value::Null => Value::String("null".to_string()),
        other => other.clone(),
    };
    Some(resolved)
}

pub(crate) fn resolve_user_key(user: &Record, key: &str) -> Option<Value> {
    user.get(key).cloned()
}

/// Like the object branch, an object collapses to `id` then `name`, but a
/// null stays null and an object with neither key resolves to null.
pub(crate) fn resolve_parent_key(parent: &Record, key: &str) -> Option<Value> {
    let resolved = match parent.get(key)? {
        Value::Object(map) => map
            .get("id")
            .or_else(|| map.get("name"))
            .cloned()
            .unwrap_or(Value::Null),
        other => other.clone(),
    };
    Some(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::to_record;
    use chrono::{Local, TimeZone};
    use serde_json::json;

    fn ctx() -> EvalContext {
        EvalContext::new(to_record(json!({
            "customer": {"id": 5, "name": "Acme"},
            "team": {"name": "Sales"},
            "tag": {"color": 3},
            "manager": null,
            "qty": 4
        })))
        .with_user(to_record(json!({"id": 42, "lang": "en_US"})))
        .with_parent(to_record(json!({
            "company": {"id": 1, "name": "Main"},
            "stage": {"name": "New"},
            "owner": null,
            "kind": {"color": 2}
        })))
        .with_env(to_record(json!({"lang": "fr_FR"})))
    }

    fn resolve_str(s: &str) -> Resolution {
        let value = Value::from(s);
        SymbolicRef::classify(&value).resolve(&ctx())
    }

    #[test]
    fn test_classify() {
        assert_eq!(
            SymbolicRef::classify(&Value::from("object.customer.id")),
            SymbolicRef::Object("customer.id")
        );
        assert_eq!(SymbolicRef::classify(&Value::from("user.id")), SymbolicRef::User("id"));
        assert_eq!(
            SymbolicRef::classify(&Value::from("date.this.month.first")),
            SymbolicRef::Date("date.this.month.first")
        );
        assert_eq!(SymbolicRef::classify(&Value::from("env.lang")), SymbolicRef::Env("lang"));
        assert!(SymbolicRef::classify(&Value::from("draft")).is_literal());
        assert!(SymbolicRef::classify(&Value::from("users.id")).is_literal());
        assert!(SymbolicRef::classify(&Value::Number(1.0)).is_literal());
    }

    #[test]
    fn test_object_branch() {
        assert_eq!(resolve_str("object.customer.id"), Resolution::Resolved(Value::Number(5.0)));
        assert_eq!(resolve_str("object.customer"), Resolution::Resolved(Value::Number(5.0)));
        assert_eq!(resolve_str("object.team"), Resolution::Resolved(Value::from("Sales")));
        assert_eq!(resolve_str("object.tag"), Resolution::Resolved(Value::from("null")));
        assert_eq!(resolve_str("object.manager"), Resolution::Resolved(Value::from("null")));
        assert_eq!(resolve_str("object.qty"), Resolution::Resolved(Value::Number(4.0)));
        assert_eq!(resolve_str("object.missing.field"), Resolution::Unresolved);
    }

    #[test]
    fn test_user_branch() {
        assert_eq!(resolve_str("user.id"), Resolution::Resolved(Value::Number(42.0)));
        assert_eq!(resolve_str("user.company_id"), Resolution::Unresolved);
    }

    #[test]
    fn test_parent_branch() {
        assert_eq!(resolve_str("parent.company"), Resolution::Resolved(Value::Number(1.0)));
        assert_eq!(resolve_str("parent.stage"), Resolution::Resolved(Value::from("New")));
        // no "null" string elision on the parent side
        assert_eq!(resolve_str("parent.owner"), Resolution::Resolved(Value::Null));
        assert_eq!(resolve_str("parent.kind"), Resolution::Resolved(Value::Null));
        assert_eq!(resolve_str("parent.missing"), Resolution::Unresolved);
    }

    #[test]
    fn test_env_branch() {
        assert_eq!(resolve_str("env.lang"), Resolution::Resolved(Value::from("fr_FR")));
        assert_eq!(resolve_str("env.missing"), Resolution::Resolved(Value::Bool(false)));
    }

    #[test]
    fn test_date_branch() {
        let now = Local.with_ymd_and_hms(2024, 5, 17, 15, 30, 0).unwrap();
        let ctx = ctx().with_now(now);
        let value = Value::from("date.this.month.first");

        let expected = Local
            .with_ymd_and_hms(2024, 5, 1, 0, 0, 0)
            .unwrap()
            .with_timezone(&chrono::Utc)
            .to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        assert_eq!(
            SymbolicRef::classify(&value).resolve(&ctx),
            Resolution::Resolved(Value::String(expected))
        );
    }
}
