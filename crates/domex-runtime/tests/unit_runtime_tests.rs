//! Unit tests for domex-runtime
//!
//! Exercises parse / resolve / evaluate / test through the public API

use chrono::{Datelike, Local, TimeZone};
use domex_core::{Domain, Value};
use domex_runtime::{
    to_record, DateReference, DomainDocument, DomainExt, EvalContext, Reference, SymbolicRef,
};
use serde_json::json;

fn ctx(object: serde_json::Value) -> EvalContext {
    EvalContext::new(to_record(object))
}

fn first_value(domain: &Domain) -> Value {
    domain.clauses()[0].conditions()[0].value.clone()
}

// ========== Evaluate ==========

#[test]
fn test_empty_domain_always_true() {
    let domain = Domain::from(json!([]));
    assert!(domain.evaluate(&ctx(json!({"state": "draft"}))));
    assert!(domain.evaluate(&EvalContext::default()));
    assert!(domain.test());
}

#[test]
fn test_equality_and_inequality() {
    let record = ctx(json!({"status": "draft"}));
    assert!(Domain::from(json!(["status", "=", "draft"])).evaluate(&record));
    assert!(!Domain::from(json!(["status", "!=", "draft"])).evaluate(&record));
    assert!(!Domain::from(json!(["status", "<>", "draft"])).evaluate(&record));
}

#[test]
fn test_greater_than_coerces_string_value() {
    assert!(Domain::from(json!(["price", ">", "10"])).evaluate(&ctx(json!({"price": 15}))));
    assert!(!Domain::from(json!(["price", ">", "10"])).evaluate(&ctx(json!({"price": 5}))));
}

#[test]
fn test_contains() {
    let domain = Domain::from(json!(["tags", "contains", 2]));
    assert!(domain.evaluate(&ctx(json!({"tags": [1, 2, 3]}))));
    assert!(!domain.evaluate(&ctx(json!({"tags": [4]}))));
}

#[test]
fn test_contains_on_non_array_is_skipped() {
    // only condition skipped: the clause falls back to true
    let domain = Domain::from(json!(["tags", "contains", 2]));
    assert!(domain.evaluate(&ctx(json!({"tags": "1,2,3"}))));

    // remaining conditions still decide
    let domain = Domain::from(json!([["tags", "contains", 2], ["state", "=", "done"]]));
    assert!(!domain.evaluate(&ctx(json!({"tags": "x", "state": "draft"}))));
    assert!(domain.evaluate(&ctx(json!({"tags": "x", "state": "done"}))));
}

#[test]
fn test_is_set_and_not_set() {
    let set = Domain::from(json!(["partner_id", "is not", false]));
    assert!(set.evaluate(&ctx(json!({"partner_id": {"id": 4}}))));
    assert!(!set.evaluate(&ctx(json!({"partner_id": false}))));

    let empty = Domain::from(json!(["line_ids", "is", "empty"]));
    assert!(empty.evaluate(&ctx(json!({"line_ids": []}))));
    assert!(!empty.evaluate(&ctx(json!({"line_ids": [1]}))));
}

#[test]
fn test_in_and_not_in() {
    let domain = Domain::from(json!(["state", "in", ["draft", "sent"]]));
    assert!(domain.evaluate(&ctx(json!({"state": "sent"}))));
    assert!(!domain.evaluate(&ctx(json!({"state": "done"}))));

    let domain = Domain::from(json!(["state", "not in", "cancel"]));
    assert!(domain.evaluate(&ctx(json!({"state": "done"}))));
}

#[test]
fn test_unsupported_operator_evaluates_false() {
    let domain = Domain::from(json!([["state", "=", "draft"], ["state", "=~", "draft"]]));
    assert!(!domain.evaluate(&ctx(json!({"state": "draft"}))));

    // an unknown token in the detection position makes the whole domain invalid
    let domain = Domain::from(json!([[["state", "=~", "draft"]]]));
    assert!(domain.is_empty());
    assert!(domain.evaluate(&ctx(json!({"state": "sent"}))));
}

#[test]
fn test_unresolved_reference_is_excluded() {
    let domain = Domain::from(json!([["state", "=", "draft"], ["owner_id", "=", "user.id"]]));
    assert!(domain.evaluate(&ctx(json!({"state": "draft", "owner_id": 7}))));
}

// ========== Parse ==========

#[test]
fn test_parse_object_reference() {
    let mut domain = Domain::from(json!(["x", "=", "object.customer.id"]));
    domain.parse(&ctx(json!({"customer": {"id": 5, "name": "Acme"}})));
    assert_eq!(first_value(&domain), Value::Number(5.0));
}

#[test]
fn test_parse_missing_path_left_unchanged() {
    let mut domain = Domain::from(json!(["x", "=", "object.missing.field"]));
    domain.parse(&ctx(json!({"customer": {"id": 5, "name": "Acme"}})));
    assert_eq!(first_value(&domain), Value::from("object.missing.field"));
}

#[test]
fn test_parse_env_default_false() {
    let mut domain = Domain::from(json!(["x", "=", "env.portal"]));
    domain.parse(&EvalContext::default());
    assert_eq!(first_value(&domain), Value::Bool(false));
}

#[test]
fn test_parse_is_not_idempotent_for_reference_like_values() {
    let mut domain = Domain::from(json!(["x", "=", "user.ref"]));
    domain.parse(&EvalContext::default().with_user(to_record(json!({"ref": "user.id"}))));
    assert_eq!(first_value(&domain), Value::from("user.id"));

    domain.parse(&EvalContext::default().with_user(to_record(json!({"id": 9}))));
    assert_eq!(first_value(&domain), Value::Number(9.0));
}

#[test]
fn test_parse_date_reference() {
    let now = Local.with_ymd_and_hms(2024, 7, 10, 8, 0, 0).unwrap();
    let mut domain = Domain::from(json!(["date_order", ">=", "date.this.month.first"]));
    domain.parse(&EvalContext::default().with_now(now));

    let expected = DateReference::at("date.this.month.first", now).to_iso_string();
    assert_eq!(first_value(&domain), Value::String(expected));
}

// ========== End to end ==========

#[test]
fn test_schema_domain_merged_with_filter() {
    let mut domain = Domain::from(json!([["status", "=", "draft"], ["owner_id", "=", "user.id"]]));
    domain.merge(&Domain::from(json!([["name", "ilike", "%foo%"]])));

    let user = to_record(json!({"id": 42}));

    let matching = EvalContext::new(to_record(
        json!({"status": "draft", "owner_id": 42, "name": "foobar"}),
    ))
    .with_user(user.clone());
    assert!(domain.evaluate(&matching));

    let other_owner = EvalContext::new(to_record(
        json!({"status": "draft", "owner_id": 7, "name": "foobar"}),
    ))
    .with_user(user);
    assert!(!domain.evaluate(&other_owner));
}

#[test]
fn test_document_filters_combine_with_base_domain() -> anyhow::Result<()> {
    let doc = DomainDocument::from_json_str(
        r#"{
            "domain": [["status", "=", "draft"], ["amount", ">", 100]],
            "filters": [[["name", "ilike", "%foo%"]], [["tags", "contains", "urgent"]]],
            "context": {"object": {"status": "draft", "amount": 250, "name": "Foobar", "tags": ["urgent"]}}
        }"#,
    )?;

    let combined = doc.combined();
    assert_eq!(combined.len(), 1);
    assert_eq!(combined.conditions().count(), 4);
    assert!(combined.evaluate(&doc.context));

    let mut wire = Domain::from_json_str(&combined.to_json_string()?)?;
    wire.merge(&Domain::from(json!([["amount", "<", 200]])));
    assert!(!wire.evaluate(&doc.context));
    Ok(())
}

#[test]
fn test_resolve_once_evaluate_many() {
    let domain = Domain::from(json!(["owner_id", "=", "user.id"]));
    let resolved = domain.resolve(&EvalContext::default().with_user(to_record(json!({"id": 42}))));

    assert!(resolved.evaluate(&to_record(json!({"owner_id": 42}))));
    assert!(!resolved.evaluate(&to_record(json!({"owner_id": 41}))));
}

#[test]
fn test_visibility_from_context_only() {
    let mut domain = Domain::from(json!([[["env.debug", "=", true]], [[true, "=", "env.debug"]]]));
    domain.parse(&EvalContext::default().with_env(to_record(json!({"debug": true}))));
    assert!(domain.test());
}

// ========== References ==========

#[test]
fn test_reference_for_action_parameter() {
    let object = to_record(json!({"id": 17}));
    let reference = Reference::new("object.id");
    assert_eq!(
        reference.parse(&object, &Default::default(), &Default::default()),
        Value::Number(17.0)
    );
}

#[test]
fn test_symbolic_ref_classification() {
    assert_eq!(
        SymbolicRef::classify(&Value::from("parent.company_id")),
        SymbolicRef::Parent("company_id")
    );
}

#[test]
fn test_date_reference_prev_month_last() {
    let now = Local.with_ymd_and_hms(2025, 3, 3, 12, 0, 0).unwrap();
    let date = DateReference::at("date.prev.month.last", now).date();
    assert_eq!((date.year(), date.month(), date.day()), (2025, 2, 28));
}

#[test]
fn test_date_reference_this_year_first_system_clock() {
    let date = DateReference::new("date.this.year.first").date();
    let today = Local::now();
    assert_eq!((date.month(), date.day()), (1, 1));
    assert_eq!(date.year(), today.year());
    assert_eq!(date.time(), chrono::NaiveTime::MIN);
}
