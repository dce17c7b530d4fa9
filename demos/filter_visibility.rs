//! Schema domain merged with a UI filter, evaluated per record
//!
//! Run with: cargo run --example filter_visibility
//! Set RUST_LOG=domex_runtime=debug to see skipped conditions.

use anyhow::Result;
use domex_core::Domain;
use domex_runtime::{to_record, DomainExt, EvalContext};
use serde_json::json;
use tracing::info;

fn main() -> Result<()> {
    init_tracing()?;

    // Domain from the view schema, ANDed with what the user typed in the search bar
    let mut domain = Domain::from(json!([["status", "=", "draft"], ["owner_id", "=", "user.id"]]));
    domain.merge(&Domain::from(json!([["name", "ilike", "%foo%"]])));
    info!("Combined domain: {}", domain.to_json_string()?);

    let user = to_record(json!({"id": 42, "name": "Mitchell"}));
    let records = [
        json!({"status": "draft", "owner_id": 42, "name": "foobar"}),
        json!({"status": "draft", "owner_id": 7, "name": "foobar"}),
        json!({"status": "posted", "owner_id": 42, "name": "food"}),
    ];

    for record in records {
        let ctx = EvalContext::new(to_record(record.clone())).with_user(user.clone());
        info!("{} -> {}", record, domain.evaluate(&ctx));
    }

    // A malformed domain fails open
    let broken = Domain::from(json!(["status", "equals", "draft"]));
    info!("Malformed domain matches everything: {}", broken.evaluate(&EvalContext::default()));

    Ok(())
}

/// Initialize tracing subscriber
fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "domex_core=info,domex_runtime=info,filter_visibility=info".into()),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}
