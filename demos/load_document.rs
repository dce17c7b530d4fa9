//! Load a domain document from YAML or JSON and evaluate it
//!
//! Run with: cargo run --example load_document -- demos/data/draft_filter.yaml

use anyhow::{Context, Result};
use domex_runtime::{DomainDocument, DomainExt};
use tracing::info;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "domex_core=info,domex_runtime=info,load_document=info".into()),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "demos/data/draft_filter.yaml".to_string());
    let document = DomainDocument::from_path(&path).with_context(|| format!("loading {}", path))?;

    let domain = document.combined();
    info!("Domain: {}", domain.to_json_string()?);
    info!("Matches: {}", domain.evaluate(&document.context));

    Ok(())
}
