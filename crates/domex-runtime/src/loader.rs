//! Domain documents
//!
//! A document bundles a base domain (typically from a view schema), the
//! filter domains applied on top of it, and the context to evaluate with.
//!
//! ```yaml
//! domain:
//!   - [status, "=", draft]
//!   - [owner_id, "=", user.id]
//! filters:
//!   - [[name, ilike, "%foo%"]]
//! context:
//!   user: { id: 42 }
//!   object: { status: draft, owner_id: 42, name: foobar }
//! ```

use crate::context::EvalContext;
use crate::error::{Result, RuntimeError};
use domex_core::Domain;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DomainDocument {
    /// Base domain
    pub domain: Domain,
    /// Additional domains, each merged conjunctively into the base
    pub filters: Vec<Domain>,
    pub context: EvalContext,
}

impl DomainDocument {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a document, picking the format from the file extension
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            Some("json") => Self::from_json_str(&content),
            _ => Err(RuntimeError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// The base domain merged with every filter, in order
    pub fn combined(&self) -> Domain {
        let mut combined = self.domain.clone();
        for filter in &self.filters {
            combined.merge(filter);
        }
        tracing::debug!(
            "Combined {} filter(s) into {} clause(s)",
            self.filters.len(),
            combined.len()
        );
        combined
    }
}
