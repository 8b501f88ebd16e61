// Adapters layer: concrete ban sources and registries.

pub mod file;
pub mod http;

pub use file::FileRegistry;
pub use http::HttpRegistry;

use crate::config::toml_config::{RegistryConfig, RegistryType};
use crate::domain::model::CanonicalBanAction;
use crate::domain::ports::BanRegistry;
use crate::utils::error::Result;
use crate::utils::validation::validate_required_field;
use async_trait::async_trait;
use std::time::Duration;

/// Accepts everything and only logs it.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunRegistry;

#[async_trait]
impl BanRegistry for DryRunRegistry {
    async fn register_ban(&self, action: &CanonicalBanAction) -> Result<()> {
        tracing::info!(
            "🔍 [dry-run] ban {:?} by '{}' ({:?}): {}",
            action.identifiers.as_slice(),
            action.author,
            action.expiration,
            action.reason
        );
        Ok(())
    }
}

pub fn build_registry(config: &RegistryConfig, dry_run: bool) -> Result<Box<dyn BanRegistry>> {
    if dry_run {
        return Ok(Box::new(DryRunRegistry));
    }

    match config.r#type {
        RegistryType::Http => {
            let endpoint = validate_required_field("registry.endpoint", &config.endpoint)?;
            let headers = config.headers.clone().unwrap_or_default();
            let timeout = Duration::from_secs(config.timeout_seconds());
            Ok(Box::new(HttpRegistry::new(endpoint.clone(), timeout, &headers)?))
        }
        RegistryType::File => {
            let path = validate_required_field("registry.output_path", &config.output_path)?;
            Ok(Box::new(FileRegistry::new(path)))
        }
    }
}
