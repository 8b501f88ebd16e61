use crate::domain::model::CanonicalBanAction;
use crate::domain::ports::BanRegistry;
use crate::utils::error::{ImportError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;

/// Body posted for every imported ban.
#[derive(Debug, Serialize)]
pub struct RegisterActionPayload<'a> {
    #[serde(rename = "type")]
    pub action_type: &'static str,
    #[serde(flatten)]
    pub action: &'a CanonicalBanAction,
}

impl<'a> RegisterActionPayload<'a> {
    pub fn ban(action: &'a CanonicalBanAction) -> Self {
        Self {
            action_type: "ban",
            action,
        }
    }
}

/// Registers bans by POSTing them to the player registry's HTTP endpoint.
pub struct HttpRegistry {
    client: Client,
    endpoint: String,
}

impl HttpRegistry {
    pub fn new(
        endpoint: impl Into<String>,
        timeout: Duration,
        headers: &HashMap<String, String>,
    ) -> Result<Self> {
        let mut header_map = HeaderMap::new();
        for (key, value) in headers {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
                ImportError::InvalidConfigValueError {
                    field: "registry.headers".to_string(),
                    value: key.clone(),
                    reason: e.to_string(),
                }
            })?;
            let value =
                HeaderValue::from_str(value).map_err(|e| ImportError::InvalidConfigValueError {
                    field: format!("registry.headers.{}", key),
                    value: "<redacted>".to_string(),
                    reason: e.to_string(),
                })?;
            header_map.insert(name, value);
        }

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(header_map)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl BanRegistry for HttpRegistry {
    async fn register_ban(&self, action: &CanonicalBanAction) -> Result<()> {
        tracing::debug!("POST {} ({} identifiers)", self.endpoint, action.identifiers.len());

        let response = self
            .client
            .post(&self.endpoint)
            .json(&RegisterActionPayload::ban(action))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(ImportError::RegistryError {
            message: format!("HTTP {}: {}", status, body.trim()),
        })
    }
}
