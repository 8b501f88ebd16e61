use crate::core::normalizer::RecordNormalizer;
use crate::core::runner::ImportBatchRunner;
use crate::domain::model::{ImportReport, RawBanRecord, SchemaKind};
use crate::domain::ports::{BanRegistry, BanSource};
use crate::utils::error::{ImportError, Result};

/// Decodes a ban export; the top level must be a JSON array.
pub fn parse_ban_container(data: &[u8]) -> Result<Vec<RawBanRecord>> {
    let value: serde_json::Value =
        serde_json::from_slice(data).map_err(|e| ImportError::BatchContainerInvalid {
            message: format!("invalid JSON: {}", e),
        })?;

    match value {
        serde_json::Value::Array(records) => Ok(records),
        other => Err(ImportError::BatchContainerInvalid {
            message: format!("expected an array of bans, found {}", json_kind(&other)),
        }),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

pub struct ImportEngine<S: BanSource, R: BanRegistry> {
    source: S,
    banfile: String,
    schema: SchemaKind,
    runner: ImportBatchRunner<R>,
}

impl<S: BanSource, R: BanRegistry> ImportEngine<S, R> {
    pub fn new(
        source: S,
        banfile: impl Into<String>,
        schema: SchemaKind,
        normalizer: RecordNormalizer,
        registry: R,
    ) -> Self {
        Self {
            source,
            banfile: banfile.into(),
            schema,
            runner: ImportBatchRunner::new(normalizer, registry),
        }
    }

    pub async fn run(&self) -> Result<ImportReport> {
        tracing::info!("Starting {} ban import from {}", self.schema, self.banfile);

        // Extract
        let raw = self.source.read_file(&self.banfile).await?;
        tracing::debug!("Read {} bytes", raw.len());

        let records = parse_ban_container(&raw)?;
        tracing::info!("Found {} ban records", records.len());

        // Normalize + load
        let report = self.runner.run(&records, self.schema).await?;

        tracing::info!(
            "✅ Process finished! Imported bans: {}, invalid bans: {}",
            report.accepted,
            report.rejected
        );
        Ok(report)
    }
}
