use crate::core::normalizer::RecordNormalizer;
use crate::domain::model::{ImportReport, RawBanRecord, SchemaKind};
use crate::domain::ports::BanRegistry;
use crate::utils::error::{ImportError, Result};

/// Normalizes a batch record by record and registers every accepted ban.
///
/// A bad record only bumps `rejected`. A registry failure aborts the batch;
/// bans registered before it stay registered.
pub struct ImportBatchRunner<R: BanRegistry> {
    normalizer: RecordNormalizer,
    registry: R,
}

impl<R: BanRegistry> ImportBatchRunner<R> {
    pub fn new(normalizer: RecordNormalizer, registry: R) -> Self {
        Self {
            normalizer,
            registry,
        }
    }

    pub async fn run(&self, records: &[RawBanRecord], schema: SchemaKind) -> Result<ImportReport> {
        let mut report = ImportReport::default();
        tracing::debug!("Importing {} {} records", records.len(), schema);

        for (index, record) in records.iter().enumerate() {
            let action = match self.normalizer.normalize(record, schema) {
                Ok(action) => action,
                Err(rejection) => {
                    tracing::debug!("Skipping record #{}: {}", index, rejection);
                    report.rejected += 1;
                    continue;
                }
            };

            if let Err(e) = self.registry.register_ban(&action).await {
                tracing::error!("❌ Registry call failed at record #{}: {}", index, e);
                return Err(ImportError::RegistryCallFailed {
                    index,
                    source: Box::new(e),
                });
            }
            report.accepted += 1;
        }

        tracing::debug!(
            "Batch finished: {} imported, {} invalid",
            report.accepted,
            report.rejected
        );
        Ok(report)
    }
}
