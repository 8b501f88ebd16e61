pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{build_registry, DryRunRegistry, FileRegistry, HttpRegistry};
pub use config::{cli::LocalBanSource, toml_config::TomlConfig};
pub use crate::core::{
    engine::{parse_ban_container, ImportEngine},
    identifier::IdentifierValidator,
    normalizer::RecordNormalizer,
    runner::ImportBatchRunner,
};
pub use domain::model::{
    CanonicalBanAction, Expiration, IdentifierSet, ImportReport, RawBanRecord, Rejection,
    SchemaKind, SourceKind,
};
pub use domain::ports::{BanRegistry, BanSource};
pub use utils::error::{ImportError, Result};
