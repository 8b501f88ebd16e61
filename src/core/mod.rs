pub mod engine;
pub mod identifier;
pub mod normalizer;
pub mod runner;
pub mod schema;

pub use crate::domain::model::{
    CanonicalBanAction, Expiration, IdentifierSet, ImportReport, RawBanRecord, Rejection,
    SchemaKind, SourceKind,
};
pub use crate::domain::ports::{BanRegistry, BanSource};
pub use crate::utils::error::Result;
