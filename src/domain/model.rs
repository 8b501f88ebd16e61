use crate::utils::error::{ImportError, Result};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// One record of a ban export, exactly as decoded from the file.
pub type RawBanRecord = serde_json::Value;

/// The two export formats accepted by the file import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    /// EasyAdmin ban list (`banner`, `reason`, `expire` as epoch seconds).
    EasyAdmin,
    /// vMenu ban list (`bannedBy`, `banReason`, `bannedUntil` as a date string).
    VMenu,
}

impl SchemaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaKind::EasyAdmin => "easyadmin",
            SchemaKind::VMenu => "vmenu",
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Database type selector of the import action.
///
/// `bansql` and `vrp` are database-backed sources; they are recognised so the
/// caller gets a clear "not supported" instead of "invalid type".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    File(SchemaKind),
    Database(DatabaseKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseKind {
    BanSql,
    Vrp,
}

impl SourceKind {
    /// The file schema, or `UnsupportedSource` for database imports.
    pub fn file_schema(self) -> Result<SchemaKind> {
        match self {
            SourceKind::File(schema) => Ok(schema),
            SourceKind::Database(db) => Err(ImportError::UnsupportedSource {
                kind: match db {
                    DatabaseKind::BanSql => "bansql",
                    DatabaseKind::Vrp => "vrp",
                }
                .to_string(),
            }),
        }
    }
}

impl FromStr for SourceKind {
    type Err = ImportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easyadmin" => Ok(SourceKind::File(SchemaKind::EasyAdmin)),
            "vmenu" => Ok(SourceKind::File(SchemaKind::VMenu)),
            "bansql" => Ok(SourceKind::Database(DatabaseKind::BanSql)),
            "vrp" => Ok(SourceKind::Database(DatabaseKind::Vrp)),
            _ => Err(ImportError::InvalidSourceType {
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for SchemaKind {
    type Err = ImportError;

    fn from_str(s: &str) -> Result<Self> {
        s.parse::<SourceKind>()?.file_schema()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Expiration {
    Permanent,
    UnixTimestamp(i64),
}

impl Expiration {
    pub fn is_permanent(&self) -> bool {
        matches!(self, Expiration::Permanent)
    }
}

// registry 用 `false` 表示永久封禁
impl Serialize for Expiration {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Expiration::Permanent => serializer.serialize_bool(false),
            Expiration::UnixTimestamp(ts) => serializer.serialize_i64(*ts),
        }
    }
}

/// Ordered identifiers asserted to belong to one player.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct IdentifierSet(Vec<String>);

impl IdentifierSet {
    /// Returns `None` for an empty list, a ban must name at least one identifier.
    pub fn new(identifiers: Vec<String>) -> Option<Self> {
        if identifiers.is_empty() {
            None
        } else {
            Some(Self(identifiers))
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CanonicalBanAction {
    pub identifiers: IdentifierSet,
    pub author: String,
    pub reason: String,
    pub expiration: Expiration,
}

/// Why a single record was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    NotAnObject,
    NoValidIdentifiers,
    InvalidExpiration,
    UnparsableDate(String),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NotAnObject => f.write_str("record is not an object"),
            Rejection::NoValidIdentifiers => f.write_str("no valid identifiers"),
            Rejection::InvalidExpiration => f.write_str("expiration is not an integer"),
            Rejection::UnparsableDate(raw) => write!(f, "unparsable expiration date '{}'", raw),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub accepted: usize,
    pub rejected: usize,
}

impl ImportReport {
    pub fn total(&self) -> usize {
        self.accepted + self.rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_source_kind() {
        assert_eq!(
            "easyadmin".parse::<SourceKind>().unwrap(),
            SourceKind::File(SchemaKind::EasyAdmin)
        );
        assert_eq!(" VMenu ".parse::<SchemaKind>().unwrap(), SchemaKind::VMenu);
        assert!(matches!(
            "vrp".parse::<SchemaKind>(),
            Err(ImportError::UnsupportedSource { .. })
        ));
        assert!(matches!(
            "mysql".parse::<SourceKind>(),
            Err(ImportError::InvalidSourceType { .. })
        ));
    }

    #[test]
    fn test_identifier_set_rejects_empty() {
        assert!(IdentifierSet::new(vec![]).is_none());
        let set = IdentifierSet::new(vec!["fivem:1".to_string()]).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_action_serializes_permanent_as_false() {
        let action = CanonicalBanAction {
            identifiers: IdentifierSet::new(vec!["discord:1234567".to_string()]).unwrap(),
            author: "unknown".to_string(),
            reason: "[IMPORTED] unknown".to_string(),
            expiration: Expiration::Permanent,
        };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["expiration"], serde_json::json!(false));
        assert_eq!(json["identifiers"], serde_json::json!(["discord:1234567"]));

        let timed = CanonicalBanAction {
            expiration: Expiration::UnixTimestamp(1700000000),
            ..action
        };
        let json = serde_json::to_value(&timed).unwrap();
        assert_eq!(json["expiration"], serde_json::json!(1700000000));
    }
}
