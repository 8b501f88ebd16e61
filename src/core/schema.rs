//! Field extraction for the two supported ban export formats.
//!
//! Both adapters default a missing author/reason and translate the schema's
//! "never expires" sentinel into [`Expiration::Permanent`]. A malformed
//! expiration is reported as a [`Rejection`], never as an error.

use crate::domain::model::{Expiration, Rejection, SchemaKind};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};

pub const UNKNOWN: &str = "unknown";
pub const IMPORTED_REASON_PREFIX: &str = "[IMPORTED] ";

/// EasyAdmin writes this epoch (year 2300) for bans without expiration.
pub const EASYADMIN_PERMANENT_EXPIRE: i64 = 10444633200;

/// vMenu writes this date for bans without expiration.
pub const VMENU_PERMANENT_UNTIL: &str = "3000-01-01T00:00:00";

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFields {
    pub author: String,
    pub reason: String,
    pub expiration: Expiration,
}

pub trait SchemaAdapter: Send + Sync {
    fn schema(&self) -> SchemaKind;
    fn author_field(&self) -> &'static str;
    fn reason_field(&self) -> &'static str;
    fn parse_expiration(&self, record: &Map<String, Value>) -> Result<Expiration, Rejection>;

    fn extract_fields(&self, record: &Map<String, Value>) -> Result<ExtractedFields, Rejection> {
        let author = non_empty_str(record, self.author_field())
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| UNKNOWN.to_string());

        let reason = match non_empty_str(record, self.reason_field()) {
            Some(s) => format!("{}{}", IMPORTED_REASON_PREFIX, s.trim()),
            None => format!("{}{}", IMPORTED_REASON_PREFIX, UNKNOWN),
        };

        let expiration = self.parse_expiration(record)?;

        Ok(ExtractedFields {
            author,
            reason,
            expiration,
        })
    }
}

/// `Some` only for a present string with non-whitespace content.
fn non_empty_str<'a>(record: &'a Map<String, Value>, field: &str) -> Option<&'a str> {
    record
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EasyAdminAdapter;

impl SchemaAdapter for EasyAdminAdapter {
    fn schema(&self) -> SchemaKind {
        SchemaKind::EasyAdmin
    }

    fn author_field(&self) -> &'static str {
        "banner"
    }

    fn reason_field(&self) -> &'static str {
        "reason"
    }

    fn parse_expiration(&self, record: &Map<String, Value>) -> Result<Expiration, Rejection> {
        let expire = record.get("expire").ok_or(Rejection::InvalidExpiration)?;
        let seconds = integral_seconds(expire).ok_or(Rejection::InvalidExpiration)?;

        if seconds == EASYADMIN_PERMANENT_EXPIRE {
            Ok(Expiration::Permanent)
        } else {
            Ok(Expiration::UnixTimestamp(seconds))
        }
    }
}

/// Integral JSON number as i64. `1.0` counts, `1.5` and strings do not.
fn integral_seconds(value: &Value) -> Option<i64> {
    if let Some(i) = value.as_i64() {
        return Some(i);
    }
    let f = value.as_f64()?;
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct VMenuAdapter;

impl SchemaAdapter for VMenuAdapter {
    fn schema(&self) -> SchemaKind {
        SchemaKind::VMenu
    }

    fn author_field(&self) -> &'static str {
        "bannedBy"
    }

    fn reason_field(&self) -> &'static str {
        "banReason"
    }

    fn parse_expiration(&self, record: &Map<String, Value>) -> Result<Expiration, Rejection> {
        let until = match record.get("bannedUntil") {
            Some(Value::String(s)) => s.as_str(),
            Some(other) => return Err(Rejection::UnparsableDate(other.to_string())),
            None => return Err(Rejection::UnparsableDate(String::new())),
        };

        if until == VMENU_PERMANENT_UNTIL {
            return Ok(Expiration::Permanent);
        }

        parse_epoch_seconds(until)
            .map(Expiration::UnixTimestamp)
            .ok_or_else(|| Rejection::UnparsableDate(until.to_string()))
    }
}

/// 解析日期字串並四捨五入到秒 (round half up)
///
/// Strings without an offset are read as UTC.
pub fn parse_epoch_seconds(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let millis = if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        dt.timestamp_millis()
    } else if let Some(dt) = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        dt.and_utc().timestamp_millis()
    } else {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()?
            .and_hms_opt(0, 0, 0)?
            .and_utc()
            .timestamp_millis()
    };

    Some((millis + 500).div_euclid(1000))
}

pub fn adapter_for(schema: SchemaKind) -> &'static dyn SchemaAdapter {
    match schema {
        SchemaKind::EasyAdmin => &EasyAdminAdapter,
        SchemaKind::VMenu => &VMenuAdapter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_easyadmin_fields_are_trimmed_and_tagged() {
        let record = obj(json!({
            "banner": "  Admin Bob ",
            "reason": " cheating  ",
            "expire": 1700000000
        }));

        let fields = EasyAdminAdapter.extract_fields(&record).unwrap();
        assert_eq!(fields.author, "Admin Bob");
        assert_eq!(fields.reason, "[IMPORTED] cheating");
        assert_eq!(fields.expiration, Expiration::UnixTimestamp(1700000000));
    }

    #[test]
    fn test_missing_or_non_string_author_and_reason_default() {
        let record = obj(json!({"banner": 12, "reason": "", "expire": 1}));
        let fields = EasyAdminAdapter.extract_fields(&record).unwrap();
        assert_eq!(fields.author, "unknown");
        assert_eq!(fields.reason, "[IMPORTED] unknown");

        let record = obj(json!({"bannedBy": "   ", "bannedUntil": "2030-01-01T00:00:00"}));
        let fields = VMenuAdapter.extract_fields(&record).unwrap();
        assert_eq!(fields.author, "unknown");
        assert_eq!(fields.reason, "[IMPORTED] unknown");
    }

    #[test]
    fn test_easyadmin_sentinel_is_permanent() {
        let record = obj(json!({"expire": EASYADMIN_PERMANENT_EXPIRE}));
        assert_eq!(
            EasyAdminAdapter.parse_expiration(&record),
            Ok(Expiration::Permanent)
        );

        let record = obj(json!({"expire": 10444633200.0}));
        assert_eq!(
            EasyAdminAdapter.parse_expiration(&record),
            Ok(Expiration::Permanent)
        );
    }

    #[test]
    fn test_easyadmin_string_sentinel_is_not_permanent() {
        let record = obj(json!({"expire": "10444633200"}));
        assert_eq!(
            EasyAdminAdapter.parse_expiration(&record),
            Err(Rejection::InvalidExpiration)
        );
    }

    #[test]
    fn test_easyadmin_rejects_non_integer_expire() {
        for expire in [json!(1.5), json!("1700000000"), json!(null), json!(true)] {
            let record = obj(json!({ "expire": expire }));
            assert_eq!(
                EasyAdminAdapter.parse_expiration(&record),
                Err(Rejection::InvalidExpiration)
            );
        }
        assert_eq!(
            EasyAdminAdapter.parse_expiration(&Map::new()),
            Err(Rejection::InvalidExpiration)
        );
    }

    #[test]
    fn test_easyadmin_accepts_integral_float() {
        let record = obj(json!({"expire": 1700000000.0}));
        assert_eq!(
            EasyAdminAdapter.parse_expiration(&record),
            Ok(Expiration::UnixTimestamp(1700000000))
        );
    }

    #[test]
    fn test_vmenu_sentinel_is_permanent() {
        let record = obj(json!({"bannedUntil": VMENU_PERMANENT_UNTIL}));
        assert_eq!(VMenuAdapter.parse_expiration(&record), Ok(Expiration::Permanent));
    }

    #[test]
    fn test_vmenu_parses_dates() {
        let record = obj(json!({"bannedUntil": "2023-11-14T22:13:20"}));
        assert_eq!(
            VMenuAdapter.parse_expiration(&record),
            Ok(Expiration::UnixTimestamp(1700000000))
        );

        let record = obj(json!({"bannedUntil": "2023-11-14T23:13:20+01:00"}));
        assert_eq!(
            VMenuAdapter.parse_expiration(&record),
            Ok(Expiration::UnixTimestamp(1700000000))
        );

        let record = obj(json!({"bannedUntil": "2023-11-14"}));
        assert_eq!(
            VMenuAdapter.parse_expiration(&record),
            Ok(Expiration::UnixTimestamp(1699920000))
        );
    }

    #[test]
    fn test_vmenu_rounds_half_up_to_the_second() {
        assert_eq!(parse_epoch_seconds("2023-11-14T22:13:20.499"), Some(1700000000));
        assert_eq!(parse_epoch_seconds("2023-11-14T22:13:20.500"), Some(1700000001));
        assert_eq!(parse_epoch_seconds("2023-11-14T22:13:20.5000000Z"), Some(1700000001));
        // before the epoch: -0.5s rounds up to 0
        assert_eq!(parse_epoch_seconds("1969-12-31T23:59:59.500Z"), Some(0));
        assert_eq!(parse_epoch_seconds("1969-12-31T23:59:59.499Z"), Some(-1));
    }

    #[test]
    fn test_vmenu_rejects_unparsable_dates() {
        let record = obj(json!({"bannedUntil": "not-a-date"}));
        assert_eq!(
            VMenuAdapter.parse_expiration(&record),
            Err(Rejection::UnparsableDate("not-a-date".to_string()))
        );

        for until in [json!(""), json!(1700000000), json!(null)] {
            let record = obj(json!({ "bannedUntil": until }));
            assert!(VMenuAdapter.parse_expiration(&record).is_err());
        }
        assert!(VMenuAdapter.parse_expiration(&Map::new()).is_err());
    }

    #[test]
    fn test_adapter_for_schema() {
        assert_eq!(adapter_for(SchemaKind::EasyAdmin).schema(), SchemaKind::EasyAdmin);
        assert_eq!(adapter_for(SchemaKind::VMenu).author_field(), "bannedBy");
    }
}
