use crate::utils::error::Result;
use crate::utils::validation::validate_regex;
use regex::Regex;
use std::collections::BTreeMap;

/// Platform identifier formats accepted by the registry.
pub const DEFAULT_IDENTIFIER_PATTERNS: &[(&str, &str)] = &[
    ("steam", r"^steam:1100001[0-9A-Fa-f]{8}$"),
    ("license", r"^license:[0-9A-Fa-f]{40}$"),
    ("xbl", r"^xbl:\d{14,20}$"),
    ("live", r"^live:\d{14,20}$"),
    ("discord", r"^discord:\d{7,20}$"),
    ("fivem", r"^fivem:\d{1,8}$"),
];

#[derive(Debug, Clone)]
pub struct IdentifierValidator {
    patterns: Vec<(String, Regex)>,
}

impl IdentifierValidator {
    /// 以設定檔提供的 pattern 建立 (kind -> regex)
    pub fn from_patterns<'a, I>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let patterns = patterns
            .into_iter()
            .map(|(kind, pattern)| {
                let regex = validate_regex(&format!("identifiers.{}", kind), pattern)?;
                Ok((kind.to_string(), regex))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    pub fn from_map(patterns: &BTreeMap<String, String>) -> Result<Self> {
        Self::from_patterns(patterns.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    pub fn is_valid_identifier(&self, s: &str) -> bool {
        !s.is_empty() && self.patterns.iter().any(|(_, re)| re.is_match(s))
    }

    /// Loosely-typed variant: anything that is not a string is invalid.
    pub fn is_valid_value(&self, value: &serde_json::Value) -> bool {
        value
            .as_str()
            .map(|s| self.is_valid_identifier(s))
            .unwrap_or(false)
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|(kind, _)| kind.as_str())
    }
}

impl Default for IdentifierValidator {
    fn default() -> Self {
        let patterns = DEFAULT_IDENTIFIER_PATTERNS
            .iter()
            .map(|(kind, pattern)| {
                // 內建 pattern 由下方測試保證可編譯
                let regex = Regex::new(pattern).expect("built-in identifier pattern");
                (kind.to_string(), regex)
            })
            .collect();
        Self { patterns }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_patterns_compile() {
        let validator =
            IdentifierValidator::from_patterns(DEFAULT_IDENTIFIER_PATTERNS.iter().copied());
        assert!(validator.is_ok());
        assert_eq!(IdentifierValidator::default().kinds().count(), 6);
    }

    #[test]
    fn test_accepts_known_formats() {
        let validator = IdentifierValidator::default();
        assert!(validator.is_valid_identifier("steam:110000112345678"));
        assert!(validator.is_valid_identifier(
            "license:0123456789abcdef0123456789abcdef01234567"
        ));
        assert!(validator.is_valid_identifier("xbl:12345678901234"));
        assert!(validator.is_valid_identifier("live:98765432109876"));
        assert!(validator.is_valid_identifier("discord:272800190639898628"));
        assert!(validator.is_valid_identifier("fivem:1234"));
    }

    #[test]
    fn test_rejects_malformed_identifiers() {
        let validator = IdentifierValidator::default();
        assert!(!validator.is_valid_identifier(""));
        assert!(!validator.is_valid_identifier("steam:1234"));
        assert!(!validator.is_valid_identifier("license:xyz"));
        assert!(!validator.is_valid_identifier("ip:127.0.0.1"));
        assert!(!validator.is_valid_identifier(" fivem:1234"));
        assert!(!validator.is_valid_identifier("fivem:123456789"));
    }

    #[test]
    fn test_non_string_values_are_invalid() {
        let validator = IdentifierValidator::default();
        assert!(validator.is_valid_value(&json!("fivem:42")));
        assert!(!validator.is_valid_value(&json!(42)));
        assert!(!validator.is_valid_value(&json!(null)));
        assert!(!validator.is_valid_value(&json!(["fivem:42"])));
    }

    #[test]
    fn test_custom_patterns_replace_defaults() {
        let mut patterns = BTreeMap::new();
        patterns.insert("ip".to_string(), r"^ip:[\d.]+$".to_string());
        let validator = IdentifierValidator::from_map(&patterns).unwrap();

        assert!(validator.is_valid_identifier("ip:10.0.0.1"));
        assert!(!validator.is_valid_identifier("fivem:1234"));
    }

    #[test]
    fn test_invalid_custom_pattern_is_config_error() {
        let mut patterns = BTreeMap::new();
        patterns.insert("broken".to_string(), "[".to_string());
        assert!(IdentifierValidator::from_map(&patterns).is_err());
    }
}
