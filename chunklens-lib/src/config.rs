//! Chunking configuration
//!
//! The configuration is edited as a small JSON object:
//!
//! ```json
//! {
//!   "chunkSize": 1000,
//!   "overlap": 200
//! }
//! ```
//!
//! A [`ChunkConfig`] can only be obtained through validation, so every value
//! of the type satisfies `0 <= overlap < chunk_size`. The chunker relies on
//! that to make progress on every step.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::Result;

/// Initial text shown in the configuration editor
pub const DEFAULT_CONFIG: &str = "{\n  \"chunkSize\": 1000,\n  \"overlap\": 200\n}";

/// A validated `{chunkSize, overlap}` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "Value")]
pub struct ChunkConfig {
    chunk_size: usize,
    overlap: usize,
}

impl ChunkConfig {
    /// Build a config from already-typed values.
    pub fn new(chunk_size: usize, overlap: usize) -> std::result::Result<Self, ConfigRule> {
        if chunk_size == 0 {
            return Err(ConfigRule::ChunkSizeNotPositive);
        }
        if overlap >= chunk_size {
            return Err(ConfigRule::OverlapTooLarge);
        }
        Ok(Self { chunk_size, overlap })
    }

    /// Maximum number of characters in a chunk
    #[must_use]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Number of characters shared by consecutive chunks
    #[must_use]
    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Distance between the starts of consecutive chunks. Always at least 1.
    #[must_use]
    pub fn stride(&self) -> usize {
        self.chunk_size - self.overlap
    }
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            overlap: 200,
        }
    }
}

/// The validation rules a parsed configuration must satisfy.
///
/// `Display` gives the message shown under the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigRule {
    /// `chunkSize` or `overlap` missing, or not an integral number
    NotNumbers,
    /// `chunkSize <= 0`
    ChunkSizeNotPositive,
    /// `overlap < 0`
    NegativeOverlap,
    /// `overlap >= chunkSize`
    OverlapTooLarge,
}

impl fmt::Display for ConfigRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ConfigRule::NotNumbers => "Config must have 'chunkSize' and 'overlap' as numbers.",
            ConfigRule::ChunkSizeNotPositive => "'chunkSize' must be positive.",
            ConfigRule::NegativeOverlap => "'overlap' cannot be negative.",
            ConfigRule::OverlapTooLarge => "'overlap' must be less than 'chunkSize'.",
        };
        f.write_str(msg)
    }
}

impl TryFrom<Value> for ChunkConfig {
    type Error = ConfigRule;

    fn try_from(value: Value) -> std::result::Result<Self, Self::Error> {
        let (Some(chunk_size), Some(overlap)) = (
            integer_field(&value, "chunkSize"),
            integer_field(&value, "overlap"),
        ) else {
            return Err(ConfigRule::NotNumbers);
        };

        if chunk_size <= 0 {
            return Err(ConfigRule::ChunkSizeNotPositive);
        }
        if overlap < 0 {
            return Err(ConfigRule::NegativeOverlap);
        }
        if overlap >= chunk_size {
            return Err(ConfigRule::OverlapTooLarge);
        }

        let chunk_size = usize::try_from(chunk_size).map_err(|_| ConfigRule::NotNumbers)?;
        let overlap = usize::try_from(overlap).map_err(|_| ConfigRule::NotNumbers)?;
        Ok(Self { chunk_size, overlap })
    }
}

/// Parse and validate configuration text.
///
/// Malformed JSON yields [`Error::ConfigParse`](crate::Error::ConfigParse);
/// well-formed JSON that breaks a rule yields
/// [`Error::ConfigValidation`](crate::Error::ConfigValidation).
pub fn parse_config(source: &str) -> Result<ChunkConfig> {
    let value: Value = serde_json::from_str(source)?;
    let config = ChunkConfig::try_from(value)?;
    debug!(
        chunk_size = config.chunk_size,
        overlap = config.overlap,
        "parsed chunk config"
    );
    Ok(config)
}

// Integral JSON numbers only; `1e3` is accepted, `10.5` is not.
fn integer_field(value: &Value, key: &str) -> Option<i64> {
    let Value::Number(n) = value.get(key)? else {
        return None;
    };
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    if n.as_u64().is_some() {
        return Some(i64::MAX);
    }
    let f = n.as_f64()?;
    if f.is_finite() && f.fract() == 0.0 {
        // saturating cast
        Some(f as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn rule_for(source: &str) -> ConfigRule {
        match parse_config(source) {
            Err(Error::ConfigValidation(rule)) => rule,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_default_config_parses() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, ChunkConfig::default());
        assert_eq!(config.chunk_size(), 1000);
        assert_eq!(config.overlap(), 200);
        assert_eq!(config.stride(), 800);
    }

    #[test]
    fn test_default_config_matches_serialized_default() {
        let pretty = serde_json::to_string_pretty(&ChunkConfig::default()).unwrap();
        assert_eq!(pretty, DEFAULT_CONFIG);
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let rule = rule_for(r#"{"chunkSize": 0, "overlap": 0}"#);
        assert_eq!(rule, ConfigRule::ChunkSizeNotPositive);
        assert_eq!(rule.to_string(), "'chunkSize' must be positive.");
    }

    #[test]
    fn test_negative_overlap_rejected() {
        let rule = rule_for(r#"{"chunkSize": 100, "overlap": -1}"#);
        assert_eq!(rule, ConfigRule::NegativeOverlap);
        assert_eq!(rule.to_string(), "'overlap' cannot be negative.");
    }

    #[test]
    fn test_overlap_equal_to_size_rejected() {
        let rule = rule_for(r#"{"chunkSize": 100, "overlap": 100}"#);
        assert_eq!(rule, ConfigRule::OverlapTooLarge);
        assert_eq!(rule.to_string(), "'overlap' must be less than 'chunkSize'.");
    }

    #[test]
    fn test_overlap_larger_than_size_rejected() {
        assert_eq!(
            rule_for(r#"{"chunkSize": 100, "overlap": 150}"#),
            ConfigRule::OverlapTooLarge
        );
    }

    #[test]
    fn test_overlap_just_below_size_accepted() {
        let config = parse_config(r#"{"chunkSize": 100, "overlap": 99}"#).unwrap();
        assert_eq!(config.stride(), 1);
    }

    #[test]
    fn test_missing_or_non_numeric_fields() {
        for source in [
            r#"{"chunkSize": 100}"#,
            r#"{"overlap": 10}"#,
            r#"{"chunkSize": "100", "overlap": 10}"#,
            r#"{"chunkSize": 100, "overlap": null}"#,
            r#"{"chunkSize": 100.5, "overlap": 10}"#,
            r#"[100, 10]"#,
            r#"42"#,
        ] {
            let rule = rule_for(source);
            assert_eq!(rule, ConfigRule::NotNumbers, "source: {source}");
            assert_eq!(
                rule.to_string(),
                "Config must have 'chunkSize' and 'overlap' as numbers."
            );
        }
    }

    #[test]
    fn test_integral_float_accepted() {
        let config = parse_config(r#"{"chunkSize": 1e3, "overlap": 0}"#).unwrap();
        assert_eq!(config.chunk_size(), 1000);
    }

    #[test]
    fn test_extra_keys_ignored() {
        let config =
            parse_config(r#"{"chunkSize": 50, "overlap": 5, "strategy": "fixed"}"#).unwrap();
        assert_eq!(config, ChunkConfig::new(50, 5).unwrap());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        match parse_config("{ chunkSize: 100 ") {
            Err(Error::ConfigParse(msg)) => assert!(!msg.is_empty()),
            other => panic!("expected parse error, got {other:?}"),
        }
        assert!(matches!(parse_config(""), Err(Error::ConfigParse(_))));
    }

    #[test]
    fn test_deserialize_goes_through_validation() {
        let err = serde_json::from_str::<ChunkConfig>(r#"{"chunkSize": 10, "overlap": 10}"#)
            .unwrap_err();
        assert!(err.to_string().contains("'overlap' must be less than 'chunkSize'."));

        let ok: ChunkConfig = serde_json::from_str(r#"{"chunkSize": 10, "overlap": 3}"#).unwrap();
        assert_eq!(ok.stride(), 7);
    }

    #[test]
    fn test_new_enforces_invariant() {
        assert_eq!(ChunkConfig::new(0, 0), Err(ConfigRule::ChunkSizeNotPositive));
        assert_eq!(ChunkConfig::new(10, 10), Err(ConfigRule::OverlapTooLarge));
        assert!(ChunkConfig::new(10, 9).is_ok());
    }
}
