//! Configuration for an ingest run.
//!
//! Every toggle the ingester honours lives in [`IngestConfig`]; nothing is read
//! from global state. The struct is serde-enabled so a run can be described in
//! JSON:
//!
//! ```
//! use cedict_ingest::builder::{IngestConfig, MalformedLinePolicy};
//!
//! let config = IngestConfig::from_json_str(
//!     r#"{ "tone_accents": true, "on_malformed_line": "skip-and-report" }"#,
//! ).unwrap();
//! assert!(config.tone_accents);
//! assert!(!config.erhua_keep_space);
//! assert_eq!(config.on_malformed_line, MalformedLinePolicy::SkipAndReport);
//! ```

use serde::{Deserialize, Serialize};

use crate::builder::record_builder::RecordOptions;
use crate::storage::SchemaOptions;
use crate::{CedictError, Result};

/// What a run does when it meets a malformed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MalformedLinePolicy {
    /// Report the error and stop the run.
    #[default]
    Abort,
    /// Report the error and continue with the next line.
    SkipAndReport,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Add the tone-marked romanization to every record
    pub tone_accents: bool,
    /// Keep the space before the erhua `r` (only meaningful with `tone_accents`)
    pub erhua_keep_space: bool,
    pub on_malformed_line: MalformedLinePolicy,
    /// Ask the store to reject duplicate (traditional, simplified, romanization) tuples
    pub unique_key: bool,
    /// Percentage of the source between progress reports (1-100)
    pub report_interval_percent: u64,
}

impl Default for IngestConfig {
    fn default() -> Self {
        IngestConfig {
            tone_accents: false,
            erhua_keep_space: false,
            on_malformed_line: MalformedLinePolicy::Abort,
            unique_key: true,
            report_interval_percent: 10,
        }
    }
}

impl IngestConfig {
    /// Parses and validates a JSON configuration. Missing fields take their
    /// default value.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: IngestConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.report_interval_percent == 0 || self.report_interval_percent > 100 {
            return Err(CedictError::invalid_parameter(format!(
                "report_interval_percent must be within 1..=100, got {}",
                self.report_interval_percent
            )));
        }
        Ok(())
    }

    pub fn record_options(&self) -> RecordOptions {
        RecordOptions {
            tone_accents: self.tone_accents,
            erhua_keep_space: self.erhua_keep_space,
        }
    }

    pub fn schema_options(&self) -> SchemaOptions {
        SchemaOptions {
            include_toned: self.tone_accents,
            unique_key: self.unique_key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = IngestConfig::default();
        assert!(!config.tone_accents);
        assert!(!config.erhua_keep_space);
        assert_eq!(config.on_malformed_line, MalformedLinePolicy::Abort);
        assert_eq!(IngestConfig::from_json_str("{}").unwrap(), config);
    }

    #[test]
    fn test_projections() {
        let config = IngestConfig {
            tone_accents: true,
            erhua_keep_space: true,
            unique_key: false,
            ..IngestConfig::default()
        };
        assert_eq!(config.record_options(), RecordOptions { tone_accents: true, erhua_keep_space: true });
        assert_eq!(config.schema_options(), SchemaOptions { include_toned: true, unique_key: false });
    }

    #[test]
    fn test_policy_names() {
        assert_eq!(serde_json::to_string(&MalformedLinePolicy::Abort).unwrap(), "\"abort\"");
        assert_eq!(serde_json::to_string(&MalformedLinePolicy::SkipAndReport).unwrap(), "\"skip-and-report\"");
    }

    #[test]
    fn test_invalid_config() {
        assert!(IngestConfig::from_json_str(r#"{ "report_interval_percent": 0 }"#).is_err());
        assert!(IngestConfig::from_json_str(r#"{ "on_malformed_line": "ignore" }"#).is_err());
        assert!(IngestConfig::from_json_str("not json").is_err());
    }
}
