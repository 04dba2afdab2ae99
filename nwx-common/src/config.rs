//! Formatter configuration
//!
//! Loaded from TOML with every field defaulted. Resolution priority:
//! 1. Explicit path argument
//! 2. `NWX_CONFIG` environment variable
//! 3. `<config dir>/nwx/config.toml`
//! 4. Built-in defaults
//!
//! A missing file is not fatal: a warning is logged and defaults are used.
//! A file that exists but does not parse is an error.

use crate::error::{Error, Result};
use crate::locale::Locale;
use crate::time::parse_timezone;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "NWX_CONFIG";
/// Environment override for `timezone`
pub const TIMEZONE_ENV_VAR: &str = "NWX_TIMEZONE";
/// Environment override for `default_locale`
pub const LOCALE_ENV_VAR: &str = "NWX_LOCALE";

/// Vocabulary ids the assembler reads from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemeConfig {
    /// Hierarchical subject taxonomy feeding `IndexCode`; always promoted
    pub subject: String,
    /// Flat category list feeding `Category`
    pub category: String,
    /// Genre list feeding `VersionType`
    pub genre: String,
    /// Distribution services; qcode is the routing code
    pub service: String,
    /// Further schemes whose tags go through parent-chain promotion
    pub legacy_hierarchical: Vec<String>,
}

impl SchemeConfig {
    /// Tags of `scheme` are promoted to their nearest eligible ancestor
    pub fn is_hierarchical(&self, scheme: &str) -> bool {
        scheme == self.subject || self.legacy_hierarchical.iter().any(|s| s == scheme)
    }
}

impl Default for SchemeConfig {
    fn default() -> Self {
        Self {
            subject: "subject_custom".to_string(),
            category: "categories".to_string(),
            genre: "genre_custom".to_string(),
            service: "distribution".to_string(),
            legacy_hierarchical: Vec::new(),
        }
    }
}

/// Per-subscriber sequence number range (inclusive, wraps to `min`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceConfig {
    pub min: u64,
    pub max: u64,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self { min: 1, max: 9999 }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// Complete formatter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatterConfig {
    /// Locale used when the item has none or an unsupported one
    pub default_locale: Locale,
    /// IANA zone for local wire timestamps
    pub timezone: String,
    /// Second bound on hierarchy walks, independent of cycle detection
    pub max_hierarchy_depth: usize,
    /// Bound on rewrite-chain hops
    pub max_rewrite_hops: usize,
    pub headline_max_length: usize,
    pub directory_text_max_length: usize,
    /// Urgency used when the item carries none
    pub default_urgency: u8,
    /// Machine tags below this relevance are ignored for legacy output
    pub min_machine_relevance: f32,
    /// Routing code used when the item carries no service tag
    pub default_service_code: String,
    pub schemes: SchemeConfig,
    pub sequence: SequenceConfig,
    pub logging: LoggingConfig,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            default_locale: Locale::EnCa,
            timezone: "America/Toronto".to_string(),
            max_hierarchy_depth: 50,
            max_rewrite_hops: 100,
            headline_max_length: 128,
            directory_text_max_length: 128,
            default_urgency: 3,
            min_machine_relevance: 0.0,
            default_service_code: "GENERAL".to_string(),
            schemes: SchemeConfig::default(),
            sequence: SequenceConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl FormatterConfig {
    /// Parse TOML text and validate
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: FormatterConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a specific file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Resolve and load configuration with graceful degradation
    ///
    /// Missing files fall back to defaults. Environment overrides are applied
    /// last and the result is validated.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match resolve_config_path(explicit) {
            Some(path) if path.exists() => {
                info!("Loading formatter config from {}", path.display());
                Self::from_file(&path)?
            }
            Some(path) => {
                warn!(
                    "Config file {} not found, using built-in defaults",
                    path.display()
                );
                Self::default()
            }
            None => {
                warn!("No config file location available, using built-in defaults");
                Self::default()
            }
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply `NWX_TIMEZONE` / `NWX_LOCALE`
    pub fn apply_env_overrides(&mut self) {
        if let Ok(tz) = std::env::var(TIMEZONE_ENV_VAR) {
            if !tz.trim().is_empty() {
                self.timezone = tz;
            }
        }
        if let Ok(raw) = std::env::var(LOCALE_ENV_VAR) {
            match Locale::parse(&raw) {
                Some(locale) => self.default_locale = locale,
                None => warn!("Ignoring unsupported {}='{}'", LOCALE_ENV_VAR, raw),
            }
        }
    }

    /// Reject values the formatter cannot work with
    pub fn validate(&self) -> Result<()> {
        parse_timezone(&self.timezone)?;
        if self.max_hierarchy_depth == 0 {
            return Err(Error::Config("max_hierarchy_depth must be > 0".to_string()));
        }
        if self.max_rewrite_hops == 0 {
            return Err(Error::Config("max_rewrite_hops must be > 0".to_string()));
        }
        if self.headline_max_length == 0 {
            return Err(Error::Config("headline_max_length must be > 0".to_string()));
        }
        if self.directory_text_max_length == 0 {
            return Err(Error::Config(
                "directory_text_max_length must be > 0".to_string(),
            ));
        }
        if !(1..=8).contains(&self.default_urgency) {
            return Err(Error::Config(format!(
                "default_urgency {} outside 1-8",
                self.default_urgency
            )));
        }
        if self.sequence.min > self.sequence.max {
            return Err(Error::Config(format!(
                "sequence.min {} greater than sequence.max {}",
                self.sequence.min, self.sequence.max
            )));
        }
        Ok(())
    }

    /// Configured timezone; `validate` guarantees it parses
    pub fn tz(&self) -> Result<Tz> {
        parse_timezone(&self.timezone)
    }
}

/// Config file location per the priority order, without checking existence
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }
    default_config_path()
}

/// `<platform config dir>/nwx/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("nwx").join("config.toml"))
}

/// Write configuration back as TOML, replacing the file atomically
pub fn write_toml_config(config: &FormatterConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)
        .map_err(|e| Error::Config(format!("Serialize config failed: {}", e)))?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, content)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = FormatterConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_hierarchy_depth, 50);
        assert_eq!(config.max_rewrite_hops, 100);
        assert_eq!(config.default_locale, Locale::EnCa);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = FormatterConfig::from_toml_str(
            r#"
            timezone = "America/Vancouver"
            default_locale = "fr-CA"

            [schemes]
            subject = "subjects"
            "#,
        )
        .unwrap();
        assert_eq!(config.timezone, "America/Vancouver");
        assert_eq!(config.default_locale, Locale::FrCa);
        assert_eq!(config.schemes.subject, "subjects");
        assert_eq!(config.schemes.category, "categories");
        assert_eq!(config.headline_max_length, 128);
    }

    #[test]
    fn test_invalid_timezone_rejected() {
        let err = FormatterConfig::from_toml_str(r#"timezone = "Nowhere/City""#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_zero_depth_rejected() {
        let err = FormatterConfig::from_toml_str("max_hierarchy_depth = 0").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_zero_text_limits_rejected() {
        let err = FormatterConfig::from_toml_str("headline_max_length = 0").unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = FormatterConfig::from_toml_str("directory_text_max_length = 0").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_subject_scheme_is_hierarchical() {
        let config = FormatterConfig::from_toml_str(
            r#"
            [schemes]
            subject = "subjects"
            legacy_hierarchical = ["regions"]
            "#,
        )
        .unwrap();
        assert!(config.schemes.is_hierarchical("subjects"));
        assert!(config.schemes.is_hierarchical("regions"));
        assert!(!config.schemes.is_hierarchical("subject_custom"));
        assert!(!config.schemes.is_hierarchical("categories"));
    }

    #[test]
    fn test_inverted_sequence_range_rejected() {
        let err = FormatterConfig::from_toml_str(
            r#"
            [sequence]
            min = 10
            max = 5
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_malformed_toml_is_error() {
        let err = FormatterConfig::from_toml_str("timezone = ").unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }
}
