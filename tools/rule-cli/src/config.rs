//! CLI configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use turbo_rules::RuleEngineConfig;

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Rule engine configuration.
    #[serde(default)]
    pub engine: RuleEngineConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        Self::parse(path, &content)
    }

    fn parse(path: &str, content: &str) -> Result<Self> {
        if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`.
    #[serde(default = "default_level")]
    pub level: String,

    /// Log line format.
    #[serde(default)]
    pub format: LogFormat,
}

fn default_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Compact human-readable lines.
    #[default]
    Human,
    /// One JSON object per line.
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toml() {
        let config = CliConfig::parse(
            "turbo-rules.toml",
            r#"
[engine]
strict_conditions = false
disabled_types = ["alwaysValid"]

[logging]
level = "debug"
format = "json"
"#,
        )
        .unwrap();

        assert!(!config.engine.strict_conditions);
        assert_eq!(config.engine.disabled_types, vec!["alwaysValid".to_string()]);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_parse_json_with_defaults() {
        let config = CliConfig::parse("turbo-rules.json", "{}").unwrap();
        assert!(config.engine.strict_conditions);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, LogFormat::Human);
    }

    #[test]
    fn test_parse_rejects_unknown_format() {
        let result = CliConfig::parse("turbo-rules.toml", "[logging]\nformat = \"xml\"\n");
        assert!(result.is_err());
    }
}
