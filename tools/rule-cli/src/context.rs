//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context as _, Result};

use crate::config::CliConfig;
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            CliConfig::load(path)?
        } else {
            // Try to find config in current directory or parent directories
            Self::config_or_default(Self::find_config(&cwd), &output)
        };

        Ok(Self { config, output, cwd })
    }

    /// Use a discovered config, warning and falling back to defaults if it
    /// failed to load.
    fn config_or_default(
        found: Option<(PathBuf, Result<CliConfig>)>,
        output: &Output,
    ) -> CliConfig {
        match found {
            Some((path, Ok(config))) => {
                output.debug(&format!("Using config {}", path.display()));
                config
            }
            Some((path, Err(e))) => {
                output.warn(&format!(
                    "Ignoring config {}, using defaults: {:#}",
                    path.display(),
                    e
                ));
                CliConfig::default()
            }
            None => CliConfig::default(),
        }
    }

    /// Find the nearest config file in the directory tree and parse it.
    fn find_config(start: &Path) -> Option<(PathBuf, Result<CliConfig>)> {
        let config_names = ["turbo-rules.toml", ".turbo-rules.toml", "turbo-rules.json"];

        let mut current = start.to_path_buf();
        loop {
            for name in &config_names {
                let config_path = current.join(name);
                if config_path.exists() {
                    let config = match config_path.to_str() {
                        Some(path) => CliConfig::load(path),
                        None => Err(anyhow!(
                            "Config path is not valid UTF-8: {}",
                            config_path.display()
                        )),
                    };
                    return Some((config_path, config));
                }
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}
