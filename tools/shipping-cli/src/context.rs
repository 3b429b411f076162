//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use turbo_shipping::calculator::CalculatorSession;

use crate::config::CliConfig;
use crate::output::Output;

/// Config file names searched for, in order.
const CONFIG_NAMES: [&str; 3] = ["shipping.toml", ".shipping.toml", "shipping.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Where the config was loaded from, if anywhere.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            match Self::find_config(&cwd)? {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    ///
    /// The nearest config file wins. A file that exists but cannot be
    /// read or parsed is an error, not a reason to keep searching.
    fn find_config(start: &Path) -> Result<Option<(CliConfig, PathBuf)>> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    let config = CliConfig::load(&config_path.to_string_lossy())?;
                    return Ok(Some((config, config_path)));
                }
            }

            if !current.pop() {
                break;
            }
        }

        Ok(None)
    }

    /// Start a calculator session from the loaded configuration.
    pub fn new_session(&self) -> Result<CalculatorSession> {
        CalculatorSession::new(self.config.calculator.clone())
            .context("Cannot start shipping calculator")
    }

    /// Default path for a new config file.
    pub fn default_config_path(&self) -> PathBuf {
        self.cwd.join(CONFIG_NAMES[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("turbo-ship-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_find_config_reports_broken_file() {
        let dir = scratch_dir("broken");
        std::fs::write(dir.join("shipping.toml"), "[calculator]\nlatency_ms = \"fast\"\n").unwrap();

        let result = Context::find_config(&dir);
        std::fs::remove_dir_all(&dir).unwrap();

        let err = result.unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse TOML config"));
    }

    #[test]
    fn test_find_config_loads_nearest_file() {
        let dir = scratch_dir("nearest");
        std::fs::write(dir.join("shipping.toml"), "[calculator]\nlatency_ms = 250\n").unwrap();
        let nested = dir.join("orders");
        std::fs::create_dir_all(&nested).unwrap();

        let result = Context::find_config(&nested);
        std::fs::remove_dir_all(&dir).unwrap();

        let (config, path) = result.unwrap().unwrap();
        assert_eq!(config.calculator.latency_ms, 250);
        assert_eq!(path, dir.join("shipping.toml"));
    }
}
