//! Configuration loading shared by every command.

use anyhow::{Context, Result};
use frontier_core::{ConfigValidation, FrontierConfig};
use std::path::{Path, PathBuf};

/// Config file read when `--config` is not given, if present.
pub const DEFAULT_CONFIG_PATH: &str = ".frontier/config.toml";

/// Values given on the command line that take precedence over the file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub rpc_url: Option<String>,
    pub backend_url: Option<String>,
}

impl Overrides {
    fn apply(&self, config: &mut FrontierConfig) {
        if let Some(url) = &self.rpc_url {
            config.ledger.primary_endpoint = url.clone();
        }
        if let Some(url) = &self.backend_url {
            config.backend.base_url = url.clone();
        }
    }
}

/// Load the explicit config file, else the default file when it exists,
/// else built-in defaults; then apply `overrides` and validate.
pub fn load_config(path: Option<&Path>, overrides: &Overrides) -> Result<FrontierConfig> {
    let mut config = match path {
        Some(path) => FrontierConfig::load_from_file(path)?,
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_PATH);
            if default.is_file() {
                FrontierConfig::load_from_file(&default)?
            } else {
                tracing::debug!("no config file, using defaults");
                FrontierConfig::default()
            }
        }
    };

    overrides.apply(&mut config);
    config
        .validate()
        .context("invalid configuration after command-line overrides")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn flags_override_file_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[ledger]\nprimary_endpoint = \"http://file:8899\"\n\n[backend]\nbase_url = \"http://file:8080\""
        )
        .unwrap();

        let overrides = Overrides {
            rpc_url: Some("http://flag:8899".to_string()),
            backend_url: None,
        };
        let config = load_config(Some(file.path()), &overrides).unwrap();

        assert_eq!(config.ledger.primary_endpoint, "http://flag:8899");
        assert_eq!(config.backend.base_url, "http://file:8080");
    }

    #[test]
    fn invalid_override_is_rejected() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let overrides = Overrides {
            rpc_url: Some("ftp://nowhere".to_string()),
            backend_url: None,
        };
        assert!(load_config(Some(file.path()), &overrides).is_err());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = load_config(Some(Path::new("/nonexistent/frontier.toml")), &Overrides::default());
        assert!(result.is_err());
    }
}
