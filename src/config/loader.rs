//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::{RedirectsConfig, ServerConfig};
use crate::config::validation::{validate_config, ValidationError};
use crate::redirect::{parse_config, PathMapping, ParseError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Redirects(#[from] ParseError),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Settings supplied on the command line, applied over the settings file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub redirects: Option<PathBuf>,
    pub bind_address: Option<String>,
    pub log_level: Option<String>,
}

impl ConfigOverrides {
    pub fn apply(&self, config: &mut ServerConfig) {
        if let Some(file) = &self.redirects {
            config.redirects.file = Some(file.clone());
            config.redirects.format = None;
        }
        if let Some(bind) = &self.bind_address {
            config.listener.bind_address = bind.clone();
        }
        if let Some(level) = &self.log_level {
            config.observability.log_level = level.clone();
        }
    }
}

/// Read and deserialize a TOML settings file without validating it.
pub fn read_config(path: &Path) -> Result<ServerConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Load and validate server settings from a TOML file.
pub fn load_config(path: &Path) -> Result<ServerConfig, ConfigError> {
    resolve_config(read_config(path)?, &ConfigOverrides::default())
}

/// Apply overrides, then validate the merged settings.
pub fn resolve_config(
    mut config: ServerConfig,
    overrides: &ConfigOverrides,
) -> Result<ServerConfig, ConfigError> {
    overrides.apply(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Resolve the configured redirect sources into a single mapping.
///
/// Inline records go in first, so a file entry for the same path wins.
pub fn load_redirects(config: &RedirectsConfig) -> Result<PathMapping, ConfigError> {
    let mut mapping: PathMapping = config.inline.iter().cloned().collect();

    if let Some(file) = &config.file {
        let bytes = fs::read(file)?;
        let records = parse_config(&bytes, config.effective_format())?;
        tracing::debug!(path = ?file, records = records.len(), "Redirect document parsed");
        mapping.extend(records);
    }

    Ok(mapping)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redirect::{ConfigFormat, PathRecord};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_config() {
        let file = write_temp(".toml", "[listener]\nbind_address = \"127.0.0.1:0\"\n");
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:0");
    }

    #[test]
    fn test_load_config_rejects_invalid_settings() {
        let file = write_temp(".toml", "[timeouts]\nrequest_secs = 0\n");
        assert!(matches!(
            load_config(file.path()),
            Err(ConfigError::Validation(errors)) if errors == vec![ValidationError::ZeroRequestTimeout]
        ));

        let file = write_temp(".toml", "[listener\n");
        assert!(matches!(load_config(file.path()), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_overrides_are_validated() {
        let file = write_temp(".toml", "[listener]\nbind_address = \"127.0.0.1:0\"\n");
        let overrides = ConfigOverrides {
            bind_address: Some("not-an-address".into()),
            ..Default::default()
        };

        let result = resolve_config(read_config(file.path()).unwrap(), &overrides);
        assert!(matches!(
            result,
            Err(ConfigError::Validation(errors)) if errors == vec![ValidationError::InvalidAddress {
                field: "listener.bind_address",
                value: "not-an-address".into(),
            }]
        ));
    }

    #[test]
    fn test_overrides_replace_file_settings() {
        let file = write_temp(
            ".toml",
            "[redirects]\nfile = \"paths.json\"\nformat = \"json\"\n[observability]\nlog_level = \"warn\"\n",
        );
        let overrides = ConfigOverrides {
            redirects: Some(PathBuf::from("paths.yaml")),
            bind_address: Some("127.0.0.1:9999".into()),
            log_level: Some("debug".into()),
        };

        let config = resolve_config(read_config(file.path()).unwrap(), &overrides).unwrap();
        assert_eq!(config.redirects.file, Some(PathBuf::from("paths.yaml")));
        assert_eq!(config.redirects.effective_format(), ConfigFormat::Yaml);
        assert_eq!(config.listener.bind_address, "127.0.0.1:9999");
        assert_eq!(config.observability.log_level, "debug");
    }

    #[test]
    fn test_bad_metrics_address_is_fatal_when_enabled() {
        let file = write_temp(
            ".toml",
            "[observability]\nmetrics_enabled = true\nmetrics_address = \"nowhere\"\n",
        );
        assert!(matches!(load_config(file.path()), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = load_config(Path::new("/nonexistent/urlshort.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_file_overrides_inline() {
        let file = write_temp(
            ".yaml",
            "- path: /urlshort\n  url: https://github.com/gophercises/urlshort\n",
        );
        let config = RedirectsConfig {
            file: Some(file.path().to_path_buf()),
            format: None,
            inline: vec![
                PathRecord::new("/urlshort", "https://example.com/old"),
                PathRecord::new("/yaml-godoc", "https://godoc.org/gopkg.in/yaml.v2"),
            ],
        };

        let mapping = load_redirects(&config).unwrap();
        assert_eq!(mapping.lookup("/urlshort"), Some("https://github.com/gophercises/urlshort"));
        assert_eq!(mapping.lookup("/yaml-godoc"), Some("https://godoc.org/gopkg.in/yaml.v2"));
    }

    #[test]
    fn test_json_file_by_extension() {
        let file = write_temp(".json", r#"[{"path": "/a", "url": "https://example.com/a"}]"#);
        let config = RedirectsConfig {
            file: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        assert_eq!(config.effective_format(), ConfigFormat::Json);

        let mapping = load_redirects(&config).unwrap();
        assert_eq!(mapping.lookup("/a"), Some("https://example.com/a"));
    }

    #[test]
    fn test_malformed_redirect_document() {
        let file = write_temp(".yaml", "- path: /a\n");
        let config = RedirectsConfig {
            file: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        assert!(matches!(load_redirects(&config), Err(ConfigError::Redirects(_))));
    }
}
