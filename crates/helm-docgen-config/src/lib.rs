use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Default input and output locations for `helm-docgen`.
///
/// ```toml
/// values_path = "~/src/chart/values.yaml"
/// output_path = "docs/helm.md"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    pub values_path: PathBuf,
    #[serde(default)]
    pub output_path: Option<PathBuf>,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            log::debug!("no config file at {}", config_path.display());
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the configured paths
        config.values_path = Self::expand_path(&config.values_path).unwrap_or(config.values_path);
        config.output_path = config
            .output_path
            .map(|path| Self::expand_path(&path).unwrap_or(path));

        log::debug!("loaded config from {}", config_path.display());
        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/helm-docgen");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(err) => {
                log::warn!("could not expand {path_str}: {err}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::env;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let config_file = dir.path().join("config.toml");
        std::fs::write(&config_file, content).unwrap();
        config_file
    }

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/helm-docgen/config.toml"));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_both_paths() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = write_config(
            &temp_dir,
            "values_path = \"/charts/consul/values.yaml\"\noutput_path = \"/site/helm.md\"\n",
        );

        let config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(
            config,
            Config {
                values_path: PathBuf::from("/charts/consul/values.yaml"),
                output_path: Some(PathBuf::from("/site/helm.md")),
            }
        );
    }

    #[test]
    fn test_output_path_is_optional() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = write_config(&temp_dir, "values_path = \"values.yaml\"\n");

        let config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(config.values_path, PathBuf::from("values.yaml"));
        assert_eq!(config.output_path, None);
    }

    #[test]
    fn test_missing_values_path_is_a_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = write_config(&temp_dir, "output_path = \"out.md\"\n");

        let err = Config::load_from_path(&config_file).unwrap_err();

        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_config_with_tilde_in_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = write_config(&temp_dir, "values_path = \"~/charts/values.yaml\"\n");

        let config = Config::load_from_path(&config_file).unwrap().unwrap();

        let expanded_path = config.values_path.to_string_lossy();
        assert!(!expanded_path.starts_with('~'));
        assert!(expanded_path.ends_with("charts/values.yaml"));
    }

    #[test]
    fn test_config_with_env_var_in_toml() {
        unsafe {
            env::set_var("HELM_DOCGEN_TEST_SITE", "/custom/site");
        }

        let temp_dir = TempDir::new().unwrap();
        let config_file = write_config(
            &temp_dir,
            "values_path = \"values.yaml\"\noutput_path = \"$HELM_DOCGEN_TEST_SITE/helm.md\"\n",
        );

        let config = Config::load_from_path(&config_file).unwrap().unwrap();
        assert_eq!(
            config.output_path,
            Some(PathBuf::from("/custom/site/helm.md"))
        );

        unsafe {
            env::remove_var("HELM_DOCGEN_TEST_SITE");
        }
    }

    #[test]
    fn test_unknown_env_var_keeps_raw_path() {
        let path = PathBuf::from("$HELM_DOCGEN_SURELY_UNSET_VAR/values.yaml");
        assert_eq!(Config::expand_path(&path), None);
    }

    #[test]
    fn test_expand_path_with_relative_path() {
        let path = PathBuf::from("charts/values.yaml");
        assert_eq!(Config::expand_path(&path), Some(path));
    }
}
