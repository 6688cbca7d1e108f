//! Configuration loading from files.
//!
//! The YAML file is layered with `PAGECHAIN__`-prefixed environment
//! variables, e.g. `PAGECHAIN__SITE__OUTPUT=dist`.

use std::path::Path;

use super::{Config, ConfigError};

/// Default config file name.
pub const DEFAULT_CONFIG_FILE: &str = "pagechain.yaml";

impl Config {
    /// Load the config from the command line argument, defaulting to `pagechain.yaml`
    pub async fn load_from_arg(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config_file = config_file.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
        let config_file = if config_file.is_relative() {
            std::env::current_dir()
                .map_err(ConfigError::CwdFailure)?
                .join(config_file)
        } else {
            config_file.to_path_buf()
        };

        Self::load_from_file(&config_file).await
    }

    /// Load the config from a file path
    pub(crate) async fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        Self::load_layered(path, environment()).await
    }

    /// Load the config file with `env` layered on top.
    async fn load_layered(path: &Path, env: config::Environment) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let path_str = path
            .as_os_str()
            .to_str()
            .ok_or_else(|| ConfigError::EncodePath(path.to_path_buf()))?;

        let config = config::Config::builder()
            .add_source(config::File::new(path_str, config::FileFormat::Yaml))
            .add_source(env)
            .build()?
            .try_deserialize::<Config>()?;

        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}

/// Environment overrides, e.g. `PAGECHAIN__SITE__OUTPUT=dist`.
fn environment() -> config::Environment {
    config::Environment::with_prefix("PAGECHAIN")
        .prefix_separator("__")
        .separator("__")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_file(dir: &Path, yaml: &str) -> std::path::PathBuf {
        let path = dir.join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, yaml).unwrap();
        path
    }

    #[tokio::test]
    async fn test_empty_redirect_list_disables_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = config_file(dir.path(), "site:\n  name: Blog\nredirects: []\n");

        let config = Config::load_from_file(&path).await.unwrap();
        assert!(config.redirects().is_empty());
    }

    #[tokio::test]
    async fn test_environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = config_file(dir.path(), "site:\n  name: Blog\n  output: public\n");

        let vars = config::Map::from([
            ("PAGECHAIN__SITE__OUTPUT".to_string(), "dist".to_string()),
            ("OTHER__SITE__NAME".to_string(), "Ignored".to_string()),
        ]);
        let config = Config::load_layered(&path, environment().source(Some(vars)))
            .await
            .unwrap();

        assert_eq!(config.site.output, std::path::PathBuf::from("dist"));
        assert_eq!(config.site.name, "Blog");
    }
}
