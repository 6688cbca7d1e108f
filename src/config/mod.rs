//! Configuration loading and types for pagechain.
//!
//! This module handles all aspects of configuration:
//! - Type definitions for config structures (`types`)
//! - Loading configs from files (`load`)

mod load;
mod types;

use std::path::PathBuf;

pub use load::DEFAULT_CONFIG_FILE;
pub use types::{Config, ContentConfig, RedirectConfig, SiteConfig};

use crate::build::Redirect;

// =============================================================================
// Errors
// =============================================================================

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to deserialize config: {0}")]
    Deserialize(#[from] config::ConfigError),

    #[error("failed to get current working directory: {0}")]
    CwdFailure(std::io::Error),

    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("config path is not valid UTF-8: {0}")]
    EncodePath(PathBuf),

    #[error("{0}")]
    Validation(String),
}

// =============================================================================
// Validation and accessors
// =============================================================================

impl Config {
    /// Check the values serde cannot check on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "invalid config: 'site.name' must not be empty".to_string(),
            ));
        }
        if self.content.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "invalid config: 'content.extensions' must list at least one extension"
                    .to_string(),
            ));
        }
        for redirect in &self.redirects {
            for (field, value) in [("from", &redirect.from), ("to", &redirect.to)] {
                if !value.starts_with('/') {
                    return Err(ConfigError::Validation(format!(
                        "invalid config: redirect '{field}' path '{value}' must start with '/'"
                    )));
                }
            }
        }
        Ok(())
    }

    /// The configured redirects as registration records.
    pub fn redirects(&self) -> Vec<Redirect> {
        self.redirects.iter().map(Redirect::from).collect()
    }
}
