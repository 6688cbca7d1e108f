//! Configuration type definitions.
//!
//! This module contains the data structures read from `pagechain.yaml`.
//! These types are pure data - no I/O or complex logic.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::build::Redirect;

// =============================================================================
// Root config
// =============================================================================

/// The site configuration.
///
/// ```yaml
/// site:
///   name: My Site
///   url: https://example.com
///   output: public
/// content:
///   path: content/blog
/// redirects:
///   - from: /l/short
///     to: /talks/long-name
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    #[serde(default)]
    pub content: ContentConfig,
    /// Redirects applied on every build
    #[serde(default = "default_redirects")]
    pub redirects: Vec<RedirectConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            content: ContentConfig::default(),
            redirects: default_redirects(),
        }
    }
}

// =============================================================================
// Site configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub name: String,
    pub url: Option<String>,
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "My Site".to_string(),
            url: None,
            output: default_output(),
        }
    }
}

fn default_output() -> PathBuf {
    PathBuf::from("_site")
}

// =============================================================================
// Content configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Directory holding the markdown content (relative to the config file)
    #[serde(default = "default_content_path")]
    pub path: PathBuf,
    /// File extensions treated as markdown documents
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            path: default_content_path(),
            extensions: default_extensions(),
        }
    }
}

fn default_content_path() -> PathBuf {
    PathBuf::from("content/blog")
}

fn default_extensions() -> Vec<String> {
    vec!["md".to_string()]
}

// =============================================================================
// Redirect configuration
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectConfig {
    pub from: String,
    pub to: String,
    #[serde(default = "default_true")]
    pub permanent: bool,
    /// Apply even if a page exists at `from`
    #[serde(default = "default_true")]
    pub force: bool,
}

impl From<&RedirectConfig> for Redirect {
    fn from(config: &RedirectConfig) -> Self {
        Redirect {
            from_path: config.from.clone(),
            to_path: config.to.clone(),
            permanent: config.permanent,
            force: config.force,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Shortlinks that always redirect to their full URLs.
fn default_redirects() -> Vec<RedirectConfig> {
    vec![RedirectConfig {
        from: "/l/prompt-engineering-masterclass-talk".to_string(),
        to: "/talks/prompt-engineering-masterclass".to_string(),
        permanent: true,
        force: true,
    }]
}
