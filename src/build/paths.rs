//! Path and route conversion utilities.
//!
//! This module handles conversions between:
//! - Source file paths (relative paths within the content root)
//! - Route fragments (the slug a document contributes to its page path)
//! - Route keys (normalized paths used to detect collisions)

use std::path::{Path, PathBuf};

/// Derive a route fragment from a content-relative markdown path.
///
/// The extension is dropped, `index` files collapse to their directory, and
/// the result is wrapped in slashes.
///
/// # Examples
/// ```ignore
/// source_path_to_slug("hello-world/index.md") => "/hello-world/"
/// source_path_to_slug("hello-world.md") => "/hello-world/"
/// source_path_to_slug("2023/recap.md") => "/2023/recap/"
/// source_path_to_slug("index.md") => "/"
/// ```
pub fn source_path_to_slug(path: &Path) -> String {
    let path_str = path.with_extension("").to_string_lossy().replace('\\', "/");

    let path_str = if path_str.ends_with("/index") || path_str == "index" {
        path_str
            .trim_end_matches("index")
            .trim_end_matches('/')
            .to_string()
    } else {
        path_str
    };

    let path_str = path_str.trim_matches('/');
    if path_str.is_empty() {
        "/".to_string()
    } else {
        format!("/{path_str}/")
    }
}

/// Normalize a route to the key used for collision detection.
///
/// Page paths are registered as built (some without a leading slash), so two
/// routes are the same when they match after ensuring a single leading `/`.
pub fn route_key(path: &str) -> String {
    format!("/{}", path.trim_start_matches('/'))
}

/// Get the base path from a config file path (its parent directory).
pub fn base_path_from_config(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Resolve a possibly relative path against a base path.
pub fn resolve_against(base_path: &Path, path: &Path) -> PathBuf {
    if path.is_relative() {
        base_path.join(path)
    } else {
        path.to_path_buf()
    }
}
