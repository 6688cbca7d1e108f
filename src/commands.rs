pub mod build;
pub mod clean;
pub mod init;
pub mod routes;

use std::path::{Path, PathBuf};

use crate::config::DEFAULT_CONFIG_FILE;

/// Resolve the config file argument to an absolute path.
fn config_path(config_file: Option<&Path>) -> Result<PathBuf, anyhow::Error> {
    let config_path = config_file.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
    Ok(if config_path.is_relative() {
        std::env::current_dir()?.join(config_path)
    } else {
        config_path.to_path_buf()
    })
}
