//! Build output: the page manifest and the redirects file.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::listing::Listing;
use super::registry::{Page, PageSet, Redirect};

/// Name of the manifest file in the output directory.
pub const MANIFEST_FILE: &str = "pages.json";

/// Name of the redirect rules file in the output directory.
pub const REDIRECTS_FILE: &str = "_redirects";

#[derive(Debug, Clone, Serialize)]
pub struct SiteInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Everything the rendering stage needs to produce the site.
#[derive(Debug, Clone, Serialize)]
pub struct Manifest<'a> {
    pub site: SiteInfo,
    pub pages: &'a [Page],
    pub redirects: &'a [Redirect],
    pub listings: &'a [Listing],
}

impl<'a> Manifest<'a> {
    pub fn new(site: SiteInfo, pages: &'a PageSet, listings: &'a [Listing]) -> Self {
        Self {
            site,
            pages: pages.pages(),
            redirects: pages.redirects(),
            listings,
        }
    }
}

/// Render redirects as `from to status` lines, with `!` marking forced rules.
///
/// ```text
/// /l/prompt-engineering-masterclass-talk /talks/prompt-engineering-masterclass 301!
/// ```
pub fn redirect_rules(redirects: &[Redirect]) -> String {
    redirects
        .iter()
        .map(|r| {
            let force = if r.force { "!" } else { "" };
            format!("{} {} {}{}\n", r.from_path, r.to_path, r.status(), force)
        })
        .collect()
}

/// Write the manifest and redirect rules into `output_dir`.
///
/// Returns the paths written.
pub fn write_output(output_dir: &Path, manifest: &Manifest<'_>) -> std::io::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)?;

    let manifest_path = output_dir.join(MANIFEST_FILE);
    let json = serde_json::to_string_pretty(manifest).map_err(std::io::Error::other)?;
    std::fs::write(&manifest_path, json)?;
    tracing::debug!(path = %manifest_path.display(), "wrote manifest");

    let redirects_path = output_dir.join(REDIRECTS_FILE);
    std::fs::write(&redirects_path, redirect_rules(manifest.redirects))?;
    tracing::debug!(path = %redirects_path.display(), "wrote redirects");

    Ok(vec![manifest_path, redirects_path])
}
