use std::path::PathBuf;

use crate::config::Config;

use super::document::Category;
use super::listing::{Listing, build_listing};
use super::output::{Manifest, SiteInfo, write_output};
use super::paths::resolve_against;
use super::pipeline::{Pipeline, PipelineError, PipelineReport};
use super::registry::PageSet;
use super::source::FsContentLoader;

#[derive(thiserror::Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("failed to write output to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The in-memory result of running the pipeline, before anything is written.
pub struct BuildPlan {
    pub pages: PageSet,
    pub listings: Vec<Listing>,
    pub report: PipelineReport,
}

#[derive(Debug)]
pub struct BuildResult {
    pub output_dir: PathBuf,
    pub pages: usize,
    pub redirects: usize,
    pub files: Vec<PathBuf>,
}

pub struct Builder {
    config: Config,
    /// Base path for resolving relative paths (typically the config file's directory)
    base_path: PathBuf,
}

impl Builder {
    pub fn new(config: Config, base_path: PathBuf) -> Self {
        Self { config, base_path }
    }

    /// Get the content directory, resolved against base_path.
    pub fn content_dir(&self) -> PathBuf {
        resolve_against(&self.base_path, &self.config.content.path)
    }

    /// Get the output directory path, resolved against base_path.
    pub fn output_dir(&self) -> PathBuf {
        resolve_against(&self.base_path, &self.config.site.output)
    }

    /// The standard category pipeline plus the configured redirects.
    pub fn pipeline(&self) -> Pipeline {
        let mut pipeline = Pipeline::default_pipeline();
        for redirect in self.config.redirects() {
            pipeline.add_redirect(redirect);
        }
        pipeline
    }

    /// Run the pipeline against the content directory without writing.
    pub fn plan(&self) -> Result<BuildPlan, BuildError> {
        let loader = FsContentLoader::new(
            self.content_dir(),
            self.config.content.extensions.clone(),
        );
        tracing::info!(content = %loader.root().display(), "loading content");

        let mut pages = PageSet::new();
        let report = self.pipeline().run(&loader, &mut pages).inspect_err(|e| {
            if let Some(category) = e.category() {
                tracing::error!(%category, "build aborted");
            }
        })?;

        tracing::debug!(
            pages = pages.len(),
            redirects = pages.redirects().len(),
            "planned site"
        );

        let listings = Category::ALL
            .into_iter()
            .map(|category| build_listing(category, &pages, &report.documents))
            .collect();

        Ok(BuildPlan {
            pages,
            listings,
            report,
        })
    }

    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        // Build pipeline:
        // 1. Load, sequence and register every category
        // 2. Register redirects
        // 3. Build listings
        // 4. Write the manifest and redirect rules
        //
        // Nothing is written unless steps 1-3 all succeed.
        let plan = self.plan()?;

        let site = SiteInfo {
            name: self.config.site.name.clone(),
            url: self.config.site.url.clone(),
        };
        let manifest = Manifest::new(site, &plan.pages, &plan.listings);

        let output_dir = self.output_dir();
        let files = write_output(&output_dir, &manifest).map_err(|source| BuildError::Write {
            path: output_dir.clone(),
            source,
        })?;
        tracing::info!(output = %output_dir.display(), files = files.len(), "wrote output");

        Ok(BuildResult {
            output_dir,
            pages: plan.report.total_pages(),
            redirects: plan.report.redirects,
            files,
        })
    }
}
