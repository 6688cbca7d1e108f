//! Page generation pipeline.
//!
//! Each category runs through the same three steps:
//! 1. Load (query the content store, already sorted)
//! 2. Sequence (link every document to its neighbors)
//! 3. Register (one page per document)
//!
//! Redirects are registered after all categories, independent of content.

mod error;

pub use error::PipelineError;

use crate::build::document::{Category, Document};
use crate::build::registry::{Page, PageContext, PageRegistry, Redirect};
use crate::build::sequence::{SequencedDocument, sequence};
use crate::build::source::{ContentLoader, Sort, SortKey};

/// Everything that differs between categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPipeline {
    pub category: Category,
    pub sort: Sort,
    /// Template that renders the category's pages
    pub template: &'static str,
    /// Prepended verbatim to each document's route fragment
    pub route_prefix: &'static str,
}

impl CategoryPipeline {
    /// The pipeline settings for a category.
    pub fn for_category(category: Category) -> Self {
        match category {
            Category::Post => Self {
                category,
                sort: Sort::asc(SortKey::Date),
                template: "blogPost",
                route_prefix: "",
            },
            Category::Course => Self {
                category,
                sort: Sort::asc(SortKey::Order),
                template: "coursePage",
                route_prefix: "courses/tltr-typescript",
            },
            Category::Talk => Self {
                category,
                sort: Sort::asc(SortKey::Date),
                template: "talkPage",
                route_prefix: "talks",
            },
        }
    }

    /// The page path for a route fragment.
    pub fn route(&self, route_fragment: &str) -> String {
        format!("{}{}", self.route_prefix, route_fragment)
    }

    fn page_for(&self, item: &SequencedDocument) -> Page {
        Page {
            path: self.route(&item.document.route_fragment),
            template: self.template.to_string(),
            context: PageContext {
                id: item.document.id.clone(),
                previous_id: item.previous.clone(),
                next_id: item.next.clone(),
                category: self.category,
            },
        }
    }
}

/// Run one category through load, sequence and register.
///
/// Returns the documents in page order. Zero documents is not an error.
pub fn run_category(
    pipeline: &CategoryPipeline,
    loader: &dyn ContentLoader,
    registry: &mut dyn PageRegistry,
) -> Result<Vec<Document>, PipelineError> {
    let category = pipeline.category;
    let docs = loader.fetch_documents(category, pipeline.sort)?;

    if let Some(foreign) = docs.iter().find(|d| d.category != category) {
        return Err(PipelineError::ForeignDocument {
            expected: category,
            found: foreign.category,
            id: foreign.id.clone(),
        });
    }

    let sequenced = sequence(docs);
    let count = sequenced.len();

    for item in &sequenced {
        let page = pipeline.page_for(item);
        tracing::debug!(%category, path = %page.path, id = %page.context.id, "registering page");
        registry
            .register_page(page)
            .map_err(|source| PipelineError::Page { category, source })?;
    }

    tracing::info!(%category, pages = count, "registered pages");
    Ok(sequenced.into_iter().map(|item| item.document).collect())
}

/// What one pipeline run registered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    /// Page count per category, in run order
    pub pages: Vec<(Category, usize)>,
    pub redirects: usize,
    /// Every loaded document, grouped by category in page order
    pub documents: Vec<Document>,
}

impl PipelineReport {
    pub fn total_pages(&self) -> usize {
        self.pages.iter().map(|(_, n)| n).sum()
    }
}

/// The full page generation pipeline: every category, then redirects.
#[derive(Debug, Clone)]
pub struct Pipeline {
    categories: Vec<CategoryPipeline>,
    redirects: Vec<Redirect>,
}

impl Pipeline {
    /// Create an empty pipeline with no categories or redirects.
    pub fn new() -> Self {
        Self {
            categories: Vec::new(),
            redirects: Vec::new(),
        }
    }

    /// Create the standard pipeline: post → course → talk.
    pub fn default_pipeline() -> Self {
        let mut pipeline = Self::new();
        for category in Category::ALL {
            pipeline.add_category(CategoryPipeline::for_category(category));
        }
        pipeline
    }

    pub fn add_category(&mut self, category: CategoryPipeline) -> &mut Self {
        self.categories.push(category);
        self
    }

    pub fn add_redirect(&mut self, redirect: Redirect) -> &mut Self {
        self.redirects.push(redirect);
        self
    }

    /// Run every category, then register the redirects.
    ///
    /// Stops at the first error.
    pub fn run(
        &self,
        loader: &dyn ContentLoader,
        registry: &mut dyn PageRegistry,
    ) -> Result<PipelineReport, PipelineError> {
        let mut report = PipelineReport::default();

        for category in &self.categories {
            let docs = run_category(category, loader, registry)?;
            report.pages.push((category.category, docs.len()));
            report.documents.extend(docs);
        }

        for redirect in &self.redirects {
            tracing::debug!(
                from = %redirect.from_path,
                to = %redirect.to_path,
                "registering redirect"
            );
            registry
                .register_redirect(redirect.clone())
                .map_err(PipelineError::Redirect)?;
        }
        report.redirects = self.redirects.len();

        Ok(report)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::default_pipeline()
    }
}
