use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::document::{Category, DocumentId};
use super::paths::route_key;

// =============================================================================
// Pages and redirects
// =============================================================================

/// Data handed to the template that renders a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContext {
    pub id: DocumentId,
    pub previous_id: Option<DocumentId>,
    pub next_id: Option<DocumentId>,
    #[serde(rename = "type")]
    pub category: Category,
}

/// A routable output unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub path: String,
    pub template: String,
    pub context: PageContext,
}

/// A fixed old-path to new-path mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Redirect {
    pub from_path: String,
    pub to_path: String,
    pub permanent: bool,
    /// Apply even when a page exists at `from_path`
    pub force: bool,
}

impl Redirect {
    /// HTTP status used when serving this redirect.
    pub fn status(&self) -> u16 {
        if self.permanent { 301 } else { 302 }
    }
}

// =============================================================================
// Errors
// =============================================================================

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("route '{path}' is produced by both '{existing}' and '{duplicate}'")]
    DuplicateRoute {
        path: String,
        existing: DocumentId,
        duplicate: DocumentId,
    },

    #[error("redirect from '{from_path}' is registered more than once")]
    DuplicateRedirect { from_path: String },

    #[error("redirect from '{from_path}' would shadow page '{page}' (set force to override)")]
    ShadowedRedirect { from_path: String, page: DocumentId },
}

// =============================================================================
// Registry
// =============================================================================

/// The page registration interface the pipeline writes to.
pub trait PageRegistry {
    fn register_page(&mut self, page: Page) -> Result<(), RegistrationError>;

    fn register_redirect(&mut self, redirect: Redirect) -> Result<(), RegistrationError>;
}

/// In-memory registry collecting the build output.
///
/// Keeps registration order and rejects any second page at the same route,
/// across all categories.
#[derive(Debug, Clone, Default)]
pub struct PageSet {
    pages: Vec<Page>,
    /// Route key -> index into `pages`
    routes: HashMap<String, usize>,
    redirects: Vec<Redirect>,
    redirect_sources: HashSet<String>,
}

impl PageSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn redirects(&self) -> &[Redirect] {
        &self.redirects
    }

    /// Pages of one category, in registration order.
    pub fn pages_for(&self, category: Category) -> impl Iterator<Item = &Page> {
        self.pages
            .iter()
            .filter(move |p| p.context.category == category)
    }

    /// Look up a page by path (leading slash optional).
    pub fn get(&self, path: &str) -> Option<&Page> {
        self.routes.get(&route_key(path)).map(|&i| &self.pages[i])
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl PageRegistry for PageSet {
    fn register_page(&mut self, page: Page) -> Result<(), RegistrationError> {
        let key = route_key(&page.path);
        if let Some(&existing) = self.routes.get(&key) {
            return Err(RegistrationError::DuplicateRoute {
                path: page.path,
                existing: self.pages[existing].context.id.clone(),
                duplicate: page.context.id,
            });
        }

        self.routes.insert(key, self.pages.len());
        self.pages.push(page);
        Ok(())
    }

    fn register_redirect(&mut self, redirect: Redirect) -> Result<(), RegistrationError> {
        let key = route_key(&redirect.from_path);

        if !redirect.force
            && let Some(&index) = self.routes.get(&key)
        {
            return Err(RegistrationError::ShadowedRedirect {
                from_path: redirect.from_path,
                page: self.pages[index].context.id.clone(),
            });
        }

        if !self.redirect_sources.insert(key) {
            return Err(RegistrationError::DuplicateRedirect {
                from_path: redirect.from_path,
            });
        }

        self.redirects.push(redirect);
        Ok(())
    }
}
