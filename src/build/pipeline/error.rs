//! Pipeline error types.

use crate::build::document::{Category, DocumentId};
use crate::build::registry::RegistrationError;
use crate::build::source::LoadError;

/// Errors that abort a build. None of them are retried.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("failed to register {category} pages")]
    Page {
        category: Category,
        source: RegistrationError,
    },

    #[error("failed to register redirects: {0}")]
    Redirect(RegistrationError),

    #[error("{expected} query returned '{id}' which is a {found} document")]
    ForeignDocument {
        expected: Category,
        found: Category,
        id: DocumentId,
    },
}

impl PipelineError {
    /// The category the failure belongs to, if any.
    pub fn category(&self) -> Option<Category> {
        match self {
            PipelineError::Load(e) => Some(e.category),
            PipelineError::Page { category, .. } => Some(*category),
            PipelineError::ForeignDocument { expected, .. } => Some(*expected),
            PipelineError::Redirect(_) => None,
        }
    }
}
