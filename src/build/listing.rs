//! Category index listings (home page, talks page, course landing page).

use chrono::NaiveDateTime;
use serde::Serialize;

use super::document::{Category, Document, DocumentId};
use super::paths::route_key;
use super::pipeline::CategoryPipeline;
use super::registry::PageSet;
use super::source::{SortOrder, sort_documents};

/// One entry on a listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingEntry {
    pub id: DocumentId,
    /// Absolute link to the entry's page
    pub path: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
}

/// Entries sharing a course module, in listing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingModule {
    pub name: String,
    pub entries: Vec<DocumentId>,
}

/// The index page of a category, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing {
    #[serde(rename = "type")]
    pub category: Category,
    pub path: &'static str,
    pub entries: Vec<ListingEntry>,
    /// Module headings in order of first appearance
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub modules: Vec<ListingModule>,
}

/// Where a category is listed and in which direction.
pub fn listing_path(category: Category) -> (&'static str, SortOrder) {
    match category {
        Category::Post => ("/", SortOrder::Desc),
        Category::Course => ("/courses/tltr-typescript", SortOrder::Asc),
        Category::Talk => ("/talks", SortOrder::Desc),
    }
}

/// Build the listing for a category from its loaded documents and the pages
/// registered for them.
///
/// Documents are re-sorted in the listing direction with the same rules as a
/// content query, so documents without a key stay last.
pub fn build_listing(category: Category, pages: &PageSet, documents: &[Document]) -> Listing {
    let (path, order) = listing_path(category);
    let pipeline = CategoryPipeline::for_category(category);

    let mut docs: Vec<Document> = documents
        .iter()
        .filter(|d| d.category == category)
        .cloned()
        .collect();
    sort_documents(&mut docs, order);

    let entries: Vec<ListingEntry> = docs
        .into_iter()
        .filter_map(|doc| {
            let page = pages
                .get(&pipeline.route(&doc.route_fragment))
                .filter(|page| page.context.id == doc.id)?;
            Some(ListingEntry {
                path: route_key(&page.path),
                date: doc.date(),
                order: doc.order(),
                id: doc.id,
                title: doc.title,
                description: doc.description,
                module: doc.module,
            })
        })
        .collect();

    Listing {
        category,
        path,
        modules: group_modules(&entries),
        entries,
    }
}

fn group_modules(entries: &[ListingEntry]) -> Vec<ListingModule> {
    let mut modules: Vec<ListingModule> = Vec::new();
    for entry in entries {
        let Some(name) = &entry.module else {
            continue;
        };
        match modules.iter_mut().find(|m| &m.name == name) {
            Some(module) => module.entries.push(entry.id.clone()),
            None => modules.push(ListingModule {
                name: name.clone(),
                entries: vec![entry.id.clone()],
            }),
        }
    }
    modules
}
