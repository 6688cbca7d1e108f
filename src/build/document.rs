use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// =============================================================================
// Categories
// =============================================================================

/// The kind of content a document holds.
///
/// Each category gets its own ordering, route prefix and template, and its
/// documents are only ever linked to documents of the same category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// A blog post
    Post,
    /// A lesson page of the course
    Course,
    /// A conference talk page
    Talk,
}

impl Category {
    /// All categories, in the order the build processes them.
    pub const ALL: [Category; 3] = [Category::Post, Category::Course, Category::Talk];

    /// The front matter `type` value for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Post => "post",
            Category::Course => "course",
            Category::Talk => "talk",
        }
    }

    /// Look up a category by its front matter `type` value.
    pub fn from_type(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

// =============================================================================
// Identifiers and ordering
// =============================================================================

/// Opaque document identifier, stable across builds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The value a category is sorted by.
///
/// Posts and talks sort by date, course pages by an explicit order number.
/// Keys are only ever compared within one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum OrderKey {
    Date(NaiveDateTime),
    Order(i64),
}

// =============================================================================
// Documents
// =============================================================================

/// A content item returned by a content loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: DocumentId,
    /// Path segment derived from the document location (e.g. "/hello-world/")
    pub route_fragment: String,
    pub category: Category,
    /// Sort key for the category; `None` when the front matter omits it
    pub order_key: Option<OrderKey>,
    pub title: String,
    pub description: Option<String>,
    /// Course module the document belongs to
    pub module: Option<String>,
    /// Path relative to the content root
    pub source_path: PathBuf,
}

impl Document {
    /// Create a document with no order key.
    ///
    /// The title falls back to the last segment of the route fragment.
    pub fn new(
        id: impl Into<String>,
        route_fragment: impl Into<String>,
        category: Category,
    ) -> Self {
        let id = id.into();
        let route_fragment = route_fragment.into();
        let title = route_fragment
            .trim_matches('/')
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
            .map(title_case)
            .unwrap_or_else(|| "Untitled".to_string());

        Self {
            source_path: PathBuf::from(&id),
            id: DocumentId(id),
            route_fragment,
            category,
            order_key: None,
            title,
            description: None,
            module: None,
        }
    }

    pub fn with_order_key(mut self, key: OrderKey) -> Self {
        self.order_key = Some(key);
        self
    }

    #[cfg(test)]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// The document date, if it is ordered by date.
    pub fn date(&self) -> Option<NaiveDateTime> {
        match self.order_key {
            Some(OrderKey::Date(date)) => Some(date),
            _ => None,
        }
    }

    /// The explicit order number, if it is ordered by one.
    pub fn order(&self) -> Option<i64> {
        match self.order_key {
            Some(OrderKey::Order(order)) => Some(order),
            _ => None,
        }
    }
}

/// Title for a document: the front matter title, or the file stem in title
/// case. `index` files take their directory name.
pub fn document_title(front_matter: &FrontMatter, source_path: &Path) -> String {
    if let Some(title) = &front_matter.title {
        return title.clone();
    }

    let stem = source_path.file_stem().and_then(|s| s.to_str());
    let name = match stem {
        Some("index") => source_path
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|s| s.to_str()),
        other => other,
    };

    name.map(title_case).unwrap_or_else(|| "Untitled".to_string())
}

/// Convert a slug to title case: "type-guards" -> "Type Guards".
fn title_case(slug: &str) -> String {
    slug.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// =============================================================================
// Front matter
// =============================================================================

/// Front matter metadata parsed from a markdown file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Publication date, kept as written until the loader parses it
    pub date: Option<String>,
    /// Category name ("post", "course", "talk")
    #[serde(rename = "type")]
    pub content_type: Option<String>,
    /// Position of a course page within the course
    pub order: Option<i64>,
    /// Course module heading the page is listed under
    pub module: Option<String>,
    /// Any other metadata (video ids, article slugs, ...)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

/// Parse the front matter block at the top of a markdown file.
///
/// Front matter is a YAML block delimited by `---`:
///
/// ```markdown
/// ---
/// title: My Post
/// date: 2023-04-12
/// type: post
/// ---
///
/// # Content starts here
/// ```
///
/// Returns `Ok(None)` if the file has no front matter block. A block that is
/// not valid YAML for [`FrontMatter`] is an error.
pub fn parse_front_matter(content: &str) -> Result<Option<FrontMatter>, serde_yaml::Error> {
    let content = content.trim_start();

    if !content.starts_with("---") {
        return Ok(None);
    }

    let after_opening = &content[3..];
    let Some(closing_pos) = after_opening.find("\n---") else {
        // Unclosed block, treat the whole file as content
        return Ok(None);
    };

    let yaml_content = after_opening[..closing_pos].trim_start_matches(['\r', '\n']);
    if yaml_content.trim().is_empty() {
        return Ok(Some(FrontMatter::default()));
    }

    serde_yaml::from_str(yaml_content).map(Some)
}

/// Parse a front matter date.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS` (or with a space) and RFC 3339.
/// Offsets are normalized to UTC.
pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_type() {
        assert_eq!(Category::from_type("post"), Some(Category::Post));
        assert_eq!(Category::from_type("course"), Some(Category::Course));
        assert_eq!(Category::from_type("talk"), Some(Category::Talk));
        assert_eq!(Category::from_type("page"), None);
        assert_eq!(Category::from_type("Post"), None);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("type-guards"), "Type Guards");
        assert_eq!(title_case("prompt_engineering"), "Prompt Engineering");
        assert_eq!(title_case("README"), "README");
        assert_eq!(title_case("double--dash"), "Double Dash");
    }

    #[test]
    fn test_document_title_fallback() {
        let doc = Document::new("getting-started/index.md", "/getting-started/", Category::Post);
        assert_eq!(doc.title, "Getting Started");

        let doc = Document::new("index.md", "/", Category::Post);
        assert_eq!(doc.title, "Untitled");
    }

    #[test]
    fn test_document_title_from_path() {
        let fm = FrontMatter::default();
        assert_eq!(
            document_title(&fm, Path::new("hello-world/index.md")),
            "Hello World"
        );
        assert_eq!(document_title(&fm, Path::new("type_guards.md")), "Type Guards");

        let fm = FrontMatter {
            title: Some("Generics in Five Minutes".to_string()),
            ..Default::default()
        };
        assert_eq!(
            document_title(&fm, Path::new("generics/index.md")),
            "Generics in Five Minutes"
        );
    }

    #[test]
    fn test_parse_front_matter_basic() {
        let content = r#"---
title: My Post
description: A test post
date: 2023-04-12
type: post
---

# Hello World
"#;
        let fm = parse_front_matter(content).unwrap().unwrap();
        assert_eq!(fm.title, Some("My Post".to_string()));
        assert_eq!(fm.description, Some("A test post".to_string()));
        assert_eq!(fm.date, Some("2023-04-12".to_string()));
        assert_eq!(fm.content_type, Some("post".to_string()));
        assert_eq!(fm.order, None);
    }

    #[test]
    fn test_parse_front_matter_course_fields() {
        let content = r#"---
title: Unions
type: course
order: 3
module: Basics
youtubeVideoId: abc123
---
"#;
        let fm = parse_front_matter(content).unwrap().unwrap();
        assert_eq!(fm.order, Some(3));
        assert_eq!(fm.module.as_deref(), Some("Basics"));
        assert!(!fm.extra.contains_key("module"));
        assert!(fm.extra.contains_key("youtubeVideoId"));
    }

    #[test]
    fn test_parse_front_matter_none() {
        let content = "# Just Markdown\n\nNo front matter here.";
        assert!(parse_front_matter(content).unwrap().is_none());

        let unclosed = "---\ntitle: Oops\n\n# Content";
        assert!(parse_front_matter(unclosed).unwrap().is_none());
    }

    #[test]
    fn test_parse_front_matter_empty() {
        let fm = parse_front_matter("---\n---\n\n# Content").unwrap().unwrap();
        assert_eq!(fm.title, None);
        assert_eq!(fm.content_type, None);
    }

    #[test]
    fn test_parse_front_matter_malformed() {
        let content = "---\ntitle: [unterminated\n---\n";
        assert!(parse_front_matter(content).is_err());

        let content = "---\norder: first\n---\n";
        assert!(parse_front_matter(content).is_err());
    }

    #[test]
    fn test_parse_date() {
        let day = NaiveDate::from_ymd_opt(2023, 4, 12).unwrap();
        assert_eq!(parse_date("2023-04-12"), day.and_hms_opt(0, 0, 0));
        assert_eq!(parse_date("2023-04-12T10:30:00"), day.and_hms_opt(10, 30, 0));
        assert_eq!(parse_date("2023-04-12 10:30:00"), day.and_hms_opt(10, 30, 0));
        assert_eq!(
            parse_date("2023-04-12T12:30:00+02:00"),
            day.and_hms_opt(10, 30, 0)
        );
        assert_eq!(parse_date("April 12, 2023"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_order_key_accessors() {
        let date = parse_date("2022-01-01").unwrap();
        let post =
            Document::new("a.md", "/a/", Category::Post).with_order_key(OrderKey::Date(date));
        assert_eq!(post.date(), Some(date));
        assert_eq!(post.order(), None);

        let lesson =
            Document::new("b.md", "/b/", Category::Course).with_order_key(OrderKey::Order(2));
        assert_eq!(lesson.order(), Some(2));
        assert_eq!(lesson.date(), None);
    }
}
