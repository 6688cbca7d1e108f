use std::fmt;
use std::path::{Path, PathBuf};

use super::document::{
    Category, Document, DocumentId, FrontMatter, OrderKey, document_title, parse_date,
    parse_front_matter,
};
use super::paths::source_path_to_slug;

// =============================================================================
// Sorting
// =============================================================================

/// Which front matter field a category is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Date,
    Order,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// A sort request passed to a content loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub key: SortKey,
    pub order: SortOrder,
}

impl Sort {
    pub fn asc(key: SortKey) -> Self {
        Self {
            key,
            order: SortOrder::Asc,
        }
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self.key {
            SortKey::Date => "date",
            SortKey::Order => "order",
        };
        let order = match self.order {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        };
        write!(f, "{key} {order}")
    }
}

/// Sort documents in place by their order key.
///
/// The sort is stable, so documents with equal keys keep their retrieval
/// order. Documents without a key always come last, whatever the direction.
pub fn sort_documents(docs: &mut [Document], order: SortOrder) {
    docs.sort_by(|a, b| match (&a.order_key, &b.order_key) {
        (Some(a), Some(b)) => match order {
            SortOrder::Asc => a.cmp(b),
            SortOrder::Desc => b.cmp(a),
        },
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}

// =============================================================================
// Errors
// =============================================================================

/// A content query failed. Always fatal to the build.
#[derive(thiserror::Error, Debug)]
#[error("failed to load {category} documents: {kind}")]
pub struct LoadError {
    pub category: Category,
    pub kind: LoadErrorKind,
}

#[derive(thiserror::Error, Debug)]
pub enum LoadErrorKind {
    #[error("content path does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("content path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed front matter in {path}: {source}")]
    FrontMatter {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("invalid date '{value}' in {path}")]
    InvalidDate { path: PathBuf, value: String },
}

impl LoadError {
    pub fn new(category: Category, kind: LoadErrorKind) -> Self {
        Self { category, kind }
    }
}

// =============================================================================
// Content loader
// =============================================================================

/// The content query interface the pipeline reads documents through.
pub trait ContentLoader {
    /// Fetch every document of `category`, ordered by `sort`.
    ///
    /// Ordering is stable: documents with equal keys keep their retrieval
    /// order. An empty result is valid.
    fn fetch_documents(&self, category: Category, sort: Sort) -> Result<Vec<Document>, LoadError>;
}

/// Loads documents from markdown files under a content directory.
///
/// Every query walks the directory afresh, so a loader can be reused across
/// builds.
#[derive(Debug, Clone)]
pub struct FsContentLoader {
    root: PathBuf,
    extensions: Vec<String>,
}

impl FsContentLoader {
    pub fn new(root: PathBuf, extensions: Vec<String>) -> Self {
        Self { root, extensions }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Collect all markdown files, relative to the root, in sorted order.
    fn discover(&self, category: Category) -> Result<Vec<PathBuf>, LoadError> {
        if !self.root.exists() {
            return Err(LoadError::new(
                category,
                LoadErrorKind::PathNotFound(self.root.clone()),
            ));
        }
        if !self.root.is_dir() {
            return Err(LoadError::new(
                category,
                LoadErrorKind::NotADirectory(self.root.clone()),
            ));
        }

        let mut files = Vec::new();
        self.walk_directory(&self.root, &PathBuf::new(), &mut files)
            .map_err(|kind| LoadError::new(category, kind))?;
        Ok(files)
    }

    /// Recursively walk a directory and collect markdown files.
    fn walk_directory(
        &self,
        dir: &Path,
        relative_path: &Path,
        files: &mut Vec<PathBuf>,
    ) -> Result<(), LoadErrorKind> {
        let read_dir_err = |source| LoadErrorKind::ReadDir {
            path: dir.to_path_buf(),
            source,
        };

        let mut entries = std::fs::read_dir(dir)
            .map_err(read_dir_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(read_dir_err)?;
        entries.sort_by_key(|e| e.file_name());

        for entry in entries {
            let path = entry.path();
            let file_name = entry.file_name();
            let file_name_str = file_name.to_string_lossy();

            // Skip hidden files and directories
            if file_name_str.starts_with('.') {
                continue;
            }

            let relative = relative_path.join(&file_name);

            if path.is_dir() {
                self.walk_directory(&path, &relative, files)?;
            } else if self.is_markdown(&path) {
                files.push(relative);
            }
        }

        Ok(())
    }

    fn is_markdown(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|x| x.eq_ignore_ascii_case(ext)))
    }

    /// Read one file and turn it into a document if it belongs to `category`.
    fn load_document(
        &self,
        relative: &Path,
        category: Category,
        key: SortKey,
    ) -> Result<Option<Document>, LoadErrorKind> {
        let full_path = self.root.join(relative);
        let raw = std::fs::read_to_string(&full_path).map_err(|source| LoadErrorKind::ReadFile {
            path: full_path.clone(),
            source,
        })?;

        let front_matter = parse_front_matter(&raw)
            .map_err(|source| LoadErrorKind::FrontMatter {
                path: full_path.clone(),
                source,
            })?
            .unwrap_or_default();

        let doc_category = front_matter
            .content_type
            .as_deref()
            .and_then(Category::from_type);
        if doc_category != Some(category) {
            return Ok(None);
        }

        let order_key = order_key_for(&front_matter, key, &full_path)?;
        let id = relative.to_string_lossy().replace('\\', "/");

        Ok(Some(Document {
            id: DocumentId::new(id),
            route_fragment: source_path_to_slug(relative),
            category,
            order_key,
            title: document_title(&front_matter, relative),
            description: front_matter.description.clone(),
            module: front_matter.module.clone(),
            source_path: relative.to_path_buf(),
        }))
    }
}

/// Extract the requested sort key from front matter.
fn order_key_for(
    front_matter: &FrontMatter,
    key: SortKey,
    path: &Path,
) -> Result<Option<OrderKey>, LoadErrorKind> {
    match key {
        SortKey::Order => Ok(front_matter.order.map(OrderKey::Order)),
        SortKey::Date => match &front_matter.date {
            None => Ok(None),
            Some(value) => parse_date(value)
                .map(|d| Some(OrderKey::Date(d)))
                .ok_or_else(|| LoadErrorKind::InvalidDate {
                    path: path.to_path_buf(),
                    value: value.clone(),
                }),
        },
    }
}

impl ContentLoader for FsContentLoader {
    fn fetch_documents(&self, category: Category, sort: Sort) -> Result<Vec<Document>, LoadError> {
        let mut docs = Vec::new();

        for relative in self.discover(category)? {
            match self.load_document(&relative, category, sort.key) {
                Ok(Some(doc)) => docs.push(doc),
                Ok(None) => {}
                Err(kind) => return Err(LoadError::new(category, kind)),
            }
        }

        let missing = docs.iter().filter(|d| d.order_key.is_none()).count();
        if missing > 0 {
            tracing::warn!(
                %category,
                count = missing,
                "documents without a sort key are ordered last"
            );
        }

        sort_documents(&mut docs, sort.order);
        tracing::debug!(%category, %sort, count = docs.len(), "fetched documents");
        Ok(docs)
    }
}

/// An in-memory document store answering the same queries as the
/// filesystem loader.
#[derive(Debug, Clone, Default)]
pub struct MemoryContentLoader {
    documents: Vec<Document>,
}

impl MemoryContentLoader {
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }
}

impl ContentLoader for MemoryContentLoader {
    fn fetch_documents(&self, category: Category, sort: Sort) -> Result<Vec<Document>, LoadError> {
        let mut docs: Vec<Document> = self
            .documents
            .iter()
            .filter(|d| d.category == category)
            .cloned()
            .collect();
        sort_documents(&mut docs, sort.order);
        Ok(docs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::document::parse_date;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn post(root: &Path, relative: &str, date: &str) {
        write(
            root,
            relative,
            &format!("---\ntitle: {relative}\ndate: {date}\ntype: post\n---\n\nBody\n"),
        );
    }

    fn loader(root: &Path) -> FsContentLoader {
        FsContentLoader::new(root.to_path_buf(), vec!["md".to_string()])
    }

    fn ids(docs: &[Document]) -> Vec<&str> {
        docs.iter().map(|d| d.id.as_str()).collect()
    }

    #[test]
    fn test_sort_documents_stable_and_missing_last() {
        let date = |s| OrderKey::Date(parse_date(s).unwrap());
        let mut docs = vec![
            Document::new("a", "/a/", Category::Post),
            Document::new("b", "/b/", Category::Post).with_order_key(date("2022-05-01")),
            Document::new("c", "/c/", Category::Post).with_order_key(date("2021-05-01")),
            Document::new("d", "/d/", Category::Post).with_order_key(date("2022-05-01")),
        ];

        sort_documents(&mut docs, SortOrder::Asc);
        assert_eq!(ids(&docs), vec!["c", "b", "d", "a"]);

        sort_documents(&mut docs, SortOrder::Desc);
        assert_eq!(ids(&docs), vec!["b", "d", "c", "a"]);
    }

    #[test]
    fn test_fs_loader_filters_by_type_and_sorts_by_date() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        post(root, "second/index.md", "2022-02-01");
        post(root, "first.md", "2021-06-15");
        write(
            root,
            "talk/index.md",
            "---\ntitle: A Talk\ndate: 2020-01-01\ntype: talk\n---\n",
        );
        write(root, "notes.md", "# no front matter\n");
        write(root, "cover.png", "not markdown");

        let docs = loader(root)
            .fetch_documents(Category::Post, Sort::asc(SortKey::Date))
            .unwrap();

        assert_eq!(ids(&docs), vec!["first.md", "second/index.md"]);
        assert_eq!(docs[0].route_fragment, "/first/");
        assert_eq!(docs[1].route_fragment, "/second/");
        assert!(docs.iter().all(|d| d.category == Category::Post));
    }

    #[test]
    fn test_fs_loader_course_order() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "tltr/x/index.md", "---\ntitle: X\ntype: course\norder: 2\n---\n");
        write(
            root,
            "tltr/y/index.md",
            "---\ntitle: Y\ntype: course\norder: 1\nmodule: Basics\n---\n",
        );

        let docs = loader(root)
            .fetch_documents(Category::Course, Sort::asc(SortKey::Order))
            .unwrap();

        assert_eq!(ids(&docs), vec!["tltr/y/index.md", "tltr/x/index.md"]);
        assert_eq!(docs[0].order(), Some(1));
        assert_eq!(docs[0].title, "Y");
        assert_eq!(docs[0].module.as_deref(), Some("Basics"));
        assert_eq!(docs[1].module, None);
    }

    #[test]
    fn test_fs_loader_empty_category() {
        let dir = tempfile::tempdir().unwrap();
        post(dir.path(), "only-post.md", "2022-01-01");

        let docs = loader(dir.path())
            .fetch_documents(Category::Talk, Sort::asc(SortKey::Date))
            .unwrap();
        assert!(docs.is_empty());
    }

    #[test]
    fn test_fs_loader_skips_hidden_entries() {
        let dir = tempfile::tempdir().unwrap();
        post(dir.path(), ".drafts/secret.md", "2022-01-01");
        post(dir.path(), ".hidden.md", "2022-01-01");
        post(dir.path(), "visible.md", "2022-01-01");

        let docs = loader(dir.path())
            .fetch_documents(Category::Post, Sort::asc(SortKey::Date))
            .unwrap();
        assert_eq!(ids(&docs), vec!["visible.md"]);
    }

    #[test]
    fn test_fs_loader_malformed_front_matter_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        post(dir.path(), "good.md", "2022-01-01");
        write(dir.path(), "bad.md", "---\ntitle: [oops\ntype: post\n---\n");

        let err = loader(dir.path())
            .fetch_documents(Category::Post, Sort::asc(SortKey::Date))
            .unwrap_err();
        assert_eq!(err.category, Category::Post);
        assert!(matches!(err.kind, LoadErrorKind::FrontMatter { .. }));
        assert!(err.to_string().contains("bad.md"));
    }

    #[test]
    fn test_fs_loader_invalid_date_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        post(dir.path(), "when.md", "sometime soon");

        let err = loader(dir.path())
            .fetch_documents(Category::Post, Sort::asc(SortKey::Date))
            .unwrap_err();
        assert!(matches!(err.kind, LoadErrorKind::InvalidDate { .. }));
    }

    #[test]
    fn test_fs_loader_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let err = loader(&dir.path().join("nope"))
            .fetch_documents(Category::Course, Sort::asc(SortKey::Order))
            .unwrap_err();
        assert_eq!(err.category, Category::Course);
        assert!(matches!(err.kind, LoadErrorKind::PathNotFound(_)));
    }

    #[test]
    fn test_memory_loader_filters_and_sorts() {
        let store = MemoryContentLoader::new(vec![
            Document::new("x", "/x/", Category::Course).with_order_key(OrderKey::Order(2)),
            Document::new("p", "/p/", Category::Post),
            Document::new("y", "/y/", Category::Course).with_order_key(OrderKey::Order(1)),
        ]);

        let docs = store
            .fetch_documents(Category::Course, Sort::asc(SortKey::Order))
            .unwrap();
        assert_eq!(ids(&docs), vec!["y", "x"]);
    }
}
