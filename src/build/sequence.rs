//! Previous/next linking for an ordered category.

use super::document::{Document, DocumentId};

/// A document with its neighbors in the category ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencedDocument {
    pub document: Document,
    pub previous: Option<DocumentId>,
    pub next: Option<DocumentId>,
}

/// Link an already ordered list of documents.
///
/// The input order is authoritative and is never changed. The first document
/// has no predecessor, the last has no successor, and an empty input yields
/// an empty sequence.
pub fn sequence(docs: Vec<Document>) -> Vec<SequencedDocument> {
    let ids: Vec<DocumentId> = docs.iter().map(|d| d.id.clone()).collect();

    docs.into_iter()
        .enumerate()
        .map(|(index, document)| SequencedDocument {
            previous: index.checked_sub(1).map(|i| ids[i].clone()),
            next: ids.get(index + 1).cloned(),
            document,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::document::Category;

    fn docs(ids: &[&str]) -> Vec<Document> {
        ids.iter()
            .map(|id| Document::new(*id, format!("/{id}/"), Category::Post))
            .collect()
    }

    fn id(s: &str) -> Option<DocumentId> {
        Some(DocumentId::new(s))
    }

    #[test]
    fn test_sequence_three() {
        let seq = sequence(docs(&["A", "B", "C"]));

        assert_eq!(seq.len(), 3);
        assert_eq!((seq[0].previous.clone(), seq[0].next.clone()), (None, id("B")));
        assert_eq!((seq[1].previous.clone(), seq[1].next.clone()), (id("A"), id("C")));
        assert_eq!((seq[2].previous.clone(), seq[2].next.clone()), (id("B"), None));
    }

    #[test]
    fn test_sequence_empty() {
        assert!(sequence(Vec::new()).is_empty());
    }

    #[test]
    fn test_sequence_single() {
        let seq = sequence(docs(&["only"]));
        assert_eq!(seq.len(), 1);
        assert_eq!(seq[0].previous, None);
        assert_eq!(seq[0].next, None);
    }

    #[test]
    fn test_sequence_preserves_order() {
        let seq = sequence(docs(&["z", "a", "m"]));
        let order: Vec<&str> = seq.iter().map(|s| s.document.id.as_str()).collect();
        assert_eq!(order, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_sequence_round_trip_adjacency() {
        for n in 1..8 {
            let names: Vec<String> = (0..n).map(|i| format!("doc-{i}")).collect();
            let refs: Vec<&str> = names.iter().map(String::as_str).collect();
            let seq = sequence(docs(&refs));

            assert_eq!(seq.first().unwrap().previous, None);
            assert_eq!(seq.last().unwrap().next, None);

            for (i, item) in seq.iter().enumerate() {
                if let Some(next) = &item.next {
                    assert_eq!(&seq[i + 1].document.id, next);
                    assert_eq!(seq[i + 1].previous.as_ref(), Some(&item.document.id));
                }
                if let Some(prev) = &item.previous {
                    assert_eq!(&seq[i - 1].document.id, prev);
                    assert_eq!(seq[i - 1].next.as_ref(), Some(&item.document.id));
                }
            }
        }
    }
}
