use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::tokenizer::tokenize;

/// Storage position of a document, stable across replacement. Slots join
/// the document store to the postings lists.
pub type Slot = usize;

/// A single corpus entry. `url` is the dedup key; `id` is the
/// caller-supplied stable identifier, typically equal to the URL.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Document {
    /// The text a slot is indexed under.
    pub(crate) fn indexed_text(&self) -> String {
        format!("{} {} {}", self.title, self.content, self.tags.join(" "))
    }

    /// The text scored for term frequency and document length.
    pub(crate) fn scored_text(&self) -> String {
        format!("{} {}", self.content, self.title)
    }
}

/// Term → slots containing that term at least once.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    postings: HashMap<String, Vec<Slot>>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute membership for one slot from its current document text.
    /// Only distinct tokens are recorded; re-indexing an unchanged slot
    /// adds nothing.
    pub fn index_slot(&mut self, slot: Slot, doc: &Document) {
        let mut seen: HashSet<String> = HashSet::new();
        for tok in tokenize(&doc.indexed_text()) {
            if !seen.insert(tok.clone()) {
                continue;
            }
            let list = self.postings.entry(tok).or_default();
            if !list.contains(&slot) {
                list.push(slot);
            }
        }
    }

    /// Drop every association for a slot ahead of re-indexing replaced
    /// content. Terms left with no slots are removed entirely.
    pub fn remove_slot(&mut self, slot: Slot) {
        self.postings.retain(|_, list| {
            list.retain(|&s| s != slot);
            !list.is_empty()
        });
    }

    pub fn postings(&self, term: &str) -> Option<&[Slot]> {
        self.postings.get(term).map(Vec::as_slice)
    }

    /// Iterate the indexed vocabulary.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.postings.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_slot_is_idempotent() {
        let d = Document {
            title: "Physics".into(),
            content: "rigidbody forces".into(),
            ..Default::default()
        };
        let mut index = InvertedIndex::new();
        index.index_slot(0, &d);
        index.index_slot(0, &d);
        assert_eq!(index.postings("rigidbody"), Some(&[0][..]));
    }

    #[test]
    fn tags_contribute_to_membership() {
        let d = Document {
            title: "UI Button".into(),
            content: "Handles click events.".into(),
            tags: vec!["interface".into(), "widgets".into()],
            ..Default::default()
        };
        let mut index = InvertedIndex::new();
        index.index_slot(0, &d);
        assert!(index.postings("widgets").is_some());
    }

    #[test]
    fn remove_slot_clears_membership() {
        let d = Document {
            title: "Doc".into(),
            content: "quaternion rotation".into(),
            ..Default::default()
        };
        let mut index = InvertedIndex::new();
        index.index_slot(0, &d);
        index.remove_slot(0);
        assert!(index.postings("quaternion").is_none());
    }
}
