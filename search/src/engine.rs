use parking_lot::RwLock;
use serde::Serialize;
use std::cmp::Ordering;
use std::path::Path;

use crate::excerpt;
use crate::index::{Document, InvertedIndex, Slot};
use crate::persist;
use crate::score::score_query;
use crate::tokenizer::tokenize;

const EXCERPT_LEN: usize = 300;

/// A ranked search hit.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub excerpt: String,
    /// Normalized so the top hit of the query scores 1.0.
    pub score: f64,
}

#[derive(Default)]
struct State {
    docs: Vec<Document>,
    index: InvertedIndex,
}

impl State {
    fn upsert(&mut self, doc: Document) {
        if let Some(slot) = self.docs.iter().position(|d| d.url == doc.url) {
            self.docs[slot] = doc;
            // Full rebuild of the slot's postings: terms the replacement
            // no longer contains must stop matching.
            self.index.remove_slot(slot);
            self.index.index_slot(slot, &self.docs[slot]);
        } else {
            let slot = self.docs.len();
            self.docs.push(doc);
            self.index.index_slot(slot, &self.docs[slot]);
        }
    }
}

/// In-memory lexical search engine: the document store and inverted index
/// behind a single reader/writer lock. Callers share one instance by
/// reference for the life of the process.
pub struct Engine {
    state: RwLock<State>,
}

impl Engine {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State::default()),
        }
    }

    pub fn doc_count(&self) -> usize {
        self.state.read().docs.len()
    }

    /// Insert a document, replacing any existing entry with the same URL in
    /// place at its slot.
    pub fn upsert(&self, doc: Document) {
        self.state.write().upsert(doc);
    }

    /// Batch form of `upsert`; one write-lock acquisition for the batch.
    pub fn upsert_many(&self, docs: Vec<Document>) {
        let mut state = self.state.write();
        for doc in docs {
            state.upsert(doc);
        }
    }

    /// Rank the corpus against a free-text query and return the top `top_k`
    /// hits with excerpts. An empty query or corpus yields an empty list.
    pub fn search(&self, query: &str, top_k: usize) -> Vec<SearchHit> {
        let state = self.state.read();
        if state.docs.is_empty() {
            return Vec::new();
        }
        let tokens = tokenize(query);
        if tokens.is_empty() {
            return Vec::new();
        }

        let scores = score_query(&tokens, &state.docs, &state.index);
        let mut ranked: Vec<(Slot, f64)> = scores
            .into_iter()
            .filter(|&(_, score)| score > 0.0)
            .collect();
        // Score descending; slot order breaks ties.
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });

        let max_score = ranked.first().map(|&(_, s)| s).unwrap_or(0.0);
        ranked
            .into_iter()
            .take(top_k)
            .map(|(slot, score)| {
                let doc = &state.docs[slot];
                SearchHit {
                    title: doc.title.clone(),
                    url: doc.url.clone(),
                    excerpt: excerpt::extract(&doc.content, &tokens, EXCERPT_LEN),
                    score: score / max_score,
                }
            })
            .collect()
    }

    /// Serialize the document list to the cache file. The bytes are built
    /// under the read lock; the file write happens after it is released.
    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let (bytes, num_docs) = {
            let state = self.state.read();
            (persist::to_bytes(&state.docs)?, state.docs.len())
        };
        persist::write_cache(path, &bytes)?;
        tracing::debug!(num_docs, path = %path.display(), "search cache saved");
        Ok(())
    }

    /// Replay a saved document list through upsert, rebuilding the index.
    /// The whole file is read and parsed before any state is touched; a
    /// missing or corrupt file leaves the engine unchanged.
    pub fn load(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let docs = persist::read_cache(path)?;
        let mut state = self.state.write();
        for doc in docs {
            state.upsert(doc);
        }
        tracing::info!(num_docs = state.docs.len(), path = %path.display(), "search cache loaded");
        Ok(())
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
