use std::collections::HashMap;

use crate::index::{Document, InvertedIndex, Slot};
use crate::tokenizer::tokenize;

const K1: f64 = 1.5;
const B: f64 = 0.75;

/// Accumulate BM25-lite scores for a tokenized query across the corpus.
/// Repeated query tokens compound their contribution.
pub(crate) fn score_query(
    tokens: &[String],
    docs: &[Document],
    index: &InvertedIndex,
) -> HashMap<Slot, f64> {
    let mut scores: HashMap<Slot, f64> = HashMap::new();
    let n = docs.len() as f64;
    let avg_len = avg_doc_len(docs);

    for tok in tokens {
        // Exact match
        score_term(tok, docs, index, n, avg_len, 1.0, &mut scores);
        // Prefix match: a partial term like "rigid" surfaces "rigidbody"
        // hits at a reduced weight. Linear scan of the whole vocabulary per
        // query token; a scaling limit beyond the low tens of thousands of
        // documents.
        if tok.chars().count() >= 3 {
            for indexed in index.terms() {
                if indexed != tok.as_str() && indexed.starts_with(tok.as_str()) {
                    score_term(indexed, docs, index, n, avg_len, 0.7, &mut scores);
                }
            }
        }
    }

    // Flat bonus when a query token appears in the title, whether or not
    // the term is indexed.
    for (slot, doc) in docs.iter().enumerate() {
        let title = doc.title.to_lowercase();
        for tok in tokens {
            if title.contains(tok.as_str()) {
                *scores.entry(slot).or_insert(0.0) += 2.0;
            }
        }
    }

    scores
}

fn score_term(
    term: &str,
    docs: &[Document],
    index: &InvertedIndex,
    n: f64,
    avg_len: f64,
    boost: f64,
    scores: &mut HashMap<Slot, f64>,
) {
    let Some(postings) = index.postings(term) else {
        return;
    };
    let df = postings.len() as f64;
    let idf = ((n - df + 0.5) / (df + 0.5) + 1.0).ln();
    for &slot in postings {
        let text = docs[slot].scored_text();
        let doc_len = tokenize(&text).len() as f64;
        let tf = count_occurrences(term, &text) as f64;
        let tf_norm = tf * (K1 + 1.0) / (tf + K1 * (1.0 - B + B * doc_len / avg_len));
        *scores.entry(slot).or_insert(0.0) += idf * tf_norm * boost;
    }
}

/// Mean token count over `content + " " + title`, re-tokenized at query
/// time. An empty corpus reads as 100 to keep the denominator finite.
pub(crate) fn avg_doc_len(docs: &[Document]) -> f64 {
    if docs.is_empty() {
        return 100.0;
    }
    let total: usize = docs
        .iter()
        .map(|d| tokenize(&d.scored_text()).len())
        .sum();
    total as f64 / docs.len() as f64
}

/// Case-insensitive, non-overlapping substring count. Matches inside
/// longer words count too ("2d" in "rigidbody2d").
pub(crate) fn count_occurrences(term: &str, text: &str) -> usize {
    text.to_lowercase().matches(term).count()
}
