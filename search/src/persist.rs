use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::index::Document;

/// On-disk cache: the ordered document list only. Postings are derived
/// state and are rebuilt on load. Field names stay stable across versions;
/// unknown fields are ignored and missing fields default to empty, so old
/// and new files load interchangeably.
#[derive(Deserialize)]
struct CacheFile {
    #[serde(default)]
    docs: Vec<Document>,
}

#[derive(Serialize)]
struct CacheFileRef<'a> {
    docs: &'a [Document],
}

pub(crate) fn to_bytes(docs: &[Document]) -> Result<Vec<u8>> {
    serde_json::to_vec(&CacheFileRef { docs }).context("serialize search cache")
}

pub(crate) fn write_cache(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).with_context(|| format!("write search cache {}", path.display()))
}

pub(crate) fn read_cache(path: &Path) -> Result<Vec<Document>> {
    let bytes =
        fs::read(path).with_context(|| format!("read search cache {}", path.display()))?;
    let cache: CacheFile = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse search cache {}", path.display()))?;
    Ok(cache.docs)
}
