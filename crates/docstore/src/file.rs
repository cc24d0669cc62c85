//! Directory-backed store
//!
//! Each collection is one file under the root directory:
//! - `<name>.json`: a JSON array of documents
//! - `<name>.jsonl`: one document per line, blank lines ignored
//!
//! When both exist the `.json` file wins.

use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::{is_valid_collection_name, Document, DocumentStore, Result, StoreError};

#[derive(Clone, Copy, Debug)]
enum Format {
    Array,
    Lines,
}

impl Format {
    fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "json" => Some(Format::Array),
            "jsonl" => Some(Format::Lines),
            _ => None,
        }
    }
}

const LOOKUP_ORDER: [(&str, Format); 2] = [("json", Format::Array), ("jsonl", Format::Lines)];

#[derive(Clone, Debug)]
pub struct FileBackedStore {
    root: PathBuf,
}

impl FileBackedStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn ensure_root(&self) -> Result<()> {
        match tokio::fs::metadata(&self.root).await {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(StoreError::Unavailable(format!(
                "{} is not a directory",
                self.root.display()
            ))),
            Err(e) => Err(StoreError::Unavailable(format!(
                "cannot open {}: {e}",
                self.root.display()
            ))),
        }
    }
}

#[async_trait]
impl DocumentStore for FileBackedStore {
    async fn list_collections(&self) -> Result<Vec<String>> {
        self.ensure_root().await?;

        let mut entries = tokio::fs::read_dir(&self.root)
            .await
            .map_err(|e| StoreError::Unavailable(format!("cannot list {}: {e}", self.root.display())))?;

        let mut names = BTreeSet::new();
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    return Err(StoreError::Unavailable(format!(
                        "cannot list {}: {e}",
                        self.root.display()
                    )))
                }
            };

            let path = entry.path();
            let Some(ext) = path.extension().and_then(|e| e.to_str()) else { continue };
            if Format::from_extension(ext).is_none() {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                warn!(path = %path.display(), "skipping collection file with non UTF-8 name");
                continue;
            };
            if is_valid_collection_name(stem) {
                names.insert(stem.to_string());
            }
        }

        Ok(names.into_iter().collect())
    }

    async fn fetch_collection(&self, name: &str) -> Result<Vec<Document>> {
        self.ensure_root().await?;

        if !is_valid_collection_name(name) {
            debug!(collection = name, "not a collection name, returning nothing");
            return Ok(Vec::new());
        }

        for (ext, format) in LOOKUP_ORDER {
            let path = self.root.join(format!("{name}.{ext}"));
            match tokio::fs::read(&path).await {
                Ok(bytes) => {
                    let collection = name.to_string();
                    // parsing a large collection is CPU-bound
                    return tokio::task::spawn_blocking(move || parse(&collection, format, &bytes))
                        .await
                        .map_err(|e| StoreError::Task(e.to_string()))?;
                }
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => {
                    return Err(StoreError::Io {
                        collection: name.to_string(),
                        source: e,
                    })
                }
            }
        }

        debug!(collection = name, "unknown collection");
        Ok(Vec::new())
    }
}

fn parse(collection: &str, format: Format, bytes: &[u8]) -> Result<Vec<Document>> {
    let corrupt = |message: String| StoreError::Corrupt {
        collection: collection.to_string(),
        message,
    };

    match format {
        Format::Array => serde_json::from_slice(bytes).map_err(|e| corrupt(e.to_string())),
        Format::Lines => {
            let text = std::str::from_utf8(bytes).map_err(|e| corrupt(e.to_string()))?;
            let mut docs = Vec::new();
            for (i, line) in text.lines().enumerate() {
                if line.trim().is_empty() {
                    continue;
                }
                let doc = serde_json::from_str(line)
                    .map_err(|e| corrupt(format!("line {}: {e}", i + 1)))?;
                docs.push(doc);
            }
            Ok(docs)
        }
    }
}
