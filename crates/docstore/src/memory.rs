//! In-memory store (for tests and demos)

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{Document, DocumentStore, Result, StoreError};

#[derive(Clone, Default)]
pub struct InMemoryStore {
    collections: Arc<RwLock<BTreeMap<String, Vec<Document>>>>,
    offline: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose connection never came up; every call fails with
    /// [`StoreError::Unavailable`].
    pub fn offline() -> Self {
        Self { offline: true, ..Self::default() }
    }

    pub fn from_collections<I, S>(collections: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<Document>)>,
        S: Into<String>,
    {
        let map = collections
            .into_iter()
            .map(|(name, docs)| (name.into(), docs))
            .collect();
        Self {
            collections: Arc::new(RwLock::new(map)),
            offline: false,
        }
    }

    /// Replaces the collection if it already exists.
    pub async fn insert_collection(&self, name: impl Into<String>, docs: Vec<Document>) {
        self.collections.write().await.insert(name.into(), docs);
    }

    fn check_online(&self) -> Result<()> {
        if self.offline {
            return Err(StoreError::Unavailable("in-memory store is offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn list_collections(&self) -> Result<Vec<String>> {
        self.check_online()?;
        Ok(self.collections.read().await.keys().cloned().collect())
    }

    async fn fetch_collection(&self, name: &str) -> Result<Vec<Document>> {
        self.check_online()?;
        Ok(self
            .collections
            .read()
            .await
            .get(name)
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(score: f64) -> Document {
        serde_json::from_value(serde_json::json!({ "score": score })).unwrap()
    }

    #[tokio::test]
    async fn test_empty_store_lists_nothing() {
        let store = InMemoryStore::new();
        assert!(store.list_collections().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_known_and_unknown() {
        let store = InMemoryStore::from_collections([("july-01-resumes", vec![scored(10.0), scored(20.0)])]);

        let docs = store.fetch_collection("july-01-resumes").await.unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[1].score(), Some(20.0));

        assert!(store.fetch_collection("nope").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_then_list_in_name_order() {
        let store = InMemoryStore::new();
        store.insert_collection("b", vec![]).await;
        store.insert_collection("a", vec![scored(1.0)]).await;
        assert_eq!(store.list_collections().await.unwrap(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_offline_store_is_unavailable() {
        let store = InMemoryStore::offline();
        assert!(matches!(store.list_collections().await, Err(StoreError::Unavailable(_))));
        assert!(matches!(store.fetch_collection("a").await, Err(StoreError::Unavailable(_))));
    }
}
