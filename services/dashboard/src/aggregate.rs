//! Fan-out fetch for the cross-collection view

use std::sync::Arc;

use docstore::{Document, DocumentStore, StoreError};
use tokio::task::JoinSet;

/// Fetches every named collection concurrently and flattens the results.
///
/// Completion order is not preserved. The first failure is returned and the
/// fetches still in flight are aborted when the set is dropped.
pub async fn fetch_all(
    store: Arc<dyn DocumentStore>,
    names: Vec<String>,
) -> Result<Vec<Document>, StoreError> {
    let mut join_set = JoinSet::new();
    for name in names {
        let store = store.clone();
        join_set.spawn(async move { store.fetch_collection(&name).await });
    }

    let mut all = Vec::new();
    while let Some(joined) = join_set.join_next().await {
        let docs = joined.map_err(|e| StoreError::Task(e.to_string()))??;
        all.extend(docs);
    }
    Ok(all)
}
