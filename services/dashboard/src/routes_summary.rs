use axum::{extract::State, Json};
use labelstats::StatisticsSummary;
use tracing::info;

use crate::aggregate::fetch_all;
use crate::error::AppError;
use crate::state::SharedState;
use crate::types::AggregateResponse;

/// Statistics over every collection except the excluded ones.
pub async fn get_summary(
    State(state): State<SharedState>,
) -> Result<Json<AggregateResponse>, AppError> {
    let names: Vec<String> = state
        .store
        .list_collections()
        .await?
        .into_iter()
        .filter(|name| !state.is_excluded(name))
        .collect();
    let collection_count = names.len();

    let docs = fetch_all(state.store.clone(), names).await?;
    let document_count = docs.len();

    // one pass over possibly many collections; keep it off the async workers
    let statistics = tokio::task::spawn_blocking(move || StatisticsSummary::from_documents(&docs))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    info!(collections = collection_count, documents = document_count, "aggregate summary built");

    Ok(Json(AggregateResponse {
        collection_count,
        document_count,
        statistics,
    }))
}
