use axum::{
    extract::{Path, State},
    Json,
};
use docstore::Document;
use labelstats::{mean, StatisticsSummary};
use tracing::{debug, info};

use crate::error::AppError;
use crate::state::SharedState;
use crate::types::{BasicStatistics, CollectionName, CollectionResponse, CollectionSummaryResponse};

pub async fn list_collections(
    State(state): State<SharedState>,
) -> Result<Json<Vec<CollectionName>>, AppError> {
    let names = state.store.list_collections().await?;
    info!(count = names.len(), "collections listed");

    Ok(Json(names.into_iter().map(|name| CollectionName { name }).collect()))
}

pub async fn get_collection(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> Result<Json<CollectionResponse>, AppError> {
    let data = state.store.fetch_collection(&name).await?;

    let scores: Vec<f64> = data.iter().filter_map(Document::score).collect();
    let average_score = mean(&scores).unwrap_or(0.0);
    debug!(collection = %name, documents = data.len(), scored = scores.len(), "collection fetched");

    Ok(Json(CollectionResponse {
        data,
        statistics: BasicStatistics { average_score },
    }))
}

pub async fn get_collection_summary(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> Result<Json<CollectionSummaryResponse>, AppError> {
    let docs = state.store.fetch_collection(&name).await?;
    let statistics = StatisticsSummary::from_documents(&docs);
    debug!(collection = %name, documents = docs.len(), "collection summarized");

    Ok(Json(CollectionSummaryResponse { collection: name, statistics }))
}
