use docstore::Document;
use labelstats::StatisticsSummary;
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
pub struct CollectionName {
    pub name: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicStatistics {
    /// 0 when nothing in the collection is scored.
    pub average_score: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct CollectionResponse {
    pub data: Vec<Document>,
    pub statistics: BasicStatistics,
}

#[derive(Clone, Debug, Serialize)]
pub struct CollectionSummaryResponse {
    pub collection: String,
    pub statistics: StatisticsSummary,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResponse {
    pub collection_count: usize,
    pub document_count: usize,
    pub statistics: StatisticsSummary,
}
