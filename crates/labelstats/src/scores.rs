use docstore::Document;
use serde::Serialize;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreAggregate {
    pub labeled_count: usize,
    pub average_score: Option<f64>,
    pub std_dev: Option<f64>,
    pub median: Option<f64>,
    pub min_score: Option<f64>,
    pub max_score: Option<f64>,
    /// One entry per scored document, in input order.
    pub z_scores: Vec<f64>,
}

pub fn score_aggregate(docs: &[Document]) -> ScoreAggregate {
    let scores: Vec<f64> = docs.iter().filter_map(Document::score).collect();

    ScoreAggregate {
        labeled_count: scores.len(),
        average_score: mean(&scores),
        std_dev: population_std_dev(&scores),
        median: median(&scores),
        min_score: scores.iter().copied().reduce(f64::min),
        max_score: scores.iter().copied().reduce(f64::max),
        z_scores: z_scores(&scores),
    }
}

/// `None` for no values, or when the sum overflows.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let avg = values.iter().sum::<f64>() / values.len() as f64;
    avg.is_finite().then_some(avg)
}

/// Population standard deviation (divides by n, not n - 1).
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    let avg = mean(values)?;
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
    variance.is_finite().then(|| variance.sqrt())
}

/// `(v - mean) / std_dev` per value. When every value is the same the
/// deviation is zero and each z-score is reported as `0.0`.
pub fn z_scores(values: &[f64]) -> Vec<f64> {
    let (Some(avg), Some(sd)) = (mean(values), population_std_dev(values)) else {
        return Vec::new();
    };
    if sd == 0.0 {
        return vec![0.0; values.len()];
    }
    values.iter().map(|v| (v - avg) / sd).collect()
}

/// Element at index `n / 2` of the sorted values.
///
/// For an even count this is the upper of the two middle values, not their
/// mean: `[10, 20, 30, 40]` gives 30. Dashboards built on this number rely
/// on that rule.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    Some(sorted[sorted.len() / 2])
}
