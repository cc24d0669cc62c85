//! Per-scorer averages and rankings
//!
//! Only scored documents with a `didBy` take part. Groups keep the order in
//! which their scorer first appears, and both rankings use a stable sort, so
//! ties stay in first-seen order.

use std::collections::HashMap;

use docstore::Document;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScorerStats {
    pub name: String,
    pub average: f64,
    pub count: usize,
}

/// Highest mean score first.
pub fn rank_scorers(docs: &[Document]) -> Vec<ScorerStats> {
    let mut ranked = group_by_scorer(docs);
    ranked.sort_by(|a, b| b.average.total_cmp(&a.average));
    ranked
}

/// Most scored documents first.
pub fn rank_by_productivity(docs: &[Document]) -> Vec<ScorerStats> {
    let mut ranked = group_by_scorer(docs);
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked
}

fn group_by_scorer(docs: &[Document]) -> Vec<ScorerStats> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<(&str, f64, usize)> = Vec::new();

    for doc in docs {
        let (Some(name), Some(score)) = (doc.did_by(), doc.score()) else { continue };
        let slot = *slots.entry(name).or_insert_with(|| {
            totals.push((name, 0.0, 0));
            totals.len() - 1
        });
        totals[slot].1 += score;
        totals[slot].2 += 1;
    }

    totals
        .into_iter()
        .map(|(name, sum, count)| ScorerStats {
            name: name.to_string(),
            average: sum / count as f64,
            count,
        })
        .collect()
}
