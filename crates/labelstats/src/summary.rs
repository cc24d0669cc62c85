use docstore::Document;
use serde::Serialize;

use crate::{
    daily_series, date_range, histogram, rank_by_productivity, rank_scorers, scatter_pairs,
    score_aggregate, truthfulness, DailyPoint, DateRange, PromptExcerpt, ScatterPoint,
    ScoreAggregate, ScoreHistogram, ScorerStats, TruthfulnessBreakdown,
};

/// Everything the dashboard shows for a set of documents. Built fresh on
/// every request and never stored.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSummary {
    pub total_count: usize,
    #[serde(flatten)]
    pub scores: ScoreAggregate,
    pub top_scorer: Option<String>,
    pub scorer_ranking: Vec<ScorerStats>,
    pub productivity: Vec<ScorerStats>,
    pub truthfulness: TruthfulnessBreakdown,
    pub date_range: Option<DateRange>,
    pub histogram: ScoreHistogram,
    pub scatter: Vec<ScatterPoint>,
    pub prompt: PromptExcerpt,
    pub time_series: Vec<DailyPoint>,
}

impl StatisticsSummary {
    pub fn from_documents(docs: &[Document]) -> Self {
        let scorer_ranking = rank_scorers(docs);
        Self {
            total_count: docs.len(),
            scores: score_aggregate(docs),
            top_scorer: scorer_ranking.first().map(|s| s.name.clone()),
            scorer_ranking,
            productivity: rank_by_productivity(docs),
            truthfulness: truthfulness(docs),
            date_range: date_range(docs),
            histogram: histogram(docs),
            scatter: scatter_pairs(docs),
            prompt: PromptExcerpt::from_documents(docs),
            time_series: daily_series(docs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::docs;
    use crate::NO_PROMPT;
    use serde_json::json;

    #[test]
    fn test_empty_input_is_all_absent() {
        let s = StatisticsSummary::from_documents(&[]);
        assert_eq!(s.total_count, 0);
        assert_eq!(s.scores.average_score, None);
        assert_eq!(s.top_scorer, None);
        assert_eq!(s.truthfulness.percentage, None);
        assert_eq!(s.date_range, None);
        assert_eq!(s.histogram.total(), 0);
        assert_eq!(s.prompt.full, NO_PROMPT);
    }

    #[test]
    fn test_composes_every_metric() {
        let input = docs(json!([
            {"didBy": "A", "score": 10, "truthfulness": true, "created_at": "2024-07-01T10:00:00Z",
             "prompt": "Score the resume", "resume_text": "short"},
            {"didBy": "B", "score": 90, "truthfulness": false, "created_at": "2024-07-02T10:00:00Z"},
            {"didBy": "A", "score": 30, "truthfulness": true},
            {"truthfulness": true}
        ]));
        let s = StatisticsSummary::from_documents(&input);

        assert_eq!(s.total_count, 4);
        assert_eq!(s.scores.labeled_count, 3);
        assert!((s.scores.average_score.unwrap() - 130.0 / 3.0).abs() < 1e-9);
        assert_eq!(s.scores.median, Some(30.0));
        assert_eq!(s.top_scorer.as_deref(), Some("B"));
        assert_eq!(s.productivity[0].name, "A");
        assert_eq!(s.truthfulness.truthful, 2);
        assert_eq!(s.truthfulness.unlabeled, 1);
        assert_eq!(s.histogram.total(), 4);
        assert_eq!(s.scatter.len(), 1);
        assert_eq!(s.prompt.full, "Score the resume");
        assert_eq!(s.time_series.len(), 2);
    }

    #[test]
    fn test_serializes_absent_numbers_as_null() {
        let v = serde_json::to_value(StatisticsSummary::from_documents(&docs(json!([{"didBy": "x"}])))).unwrap();
        assert_eq!(v["averageScore"], serde_json::Value::Null);
        assert_eq!(v["stdDev"], serde_json::Value::Null);
        assert_eq!(v["labeledCount"], json!(0));
        assert_eq!(v["totalCount"], json!(1));
        assert_eq!(v["truthfulness"]["percentage"], serde_json::Value::Null);
        assert_eq!(v["histogram"]["counts"], json!([0, 0, 0, 0, 0, 1]));
    }
}
