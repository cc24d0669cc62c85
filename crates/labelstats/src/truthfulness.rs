use docstore::Document;
use serde::Serialize;

/// Truthfulness counts. Only scored documents are considered labeled, so an
/// unscored document marked truthful still lands in `unlabeled`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TruthfulnessBreakdown {
    pub truthful: usize,
    pub untruthful: usize,
    pub unlabeled: usize,
    /// Truthful share of labeled documents, 0..=100.
    pub percentage: Option<f64>,
}

impl TruthfulnessBreakdown {
    pub fn labeled(&self) -> usize {
        self.truthful + self.untruthful
    }
}

pub fn truthfulness(docs: &[Document]) -> TruthfulnessBreakdown {
    let labeled = docs.iter().filter(|d| d.is_labeled()).count();
    let truthful = docs
        .iter()
        .filter(|d| d.is_labeled() && d.is_truthful())
        .count();

    let percentage = (labeled > 0).then(|| truthful as f64 / labeled as f64 * 100.0);

    TruthfulnessBreakdown {
        truthful,
        untruthful: labeled - truthful,
        unlabeled: docs.len() - labeled,
        percentage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::docs;
    use serde_json::json;

    #[test]
    fn test_unscored_documents_leave_the_denominator() {
        let t = truthfulness(&docs(json!([
            {"score": 1, "truthfulness": true},
            {"truthfulness": true}
        ])));
        assert_eq!(t.truthful, 1);
        assert_eq!(t.labeled(), 1);
        assert_eq!(t.unlabeled, 1);
        assert_eq!(t.percentage, Some(100.0));
    }

    #[test]
    fn test_false_and_missing_are_untruthful() {
        let t = truthfulness(&docs(json!([
            {"score": 10, "truthfulness": false},
            {"score": 20},
            {"score": 30, "truthfulness": true},
            {"score": 40, "truthfulness": true}
        ])));
        assert_eq!(t, TruthfulnessBreakdown { truthful: 2, untruthful: 2, unlabeled: 0, percentage: Some(50.0) });
    }

    #[test]
    fn test_nothing_labeled_has_no_percentage() {
        let t = truthfulness(&docs(json!([{"truthfulness": true}, {}])));
        assert_eq!(t.percentage, None);
        assert_eq!(t.unlabeled, 2);
        assert_eq!(truthfulness(&[]).percentage, None);
    }
}
