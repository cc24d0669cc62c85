use docstore::Document;
use serde::Serialize;

pub const BUCKET_LABELS: [&str; 6] = ["0-20", "21-40", "41-60", "61-80", "81-100", "Unlabeled"];

const UNLABELED: usize = 5;

/// Score counts over fixed buckets. The last bucket holds unscored
/// documents, so the counts always add up to the document count.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoreHistogram {
    pub labels: [&'static str; 6],
    pub counts: [usize; 6],
}

impl Default for ScoreHistogram {
    fn default() -> Self {
        Self { labels: BUCKET_LABELS, counts: [0; 6] }
    }
}

impl ScoreHistogram {
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn unlabeled(&self) -> usize {
        self.counts[UNLABELED]
    }

    pub fn buckets(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        self.labels.iter().copied().zip(self.counts.iter().copied())
    }
}

/// Upper bounds are inclusive: 20 is in `0-20`, 20.5 in `21-40`.
fn bucket_for(score: f64) -> usize {
    if score <= 20.0 {
        0
    } else if score <= 40.0 {
        1
    } else if score <= 60.0 {
        2
    } else if score <= 80.0 {
        3
    } else {
        4
    }
}

pub fn histogram(docs: &[Document]) -> ScoreHistogram {
    let mut hist = ScoreHistogram::default();
    for doc in docs {
        let slot = doc.score().map_or(UNLABELED, bucket_for);
        hist.counts[slot] += 1;
    }
    hist
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterPoint {
    /// Length of `resume_text` in characters.
    pub text_length: usize,
    pub score: f64,
}

/// Score against resume length, for documents carrying both.
pub fn scatter_pairs(docs: &[Document]) -> Vec<ScatterPoint> {
    docs.iter()
        .filter_map(|doc| {
            let score = doc.score()?;
            let text = doc.resume_text()?;
            Some(ScatterPoint { text_length: text.chars().count(), score })
        })
        .collect()
}
