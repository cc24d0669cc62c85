//! Stats report: one collection, printed to the console
//!
//! Usage: stats-report <store-dir> <collection>
//!
//! Shows:
//! 1. Score summary (average, spread, median, range)
//! 2. Score distribution per bucket
//! 3. Truthfulness counts and shares
//! 4. Scorer ranking
//! 5. Z-score of every scored document

use anyhow::{bail, Context, Result};
use docstore::{DocumentStore, FileBackedStore};
use labelstats::{PromptView, StatisticsSummary};

fn fmt_opt(v: Option<f64>) -> String {
    v.map(|v| format!("{v:.2}")).unwrap_or_else(|| "N/A".to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let [store_dir, collection] = args.as_slice() else {
        bail!("usage: stats-report <store-dir> <collection>");
    };

    let store = FileBackedStore::new(store_dir);
    let docs = store
        .fetch_collection(collection)
        .await
        .with_context(|| format!("Failed to read collection {collection}"))?;
    let s = StatisticsSummary::from_documents(&docs);

    println!("=== Statistics for {collection} ===\n");
    println!("Documents:          {}", s.total_count);
    println!("Labeled:            {} / {}", s.scores.labeled_count, s.total_count);
    println!("Average Score:      {}", fmt_opt(s.scores.average_score));
    println!("Standard Deviation: {}", fmt_opt(s.scores.std_dev));
    println!("Median Score:       {}", fmt_opt(s.scores.median));
    println!("Min / Max:          {} / {}", fmt_opt(s.scores.min_score), fmt_opt(s.scores.max_score));
    match &s.date_range {
        Some(r) => println!("Date Range:         {} - {}", r.start.date_naive(), r.end.date_naive()),
        None => println!("Date Range:         N/A"),
    }
    println!("Prompt:             {}", s.prompt.render(PromptView::Short));

    println!("\n--- Score Distribution ---");
    for (label, count) in s.histogram.buckets() {
        println!("{label:>10}: {count}");
    }

    println!("\n--- Truthfulness ---");
    let t = &s.truthfulness;
    println!("True:       {}", t.truthful);
    println!("False:      {}", t.untruthful);
    println!("Unlabeled:  {}", t.unlabeled);
    println!("True %:     {}", fmt_opt(t.percentage));
    println!("False %:    {}", fmt_opt(t.percentage.map(|p| 100.0 - p)));

    println!("\n--- Scorers ---");
    if s.scorer_ranking.is_empty() {
        println!("N/A");
    }
    for (rank, scorer) in s.scorer_ranking.iter().enumerate() {
        println!("{:>3}. {} (avg {:.2}, {} scored)", rank + 1, scorer.name, scorer.average, scorer.count);
    }

    println!("\n--- Z-Scores ---");
    let scores = docs.iter().filter_map(|d| d.score());
    for (score, z) in scores.zip(&s.scores.z_scores) {
        println!("Score: {score}, Z-Score: {z:.2}");
    }

    Ok(())
}
