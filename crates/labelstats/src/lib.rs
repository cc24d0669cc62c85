//! Descriptive statistics over labeled documents
//!
//! Every function here is pure: same documents in, same numbers out.
//! Metrics only look at documents carrying the field they need; a metric
//! with nothing to look at is `None` rather than zero or NaN.

pub mod dates;
pub mod distribution;
pub mod prompt;
pub mod scorers;
pub mod scores;
pub mod summary;
pub mod truthfulness;

pub use dates::{daily_series, date_range, parse_timestamp, DailyPoint, DateRange};
pub use distribution::{histogram, scatter_pairs, ScatterPoint, ScoreHistogram, BUCKET_LABELS};
pub use prompt::{PromptExcerpt, PromptView, NO_PROMPT, PROMPT_EXCERPT_CHARS};
pub use scorers::{rank_by_productivity, rank_scorers, ScorerStats};
pub use scores::{mean, median, population_std_dev, score_aggregate, z_scores, ScoreAggregate};
pub use summary::StatisticsSummary;
pub use truthfulness::{truthfulness, TruthfulnessBreakdown};
