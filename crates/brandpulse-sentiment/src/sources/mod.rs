//! Mention sources and the per-pair fetch loop.

mod reddit;
mod reddit_helpers;

pub use reddit::RedditClient;

use std::time::Duration;

use brandpulse_core::{Mention, Outcome, TrackingConfig};
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::SentimentError;
use crate::types::{FetchReport, PairOutcome};

/// A searchable post source.
#[allow(async_fn_in_trait)]
pub trait SearchApi {
    /// Up to `limit` newest posts in `subreddit` matching `brand`.
    async fn search(
        &self,
        subreddit: &str,
        brand: &str,
        limit: u32,
    ) -> Result<Vec<Mention>, SentimentError>;
}

/// Stand-in source for when the real client could not be built.
///
/// Every search fails with the stored reason, so each pair is reported as
/// failed instead of the run aborting.
#[derive(Debug, Clone)]
pub struct UnavailableSource {
    reason: String,
}

impl UnavailableSource {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl SearchApi for UnavailableSource {
    async fn search(
        &self,
        _subreddit: &str,
        _brand: &str,
        _limit: u32,
    ) -> Result<Vec<Mention>, SentimentError> {
        Err(SentimentError::Reddit(self.reason.clone()))
    }
}

fn start_progress(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    let style = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Search every (subreddit, brand) pair once, subreddits outermost.
///
/// A failed search is logged, recorded as [`Outcome::Failed`] for its pair
/// and contributes no mentions; the loop always visits every pair.
pub async fn fetch_mentions<A: SearchApi>(api: &A, tracking: &TrackingConfig) -> FetchReport {
    let mut report = FetchReport::default();
    let pb = start_progress(tracking.pair_count());

    for subreddit in &tracking.subreddits {
        for brand in &tracking.brands {
            pb.set_message(format!("r/{subreddit} '{brand}'"));

            let outcome = match api.search(subreddit, brand, tracking.limit_per_pair).await {
                Ok(found) if found.is_empty() => Outcome::Empty,
                Ok(found) => {
                    let count = found.len();
                    report.mentions.extend(found);
                    Outcome::Success(count)
                }
                Err(e) => {
                    tracing::warn!(
                        subreddit = %subreddit,
                        brand = %brand,
                        error = %e,
                        "search failed; skipping pair"
                    );
                    Outcome::Failed(e.to_string())
                }
            };

            report.pairs.push(PairOutcome {
                subreddit: subreddit.clone(),
                brand: brand.clone(),
                outcome,
            });
            pb.inc(1);
        }
    }

    pb.finish_and_clear();
    tracing::info!(
        mentions = report.mentions.len(),
        pairs = report.pairs.len(),
        failed = report.failed_pairs().count(),
        "fetch complete"
    );
    report
}
