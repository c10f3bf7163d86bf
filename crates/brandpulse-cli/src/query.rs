//! Read-only store commands.

use std::collections::BTreeMap;

use brandpulse_core::{mentions_to_csv, Mention, Outcome, SentimentLabel};
use brandpulse_db::MentionStore;

const NO_DATA_MESSAGE: &str = "No data found! Please run the data scraper first.";

/// Per-brand label counts, keyed by brand name.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct BrandCounts {
    pub(crate) positive: usize,
    pub(crate) neutral: usize,
    pub(crate) negative: usize,
}

impl BrandCounts {
    pub(crate) fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }
}

pub(crate) fn count_by_brand(mentions: &[Mention]) -> BTreeMap<String, BrandCounts> {
    let mut counts: BTreeMap<String, BrandCounts> = BTreeMap::new();
    for m in mentions {
        let entry = counts.entry(m.brand.clone()).or_default();
        match m.sentiment_label {
            SentimentLabel::Positive => entry.positive += 1,
            SentimentLabel::Neutral => entry.neutral += 1,
            SentimentLabel::Negative => entry.negative += 1,
        }
    }
    counts
}

async fn load_rows(store: &MentionStore) -> anyhow::Result<Vec<Mention>> {
    match store.load_all().await {
        Outcome::Success(rows) => Ok(rows),
        Outcome::Empty => Ok(Vec::new()),
        Outcome::Failed(reason) => {
            anyhow::bail!("failed to read {}: {reason}", store.path().display())
        }
    }
}

/// Print stored mention counts per brand and label.
///
/// # Errors
///
/// Returns an error if the store exists but cannot be read.
pub(crate) async fn run_status(store: &MentionStore) -> anyhow::Result<()> {
    let rows = load_rows(store).await?;
    if rows.is_empty() {
        println!("{NO_DATA_MESSAGE}");
        return Ok(());
    }

    if let Some(updated) = store.last_modified() {
        println!("Data last updated: {}", updated.format("%b %d, %Y %H:%M"));
    }

    println!(
        "{:<20}{:>10}{:>10}{:>10}{:>10}",
        "BRAND", "POSITIVE", "NEUTRAL", "NEGATIVE", "TOTAL"
    );
    for (brand, c) in &count_by_brand(&rows) {
        println!(
            "{:<20}{:>10}{:>10}{:>10}{:>10}",
            brand,
            c.positive,
            c.neutral,
            c.negative,
            c.total()
        );
    }
    println!("{} mentions stored", rows.len());
    Ok(())
}

/// Write every stored mention to stdout as CSV.
///
/// # Errors
///
/// Returns an error if the store exists but cannot be read.
pub(crate) async fn run_export(store: &MentionStore) -> anyhow::Result<()> {
    let rows = load_rows(store).await?;
    if rows.is_empty() {
        tracing::warn!("{NO_DATA_MESSAGE}");
    }
    print!("{}", mentions_to_csv(&rows));
    Ok(())
}
