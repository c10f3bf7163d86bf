//! Update pipeline: load, fetch, dedup, score, persist.

use brandpulse_core::{Outcome, TrackingConfig};
use brandpulse_db::MentionStore;

use crate::error::PipelineError;
use crate::scorer::score_mentions;
use crate::sources::{fetch_mentions, SearchApi};
use crate::types::PairOutcome;

const STEPS: usize = 5;

/// Why a run ended without writing anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoNewDataReason {
    /// The fetch returned no mentions at all.
    EmptyFetch,
    /// Every fetched mention was already stored.
    AlreadySeen,
}

/// How an update run finished.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    NoNewData {
        reason: NoNewDataReason,
        failed_pairs: Vec<PairOutcome>,
    },
    Completed {
        appended: usize,
        failed_pairs: Vec<PairOutcome>,
    },
}

impl PipelineOutcome {
    /// Pairs whose search failed during this run.
    #[must_use]
    pub fn failed_pairs(&self) -> &[PairOutcome] {
        match self {
            PipelineOutcome::NoNewData { failed_pairs, .. }
            | PipelineOutcome::Completed { failed_pairs, .. } => failed_pairs,
        }
    }
}

/// Run one update against `store` with mentions from `api`.
///
/// 1. Load stored ids (a failed load counts as an empty store).
/// 2. Fetch every (subreddit, brand) pair in `tracking`.
/// 3. Drop mentions whose id is already stored. Dedup is by id alone, so the
///    first brand a post was stored under wins.
/// 4. Score the remainder.
/// 5. Append them to the store.
///
/// # Errors
///
/// Returns [`PipelineError::Persist`] if the final append fails. Fetch and
/// load failures are logged and absorbed.
pub async fn run_update_pipeline<A: SearchApi>(
    store: &MentionStore,
    api: &A,
    tracking: &TrackingConfig,
) -> Result<PipelineOutcome, PipelineError> {
    tracing::info!("[Step 1/{STEPS}] loading existing mentions");
    let seen = store.existing_ids().await;
    tracing::info!(existing = seen.len(), "existing mention ids loaded");

    tracing::info!(
        pairs = tracking.pair_count(),
        "[Step 2/{STEPS}] fetching latest mentions"
    );
    let report = fetch_mentions(api, tracking).await;
    let failed_pairs: Vec<PairOutcome> = report.failed_pairs().cloned().collect();

    if report.mentions.is_empty() {
        tracing::info!("no mentions fetched; nothing to update");
        return Ok(PipelineOutcome::NoNewData {
            reason: NoNewDataReason::EmptyFetch,
            failed_pairs,
        });
    }

    tracing::info!("[Step 3/{STEPS}] filtering already-stored mentions");
    let fetched = report.mentions.len();
    let fresh: Vec<_> = report
        .mentions
        .into_iter()
        .filter(|m| !seen.contains(&m.id))
        .collect();
    tracing::info!(fetched, new = fresh.len(), "dedup complete");

    if fresh.is_empty() {
        tracing::info!("no new mentions found");
        return Ok(PipelineOutcome::NoNewData {
            reason: NoNewDataReason::AlreadySeen,
            failed_pairs,
        });
    }

    tracing::info!(count = fresh.len(), "[Step 4/{STEPS}] scoring sentiment");
    let scored = score_mentions(fresh);

    tracing::info!("[Step 5/{STEPS}] saving to database");
    let attempted = scored.len();
    let appended = match store.append(&scored).await {
        Outcome::Success(n) => n,
        Outcome::Empty => 0,
        Outcome::Failed(reason) => return Err(PipelineError::Persist { attempted, reason }),
    };

    tracing::info!(appended, "update complete");
    Ok(PipelineOutcome::Completed {
        appended,
        failed_pairs,
    })
}
