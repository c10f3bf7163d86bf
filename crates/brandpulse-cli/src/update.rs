//! The `update` command: one pipeline run against Reddit.

use brandpulse_core::{load_tracking, AppConfig};
use brandpulse_db::MentionStore;
use brandpulse_sentiment::{
    run_update_pipeline, NoNewDataReason, PipelineOutcome, RedditClient, RedditCredentials,
    UnavailableSource,
};

/// Run the update pipeline with the configured tracking and Reddit client.
///
/// If the token exchange fails, the run still goes through with every pair
/// recorded as failed.
///
/// # Errors
///
/// Returns an error if the tracking file or Reddit credentials are invalid,
/// if persisting new mentions fails, or if every search failed.
pub(crate) async fn run_update(config: &AppConfig, store: &MentionStore) -> anyhow::Result<()> {
    let tracking = load_tracking(config.tracking_path.as_deref())?;
    let credentials = RedditCredentials::from_env().map_err(anyhow::Error::msg)?;

    tracing::info!(
        db = %store.path().display(),
        brands = ?tracking.brands,
        subreddits = ?tracking.subreddits,
        "starting update"
    );

    let outcome = match RedditClient::connect(&credentials, config.request_timeout_secs).await {
        Ok(client) => run_update_pipeline(store, &client, &tracking).await?,
        Err(e) => {
            tracing::error!(error = %e, "Reddit authentication failed");
            let source = UnavailableSource::new(e.to_string());
            run_update_pipeline(store, &source, &tracking).await?
        }
    };

    println!("{}", summarize(&outcome));

    let failed = outcome.failed_pairs().len();
    if failed > 0 && failed == tracking.pair_count() {
        anyhow::bail!("all {failed} searches failed; see the log for details");
    }
    Ok(())
}

/// One-line human summary of a finished run.
pub(crate) fn summarize(outcome: &PipelineOutcome) -> String {
    let failed = outcome.failed_pairs().len();
    let suffix = if failed == 0 {
        String::new()
    } else {
        format!(" ({failed} searches failed)")
    };

    match outcome {
        PipelineOutcome::NoNewData {
            reason: NoNewDataReason::EmptyFetch,
            ..
        } => format!("No new mentions found{suffix}."),
        PipelineOutcome::NoNewData {
            reason: NoNewDataReason::AlreadySeen,
            ..
        } => format!("No new mentions found; everything fetched is already stored{suffix}."),
        PipelineOutcome::Completed { appended, .. } => {
            format!("Saved {appended} new mentions{suffix}.")
        }
    }
}
