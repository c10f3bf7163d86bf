//! End-to-end update runs against a scratch store and an in-memory source.

use std::collections::HashMap;

use brandpulse_core::{Mention, Outcome, SentimentLabel, TrackingConfig};
use brandpulse_db::MentionStore;
use brandpulse_sentiment::{
    run_update_pipeline, NoNewDataReason, PipelineError, PipelineOutcome, SearchApi,
    SentimentError, UnavailableSource,
};
use chrono::{TimeZone, Utc};
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{ConnectOptions, Connection};

/// Serves canned results per (subreddit, brand); unknown pairs return nothing.
#[derive(Default)]
struct FakeSource {
    results: HashMap<(String, String), Result<Vec<Mention>, String>>,
}

impl FakeSource {
    fn with(mut self, subreddit: &str, brand: &str, ids_and_texts: &[(&str, &str)]) -> Self {
        let mentions = ids_and_texts
            .iter()
            .map(|(id, text)| mention(id, brand, subreddit, text))
            .collect();
        self.results
            .insert((subreddit.to_string(), brand.to_string()), Ok(mentions));
        self
    }

    fn failing(mut self, subreddit: &str, brand: &str) -> Self {
        self.results.insert(
            (subreddit.to_string(), brand.to_string()),
            Err("rate limited".to_string()),
        );
        self
    }
}

impl SearchApi for FakeSource {
    async fn search(
        &self,
        subreddit: &str,
        brand: &str,
        _limit: u32,
    ) -> Result<Vec<Mention>, SentimentError> {
        match self.results.get(&(subreddit.to_string(), brand.to_string())) {
            Some(Ok(mentions)) => Ok(mentions.clone()),
            Some(Err(reason)) => Err(SentimentError::Reddit(reason.clone())),
            None => Ok(Vec::new()),
        }
    }
}

fn mention(id: &str, brand: &str, subreddit: &str, text: &str) -> Mention {
    let created = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    Mention::unscored(
        id,
        brand,
        text,
        subreddit,
        "tester",
        created,
        format!("https://reddit.com/r/{subreddit}/comments/{id}/"),
    )
}

fn tracking() -> TrackingConfig {
    TrackingConfig {
        brands: vec!["NVIDIA".to_string(), "AMD".to_string()],
        subreddits: vec!["hardware".to_string(), "gaming".to_string()],
        limit_per_pair: 50,
    }
}

fn scratch_store() -> (tempfile::TempDir, MentionStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = MentionStore::new(dir.path().join("data").join("mentions.db"));
    (dir, store)
}

#[tokio::test]
async fn only_unseen_mentions_are_scored_and_appended() {
    let (_dir, store) = scratch_store();
    let seeded = mention("A", "NVIDIA", "hardware", "old news");
    assert_eq!(store.append(&[seeded]).await, Outcome::Success(1));

    let source = FakeSource::default().with(
        "hardware",
        "NVIDIA",
        &[("A", "old news"), ("B", "amazing product, love it"), ("C", "terrible, broke immediately")],
    );

    let outcome = run_update_pipeline(&store, &source, &tracking()).await.unwrap();
    assert_eq!(
        outcome,
        PipelineOutcome::Completed {
            appended: 2,
            failed_pairs: Vec::new()
        }
    );

    let rows = store.load_all().await.into_value();
    let ids: Vec<&str> = rows.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["A", "B", "C"]);
    assert_eq!(rows[1].sentiment_label, SentimentLabel::Positive);
    assert_eq!(rows[2].sentiment_label, SentimentLabel::Negative);
}

#[tokio::test]
async fn second_run_with_same_results_adds_nothing() {
    let (_dir, store) = scratch_store();
    let source = FakeSource::default()
        .with("hardware", "AMD", &[("x1", "good value")])
        .with("gaming", "NVIDIA", &[("x2", "frame drops everywhere")]);

    let first = run_update_pipeline(&store, &source, &tracking()).await.unwrap();
    assert!(matches!(first, PipelineOutcome::Completed { appended: 2, .. }));

    let second = run_update_pipeline(&store, &source, &tracking()).await.unwrap();
    assert_eq!(
        second,
        PipelineOutcome::NoNewData {
            reason: NoNewDataReason::AlreadySeen,
            failed_pairs: Vec::new()
        }
    );
    assert_eq!(store.count().await, Outcome::Success(2));
}

#[tokio::test]
async fn empty_fetch_leaves_store_untouched() {
    let (_dir, store) = scratch_store();

    let outcome = run_update_pipeline(&store, &FakeSource::default(), &tracking())
        .await
        .unwrap();

    assert!(matches!(
        outcome,
        PipelineOutcome::NoNewData {
            reason: NoNewDataReason::EmptyFetch,
            ..
        }
    ));
    assert!(!store.path().exists());
}

#[tokio::test]
async fn failed_pair_contributes_no_rows_but_others_persist() {
    let (_dir, store) = scratch_store();
    let source = FakeSource::default()
        .failing("hardware", "NVIDIA")
        .with("gaming", "AMD", &[("g1", "great card")]);

    let outcome = run_update_pipeline(&store, &source, &tracking()).await.unwrap();

    let (appended, failed_pairs) = match outcome {
        PipelineOutcome::Completed {
            appended,
            failed_pairs,
        } => (appended, failed_pairs),
        other => panic!("expected a completed run, got {other:?}"),
    };
    assert_eq!(appended, 1);
    assert_eq!(failed_pairs.len(), 1);
    assert_eq!(failed_pairs[0].subreddit, "hardware");
    assert_eq!(failed_pairs[0].brand, "NVIDIA");
}

#[tokio::test]
async fn unavailable_source_fails_every_pair() {
    let (_dir, store) = scratch_store();
    let source = UnavailableSource::new("token exchange failed");

    let outcome = run_update_pipeline(&store, &source, &tracking()).await.unwrap();

    assert_eq!(outcome.failed_pairs().len(), tracking().pair_count());
    assert!(matches!(
        outcome,
        PipelineOutcome::NoNewData {
            reason: NoNewDataReason::EmptyFetch,
            ..
        }
    ));
}

#[tokio::test]
async fn first_seen_brand_wins_across_runs() {
    let (_dir, store) = scratch_store();
    let nvidia_only = FakeSource::default().with("hardware", "NVIDIA", &[("dup", "new gpus")]);
    run_update_pipeline(&store, &nvidia_only, &tracking()).await.unwrap();

    let amd_too = FakeSource::default().with("hardware", "AMD", &[("dup", "new gpus")]);
    let outcome = run_update_pipeline(&store, &amd_too, &tracking()).await.unwrap();

    assert!(matches!(
        outcome,
        PipelineOutcome::NoNewData {
            reason: NoNewDataReason::AlreadySeen,
            ..
        }
    ));
    let rows = store.load_all().await.into_value();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].brand, "NVIDIA");
}

#[tokio::test]
async fn persist_failure_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    // A directory where the database file should be cannot be opened as SQLite.
    let blocked = dir.path().join("mentions.db");
    std::fs::create_dir(&blocked).unwrap();
    let store = MentionStore::new(&blocked);
    let source = FakeSource::default().with("gaming", "NVIDIA", &[("z1", "love it")]);

    let err = run_update_pipeline(&store, &source, &tracking()).await.unwrap_err();

    assert!(matches!(err, PipelineError::Persist { attempted: 1, .. }));
}

#[tokio::test]
async fn row_with_null_author_still_blocks_duplicates() {
    let (_dir, store) = scratch_store();
    store.append(&[mention("A", "NVIDIA", "hardware", "old news")]).await;

    let mut conn = SqliteConnectOptions::new()
        .filename(store.path())
        .connect()
        .await
        .unwrap();
    sqlx::query(
        "INSERT INTO mentions VALUES \
         ('Z', 'AMD', 'legacy', 'gaming', NULL, 1714000000.0, 0.0, 'Neutral', 'https://reddit.com/z/')",
    )
    .execute(&mut conn)
    .await
    .unwrap();
    conn.close().await.unwrap();

    let source =
        FakeSource::default().with("hardware", "NVIDIA", &[("A", "old news"), ("B", "love it")]);
    let outcome = run_update_pipeline(&store, &source, &tracking()).await.unwrap();

    assert!(matches!(outcome, PipelineOutcome::Completed { appended: 1, .. }));
    assert_eq!(store.count().await, Outcome::Success(3));
}
