use std::sync::Arc;
use std::time::{Duration, Instant};

use brandpulse_core::{Mention, Outcome};
use brandpulse_db::MentionStore;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

/// One snapshot of the store as served to the dashboard.
#[derive(Debug, Default)]
pub struct Dataset {
    pub mentions: Vec<Mention>,
    /// Modification time of the database file when the snapshot was taken.
    pub last_updated: Option<DateTime<Utc>>,
}

#[derive(Debug)]
struct Entry {
    dataset: Arc<Dataset>,
    loaded_at: Instant,
}

/// Time-bounded cache of the full store contents.
///
/// Failed loads are served as an empty dataset but never cached, so the next
/// request tries the store again.
#[derive(Debug)]
pub struct DatasetCache {
    store: MentionStore,
    ttl: Duration,
    entry: Mutex<Option<Entry>>,
}

impl DatasetCache {
    pub fn new(store: MentionStore, ttl: Duration) -> Self {
        Self {
            store,
            ttl,
            entry: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn store(&self) -> &MentionStore {
        &self.store
    }

    /// Current dataset, reloading from the store when missing or expired.
    pub async fn get(&self) -> Arc<Dataset> {
        let mut entry = self.entry.lock().await;
        if let Some(cached) = entry.as_ref() {
            if cached.loaded_at.elapsed() < self.ttl {
                return Arc::clone(&cached.dataset);
            }
            tracing::debug!("dataset cache expired");
        }

        let (mentions, cacheable) = match self.store.load_all().await {
            Outcome::Success(rows) => (rows, true),
            Outcome::Empty => (Vec::new(), true),
            Outcome::Failed(_) => (Vec::new(), false),
        };
        let dataset = Arc::new(Dataset {
            mentions,
            last_updated: self.store.last_modified(),
        });
        tracing::debug!(rows = dataset.mentions.len(), cacheable, "dataset loaded");

        *entry = cacheable.then(|| Entry {
            dataset: Arc::clone(&dataset),
            loaded_at: Instant::now(),
        });
        dataset
    }

    /// Drop the cached dataset so the next [`Self::get`] reloads it.
    pub async fn invalidate(&self) {
        *self.entry.lock().await = None;
    }
}
