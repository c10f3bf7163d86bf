//! Reddit brand-mention collection and sentiment scoring.
//!
//! Searches each tracked subreddit for each tracked brand, scores new posts
//! with a lexicon-and-rule polarity scorer, and appends them to the mention
//! store.

pub mod error;
pub mod pipeline;
pub mod scorer;
pub mod sources;
pub mod types;

mod lexicon;

pub use error::{PipelineError, SentimentError};
pub use pipeline::{run_update_pipeline, NoNewDataReason, PipelineOutcome};
pub use scorer::{polarity, score_mentions};
pub use sources::{fetch_mentions, RedditClient, SearchApi, UnavailableSource};
pub use types::{FetchReport, PairOutcome, RedditCredentials};
