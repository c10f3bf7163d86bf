use thiserror::Error;

#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Reddit API error: {0}")]
    Reddit(String),

    /// A record is missing a field the pipeline needs (id, title, timestamp...).
    #[error("input shape error: {0}")]
    InputShape(String),
}

/// Fatal errors that end an update run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to persist {attempted} scored mentions: {reason}")]
    Persist { attempted: usize, reason: String },
}
