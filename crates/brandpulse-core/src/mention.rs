use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Scores at or above this value are labelled [`SentimentLabel::Positive`].
pub const POSITIVE_THRESHOLD: f64 = 0.05;
/// Scores at or below this value are labelled [`SentimentLabel::Negative`].
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

/// Author value stored for deleted or missing accounts.
pub const MISSING_AUTHOR: &str = "None";

/// Three-way sentiment bucket derived from a compound score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// All labels in display order.
    pub const ALL: [SentimentLabel; 3] = [
        SentimentLabel::Positive,
        SentimentLabel::Neutral,
        SentimentLabel::Negative,
    ];

    /// Bucket a compound score using the fixed thresholds.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= POSITIVE_THRESHOLD {
            SentimentLabel::Positive
        } else if score <= NEGATIVE_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Negative => "Negative",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sentiment label: {0}")]
pub struct ParseLabelError(pub String);

impl std::str::FromStr for SentimentLabel {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(SentimentLabel::Positive),
            "neutral" => Ok(SentimentLabel::Neutral),
            "negative" => Ok(SentimentLabel::Negative),
            _ => Err(ParseLabelError(s.to_string())),
        }
    }
}

/// One post referencing one tracked brand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mention {
    /// Source-assigned post id. Dedup key for the store.
    pub id: String,
    pub brand: String,
    /// Title and body joined by a single space.
    pub text: String,
    pub subreddit: String,
    pub author: String,
    pub created_utc: DateTime<Utc>,
    /// Compound polarity in `[-1.0, 1.0]`. `0.0` until scored.
    pub sentiment_score: f64,
    pub sentiment_label: SentimentLabel,
    pub url: String,
}

impl Mention {
    /// Build an unscored mention carrying the placeholder sentiment.
    #[must_use]
    pub fn unscored(
        id: impl Into<String>,
        brand: impl Into<String>,
        text: impl Into<String>,
        subreddit: impl Into<String>,
        author: impl Into<String>,
        created_utc: DateTime<Utc>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            brand: brand.into(),
            text: text.into(),
            subreddit: subreddit.into(),
            author: author.into(),
            created_utc,
            sentiment_score: 0.0,
            sentiment_label: SentimentLabel::Neutral,
            url: url.into(),
        }
    }

    /// Set the score and the label derived from it.
    pub fn apply_score(&mut self, score: f64) {
        self.sentiment_score = score;
        self.sentiment_label = SentimentLabel::from_score(score);
    }

    /// Calendar date (UTC) of `created_utc`.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.created_utc.date_naive()
    }
}

/// Convert an instant to fractional epoch seconds as stored on disk.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn epoch_seconds(instant: DateTime<Utc>) -> f64 {
    instant.timestamp_micros() as f64 / 1_000_000.0
}

/// Convert stored epoch seconds back to an instant, at microsecond precision.
///
/// Returns `None` for non-finite or out-of-range values.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn from_epoch_seconds(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    let micros = (seconds * 1_000_000.0).round();
    if micros.abs() > 9.0e18 {
        return None;
    }
    DateTime::from_timestamp_micros(micros as i64)
}
