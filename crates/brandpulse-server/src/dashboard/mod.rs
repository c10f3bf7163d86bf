//! Dataset caching, filtering and aggregation behind the dashboard API.

pub mod aggregate;
pub mod cache;
pub mod filter;

pub use aggregate::{summarize, top_posts, Summary, TopPostSort};
pub use cache::{Dataset, DatasetCache};
pub use filter::{FilterOptions, FilterQuery, MentionFilter};

/// Compact count for display: `950`, `1.5K`, `2.3M`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_large_number(num: usize) -> String {
    if num >= 1_000_000 {
        format!("{:.1}M", num as f64 / 1_000_000.0)
    } else if num >= 1_000 {
        format!("{:.1}K", num as f64 / 1_000.0)
    } else {
        num.to_string()
    }
}
