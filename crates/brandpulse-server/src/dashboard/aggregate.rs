//! KPIs, chart series and top posts over a filtered view.

use std::collections::{BTreeMap, HashMap};

use brandpulse_core::{Mention, SentimentLabel};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::format_large_number;

/// Number of posts returned by [`top_posts`].
pub const TOP_POSTS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub brand: String,
    pub mentions: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelCount {
    pub brand: String,
    pub label: SentimentLabel,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubredditStat {
    pub subreddit: String,
    pub mentions: usize,
    pub average_sentiment: f64,
}

/// Headline numbers and chart series for one filtered view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_mentions: usize,
    pub total_mentions_display: String,
    pub average_sentiment: f64,
    pub positive_pct: f64,
    pub most_active_subreddit: Option<String>,
    pub daily_mentions: Vec<TrendPoint>,
    pub sentiment_by_brand: Vec<LabelCount>,
    pub subreddits: Vec<SubredditStat>,
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0_usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

/// Most frequent subreddit; ties go to the alphabetically first name.
fn most_active(mentions: &[&Mention]) -> Option<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for m in mentions {
        *counts.entry(m.subreddit.as_str()).or_default() += 1;
    }
    // BTreeMap iterates alphabetically and max_by_key keeps the last maximum,
    // so iterate in reverse to keep the first name among equals.
    counts
        .into_iter()
        .rev()
        .max_by_key(|&(_, n)| n)
        .map(|(name, _)| name.to_string())
}

#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn summarize(mentions: &[&Mention]) -> Summary {
    let total = mentions.len();
    let positive = mentions
        .iter()
        .filter(|m| m.sentiment_label == SentimentLabel::Positive)
        .count();
    let positive_pct = if total == 0 {
        0.0
    } else {
        positive as f64 / total as f64 * 100.0
    };

    let mut daily: BTreeMap<(NaiveDate, &str), usize> = BTreeMap::new();
    let mut by_label: BTreeMap<(&str, SentimentLabel), usize> = BTreeMap::new();
    let mut by_sub: HashMap<&str, Vec<f64>> = HashMap::new();
    for m in mentions {
        *daily.entry((m.date(), m.brand.as_str())).or_default() += 1;
        *by_label
            .entry((m.brand.as_str(), m.sentiment_label))
            .or_default() += 1;
        by_sub
            .entry(m.subreddit.as_str())
            .or_default()
            .push(m.sentiment_score);
    }

    let mut subreddits: Vec<SubredditStat> = by_sub
        .into_iter()
        .map(|(name, scores)| SubredditStat {
            subreddit: name.to_string(),
            mentions: scores.len(),
            average_sentiment: mean(scores.into_iter()),
        })
        .collect();
    subreddits.sort_by(|a, b| a.subreddit.cmp(&b.subreddit));

    Summary {
        total_mentions: total,
        total_mentions_display: format_large_number(total),
        average_sentiment: mean(mentions.iter().map(|m| m.sentiment_score)),
        positive_pct,
        most_active_subreddit: most_active(mentions),
        daily_mentions: daily
            .into_iter()
            .map(|((date, brand), n)| TrendPoint {
                date,
                brand: brand.to_string(),
                mentions: n,
            })
            .collect(),
        sentiment_by_brand: by_label
            .into_iter()
            .map(|((brand, label), count)| LabelCount {
                brand: brand.to_string(),
                label,
                count,
            })
            .collect(),
        subreddits,
    }
}

/// Ordering for the top-posts list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopPostSort {
    #[default]
    Highest,
    Lowest,
    Recent,
}

/// Up to [`TOP_POSTS`] mentions in `sort` order; equal keys keep input order.
#[must_use]
pub fn top_posts<'a>(mentions: &[&'a Mention], sort: TopPostSort) -> Vec<&'a Mention> {
    let mut ranked = mentions.to_vec();
    match sort {
        TopPostSort::Highest => {
            ranked.sort_by(|a, b| b.sentiment_score.total_cmp(&a.sentiment_score));
        }
        TopPostSort::Lowest => {
            ranked.sort_by(|a, b| a.sentiment_score.total_cmp(&b.sentiment_score));
        }
        TopPostSort::Recent => ranked.sort_by(|a, b| b.created_utc.cmp(&a.created_utc)),
    }
    ranked.truncate(TOP_POSTS);
    ranked
}
