//! Sidebar-style filtering of the loaded dataset.

use std::collections::BTreeSet;

use brandpulse_core::{Mention, SentimentLabel};
use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Length of the default date window, ending at the newest mention.
const DEFAULT_WINDOW_DAYS: u64 = 30;

/// Filter selections as they arrive on the query string.
///
/// List fields are comma separated. An absent field means "everything"; a
/// present but empty field selects nothing.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct FilterQuery {
    pub brands: Option<String>,
    pub subreddits: Option<String>,
    pub labels: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// Values the dashboard offers as filter choices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOptions {
    pub brands: Vec<String>,
    pub subreddits: Vec<String>,
    pub labels: Vec<SentimentLabel>,
    pub min_date: NaiveDate,
    pub max_date: NaiveDate,
    pub default_start: NaiveDate,
    pub default_end: NaiveDate,
    pub last_updated: Option<DateTime<Utc>>,
    pub total_records: usize,
}

impl FilterOptions {
    /// Choices derived from `mentions`; `None` when there are no rows.
    #[must_use]
    pub fn from_mentions(
        mentions: &[Mention],
        last_updated: Option<DateTime<Utc>>,
    ) -> Option<Self> {
        let min_date = mentions.iter().map(Mention::date).min()?;
        let max_date = mentions.iter().map(Mention::date).max()?;
        let default_start = max_date
            .checked_sub_days(Days::new(DEFAULT_WINDOW_DAYS))
            .map_or(min_date, |start| start.max(min_date));

        let brands: BTreeSet<&str> = mentions.iter().map(|m| m.brand.as_str()).collect();
        let subreddits: BTreeSet<&str> = mentions.iter().map(|m| m.subreddit.as_str()).collect();

        Some(Self {
            brands: brands.into_iter().map(str::to_string).collect(),
            subreddits: subreddits.into_iter().map(str::to_string).collect(),
            labels: SentimentLabel::ALL.to_vec(),
            min_date,
            max_date,
            default_start,
            default_end: max_date,
            last_updated,
            total_records: mentions.len(),
        })
    }
}

/// Conjunction of brand, subreddit, date and label constraints.
#[derive(Debug, Clone, PartialEq)]
pub struct MentionFilter {
    pub brands: BTreeSet<String>,
    pub subreddits: BTreeSet<String>,
    pub labels: BTreeSet<SentimentLabel>,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// A resolved filter plus an optional notice for the user.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFilter {
    pub filter: MentionFilter,
    pub warning: Option<String>,
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn string_set(raw: Option<&str>, all: &[String]) -> BTreeSet<String> {
    match raw {
        Some(list) => split_list(list).map(str::to_string).collect(),
        None => all.iter().cloned().collect(),
    }
}

impl MentionFilter {
    /// Fill unspecified selections from `options`.
    ///
    /// Supplying only one end of the date range falls back to the full range
    /// and attaches a warning.
    ///
    /// # Errors
    ///
    /// Returns a message for an unknown sentiment label or a start date after
    /// the end date.
    pub fn resolve(query: &FilterQuery, options: &FilterOptions) -> Result<ResolvedFilter, String> {
        let labels = match query.labels.as_deref() {
            Some(list) => split_list(list)
                .map(|l| l.parse::<SentimentLabel>().map_err(|e| e.to_string()))
                .collect::<Result<BTreeSet<_>, _>>()?,
            None => options.labels.iter().copied().collect(),
        };

        let (start, end, warning) = match (query.start, query.end) {
            (Some(start), Some(end)) => (start, end, None),
            (None, None) => (options.default_start, options.default_end, None),
            _ => (
                options.min_date,
                options.max_date,
                Some("Please select both start and end dates".to_string()),
            ),
        };
        if start > end {
            return Err(format!("start date {start} is after end date {end}"));
        }

        Ok(ResolvedFilter {
            filter: MentionFilter {
                brands: string_set(query.brands.as_deref(), &options.brands),
                subreddits: string_set(query.subreddits.as_deref(), &options.subreddits),
                labels,
                start,
                end,
            },
            warning,
        })
    }

    #[must_use]
    pub fn matches(&self, mention: &Mention) -> bool {
        let date = mention.date();
        self.brands.contains(&mention.brand)
            && self.subreddits.contains(&mention.subreddit)
            && self.start <= date
            && date <= self.end
            && self.labels.contains(&mention.sentiment_label)
    }

    /// Matching mentions in their original order.
    #[must_use]
    pub fn apply<'a>(&self, mentions: &'a [Mention]) -> Vec<&'a Mention> {
        mentions.iter().filter(|m| self.matches(m)).collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn mention(id: &str, brand: &str, sub: &str, day: u32, score: f64) -> Mention {
        let created = Utc.with_ymd_and_hms(2024, 3, day, 10, 0, 0).unwrap();
        let mut m = Mention::unscored(id, brand, "text", sub, "me", created, "u");
        m.apply_score(score);
        m
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn rows() -> Vec<Mention> {
        vec![
            mention("1", "NVIDIA", "hardware", 1, 0.7),
            mention("2", "AMD", "gaming", 10, -0.6),
            mention("3", "NVIDIA", "gaming", 20, 0.0),
        ]
    }

    #[test]
    fn options_collect_sorted_choices_and_dates() {
        let options = FilterOptions::from_mentions(&rows(), None).unwrap();
        assert_eq!(options.brands, vec!["AMD", "NVIDIA"]);
        assert_eq!(options.subreddits, vec!["gaming", "hardware"]);
        assert_eq!(options.min_date, date(1));
        assert_eq!(options.max_date, date(20));
        assert_eq!(options.total_records, 3);
    }

    #[test]
    fn default_start_is_clamped_to_oldest_date() {
        let options = FilterOptions::from_mentions(&rows(), None).unwrap();
        assert_eq!(options.default_start, date(1));
        assert_eq!(options.default_end, date(20));
    }

    #[test]
    fn default_window_is_thirty_days_before_newest() {
        let mut data = rows();
        data.push(mention("4", "AMD", "gaming", 31, 0.1));
        let old = Utc.with_ymd_and_hms(2023, 12, 1, 0, 0, 0).unwrap();
        data.push(Mention::unscored("0", "AMD", "t", "gaming", "me", old, "u"));

        let options = FilterOptions::from_mentions(&data, None).unwrap();
        assert_eq!(options.default_start, date(1));
        assert_eq!(options.default_end, date(31));
    }

    #[test]
    fn empty_dataset_has_no_options() {
        assert!(FilterOptions::from_mentions(&[], None).is_none());
    }

    #[test]
    fn absent_query_selects_everything_in_default_range() {
        let data = rows();
        let options = FilterOptions::from_mentions(&data, None).unwrap();
        let resolved = MentionFilter::resolve(&FilterQuery::default(), &options).unwrap();
        assert!(resolved.warning.is_none());
        assert_eq!(resolved.filter.apply(&data).len(), 3);
    }

    #[test]
    fn filters_combine_conjunctively() {
        let data = rows();
        let options = FilterOptions::from_mentions(&data, None).unwrap();
        let query = FilterQuery {
            brands: Some("NVIDIA".to_string()),
            subreddits: Some("gaming, hardware".to_string()),
            labels: Some("positive,neutral".to_string()),
            start: Some(date(5)),
            end: Some(date(25)),
        };
        let filter = MentionFilter::resolve(&query, &options).unwrap().filter;
        let ids: Vec<&str> = filter.apply(&data).iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["3"]);
    }

    #[test]
    fn empty_selection_matches_nothing() {
        let data = rows();
        let options = FilterOptions::from_mentions(&data, None).unwrap();
        let query = FilterQuery {
            brands: Some(String::new()),
            ..FilterQuery::default()
        };
        let filter = MentionFilter::resolve(&query, &options).unwrap().filter;
        assert!(filter.apply(&data).is_empty());
    }

    #[test]
    fn single_date_bound_uses_full_range_with_warning() {
        let options = FilterOptions::from_mentions(&rows(), None).unwrap();
        let query = FilterQuery {
            start: Some(date(15)),
            ..FilterQuery::default()
        };
        let resolved = MentionFilter::resolve(&query, &options).unwrap();
        assert_eq!(resolved.filter.start, date(1));
        assert_eq!(resolved.filter.end, date(20));
        assert!(resolved.warning.is_some());
    }

    #[test]
    fn unknown_label_and_reversed_range_are_rejected() {
        let options = FilterOptions::from_mentions(&rows(), None).unwrap();
        let bad_label = FilterQuery {
            labels: Some("Ecstatic".to_string()),
            ..FilterQuery::default()
        };
        assert!(MentionFilter::resolve(&bad_label, &options).is_err());

        let reversed = FilterQuery {
            start: Some(date(20)),
            end: Some(date(1)),
            ..FilterQuery::default()
        };
        assert!(MentionFilter::resolve(&reversed, &options).is_err());
    }
}
