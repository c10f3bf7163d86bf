//! Reddit request building and post conversion.

use brandpulse_core::{from_epoch_seconds, Mention, MISSING_AUTHOR};

use super::reddit::Post;
use crate::error::SentimentError;

pub(super) fn search_params(
    brand: &str,
    page_size: u32,
    after: Option<&str>,
) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("q", brand.to_string()),
        ("restrict_sr", "true".to_string()),
        ("sort", "new".to_string()),
        ("type", "link".to_string()),
        ("limit", page_size.to_string()),
        ("raw_json", "1".to_string()),
    ];
    if let Some(cursor) = after {
        params.push(("after", cursor.to_string()));
    }
    params
}

/// Deleted and missing accounts collapse to [`MISSING_AUTHOR`].
fn normalize_author(author: Option<&str>) -> String {
    match author.map(str::trim) {
        Some(name) if !name.is_empty() && name != "[deleted]" => name.to_string(),
        _ => MISSING_AUTHOR.to_string(),
    }
}

/// Map one search result to an unscored mention.
///
/// `subreddit` is the community that was searched, not the post's own field.
///
/// # Errors
///
/// Returns [`SentimentError::InputShape`] when the post lacks an id, title,
/// timestamp or permalink.
pub(super) fn to_mention(
    post: &Post,
    subreddit: &str,
    brand: &str,
) -> Result<Mention, SentimentError> {
    let data = &post.data;
    let id = data
        .id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| SentimentError::InputShape("search result has no id".to_string()))?;

    let missing = |field: &str| SentimentError::InputShape(format!("post {id} has no {field}"));

    let title = data.title.as_deref().ok_or_else(|| missing("title"))?;
    let permalink = data.permalink.as_deref().ok_or_else(|| missing("permalink"))?;
    let created_utc = data
        .created_utc
        .and_then(from_epoch_seconds)
        .ok_or_else(|| missing("created_utc"))?;
    let body = data.selftext.as_deref().unwrap_or_default();

    Ok(Mention::unscored(
        id,
        brand,
        format!("{title} {body}"),
        subreddit,
        normalize_author(data.author.as_deref()),
        created_utc,
        format!("https://reddit.com{permalink}"),
    ))
}

#[cfg(test)]
mod tests {
    use brandpulse_core::SentimentLabel;

    use super::super::reddit::PostData;
    use super::*;

    fn post(title: Option<&str>, author: Option<&str>) -> Post {
        Post {
            data: PostData {
                id: Some("1abcde".to_string()),
                title: title.map(ToString::to_string),
                selftext: Some("Runs cool and quiet.".to_string()),
                author: author.map(ToString::to_string),
                created_utc: Some(1_714_000_000.0),
                permalink: Some("/r/hardware/comments/1abcde/new_gpu/".to_string()),
            },
        }
    }

    #[test]
    fn search_params_request_newest_link_results() {
        let params = search_params("NVIDIA", 100, None);
        assert!(params.contains(&("q", "NVIDIA".to_string())));
        assert!(params.contains(&("sort", "new".to_string())));
        assert!(params.contains(&("restrict_sr", "true".to_string())));
        assert!(params.contains(&("limit", "100".to_string())));
        assert!(!params.iter().any(|(k, _)| *k == "after"));

        let params = search_params("NVIDIA", 25, Some("t3_xyz"));
        assert!(params.contains(&("after", "t3_xyz".to_string())));
    }

    #[test]
    fn to_mention_joins_title_and_body_with_placeholder_sentiment() {
        let mention = to_mention(&post(Some("New GPU"), Some("alice")), "hardware", "NVIDIA")
            .expect("valid post");
        assert_eq!(mention.id, "1abcde");
        assert_eq!(mention.brand, "NVIDIA");
        assert_eq!(mention.text, "New GPU Runs cool and quiet.");
        assert_eq!(mention.subreddit, "hardware");
        assert_eq!(mention.author, "alice");
        assert_eq!(
            mention.url,
            "https://reddit.com/r/hardware/comments/1abcde/new_gpu/"
        );
        assert_eq!(mention.sentiment_score, 0.0);
        assert_eq!(mention.sentiment_label, SentimentLabel::Neutral);
    }

    #[test]
    fn deleted_or_missing_author_becomes_sentinel() {
        let deleted = to_mention(&post(Some("t"), Some("[deleted]")), "hardware", "AMD").unwrap();
        assert_eq!(deleted.author, MISSING_AUTHOR);
        let missing = to_mention(&post(Some("t"), None), "hardware", "AMD").unwrap();
        assert_eq!(missing.author, MISSING_AUTHOR);
    }

    #[test]
    fn missing_title_is_input_shape_error() {
        let err = to_mention(&post(None, Some("alice")), "hardware", "AMD").unwrap_err();
        assert!(
            matches!(err, SentimentError::InputShape(ref msg) if msg.contains("title")),
            "unexpected error: {err:?}"
        );
    }
}
