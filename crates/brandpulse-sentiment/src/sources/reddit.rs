//! Reddit API search client (client-credentials OAuth).

use std::time::Duration;

use brandpulse_core::Mention;
use serde::Deserialize;

use crate::error::SentimentError;
use crate::types::RedditCredentials;

use super::reddit_helpers::{search_params, to_mention};
use super::SearchApi;

const DEFAULT_AUTH_BASE: &str = "https://www.reddit.com";
const DEFAULT_API_BASE: &str = "https://oauth.reddit.com";
/// Largest page Reddit will return for a listing request.
pub(super) const MAX_PAGE_SIZE: u32 = 100;

/// Reddit OAuth token response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Reddit search listing wrapper.
#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    children: Vec<Post>,
    after: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct Post {
    pub(super) data: PostData,
}

#[derive(Debug, Deserialize)]
pub(super) struct PostData {
    pub(super) id: Option<String>,
    pub(super) title: Option<String>,
    pub(super) selftext: Option<String>,
    pub(super) author: Option<String>,
    pub(super) created_utc: Option<f64>,
    pub(super) permalink: Option<String>,
}

/// Reddit API client holding a valid access token.
pub struct RedditClient {
    client: reqwest::Client,
    token: String,
    user_agent: String,
    api_base: String,
}

impl RedditClient {
    /// Exchange client credentials for a token against the production API.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError`] if the HTTP client cannot be built or the
    /// token exchange fails.
    pub async fn connect(
        credentials: &RedditCredentials,
        timeout_secs: u64,
    ) -> Result<Self, SentimentError> {
        Self::connect_with_base_urls(credentials, timeout_secs, DEFAULT_AUTH_BASE, DEFAULT_API_BASE)
            .await
    }

    /// Same as [`Self::connect`] with custom hosts (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError`] if the HTTP client cannot be built or the
    /// token exchange fails.
    pub async fn connect_with_base_urls(
        credentials: &RedditCredentials,
        timeout_secs: u64,
        auth_base: &str,
        api_base: &str,
    ) -> Result<Self, SentimentError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| SentimentError::Reddit(format!("failed to build HTTP client: {e}")))?;

        let token = Self::fetch_token(&client, credentials, auth_base).await?;

        Ok(Self {
            client,
            token,
            user_agent: credentials.user_agent.clone(),
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    async fn fetch_token(
        client: &reqwest::Client,
        credentials: &RedditCredentials,
        auth_base: &str,
    ) -> Result<String, SentimentError> {
        let url = format!("{}/api/v1/access_token", auth_base.trim_end_matches('/'));
        let response = client
            .post(url)
            .header("User-Agent", &credentials.user_agent)
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SentimentError::Reddit(format!(
                "token exchange failed with status {}",
                response.status()
            )));
        }

        let token_resp: TokenResponse = response
            .json()
            .await
            .map_err(|e| SentimentError::Reddit(format!("token parse error: {e}")))?;

        Ok(token_resp.access_token)
    }

    async fn search_page(
        &self,
        subreddit: &str,
        brand: &str,
        page_size: u32,
        after: Option<&str>,
    ) -> Result<ListingData, SentimentError> {
        let endpoint = format!("{}/r/{subreddit}/search", self.api_base);
        let response = self
            .client
            .get(endpoint)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("User-Agent", &self.user_agent)
            .query(&search_params(brand, page_size, after))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SentimentError::Reddit(format!(
                "search in r/{subreddit} failed with status {}",
                response.status()
            )));
        }

        let listing: Listing = response
            .json()
            .await
            .map_err(|e| SentimentError::Reddit(format!("Reddit response parse error: {e}")))?;

        Ok(listing.data)
    }
}

impl SearchApi for RedditClient {
    /// Newest-first search for `brand` restricted to `subreddit`, following
    /// `after` cursors until `limit` posts are collected or results run out.
    async fn search(
        &self,
        subreddit: &str,
        brand: &str,
        limit: u32,
    ) -> Result<Vec<Mention>, SentimentError> {
        let mut mentions = Vec::new();
        let mut after: Option<String> = None;

        loop {
            let remaining = limit.saturating_sub(u32::try_from(mentions.len()).unwrap_or(u32::MAX));
            if remaining == 0 {
                break;
            }

            let page = self
                .search_page(subreddit, brand, remaining.min(MAX_PAGE_SIZE), after.as_deref())
                .await?;
            let page_len = page.children.len();

            for post in &page.children {
                if mentions.len() >= limit as usize {
                    break;
                }
                mentions.push(to_mention(post, subreddit, brand)?);
            }

            after = page.after;
            if after.is_none() || page_len == 0 {
                break;
            }
        }

        tracing::debug!(
            subreddit,
            brand,
            count = mentions.len(),
            "collected Reddit search results"
        );

        Ok(mentions)
    }
}
