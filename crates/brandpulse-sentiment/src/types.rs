use brandpulse_core::{Mention, Outcome};

/// Credentials for the Reddit OAuth client-credentials flow.
#[derive(Clone)]
pub struct RedditCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub user_agent: String,
}

impl std::fmt::Debug for RedditCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedditCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[redacted]")
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl RedditCredentials {
    /// Build credentials from `REDDIT_CLIENT_ID`, `REDDIT_CLIENT_SECRET`
    /// and `REDDIT_USER_AGENT`.
    ///
    /// # Errors
    ///
    /// Returns an error string listing every missing variable.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(get: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        let client_id = present("REDDIT_CLIENT_ID");
        let client_secret = present("REDDIT_CLIENT_SECRET");
        let user_agent = present("REDDIT_USER_AGENT");

        match (client_id, client_secret, user_agent) {
            (Some(client_id), Some(client_secret), Some(user_agent)) => Ok(Self {
                client_id,
                client_secret,
                user_agent,
            }),
            (client_id, client_secret, user_agent) => {
                let mut missing = Vec::new();
                if client_id.is_none() {
                    missing.push("REDDIT_CLIENT_ID");
                }
                if client_secret.is_none() {
                    missing.push("REDDIT_CLIENT_SECRET");
                }
                if user_agent.is_none() {
                    missing.push("REDDIT_USER_AGENT");
                }
                Err(format!("missing Reddit env vars: {}", missing.join(", ")))
            }
        }
    }
}

/// Result of one (subreddit, brand) search.
#[derive(Debug, Clone, PartialEq)]
pub struct PairOutcome {
    pub subreddit: String,
    pub brand: String,
    /// Number of mentions returned, or why the search produced none.
    pub outcome: Outcome<usize>,
}

/// Everything one fetch pass produced.
#[derive(Debug, Clone, Default)]
pub struct FetchReport {
    pub mentions: Vec<Mention>,
    pub pairs: Vec<PairOutcome>,
}

impl FetchReport {
    /// Pairs whose search failed and contributed no rows.
    pub fn failed_pairs(&self) -> impl Iterator<Item = &PairOutcome> {
        self.pairs.iter().filter(|p| p.outcome.is_failed())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup<'a>(map: &'a HashMap<&'a str, &'a str>) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| map.get(key).map(|v| (*v).to_string())
    }

    #[test]
    fn from_lookup_reads_all_three_values() {
        let map = HashMap::from([
            ("REDDIT_CLIENT_ID", "id"),
            ("REDDIT_CLIENT_SECRET", "secret"),
            ("REDDIT_USER_AGENT", "brandpulse/0.1"),
        ]);
        let creds = RedditCredentials::from_lookup(lookup(&map)).unwrap();
        assert_eq!(creds.client_id, "id");
        assert_eq!(creds.user_agent, "brandpulse/0.1");
    }

    #[test]
    fn from_lookup_lists_every_missing_var() {
        let map = HashMap::from([("REDDIT_CLIENT_ID", "id"), ("REDDIT_USER_AGENT", " ")]);
        let err = RedditCredentials::from_lookup(lookup(&map)).unwrap_err();
        assert_eq!(
            err,
            "missing Reddit env vars: REDDIT_CLIENT_SECRET, REDDIT_USER_AGENT"
        );
    }

    #[test]
    fn debug_redacts_secret() {
        let creds = RedditCredentials {
            client_id: "id".to_string(),
            client_secret: "hunter2".to_string(),
            user_agent: "ua".to_string(),
        };
        let debug = format!("{creds:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[redacted]"));
    }
}
