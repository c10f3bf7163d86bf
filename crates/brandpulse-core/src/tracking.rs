use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const DEFAULT_BRANDS: &[&str] = &["NVIDIA", "AMD"];
const DEFAULT_SUBREDDITS: &[&str] = &["hardware", "gaming", "pcmasterrace", "buildapc", "intel"];
const DEFAULT_LIMIT_PER_PAIR: u32 = 200;

/// Which brands to search for, where, and how many posts per pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingConfig {
    pub brands: Vec<String>,
    pub subreddits: Vec<String>,
    #[serde(default = "default_limit_per_pair")]
    pub limit_per_pair: u32,
}

fn default_limit_per_pair() -> u32 {
    DEFAULT_LIMIT_PER_PAIR
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            brands: DEFAULT_BRANDS.iter().map(ToString::to_string).collect(),
            subreddits: DEFAULT_SUBREDDITS.iter().map(ToString::to_string).collect(),
            limit_per_pair: DEFAULT_LIMIT_PER_PAIR,
        }
    }
}

impl TrackingConfig {
    /// Number of (subreddit, brand) searches one fetch performs.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.brands.len() * self.subreddits.len()
    }

    /// Reject empty lists, blank or duplicate entries, and a zero limit.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_list("brands", &self.brands)?;
        validate_list("subreddits", &self.subreddits)?;
        if self.limit_per_pair == 0 {
            return Err(ConfigError::Validation(
                "limit_per_pair must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn validate_list(field: &str, values: &[String]) -> Result<(), ConfigError> {
    if values.is_empty() {
        return Err(ConfigError::Validation(format!("{field} must not be empty")));
    }
    let mut seen = HashSet::new();
    for value in values {
        if value.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "{field} entries must be non-empty"
            )));
        }
        if value.contains(',') {
            return Err(ConfigError::Validation(format!(
                "{field} entries must not contain commas: '{value}'"
            )));
        }
        if !seen.insert(value.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate entry in {field}: '{value}'"
            )));
        }
    }
    Ok(())
}

/// Resolve the tracking configuration.
///
/// With no path, returns the built-in defaults. With a path, reads and
/// validates the YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_tracking(path: Option<&Path>) -> Result<TrackingConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(TrackingConfig::default());
    };

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::TrackingFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let tracking: TrackingConfig = serde_yaml::from_str(&content)?;
    tracking.validate()?;
    Ok(tracking)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_cover_two_brands_and_five_subreddits() {
        let tracking = TrackingConfig::default();
        assert_eq!(tracking.brands, vec!["NVIDIA", "AMD"]);
        assert_eq!(tracking.subreddits.len(), 5);
        assert_eq!(tracking.limit_per_pair, 200);
        assert_eq!(tracking.pair_count(), 10);
        assert!(tracking.validate().is_ok());
    }

    #[test]
    fn load_without_path_returns_defaults() {
        let tracking = load_tracking(None).unwrap();
        assert_eq!(tracking, TrackingConfig::default());
    }

    #[test]
    fn load_reads_yaml_and_defaults_limit() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "brands: [Intel]\nsubreddits: [hardware, intel]").unwrap();

        let tracking = load_tracking(Some(file.path())).unwrap();
        assert_eq!(tracking.brands, vec!["Intel"]);
        assert_eq!(tracking.subreddits, vec!["hardware", "intel"]);
        assert_eq!(tracking.limit_per_pair, 200);
    }

    #[test]
    fn load_rejects_duplicate_brand_ignoring_case() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "brands: [AMD, amd]\nsubreddits: [hardware]").unwrap();

        let err = load_tracking(Some(file.path())).unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(ref msg) if msg.contains("duplicate")),
            "expected duplicate validation error, got: {err:?}"
        );
    }

    #[test]
    fn validate_rejects_comma_in_brand() {
        let tracking = TrackingConfig {
            brands: vec!["Acme, Inc".to_string()],
            ..TrackingConfig::default()
        };
        assert!(matches!(
            tracking.validate(),
            Err(ConfigError::Validation(ref msg)) if msg.contains("commas")
        ));
    }

    #[test]
    fn validate_rejects_zero_limit() {
        let tracking = TrackingConfig {
            limit_per_pair: 0,
            ..TrackingConfig::default()
        };
        assert!(matches!(
            tracking.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = load_tracking(Some(Path::new("/nonexistent/tracking.yaml"))).unwrap_err();
        assert!(matches!(err, ConfigError::TrackingFileIo { .. }));
    }
}
