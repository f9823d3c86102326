use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A ranked fuzzy-match candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// The candidate full name, exactly as stored.
    pub name: String,
    /// Gestalt similarity ratio in [0.0, 1.0].
    pub score: f64,
}

/// Configuration for fuzzy name suggestions.
///
/// Cheap to clone and serde-friendly so it can be embedded in higher-level
/// configs or loaded from the environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestConfig {
    /// Minimum similarity ratio a candidate must reach to be suggested.
    #[serde(default = "SuggestConfig::default_cutoff")]
    pub cutoff: f64,
    /// Maximum number of suggestions to return.
    #[serde(default = "SuggestConfig::default_max_results")]
    pub max_results: usize,
}

impl SuggestConfig {
    pub(crate) fn default_cutoff() -> f64 {
        0.6
    }

    pub(crate) fn default_max_results() -> usize {
        5
    }

    pub fn with_cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = cutoff;
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Validate before use.
    pub fn validate(&self) -> Result<(), MatchError> {
        if !(0.0..=1.0).contains(&self.cutoff) {
            return Err(MatchError::InvalidConfig(
                "cutoff must be between 0.0 and 1.0".into(),
            ));
        }
        if self.max_results == 0 {
            return Err(MatchError::InvalidConfig(
                "max_results must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            cutoff: Self::default_cutoff(),
            max_results: Self::default_max_results(),
        }
    }
}

/// Errors surfaced by the matching layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("invalid matcher configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = SuggestConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.cutoff, 0.6);
        assert_eq!(cfg.max_results, 5);
    }

    #[test]
    fn cutoff_out_of_range_rejected() {
        let cfg = SuggestConfig::default().with_cutoff(1.5);
        let err = cfg.validate().expect_err("config should be invalid");
        match err {
            MatchError::InvalidConfig(msg) => assert!(msg.contains("cutoff")),
        }
    }

    #[test]
    fn zero_max_results_rejected() {
        let cfg = SuggestConfig::default().with_max_results(0);
        let err = cfg.validate().expect_err("config should be invalid");
        match err {
            MatchError::InvalidConfig(msg) => assert!(msg.contains("max_results")),
        }
    }

    #[test]
    fn serde_defaults_fill_missing_fields() {
        let cfg: SuggestConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, SuggestConfig::default());

        let cfg: SuggestConfig = serde_json::from_str(r#"{"cutoff": 0.8}"#).unwrap();
        assert_eq!(cfg.cutoff, 0.8);
        assert_eq!(cfg.max_results, 5);
    }
}
