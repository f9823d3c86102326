//! Environment-driven service configuration.
//!
//! The deployment surface is a handful of environment variables:
//!
//! | Variable            | Meaning                                | Default |
//! |---------------------|----------------------------------------|---------|
//! | `RATE_LIMIT_COUNT`  | requests allowed per window            | 6       |
//! | `RATE_LIMIT_WINDOW` | window length in seconds               | 60      |
//! | `FUZZY_MATCH_CUTOFF`| minimum suggestion similarity          | 0.6     |
//! | `FUZZY_MAX_SUGGEST` | maximum suggestions returned           | 5       |
//! | `ADMIN_IDS`         | comma-separated ids allowed to reload  | empty   |
//!
//! Unset variables fall back to defaults; a set-but-unparseable value is a
//! typed error at startup, never a silent fallback.

use std::str::FromStr;

use matcher::{MatchError, SuggestConfig};
use ratelimit::{RateLimitConfig, RateLimitError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while reading or validating configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var}")]
    InvalidValue { var: &'static str, value: String },

    #[error(transparent)]
    Match(#[from] MatchError),

    #[error(transparent)]
    RateLimit(#[from] RateLimitError),
}

/// Aggregate configuration for the lookup service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LookupConfig {
    #[serde(default)]
    pub suggest: SuggestConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// User ids allowed to trigger directory reloads.
    #[serde(default)]
    pub admin_ids: Vec<u64>,
}

impl LookupConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through an injectable variable lookup.
    pub fn from_env_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(count) = parse_var::<u32, _>(&get, "RATE_LIMIT_COUNT")? {
            cfg.rate_limit = cfg.rate_limit.with_max_requests(count);
        }
        if let Some(window) = parse_var::<u64, _>(&get, "RATE_LIMIT_WINDOW")? {
            cfg.rate_limit = cfg.rate_limit.with_window_secs(window);
        }
        if let Some(cutoff) = parse_var::<f64, _>(&get, "FUZZY_MATCH_CUTOFF")? {
            cfg.suggest = cfg.suggest.with_cutoff(cutoff);
        }
        if let Some(max) = parse_var::<usize, _>(&get, "FUZZY_MAX_SUGGEST")? {
            cfg.suggest = cfg.suggest.with_max_results(max);
        }
        if let Some(raw) = get("ADMIN_IDS") {
            cfg.admin_ids = parse_id_list(&raw)?;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn with_suggest(mut self, suggest: SuggestConfig) -> Self {
        self.suggest = suggest;
        self
    }

    pub fn with_rate_limit(mut self, rate_limit: RateLimitConfig) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    pub fn with_admin_ids(mut self, admin_ids: Vec<u64>) -> Self {
        self.admin_ids = admin_ids;
        self
    }

    /// Validate all embedded configs before use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.suggest.validate()?;
        self.rate_limit.validate()?;
        Ok(())
    }
}

fn parse_var<T, F>(get: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match get(var) {
        Some(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<T>()
                .map(Some)
                .map_err(|_| ConfigError::InvalidValue {
                    var,
                    value: raw.clone(),
                })
        }
        None => Ok(None),
    }
}

fn parse_id_list(raw: &str) -> Result<Vec<u64>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: "ADMIN_IDS",
                value: raw.to_string(),
            })
        })
        .collect()
}
