//! Staff directory lookup core.
//!
//! This crate stitches the pipeline together: free-text classification,
//! per-user rate limiting, exact directory matching, and fuzzy name
//! suggestions, all behind one [`LookupService`] entry point. Chat
//! transport, command dispatch, and message formatting live outside; this
//! crate answers the single question "who, if anyone, does this text refer
//! to?" and reports everything else as a typed outcome.
//!
//! ```
//! use staff_lookup::{LookupConfig, LookupOutcome, LookupService};
//!
//! let service = LookupService::new(LookupConfig::default()).unwrap();
//! let response = service.lookup(42, "jane.doe@example.com");
//! // Nothing loaded yet, so the directory reports itself unavailable.
//! assert!(matches!(response.outcome, LookupOutcome::DataUnavailable));
//! ```

pub use classify::{
    classify, normalize_email, normalize_handle, resolve_email, Query, QueryKind,
};
pub use directory::{clean_fields, DirectoryError, DirectoryStore, Record, Snapshot};
pub use matcher::{ratio, MatchError, SuggestConfig, Suggestion};
pub use ratelimit::{
    RateDecision, RateLimitConfig, RateLimitError, RateLimitStats, SlidingWindowLimiter,
};

mod audit;
mod config;

pub use crate::audit::{set_audit_sink, AuditSink, LookupEvent, NotFoundEvent};
pub use crate::config::{ConfigError, LookupConfig};

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn, Level};

use crate::audit::audit_sink;

/// Errors surfaced by service operations.
///
/// Lookups themselves never error; every negative path is a
/// [`LookupOutcome`]. Errors are reserved for administration (reload,
/// configuration).
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("user {caller_id} is not authorized to reload the directory")]
    NotAuthorized { caller_id: u64 },

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// What a lookup concluded.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum LookupOutcome {
    /// Exactly one record answers the query.
    Found(Record),
    /// Recognized query, no record, no usable suggestions.
    NoMatch,
    /// Name query with no exact match but close candidates.
    Suggestions(Vec<Suggestion>),
    /// The classifier could not make sense of the input.
    Unrecognized,
    /// The caller is over their window; retry after the given seconds.
    RateLimited { retry_after_secs: u64 },
    /// No directory data is loaded. Suggest a reload, not an apology.
    DataUnavailable,
}

/// A classified query plus its outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupResponse {
    pub query: Query,
    pub outcome: LookupOutcome,
}

/// Point-in-time service counters, for a stats command.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceStats {
    pub rows: usize,
    pub loaded_at: DateTime<Utc>,
    pub rate: RateLimitStats,
}

/// The lookup pipeline: classify, admit, match, suggest.
pub struct LookupService {
    store: Arc<DirectoryStore>,
    limiter: SlidingWindowLimiter,
    suggest_cfg: SuggestConfig,
    admin_ids: HashSet<u64>,
}

impl LookupService {
    /// Build a service with its own empty store.
    pub fn new(config: LookupConfig) -> Result<Self, LookupError> {
        Self::with_store(Arc::new(DirectoryStore::new()), config)
    }

    /// Build a service over a shared store handle.
    pub fn with_store(store: Arc<DirectoryStore>, config: LookupConfig) -> Result<Self, LookupError> {
        config.validate()?;
        Ok(Self {
            store,
            limiter: SlidingWindowLimiter::new(config.rate_limit),
            suggest_cfg: config.suggest,
            admin_ids: config.admin_ids.into_iter().collect(),
        })
    }

    pub fn store(&self) -> &Arc<DirectoryStore> {
        &self.store
    }

    /// Run one lookup for `user_id`. Infallible: every path, including
    /// rate rejection and missing data, is an outcome.
    pub fn lookup(&self, user_id: u64, raw_text: &str) -> LookupResponse {
        let query = classify(raw_text);
        let span = tracing::span!(
            Level::INFO,
            "lookup",
            user_id,
            kind = query.kind.as_str()
        );
        let _guard = span.enter();

        // The gate comes first: unrecognized input still costs a token.
        if let RateDecision::Limited { retry_after_secs } = self.limiter.check(user_id) {
            warn!(retry_after_secs, "lookup_rate_limited");
            return LookupResponse {
                query,
                outcome: LookupOutcome::RateLimited { retry_after_secs },
            };
        }

        if !query.kind.is_recognized() {
            info!("lookup_unrecognized");
            return LookupResponse {
                query,
                outcome: LookupOutcome::Unrecognized,
            };
        }

        let snapshot = self.store.snapshot();
        if snapshot.is_empty() {
            warn!("lookup_data_unavailable");
            return LookupResponse {
                query,
                outcome: LookupOutcome::DataUnavailable,
            };
        }

        match matcher::find_record(&snapshot, &query) {
            Some(record) => {
                info!(matched = %record.full_name, "lookup_found");
                self.emit_lookup(user_id, raw_text, &query, true, Some(&record.full_name));
                LookupResponse {
                    query,
                    outcome: LookupOutcome::Found(record.clone()),
                }
            }
            None if query.kind == QueryKind::Name => {
                let suggestions = matcher::suggest(&snapshot, &query.value, &self.suggest_cfg);
                if suggestions.is_empty() {
                    info!("lookup_no_match");
                    self.emit_not_found(user_id, raw_text, &query);
                    self.emit_lookup(user_id, raw_text, &query, false, None);
                    LookupResponse {
                        query,
                        outcome: LookupOutcome::NoMatch,
                    }
                } else {
                    info!(count = suggestions.len(), "lookup_suggestions");
                    self.emit_lookup(user_id, raw_text, &query, false, None);
                    LookupResponse {
                        query,
                        outcome: LookupOutcome::Suggestions(suggestions),
                    }
                }
            }
            None => {
                info!("lookup_no_match");
                self.emit_not_found(user_id, raw_text, &query);
                self.emit_lookup(user_id, raw_text, &query, false, None);
                LookupResponse {
                    query,
                    outcome: LookupOutcome::NoMatch,
                }
            }
        }
    }

    /// Reload the directory from a JSON file. Admin-gated.
    pub fn reload_from_file(&self, caller_id: u64, path: &Path) -> Result<usize, LookupError> {
        self.require_admin(caller_id)?;
        Ok(self.store.reload_from_file(path)?)
    }

    /// Replace the directory with pre-built records. Admin-gated.
    pub fn replace_records(
        &self,
        caller_id: u64,
        records: Vec<Record>,
    ) -> Result<usize, LookupError> {
        self.require_admin(caller_id)?;
        Ok(self.store.replace(records))
    }

    /// Drop rate-limit entries whose windows have fully aged out.
    pub fn evict_idle_rate_entries(&self) -> usize {
        self.limiter.evict_idle()
    }

    pub fn stats(&self) -> ServiceStats {
        let snapshot = self.store.snapshot();
        ServiceStats {
            rows: snapshot.len(),
            loaded_at: snapshot.loaded_at(),
            rate: self.limiter.stats(),
        }
    }

    pub fn is_admin(&self, user_id: u64) -> bool {
        self.admin_ids.contains(&user_id)
    }

    fn require_admin(&self, caller_id: u64) -> Result<(), LookupError> {
        if self.is_admin(caller_id) {
            Ok(())
        } else {
            warn!(caller_id, "reload_not_authorized");
            Err(LookupError::NotAuthorized { caller_id })
        }
    }

    fn emit_lookup(
        &self,
        user_id: u64,
        raw_input: &str,
        query: &Query,
        found: bool,
        matched_name: Option<&str>,
    ) {
        if let Some(sink) = audit_sink() {
            sink.lookup(&LookupEvent {
                timestamp: Utc::now(),
                user_id,
                raw_input: raw_input.to_string(),
                kind: query.kind,
                value: query.value.clone(),
                found,
                matched_name: matched_name.map(str::to_string),
            });
        }
    }

    fn emit_not_found(&self, user_id: u64, raw_input: &str, query: &Query) {
        if let Some(sink) = audit_sink() {
            sink.not_found(&NotFoundEvent {
                timestamp: Utc::now(),
                user_id,
                raw_input: raw_input.to_string(),
                kind: query.kind,
                value: query.value.clone(),
            });
        }
    }
}
