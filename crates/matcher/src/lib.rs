//! Directory matching layer.
//!
//! Two operations over an immutable snapshot: exact lookup of a classified
//! query ([`find_record`]) and gestalt fuzzy ranking of near-miss names
//! ([`suggest`]). Both are pure reads; the snapshot is never touched, so
//! any number of lookups can run concurrently against the same view.

mod engine;
mod fuzzy;
mod types;

pub use crate::engine::{find_record, suggest};
pub use crate::fuzzy::ratio;
pub use crate::types::{MatchError, SuggestConfig, Suggestion};
