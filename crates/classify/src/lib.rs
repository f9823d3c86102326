//! Staff-lookup classification layer.
//!
//! This crate turns raw user text into a typed query and raw field values
//! into comparison-ready forms. Downstream stages (matcher, directory
//! loader) rely on this for stable equality semantics.
//!
//! ## What we do
//!
//! - Field normalization (lowercase, trim, leading-`@` stripping)
//! - Email resolution through a fixed alias set for messy source data
//! - Free-text classification: an ordered chain of matchers, first match
//!   wins, producing a tagged [`Query`]
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no global mutable state. Same text in, same
//! query out, on any machine and from any number of threads at once.

mod classifier;
mod normalize;
mod query;

pub use crate::classifier::classify;
pub use crate::normalize::{normalize_email, normalize_handle, resolve_email, EMAIL_ALIASES};
pub use crate::query::{Query, QueryKind};
