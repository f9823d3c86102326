//! Staff directory storage layer.
//!
//! This is where directory data enters the lookup pipeline. Raw rows (field
//! maps from a JSON export) are cleaned, resolved into typed [`Record`]s with
//! comparison-ready normalized fields, and collected into an immutable
//! [`Snapshot`] held behind an atomically swappable [`DirectoryStore`].
//!
//! ## What we do here
//!
//! - **Clean raw rows** - trim keys and values, strip the BOM exports love
//!   to prepend, lowercase field names
//! - **Resolve fields** - the email alias heuristic, the truthy activity
//!   flag, normalized handle/email/name forms cached per record
//! - **Snapshot** - source-ordered, immutable, timestamped views
//! - **Swap atomically** - readers clone an `Arc` and never see a reload
//!   in progress; a failed reload leaves the current snapshot untouched
//!
//! ## Main entry points
//!
//! [`DirectoryStore::reload_from_file`] for the JSON file path, or
//! [`DirectoryStore::replace`] when rows come from elsewhere.

mod error;
mod loader;
mod record;
mod snapshot;
mod store;

pub use crate::error::DirectoryError;
pub use crate::loader::load_json_file;
pub use crate::record::{clean_fields, Record};
pub use crate::snapshot::Snapshot;
pub use crate::store::DirectoryStore;
