use std::collections::HashSet;

use classify::{Query, QueryKind};
use directory::{Record, Snapshot};

use crate::fuzzy::ratio;
use crate::types::{SuggestConfig, Suggestion};


/// Find the record matching a classified query.
///
/// Linear scan in snapshot order; when duplicate identifiers exist the
/// first record wins, by contract. `None` is the normal no-match outcome,
/// not an error.
pub fn find_record<'a>(snapshot: &'a Snapshot, query: &Query) -> Option<&'a Record> {
    if query.value.is_empty() {
        return None;
    }
    let records = snapshot.records();
    match query.kind {
        QueryKind::Email => records.iter().find(|r| r.email_norm == query.value),
        QueryKind::TelegramHandle => records.iter().find(|r| r.telegram_norm == query.value),
        QueryKind::XHandle => records.iter().find(|r| r.x_norm == query.value),
        // A bare handle carries no host context; try every handle-shaped
        // field, still first-in-order across records.
        QueryKind::RawHandle => records.iter().find(|r| {
            r.telegram_norm == query.value
                || r.x_norm == query.value
                || r.email_norm == query.value
        }),
        QueryKind::Name => {
            let needle = query.value.to_lowercase();
            records.iter().find(|r| {
                !r.full_name_norm.is_empty() && r.full_name_norm.to_lowercase() == needle
            })
        }
        QueryKind::EmailDomain => {
            let suffix = format!("@{}", query.value);
            records.iter().find(|r| r.email_norm.ends_with(&suffix))
        }
        QueryKind::Unrecognized => None,
    }
}

/// Rank fuzzy name suggestions for a name query with no exact match.
///
/// Candidates are the distinct stored full names in first-seen snapshot
/// order; a name shared by several records is scored once. Scoring is
/// case-insensitive. The sort is stable, so equal scores keep candidate
/// order and repeated calls over the same snapshot return identical lists.
pub fn suggest(snapshot: &Snapshot, name: &str, cfg: &SuggestConfig) -> Vec<Suggestion> {
    let needle = name.to_lowercase();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut ranked: Vec<Suggestion> = Vec::new();

    for record in snapshot.records() {
        let candidate = record.full_name_norm.as_str();
        if candidate.is_empty() || !seen.insert(candidate) {
            continue;
        }
        let score = ratio(&needle, &candidate.to_lowercase());
        if score >= cfg.cutoff {
            ranked.push(Suggestion {
                name: candidate.to_string(),
                score,
            });
        }
    }

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.truncate(cfg.max_results);
    ranked
}
