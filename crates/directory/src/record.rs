use std::collections::BTreeMap;

use classify::{normalize_email, normalize_handle, resolve_email, EMAIL_ALIASES};
use serde::{Deserialize, Serialize};

/// String values accepted as "active" when parsing the activity flag.
const TRUTHY: [&str; 4] = ["yes", "y", "true", "1"];

/// One staff entry, built once at load time from a raw field map.
///
/// Raw display fields keep their source casing; the `*_norm` fields are the
/// comparison-ready forms the matcher uses. Both are computed in
/// [`Record::from_fields`] and never mutated afterwards, so they cannot
/// diverge within a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub full_name: String,
    pub job_title: String,
    pub department: Option<String>,
    pub location: Option<String>,
    pub email: Option<String>,
    pub telegram_handle: Option<String>,
    pub x_handle: Option<String>,
    pub is_active: bool,
    /// Remaining source fields, cleaned but otherwise untouched.
    pub extras: BTreeMap<String, String>,

    pub email_norm: String,
    pub telegram_norm: String,
    pub x_norm: String,
    pub full_name_norm: String,
}

/// Clean a raw row: keys trimmed, BOM-stripped, lowercased; values trimmed.
/// Messy upstream exports routinely carry a BOM on the first column name.
pub fn clean_fields(raw: BTreeMap<String, String>) -> BTreeMap<String, String> {
    raw.into_iter()
        .map(|(k, v)| {
            let key = k.trim().trim_start_matches('\u{feff}').to_lowercase();
            (key, v.trim().to_string())
        })
        .collect()
}

fn truthy(value: &str) -> bool {
    let v = value.trim().to_lowercase();
    TRUTHY.contains(&v.as_str())
}

fn take(fields: &mut BTreeMap<String, String>, key: &str) -> Option<String> {
    fields.remove(key).filter(|v| !v.is_empty())
}

impl Record {
    /// Build a record from an already-cleaned field map.
    ///
    /// Missing fields degrade to empty, never error: a row with only a name
    /// is still a usable record. The email value is resolved through the
    /// alias heuristic before normalization.
    pub fn from_fields(fields: BTreeMap<String, String>) -> Self {
        let email_raw = resolve_email(&fields).map(str::to_string);
        let mut fields = fields;
        fields.retain(|k, _| !k.contains("email") && !EMAIL_ALIASES.contains(&k.as_str()));

        let full_name = take(&mut fields, "full_name").unwrap_or_default();
        let job_title = take(&mut fields, "job_title").unwrap_or_default();
        let department = take(&mut fields, "department");
        let location = take(&mut fields, "location");
        let telegram_handle = take(&mut fields, "tg_username");
        let x_handle = take(&mut fields, "x_username");

        // "works_at_pionex" is the column name in the legacy staff export.
        let is_active = take(&mut fields, "active")
            .or_else(|| take(&mut fields, "is_active"))
            .or_else(|| take(&mut fields, "works_at_pionex"))
            .is_some_and(|v| truthy(&v));

        let email_norm = email_raw.as_deref().map(normalize_email).unwrap_or_default();
        let telegram_norm = telegram_handle
            .as_deref()
            .map(normalize_handle)
            .unwrap_or_default();
        let x_norm = x_handle.as_deref().map(normalize_handle).unwrap_or_default();
        let full_name_norm = full_name.trim().to_string();

        Record {
            full_name,
            job_title,
            department,
            location,
            email: email_raw,
            telegram_handle,
            x_handle,
            is_active,
            extras: fields,
            email_norm,
            telegram_norm,
            x_norm,
            full_name_norm,
        }
    }

    /// Build a record from a raw, uncleaned row.
    pub fn from_raw_fields(raw: BTreeMap<String, String>) -> Self {
        Self::from_fields(clean_fields(raw))
    }
}
