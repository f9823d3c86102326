use std::collections::BTreeMap;

/// Field names accepted as email columns when no literal `email` field is
/// present. Checked in array order; first non-empty value wins.
pub const EMAIL_ALIASES: [&str; 6] = [
    "e-mail",
    "email_address",
    "emailaddress",
    "mail",
    "work_email",
    "e_mail",
];

/// Canonical form for email comparison: trimmed and lowercased.
pub fn normalize_email(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Canonical form for handle comparison: trimmed, leading `@` stripped,
/// lowercased. Idempotent.
pub fn normalize_handle(s: &str) -> String {
    s.trim().trim_start_matches('@').trim().to_lowercase()
}

/// Resolve the email value out of a cleaned row of raw fields.
///
/// Preference order: a field literally named `email`, then the
/// [`EMAIL_ALIASES`] set, then the first field (in key order) whose name
/// contains the substring `email`. Best-effort policy for messy upstream
/// exports, applied once at load time.
pub fn resolve_email(fields: &BTreeMap<String, String>) -> Option<&str> {
    if let Some(v) = fields.get("email") {
        if !v.trim().is_empty() {
            return Some(v.as_str());
        }
    }
    for alias in EMAIL_ALIASES {
        if let Some(v) = fields.get(alias) {
            if !v.trim().is_empty() {
                return Some(v.as_str());
            }
        }
    }
    fields
        .iter()
        .find(|(k, v)| k.contains("email") && !v.trim().is_empty())
        .map(|(_, v)| v.as_str())
}
