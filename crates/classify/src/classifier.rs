use once_cell::sync::Lazy;
use regex::Regex;

use crate::query::{Query, QueryKind};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:mailto:)?([A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,})")
        .expect("email pattern")
});

static X_LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:https?://)?(?:www\.)?(?:x\.com|twitter\.com)/@?([A-Za-z0-9_]{1,15})(?:[/?#]|$)")
        .expect("x link pattern")
});

static TELEGRAM_LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:https?://)?(?:www\.)?(?:t\.me|telegram\.me)/@?([A-Za-z0-9_]{3,64})(?:[/?#]|$)")
        .expect("telegram link pattern")
});

static RAW_HANDLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^@?([A-Za-z0-9_]{1,64})$").expect("raw handle pattern"));

// Letters including Latin-1 Supplement / Latin Extended-A+B, digits,
// space, hyphen, period, apostrophe, backtick.
static NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z\x{00C0}-\x{024F}0-9\s.'`-]{2,100}$").expect("name pattern")
});

static DOMAIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@?([A-Za-z0-9.-]+\.[A-Za-z]{2,})$").expect("domain pattern"));

/// Strip surrounding whitespace plus the backtick/angle-bracket wrapping
/// chat clients add around pasted identifiers.
fn strip_wrappers(text: &str) -> &str {
    text.trim()
        .trim_matches(|c| matches!(c, '`' | '<' | '>' | ' '))
}

/// Classify raw user text into a typed query.
///
/// Matchers run in strict priority order, first match wins: email, X
/// link, Telegram link, bare handle, name shape, trailing domain. Anything
/// left over is [`QueryKind::Unrecognized`].
pub fn classify(text: &str) -> Query {
    let t = strip_wrappers(text);

    if let Some(caps) = EMAIL_RE.captures(t) {
        return Query::new(QueryKind::Email, caps[1].to_lowercase());
    }

    if let Some(caps) = X_LINK_RE.captures(t) {
        return Query::new(QueryKind::XHandle, caps[1].to_lowercase());
    }

    if let Some(caps) = TELEGRAM_LINK_RE.captures(t) {
        return Query::new(QueryKind::TelegramHandle, caps[1].to_lowercase());
    }

    if let Some(caps) = RAW_HANDLE_RE.captures(t) {
        return Query::new(QueryKind::RawHandle, caps[1].to_lowercase());
    }

    if NAME_RE.is_match(t) {
        return Query::new(QueryKind::Name, t);
    }

    if let Some(caps) = DOMAIN_RE.captures(t) {
        return Query::new(QueryKind::EmailDomain, caps[1].to_lowercase());
    }

    Query::new(QueryKind::Unrecognized, t)
}
