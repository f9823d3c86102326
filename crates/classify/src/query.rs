use serde::{Deserialize, Serialize};

/// Classified category of a raw text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
    /// A `local@domain` address, matched anywhere in the input.
    Email,
    /// A handle extracted from an x.com / twitter.com profile link.
    XHandle,
    /// A handle extracted from a t.me / telegram.me profile link.
    TelegramHandle,
    /// A bare handle with no host context; matched against telegram, X,
    /// and email fields.
    RawHandle,
    /// A human-name-shaped input; exact match first, fuzzy ranking after.
    Name,
    /// A trailing bare domain; matched against email domains.
    EmailDomain,
    /// Nothing above matched. No lookup is attempted.
    Unrecognized,
}

impl QueryKind {
    /// Stable lowercase label for logs and audit events.
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKind::Email => "email",
            QueryKind::XHandle => "x_handle",
            QueryKind::TelegramHandle => "telegram_handle",
            QueryKind::RawHandle => "raw_handle",
            QueryKind::Name => "name",
            QueryKind::EmailDomain => "email_domain",
            QueryKind::Unrecognized => "unrecognized",
        }
    }

    /// Whether this kind can be looked up against the directory at all.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, QueryKind::Unrecognized)
    }
}

/// A classified query: the kind plus the normalized value to match on.
///
/// For [`QueryKind::Name`] the value keeps its original casing (display
/// and fuzzy ranking want it); every other recognized kind carries a
/// lowercased value. For [`QueryKind::Unrecognized`] the value is the
/// stripped input, retained for audit trails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub kind: QueryKind,
    pub value: String,
}

impl Query {
    pub fn new(kind: QueryKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}
