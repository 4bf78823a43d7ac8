use std::borrow::Cow;
use std::fmt;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use standard_error::{StandardError, Status};
use uuid::Uuid;
use validator::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Job,
    Role,
}

impl Kind {
    /// Path segment and table name.
    pub fn collection(&self) -> &'static str {
        match self {
            Kind::Job => "jobs",
            Kind::Role => "roles",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Kind::Job => "Job",
            Kind::Role => "Role",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Job => f.write_str("job"),
            Kind::Role => f.write_str("role"),
        }
    }
}

/// A posted job or role.
///
/// `id`, `email` and `published_at` are fixed at creation and are what edit
/// links are signed over. `update` only ever touches the display fields carried
/// by `Patch`, which has no way to express the identity fields.
pub trait Listing: Clone + Send + Sync + 'static {
    const KIND: Kind;
    type Patch;

    fn id(&self) -> Uuid;
    fn email(&self) -> &str;
    fn published_at(&self) -> DateTime<Utc>;
    fn update(&mut self, patch: Self::Patch);
}

/// Announcement of a freshly created listing, for broadcast channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posting {
    pub kind: Kind,
    pub id: Uuid,
    pub headline: String,
}

impl Posting {
    pub fn path(&self) -> String {
        format!("/{}/{}", self.kind.collection(), self.id)
    }
}

pub fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw).ok()
}

pub fn not_found() -> StandardError {
    StandardError::new("ERR-LISTING-404").code(StatusCode::NOT_FOUND)
}

/// Form inputs arrive as strings; blank means absent.
pub fn empty_as_none<'de, D>(deserializer: D) -> core::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

pub fn rejection(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}
