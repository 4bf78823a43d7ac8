use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::pkg::internal::{
    adaptors::jobs::spec::{contact_email, web_url},
    listing::{Kind, Listing, Posting, empty_as_none},
};

pub const ERR_NO_NAME: &str = "Must provide a Name";
pub const ERR_NO_ROLE: &str = "Must provide a Role";
pub const ERR_NO_RESUME: &str = "Must provide a Resume";

/// Someone looking for work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Role {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing)]
    pub email: String,
    #[serde(skip_serializing)]
    pub phone: Option<String>,
    pub role: String,
    pub resume: String,
    pub linkedin: Option<String>,
    pub website: Option<String>,
    pub github: Option<String>,
    pub comp_low: Option<String>,
    pub comp_high: Option<String>,
    pub published_at: DateTime<Utc>,
}

impl Role {
    pub fn published_date(&self) -> String {
        self.published_at.format("%b %-d, %Y").to_string()
    }

    pub fn compensation(&self) -> Option<String> {
        match (self.comp_low.as_deref(), self.comp_high.as_deref()) {
            (Some(low), Some(high)) => Some(format!("{low} - {high}")),
            (Some(low), None) => Some(format!("{low}+")),
            (None, Some(high)) => Some(format!("up to {high}")),
            (None, None) => None,
        }
    }

    pub fn posting(&self) -> Posting {
        Posting {
            kind: Kind::Role,
            id: self.id,
            headline: format!("New role wanted! {} is looking for {}", self.name, self.role),
        }
    }
}

impl Listing for Role {
    const KIND: Kind = Kind::Role;
    type Patch = RolePatch;

    fn id(&self) -> Uuid {
        self.id
    }

    fn email(&self) -> &str {
        &self.email
    }

    fn published_at(&self) -> DateTime<Utc> {
        self.published_at
    }

    fn update(&mut self, patch: RolePatch) {
        self.name = patch.name;
        self.phone = patch.phone;
        self.role = patch.role;
        self.resume = patch.resume;
        self.linkedin = patch.linkedin;
        self.website = patch.website;
        self.github = patch.github;
        self.comp_low = patch.comp_low;
        self.comp_high = patch.comp_high;
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewRole {
    #[serde(default)]
    #[validate(length(min = 1, message = "Must provide a Name"))]
    pub name: String,
    #[serde(default)]
    #[validate(custom(function = "contact_email"))]
    pub email: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub phone: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "Must provide a Role"))]
    pub role: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Must provide a Resume"))]
    pub resume: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(custom(function = "web_url"))]
    pub linkedin: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(custom(function = "web_url"))]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(custom(function = "web_url"))]
    pub github: Option<String>,
    #[serde(default, rename = "complow", deserialize_with = "empty_as_none")]
    pub comp_low: Option<String>,
    #[serde(default, rename = "comphigh", deserialize_with = "empty_as_none")]
    pub comp_high: Option<String>,
}

/// Edits to an existing role; the contact email is fixed at creation.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RolePatch {
    #[serde(default)]
    #[validate(length(min = 1, message = "Must provide a Name"))]
    pub name: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub phone: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "Must provide a Role"))]
    pub role: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Must provide a Resume"))]
    pub resume: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(custom(function = "web_url"))]
    pub linkedin: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(custom(function = "web_url"))]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(custom(function = "web_url"))]
    pub github: Option<String>,
    #[serde(default, rename = "complow", deserialize_with = "empty_as_none")]
    pub comp_low: Option<String>,
    #[serde(default, rename = "comphigh", deserialize_with = "empty_as_none")]
    pub comp_high: Option<String>,
}
