use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidateEmail, ValidationError};

use crate::pkg::internal::listing::{Kind, Listing, Posting, empty_as_none, rejection};

pub const ERR_NO_POSITION: &str = "Must provide a Position";
pub const ERR_NO_ORGANIZATION: &str = "Must provide a Organization";
pub const ERR_NO_EMAIL: &str = "Must provide an Email Address";
pub const ERR_INVALID_URL: &str = "Must provide a valid Url";
pub const ERR_INVALID_EMAIL: &str = "Must provide a valid Email";
pub const ERR_NO_URL_OR_DESCRIPTION: &str = "Must provide either a Url or a Description";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Job {
    pub id: Uuid,
    pub position: String,
    pub organization: String,
    pub url: Option<String>,
    pub description: Option<String>,
    #[serde(skip_serializing)]
    pub email: String,
    pub published_at: DateTime<Utc>,
}

impl Job {
    pub fn published_date(&self) -> String {
        self.published_at.format("%b %-d, %Y").to_string()
    }

    pub fn url_value(&self) -> &str {
        self.url.as_deref().unwrap_or_default()
    }

    pub fn description_value(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    pub fn posting(&self) -> Posting {
        Posting {
            kind: Kind::Job,
            id: self.id,
            headline: format!("New job posted! {} at {}", self.position, self.organization),
        }
    }
}

impl Listing for Job {
    const KIND: Kind = Kind::Job;
    type Patch = JobPatch;

    fn id(&self) -> Uuid {
        self.id
    }

    fn email(&self) -> &str {
        &self.email
    }

    fn published_at(&self) -> DateTime<Utc> {
        self.published_at
    }

    fn update(&mut self, patch: JobPatch) {
        self.position = patch.position;
        self.organization = patch.organization;
        self.url = patch.url;
        self.description = patch.description;
    }
}

/// Submission of a new job from the public form.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[validate(schema(function = "new_job_has_details", skip_on_field_errors = false))]
pub struct NewJob {
    #[serde(default)]
    #[validate(length(min = 1, message = "Must provide a Position"))]
    pub position: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Must provide a Organization"))]
    pub organization: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(custom(function = "web_url"))]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub description: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "contact_email"))]
    pub email: String,
}

/// Edits to an existing job. Identity fields have no place here.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[validate(schema(function = "patch_has_details", skip_on_field_errors = false))]
pub struct JobPatch {
    #[serde(default)]
    #[validate(length(min = 1, message = "Must provide a Position"))]
    pub position: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Must provide a Organization"))]
    pub organization: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(custom(function = "web_url"))]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub description: Option<String>,
}

fn url_or_description(url: &Option<String>, description: &Option<String>) -> Result<(), ValidationError> {
    if url.is_none() && description.is_none() {
        return Err(rejection("url_or_description", ERR_NO_URL_OR_DESCRIPTION));
    }
    Ok(())
}

fn new_job_has_details(job: &NewJob) -> Result<(), ValidationError> {
    url_or_description(&job.url, &job.description)
}

fn patch_has_details(patch: &JobPatch) -> Result<(), ValidationError> {
    url_or_description(&patch.url, &patch.description)
}

/// Links end up as `href`s on public pages, so only absolute http(s) urls pass.
pub(crate) fn web_url(raw: &str) -> Result<(), ValidationError> {
    match reqwest::Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host_str().is_some() => Ok(()),
        _ => Err(rejection("url", ERR_INVALID_URL)),
    }
}

pub(crate) fn contact_email(email: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        return Err(rejection("email", ERR_NO_EMAIL));
    }
    if !email.validate_email() {
        return Err(rejection("email", ERR_INVALID_EMAIL));
    }
    Ok(())
}
