use async_trait::async_trait;
use serde_json::json;
use standard_error::{Interpolate, StandardError};

use crate::{conf::Settings, pkg::internal::listing::Posting, prelude::Result};

/// Broadcasts new postings to a public channel.
#[async_trait]
pub trait Announcer: Send + Sync {
    async fn post(&self, posting: &Posting) -> Result<()>;
}

/// Incoming-webhook integration.
pub struct SlackHook {
    client: reqwest::Client,
    hook: String,
    base_url: String,
}

impl SlackHook {
    pub fn from_settings(settings: &Settings) -> Option<Self> {
        let hook = settings.slack_hook.clone()?;
        Some(SlackHook {
            client: reqwest::Client::new(),
            hook,
            base_url: settings.app_url.clone(),
        })
    }

    fn message(&self, posting: &Posting) -> serde_json::Value {
        json!({
            "text": format!("{}\n{}{}", posting.headline, self.base_url, posting.path()),
        })
    }
}

#[async_trait]
impl Announcer for SlackHook {
    async fn post(&self, posting: &Posting) -> Result<()> {
        self.client
            .post(&self.hook)
            .json(&self.message(posting))
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(|e| StandardError::new("ERR-SLACK-000").interpolate_err(e.to_string()))?;
        tracing::debug!("posted {} {} to slack", posting.kind, posting.id);
        Ok(())
    }
}
