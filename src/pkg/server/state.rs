use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};

use crate::{
    conf::Settings,
    pkg::internal::{
        adaptors::{PgStore, SharedStore},
        email::{Mailer, Notifier},
        slack::{Announcer, SlackHook},
        twitter::TwitterClient,
    },
    prelude::Result,
};

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub store: SharedStore,
    pub notifier: Option<Arc<dyn Notifier>>,
    /// Every broadcast channel that is configured.
    pub announcers: Vec<Arc<dyn Announcer>>,
    pub cookie_key: Key,
}

impl AppState {
    pub fn new(settings: Arc<Settings>) -> Result<AppState> {
        let store = Arc::new(PgStore::connect_lazy(&settings)?);
        let mut state = AppState::with_store(settings.clone(), store);
        if let Some(mailer) = Mailer::from_settings(&settings)? {
            state.notifier = Some(Arc::new(mailer));
        } else {
            tracing::warn!("smtp not configured, edit links will not be emailed");
        }
        if let Some(hook) = SlackHook::from_settings(&settings) {
            state.announcers.push(Arc::new(hook));
        }
        if let Some(twitter) = TwitterClient::from_settings(&settings) {
            state.announcers.push(Arc::new(twitter));
        }
        tracing::debug!("{} announcement channels configured", state.announcers.len());
        Ok(state)
    }

    /// State without any outbound integrations.
    pub fn with_store(settings: Arc<Settings>, store: SharedStore) -> AppState {
        // Key needs 64 bytes of material
        let cookie_key = Key::from(Sha512::digest(settings.app_secret.expose()).as_slice());
        AppState {
            settings,
            store,
            notifier: None,
            announcers: Vec::new(),
            cookie_key,
        }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}
