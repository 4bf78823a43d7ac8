use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{
        Request, Response,
        header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
    },
};
use tower::ServiceExt;

use crate::{
    conf::Settings,
    pkg::{
        internal::{
            adaptors::memory::MemoryStore, email::Notifier, listing::Posting, slack::Announcer,
        },
        server::{router::build_routes, state::AppState},
    },
    prelude::Result,
};

#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(String, String, String)>>,
}

impl RecordingNotifier {
    /// (recipient, subject, body) per message, oldest first.
    pub fn sent(&self) -> Vec<(String, String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, recipient: &str, subject: &str, body: &str) -> Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((recipient.into(), subject.into(), body.into()));
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingAnnouncer {
    posted: Mutex<Vec<Posting>>,
}

impl RecordingAnnouncer {
    pub fn posted(&self) -> Vec<Posting> {
        self.posted.lock().unwrap().clone()
    }
}

#[async_trait]
impl Announcer for RecordingAnnouncer {
    async fn post(&self, posting: &Posting) -> Result<()> {
        self.posted.lock().unwrap().push(posting.clone());
        Ok(())
    }
}

/// The full router over an in-memory store with recording integrations.
pub struct Harness {
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub announcer: Arc<RecordingAnnouncer>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_settings(Settings::for_tests())
    }

    pub fn with_settings(settings: Settings) -> Self {
        let store = Arc::new(MemoryStore::new());
        let notifier = Arc::new(RecordingNotifier::default());
        let announcer = Arc::new(RecordingAnnouncer::default());
        let mut state = AppState::with_store(Arc::new(settings), store.clone());
        state.notifier = Some(notifier.clone());
        state.announcers.push(announcer.clone());
        Harness {
            state,
            store,
            notifier,
            announcer,
        }
    }

    pub fn router(&self) -> Router {
        build_routes(self.state.clone())
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router().oneshot(request).await.unwrap()
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

pub fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn with_cookie(mut request: Request<Body>, cookie: &str) -> Request<Body> {
    request
        .headers_mut()
        .insert(COOKIE, cookie.parse().unwrap());
    request
}

pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(LOCATION)
        .map(|v| v.to_str().unwrap().to_string())
        .unwrap_or_default()
}

/// `flash=...` pair from the response, ready to send back as a cookie.
pub fn flash_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter(|v| v.starts_with("flash="))
        .filter_map(|v| v.split(';').next())
        .map(str::to_string)
        .next()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
