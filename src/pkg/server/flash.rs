use std::collections::BTreeMap;

use axum::{
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};
use axum_extra::extract::{
    SignedCookieJar,
    cookie::{Cookie, SameSite},
};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::{Deserialize, Serialize};
use validator::ValidationErrors;

const FLASH_COOKIE: &str = "flash";

/// One-shot messages shown on the page a redirect lands on.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub messages: Vec<String>,
    pub errors: BTreeMap<String, String>,
}

impl Flash {
    pub fn message(message: impl Into<String>) -> Self {
        Flash {
            messages: vec![message.into()],
            errors: BTreeMap::new(),
        }
    }

    /// First message per field. Cross-field rules are reported against the url input.
    pub fn invalid(errs: &ValidationErrors) -> Self {
        let mut errors = BTreeMap::new();
        for (field, list) in errs.field_errors() {
            let field = match field.to_string() {
                f if f == "__all__" => "url".to_string(),
                f => f,
            };
            if let Some(err) = list.first() {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                errors.entry(field).or_insert(message);
            }
        }
        Flash {
            messages: Vec::new(),
            errors,
        }
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.errors.is_empty()
    }

    pub fn store(self, jar: SignedCookieJar, secure: bool) -> SignedCookieJar {
        let payload = match serde_json::to_vec(&self) {
            Ok(raw) => URL_SAFE_NO_PAD.encode(raw),
            Err(e) => {
                tracing::error!("failed to encode flash: {}", e);
                return jar;
            }
        };
        jar.add(
            Cookie::build((FLASH_COOKIE, payload))
                .path("/")
                .http_only(true)
                .secure(secure)
                .same_site(SameSite::Strict),
        )
    }

    /// Reads and clears the pending flash. Tampered or garbled cookies read as empty.
    pub fn take(jar: SignedCookieJar) -> (SignedCookieJar, Flash) {
        let Some(cookie) = jar.get(FLASH_COOKIE) else {
            return (jar, Flash::default());
        };
        let flash = URL_SAFE_NO_PAD
            .decode(cookie.value())
            .ok()
            .and_then(|raw| serde_json::from_slice(&raw).ok())
            .unwrap_or_default();
        (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), flash)
    }
}

/// `302 Found`, the redirect browsers follow with a GET after a form post.
pub struct Found(String);

impl Found {
    pub fn to(location: impl Into<String>) -> Self {
        Found(location.into())
    }
}

impl IntoResponse for Found {
    fn into_response(self) -> Response {
        (StatusCode::FOUND, [(LOCATION, self.0)]).into_response()
    }
}
