use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header::{AUTHORIZATION, WWW_AUTHENTICATE}},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use subtle::ConstantTimeEq;

use crate::pkg::server::state::AppState;

fn credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let encoded = headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Basic ")?;
    let decoded = String::from_utf8(STANDARD.decode(encoded.trim()).ok()?).ok()?;
    let (user, password) = decoded.split_once(':')?;
    Some((user.to_string(), password.to_string()))
}

fn matches(user: &str, password: &str, expected_user: &str, expected_password: &str) -> bool {
    let user_ok = user.as_bytes().ct_eq(expected_user.as_bytes());
    let password_ok = password.as_bytes().ct_eq(expected_password.as_bytes());
    (user_ok & password_ok).into()
}

/// HTTP basic auth in front of the moderation panel.
pub async fn require_admin(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Response {
    let admitted = match (state.settings.admin(), credentials(&headers)) {
        (Some((expected_user, expected_password)), Some((user, password))) => {
            matches(&user, &password, expected_user, expected_password)
        }
        _ => false,
    };
    if !admitted {
        tracing::warn!("admin authentication denied");
        return (
            StatusCode::UNAUTHORIZED,
            [(WWW_AUTHENTICATE, r#"Basic realm="admin""#)],
        )
            .into_response();
    }
    next.run(request).await
}
