use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State, rejection::QueryRejection},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use serde::Deserialize;
use standard_error::{StandardError, Status};

use super::EditScope;
use crate::{
    conf::Secret,
    pkg::{
        internal::{
            listing::{Listing, not_found, parse_id},
            signature,
        },
        server::state::AppState,
    },
    prelude::Result,
};

#[derive(Debug, Deserialize)]
pub struct TokenQuery {
    #[serde(default)]
    pub token: String,
}

pub fn forbidden() -> StandardError {
    StandardError::new("ERR-TOKEN-403").code(StatusCode::FORBIDDEN)
}

/// Unknown ids are a 404 before any token is looked at; a wrong or missing
/// token on a real listing is always a 403.
pub fn authorize<L: Listing>(found: Option<L>, secret: &Secret, token: &str) -> Result<L> {
    let Some(listing) = found else {
        tracing::debug!("no {} to authorize", L::KIND);
        return Err(not_found());
    };
    if !signature::verify(&listing, secret, token) {
        tracing::warn!("edit token rejected for {} {}", L::KIND, listing.id());
        return Err(forbidden());
    }
    Ok(listing)
}

/// A query string that doesn't deserialize (say `token` given twice) carries no token.
fn token_of(query: core::result::Result<Query<TokenQuery>, QueryRejection>) -> String {
    match query {
        Ok(Query(query)) => query.token,
        Err(e) => {
            tracing::debug!("unreadable edit query: {}", e);
            String::new()
        }
    }
}

fn admit<L: Listing>(mut request: Request, listing: L, scope: EditScope) -> Request {
    request.extensions_mut().insert(Arc::new(listing));
    request.extensions_mut().insert(scope);
    request
}

pub async fn job_token(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: core::result::Result<Query<TokenQuery>, QueryRejection>,
    request: Request,
    next: Next,
) -> Result<Response> {
    let token = token_of(query);
    let found = match parse_id(&id) {
        Some(id) => state.store.job(id).await?,
        None => None,
    };
    let job = authorize(found, &state.settings.app_secret, &token)?;
    let scope = EditScope::Signed { token };
    Ok(next.run(admit(request, job, scope)).await)
}

pub async fn role_token(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: core::result::Result<Query<TokenQuery>, QueryRejection>,
    request: Request,
    next: Next,
) -> Result<Response> {
    let token = token_of(query);
    let found = match parse_id(&id) {
        Some(id) => state.store.role(id).await?,
        None => None,
    };
    let role = authorize(found, &state.settings.app_secret, &token)?;
    let scope = EditScope::Signed { token };
    Ok(next.run(admit(request, role, scope)).await)
}

/// Admin routes resolve the listing the same way, minus the token.
pub async fn admin_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Request,
    next: Next,
) -> Result<Response> {
    let job = match parse_id(&id) {
        Some(id) => state.store.job(id).await?,
        None => None,
    }
    .ok_or_else(not_found)?;
    Ok(next.run(admit(request, job, EditScope::Admin)).await)
}

pub async fn admin_role(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Request,
    next: Next,
) -> Result<Response> {
    let role = match parse_id(&id) {
        Some(id) => state.store.role(id).await?,
        None => None,
    }
    .ok_or_else(not_found)?;
    Ok(next.run(admit(request, role, EditScope::Admin)).await)
}
