use askama::Template;
use axum::{extract::State, response::Html};
use axum_extra::extract::SignedCookieJar;

use crate::{
    pkg::server::{flash::Flash, state::AppState, uispec::AdminPage},
    prelude::Result,
};

pub async fn index(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<(SignedCookieJar, Html<String>)> {
    let jobs = state.store.jobs().await?;
    let roles = state.store.roles().await?;
    let (jar, flash) = Flash::take(jar);
    let template = AdminPage {
        jobs: &jobs,
        roles: &roles,
        flash: &flash,
    };
    Ok((jar, Html(template.render()?)))
}
