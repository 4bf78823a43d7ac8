use askama::Template;
use axum::{extract::State, response::Html};
use axum_extra::extract::SignedCookieJar;

use crate::{
    pkg::server::{
        flash::Flash,
        state::AppState,
        uispec::{About, Index},
    },
    prelude::Result,
};

pub async fn index(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<(SignedCookieJar, Html<String>)> {
    let jobs = state.store.jobs().await?;
    let roles = state.store.roles().await?;
    tracing::debug!("listing {} jobs and {} roles", jobs.len(), roles.len());
    let (jar, flash) = Flash::take(jar);
    let template = Index {
        jobs: &jobs,
        roles: &roles,
        flash: &flash,
    };
    Ok((jar, Html(template.render()?)))
}

pub async fn about() -> Result<Html<String>> {
    let template = About {
        flash: &Flash::default(),
    };
    Ok(Html(template.render()?))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use tracing_test::traced_test;

    use crate::pkg::testutil::{Harness, body_text, get};

    #[tokio::test]
    #[traced_test]
    async fn test_empty_index() {
        let h = Harness::new();
        let res = h.send(get("/")).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(body_text(res).await.contains("No jobs posted right now"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_index_storage_failure() {
        let h = Harness::new();
        h.store.fail(true);
        let res = h.send(get("/")).await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_text(res).await;
        assert!(!body.contains("memory store"));
        assert!(logs_contain("storage failure"));
    }

    #[tokio::test]
    async fn test_about() {
        let h = Harness::new();
        let res = h.send(get("/about")).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(body_text(res).await.contains("30 days"));
    }
}
