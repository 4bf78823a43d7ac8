use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::{pkg::server::state::AppState, prelude::Result};

/// Contact details never leave through the feed.
pub async fn jobs(State(state): State<AppState>) -> Result<Json<Value>> {
    let jobs = state.store.jobs().await?;
    Ok(Json(json!({ "items": jobs })))
}

pub async fn roles(State(state): State<AppState>) -> Result<Json<Value>> {
    let roles = state.store.roles().await?;
    Ok(Json(json!({ "items": roles })))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use chrono::Utc;
    use tracing_test::traced_test;
    use uuid::Uuid;

    use crate::pkg::{
        internal::adaptors::jobs::spec::Job,
        testutil::{Harness, body_text, get},
    };

    #[tokio::test]
    #[traced_test]
    async fn test_jobs_feed_hides_email() {
        let h = Harness::new();
        let id = Uuid::new_v4();
        h.store
            .insert_job(Job {
                id,
                position: "Pos".into(),
                organization: "Org".into(),
                url: None,
                description: Some("desc".into()),
                email: "secret@b.com".into(),
                published_at: Utc::now(),
            })
            .await;
        let res = h.send(get("/api/jobs")).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_str(&body_text(res).await).unwrap();
        let items = body["items"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["id"], id.to_string());
        assert_eq!(items[0]["position"], "Pos");
        assert!(items[0].get("email").is_none());

        let res = h.send(get("/api/roles")).await;
        let body: serde_json::Value = serde_json::from_str(&body_text(res).await).unwrap();
        assert!(body["items"].as_array().unwrap().is_empty());
    }
}
