use std::sync::Arc;

use askama::Template;
use axum::{
    Extension, Form,
    extract::{Path, State},
    response::Html,
};
use axum_extra::extract::SignedCookieJar;
use validator::Validate;

use super::notify_created;
use crate::{
    pkg::{
        internal::{
            adaptors::roles::spec::{NewRole, Role, RolePatch},
            listing::{Kind, Listing, not_found, parse_id},
            markdown,
        },
        server::{
            flash::{Flash, Found},
            middlewares::EditScope,
            state::AppState,
            uispec::{EditRolePage, NewRolePage, ViewRolePage},
        },
    },
    prelude::Result,
};

pub async fn new(jar: SignedCookieJar) -> Result<(SignedCookieJar, Html<String>)> {
    let (jar, flash) = Flash::take(jar);
    Ok((jar, Html(NewRolePage { flash: &flash }.render()?)))
}

pub async fn create(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(input): Form<NewRole>,
) -> Result<(SignedCookieJar, Found)> {
    let secure = state.settings.is_release();
    if let Err(errs) = input.validate() {
        tracing::debug!("rejected role submission: {}", errs);
        return Ok((Flash::invalid(&errs).store(jar, secure), Found::to("/newrole")));
    }

    let role = match state.store.create_role(&input).await {
        Ok(role) => role,
        Err(_) => {
            let flash = Flash::message("Error creating role");
            return Ok((flash.store(jar, secure), Found::to("/newrole")));
        }
    };
    tracing::info!("created role {}", role.id);

    notify_created(&state, &role, &role.role, role.posting()).await;
    Ok((Flash::message("Role created!").store(jar, secure), Found::to("/")))
}

pub async fn view(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>> {
    let role = match parse_id(&id) {
        Some(id) => state.store.role(id).await?,
        None => None,
    }
    .ok_or_else(not_found)?;
    let template = ViewRolePage {
        resume: markdown::render(&role.resume),
        role: &role,
        flash: &Flash::default(),
    };
    Ok(Html(template.render()?))
}

pub async fn edit(
    Extension(role): Extension<Arc<Role>>,
    Extension(scope): Extension<EditScope>,
    jar: SignedCookieJar,
) -> Result<(SignedCookieJar, Html<String>)> {
    let (jar, flash) = Flash::take(jar);
    let template = EditRolePage {
        role: &role,
        action: scope.update_path(Kind::Role, role.id),
        delete_action: scope.delete_path(Kind::Role, role.id),
        flash: &flash,
    };
    Ok((jar, Html(template.render()?)))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(role): Extension<Arc<Role>>,
    Extension(scope): Extension<EditScope>,
    jar: SignedCookieJar,
    Form(patch): Form<RolePatch>,
) -> Result<(SignedCookieJar, Found)> {
    let secure = state.settings.is_release();
    if let Err(errs) = patch.validate() {
        tracing::debug!("rejected update of role {}: {}", role.id, errs);
        let back = Found::to(scope.edit_path(Kind::Role, role.id));
        return Ok((Flash::invalid(&errs).store(jar, secure), back));
    }

    let mut role = Role::clone(&role);
    role.update(patch);
    if !state.store.save_role(&role).await? {
        return Err(not_found());
    }
    tracing::info!("updated role {}", role.id);
    Ok((
        Flash::message("Role updated!").store(jar, secure),
        Found::to(scope.done_path()),
    ))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(role): Extension<Arc<Role>>,
    Extension(scope): Extension<EditScope>,
    jar: SignedCookieJar,
) -> Result<(SignedCookieJar, Found)> {
    state.store.delete_role(role.id).await?;
    tracing::info!("deleted role {}", role.id);
    Ok((
        Flash::message("Role deleted!").store(jar, state.settings.is_release()),
        Found::to(scope.done_path()),
    ))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use tracing_test::traced_test;

    use crate::pkg::{
        internal::{
            adaptors::{
                ListingStore,
                roles::spec::{ERR_NO_RESUME, ERR_NO_ROLE},
            },
            signature::sign,
        },
        testutil::{Harness, body_text, flash_cookie, form_post, get, location, with_cookie},
    };

    const ROLE_FORM: &str = "name=Foo+Bar&email=foo%40bar.com&phone=316-555-5555&role=backend&resume=%23+hi%0A%0Ahire+me&linkedin=&website=https%3A%2F%2Fexample.com&github=&complow=10k&comphigh=";

    #[tokio::test]
    #[traced_test]
    async fn test_create_and_edit_role() {
        let h = Harness::new();
        let res = h.send(form_post("/roles", ROLE_FORM)).await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res), "/");

        let roles = h.store.roles().await.unwrap();
        assert_eq!(roles.len(), 1);
        let role = roles[0].clone();
        assert_eq!(role.linkedin, None);
        assert_eq!(role.comp_low.as_deref(), Some("10k"));
        assert_eq!(role.comp_high, None);

        let sent = h.notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "foo@bar.com");
        assert_eq!(sent[0].1, "Role Created!");
        assert!(sent[0].2.contains(&format!("/roles/{}/edit?token=", role.id)));

        let res = h.send(get(&format!("/roles/{}", role.id))).await;
        let body = body_text(res).await;
        assert!(body.contains("<h1>hi</h1>"));
        assert!(!body.contains("316-555-5555"));

        let token = urlencoding::encode(&sign(&role, &h.state.settings.app_secret)).into_owned();
        let res = h
            .send(form_post(
                &format!("/roles/{}?token={}", role.id, token),
                "name=Foo+Bar&role=&resume=",
            ))
            .await;
        assert_eq!(location(&res), format!("/roles/{}/edit?token={}", role.id, token));
        let cookie = flash_cookie(&res).expect("flash cookie");
        let body = body_text(h.send(with_cookie(get(&location(&res)), &cookie)).await).await;
        assert!(body.contains(ERR_NO_ROLE));
        assert!(body.contains(ERR_NO_RESUME));

        let res = h
            .send(form_post(
                &format!("/roles/{}?token={}", role.id, token),
                "name=Foo+Bar&role=frontend&resume=still+me",
            ))
            .await;
        assert_eq!(location(&res), "/");
        let stored = h.store.role(role.id).await.unwrap().unwrap();
        assert_eq!(stored.role, "frontend");
        assert_eq!(stored.email, "foo@bar.com");
        assert_eq!(stored.phone, None);
    }

    #[tokio::test]
    #[traced_test]
    async fn test_create_invalid_role() {
        let h = Harness::new();
        let res = h.send(form_post("/roles", "name=&email=nope")).await;
        assert_eq!(location(&res), "/newrole");
        assert_eq!(h.store.writes(), 0);
        assert!(h.announcer.posted().is_empty());
    }
}
