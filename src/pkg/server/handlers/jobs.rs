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
            adaptors::jobs::spec::{Job, JobPatch, NewJob},
            listing::{Kind, Listing, not_found, parse_id},
            markdown,
        },
        server::{
            flash::{Flash, Found},
            middlewares::EditScope,
            state::AppState,
            uispec::{EditJobPage, NewJobPage, ViewJobPage},
        },
    },
    prelude::Result,
};

pub async fn new(jar: SignedCookieJar) -> Result<(SignedCookieJar, Html<String>)> {
    let (jar, flash) = Flash::take(jar);
    Ok((jar, Html(NewJobPage { flash: &flash }.render()?)))
}

pub async fn create(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(input): Form<NewJob>,
) -> Result<(SignedCookieJar, Found)> {
    let secure = state.settings.is_release();
    if let Err(errs) = input.validate() {
        tracing::debug!("rejected job submission: {}", errs);
        return Ok((Flash::invalid(&errs).store(jar, secure), Found::to("/new")));
    }

    let job = match state.store.create_job(&input).await {
        Ok(job) => job,
        Err(_) => {
            let flash = Flash::message("Error creating job");
            return Ok((flash.store(jar, secure), Found::to("/new")));
        }
    };
    tracing::info!("created job {}", job.id);

    notify_created(&state, &job, &job.position, job.posting()).await;
    Ok((Flash::message("Job created!").store(jar, secure), Found::to("/")))
}

pub async fn view(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>> {
    let job = match parse_id(&id) {
        Some(id) => state.store.job(id).await?,
        None => None,
    }
    .ok_or_else(not_found)?;
    let template = ViewJobPage {
        description: markdown::render(job.description_value()),
        job: &job,
        flash: &Flash::default(),
    };
    Ok(Html(template.render()?))
}

/// Edit form for a listing the request was already authorized for.
pub async fn edit(
    Extension(job): Extension<Arc<Job>>,
    Extension(scope): Extension<EditScope>,
    jar: SignedCookieJar,
) -> Result<(SignedCookieJar, Html<String>)> {
    let (jar, flash) = Flash::take(jar);
    let template = EditJobPage {
        job: &job,
        action: scope.update_path(Kind::Job, job.id),
        delete_action: scope.delete_path(Kind::Job, job.id),
        flash: &flash,
    };
    Ok((jar, Html(template.render()?)))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(job): Extension<Arc<Job>>,
    Extension(scope): Extension<EditScope>,
    jar: SignedCookieJar,
    Form(patch): Form<JobPatch>,
) -> Result<(SignedCookieJar, Found)> {
    let secure = state.settings.is_release();
    if let Err(errs) = patch.validate() {
        tracing::debug!("rejected update of job {}: {}", job.id, errs);
        let back = Found::to(scope.edit_path(Kind::Job, job.id));
        return Ok((Flash::invalid(&errs).store(jar, secure), back));
    }

    let mut job = Job::clone(&job);
    job.update(patch);
    if !state.store.save_job(&job).await? {
        return Err(not_found());
    }
    tracing::info!("updated job {}", job.id);
    Ok((
        Flash::message("Job updated!").store(jar, secure),
        Found::to(scope.done_path()),
    ))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(job): Extension<Arc<Job>>,
    Extension(scope): Extension<EditScope>,
    jar: SignedCookieJar,
) -> Result<(SignedCookieJar, Found)> {
    state.store.delete_job(job.id).await?;
    tracing::info!("deleted job {}", job.id);
    Ok((
        Flash::message("Job deleted!").store(jar, state.settings.is_release()),
        Found::to(scope.done_path()),
    ))
}
