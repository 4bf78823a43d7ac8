use axum::middleware::from_fn_with_state;
use axum::routing::post;
use axum::{Router, routing::get};

use super::handlers::probes::{healthz, livez};
use super::handlers::{self, api, jobs, roles, ui};
use super::middlewares::{admin, signed};
use super::state::AppState;

pub fn build_routes(state: AppState) -> Router {
    let signed_jobs = Router::new()
        .route("/jobs/:id/edit", get(jobs::edit))
        .route("/jobs/:id", post(jobs::update))
        .route("/jobs/:id/delete", post(jobs::delete))
        .route_layer(from_fn_with_state(state.clone(), signed::job_token));
    let signed_roles = Router::new()
        .route("/roles/:id/edit", get(roles::edit))
        .route("/roles/:id", post(roles::update))
        .route("/roles/:id/delete", post(roles::delete))
        .route_layer(from_fn_with_state(state.clone(), signed::role_token));

    let mut app = Router::new()
        .route("/", get(ui::index))
        .route("/about", get(ui::about))
        .route("/new", get(jobs::new))
        .route("/jobs", post(jobs::create))
        .route("/jobs/:id", get(jobs::view))
        .route("/newrole", get(roles::new))
        .route("/roles", post(roles::create))
        .route("/roles/:id", get(roles::view))
        .route("/api/jobs", get(api::jobs))
        .route("/api/roles", get(api::roles))
        .merge(signed_jobs)
        .merge(signed_roles);

    if state.settings.admin().is_some() {
        let admin_jobs = Router::new()
            .route("/admin/jobs/:id/edit", get(jobs::edit))
            .route("/admin/jobs/:id", post(jobs::update))
            .route("/admin/jobs/:id/delete", post(jobs::delete))
            .route_layer(from_fn_with_state(state.clone(), signed::admin_job));
        let admin_roles = Router::new()
            .route("/admin/roles/:id/edit", get(roles::edit))
            .route("/admin/roles/:id", post(roles::update))
            .route("/admin/roles/:id/delete", post(roles::delete))
            .route_layer(from_fn_with_state(state.clone(), signed::admin_role));
        let panel = Router::new()
            .route("/admin", get(handlers::admin::index))
            .merge(admin_jobs)
            .merge(admin_roles)
            .route_layer(from_fn_with_state(state.clone(), admin::require_admin));
        app = app.merge(panel);
    } else {
        tracing::info!("admin credentials not set, admin panel disabled");
    }

    app.route("/healthz", get(healthz))
        .route("/livez", get(livez))
        .with_state(state)
}
