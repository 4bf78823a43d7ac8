pub mod flash;
pub mod handlers;
pub mod middlewares;
pub mod router;
pub mod state;
pub mod uispec;

use std::sync::Arc;

use crate::{conf::Settings, pkg::internal::sweeper, prelude::Result};
use router::build_routes;
use state::AppState;

pub async fn listen(settings: Arc<Settings>) -> Result<()> {
    let state = AppState::new(settings.clone())?;
    let sweeper = sweeper::spawn(
        state.store.clone(),
        settings.retention(),
        settings.sweep_interval(),
    );
    let listener =
        tokio::net::TcpListener::bind(format!("0.0.0.0:{}", settings.listen_port)).await?;
    tracing::info!("Listening at port {}", settings.listen_port);
    tokio::select! {
        r = axum::serve(listener, build_routes(state)) => {
            tracing::warn!("server ended unexpectedly: {:?}", &r)
        },
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("received ctrl+c interrupt, closing server");
        }
    }
    sweeper.abort();
    Ok(())
}
