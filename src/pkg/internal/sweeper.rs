use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;

use crate::{
    pkg::internal::adaptors::{ListingStore, SharedStore},
    prelude::Result,
};

/// One retention pass: drops every listing published before `now - retention`.
pub async fn sweep_once(
    store: &dyn ListingStore,
    retention: chrono::Duration,
    now: DateTime<Utc>,
) -> Result<u64> {
    let cutoff = now - retention;
    let purged = store.purge_published_before(cutoff).await?;
    if purged > 0 {
        tracing::info!("purged {} listings published before {}", purged, cutoff);
    } else {
        tracing::debug!("no listings older than {}", cutoff);
    }
    Ok(purged)
}

/// Runs a pass immediately and then once per `interval` until the process exits.
/// A failed pass is logged and retried on the next tick.
pub fn spawn(store: SharedStore, retention: chrono::Duration, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            if let Err(e) = sweep_once(store.as_ref(), retention, Utc::now()).await {
                tracing::error!("error clearing old listings: {:?}", e);
            }
        }
    })
}
