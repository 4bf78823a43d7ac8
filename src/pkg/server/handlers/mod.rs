pub mod admin;
pub mod api;
pub mod jobs;
pub mod probes;
pub mod roles;
pub mod ui;

use askama::Template;

use crate::pkg::{
    internal::{
        email::created::ListingCreated,
        listing::{Listing, Posting},
        signature::signed_edit_route,
    },
    server::state::AppState,
};

/// Hands the submitter their edit link and announces the posting.
/// Delivery problems are logged; the listing already exists either way.
pub(crate) async fn notify_created<L: Listing>(state: &AppState, listing: &L, title: &str, posting: Posting) {
    if let Some(notifier) = &state.notifier {
        let edit_url = signed_edit_route(listing, &state.settings.app_url, &state.settings.app_secret);
        let mail = ListingCreated {
            kind: L::KIND,
            title,
            edit_url: &edit_url,
        };
        let sent = match mail.render() {
            Ok(body) => notifier.notify(listing.email(), &mail.subject(), &body).await,
            Err(e) => Err(e.into()),
        };
        if let Err(e) = sent {
            tracing::error!("failed to email edit link for {} {}: {:?}", L::KIND, listing.id(), e);
        }
    }
    for announcer in &state.announcers {
        if let Err(e) = announcer.post(&posting).await {
            tracing::error!("failed to announce {} {}: {:?}", L::KIND, listing.id(), e);
        }
    }
}
