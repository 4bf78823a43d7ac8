//! Capability tokens for editing a single listing.
//!
//! A token is `base64url(HMAC-SHA256(secret, "{id}:{email}:{published_at}"))`.
//! Nothing is stored server side: a token stays valid for as long as the secret
//! and the listing's identity fields do, and the identity fields never change.

use base64::{Engine as _, engine::general_purpose::URL_SAFE};
use chrono::SecondsFormat;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::conf::Secret;

use super::listing::Listing;

type HmacSha256 = Hmac<Sha256>;

fn canonical<L: Listing>(listing: &L) -> String {
    format!(
        "{}:{}:{}",
        listing.id(),
        listing.email(),
        listing
            .published_at()
            .to_rfc3339_opts(SecondsFormat::Nanos, true)
    )
}

pub fn sign<L: Listing>(listing: &L, secret: &Secret) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.expose()).expect("hmac accepts keys of any length");
    mac.update(canonical(listing).as_bytes());
    URL_SAFE.encode(mac.finalize().into_bytes())
}

pub fn verify<L: Listing>(listing: &L, secret: &Secret, candidate: &str) -> bool {
    let expected = sign(listing, secret);
    expected.as_bytes().ct_eq(candidate.as_bytes()).into()
}

/// The one durable link a submitter gets for editing their listing.
pub fn signed_edit_route<L: Listing>(listing: &L, base_url: &str, secret: &Secret) -> String {
    format!(
        "{}/{}/{}/edit?token={}",
        base_url.trim_end_matches('/'),
        L::KIND.collection(),
        listing.id(),
        urlencoding::encode(&sign(listing, secret))
    )
}
