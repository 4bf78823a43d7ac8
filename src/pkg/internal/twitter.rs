//! Tweets new postings through the v2 API, signed with OAuth 1.0a (HMAC-SHA1).

use async_trait::async_trait;
use axum::http::header::AUTHORIZATION;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde_json::json;
use sha1::Sha1;
use standard_error::{Interpolate, StandardError};
use uuid::Uuid;

use crate::{
    conf::{Secret, Settings},
    pkg::internal::{listing::Posting, slack::Announcer},
    prelude::Result,
};

const TWEETS_ENDPOINT: &str = "https://api.twitter.com/2/tweets";

type HmacSha1 = Hmac<Sha1>;

fn twitter_err(e: impl ToString) -> StandardError {
    StandardError::new("ERR-TWITTER-000").interpolate_err(e.to_string())
}

pub struct TwitterClient {
    client: reqwest::Client,
    api_key: String,
    api_secret_key: Secret,
    access_token: String,
    access_token_secret: Secret,
    base_url: String,
}

impl TwitterClient {
    pub fn from_settings(settings: &Settings) -> Option<Self> {
        let creds = settings.twitter()?;
        Some(TwitterClient {
            client: reqwest::Client::new(),
            api_key: creds.api_key.to_string(),
            api_secret_key: creds.api_secret_key.clone(),
            access_token: creds.access_token.to_string(),
            access_token_secret: creds.access_token_secret.clone(),
            base_url: settings.app_url.clone(),
        })
    }

    fn status(&self, posting: &Posting) -> String {
        format!("{}\n{}{}", posting.headline, self.base_url, posting.path())
    }

    /// `Authorization` header value for one request. A JSON body is not part
    /// of the signature, only the oauth parameters are.
    fn authorization(&self, method: &str, url: &str, nonce: &str, timestamp: i64) -> String {
        let timestamp = timestamp.to_string();
        let mut params = vec![
            ("oauth_consumer_key", self.api_key.as_str()),
            ("oauth_nonce", nonce),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", timestamp.as_str()),
            ("oauth_token", self.access_token.as_str()),
            ("oauth_version", "1.0"),
        ];
        let signature = signature(
            method,
            url,
            &params,
            &self.api_secret_key,
            &self.access_token_secret,
        );
        params.push(("oauth_signature", signature.as_str()));
        params.sort();
        let fields: Vec<String> = params
            .iter()
            .map(|(k, v)| format!(r#"{}="{}""#, urlencoding::encode(k), urlencoding::encode(v)))
            .collect();
        format!("OAuth {}", fields.join(", "))
    }
}

/// RFC 5849 §3.4.1 base string, signed with `consumer_secret&token_secret`.
fn signature(
    method: &str,
    url: &str,
    params: &[(&str, &str)],
    consumer_secret: &Secret,
    token_secret: &Secret,
) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (urlencoding::encode(k).into_owned(), urlencoding::encode(v).into_owned()))
        .collect();
    encoded.sort();
    let param_string = encoded
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");
    let base = format!(
        "{}&{}&{}",
        method.to_uppercase(),
        urlencoding::encode(url),
        urlencoding::encode(&param_string)
    );
    let key = format!(
        "{}&{}",
        urlencoding::encode(consumer_secret.expose_str()),
        urlencoding::encode(token_secret.expose_str())
    );
    let mut mac =
        HmacSha1::new_from_slice(key.as_bytes()).expect("hmac accepts keys of any length");
    mac.update(base.as_bytes());
    STANDARD.encode(mac.finalize().into_bytes())
}

#[async_trait]
impl Announcer for TwitterClient {
    async fn post(&self, posting: &Posting) -> Result<()> {
        let nonce = Uuid::new_v4().simple().to_string();
        let auth = self.authorization("POST", TWEETS_ENDPOINT, &nonce, Utc::now().timestamp());
        self.client
            .post(TWEETS_ENDPOINT)
            .header(AUTHORIZATION, auth)
            .json(&json!({ "text": self.status(posting) }))
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(twitter_err)?;
        tracing::debug!("tweeted {} {}", posting.kind, posting.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pkg::internal::listing::Kind;

    #[test]
    fn test_signature_matches_reference_request() {
        let params = [
            ("status", "Hello Ladies + Gentlemen, a signed OAuth request!"),
            ("include_entities", "true"),
            ("oauth_consumer_key", "xvz1evFS4wEEPTGEFPHBog"),
            ("oauth_nonce", "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg"),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", "1318622958"),
            ("oauth_token", "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb"),
            ("oauth_version", "1.0"),
        ];
        let sig = signature(
            "post",
            "https://api.twitter.com/1.1/statuses/update.json",
            &params,
            &Secret::new("kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw"),
            &Secret::new("LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE"),
        );
        assert_eq!(sig, "hCtSmYh+iHYCEqBWrE7C7hYmtUk=");
    }

    #[test]
    fn test_tweet_links_listing() {
        let mut settings = Settings::for_tests();
        assert!(TwitterClient::from_settings(&settings).is_none());
        settings.tw_api_key = Some("key".into());
        settings.tw_api_secret_key = Some(Secret::new("secret"));
        settings.tw_access_token = Some("token".into());
        settings.tw_access_token_secret = Some(Secret::new("token-secret"));
        let client = TwitterClient::from_settings(&settings).unwrap();

        let id = Uuid::new_v4();
        let status = client.status(&Posting {
            kind: Kind::Role,
            id,
            headline: "New role wanted! Foo is looking for any".into(),
        });
        assert!(status.starts_with("New role wanted! Foo is looking for any\n"));
        assert!(status.ends_with(&format!("http://localhost:8080/roles/{id}")));

        let auth = client.authorization("POST", TWEETS_ENDPOINT, "abc", 1318622958);
        assert!(auth.starts_with("OAuth "));
        assert!(auth.contains(r#"oauth_consumer_key="key""#));
        assert!(auth.contains(r#"oauth_nonce="abc""#));
        assert!(auth.contains(r#"oauth_timestamp="1318622958""#));
        assert!(auth.contains("oauth_signature=\""));
        assert!(!auth.contains("token-secret"));
    }
}
