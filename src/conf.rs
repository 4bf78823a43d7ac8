use std::fmt;
use std::time::Duration;

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

pub const SERVICE_NAME: &str = "Job Board";
const MAX_RETENTION_DAYS: i64 = 3650;

/// Key material for signed edit links and the flash cookie.
///
/// Rotating it invalidates every edit link handed out so far.
#[derive(Deserialize, Clone)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(secret: impl Into<String>) -> Self {
        Secret(secret.into())
    }

    pub fn expose(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn expose_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    pub app_url: String,
    pub listen_port: u16,
    pub app_env: String,
    pub app_secret: Secret,
    pub database_url: String,
    pub database_pool_max_connections: u32,
    //email
    pub smtp_server: Option<String>,
    pub smtp_user: Option<String>,
    pub smtp_pass: Option<String>,
    pub from_email: Option<String>,
    //slack
    pub slack_hook: Option<String>,
    //twitter
    pub tw_api_key: Option<String>,
    pub tw_api_secret_key: Option<Secret>,
    pub tw_access_token: Option<String>,
    pub tw_access_token_secret: Option<Secret>,
    //admin panel
    pub admin_user: Option<String>,
    pub admin_password: Option<String>,
    //retention
    pub retention_days: i64,
    pub sweep_interval_secs: u64,
}

/// OAuth 1.0a user-context credentials for posting tweets.
pub struct TwitterSettings<'a> {
    pub api_key: &'a str,
    pub api_secret_key: &'a Secret,
    pub access_token: &'a str,
    pub access_token_secret: &'a Secret,
}

pub struct SmtpSettings<'a> {
    pub server: &'a str,
    pub user: &'a str,
    pub pass: &'a str,
    pub from_email: &'a str,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let conf = Config::builder()
            .set_default("app_url", "http://localhost:8080")?
            .set_default("listen_port", 8080)?
            .set_default("app_env", "debug")?
            .set_default("database_pool_max_connections", 5)?
            .set_default("retention_days", 30)?
            .set_default("sweep_interval_secs", 3600)?
            .add_source(Environment::default())
            .build()?;
        let mut s: Settings = conf.try_deserialize()?;
        if s.app_secret.is_empty() {
            return Err(ConfigError::Message("APP_SECRET must not be empty".into()));
        }
        s.app_url = s.app_url.trim_end_matches('/').to_string();
        for field in [
            &mut s.smtp_server,
            &mut s.smtp_user,
            &mut s.smtp_pass,
            &mut s.from_email,
            &mut s.slack_hook,
            &mut s.tw_api_key,
            &mut s.tw_access_token,
            &mut s.admin_user,
            &mut s.admin_password,
        ] {
            if field.as_deref().is_some_and(|v| v.trim().is_empty()) {
                *field = None;
            }
        }
        for field in [&mut s.tw_api_secret_key, &mut s.tw_access_token_secret] {
            if field.as_ref().is_some_and(|v| v.expose_str().trim().is_empty()) {
                *field = None;
            }
        }
        s.check_retention()?;
        Ok(s)
    }

    fn check_retention(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_RETENTION_DAYS).contains(&self.retention_days) {
            return Err(ConfigError::Message(format!(
                "RETENTION_DAYS must be between 1 and {}, got {}",
                MAX_RETENTION_DAYS, self.retention_days
            )));
        }
        Ok(())
    }

    pub fn is_release(&self) -> bool {
        self.app_env != "debug"
    }

    pub fn retention(&self) -> chrono::Duration {
        chrono::Duration::days(self.retention_days)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs.max(1))
    }

    /// Email is only wired up when every SMTP setting is present.
    pub fn smtp(&self) -> Option<SmtpSettings<'_>> {
        Some(SmtpSettings {
            server: self.smtp_server.as_deref()?,
            user: self.smtp_user.as_deref()?,
            pass: self.smtp_pass.as_deref()?,
            from_email: self.from_email.as_deref()?,
        })
    }

    /// Tweets go out only when all four credentials are present.
    pub fn twitter(&self) -> Option<TwitterSettings<'_>> {
        Some(TwitterSettings {
            api_key: self.tw_api_key.as_deref()?,
            api_secret_key: self.tw_api_secret_key.as_ref()?,
            access_token: self.tw_access_token.as_deref()?,
            access_token_secret: self.tw_access_token_secret.as_ref()?,
        })
    }

    pub fn admin(&self) -> Option<(&str, &str)> {
        Some((self.admin_user.as_deref()?, self.admin_password.as_deref()?))
    }
}

#[cfg(test)]
impl Settings {
    pub fn for_tests() -> Self {
        Settings {
            app_url: "http://localhost:8080".into(),
            listen_port: 8080,
            app_env: "debug".into(),
            app_secret: Secret::new("not-so-secret"),
            database_url: "postgres://localhost/jobboard_test".into(),
            database_pool_max_connections: 1,
            smtp_server: None,
            smtp_user: None,
            smtp_pass: None,
            from_email: None,
            slack_hook: None,
            tw_api_key: None,
            tw_api_secret_key: None,
            tw_access_token: None,
            tw_access_token_secret: None,
            admin_user: Some("admin".into()),
            admin_password: Some("hunter2".into()),
            retention_days: 30,
            sweep_interval_secs: 3600,
        }
    }
}
