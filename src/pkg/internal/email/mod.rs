use async_trait::async_trait;
use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use standard_error::{Interpolate, StandardError};

pub mod created;

use crate::{
    conf::{SERVICE_NAME, Settings},
    prelude::Result,
};

/// Delivers a message to one person.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, recipient: &str, subject: &str, body: &str) -> Result<()>;
}

fn email_err(e: impl ToString) -> StandardError {
    StandardError::new("ERR-EMAIL-000").interpolate_err(e.to_string())
}

/// SMTP delivery of html mail.
pub struct Mailer {
    from: Mailbox,
    transport: SmtpTransport,
}

impl Mailer {
    /// `None` when SMTP isn't configured.
    pub fn from_settings(settings: &Settings) -> Result<Option<Self>> {
        let Some(smtp) = settings.smtp() else {
            return Ok(None);
        };
        let from = format!("{} <{}>", SERVICE_NAME, smtp.from_email)
            .parse::<Mailbox>()
            .map_err(email_err)?;
        let creds = Credentials::new(smtp.user.to_string(), smtp.pass.to_string());
        let transport = SmtpTransport::relay(smtp.server)
            .map_err(email_err)?
            .credentials(creds)
            .build();
        Ok(Some(Mailer { from, transport }))
    }
}

#[async_trait]
impl Notifier for Mailer {
    async fn notify(&self, recipient: &str, subject: &str, body: &str) -> Result<()> {
        tracing::debug!("sending email to {}", recipient);
        let email = Message::builder()
            .from(self.from.clone())
            .to(recipient.parse::<Mailbox>().map_err(email_err)?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(body.to_string())
            .map_err(email_err)?;

        let mailer = self.transport.clone();
        tokio::task::spawn_blocking(move || mailer.send(&email))
            .await
            .map_err(email_err)?
            .map_err(email_err)?;
        tracing::debug!("email sent to {}", recipient);
        Ok(())
    }
}
