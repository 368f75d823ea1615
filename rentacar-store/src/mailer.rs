use async_trait::async_trait;
use rentacar_core::ports::{ConfirmationEmail, ConfirmationMailer};
use std::error::Error;
use tracing::{info, warn};

const SENDGRID_URL: &str = "https://api.sendgrid.com/v3/mail/send";

#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    #[error("email request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("email provider returned {status}: {message}")]
    Api { status: u16, message: String },
}

/// SendGrid v3 `mail/send` client. One reqwest client, built at startup and
/// reused for every send.
#[derive(Clone)]
pub struct SendGridClient {
    client: reqwest::Client,
    api_key: String,
    sender: String,
}

impl SendGridClient {
    pub fn new(api_key: String, sender: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            sender,
        }
    }

    pub async fn send(&self, email: &ConfirmationEmail) -> Result<(), MailerError> {
        let body = serde_json::json!({
            "personalizations": [{ "to": [{ "email": email.to }] }],
            "from": { "email": self.sender },
            "subject": email.subject,
            "content": [
                { "type": "text/plain", "value": email.text },
                { "type": "text/html", "value": email.html },
            ],
        });

        let response = self
            .client
            .post(SENDGRID_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(MailerError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

/// Email capability, decided once at startup: a live SendGrid client, or a
/// logger that prints what would have been sent.
pub enum Mailer {
    Live(SendGridClient),
    Disabled,
}

impl Mailer {
    pub fn from_config(api_key: Option<&str>, sender: &str) -> Self {
        match api_key {
            Some(api_key) => {
                info!("Email provider initialized");
                Self::Live(SendGridClient::new(api_key.to_string(), sender.to_string()))
            }
            None => {
                warn!("Email service not configured, confirmations will be logged only");
                Self::Disabled
            }
        }
    }
}

#[async_trait]
impl ConfirmationMailer for Mailer {
    async fn send_confirmation(
        &self,
        email: &ConfirmationEmail,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        match self {
            Self::Live(client) => {
                client.send(email).await?;
                Ok(())
            }
            Self::Disabled => {
                info!(
                    "Email content (local): to={} subject={}",
                    email.to, email.subject
                );
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_mailer_logs_and_succeeds() {
        let mailer = Mailer::from_config(None, "notifications@rentacar.com");
        let email = ConfirmationEmail {
            to: "jane@example.com".to_string(),
            subject: "Booking Confirmation - RentACar".to_string(),
            text: "confirmed".to_string(),
            html: "<p>confirmed</p>".to_string(),
        };
        assert!(mailer.send_confirmation(&email).await.is_ok());
    }
}
