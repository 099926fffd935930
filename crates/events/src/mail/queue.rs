//! Mail queue interface and SMTP implementation.
//!
//! [`MailQueue`] is the handoff point for transactional mail: builders
//! produce a [`MailMessage`], the queue owns rendering and delivery.
//! [`SmtpMailQueue`] sends via the `lettre` async SMTP transport.
//! Configuration is loaded from environment variables; if `SMTP_HOST` is
//! not set, [`EmailConfig::from_env`] returns `None` and no queue should
//! be constructed.

use async_trait::async_trait;

use crate::mail::message::MailMessage;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for mail delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// MailQueue
// ---------------------------------------------------------------------------

/// Accepts a built mail for rendering and delivery.
///
/// Matches the external queue contract: template id, subject, and
/// variables travel in the [`MailMessage`]; the recipient address is
/// supplied at enqueue time. Retry policy belongs to implementations,
/// never to the builders.
#[async_trait]
pub trait MailQueue: Send + Sync {
    async fn enqueue(&self, to: &str, message: MailMessage) -> Result<(), MailError>;
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@tavola.local";

/// Configuration for the SMTP mail queue.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    /// Optional SMTP username.
    pub smtp_user: Option<String>,
    /// Optional SMTP password.
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set, signalling that mail
    /// delivery is not configured and should be skipped.
    ///
    /// | Variable        | Required | Default                 |
    /// |-----------------|----------|-------------------------|
    /// | `SMTP_HOST`     | yes      | —                       |
    /// | `SMTP_PORT`     | no       | `587`                   |
    /// | `SMTP_FROM`     | no       | `noreply@tavola.local`  |
    /// | `SMTP_USER`     | no       | —                       |
    /// | `SMTP_PASSWORD` | no       | —                       |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// SmtpMailQueue
// ---------------------------------------------------------------------------

/// Sends transactional mail via SMTP.
///
/// Rendering is a plain-text fallback (subject plus variable lines);
/// HTML template rendering lives with the mail templates, keyed by
/// `template_id`.
pub struct SmtpMailQueue {
    config: EmailConfig,
}

impl SmtpMailQueue {
    /// Create a new queue with the given configuration.
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Render the variable map as plain-text lines.
    fn render_variables(variables: &serde_json::Value) -> String {
        match variables.as_object() {
            Some(map) => map
                .iter()
                .map(|(key, value)| match value.as_str() {
                    Some(s) => format!("{key}: {s}"),
                    None => format!("{key}: {value}"),
                })
                .collect::<Vec<_>>()
                .join("\n"),
            None => variables.to_string(),
        }
    }
}

#[async_trait]
impl MailQueue for SmtpMailQueue {
    async fn enqueue(&self, to: &str, message: MailMessage) -> Result<(), MailError> {
        use lettre::{
            message::header::ContentType, transport::smtp::authentication::Credentials,
            AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
        };

        let body = format!(
            "[{}]\n\n{}",
            message.template_id,
            Self::render_variables(&message.variables)
        );

        let email = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(to.parse()?)
            .subject(&message.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| MailError::Build(e.to_string()))?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
                .port(self.config.smtp_port);

        if let (Some(user), Some(pass)) = (&self.config.smtp_user, &self.config.smtp_password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let mailer = transport_builder.build();
        mailer.send(email).await?;

        tracing::info!(to, template_id = %message.template_id, "Transactional mail sent");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn test_config() -> EmailConfig {
        EmailConfig {
            smtp_host: "localhost".to_string(),
            smtp_port: 2525,
            from_address: "noreply@tavola.local".to_string(),
            smtp_user: None,
            smtp_password: None,
        }
    }

    #[test]
    fn from_env_returns_none_without_smtp_host() {
        // Ensure SMTP_HOST is not set in the test environment.
        std::env::remove_var("SMTP_HOST");
        assert!(EmailConfig::from_env().is_none());
    }

    #[tokio::test]
    async fn enqueue_rejects_invalid_recipient_before_any_io() {
        let queue = SmtpMailQueue::new(test_config());
        let message = MailMessage::verify_email("Ann", "493817");

        let err = queue.enqueue("not-an-email", message).await.unwrap_err();
        assert_matches!(err, MailError::Address(_));
    }

    #[test]
    fn render_variables_produces_one_line_per_key() {
        let rendered = SmtpMailQueue::render_variables(&serde_json::json!({
            "name": "Ann",
            "expires_in_minutes": 10,
        }));

        assert!(rendered.contains("name: Ann"));
        assert!(rendered.contains("expires_in_minutes: 10"));
    }

    #[test]
    fn mail_error_display_build() {
        let err = MailError::Build("missing body".to_string());
        assert_eq!(err.to_string(), "Email build error: missing body");
    }

    #[test]
    fn mail_error_display_address() {
        let addr_err: Result<lettre::Address, _> = "not-an-email".parse();
        let err = MailError::Address(addr_err.unwrap_err());
        assert!(err.to_string().contains("Email address parse error"));
    }
}
