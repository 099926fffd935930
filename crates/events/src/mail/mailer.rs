//! Trigger-point service for transactional mail.
//!
//! [`Mailer`] mirrors [`TaskEventPublisher`](crate::publisher::TaskEventPublisher)
//! on the mail side: it resolves the recipient, builds the message via
//! the [`MailMessage`] builders, and hands it to the configured
//! [`MailQueue`]. A missing recipient surfaces as an error to the caller.

use std::sync::Arc;

use tavola_core::types::DbId;
use tavola_core::CoreError;
use tavola_db::models::user::User;
use tavola_db::repositories::UserRepo;
use tavola_db::DbPool;

use crate::mail::message::MailMessage;
use crate::mail::queue::{MailError, MailQueue};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for mail construction and handoff failures.
#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    /// The recipient user could not be loaded.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The queue rejected the message.
    #[error(transparent)]
    Mail(#[from] MailError),
}

// ---------------------------------------------------------------------------
// MailerConfig
// ---------------------------------------------------------------------------

/// Default password-reset link lifetime when the env var is not set.
const DEFAULT_PASSWORD_RESET_TTL_MINUTES: i64 = 60;

/// Configuration for the transactional mailer.
#[derive(Debug, Clone)]
pub struct MailerConfig {
    /// How long a password-reset link stays valid.
    pub password_reset_ttl_minutes: i64,
}

impl MailerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Variable                     | Default |
    /// |------------------------------|---------|
    /// | `PASSWORD_RESET_TTL_MINUTES` | `60`    |
    pub fn from_env() -> Self {
        Self {
            password_reset_ttl_minutes: std::env::var("PASSWORD_RESET_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PASSWORD_RESET_TTL_MINUTES),
        }
    }
}

impl Default for MailerConfig {
    fn default() -> Self {
        Self {
            password_reset_ttl_minutes: DEFAULT_PASSWORD_RESET_TTL_MINUTES,
        }
    }
}

// ---------------------------------------------------------------------------
// Mailer
// ---------------------------------------------------------------------------

/// Builds and enqueues transactional mail at domain trigger points.
pub struct Mailer {
    pool: DbPool,
    queue: Arc<dyn MailQueue>,
    config: MailerConfig,
}

impl Mailer {
    /// Create a new mailer with the given pool, queue, and configuration.
    pub fn new(pool: DbPool, queue: Arc<dyn MailQueue>, config: MailerConfig) -> Self {
        Self {
            pool,
            queue,
            config,
        }
    }

    /// Send an email-verification code to a registered user.
    pub async fn send_verification(&self, user_id: DbId, code: &str) -> Result<(), MailerError> {
        let user = self.load_user(user_id).await?;
        let message = MailMessage::verify_email(&user.name, code);

        tracing::debug!(user_id, "Enqueueing verification mail");
        self.queue.enqueue(&user.email, message).await?;
        Ok(())
    }

    /// Send a password-reset link to a registered user.
    ///
    /// The link lifetime comes from [`MailerConfig`].
    pub async fn send_password_reset(
        &self,
        user_id: DbId,
        reset_url: &str,
    ) -> Result<(), MailerError> {
        let user = self.load_user(user_id).await?;
        let message = MailMessage::password_reset(
            &user.name,
            reset_url,
            self.config.password_reset_ttl_minutes,
        );

        tracing::debug!(user_id, "Enqueueing password-reset mail");
        self.queue.enqueue(&user.email, message).await?;
        Ok(())
    }

    /// Send a board invitation.
    ///
    /// Invitees may not have an account yet, so the recipient is
    /// addressed directly rather than loaded from the database.
    pub async fn send_board_invitation(
        &self,
        to_email: &str,
        to_name: &str,
        inviter_name: &str,
        board_name: &str,
        accept_url: &str,
    ) -> Result<(), MailerError> {
        let message = MailMessage::board_invitation(to_name, inviter_name, board_name, accept_url);

        tracing::debug!(to = to_email, board_name, "Enqueueing board-invitation mail");
        self.queue.enqueue(to_email, message).await?;
        Ok(())
    }

    async fn load_user(&self, user_id: DbId) -> Result<User, MailerError> {
        Ok(UserRepo::get(&self.pool, user_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "user",
                id: user_id,
            })?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_matches_documented_ttl() {
        assert_eq!(MailerConfig::default().password_reset_ttl_minutes, 60);
    }

    #[test]
    fn config_from_env_falls_back_to_default() {
        std::env::remove_var("PASSWORD_RESET_TTL_MINUTES");
        assert_eq!(
            MailerConfig::from_env().password_reset_ttl_minutes,
            DEFAULT_PASSWORD_RESET_TTL_MINUTES
        );
    }
}
