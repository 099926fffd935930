//! Mail message builders.
//!
//! A [`MailMessage`] pairs a template id with the flat variable map that
//! template expects. Builders bind variables only; rendering, queuing,
//! and retries belong to the [`MailQueue`](crate::mail::queue::MailQueue)
//! implementation. Every variable map includes the recipient's display
//! name and, where the mail is time-limited, the numeric expiry.

use serde_json::json;

/// Template for the email-address verification mail.
pub const TEMPLATE_VERIFY_EMAIL: &str = "verify_email";

/// Template for the password-reset mail.
pub const TEMPLATE_PASSWORD_RESET: &str = "password_reset";

/// Template for the board-invitation mail.
pub const TEMPLATE_BOARD_INVITATION: &str = "board_invitation";

/// How long a verification code stays valid.
pub const VERIFY_CODE_TTL_MINUTES: i64 = 10;

/// How long a board invitation stays open.
pub const INVITATION_TTL_DAYS: i64 = 7;

/// A renderable mail: template id, subject, and template variables.
///
/// Built once at the trigger point, consumed once by the mail queue.
#[derive(Debug, Clone)]
pub struct MailMessage {
    /// Identifier of the template the queue should render.
    pub template_id: String,

    /// RFC 5322 subject line.
    pub subject: String,

    /// Flat variable map bound into the template.
    pub variables: serde_json::Value,
}

impl MailMessage {
    /// Email-address verification: a short numeric code, valid for
    /// [`VERIFY_CODE_TTL_MINUTES`].
    pub fn verify_email(recipient_name: &str, code: &str) -> Self {
        Self {
            template_id: TEMPLATE_VERIFY_EMAIL.to_string(),
            subject: "Verify your email address".to_string(),
            variables: json!({
                "name": recipient_name,
                "code": code,
                "expires_in_minutes": VERIFY_CODE_TTL_MINUTES,
            }),
        }
    }

    /// Password reset: a signed reset URL whose lifetime is configured
    /// (see [`MailerConfig`](crate::mail::mailer::MailerConfig)).
    pub fn password_reset(recipient_name: &str, reset_url: &str, ttl_minutes: i64) -> Self {
        Self {
            template_id: TEMPLATE_PASSWORD_RESET.to_string(),
            subject: "Reset your password".to_string(),
            variables: json!({
                "name": recipient_name,
                "reset_url": reset_url,
                "expires_in_minutes": ttl_minutes,
            }),
        }
    }

    /// Board invitation: an accept URL, open for [`INVITATION_TTL_DAYS`].
    pub fn board_invitation(
        recipient_name: &str,
        inviter_name: &str,
        board_name: &str,
        accept_url: &str,
    ) -> Self {
        Self {
            template_id: TEMPLATE_BOARD_INVITATION.to_string(),
            subject: format!("Invitation to join \"{board_name}\""),
            variables: json!({
                "name": recipient_name,
                "inviter_name": inviter_name,
                "board_name": board_name,
                "accept_url": accept_url,
                "expires_in_days": INVITATION_TTL_DAYS,
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
