//! Task comment models and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use tavola_core::types::{DbId, Timestamp};

use crate::models::user::UserSummary;

/// Comment row with its author's display name resolved (from JOIN).
///
/// This is the shape broadcast payloads are built from; the raw row is
/// never read without the author.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CommentWithAuthor {
    pub id: DbId,
    pub task_id: DbId,
    pub user_id: DbId,
    pub body: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Resolved author display name (from JOIN on `users`).
    pub author_name: String,
}

impl CommentWithAuthor {
    /// The author as a wire summary.
    pub fn author(&self) -> UserSummary {
        UserSummary {
            id: self.user_id,
            name: self.author_name.clone(),
        }
    }
}
