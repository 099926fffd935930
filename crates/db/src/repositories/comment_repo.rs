//! Repository for the `comments` table.

use sqlx::PgPool;
use tavola_core::types::DbId;

use crate::models::comment::CommentWithAuthor;

/// Column list for comment queries joined with the author.
const WITH_AUTHOR_COLUMNS: &str =
    "c.id, c.task_id, c.user_id, c.body, c.created_at, c.updated_at, u.name AS author_name";

/// Provides read operations for task comments.
pub struct CommentRepo;

impl CommentRepo {
    /// Fetch a comment together with its author's display name.
    ///
    /// Uses an INNER JOIN on `users`, so a comment whose author row is
    /// missing resolves to `None` rather than a partial record.
    pub async fn get_with_author(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CommentWithAuthor>, sqlx::Error> {
        let query = format!(
            "SELECT {WITH_AUTHOR_COLUMNS} FROM comments c \
             JOIN users u ON u.id = c.user_id \
             WHERE c.id = $1"
        );
        sqlx::query_as::<_, CommentWithAuthor>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
