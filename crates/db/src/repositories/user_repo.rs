//! Repository for the `users` table.

use sqlx::PgPool;
use tavola_core::types::DbId;

use crate::models::user::User;

/// Column list for `users` queries.
const COLUMNS: &str = "id, name, email, created_at, updated_at";

/// Provides read operations for user accounts.
pub struct UserRepo;

impl UserRepo {
    /// Fetch a single user row by id.
    pub async fn get(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
