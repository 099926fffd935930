//! Database access for the notification layer.
//!
//! Row models and repositories for the records this layer reads:
//! attachments and comments with their uploader/author display fields
//! resolved, and user accounts for mail recipient lookup.

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}
