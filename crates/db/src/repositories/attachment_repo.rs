//! Repository for the `attachments` table.

use sqlx::PgPool;
use tavola_core::types::DbId;

use crate::models::attachment::AttachmentWithUploader;

/// Column list for attachment queries joined with the uploader.
const WITH_UPLOADER_COLUMNS: &str = "a.id, a.task_id, a.file_name, a.file_path, \
     a.file_size_bytes, a.mime_type, a.uploaded_by, a.created_at, u.name AS uploader_name";

/// Provides read operations for task attachments.
pub struct AttachmentRepo;

impl AttachmentRepo {
    /// Fetch an attachment together with its uploader's display name.
    ///
    /// Uses an INNER JOIN on `users`, so an attachment whose uploader row
    /// is missing resolves to `None` rather than a partial record.
    pub async fn get_with_uploader(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<AttachmentWithUploader>, sqlx::Error> {
        let query = format!(
            "SELECT {WITH_UPLOADER_COLUMNS} FROM attachments a \
             JOIN users u ON u.id = a.uploaded_by \
             WHERE a.id = $1"
        );
        sqlx::query_as::<_, AttachmentWithUploader>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
