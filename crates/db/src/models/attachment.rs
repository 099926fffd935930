//! Task attachment models and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use tavola_core::types::{DbId, Timestamp};

use crate::models::user::UserSummary;

/// Attachment row with its uploader's display name resolved (from JOIN).
///
/// This is the shape broadcast payloads are built from; the raw row is
/// never read without the uploader.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AttachmentWithUploader {
    pub id: DbId,
    pub task_id: DbId,
    pub file_name: String,
    pub file_path: String,
    pub file_size_bytes: i64,
    pub mime_type: Option<String>,
    pub uploaded_by: DbId,
    pub created_at: Timestamp,
    /// Resolved uploader display name (from JOIN on `users`).
    pub uploader_name: String,
}

impl AttachmentWithUploader {
    /// The uploader as a wire summary.
    pub fn uploader(&self) -> UserSummary {
        UserSummary {
            id: self.uploaded_by,
            name: self.uploader_name.clone(),
        }
    }
}
