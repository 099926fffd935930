//! Trigger-point publisher for task events.
//!
//! [`TaskEventPublisher`] sits between application logic and the
//! [`EventBus`]: it loads the source record with its relation, shapes the
//! broadcast payload via the typed constructors, and publishes. A missing
//! record (or a broken uploader/author relation) surfaces as an error to
//! the caller instead of a silently empty broadcast.

use std::sync::Arc;

use tavola_core::types::DbId;
use tavola_core::CoreError;
use tavola_db::repositories::{AttachmentRepo, CommentRepo};
use tavola_db::DbPool;

use crate::bus::{BroadcastEvent, EventBus};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for event construction failures.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// The source record (or its uploader/author relation) could not be
    /// loaded.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

// ---------------------------------------------------------------------------
// TaskEventPublisher
// ---------------------------------------------------------------------------

/// Publishes task-channel events at domain trigger points.
pub struct TaskEventPublisher {
    pool: DbPool,
    bus: Arc<EventBus>,
}

impl TaskEventPublisher {
    /// Create a new publisher with the given database pool and bus.
    pub fn new(pool: DbPool, bus: Arc<EventBus>) -> Self {
        Self { pool, bus }
    }

    /// Broadcast `attachment.uploaded` for a freshly stored attachment.
    pub async fn attachment_uploaded(&self, attachment_id: DbId) -> Result<(), PublishError> {
        let attachment = AttachmentRepo::get_with_uploader(&self.pool, attachment_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "attachment",
                id: attachment_id,
            })?;

        tracing::debug!(
            attachment_id,
            task_id = attachment.task_id,
            "Broadcasting attachment.uploaded"
        );
        self.bus
            .publish(BroadcastEvent::attachment_uploaded(&attachment));
        Ok(())
    }

    /// Broadcast `attachment.deleted` from bare ids.
    ///
    /// The row is already gone when this fires, so the caller supplies
    /// the ids it captured before the delete.
    pub fn attachment_deleted(&self, attachment_id: DbId, task_id: DbId) {
        tracing::debug!(attachment_id, task_id, "Broadcasting attachment.deleted");
        self.bus
            .publish(BroadcastEvent::attachment_deleted(attachment_id, task_id));
    }

    /// Broadcast `comment.updated` for an edited comment.
    pub async fn comment_updated(&self, comment_id: DbId) -> Result<(), PublishError> {
        let comment = CommentRepo::get_with_author(&self.pool, comment_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "comment",
                id: comment_id,
            })?;

        tracing::debug!(
            comment_id,
            task_id = comment.task_id,
            "Broadcasting comment.updated"
        );
        self.bus.publish(BroadcastEvent::comment_updated(&comment));
        Ok(())
    }

    /// Broadcast `comment.deleted` from bare ids.
    ///
    /// The row is already gone when this fires, so the caller supplies
    /// the ids it captured before the delete.
    pub fn comment_deleted(&self, comment_id: DbId, task_id: DbId) {
        tracing::debug!(comment_id, task_id, "Broadcasting comment.deleted");
        self.bus
            .publish(BroadcastEvent::comment_deleted(comment_id, task_id));
    }
}
