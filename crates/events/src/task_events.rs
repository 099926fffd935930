//! Typed constructors for task-channel broadcast events.
//!
//! Each constructor maps a source record (or bare ids, for deletions) to
//! the channel `task.<taskId>` and the exact payload keys subscribers
//! expect for that event name. The payload is the wire contract: no
//! extra keys, none missing.

use serde_json::json;
use tavola_core::channels::{
    task_channel, EVENT_ATTACHMENT_DELETED, EVENT_ATTACHMENT_UPLOADED, EVENT_COMMENT_DELETED,
    EVENT_COMMENT_UPDATED,
};
use tavola_core::humanize;
use tavola_core::types::DbId;
use tavola_db::models::attachment::AttachmentWithUploader;
use tavola_db::models::comment::CommentWithAuthor;

use crate::bus::BroadcastEvent;

impl BroadcastEvent {
    /// `attachment.uploaded` on `task.<task_id>`.
    ///
    /// The storage path stays out of the payload.
    pub fn attachment_uploaded(attachment: &AttachmentWithUploader) -> Self {
        let payload = json!({
            "attachment": {
                "id": attachment.id,
                "task_id": attachment.task_id,
                "file_name": attachment.file_name,
                "file_size_bytes": attachment.file_size_bytes,
                "mime_type": attachment.mime_type,
                "uploaded_by": attachment.uploader(),
                "created_at": attachment.created_at,
            }
        });
        Self::new(
            task_channel(attachment.task_id),
            EVENT_ATTACHMENT_UPLOADED,
            payload,
        )
    }

    /// `attachment.deleted` on `task.<task_id>`.
    ///
    /// Built from bare ids: by the time the event fires the row is gone.
    pub fn attachment_deleted(attachment_id: DbId, task_id: DbId) -> Self {
        let payload = json!({
            "attachment_id": attachment_id,
            "task_id": task_id,
        });
        Self::new(task_channel(task_id), EVENT_ATTACHMENT_DELETED, payload)
    }

    /// `comment.updated` on `task.<task_id>`.
    ///
    /// Carries the raw `updated_at` timestamp alongside a human-readable
    /// rendering, and always flags the comment as edited.
    pub fn comment_updated(comment: &CommentWithAuthor) -> Self {
        let payload = json!({
            "comment": {
                "id": comment.id,
                "task_id": comment.task_id,
                "body": comment.body,
                "author": comment.author(),
                "created_at": comment.created_at,
                "updated_at": comment.updated_at,
                "updated_at_human": humanize::relative_from_now(comment.updated_at),
                "is_edited": true,
            }
        });
        Self::new(task_channel(comment.task_id), EVENT_COMMENT_UPDATED, payload)
    }

    /// `comment.deleted` on `task.<task_id>`.
    ///
    /// Built from bare ids: by the time the event fires the row is gone.
    pub fn comment_deleted(comment_id: DbId, task_id: DbId) -> Self {
        let payload = json!({
            "comment_id": comment_id,
            "task_id": task_id,
        });
        Self::new(task_channel(task_id), EVENT_COMMENT_DELETED, payload)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use tavola_core::types::Timestamp;

    fn ts() -> Timestamp {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    fn attachment_fixture() -> AttachmentWithUploader {
        AttachmentWithUploader {
            id: 5,
            task_id: 2,
            file_name: "design-v2.pdf".to_string(),
            file_path: "attachments/2/design-v2.pdf".to_string(),
            file_size_bytes: 48_213,
            mime_type: Some("application/pdf".to_string()),
            uploaded_by: 9,
            created_at: ts(),
            uploader_name: "Ann".to_string(),
        }
    }

    fn comment_fixture() -> CommentWithAuthor {
        CommentWithAuthor {
            id: 31,
            task_id: 2,
            user_id: 9,
            body: "Updated the estimate.".to_string(),
            created_at: ts(),
            updated_at: ts() + Duration::minutes(10),
            author_name: "Ann".to_string(),
        }
    }

    fn object_keys(value: &serde_json::Value) -> Vec<&str> {
        let mut keys: Vec<&str> = value
            .as_object()
            .expect("payload section should be an object")
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        keys
    }

    #[test]
    fn attachment_uploaded_targets_task_channel() {
        let event = BroadcastEvent::attachment_uploaded(&attachment_fixture());

        assert_eq!(event.channel, "task.2");
        assert_eq!(event.event, "attachment.uploaded");
    }

    #[test]
    fn attachment_uploaded_payload_shape() {
        let event = BroadcastEvent::attachment_uploaded(&attachment_fixture());
        let attachment = &event.payload["attachment"];

        assert_eq!(
            object_keys(attachment),
            vec![
                "created_at",
                "file_name",
                "file_size_bytes",
                "id",
                "mime_type",
                "task_id",
                "uploaded_by",
            ]
        );
        assert_eq!(attachment["id"], 5);
        assert_eq!(attachment["task_id"], 2);
        assert_eq!(attachment["file_name"], "design-v2.pdf");
        assert_eq!(attachment["uploaded_by"]["id"], 9);
        assert_eq!(attachment["uploaded_by"]["name"], "Ann");
        assert_eq!(object_keys(&attachment["uploaded_by"]), vec!["id", "name"]);
    }

    #[test]
    fn attachment_uploaded_payload_omits_file_path() {
        let event = BroadcastEvent::attachment_uploaded(&attachment_fixture());

        assert!(event.payload["attachment"].get("file_path").is_none());
    }

    #[test]
    fn attachment_deleted_from_bare_ids() {
        let event = BroadcastEvent::attachment_deleted(5, 2);

        assert_eq!(event.channel, "task.2");
        assert_eq!(event.event, "attachment.deleted");
        assert_eq!(object_keys(&event.payload), vec!["attachment_id", "task_id"]);
        assert_eq!(event.payload["attachment_id"], 5);
        assert_eq!(event.payload["task_id"], 2);
    }

    #[test]
    fn comment_updated_targets_task_channel() {
        let event = BroadcastEvent::comment_updated(&comment_fixture());

        assert_eq!(event.channel, "task.2");
        assert_eq!(event.event, "comment.updated");
    }

    #[test]
    fn comment_updated_payload_shape() {
        let event = BroadcastEvent::comment_updated(&comment_fixture());
        let comment = &event.payload["comment"];

        assert_eq!(
            object_keys(comment),
            vec![
                "author",
                "body",
                "created_at",
                "id",
                "is_edited",
                "task_id",
                "updated_at",
                "updated_at_human",
            ]
        );
        assert_eq!(comment["id"], 31);
        assert_eq!(comment["task_id"], 2);
        assert_eq!(comment["author"]["id"], 9);
        assert_eq!(comment["author"]["name"], "Ann");
    }

    #[test]
    fn comment_updated_always_sets_is_edited() {
        let event = BroadcastEvent::comment_updated(&comment_fixture());

        assert_eq!(event.payload["comment"]["is_edited"], true);
    }

    #[test]
    fn comment_updated_carries_raw_and_human_timestamps() {
        let event = BroadcastEvent::comment_updated(&comment_fixture());
        let comment = &event.payload["comment"];

        assert!(comment["updated_at"].is_string());
        assert!(comment["updated_at_human"].is_string());
        assert_ne!(comment["updated_at"], comment["updated_at_human"]);
    }

    #[test]
    fn comment_deleted_from_bare_ids() {
        let event = BroadcastEvent::comment_deleted(31, 2);

        assert_eq!(event.channel, "task.2");
        assert_eq!(event.event, "comment.deleted");
        assert_eq!(object_keys(&event.payload), vec!["comment_id", "task_id"]);
        assert_eq!(event.payload["comment_id"], 31);
        assert_eq!(event.payload["task_id"], 2);
    }
}
