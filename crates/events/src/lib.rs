//! Tavola notification layer: real-time broadcasts and transactional mail.
//!
//! This crate is the delivery-facing edge of the task board. It provides:
//!
//! - [`BroadcastEvent`] — the channel-addressed wire envelope for
//!   real-time task events.
//! - [`EventBus`] — in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`TaskEventPublisher`] — trigger-point service that loads a source
//!   record, shapes its payload, and publishes on the bus.
//! - [`mail`] — transactional mail builders, the [`MailQueue`] interface,
//!   and the SMTP-backed queue implementation.

pub mod bus;
pub mod mail;
pub mod publisher;
pub mod task_events;

pub use bus::{BroadcastEvent, EventBus};
pub use mail::mailer::{Mailer, MailerConfig};
pub use mail::message::MailMessage;
pub use mail::queue::{EmailConfig, MailQueue, SmtpMailQueue};
pub use publisher::TaskEventPublisher;
