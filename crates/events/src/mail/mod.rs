//! Transactional mail: builders, the queue interface, and the SMTP queue.
//!
//! Builders select a template id and bind a flat variable map; the
//! [`MailQueue`](queue::MailQueue) implementation owns rendering and
//! delivery.

pub mod mailer;
pub mod message;
pub mod queue;
