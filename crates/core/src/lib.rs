//! Shared primitives for the Tavola backend.
//!
//! Small, dependency-light building blocks used across the workspace:
//! database id/timestamp aliases, the domain error enum, well-known
//! channel and event names, and relative-time formatting for wire
//! payloads.

pub mod channels;
pub mod error;
pub mod humanize;
pub mod types;

pub use error::CoreError;
