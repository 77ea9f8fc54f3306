//! murmur-core
//!
//! Pure domain types for the chat service: messages, content parts, and
//! the chat request envelope. No AWS SDK dependency — this is the shared
//! vocabulary of the Murmur system.

pub mod error;
pub mod models;
