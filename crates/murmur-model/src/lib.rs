//! murmur-model
//!
//! Model-provider invocation: converts stored conversation turns into the
//! Converse wire format and relays a streaming completion as a sequence
//! of [`stream::StreamEvent`]s.

pub mod converse;
pub mod error;
pub mod prompt;
pub mod stream;
