//! murmur-store
//!
//! The message store: typed accessors over one DynamoDB table, partition
//! key `userId`, sort key `{createdAt_ms}#{id}`. Every public operation
//! takes the caller's [`murmur_auth::identity::Identity`] explicitly and
//! scopes reads and writes to that subject.

pub mod client;
pub mod error;
pub mod item;
pub mod legacy;
pub mod messages;
