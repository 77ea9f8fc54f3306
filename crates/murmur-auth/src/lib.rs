//! murmur-auth
//!
//! Bearer-token validation against the external identity provider, and
//! the explicit [`identity::Identity`] credential every store operation
//! takes. Identity is never reconstructed from ambient context — it is
//! resolved once per request and passed down by value.

pub mod error;
pub mod identity;
pub mod jwt;
