//! Migration-compatibility shims for retired API functions.
//!
//! These are not runtime error paths: each one fails unconditionally with
//! a message naming its replacement, so old clients get a clear pointer
//! instead of silently diverging data.

use crate::error::StoreError;

/// Retired demo query from before the chat schema existed.
pub fn list_numbers() -> Result<Vec<i64>, StoreError> {
    Err(StoreError::Deprecated(
        "listNumbers has been removed; use GET /api/messages".to_string(),
    ))
}

/// Retired demo mutation from before the chat schema existed.
pub fn add_number() -> Result<(), StoreError> {
    Err(StoreError::Deprecated(
        "addNumber has been removed; use POST /api/messages".to_string(),
    ))
}

/// Retired general-purpose message write that let callers pick any role.
pub fn add_message() -> Result<(), StoreError> {
    Err(StoreError::Deprecated(
        "addMessage has been removed; use POST /api/messages for user turns \
         (assistant turns are written by the chat endpoint)"
            .to_string(),
    ))
}
