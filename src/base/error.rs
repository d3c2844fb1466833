//! User-facing error taxonomy.
//!
//! Anything not covered here travels as an opaque `anyhow` error and counts
//! as an upstream failure: the handler logs it and the user gets no reply.

use thiserror::Error;

/// Failures the bot maps to fixed guidance replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChatError {
    /// The referenced thread (or its parent message) does not exist.
    #[error("thread not found")]
    ThreadNotFound,
    /// No users matched an email lookup.
    #[error("user not found")]
    UserNotFound,
}
