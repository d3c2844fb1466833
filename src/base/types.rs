//! Common types and result aliases shared across the crate.

use serde::{Deserialize, Serialize};

/// The crate-wide error type.
pub type Err = anyhow::Error;
/// The crate-wide result type.
pub type Res<T> = Result<T, Err>;
/// A result carrying no value on success.
pub type Void = Res<()>;

/// An inbound "the bot was mentioned" notification, reduced to the fields
/// the pipeline needs.
///
/// `thread_ts` is the timestamp of the thread's parent message; it is empty
/// when the mention happened outside a thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentionEvent {
    /// ID of the channel where the mention happened.
    pub channel: String,
    /// Timestamp of the thread's parent message; empty outside a thread.
    pub thread_ts: String,
    /// ID of the user who mentioned the bot.
    pub user: String,
    /// Full text of the mention message.
    pub text: String,
}

/// Command extracted from a mention body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MentionCommand {
    /// Show usage help.
    Help,
}

/// Result of parsing the free-text body of a mention.
///
/// At most one of `command` / `reaction` is set; a bare mention sets neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionParseResult {
    /// The mention body with the bot mention stripped.
    pub message: String,
    /// Recognized command, if any.
    pub command: Option<MentionCommand>,
    /// Normalized reaction name, if any.
    pub reaction: Option<String>,
}

/// Parent message of a thread, with its (possibly truncated) reactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadMessage {
    /// ID of the channel containing the thread.
    pub channel_id: String,
    /// Reactions on the parent message.
    pub reactions: Vec<Reaction>,
}

/// One emoji annotation on a message.
///
/// `count` is the platform-reported total. `user_ids` may be capped by the
/// fetch that produced it, so `count > user_ids.len()` means the listing is
/// truncated and a full re-fetch is required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reaction {
    /// Emoji name of the reaction.
    pub name: String,
    /// IDs of users who applied the reaction (possibly truncated).
    pub user_ids: Vec<String>,
    /// Platform-reported total number of users who reacted.
    pub count: usize,
}

/// A resolved user ID / email address pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEmail {
    /// Platform user ID.
    pub id: String,
    /// Email address; empty when the platform omits it.
    pub email: String,
}
