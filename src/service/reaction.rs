//! Resolves the users who reacted to a thread's parent message into emails.

use std::collections::HashSet;

use tracing::instrument;

use crate::base::{
    emoji,
    types::{Reaction, Res, UserEmail},
};

use super::chat::ChatClient;

/// Chunk size for email lookups; the per-call budget of the upstream
/// user-info API.
const LIST_USERS_EMAIL_CHUNK_SIZE: usize = 20;

/// Looks up who applied a given reaction to a thread's parent message and
/// resolves their email addresses.
#[derive(Clone)]
pub struct ReactionUsersService {
    chat: ChatClient,
}

impl ReactionUsersService {
    pub fn new(chat: ChatClient) -> Self {
        Self { chat }
    }

    /// Gets the email addresses of the users who applied `reaction_name`
    /// (in any skin-tone variant) to the parent message of the thread at
    /// `ts` in `channel_id`.
    ///
    /// An empty list means nobody reacted; that is not an error.
    #[instrument(skip(self))]
    pub async fn list_users_email_by_reaction(&self, channel_id: &str, ts: &str, reaction_name: &str) -> Res<Vec<UserEmail>> {
        let message = self.chat.get_parent_message(channel_id, ts).await?;

        // The initial fetch caps the user list per reaction; one full
        // re-fetch replaces the whole listing when anything is truncated.
        let reactions = if is_refetch_needed(&message.reactions) {
            self.chat.get_reactions(channel_id, ts, true).await?
        } else {
            message.reactions
        };

        let user_ids = reaction_user_ids(&reactions, reaction_name);
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        self.chunked_list_users_email(&user_ids).await
    }

    /// Splits the ID list into fixed-size chunks and issues one upstream
    /// call per chunk, sequentially, concatenating results in chunk order.
    /// The first failing chunk aborts the resolution.
    async fn chunked_list_users_email(&self, user_ids: &[String]) -> Res<Vec<UserEmail>> {
        let mut emails = Vec::with_capacity(user_ids.len());

        for chunk in user_ids.chunks(LIST_USERS_EMAIL_CHUNK_SIZE) {
            emails.extend(self.chat.list_users_email(chunk).await?);
        }

        Ok(emails)
    }
}

/// True if any reaction reports more users than the fetch returned.
fn is_refetch_needed(reactions: &[Reaction]) -> bool {
    reactions.iter().any(|r| r.count > r.user_ids.len())
}

/// IDs of the users who applied the named reaction, merging skin-tone
/// variants and deduplicating while preserving first-seen order.
fn reaction_user_ids(reactions: &[Reaction], reaction_name: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut user_ids = Vec::new();

    for reaction in reactions {
        if emoji::strip_skin_tone(&emoji::extract_name(&reaction.name)) != reaction_name {
            continue;
        }
        for id in &reaction.user_ids {
            if seen.insert(id.clone()) {
                user_ids.push(id.clone());
            }
        }
    }

    user_ids
}
