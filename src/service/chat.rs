//! Wrapper around chat clients.
//!
//! This module provides functionality for interacting with chat platforms like Slack:
//! - Receiving mention events
//! - Sending channel and ephemeral messages
//! - Retrieving a thread's parent message, reactions, and user emails
//!
//! It defines the `GenericChatClient` trait that can be implemented for
//! different chat services, with a default implementation for Slack.

use crate::base::types::{Reaction, Res, ThreadMessage, UserEmail, Void};
use async_trait::async_trait;

use std::{ops::Deref, sync::Arc};

pub mod slack;

// Traits.

/// Generic "chat" trait that platform clients must implement.
///
/// This is the only seam between the reaction pipeline and the platform.
/// Implementations must be safe for concurrent use by in-flight events.
#[async_trait]
pub trait GenericChatClient {
    /// Get the bot user ID.
    fn bot_user_id(&self) -> &str;
    /// Start the chat client listener.
    async fn start(&self) -> Void;
    /// Send a message to a channel thread.
    async fn post_message(&self, channel_id: &str, text: &str, thread_ts: &str) -> Void;
    /// Send a message to a channel thread visible only to `user_id`.
    async fn post_ephemeral(&self, channel_id: &str, text: &str, thread_ts: &str, user_id: &str) -> Void;
    /// Get the message that started a thread, with its reactions.
    ///
    /// Fails with [`ChatError::ThreadNotFound`](crate::base::error::ChatError::ThreadNotFound)
    /// when the thread does not exist.
    async fn get_parent_message(&self, channel_id: &str, thread_ts: &str) -> Res<ThreadMessage>;
    /// Get the reactions on a thread's parent message.
    ///
    /// With `full` set, the complete user list is returned for every reaction.
    async fn get_reactions(&self, channel_id: &str, thread_ts: &str, full: bool) -> Res<Vec<Reaction>>;
    /// Resolve user IDs to email addresses, preserving input order.
    ///
    /// Fails with [`ChatError::UserNotFound`](crate::base::error::ChatError::UserNotFound)
    /// when no users match.
    async fn list_users_email(&self, user_ids: &[String]) -> Res<Vec<UserEmail>>;
}

// Structs.

/// Chat client handle for the application.
///
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct ChatClient {
    inner: Arc<dyn GenericChatClient + Send + Sync + 'static>,
}

impl ChatClient {
    /// Wraps any chat client implementation.
    pub fn new(inner: Arc<dyn GenericChatClient + Send + Sync + 'static>) -> Self {
        Self { inner }
    }
}

impl Deref for ChatClient {
    type Target = dyn GenericChatClient + Send + Sync + 'static;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

// Test mock, shared by the service unit tests.

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use mockall::mock;

    mock! {
        pub Chat {}

        #[async_trait]
        impl GenericChatClient for Chat {
            fn bot_user_id(&self) -> &str;
            async fn start(&self) -> Void;
            async fn post_message(&self, channel_id: &str, text: &str, thread_ts: &str) -> Void;
            async fn post_ephemeral(&self, channel_id: &str, text: &str, thread_ts: &str, user_id: &str) -> Void;
            async fn get_parent_message(&self, channel_id: &str, thread_ts: &str) -> Res<ThreadMessage>;
            async fn get_reactions(&self, channel_id: &str, thread_ts: &str, full: bool) -> Res<Vec<Reaction>>;
            async fn list_users_email(&self, user_ids: &[String]) -> Res<Vec<UserEmail>>;
        }
    }
}
