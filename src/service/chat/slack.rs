//! Slack implementation of the chat client.
//!
//! Listens for app-mention push events over Socket Mode and exposes the
//! Slack Web API calls the pipeline needs: conversations.replies for the
//! thread's parent message, reactions.get for complete reaction listings,
//! users.info for email resolution, and chat.postMessage /
//! chat.postEphemeral for replies.

use crate::{
    base::{
        config::Config,
        error::ChatError,
        types::{MentionEvent, Reaction, Res, ThreadMessage, UserEmail, Void},
    },
    interaction,
};
use async_trait::async_trait;
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::connect::HttpConnector;
use slack_morphism::{errors::SlackClientError, prelude::*};
use tracing::{info, instrument, warn};

use std::{ops::Deref, sync::Arc};

use super::{ChatClient, GenericChatClient};

// Type aliases.

type FullClient = slack_morphism::SlackClient<SlackClientHyperConnector<HttpsConnector<HttpConnector>>>;

// Extra methods on `ChatClient` applied by the slack implementation.

impl ChatClient {
    /// Creates a new Slack chat client.
    pub async fn slack(config: &Config) -> Res<Self> {
        let client = SlackChatClient::new(config).await?;
        Ok(Self::new(Arc::new(client)))
    }
}

impl From<SlackChatClient> for ChatClient {
    fn from(client: SlackChatClient) -> Self {
        Self::new(Arc::new(client))
    }
}

// Structs.

/// User state for the slack socket client.
struct SlackUserState {
    chat: ChatClient,
    bot_user_id: String,
}

/// Slack client implementation.
#[derive(Clone)]
struct SlackChatClient {
    app_token: SlackApiToken,
    bot_token: SlackApiToken,
    bot_user_id: String,
    client: Arc<FullClient>,
}

impl Deref for SlackChatClient {
    type Target = FullClient;

    fn deref(&self) -> &Self::Target {
        &self.client
    }
}

impl SlackChatClient {
    /// Create a new Slack chat client.
    #[instrument(name = "SlackChatClient::new", skip_all)]
    pub async fn new(config: &Config) -> Res<Self> {
        // Initialize tokens.

        let app_token = SlackApiToken::new(SlackApiTokenValue(config.slack_app_token.clone()));
        let bot_token = SlackApiToken::new(SlackApiTokenValue(config.slack_bot_token.clone()));

        // Initialize the Slack client.

        let https_connector = HttpsConnector::<HttpConnector>::builder().with_native_roots()?.https_only().enable_all_versions().build();
        let connector = SlackClientHyperConnector::with_connector(https_connector);
        let client = Arc::new(slack_morphism::SlackClient::new(connector));

        // Get the bot's user ID.

        let session = client.open_session(&bot_token);
        let bot_user = session.auth_test().await?;
        let bot_user_id = bot_user.user_id.0;

        info!("Slack bot user ID: {}", bot_user_id);

        Ok(Self {
            app_token,
            bot_token,
            bot_user_id,
            client,
        })
    }
}

/// Converts Slack reactions to the pipeline's reaction entities.
fn convert_reactions(reactions: Option<&Vec<SlackReaction>>) -> Vec<Reaction> {
    reactions
        .map(|reactions| {
            reactions
                .iter()
                .map(|r| Reaction {
                    name: r.name.0.clone(),
                    user_ids: r.users.iter().map(|u| u.0.clone()).collect(),
                    count: r.count,
                })
                .collect()
        })
        .unwrap_or_default()
}

#[async_trait]
impl GenericChatClient for SlackChatClient {
    fn bot_user_id(&self) -> &str {
        &self.bot_user_id
    }

    async fn start(&self) -> Void {
        // Initialize the socket mode listener.

        let socket_mode_callbacks = SlackSocketModeListenerCallbacks::new()
            .with_command_events(handle_command_event)
            .with_interaction_events(handle_interaction_event)
            .with_push_events(handle_push_event);

        // Initialize the socket mode listener environment.

        let listener_environment = Arc::new(SlackClientEventsListenerEnvironment::new(self.client.clone()).with_user_state(SlackUserState {
            bot_user_id: self.bot_user_id.clone(),
            chat: ChatClient::from(self.clone()),
        }));

        let socket_mode_listener = Arc::new(SlackClientSocketModeListener::new(
            &SlackClientSocketModeConfig::new(),
            listener_environment.clone(),
            socket_mode_callbacks,
        ));

        // Register an app token to listen for events,
        socket_mode_listener.listen_for(&self.app_token).await?;

        // Start WS connections calling Slack API to get WS url for the token,
        // and wait for Ctrl-C to shutdown.
        socket_mode_listener.serve().await;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn post_message(&self, channel_id: &str, text: &str, thread_ts: &str) -> Void {
        let message = SlackMessageContent::new().with_text(text.to_string());

        let request = SlackApiChatPostMessageRequest::new(SlackChannelId(channel_id.to_string()), message)
            .with_as_user(true)
            .with_thread_ts(SlackTs(thread_ts.to_string()))
            .with_link_names(true);

        let session = self.client.open_session(&self.bot_token);

        let _ = session.chat_post_message(&request).await.map_err(|e| anyhow::anyhow!("Failed to send message: {}", e))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn post_ephemeral(&self, channel_id: &str, text: &str, thread_ts: &str, user_id: &str) -> Void {
        let message = SlackMessageContent::new().with_text(text.to_string());

        let request = SlackApiChatPostEphemeralRequest::new(SlackChannelId(channel_id.to_string()), SlackUserId(user_id.to_string()), message)
            .with_thread_ts(SlackTs(thread_ts.to_string()));

        let session = self.client.open_session(&self.bot_token);

        let _ = session.chat_post_ephemeral(&request).await.map_err(|e| anyhow::anyhow!("Failed to send ephemeral message: {}", e))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_parent_message(&self, channel_id: &str, thread_ts: &str) -> Res<ThreadMessage> {
        let request = SlackApiConversationsRepliesRequest::new(SlackChannelId(channel_id.to_string()), SlackTs(thread_ts.to_string()));
        let session = self.client.open_session(&self.bot_token);

        let response = match session.conversations_replies(&request).await {
            Err(SlackClientError::ApiError(ae)) if ae.code == "thread_not_found" => return Err(ChatError::ThreadNotFound.into()),
            other => other?,
        };

        // The first message of conversations.replies is the one that started the thread.
        let parent = response.messages.first().ok_or_else(|| anyhow::anyhow!("Thread has no messages"))?;

        Ok(ThreadMessage {
            channel_id: channel_id.to_string(),
            reactions: convert_reactions(parent.content.reactions.as_ref()),
        })
    }

    #[instrument(skip(self))]
    async fn get_reactions(&self, channel_id: &str, thread_ts: &str, full: bool) -> Res<Vec<Reaction>> {
        let request = SlackApiReactionsGetRequest::new()
            .with_channel(SlackChannelId(channel_id.to_string()))
            .with_timestamp(SlackTs(thread_ts.to_string()))
            .with_full(full);
        let session = self.client.open_session(&self.bot_token);

        let response = session.reactions_get(&request).await?;

        let reactions = match &response {
            SlackApiReactionsGetResponse::Message(message) => message.message.content.reactions.as_ref(),
            SlackApiReactionsGetResponse::File(_) => None,
        };

        Ok(convert_reactions(reactions))
    }

    #[instrument(skip(self, user_ids))]
    async fn list_users_email(&self, user_ids: &[String]) -> Res<Vec<UserEmail>> {
        let session = self.client.open_session(&self.bot_token);

        let mut emails = Vec::with_capacity(user_ids.len());
        for user_id in user_ids {
            let request = SlackApiUsersInfoRequest::new(SlackUserId(user_id.clone()));

            let user = match session.users_info(&request).await {
                Err(SlackClientError::ApiError(ae)) if ae.code == "user_not_found" || ae.code == "users_not_found" => {
                    return Err(ChatError::UserNotFound.into());
                }
                other => other?.user,
            };

            // The profile email is carried verbatim, even when Slack omits it.
            let email = user.profile.and_then(|p| p.email).map(|e| e.0).unwrap_or_default();

            emails.push(UserEmail { id: user_id.clone(), email });
        }

        Ok(emails)
    }
}

// Socket mode listener callbacks for Slack.

/// Handles command events from Slack.
async fn handle_command_event(
    event: SlackCommandEvent,
    _client: Arc<SlackHyperClient>,
    _states: SlackClientEventsUserState,
) -> Result<SlackCommandEventResponse, Box<dyn std::error::Error + Send + Sync>> {
    warn!("[COMMAND] {:#?}", event);
    Ok(SlackCommandEventResponse::new(SlackMessageContent::new().with_text("No app commands are currently supported.".into())))
}

/// Handles interaction events from Slack.
async fn handle_interaction_event(event: SlackInteractionEvent, _client: Arc<SlackHyperClient>, _states: SlackClientEventsUserState) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    warn!("[INTERACTION] {:#?}", event);
    Ok(())
}

/// Handles push events from Slack.
#[instrument(skip_all)]
async fn handle_push_event(event_callback: SlackPushEventCallback, _client: Arc<SlackHyperClient>, states: SlackClientEventsUserState) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let event = event_callback.event;
    let states = states.read().await;
    let user_state = states.get_user_state::<SlackUserState>().ok_or(anyhow::anyhow!("Failed to get user state"))?;

    match event {
        SlackEventCallbackBody::AppMention(mention) => {
            info!("Received app mention event ...");

            let user = mention.user.0.to_owned();
            if user == user_state.bot_user_id {
                warn!("Skipping app mention event from the bot itself.");
                return Ok(());
            }

            let event = MentionEvent {
                channel: mention.channel.0.to_owned(),
                thread_ts: mention.origin.thread_ts.clone().unwrap_or(SlackTs("".to_string())).0,
                user,
                text: mention.content.text.clone().unwrap_or_default(),
            };

            interaction::app_mention::handle_app_mention(event, user_state.chat.clone());
        }
        _ => {
            warn!("Received unhandled push event.")
        }
    }

    Ok(())
}
