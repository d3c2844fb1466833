use tracing::{Instrument, error, instrument};

use crate::{
    base::types::{MentionEvent, Void},
    service::{chat::ChatClient, mention, reaction::ReactionUsersService, response::ResponseService},
};

/// Handles one inbound mention on its own task.
///
/// Failures never escalate past this boundary: they are logged and the
/// event's processing ends here.
#[instrument(skip_all)]
pub fn handle_app_mention(event: MentionEvent, chat: ChatClient) {
    tokio::spawn(async move {
        // Process the event.
        let result = process_mention(event, chat).in_current_span().await;

        // Log any errors.
        if let Err(err) = &result {
            error!("Error while handling mention: {}", err);
        }
    });
}

/// Runs the parse → resolve → reply pipeline for one mention event.
#[instrument(skip_all)]
pub async fn process_mention(event: MentionEvent, chat: ChatClient) -> Void {
    let reaction_users = ReactionUsersService::new(chat.clone());
    let response = ResponseService::new(chat);

    let parsed = mention::parse(&event.text);

    // Anything but a usable reaction argument gets the usage message.
    let reaction = match (parsed.command, parsed.reaction) {
        (None, Some(reaction)) if !reaction.is_empty() => reaction,
        _ => return response.reply_help(&event).await,
    };

    match reaction_users.list_users_email_by_reaction(&event.channel, &event.thread_ts, &reaction).await {
        Ok(emails) => response.reply_email_list(&event, &emails).await,
        Err(err) => response.reply_error(&event, err).await,
    }
}
