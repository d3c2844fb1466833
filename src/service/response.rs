//! Builds and sends the bot's replies.

use tracing::instrument;

use crate::base::{
    error::ChatError,
    messages,
    types::{Err, MentionEvent, UserEmail, Void},
};

use super::chat::ChatClient;

/// Max lines per outbound message. Slack recommends keeping chat.postMessage
/// payloads under ~4000 characters; 50 address lines stay below that for
/// ordinary email lengths.
const EMAIL_LIST_LINES_PER_MESSAGE: usize = 50;

/// Composes and delivers the ephemeral replies of the bot.
#[derive(Clone)]
pub struct ResponseService {
    chat: ChatClient,
}

impl ResponseService {
    pub fn new(chat: ChatClient) -> Self {
        Self { chat }
    }

    /// Replies with a header line plus one line per email, splitting into
    /// successive ephemeral messages when the line budget is exceeded.
    /// Chunks are sent in order; the first failing send aborts the rest.
    #[instrument(skip_all)]
    pub async fn reply_email_list(&self, event: &MentionEvent, emails: &[UserEmail]) -> Void {
        let mut lines = Vec::with_capacity(emails.len() + 1);
        lines.push(messages::EMAIL_LIST_HEADER);
        lines.extend(emails.iter().map(|e| e.email.as_str()));

        for chunk in lines.chunks(EMAIL_LIST_LINES_PER_MESSAGE) {
            self.chat.post_ephemeral(&event.channel, &chunk.join("\n"), &event.thread_ts, &event.user).await?;
        }

        Ok(())
    }

    /// Maps the user-facing failures to fixed guidance replies; any other
    /// error is handed back to the caller untouched.
    #[instrument(skip_all)]
    pub async fn reply_error(&self, event: &MentionEvent, err: Err) -> Void {
        let text = match err.downcast_ref::<ChatError>() {
            Some(ChatError::ThreadNotFound) => messages::THREAD_NOT_FOUND_REPLY,
            Some(ChatError::UserNotFound) => messages::USER_NOT_FOUND_REPLY,
            None => return Err(err),
        };

        self.chat.post_ephemeral(&event.channel, text, &event.thread_ts, &event.user).await
    }

    /// Sends the fixed usage message.
    #[instrument(skip_all)]
    pub async fn reply_help(&self, event: &MentionEvent) -> Void {
        self.chat.post_ephemeral(&event.channel, messages::HELP_REPLY, &event.thread_ts, &event.user).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mockall::Sequence;

    use super::*;
    use crate::service::chat::mock::MockChat;

    fn event() -> MentionEvent {
        MentionEvent {
            channel: "C1".to_string(),
            thread_ts: "1234567890.123456".to_string(),
            user: "U1".to_string(),
            text: "<@UBOT> :tada:".to_string(),
        }
    }

    fn emails(n: usize) -> Vec<UserEmail> {
        (0..n)
            .map(|i| UserEmail { id: format!("U{i}"), email: format!("user{i}@example.com") })
            .collect()
    }

    fn service(mock: MockChat) -> ResponseService {
        ResponseService::new(ChatClient::new(Arc::new(mock)))
    }

    #[tokio::test]
    async fn small_email_list_is_one_ephemeral_message() {
        let mut mock = MockChat::new();
        mock.expect_post_ephemeral()
            .times(1)
            .withf(|channel, text, ts, user| {
                channel == "C1" && ts == "1234567890.123456" && user == "U1" && text == "Participant list\nuser0@example.com"
            })
            .returning(|_, _, _, _| Ok(()));

        service(mock).reply_email_list(&event(), &emails(1)).await.unwrap();
    }

    #[tokio::test]
    async fn forty_nine_emails_fit_in_one_message() {
        let mut mock = MockChat::new();
        mock.expect_post_ephemeral()
            .times(1)
            .withf(|_, text, _, _| text.lines().count() == 50)
            .returning(|_, _, _, _| Ok(()));

        service(mock).reply_email_list(&event(), &emails(49)).await.unwrap();
    }

    #[tokio::test]
    async fn fifty_emails_split_into_two_messages() {
        let mut seq = Sequence::new();
        let mut mock = MockChat::new();
        mock.expect_post_ephemeral()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|_, text, _, _| text.lines().count() == 50 && text.starts_with("Participant list\nuser0@example.com"))
            .returning(|_, _, _, _| Ok(()));
        mock.expect_post_ephemeral()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|_, text, _, _| text == "user49@example.com")
            .returning(|_, _, _, _| Ok(()));

        service(mock).reply_email_list(&event(), &emails(50)).await.unwrap();
    }

    #[tokio::test]
    async fn first_failing_chunk_aborts_remaining_sends() {
        let mut mock = MockChat::new();
        mock.expect_post_ephemeral().times(1).returning(|_, _, _, _| Err(anyhow::anyhow!("send failed")));
        // A second send would exceed the expectation and fail the test.

        let result = service(mock).reply_email_list(&event(), &emails(50)).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn thread_not_found_maps_to_the_guidance_reply() {
        let mut mock = MockChat::new();
        mock.expect_post_ephemeral()
            .times(1)
            .withf(|_, text, _, _| text == messages::THREAD_NOT_FOUND_REPLY)
            .returning(|_, _, _, _| Ok(()));

        service(mock).reply_error(&event(), ChatError::ThreadNotFound.into()).await.unwrap();
    }

    #[tokio::test]
    async fn user_not_found_maps_to_the_no_participants_reply() {
        let mut mock = MockChat::new();
        mock.expect_post_ephemeral()
            .times(1)
            .withf(|_, text, _, _| text == messages::USER_NOT_FOUND_REPLY)
            .returning(|_, _, _, _| Ok(()));

        service(mock).reply_error(&event(), ChatError::UserNotFound.into()).await.unwrap();
    }

    #[tokio::test]
    async fn unmapped_errors_are_returned_to_the_caller_unsent() {
        let mock = MockChat::new();
        // No post_ephemeral expectation: sending anything would fail the test.

        let err = service(mock).reply_error(&event(), anyhow::anyhow!("rate limited")).await.unwrap_err();

        assert_eq!(err.to_string(), "rate limited");
    }

    #[tokio::test]
    async fn help_reply_sends_the_usage_message() {
        let mut mock = MockChat::new();
        mock.expect_post_ephemeral()
            .times(1)
            .withf(|_, text, _, _| text == messages::HELP_REPLY)
            .returning(|_, _, _, _| Ok(()));

        service(mock).reply_help(&event()).await.unwrap();
    }
}
