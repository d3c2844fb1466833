//! Fixed user-facing reply texts.

/// Header line of the email-list reply.
pub const EMAIL_LIST_HEADER: &str = "Participant list";

/// Sent when the mention did not happen inside a thread.
pub const THREAD_NOT_FOUND_REPLY: &str = "Please mention me inside a thread :pray:";

/// Sent when no users could be resolved for the reaction.
pub const USER_NOT_FOUND_REPLY: &str = "No participants were found :eyes:";

/// Usage message for bare mentions and unknown commands.
pub const HELP_REPLY: &str = "\
[Usage]
1. Mention me inside a thread with a reaction, e.g. `@roster-bot :tada:`.
2. I reply with the email addresses of everyone who applied that reaction to the thread's first message.
3. Paste the list into a calendar invite to add them all at once.";
