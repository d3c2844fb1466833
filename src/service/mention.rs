//! Parses the free-text body of a mention into a command or target reaction.

use crate::base::{
    emoji,
    types::{MentionCommand, MentionParseResult},
};

/// Splits a mention body on single spaces and inspects the first argument.
///
/// Fewer than two tokens is a bare mention (no command, no reaction). A
/// colon-delimited second token becomes the normalized target reaction
/// (colons and any skin-tone modifier removed); anything else degrades to
/// the help command, unknown commands included.
pub fn parse(message: &str) -> MentionParseResult {
    let tokens: Vec<&str> = message.split(' ').collect();

    if tokens.len() < 2 {
        // No arguments.
        return MentionParseResult {
            message: message.to_string(),
            command: None,
            reaction: None,
        };
    }

    if emoji::is_reaction_token(tokens[1]) {
        return MentionParseResult {
            message: message.to_string(),
            command: None,
            reaction: Some(emoji::strip_skin_tone(&emoji::extract_name(tokens[1]))),
        };
    }

    // Invalid argument (not an emoji token).
    MentionParseResult {
        message: message.to_string(),
        command: Some(MentionCommand::Help),
        reaction: None,
    }
}
