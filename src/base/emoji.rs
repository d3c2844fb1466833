//! Reaction-token helpers.
//!
//! Slack encodes skin-tone variants by appending a `skin-tone-<n>` modifier
//! to the base reaction name. Stripping the modifier canonicalizes every
//! variant of an emoji to one logical reaction name.

use std::sync::LazyLock;

use regex::Regex;

static SKIN_TONE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"skin-tone-\d+").unwrap());

/// True iff `s` is a colon-delimited reaction token like `:tada:`.
pub fn is_reaction_token(s: &str) -> bool {
    s.len() >= 2 && s.starts_with(':') && s.ends_with(':')
}

/// Removes the colon decoration from a reaction token.
pub fn extract_name(s: &str) -> String {
    s.replace(':', "")
}

/// Removes any `skin-tone-<n>` modifier from a reaction name.
pub fn strip_skin_tone(s: &str) -> String {
    SKIN_TONE.replace_all(s, "").into_owned()
}
