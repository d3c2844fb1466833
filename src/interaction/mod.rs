//! Event handling for inbound mentions.
//!
//! The transport layer (the Slack socket listener) converts platform events
//! into [`MentionEvent`](crate::base::types::MentionEvent)s and hands them to
//! this module, which runs the parse → resolve → reply pipeline.

pub mod app_mention;
