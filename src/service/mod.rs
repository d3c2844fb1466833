//! Services implementing the reaction pipeline and its platform seam.
//!
//! - `chat`: the generic chat-client trait and its Slack implementation
//! - `mention`: mention-text parsing
//! - `reaction`: reaction-to-email resolution
//! - `response`: outbound reply composition
//!
//! The chat module defines a generic trait with a concrete Slack
//! implementation, allowing for extensibility and easy testing; the other
//! services depend only on that trait.

pub mod chat;
pub mod mention;
pub mod reaction;
pub mod response;
