//! Library root for `roster-bot`.
//!
//! Roster-bot is a Slack bot for collecting thread participants:
//! - Mention it inside a thread with an emoji argument, e.g. `@roster-bot :tada:`
//! - It finds everyone who applied that reaction (in any skin-tone variant)
//!   to the thread's parent message
//! - It replies ephemerally with their email addresses
//!
//! The bot integrates with Slack over Socket Mode. The architecture is built
//! around a chat-client trait so the pipeline can run against different
//! platform implementations, including mocks in tests.

#[deny(missing_docs)]
pub mod base;
pub mod interaction;
pub mod runtime;
pub mod service;

use base::{config::Config, types::Void};
use rustls::crypto;
use tracing::info;

/// Public async entry for the binary crate.
///
/// Sets up necessary services and starts the roster-bot runtime:
/// - Initializes the crypto provider
/// - Creates the runtime context with the chat client
/// - Starts the event listener for processing mentions
pub async fn start(config: Config) -> Void {
    info!("Starting roster-bot ...");

    // Start the crypto provider.
    crypto::ring::default_provider().install_default().unwrap();

    // Initialize the runtime.
    let runtime = runtime::Runtime::new(config).await?;

    // Start the runtime.
    runtime.start().await?;

    Ok(())
}
