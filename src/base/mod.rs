//! Core components, types, and utilities for roster-bot.
//!
//! This module contains fundamental building blocks used throughout the application:
//! - Configuration handling and environment variables.
//! - Reaction-token normalization helpers.
//! - Fixed user-facing reply texts.
//! - Common types and result handling.

pub mod config;
pub mod emoji;
pub mod error;
pub mod messages;
pub mod types;
