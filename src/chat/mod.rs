//! Chat application module for talking to the portfolio persona.
//!
//! This module provides the interactive chat built on top of the client
//! library. It supports:
//!
//! - One owned session per visitor, seeded with the persona prompt
//! - Credentials from the environment or typed in mid-session
//! - Slash commands for browsing the portfolio
//! - Configurable model, endpoint, persona and profile
//!
//! # Architecture
//!
//! The module is organized into several components:
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`session`]: the transcript and the interaction handler
//! - [`commands`]: slash command parsing
//! - [`render`]: terminal output for turns and portfolio content

mod commands;
mod config;
mod render;
mod session;

pub use commands::{ChatCommand, help_text, parse_command};
pub use config::{ChatArgs, ChatConfig};
pub use render::{PlainTextRenderer, Renderer};
pub use session::{ChatSession, SessionStats};
