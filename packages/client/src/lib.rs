//! Terminal client for Genkan visitors and operators.
//!
//! A visitor registers a display name and chats with the bot and operators;
//! an operator subscribes to the session list and replies to visitors.

mod command;
mod domain;
pub mod error;
mod formatter;
mod runner;
mod session;
mod ui;

pub use domain::Role;
pub use runner::run_client;
