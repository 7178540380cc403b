//! Infrastructure layer: concrete implementations of the domain interfaces.

pub mod collaborator;
pub mod dto;
pub mod menu_loader;
pub mod message_pusher;
pub mod repository;
