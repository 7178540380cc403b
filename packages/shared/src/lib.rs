//! Utilities shared by the Genkan server and client.

pub mod logger;
pub mod time;
