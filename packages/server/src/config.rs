//! Server configuration.
//!
//! Built from command-line flags (and their environment variables) in the
//! `genkan-server` binary; [`Default`] matches the flag defaults.

use std::{path::PathBuf, time::Duration};

use crate::{domain::DuplicateIdPolicy, usecase::WelcomeConfig};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Menu configuration file (JSON)
    pub menu_path: PathBuf,
    pub duplicate_id_policy: DuplicateIdPolicy,
    pub welcome: WelcomeConfig,
    /// `None` disables the inactivity reaper
    pub idle_timeout: Option<Duration>,
    pub reap_interval: Duration,
    /// Timeout applied to every external collaborator call
    pub external_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            menu_path: PathBuf::from("config/menu.json"),
            duplicate_id_policy: DuplicateIdPolicy::FirstWins,
            welcome: WelcomeConfig::default(),
            idle_timeout: None,
            reap_interval: Duration::from_secs(30),
            external_timeout: Duration::from_secs(30),
        }
    }
}
