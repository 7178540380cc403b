//! Genkan chat relay server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin genkan-server
//! cargo run --bin genkan-server -- --host 0.0.0.0 --port 3000 --menu config/menu.json
//! ```

use std::{path::PathBuf, sync::Arc, time::Duration};

use clap::Parser;

use genkan_server::{
    app::{build_app_state, unconfigured_collaborators},
    config::ServerConfig,
    domain::DuplicateIdPolicy,
    infrastructure::menu_loader::load_menu_configuration,
    ui::Server,
    usecase::WelcomeConfig,
};
use genkan_shared::{
    logger::setup_logger,
    time::{Clock, SystemClock},
};

#[derive(Parser, Debug)]
#[command(name = "genkan-server")]
#[command(about = "Visitor/operator chat relay with an interactive menu", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "GENKAN_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "GENKAN_PORT", default_value = "8080")]
    port: u16,

    /// Menu configuration file (JSON)
    #[arg(short = 'm', long, env = "GENKAN_MENU", default_value = "config/menu.json")]
    menu: PathBuf,

    /// Refuse to start when a menu id is defined more than once
    #[arg(long, env = "GENKAN_STRICT_MENU")]
    strict_menu: bool,

    /// Sender name used for the welcome messages
    #[arg(long, env = "GENKAN_BOT_NAME", default_value = "Genbot")]
    bot_name: String,

    /// URL of the welcome audio message
    #[arg(
        long,
        env = "GENKAN_WELCOME_AUDIO_URL",
        default_value = "/static/audio/welcome.mp3"
    )]
    welcome_audio_url: String,

    /// Remove sessions idle for this many seconds (0 disables)
    #[arg(long, env = "GENKAN_IDLE_TIMEOUT_SECS", default_value = "0")]
    idle_timeout_secs: u64,

    /// How often the inactivity reaper runs, in seconds
    #[arg(
        long,
        env = "GENKAN_REAP_INTERVAL_SECS",
        default_value = "30",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    reap_interval_secs: u64,

    /// Timeout for each external service call, in seconds
    #[arg(
        long,
        env = "GENKAN_EXTERNAL_TIMEOUT_SECS",
        default_value = "30",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    external_timeout_secs: u64,

    /// Default log level when RUST_LOG is not set
    #[arg(short = 'l', long, env = "GENKAN_LOG_LEVEL", default_value = "debug")]
    log_level: String,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            menu_path: args.menu,
            duplicate_id_policy: if args.strict_menu {
                DuplicateIdPolicy::Reject
            } else {
                DuplicateIdPolicy::FirstWins
            },
            welcome: WelcomeConfig {
                bot_name: args.bot_name,
                audio_url: args.welcome_audio_url,
            },
            idle_timeout: (args.idle_timeout_secs > 0)
                .then(|| Duration::from_secs(args.idle_timeout_secs)),
            reap_interval: Duration::from_secs(args.reap_interval_secs),
            external_timeout: Duration::from_secs(args.external_timeout_secs),
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(
        env!("CARGO_BIN_NAME"),
        &["genkan_server", "genkan_shared"],
        &args.log_level,
    );

    let config = ServerConfig::from(args);

    // Initialize dependencies in order:
    // 1. Menu tree (read once, immutable afterwards)
    // 2. Clock and external collaborators
    // 3. Repository, MessagePusher and UseCases (AppState)
    // 4. Server

    // 1. Load the menu configuration
    let menu = match load_menu_configuration(&config.menu_path, config.duplicate_id_policy) {
        Ok(menu) => menu,
        Err(e) => {
            tracing::error!("Failed to load menu: {}", e);
            std::process::exit(1);
        }
    };

    // 2. Clock and collaborators (summary, sentiment, rendering, mail)
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let collaborators = unconfigured_collaborators();
    tracing::info!("External services are not configured; summary requests will fail");

    // 3. Build the application state
    let state = build_app_state(&config, menu, collaborators, clock);

    // 4. Create and run the server
    let server = Server::new(state);
    if let Err(e) = server.run(config.host, config.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
