//! Terminal client for Genkan.
//!
//! Connects to the relay as a visitor (`--name`) or as an operator
//! (`--operator`) and reads commands from stdin. Reconnects automatically
//! on disconnection (max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin genkan-client -- --name Ana
//! cargo run --bin genkan-client -- --operator
//! ```

use clap::Parser;

use genkan_client::{Role, run_client};
use genkan_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "genkan-client")]
#[command(about = "Terminal client for Genkan visitors and operators", long_about = None)]
struct Args {
    /// Display name to register as a visitor
    #[arg(short = 'n', long, required_unless_present = "operator")]
    name: Option<String>,

    /// Join as an operator instead of a visitor
    #[arg(short = 'o', long, conflicts_with = "name")]
    operator: bool,

    /// Server host
    #[arg(short = 'H', long, env = "GENKAN_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Server port
    #[arg(short = 'p', long, env = "GENKAN_PORT", default_value_t = 8080)]
    port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn role(&self) -> Role {
        match &self.name {
            Some(name) if !self.operator => Role::Visitor { name: name.clone() },
            _ => Role::Operator,
        }
    }

    fn url(&self) -> String {
        format!("ws://{}:{}/ws", self.host, self.port)
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    setup_logger(
        env!("CARGO_BIN_NAME"),
        &["genkan_client", "genkan_shared"],
        &args.log_level,
    );

    if let Err(e) = run_client(args.url(), args.role()).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
