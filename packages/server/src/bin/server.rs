//! QuikVote voting room server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin quikvote-server
//! cargo run --bin quikvote-server -- --host 0.0.0.0 --port 4000
//! ```

use std::sync::Arc;

use clap::Parser;
use quikvote_server::ui::{AppState, Server};
use quikvote_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "quikvote-server")]
#[command(about = "Real-time voting room server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "QUIKVOTE_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value = "4000")]
    port: u16,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "debug")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_BIN_NAME"),
        &args.log_level,
    );

    // Initialize dependencies (stores, registry, use cases) and run the server
    let server = Server::new(AppState::in_memory(Arc::new(SystemClock)));
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
