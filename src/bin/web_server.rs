//! # Web Server Binary Entry Point
//!
//! Serves the LSB steganography API and its upload page.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin web_server -- --config config/server.toml
//! cargo run --bin web_server -- --address 127.0.0.1:8080
//! ```
//!
//! Without `--config` the built-in defaults are used (port 5000, `static/`).

use clap::Parser;

use lsb_stego_web::common::config::ServiceConfig;
use lsb_stego_web::server::web;
use lsb_stego_web::utils::init_logger;

/// Command-line arguments for the web server binary
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the service configuration file (TOML format)
    ///
    /// Example: config/server.toml
    #[arg(short, long)]
    config: Option<String>,

    /// Address to bind, overriding `server.address` from the configuration
    #[arg(short, long)]
    address: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = ServiceConfig::load(args.config.as_deref())?;
    if let Some(address) = args.address {
        config.server.address = address;
    }

    init_logger(config.logging.level_filter()?);

    web::run(config).await
}
