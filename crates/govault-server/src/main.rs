//! GoVault Server CLI
//!
//! Starts the HTTP server for relationship and impact queries.

use govault_server::{config::ServerConfig, start_server, ServerError};
use std::env;
use std::process;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        ServerConfig::from_file(&args[2])?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        eprintln!("Warning: No config file specified, using default test configuration");
        eprintln!("Usage: govault-server --config <path-to-config.toml>");
        eprintln!();
        ServerConfig::default_test_config()
    };

    start_server(config).await?;

    Ok(())
}

fn print_help() {
    println!("GoVault Server - Document relationship and impact analysis");
    println!();
    println!("USAGE:");
    println!("    govault-server --config <path-to-config.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("CONFIGURATION:");
    println!("    The TOML config file should contain:");
    println!("    - bind_address: IP address to bind (e.g., '127.0.0.1')");
    println!("    - bind_port: Port number (e.g., 8080)");
    println!("    - database_path: SQLite vault database");
    println!("    - fetch_timeout_ms: Per-request record fetch timeout (default: 5000)");
    println!("    - log_level: Log filter when RUST_LOG is unset (default: 'info')");
    println!("    - seed_file: Optional JSON snapshot imported at startup");
    println!("    - [engine]: Detector thresholds and risk_policy");
    println!();
}
