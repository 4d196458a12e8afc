// SPDX-FileCopyrightText: 2026 Rota Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rota - a durable signup-queue bot.
//!
//! This is the binary entry point for the Rota bot.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod console;
mod serve;
mod shell;

/// Rota - a durable signup-queue bot.
#[derive(Parser, Debug)]
#[command(name = "rota", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the lifecycle scheduler until interrupted.
    Serve,
    /// Drive the bot from an interactive console session.
    Shell {
        /// Chat identity to act as.
        #[arg(long, default_value = "local")]
        user: String,
    },
}

/// Initialize the tracing subscriber from the configured log level,
/// letting `RUST_LOG` override it.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match rota_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            rota_config::render_errors(&errors);
            std::process::exit(1);
        }
    };
    init_tracing(&config.bot.log_level);

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Shell { user }) => shell::run_shell(config, user).await,
        None => {
            println!("rota: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
