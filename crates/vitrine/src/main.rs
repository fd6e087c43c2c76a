// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vitrine - a storefront conversation engine.
//!
//! Binary entry point: parses the CLI, loads configuration, and dispatches
//! to the serve loop.

mod serve;

use clap::{Parser, Subcommand};

/// Vitrine - a storefront conversation engine.
#[derive(Parser, Debug)]
#[command(name = "vitrine", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the conversation engine and dashboard API.
    Serve,
    /// Print the effective configuration and exit.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match vitrine_config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("vitrine: {e}");
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) | None => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("vitrine serve: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => {
            match toml::to_string_pretty(&config) {
                Ok(rendered) => println!("{rendered}"),
                Err(e) => {
                    eprintln!("vitrine config: {e}");
                    std::process::exit(1);
                }
            }
        }
    }
}
