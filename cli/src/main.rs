// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # HAIF CLI
//!
//! The `haif` binary hosts one Human-AI Interaction Framework instance.
//!
//! ## Startup
//!
//! 1. `.env` is loaded when present
//! 2. configuration: `HAIF_*` variables, then `default.*` and `<env>.*` from
//!    the discovered config directory
//! 3. logging from the `logging` section (`--log-level` and `RUST_LOG` win)
//! 4. services registered and initialised in the application context
//!
//! The context is shut down on every exit path, including errors.
//!
//! ## Commands
//!
//! - `haif chat` - Interactive session (default)
//! - `haif summary [--json]` - Print the framework
//! - `haif config show|validate|generate` - Configuration management

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use haif_cli::commands::{self, ConfigCommand};
use haif_cli::context::{AppContext, ContextOptions};

/// Human-AI Interaction Framework host
#[derive(Parser)]
#[command(name = "haif")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration directory (overrides discovery)
    #[arg(short, long, global = true, env = "HAIF_CONFIG_DIR", value_name = "DIR")]
    config: Option<PathBuf>,

    /// Environment name (e.g. development, production)
    #[arg(long, global = true, env = "HAIF_ENV", default_value = "development")]
    env: String,

    /// Log level (DEBUG, INFO, WARNING, ERROR, CRITICAL)
    #[arg(long, global = true, env = "HAIF_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive session with the AI side of the framework
    #[command(name = "chat")]
    Chat,

    /// Print the framework summary
    #[command(name = "summary")]
    Summary {
        /// Print the framework as JSON instead
        #[arg(long)]
        json: bool,
    },

    /// Configuration management
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // .env must be in place before clap reads env-backed flags
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let context = AppContext::build(ContextOptions {
        config_dir: cli.config,
        env: cli.env,
        log_level: cli.log_level,
    })?;
    let mut context = scopeguard::guard(context, |mut context| context.shutdown());

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => commands::chat::run(&mut context).await,
        Commands::Summary { json } => commands::summary::handle_command(&mut context, json).await,
        Commands::Config { command } => commands::config::handle_command(command, &mut context).await,
    }
}
