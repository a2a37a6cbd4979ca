// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Configuration management commands
//!
//! Commands: show, validate, generate

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use serde_json::{Map, Value};
use std::path::PathBuf;

use haif_core::application::factory::FrameworkFactory;
use haif_core::domain::framework::Framework;
use haif_core::domain::settings::LoggingSettings;
use haif_core::infrastructure::config_loader::{ConfigurationManager, CONFIG_DIR_ENV};

use crate::context::{AppContext, FRAMEWORK_SECTION};

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the merged configuration
    Show {
        /// Show config directory paths checked
        #[arg(long)]
        paths: bool,
    },

    /// Validate the framework section without falling back to defaults
    Validate {
        /// Single YAML or JSON file to check (default: loaded configuration)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Generate sample configuration
    Generate {
        /// Output path (default: ./config/default.yaml)
        #[arg(short, long, default_value = "./config/default.yaml")]
        output: PathBuf,

        /// Include every catalog member and comments
        #[arg(long)]
        examples: bool,
    },
}

pub async fn handle_command(command: ConfigCommand, context: &mut AppContext) -> Result<()> {
    match command {
        ConfigCommand::Show { paths } => show(context, paths),
        ConfigCommand::Validate { file } => validate(context, file),
        ConfigCommand::Generate { output, examples } => generate(output, examples),
    }
}

fn show(context: &AppContext, show_paths: bool) -> Result<()> {
    if show_paths {
        println!("{}", "Configuration discovery paths:".bold());
        println!("  1. --config flag / {}", CONFIG_DIR_ENV);
        println!("  2. ./config");
        println!("  3. ~/.haif/config");
        println!();
    }

    println!("{}", "Current configuration:".bold());
    match context.config_dir() {
        Some(dir) => println!("  Directory: {}", dir.display()),
        None => println!("  Directory: {}", "(none, environment only)".dimmed()),
    }
    println!("  Environment: {}", context.env());

    let logging = LoggingSettings::from_config(context.config().values());
    println!("  Log level: {} ({})", logging.level, logging.format);
    println!();

    let yaml = serde_yaml::to_string(&context.config().to_value())
        .context("Failed to render configuration")?;
    println!("{}", yaml);

    Ok(())
}

fn validate(context: &AppContext, file: Option<PathBuf>) -> Result<()> {
    println!("Validating configuration...");

    let values = match &file {
        Some(path) => ConfigurationManager::default()
            .load_from_file(path)
            .with_context(|| format!("Failed to load {:?}", path))?,
        None => context.config().values().clone(),
    };

    match validate_values(&values).context("Configuration validation failed")? {
        Some(framework) => {
            println!("{}", "✓ Configuration is valid".green());
            println!(
                "  {} responsibilities, {} ethical principles, {} workflows",
                framework.responsibilities().len(),
                framework.active_principles().len(),
                framework.active_workflows().len()
            );
        }
        None => {
            println!("{}", "✓ Configuration is valid".green());
            println!(
                "  {}",
                "No framework section; the default framework will be used".dimmed()
            );
        }
    }

    Ok(())
}

/// Strictly resolve the framework section. `None` means there is nothing to
/// resolve and the defaults apply.
fn validate_values(values: &Map<String, Value>) -> Result<Option<Framework>> {
    match values.get(FRAMEWORK_SECTION) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(section)) if section.is_empty() => Ok(None),
        Some(section) => Ok(Some(FrameworkFactory::create_from_config(section)?)),
    }
}

fn generate(output: PathBuf, with_examples: bool) -> Result<()> {
    let sample = if with_examples {
        include_str!("../../templates/config-with-examples.yaml")
    } else {
        include_str!("../../templates/config-minimal.yaml")
    };

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {:?}", parent))?;
    }

    std::fs::write(&output, sample)
        .with_context(|| format!("Failed to write config to {:?}", output))?;

    println!(
        "{}",
        format!("✓ Configuration generated: {}", output.display()).green()
    );

    Ok(())
}
