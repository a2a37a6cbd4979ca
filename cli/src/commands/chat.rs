// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Interactive chat loop
//!
//! Reads `Human> ` lines until `exit`, end of input or Ctrl-C. Built-in
//! commands are matched case-insensitively on the trimmed line; anything else
//! is recorded as an INSTRUCTION interaction carrying the human message and
//! the responder's reply.

use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{self, BufRead, Write};
use tokio::sync::mpsc;
use tracing::error;

use haif_core::domain::catalog::Role;
use haif_core::domain::interaction::{
    generate_id, InteractionSession, InteractionStatus, InteractionType, Metadata,
};

use crate::context::AppContext;
use crate::responder::{Responder, RuleBasedResponder};

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

/// What the loop should do after one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Ignored,
    Exit,
    Help,
    Clear,
    Summary(String),
    NewSession(String),
    Reply(String),
}

/// Process one input line against the current session.
pub fn handle_line(
    context: &mut AppContext,
    session: &mut InteractionSession,
    responder: &dyn Responder,
    line: &str,
) -> Result<LineOutcome> {
    let input = line.trim();
    if input.is_empty() {
        return Ok(LineOutcome::Ignored);
    }

    match input.to_lowercase().as_str() {
        "exit" => return Ok(LineOutcome::Exit),
        "help" => return Ok(LineOutcome::Help),
        "clear" => return Ok(LineOutcome::Clear),
        "summary" => {
            let summary = context.framework_service()?.generate_framework_summary()?;
            return Ok(LineOutcome::Summary(summary));
        }
        "new session" => {
            *session = context.new_session();
            return Ok(LineOutcome::NewSession(session.id().to_string()));
        }
        _ => {}
    }

    let interaction = session
        .add_interaction_with(
            generate_id(),
            InteractionType::Instruction,
            InteractionStatus::InProgress,
            Metadata::new(),
        )
        .context("Failed to record interaction")?;

    interaction.add_message(input, Role::Human);
    let reply = responder.respond(input);
    interaction.add_message(reply.clone(), Role::Ai);
    interaction.set_status(InteractionStatus::Completed);

    Ok(LineOutcome::Reply(reply))
}

pub async fn run(context: &mut AppContext) -> Result<()> {
    let responder = RuleBasedResponder;
    let mut session = context.new_session();
    let mut lines = spawn_stdin_reader();

    print_banner(&session);

    loop {
        print!("Human> ");
        io::stdout().flush().context("Failed to flush stdout")?;

        let line = tokio::select! {
            line = lines.recv() => line,
            _ = tokio::signal::ctrl_c() => None,
        };

        let line = match line {
            Some(Ok(line)) => line,
            Some(Err(e)) => return Err(e).context("Failed to read input"),
            None => {
                println!("\nExiting...");
                break;
            }
        };

        match handle_line(context, &mut session, &responder, &line) {
            Ok(LineOutcome::Exit) => {
                println!("Exiting...");
                break;
            }
            Ok(outcome) => render(outcome),
            Err(e) => {
                error!("Error in chat loop: {:#}", e);
                println!("{} {:#}", "Error:".red(), e);
            }
        }
    }

    Ok(())
}

/// Blocking stdin reads happen on a plain thread so an interrupted prompt
/// never holds the runtime open at exit.
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<io::Result<String>> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn render(outcome: LineOutcome) {
    match outcome {
        LineOutcome::Ignored | LineOutcome::Exit => {}
        LineOutcome::Help => print_help(),
        LineOutcome::Clear => {
            print!("{}", CLEAR_SCREEN);
            let _ = io::stdout().flush();
        }
        LineOutcome::Summary(summary) => {
            println!("\n{}", "Framework Summary:".bold());
            println!("{}", summary);
        }
        LineOutcome::NewSession(id) => println!("Created new session: {}", id),
        LineOutcome::Reply(reply) => {
            println!("{} {}", "AI>".cyan().bold(), reply);
            println!();
        }
    }
}

fn print_banner(session: &InteractionSession) {
    println!();
    println!("{}", "Human-AI Interaction Framework CLI".bold());
    println!("----------------------------------");
    println!("Type 'help' for available commands, 'exit' to quit.\n");
    println!("Session ID: {}", session.id());
    println!("----------------------------------\n");
}

fn print_help() {
    println!("\n{}", "Available Commands:".bold());
    println!("  help        - Display this help message");
    println!("  exit        - Exit the CLI");
    println!("  summary     - Display the framework summary");
    println!("  clear       - Clear the screen");
    println!("  new session - Create a new interaction session");
    println!();
    println!("You can also ask questions about:");
    println!("  - The framework's purpose and principles");
    println!("  - Roles and responsibilities");
    println!("  - Ethical considerations");
    println!("  - Communication protocols");
    println!("  - Feedback mechanisms");
    println!("  - Improvement processes");
    println!("  - Collaborative workflows");
    println!();
}
