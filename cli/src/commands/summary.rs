// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Print the configured framework, as the report or as JSON.

use anyhow::{Context, Result};

use crate::context::AppContext;

pub async fn handle_command(context: &mut AppContext, json: bool) -> Result<()> {
    println!("{}", render(context, json)?);
    Ok(())
}

fn render(context: &mut AppContext, json: bool) -> Result<String> {
    let framework = context.framework_service()?.framework()?;

    if json {
        serde_json::to_string_pretty(framework).context("Failed to serialize framework")
    } else {
        Ok(framework.generate_framework_summary())
    }
}
