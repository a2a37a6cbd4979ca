// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! HAIF CLI library - exposes testable components
//!
//! # Architecture
//!
//! - **Layer:** Interface / Presentation Layer
//! - **Purpose:** Application context, logging setup, the chat responder and
//!   the subcommand handlers behind the `haif` binary

pub mod commands;
pub mod context;
pub mod logging;
pub mod responder;
