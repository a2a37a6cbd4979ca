// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Command implementations for HAIF CLI

pub mod chat;
pub mod config;
pub mod summary;

pub use self::config::ConfigCommand;
