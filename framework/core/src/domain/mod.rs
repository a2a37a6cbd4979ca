// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Domain
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Catalogs, responsibility ledger, framework aggregate,
//!   interaction log and runtime settings

pub mod catalog;
pub mod responsibility;
pub mod framework;
pub mod interaction;
pub mod settings;
