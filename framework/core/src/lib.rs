// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! HAIF core
//!
//! Domain model, factory and service shell for the Human-AI Interaction
//! Framework.
//!
//! # Architecture
//!
//! - **Layer:** Core System
//! - **Purpose:** Catalog model, responsibility ledger, interaction log and the
//!   lifecycle shell that hosts one framework aggregate

pub mod domain;
pub mod application;
pub mod infrastructure;

pub use domain::*;
