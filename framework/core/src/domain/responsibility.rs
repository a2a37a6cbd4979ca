// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Responsibility ledger: per-role, insertion-ordered responsibility statements.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::domain::catalog::Role;

/// A single responsibility statement tagged with the role that holds it.
///
/// Immutable once created; only the ledger constructs these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleResponsibility {
    description: String,
    role: Role,
}

impl RoleResponsibility {
    fn new(role: Role, description: String) -> Self {
        Self { description, role }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn role(&self) -> Role {
        self.role
    }
}

impl fmt::Display for RoleResponsibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.role, self.description)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Responsibility '{description}' is tagged {found} but listed under {expected}")]
    RoleMismatch {
        expected: Role,
        found: Role,
        description: String,
    },
}

/// Ordered responsibilities for each [`Role`].
///
/// # Invariants
///
/// - Every entry stored under a role carries that same role. Deserialization
///   rejects input that breaks this with [`LedgerError::RoleMismatch`].
/// - Insertion order is preserved and duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LedgerRecord")]
pub struct ResponsibilityLedger {
    human: Vec<RoleResponsibility>,
    ai: Vec<RoleResponsibility>,
}

/// Unchecked wire shape of [`ResponsibilityLedger`].
#[derive(Deserialize)]
struct LedgerRecord {
    #[serde(default)]
    human: Vec<RoleResponsibility>,
    #[serde(default)]
    ai: Vec<RoleResponsibility>,
}

impl TryFrom<LedgerRecord> for ResponsibilityLedger {
    type Error = LedgerError;

    fn try_from(record: LedgerRecord) -> Result<Self, Self::Error> {
        for (expected, entries) in [(Role::Human, &record.human), (Role::Ai, &record.ai)] {
            if let Some(entry) = entries.iter().find(|entry| entry.role != expected) {
                return Err(LedgerError::RoleMismatch {
                    expected,
                    found: entry.role,
                    description: entry.description.clone(),
                });
            }
        }

        Ok(Self {
            human: record.human,
            ai: record.ai,
        })
    }
}

impl ResponsibilityLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a responsibility to the end of `role`'s list.
    pub fn push(&mut self, role: Role, description: impl Into<String>) {
        let entry = RoleResponsibility::new(role, description.into());
        self.entries_mut(role).push(entry);
    }

    /// Responsibilities held by `role`, oldest first.
    pub fn for_role(&self, role: Role) -> &[RoleResponsibility] {
        match role {
            Role::Human => &self.human,
            Role::Ai => &self.ai,
        }
    }

    pub fn len(&self) -> usize {
        self.human.len() + self.ai.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.human.clear();
        self.ai.clear();
    }

    fn entries_mut(&mut self, role: Role) -> &mut Vec<RoleResponsibility> {
        match role {
            Role::Human => &mut self.human,
            Role::Ai => &mut self.ai,
        }
    }
}
