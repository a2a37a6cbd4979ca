// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Interaction Session Log
//!
//! Append-only record of the dialogue between the two roles.
//!
//! ```text
//! InteractionSession
//!   └─ Interaction (unique id per session, typed, with status)
//!        └─ Message (role-tagged, timestamped, immutable)
//! ```
//!
//! ## Invariants
//!
//! - Interaction ids are unique within a session;
//!   [`InteractionSession::add_interaction`] rejects a collision with
//!   [`InteractionError::DuplicateId`].
//! - Interactions and messages are only ever appended, so both sequences are
//!   chronological.
//! - Appending a message refreshes the interaction's `updated_at`; appending an
//!   interaction refreshes the session's `updated_at`.
//! - Lookups never fail: a missing id or an empty log yields `None`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::domain::catalog::Role;

/// Free-form metadata attached to sessions, interactions and messages.
pub type Metadata = HashMap<String, serde_json::Value>;

/// Generate a fresh random identifier for a session or interaction.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InteractionType {
    /// Human instructs AI
    Instruction,
    /// AI responds to human
    Response,
    /// AI asks for clarification
    Clarification,
    /// Human provides feedback
    Feedback,
    /// AI provides a suggestion
    Suggestion,
    /// Human makes a decision
    Decision,
    /// AI provides a status update
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InteractionStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
    Cancelled,
}

impl Default for InteractionStatus {
    fn default() -> Self {
        Self::Pending
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InteractionError {
    #[error("Interaction '{0}' already exists in this session")]
    DuplicateId(String),
}

/// One role-tagged utterance. Never mutated after it is appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    content: String,
    role: Role,
    timestamp: DateTime<Utc>,
    metadata: Metadata,
}

impl Message {
    fn new(content: String, role: Role, metadata: Metadata) -> Self {
        Self {
            content,
            role,
            timestamp: Utc::now(),
            metadata,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.role.display_name(),
            self.content
        )
    }
}

/// One logged unit of exchange, owned by exactly one [`InteractionSession`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    id: String,
    interaction_type: InteractionType,
    status: InteractionStatus,
    messages: Vec<Message>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    metadata: Metadata,
}

impl Interaction {
    fn new(
        id: String,
        interaction_type: InteractionType,
        status: InteractionStatus,
        metadata: Metadata,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            interaction_type,
            status,
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
            metadata,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn interaction_type(&self) -> InteractionType {
        self.interaction_type
    }

    pub fn status(&self) -> InteractionStatus {
        self.status
    }

    pub fn set_status(&mut self, status: InteractionStatus) {
        self.status = status;
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Append a message without metadata.
    pub fn add_message(&mut self, content: impl Into<String>, role: Role) -> &Message {
        self.add_message_with(content, role, Metadata::new())
    }

    /// Append a message stamped with the current time and refresh `updated_at`.
    pub fn add_message_with(
        &mut self,
        content: impl Into<String>,
        role: Role,
        metadata: Metadata,
    ) -> &Message {
        let message = Message::new(content.into(), role, metadata);
        self.updated_at = message.timestamp;
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    pub fn get_last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn get_messages_by_role(&self, role: Role) -> Vec<&Message> {
        self.messages.iter().filter(|m| m.role == role).collect()
    }
}

/// Ordered container of interactions for one continuous usage period.
///
/// Deserialization applies the same id uniqueness check as
/// [`InteractionSession::add_interaction`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SessionRecord")]
pub struct InteractionSession {
    id: String,
    interactions: Vec<Interaction>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    metadata: Metadata,
}

/// Unchecked wire shape of [`InteractionSession`].
#[derive(Deserialize)]
struct SessionRecord {
    id: String,
    interactions: Vec<Interaction>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default)]
    metadata: Metadata,
}

impl TryFrom<SessionRecord> for InteractionSession {
    type Error = InteractionError;

    fn try_from(record: SessionRecord) -> Result<Self, Self::Error> {
        {
            let mut seen = HashSet::with_capacity(record.interactions.len());
            if let Some(duplicate) = record.interactions.iter().find(|i| !seen.insert(i.id.as_str())) {
                return Err(InteractionError::DuplicateId(duplicate.id.clone()));
            }
        }

        Ok(Self {
            id: record.id,
            interactions: record.interactions,
            created_at: record.created_at,
            updated_at: record.updated_at,
            metadata: record.metadata,
        })
    }
}

impl InteractionSession {
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_metadata(id, Metadata::new())
    }

    pub fn with_metadata(id: impl Into<String>, metadata: Metadata) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            interactions: Vec::new(),
            created_at: now,
            updated_at: now,
            metadata,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn interactions(&self) -> &[Interaction] {
        &self.interactions
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Append a `Pending` interaction with no metadata.
    pub fn add_interaction(
        &mut self,
        id: impl Into<String>,
        interaction_type: InteractionType,
    ) -> Result<&mut Interaction, InteractionError> {
        self.add_interaction_with(id, interaction_type, InteractionStatus::default(), Metadata::new())
    }

    /// Append a new interaction and refresh the session's `updated_at`.
    ///
    /// # Errors
    ///
    /// [`InteractionError::DuplicateId`] if `id` is already used in this session.
    pub fn add_interaction_with(
        &mut self,
        id: impl Into<String>,
        interaction_type: InteractionType,
        status: InteractionStatus,
        metadata: Metadata,
    ) -> Result<&mut Interaction, InteractionError> {
        let id = id.into();
        if self.get_interaction(&id).is_some() {
            return Err(InteractionError::DuplicateId(id));
        }

        debug!(session_id = %self.id, interaction_id = %id, "Adding {:?} interaction", interaction_type);

        let interaction = Interaction::new(id, interaction_type, status, metadata);
        self.updated_at = interaction.created_at;
        self.interactions.push(interaction);

        let last = self.interactions.len() - 1;
        Ok(&mut self.interactions[last])
    }

    pub fn get_interaction(&self, id: &str) -> Option<&Interaction> {
        self.interactions.iter().find(|i| i.id == id)
    }

    pub fn get_interaction_mut(&mut self, id: &str) -> Option<&mut Interaction> {
        self.interactions.iter_mut().find(|i| i.id == id)
    }

    pub fn get_latest_interaction(&self) -> Option<&Interaction> {
        self.interactions.last()
    }
}
