// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Catalog Enumerations
//!
//! Closed identifier sets for the five policy areas of the framework, plus the
//! [`Role`] of a participant. Every catalog is fixed at build time; members
//! are compared by identity and looked up by their canonical upper-case name
//! through [`CatalogItem::from_name`].
//!
//! Declaration order doubles as the ordering used by the framework's active
//! sets, which keeps rendered output stable.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Participant kind that originates a responsibility or a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Human,
    Ai,
}

impl Role {
    pub const ALL: &'static [Role] = &[Role::Human, Role::Ai];

    /// Canonical name ("HUMAN" / "AI").
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Human => "HUMAN",
            Role::Ai => "AI",
        }
    }

    /// Name used when rendering dialogue.
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Human => "Human",
            Role::Ai => "AI",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Shared behaviour of the five policy catalogs.
pub trait CatalogItem: Copy + Eq + Ord + fmt::Debug + 'static {
    /// Configuration key under which members of this catalog are listed.
    const CONFIG_KEY: &'static str;

    /// Every member, in declaration order.
    const ALL: &'static [Self];

    /// Canonical upper-case name of the member.
    fn name(&self) -> &'static str;

    /// Exact, case-sensitive lookup by canonical name.
    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|item| item.name() == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EthicalPrinciple {
    Transparency,
    Accountability,
    Privacy,
    Fairness,
}

impl EthicalPrinciple {
    /// Fixed explanatory line rendered in the framework summary.
    pub fn summary_line(&self) -> &'static str {
        match self {
            Self::Transparency => {
                "Transparency: Clearly explain AI suggestions and underlying decision processes."
            }
            Self::Accountability => {
                "Accountability: Ensure human oversight remains central to final decision-making."
            }
            Self::Privacy => {
                "Privacy: Protect personal and sensitive data in accordance with legal standards."
            }
            Self::Fairness => {
                "Fairness: Actively mitigate biases and promote inclusivity in all outputs."
            }
        }
    }
}

impl CatalogItem for EthicalPrinciple {
    const CONFIG_KEY: &'static str = "ethical_principles";
    const ALL: &'static [Self] = &[
        Self::Transparency,
        Self::Accountability,
        Self::Privacy,
        Self::Fairness,
    ];

    fn name(&self) -> &'static str {
        match self {
            Self::Transparency => "TRANSPARENCY",
            Self::Accountability => "ACCOUNTABILITY",
            Self::Privacy => "PRIVACY",
            Self::Fairness => "FAIRNESS",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommunicationProtocol {
    StructuredDialogue,
    Clarification,
    Consistency,
}

impl CatalogItem for CommunicationProtocol {
    const CONFIG_KEY: &'static str = "communication_protocols";
    const ALL: &'static [Self] = &[
        Self::StructuredDialogue,
        Self::Clarification,
        Self::Consistency,
    ];

    fn name(&self) -> &'static str {
        match self {
            Self::StructuredDialogue => "STRUCTURED_DIALOGUE",
            Self::Clarification => "CLARIFICATION",
            Self::Consistency => "CONSISTENCY",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeedbackMechanism {
    Immediate,
    Scheduled,
    IssueTracking,
}

impl CatalogItem for FeedbackMechanism {
    const CONFIG_KEY: &'static str = "feedback_mechanisms";
    const ALL: &'static [Self] = &[Self::Immediate, Self::Scheduled, Self::IssueTracking];

    fn name(&self) -> &'static str {
        match self {
            Self::Immediate => "IMMEDIATE",
            Self::Scheduled => "SCHEDULED",
            Self::IssueTracking => "ISSUE_TRACKING",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImprovementProcess {
    ContinuousLearning,
    RetrospectiveAnalysis,
    IncrementalEnhancement,
}

impl CatalogItem for ImprovementProcess {
    const CONFIG_KEY: &'static str = "improvement_processes";
    const ALL: &'static [Self] = &[
        Self::ContinuousLearning,
        Self::RetrospectiveAnalysis,
        Self::IncrementalEnhancement,
    ];

    fn name(&self) -> &'static str {
        match self {
            Self::ContinuousLearning => "CONTINUOUS_LEARNING",
            Self::RetrospectiveAnalysis => "RETROSPECTIVE_ANALYSIS",
            Self::IncrementalEnhancement => "INCREMENTAL_ENHANCEMENT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CollaborationWorkflow {
    TaskDistribution,
    CommunicationChannels,
    Documentation,
}

impl CatalogItem for CollaborationWorkflow {
    const CONFIG_KEY: &'static str = "collaboration_workflows";
    const ALL: &'static [Self] = &[
        Self::TaskDistribution,
        Self::CommunicationChannels,
        Self::Documentation,
    ];

    fn name(&self) -> &'static str {
        match self {
            Self::TaskDistribution => "TASK_DISTRIBUTION",
            Self::CommunicationChannels => "COMMUNICATION_CHANNELS",
            Self::Documentation => "DOCUMENTATION",
        }
    }
}
