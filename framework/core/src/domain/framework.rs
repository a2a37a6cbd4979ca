// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Framework Aggregate
//!
//! [`Framework`] owns the [`ResponsibilityLedger`] and one active set per
//! policy catalog. All mutation goes through its own methods; nothing hands
//! out mutable access to the ledger or the sets.
//!
//! ## Summary rendering
//!
//! [`Framework::generate_framework_summary`] only lists the *active* ethical
//! principles, but always prints the full protocol, feedback, improvement and
//! workflow blocks regardless of which members are active. Callers rely on
//! that exact text, so the asymmetry is kept as-is.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

use crate::domain::catalog::{
    CatalogItem, CollaborationWorkflow, CommunicationProtocol, EthicalPrinciple,
    FeedbackMechanism, ImprovementProcess, Role,
};
use crate::domain::responsibility::{ResponsibilityLedger, RoleResponsibility};

pub const DEFAULT_HUMAN_RESPONSIBILITIES: [&str; 3] = [
    "Define vision, strategic objectives, and contextual expertise",
    "Provide clear instructions, ongoing feedback, and ethical oversight",
    "Make final decisions based on comprehensive information",
];

pub const DEFAULT_AI_RESPONSIBILITIES: [&str; 3] = [
    "Generate data-driven insights, technical solutions, and creative recommendations",
    "Adhere to ethical guidelines and respond to instructions with precision",
    "Engage in iterative improvements and document reasoning behind suggestions",
];

const SUMMARY_HEADER: &[&str] = &[
    "Human-AI Interaction Framework for Digital Product Design and Development",
    "\nPurpose:",
    "  Establish a robust, ethical, and transparent collaborative framework between human users",
    "  and AI systems to drive innovation in digital product design and development.",
    "\n1. Roles and Responsibilities:",
];

const SUMMARY_FIXED_SECTIONS: &[&str] = &[
    "\n3. Communication Protocols:",
    "   - Structured Dialogue: Clear, concise directives and contextual, actionable responses.",
    "   - Clarification Protocols: Request additional details when instructions are unclear.",
    "   - Consistency: Maintain standards for formatting, terminology, and response structure.",
    "\n4. Feedback Mechanisms:",
    "   - Immediate Feedback: Real-time feedback for rapid adjustments.",
    "   - Scheduled Reviews: Regular check-ins to assess process efficacy.",
    "   - Issue Tracking: Maintain a shared log to record challenges and resolutions.",
    "\n5. Iterative Improvement Processes:",
    "   - Continuous Learning: Integrate updated domain knowledge and best practices.",
    "   - Retrospective Analysis: Evaluate each development cycle for lessons learned.",
    "   - Incremental Enhancements: Implement small updates that drive long-term progress.",
    "\n6. Collaborative Workflow:",
    "   - Task Distribution: Clearly delineate responsibilities and establish milestones.",
    "   - Communication Channels: Utilize structured channels for all interactions.",
    "   - Documentation: Archive decisions, feedback, and process updates.",
    "\nCommitment:",
    "  Both human users and AI systems commit to operating within this framework, ensuring that",
    "  collaborative efforts are effective, ethically sound, and continuously evolving to meet",
    "  the needs of digital product innovation.",
];

/// Aggregate root for one configured framework instance.
///
/// # Invariants
///
/// - Responsibilities listed under a role always carry that role, including
///   after deserialization (the ledger rejects misfiled entries).
/// - Each active set holds a member at most once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Framework {
    responsibilities: ResponsibilityLedger,
    active_principles: BTreeSet<EthicalPrinciple>,
    active_protocols: BTreeSet<CommunicationProtocol>,
    active_feedback_mechanisms: BTreeSet<FeedbackMechanism>,
    active_improvement_processes: BTreeSet<ImprovementProcess>,
    active_workflows: BTreeSet<CollaborationWorkflow>,
}

impl Framework {
    /// Create a framework populated with the default responsibilities and
    /// every catalog member marked active.
    pub fn new() -> Self {
        let mut framework = Self {
            responsibilities: ResponsibilityLedger::new(),
            active_principles: BTreeSet::new(),
            active_protocols: BTreeSet::new(),
            active_feedback_mechanisms: BTreeSet::new(),
            active_improvement_processes: BTreeSet::new(),
            active_workflows: BTreeSet::new(),
        };
        framework.populate_defaults();
        framework
    }

    fn populate_defaults(&mut self) {
        for description in DEFAULT_HUMAN_RESPONSIBILITIES {
            self.add_responsibility(Role::Human, description);
        }
        for description in DEFAULT_AI_RESPONSIBILITIES {
            self.add_responsibility(Role::Ai, description);
        }

        EthicalPrinciple::ALL.iter().for_each(|p| self.add_ethical_principle(*p));
        CommunicationProtocol::ALL.iter().for_each(|p| self.add_communication_protocol(*p));
        FeedbackMechanism::ALL.iter().for_each(|m| self.add_feedback_mechanism(*m));
        ImprovementProcess::ALL.iter().for_each(|p| self.add_improvement_process(*p));
        CollaborationWorkflow::ALL.iter().for_each(|w| self.add_collaboration_workflow(*w));
    }

    /// Drop every responsibility and deactivate every catalog member.
    pub(crate) fn clear(&mut self) {
        self.responsibilities.clear();
        self.active_principles.clear();
        self.active_protocols.clear();
        self.active_feedback_mechanisms.clear();
        self.active_improvement_processes.clear();
        self.active_workflows.clear();
    }

    pub fn add_responsibility(&mut self, role: Role, description: impl Into<String>) {
        let description = description.into();
        debug!(role = %role, "Adding responsibility: {}", description);
        self.responsibilities.push(role, description);
    }

    pub fn add_ethical_principle(&mut self, principle: EthicalPrinciple) {
        self.active_principles.insert(principle);
    }

    pub fn add_communication_protocol(&mut self, protocol: CommunicationProtocol) {
        self.active_protocols.insert(protocol);
    }

    pub fn add_feedback_mechanism(&mut self, mechanism: FeedbackMechanism) {
        self.active_feedback_mechanisms.insert(mechanism);
    }

    pub fn add_improvement_process(&mut self, process: ImprovementProcess) {
        self.active_improvement_processes.insert(process);
    }

    pub fn add_collaboration_workflow(&mut self, workflow: CollaborationWorkflow) {
        self.active_workflows.insert(workflow);
    }

    /// Responsibilities for `role` in the order they were added. May be empty.
    pub fn get_responsibilities_by_role(&self, role: Role) -> &[RoleResponsibility] {
        self.responsibilities.for_role(role)
    }

    pub fn responsibilities(&self) -> &ResponsibilityLedger {
        &self.responsibilities
    }

    pub fn active_principles(&self) -> &BTreeSet<EthicalPrinciple> {
        &self.active_principles
    }

    pub fn active_protocols(&self) -> &BTreeSet<CommunicationProtocol> {
        &self.active_protocols
    }

    pub fn active_feedback_mechanisms(&self) -> &BTreeSet<FeedbackMechanism> {
        &self.active_feedback_mechanisms
    }

    pub fn active_improvement_processes(&self) -> &BTreeSet<ImprovementProcess> {
        &self.active_improvement_processes
    }

    pub fn active_workflows(&self) -> &BTreeSet<CollaborationWorkflow> {
        &self.active_workflows
    }

    /// Render the human-readable framework report.
    ///
    /// Output is deterministic: responsibilities appear in insertion order and
    /// active principles in catalog declaration order.
    pub fn generate_framework_summary(&self) -> String {
        let mut lines: Vec<String> = SUMMARY_HEADER.iter().map(|l| l.to_string()).collect();

        lines.push("   a) Human User:".to_string());
        for resp in self.get_responsibilities_by_role(Role::Human) {
            lines.push(format!("      - {}", resp.description()));
        }

        lines.push("   b) AI System:".to_string());
        for resp in self.get_responsibilities_by_role(Role::Ai) {
            lines.push(format!("      - {}", resp.description()));
        }

        lines.push("\n2. Ethical Considerations:".to_string());
        for principle in &self.active_principles {
            lines.push(format!("   - {}", principle.summary_line()));
        }

        lines.extend(SUMMARY_FIXED_SECTIONS.iter().map(|l| l.to_string()));

        lines.join("\n")
    }
}

impl Default for Framework {
    fn default() -> Self {
        Self::new()
    }
}
