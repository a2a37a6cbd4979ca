// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! AI side of the chat loop
//!
//! [`Responder`] is the seam where a real model would plug in. The shipped
//! [`RuleBasedResponder`] answers from a fixed table of keyword rules.

/// Produces the AI reply for one human input line.
pub trait Responder {
    fn respond(&self, input: &str) -> String;
}

const GREETING: &str = "Hello! How can I assist you with the Human-AI Interaction Framework today?";
const FRAMEWORK: &str = "The Human-AI Interaction Framework establishes a robust, ethical, and transparent collaborative framework between human users and AI systems for digital product design and development.";
const ROLES: &str = "In the framework, humans define vision and strategy, while AI generates insights and technical solutions. Both work together within ethical guidelines.";
const ETHICS: &str = "The framework emphasizes transparency, accountability, privacy, and fairness in all interactions between humans and AI.";
const COMMUNICATION: &str = "Communication in the framework follows structured dialogues, clarification protocols, and consistency standards to ensure effective collaboration.";
const FEEDBACK: &str = "The framework incorporates immediate feedback, scheduled reviews, and issue tracking to continuously improve human-AI collaboration.";
const HELP: &str = "You can ask me about the framework, roles and responsibilities, ethical considerations, communication protocols, feedback mechanisms, or type 'help' for available commands.";
const FALLBACK: &str = "I understand your input, but I'm currently operating with limited capabilities. In a production environment, I would provide more meaningful responses based on the framework's principles.";

/// Keyword rules, checked in order. The first rule with any keyword contained
/// in the lowercased input wins. Matching is plain substring search, so "this"
/// triggers the greeting.
const RULES: &[(&[&str], &str)] = &[
    (&["hello", "hi"], GREETING),
    (&["framework"], FRAMEWORK),
    (&["role", "responsibility"], ROLES),
    (&["ethical"], ETHICS),
    (&["communication"], COMMUNICATION),
    (&["feedback"], FEEDBACK),
    (&["help"], HELP),
];

#[derive(Debug, Default, Clone, Copy)]
pub struct RuleBasedResponder;

impl Responder for RuleBasedResponder {
    fn respond(&self, input: &str) -> String {
        let input = input.to_lowercase();
        RULES
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| input.contains(k)))
            .map_or(FALLBACK, |&(_, reply)| reply)
            .to_string()
    }
}
