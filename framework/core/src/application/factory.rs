// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Framework Factory
//!
//! Three ways to build a [`Framework`]:
//!
//! | Entry point | Result |
//! |-------------|--------|
//! | [`FrameworkFactory::create_default`] | default responsibilities, every catalog member active |
//! | [`FrameworkFactory::create_custom`] | only the supplied items; omitted categories stay empty |
//! | [`FrameworkFactory::create_from_config`] | names resolved from a configuration mapping |
//!
//! Configuration resolution drops catalog names that match no member and
//! fails with [`ConfigurationError`] only when the mapping has the wrong
//! shape (a scalar where a list is expected, a non-string list element).

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::catalog::{
    CatalogItem, CollaborationWorkflow, CommunicationProtocol, EthicalPrinciple,
    FeedbackMechanism, ImprovementProcess, Role,
};
use crate::domain::framework::Framework;

pub const HUMAN_RESPONSIBILITIES_KEY: &str = "human_responsibilities";
pub const AI_RESPONSIBILITIES_KEY: &str = "ai_responsibilities";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Invalid configuration format: expected a mapping, found {0}")]
    NotAMapping(&'static str),

    #[error("Invalid configuration format: '{key}' must be a list, found {found}")]
    ExpectedList { key: String, found: &'static str },

    #[error("Invalid configuration format: '{key}[{index}]' must be a string, found {found}")]
    ExpectedString {
        key: String,
        index: usize,
        found: &'static str,
    },
}

/// Explicit contents for [`FrameworkFactory::create_custom`].
///
/// `None` and an empty list behave the same: the category is left empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomFramework {
    pub human_responsibilities: Option<Vec<String>>,
    pub ai_responsibilities: Option<Vec<String>>,
    pub ethical_principles: Option<Vec<EthicalPrinciple>>,
    pub communication_protocols: Option<Vec<CommunicationProtocol>>,
    pub feedback_mechanisms: Option<Vec<FeedbackMechanism>>,
    pub improvement_processes: Option<Vec<ImprovementProcess>>,
    pub collaboration_workflows: Option<Vec<CollaborationWorkflow>>,
}

pub struct FrameworkFactory;

impl FrameworkFactory {
    pub fn create_default() -> Framework {
        Framework::new()
    }

    /// Build a framework holding exactly the supplied items.
    pub fn create_custom(custom: CustomFramework) -> Framework {
        let mut framework = Framework::new();
        framework.clear();

        for description in custom.human_responsibilities.into_iter().flatten() {
            framework.add_responsibility(Role::Human, description);
        }
        for description in custom.ai_responsibilities.into_iter().flatten() {
            framework.add_responsibility(Role::Ai, description);
        }
        for principle in custom.ethical_principles.into_iter().flatten() {
            framework.add_ethical_principle(principle);
        }
        for protocol in custom.communication_protocols.into_iter().flatten() {
            framework.add_communication_protocol(protocol);
        }
        for mechanism in custom.feedback_mechanisms.into_iter().flatten() {
            framework.add_feedback_mechanism(mechanism);
        }
        for process in custom.improvement_processes.into_iter().flatten() {
            framework.add_improvement_process(process);
        }
        for workflow in custom.collaboration_workflows.into_iter().flatten() {
            framework.add_collaboration_workflow(workflow);
        }

        framework
    }

    /// Build a framework from a loosely-typed configuration mapping.
    ///
    /// Recognised keys are `human_responsibilities`, `ai_responsibilities` and
    /// the five catalog keys (`ethical_principles`, `communication_protocols`,
    /// `feedback_mechanisms`, `improvement_processes`,
    /// `collaboration_workflows`). Other keys are ignored; a `null` value is
    /// treated as absent.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError`] when `config` is not a mapping or a recognised
    /// key does not hold a list of strings.
    pub fn create_from_config(config: &Value) -> Result<Framework, ConfigurationError> {
        let config = config
            .as_object()
            .ok_or_else(|| ConfigurationError::NotAMapping(value_kind(config)))?;

        let custom = CustomFramework {
            human_responsibilities: string_list(config, HUMAN_RESPONSIBILITIES_KEY)?,
            ai_responsibilities: string_list(config, AI_RESPONSIBILITIES_KEY)?,
            ethical_principles: catalog_list(config)?,
            communication_protocols: catalog_list(config)?,
            feedback_mechanisms: catalog_list(config)?,
            improvement_processes: catalog_list(config)?,
            collaboration_workflows: catalog_list(config)?,
        };

        debug!("Resolved framework configuration: {:?}", custom);
        Ok(Self::create_custom(custom))
    }
}

fn string_list(
    config: &Map<String, Value>,
    key: &str,
) -> Result<Option<Vec<String>>, ConfigurationError> {
    let items = match config.get(key) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(ConfigurationError::ExpectedList {
                key: key.to_string(),
                found: value_kind(other),
            })
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::String(s) => Ok(s.clone()),
            other => Err(ConfigurationError::ExpectedString {
                key: key.to_string(),
                index,
                found: value_kind(other),
            }),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

fn catalog_list<T: CatalogItem>(
    config: &Map<String, Value>,
) -> Result<Option<Vec<T>>, ConfigurationError> {
    let Some(names) = string_list(config, T::CONFIG_KEY)? else {
        return Ok(None);
    };

    let resolved = names
        .iter()
        .filter_map(|name| {
            let item = T::from_name(name);
            if item.is_none() {
                warn!("Ignoring unknown {} entry: '{}'", T::CONFIG_KEY, name);
            }
            item
        })
        .collect();

    Ok(Some(resolved))
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}
