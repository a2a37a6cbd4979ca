// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use haif_core::application::registry::ServiceRegistry;
use haif_core::application::service::{FrameworkService, Service, ServiceError, ServiceGuard};
use haif_core::domain::catalog::{CommunicationProtocol, EthicalPrinciple, Role};
use haif_core::domain::interaction::{InteractionSession, InteractionStatus, InteractionType};
use serde_json::json;

fn registry_with_framework(config: Option<serde_json::Value>) -> ServiceRegistry {
    let mut registry = ServiceRegistry::new();
    registry
        .register("framework", Box::new(FrameworkService::new(config)))
        .unwrap();
    registry
}

#[test]
fn test_service_lifecycle_through_registry() {
    let mut registry = registry_with_framework(None);
    assert!(registry.contains("framework"));
    assert!(!registry.get("framework", false).unwrap().is_initialized());

    registry.initialize_all().unwrap();
    assert!(registry.get("framework", false).unwrap().is_initialized());

    registry.shutdown_all();
    assert!(!registry.get("framework", false).unwrap().is_initialized());

    registry.initialize_all().unwrap();
    let service = registry.get_typed::<FrameworkService>("framework", false).unwrap();
    assert!(service.is_initialized());
    assert_eq!(service.framework().unwrap().responsibilities().len(), 6);
}

#[test]
fn test_framework_mutations_survive_lookups() {
    let mut registry = registry_with_framework(Some(json!({
        "framework": { "ethical_principles": ["FAIRNESS"] }
    })));

    {
        let service = registry.get_typed::<FrameworkService>("framework", true).unwrap();
        let framework = service.framework_mut().unwrap();
        framework.add_ethical_principle(EthicalPrinciple::Transparency);
        framework.add_communication_protocol(CommunicationProtocol::StructuredDialogue);
        framework.add_responsibility(Role::Ai, "Provide clear explanations for decisions and recommendations");
    }

    let service = registry.get_typed::<FrameworkService>("framework", true).unwrap();
    let framework = service.framework().unwrap();
    assert_eq!(framework.active_principles().len(), 2);
    assert_eq!(framework.active_protocols().len(), 1);
    assert_eq!(
        framework.get_responsibilities_by_role(Role::Ai)[0].description(),
        "Provide clear explanations for decisions and recommendations"
    );

    let summary = service.generate_framework_summary().unwrap();
    assert!(summary.contains("Transparency: Clearly explain AI suggestions"));
    assert!(summary.contains("Fairness: Actively mitigate biases"));
}

#[test]
fn test_session_alongside_framework_service() {
    let mut registry = registry_with_framework(None);
    let mut session = InteractionSession::new("test-session");

    let interaction = session
        .add_interaction("test-interaction", InteractionType::Instruction)
        .unwrap();
    interaction.set_status(InteractionStatus::InProgress);
    interaction.add_message("Create a design for a new app interface", Role::Human);

    let summary = registry
        .get_typed::<FrameworkService>("framework", true)
        .unwrap()
        .generate_framework_summary()
        .unwrap();
    interaction.add_message(summary, Role::Ai);
    interaction.set_status(InteractionStatus::Completed);

    let logged = session.get_interaction("test-interaction").unwrap();
    assert_eq!(logged.messages().len(), 2);
    assert!(logged.messages()[1].content().contains("1. Roles and Responsibilities:"));
    assert_eq!(logged.status(), InteractionStatus::Completed);
}

#[test]
fn test_unregistered_service_lookups_fail() {
    let mut registry = ServiceRegistry::new();
    assert_eq!(
        registry.get_typed::<FrameworkService>("framework", true).err(),
        Some(ServiceError::NotRegistered("framework".to_string()))
    );
}

#[test]
fn test_guard_scopes_service_lifetime() {
    let mut service = FrameworkService::new(Some(json!({
        "collaboration_workflows": ["TASK_DISTRIBUTION"]
    })));

    {
        let guard = ServiceGuard::acquire(&mut service).unwrap();
        assert_eq!(guard.framework().unwrap().active_workflows().len(), 1);
    }

    assert!(!service.is_initialized());
    assert_eq!(
        service.framework().unwrap_err(),
        ServiceError::NotInitialized(FrameworkService::NAME.to_string())
    );
}
