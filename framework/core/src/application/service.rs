// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Service Lifecycle Shell
//!
//! A [`Service`] is explicitly initialised and shut down; nothing starts on
//! construction. [`ServiceGuard`] provides scoped acquisition: it initialises
//! on [`ServiceGuard::acquire`] and shuts the service down when dropped, on
//! every exit path.
//!
//! [`FrameworkService`] hosts one [`Framework`] aggregate built from its
//! configuration, falling back to the defaults when that configuration cannot
//! be resolved.

use serde_json::Value;
use std::any::Any;
use std::ops::{Deref, DerefMut};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::application::factory::FrameworkFactory;
use crate::domain::framework::Framework;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Service '{0}' is not initialized")]
    NotInitialized(String),

    #[error("Service '{0}' is already registered")]
    AlreadyRegistered(String),

    #[error("Service '{0}' is not registered")]
    NotRegistered(String),

    #[error("Service '{name}' is not of type {expected}")]
    TypeMismatch { name: String, expected: &'static str },
}

/// Lifecycle contract shared by every registered service.
pub trait Service: Any {
    /// Bring the service up. Calling this on an initialised service is a no-op.
    fn initialize(&mut self) -> Result<(), ServiceError>;

    /// Release whatever `initialize` acquired.
    fn shutdown(&mut self);

    fn is_initialized(&self) -> bool;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Initialises a service for the lifetime of the guard.
pub struct ServiceGuard<'a, S: Service> {
    service: &'a mut S,
}

impl<'a, S: Service> ServiceGuard<'a, S> {
    pub fn acquire(service: &'a mut S) -> Result<Self, ServiceError> {
        service.initialize()?;
        Ok(Self { service })
    }
}

impl<S: Service> Deref for ServiceGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.service
    }
}

impl<S: Service> DerefMut for ServiceGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.service
    }
}

impl<S: Service> Drop for ServiceGuard<'_, S> {
    fn drop(&mut self) {
        if self.service.is_initialized() {
            self.service.shutdown();
        }
    }
}

/// Hosts the framework aggregate for the rest of the application.
#[derive(Debug, Default)]
pub struct FrameworkService {
    config: Option<Value>,
    framework: Option<Framework>,
}

impl FrameworkService {
    pub const NAME: &'static str = "FrameworkService";

    /// `config` may be the whole application configuration (its `framework`
    /// section is used) or the framework section itself.
    pub fn new(config: Option<Value>) -> Self {
        Self {
            config,
            framework: None,
        }
    }

    fn framework_config(&self) -> Option<&Value> {
        let config = self.config.as_ref()?;
        let section = config.get("framework").unwrap_or(config);
        match section {
            Value::Null => None,
            Value::Object(map) if map.is_empty() => None,
            other => Some(other),
        }
    }

    fn build_framework(&self) -> Framework {
        let Some(config) = self.framework_config() else {
            debug!("Creating default framework");
            return FrameworkFactory::create_default();
        };

        debug!("Creating framework from configuration");
        match FrameworkFactory::create_from_config(config) {
            Ok(framework) => framework,
            Err(e) => {
                error!("Failed to create framework from configuration: {}", e);
                info!("Falling back to default framework");
                FrameworkFactory::create_default()
            }
        }
    }

    pub fn framework(&self) -> Result<&Framework, ServiceError> {
        self.framework
            .as_ref()
            .ok_or_else(|| ServiceError::NotInitialized(Self::NAME.to_string()))
    }

    pub fn framework_mut(&mut self) -> Result<&mut Framework, ServiceError> {
        self.framework
            .as_mut()
            .ok_or_else(|| ServiceError::NotInitialized(Self::NAME.to_string()))
    }

    pub fn generate_framework_summary(&self) -> Result<String, ServiceError> {
        Ok(self.framework()?.generate_framework_summary())
    }
}

impl Service for FrameworkService {
    fn initialize(&mut self) -> Result<(), ServiceError> {
        if self.framework.is_some() {
            debug!("Framework service already initialized");
            return Ok(());
        }

        info!("Initializing framework service");
        self.framework = Some(self.build_framework());
        info!("Framework service initialized");
        Ok(())
    }

    fn shutdown(&mut self) {
        info!("Shutting down framework service");
        self.framework = None;
    }

    fn is_initialized(&self) -> bool {
        self.framework.is_some()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
