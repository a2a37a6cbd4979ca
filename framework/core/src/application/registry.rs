// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Service Registry - named ownership of every long-lived service
//
// The registry is an ordinary value owned by the application context; there is
// no process-wide instance. Services are kept in registration order, which is
// also the order used by initialize_all and shutdown_all.

use tracing::{debug, info};

use crate::application::service::{Service, ServiceError};

#[derive(Default)]
pub struct ServiceRegistry {
    services: Vec<(String, Box<dyn Service>)>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a service under `name`.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        service: Box<dyn Service>,
    ) -> Result<(), ServiceError> {
        let name = name.into();
        if self.contains(&name) {
            return Err(ServiceError::AlreadyRegistered(name));
        }

        debug!("Registered service: {}", name);
        self.services.push((name, service));
        Ok(())
    }

    /// Remove a service, shutting it down first if it is running.
    pub fn unregister(&mut self, name: &str) -> Result<Box<dyn Service>, ServiceError> {
        let index = self
            .position(name)
            .ok_or_else(|| ServiceError::NotRegistered(name.to_string()))?;

        let (_, mut service) = self.services.remove(index);
        if service.is_initialized() {
            service.shutdown();
        }

        debug!("Unregistered service: {}", name);
        Ok(service)
    }

    /// Look up a service, initialising it first when `initialize` is set.
    pub fn get(&mut self, name: &str, initialize: bool) -> Result<&mut dyn Service, ServiceError> {
        let index = self
            .position(name)
            .ok_or_else(|| ServiceError::NotRegistered(name.to_string()))?;

        let service = self.services[index].1.as_mut();
        if initialize && !service.is_initialized() {
            service.initialize()?;
        }
        Ok(service)
    }

    /// Typed variant of [`ServiceRegistry::get`].
    pub fn get_typed<T: Service>(&mut self, name: &str, initialize: bool) -> Result<&mut T, ServiceError> {
        let service = self.get(name, initialize)?;
        service
            .as_any_mut()
            .downcast_mut::<T>()
            .ok_or_else(|| ServiceError::TypeMismatch {
                name: name.to_string(),
                expected: std::any::type_name::<T>(),
            })
    }

    pub fn initialize_all(&mut self) -> Result<(), ServiceError> {
        info!("Initializing all services");
        for (name, service) in self.services.iter_mut() {
            if !service.is_initialized() {
                debug!("Initializing service: {}", name);
                service.initialize()?;
            }
        }
        Ok(())
    }

    pub fn shutdown_all(&mut self) {
        info!("Shutting down all services");
        for (name, service) in self.services.iter_mut() {
            if service.is_initialized() {
                debug!("Shutting down service: {}", name);
                service.shutdown();
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Registered names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.services.iter().map(|(name, _)| name.as_str()).collect()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.services.iter().position(|(n, _)| n == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::service::FrameworkService;
    use std::any::Any;

    /// Minimal service used to check ordering and type checks.
    #[derive(Default)]
    struct CountingService {
        running: bool,
        starts: usize,
        stops: usize,
    }

    impl Service for CountingService {
        fn initialize(&mut self) -> Result<(), ServiceError> {
            if !self.running {
                self.running = true;
                self.starts += 1;
            }
            Ok(())
        }

        fn shutdown(&mut self) {
            self.running = false;
            self.stops += 1;
        }

        fn is_initialized(&self) -> bool {
            self.running
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let mut registry = ServiceRegistry::new();
        registry.register("framework", Box::new(FrameworkService::new(None))).unwrap();
        let err = registry
            .register("framework", Box::new(FrameworkService::new(None)))
            .unwrap_err();
        assert_eq!(err, ServiceError::AlreadyRegistered("framework".to_string()));
        assert!(registry.contains("framework"));
        assert_eq!(registry.names(), vec!["framework"]);
    }

    #[test]
    fn test_get_initializes_on_demand() {
        let mut registry = ServiceRegistry::new();
        registry.register("framework", Box::new(FrameworkService::new(None))).unwrap();

        assert!(!registry.get("framework", false).unwrap().is_initialized());
        assert!(registry.get("framework", true).unwrap().is_initialized());
    }

    #[test]
    fn test_get_unknown_service() {
        let mut registry = ServiceRegistry::new();
        assert_eq!(
            registry.get("missing", true).err(),
            Some(ServiceError::NotRegistered("missing".to_string()))
        );
        assert!(registry.unregister("missing").is_err());
    }

    #[test]
    fn test_get_typed() {
        let mut registry = ServiceRegistry::new();
        registry.register("framework", Box::new(FrameworkService::new(None))).unwrap();
        registry.register("counter", Box::new(CountingService::default())).unwrap();

        let framework = registry.get_typed::<FrameworkService>("framework", true).unwrap();
        assert!(framework.generate_framework_summary().is_ok());

        let err = registry.get_typed::<FrameworkService>("counter", false).err().unwrap();
        assert!(matches!(err, ServiceError::TypeMismatch { ref name, .. } if name == "counter"));
    }

    #[test]
    fn test_bulk_lifecycle_skips_services_in_target_state() {
        let mut registry = ServiceRegistry::new();
        registry.register("a", Box::new(CountingService::default())).unwrap();
        registry.register("b", Box::new(CountingService::default())).unwrap();

        registry.get("a", true).unwrap();
        registry.initialize_all().unwrap();
        registry.initialize_all().unwrap();
        assert_eq!(registry.get_typed::<CountingService>("a", false).unwrap().starts, 1);
        assert_eq!(registry.get_typed::<CountingService>("b", false).unwrap().starts, 1);

        registry.shutdown_all();
        registry.shutdown_all();
        let a = registry.get_typed::<CountingService>("a", false).unwrap();
        assert!(!a.is_initialized());
        assert_eq!(a.stops, 1);
    }

    #[test]
    fn test_unregister_shuts_down_running_service() {
        let mut registry = ServiceRegistry::new();
        registry.register("a", Box::new(CountingService::default())).unwrap();
        registry.get("a", true).unwrap();

        let service = registry.unregister("a").unwrap();
        assert!(!service.is_initialized());
        assert!(!registry.contains("a"));
        let counter = service.as_any().downcast_ref::<CountingService>().unwrap();
        assert_eq!(counter.stops, 1);
    }
}
