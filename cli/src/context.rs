// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Application Context - everything a command needs, owned in one place
//
// Built once in main and handed to commands by &mut:
// - merged configuration (environment, then default.*, then <env>.*)
// - service registry with the framework service under "framework"
// - the file-logging guard, released at shutdown

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;

use haif_core::application::registry::ServiceRegistry;
use haif_core::application::service::FrameworkService;
use haif_core::domain::interaction::{generate_id, InteractionSession, Metadata};
use haif_core::domain::settings::{self, LoggingSettings};
use haif_core::infrastructure::config_loader::{discover_config_dir, ConfigurationManager};

use crate::logging;

/// Top-level configuration key holding the framework definition.
pub const FRAMEWORK_SECTION: &str = "framework";

/// Startup options collected from the command line.
#[derive(Debug, Clone)]
pub struct ContextOptions {
    pub config_dir: Option<PathBuf>,
    pub env: String,
    pub log_level: Option<String>,
}

pub struct AppContext {
    config: ConfigurationManager,
    config_dir: Option<PathBuf>,
    env: String,
    services: ServiceRegistry,
    log_guard: Option<WorkerGuard>,
}

impl AppContext {
    pub const FRAMEWORK_SERVICE: &'static str = "framework";

    /// Load configuration, install logging and bring every service up.
    pub fn build(options: ContextOptions) -> Result<Self> {
        let (config, config_dir) = load_configuration(&options)?;

        let (logging_settings, logging_error) = LoggingSettings::read(config.values());
        let log_guard = logging::init(&logging_settings)?;
        if let Some(e) = logging_error {
            warn!("Ignoring malformed logging section: {}", e);
        }

        let mut context = Self::new(config, config_dir, options.env)?;
        context.log_guard = log_guard;
        context
            .services
            .initialize_all()
            .context("Failed to initialize services")?;

        info!("HAIF started (environment: {})", context.env);
        Ok(context)
    }

    /// Assemble a context around an already-loaded configuration. Services
    /// are registered but not started; the framework service sees only the
    /// `framework` section.
    pub fn new(config: ConfigurationManager, config_dir: Option<PathBuf>, env: impl Into<String>) -> Result<Self> {
        let mut services = ServiceRegistry::new();
        services
            .register(
                Self::FRAMEWORK_SERVICE,
                Box::new(FrameworkService::new(config.get(FRAMEWORK_SECTION).cloned())),
            )
            .context("Failed to register framework service")?;

        Ok(Self {
            config,
            config_dir,
            env: env.into(),
            services,
            log_guard: None,
        })
    }

    pub fn config(&self) -> &ConfigurationManager {
        &self.config
    }

    /// Directory the configuration files were loaded from, if any.
    pub fn config_dir(&self) -> Option<&Path> {
        self.config_dir.as_deref()
    }

    pub fn env(&self) -> &str {
        &self.env
    }

    pub fn services(&mut self) -> &mut ServiceRegistry {
        &mut self.services
    }

    /// The framework service, started on first use.
    pub fn framework_service(&mut self) -> Result<&mut FrameworkService> {
        self.services
            .get_typed::<FrameworkService>(Self::FRAMEWORK_SERVICE, true)
            .context("Framework service unavailable")
    }

    /// Open a fresh interaction session tagged with the configured environment.
    pub fn new_session(&self) -> InteractionSession {
        let mut metadata = Metadata::new();
        metadata.insert(
            "environment".to_string(),
            Value::String(settings::environment(self.config.values())),
        );

        let session = InteractionSession::with_metadata(generate_id(), metadata);
        info!("Created new session: {}", session.id());
        session
    }

    /// Stop every service and flush file logging. Safe to call twice.
    pub fn shutdown(&mut self) {
        self.services.shutdown_all();
        if self.log_guard.take().is_some() {
            debug!("Log writer flushed");
        }
    }
}

fn load_configuration(options: &ContextOptions) -> Result<(ConfigurationManager, Option<PathBuf>)> {
    let mut config = ConfigurationManager::default();
    config.load_from_env();

    let config_dir = discover_config_dir(options.config_dir.as_deref())
        .context("Failed to resolve configuration directory")?;
    match &config_dir {
        Some(dir) => {
            config
                .load_hierarchical(dir, &options.env)
                .with_context(|| format!("Failed to load configuration from {:?}", dir))?;
        }
        None => debug!("No configuration directory found, using environment only"),
    }

    if let Some(level) = &options.log_level {
        config.set("log_level", Value::String(level.clone()));
    }

    Ok((config, config_dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use haif_core::application::service::Service;
    use haif_core::infrastructure::config_loader::ConfigLoadError;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn options(dir: &Path, env: &str) -> ContextOptions {
        ContextOptions {
            config_dir: Some(dir.to_path_buf()),
            env: env.to_string(),
            log_level: Some("DEBUG".to_string()),
        }
    }

    #[test]
    fn test_load_configuration_layers_files_and_flags() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("default.yaml"),
            "environment: development\nframework:\n  ethical_principles: [PRIVACY]\n",
        )
        .unwrap();
        fs::write(dir.path().join("production.yaml"), "environment: production\n").unwrap();

        let (config, config_dir) = load_configuration(&options(dir.path(), "production")).unwrap();
        assert_eq!(config_dir.as_deref(), Some(dir.path()));
        assert_eq!(config.get_str("environment"), Some("production"));
        assert_eq!(config.get_str("log_level"), Some("DEBUG"));
        assert_eq!(
            config.get("framework"),
            Some(&json!({ "ethical_principles": ["PRIVACY"] }))
        );
    }

    #[test]
    fn test_load_configuration_reports_broken_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("default.json"), "{ broken").unwrap();
        assert!(load_configuration(&options(dir.path(), "development")).is_err());
    }

    #[test]
    fn test_load_configuration_rejects_missing_config_dir() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("not-created");

        let err = load_configuration(&options(&missing, "development")).unwrap_err();
        assert_eq!(err.to_string(), "Failed to resolve configuration directory");
        assert!(matches!(
            err.downcast_ref::<ConfigLoadError>(),
            Some(ConfigLoadError::DirectoryNotFound(path)) if path == &missing
        ));
    }

    #[test]
    fn test_framework_service_reads_framework_section() {
        let mut config = ConfigurationManager::default();
        config.set("framework", json!({ "collaboration_workflows": ["DOCUMENTATION"] }));

        let mut context = AppContext::new(config, None, "testing").unwrap();
        assert_eq!(context.env(), "testing");
        assert!(context.services().contains(AppContext::FRAMEWORK_SERVICE));

        let framework = context.framework_service().unwrap().framework().unwrap();
        assert_eq!(framework.active_workflows().len(), 1);
        assert!(framework.active_principles().is_empty());
    }

    #[test]
    fn test_top_level_settings_do_not_shape_framework() {
        let mut config = ConfigurationManager::default();
        config.load_from_vars([("HAIF_LOG_LEVEL", "DEBUG")]);

        let mut context = AppContext::new(config, None, "development").unwrap();
        let framework = context.framework_service().unwrap().framework().unwrap();
        assert_eq!(framework, &haif_core::domain::framework::Framework::new());
    }

    #[test]
    fn test_new_session_is_tagged_with_environment() {
        let mut config = ConfigurationManager::default();
        let context = AppContext::new(config.clone(), None, "development").unwrap();
        assert_eq!(
            context.new_session().metadata().get("environment"),
            Some(&json!("development"))
        );

        config.set("environment", json!("staging"));
        let context = AppContext::new(config, None, "development").unwrap();
        let first = context.new_session();
        let second = context.new_session();
        assert_eq!(first.metadata().get("environment"), Some(&json!("staging")));
        assert_ne!(first.id(), second.id());
        assert!(first.interactions().is_empty());
    }

    #[test]
    fn test_shutdown_stops_services() {
        let mut context = AppContext::new(ConfigurationManager::default(), None, "development").unwrap();
        assert!(context.framework_service().unwrap().is_initialized());

        context.shutdown();
        context.shutdown();
        assert!(!context.services().get("framework", false).unwrap().is_initialized());
    }
}
