// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Runtime Settings - typed views over the loosely-typed configuration mapping
//
// The configuration manager produces a plain JSON-like mapping. These types
// pull the few settings the host process needs out of it:
// - logging (level, output format, optional log file)
// - deployment environment name stamped on new sessions

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

pub const DEFAULT_ENVIRONMENT: &str = "development";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level name (DEBUG, INFO, WARNING, ERROR, CRITICAL, TRACE)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format ("text" or "json")
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Also write logs to `log_file`
    #[serde(default)]
    pub log_to_file: bool,

    #[serde(default = "default_log_file")]
    pub log_file: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_to_file: false,
            log_file: default_log_file(),
        }
    }
}

impl LoggingSettings {
    /// Read the `logging` section, letting a top-level `log_level` override
    /// `logging.level`. A malformed section yields the defaults and a warning.
    pub fn from_config(values: &Map<String, Value>) -> Self {
        let (settings, error) = Self::read(values);
        if let Some(e) = error {
            warn!("Ignoring malformed logging section: {}", e);
        }
        settings
    }

    /// Same as `from_config`, but hands the parse error of a malformed
    /// section back to the caller instead of logging it. Used before a
    /// subscriber is installed.
    pub fn read(values: &Map<String, Value>) -> (Self, Option<serde_json::Error>) {
        let (mut settings, error) = match values.get("logging") {
            None | Some(Value::Null) => (Self::default(), None),
            Some(section) => match serde_json::from_value::<Self>(section.clone()) {
                Ok(settings) => (settings, None),
                Err(e) => (Self::default(), Some(e)),
            },
        };

        if let Some(level) = values.get("log_level").and_then(Value::as_str) {
            settings.level = level.to_string();
        }

        (settings, error)
    }

    /// Translate the configured level name into a tracing filter directive.
    pub fn filter_directive(&self) -> &'static str {
        match self.level.to_uppercase().as_str() {
            "TRACE" => "trace",
            "DEBUG" => "debug",
            "INFO" => "info",
            "WARNING" | "WARN" => "warn",
            "ERROR" | "CRITICAL" => "error",
            _ => "info",
        }
    }

    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

/// Environment name used to tag new interaction sessions.
pub fn environment(values: &Map<String, Value>) -> String {
    values
        .get("environment")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_ENVIRONMENT)
        .to_string()
}

fn default_log_level() -> String {
    "INFO".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_log_file() -> String {
    "logs/haif.log".to_string()
}
