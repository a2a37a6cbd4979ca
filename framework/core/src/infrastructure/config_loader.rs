// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Configuration Loading - environment variables and layered files
//
// Builds the plain configuration mapping consumed by the factory and services:
// - HAIF_* environment variables, with scalar coercion
// - YAML or JSON files, shallow-merged by top-level key
// - hierarchical directories: default.* then <env>.*
// - config directory discovery (flag -> env -> ./config -> ~/.haif/config)

use serde_json::{Map, Number, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_ENV_PREFIX: &str = "HAIF_";
pub const CONFIG_DIR_ENV: &str = "HAIF_CONFIG_DIR";

const CONFIG_EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("Configuration file not found: {0:?}")]
    NotFound(PathBuf),

    #[error("Unsupported configuration file format: {0:?}")]
    UnsupportedFormat(PathBuf),

    #[error("Failed to read configuration file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration file {path:?}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("Configuration file {0:?} must contain a mapping at the top level")]
    NotAMapping(PathBuf),

    #[error("Configuration directory not found: {0:?}")]
    DirectoryNotFound(PathBuf),
}

/// Accumulates configuration from the environment and from files.
///
/// Later loads override earlier ones key by key at the top level.
#[derive(Debug, Clone)]
pub struct ConfigurationManager {
    env_prefix: String,
    values: Map<String, Value>,
}

impl Default for ConfigurationManager {
    fn default() -> Self {
        Self::new(DEFAULT_ENV_PREFIX)
    }
}

impl ConfigurationManager {
    pub fn new(env_prefix: impl Into<String>) -> Self {
        Self {
            env_prefix: env_prefix.into(),
            values: Map::new(),
        }
    }

    pub fn env_prefix(&self) -> &str {
        &self.env_prefix
    }

    /// Merge every prefixed variable of the process environment. Variables
    /// whose name or value is not valid UTF-8 are skipped.
    pub fn load_from_env(&mut self) -> Map<String, Value> {
        let vars = std::env::vars_os().filter_map(|(key, value)| {
            match (key.into_string(), value.into_string()) {
                (Ok(key), Ok(value)) => Some((key, value)),
                (key, _) => {
                    let name = key.unwrap_or_else(|raw| raw.to_string_lossy().into_owned());
                    debug!("Skipping non UTF-8 environment variable {:?}", name);
                    None
                }
            }
        });
        self.load_from_vars(vars)
    }

    /// Merge prefixed variables from `vars`. Keys lose the prefix and are
    /// lowercased; values are coerced to booleans and numbers where they look
    /// like one.
    pub fn load_from_vars<I, K, V>(&mut self, vars: I) -> Map<String, Value>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut loaded = Map::new();
        for (key, value) in vars {
            let Some(stripped) = key.as_ref().strip_prefix(self.env_prefix.as_str()) else {
                continue;
            };
            loaded.insert(stripped.to_lowercase(), coerce_env_value(value.as_ref()));
        }

        debug!("Loaded {} configuration value(s) from environment", loaded.len());
        self.merge(loaded.clone());
        loaded
    }

    /// Merge a YAML (`.yaml`/`.yml`) or JSON (`.json`) file.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<Map<String, Value>, ConfigLoadError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigLoadError::NotFound(path.to_path_buf()));
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        let content = std::fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let parsed: Value = match extension.as_str() {
            "yaml" | "yml" => serde_yaml::from_str(&content).map_err(|e| ConfigLoadError::Parse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?,
            "json" => serde_json::from_str(&content).map_err(|e| ConfigLoadError::Parse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?,
            _ => return Err(ConfigLoadError::UnsupportedFormat(path.to_path_buf())),
        };

        let loaded = match parsed {
            Value::Null => Map::new(),
            Value::Object(map) => map,
            _ => return Err(ConfigLoadError::NotAMapping(path.to_path_buf())),
        };

        info!("Loaded configuration file: {:?}", path);
        self.merge(loaded.clone());
        Ok(loaded)
    }

    /// Load `default.*` and then `<env>.*` from `base_dir`, skipping files
    /// that do not exist.
    pub fn load_hierarchical(
        &mut self,
        base_dir: impl AsRef<Path>,
        env: &str,
    ) -> Result<&Map<String, Value>, ConfigLoadError> {
        let base_dir = base_dir.as_ref();
        for stem in ["default", env] {
            match find_config_file(base_dir, stem) {
                Some(path) => {
                    self.load_from_file(path)?;
                }
                None => debug!("No '{}' configuration in {:?}", stem, base_dir),
            }
        }
        Ok(&self.values)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.values.clone())
    }

    fn merge(&mut self, loaded: Map<String, Value>) {
        self.values.extend(loaded);
    }
}

/// Resolve the configuration directory.
///
/// Precedence:
/// 1. `explicit` (e.g. the `--config` flag)
/// 2. `HAIF_CONFIG_DIR`
/// 3. `./config`
/// 4. `~/.haif/config`
///
/// A directory named by 1 or 2 must exist; there is no fallback past it.
/// `Ok(None)` means no directory was named or found.
pub fn discover_config_dir(explicit: Option<&Path>) -> Result<Option<PathBuf>, ConfigLoadError> {
    let env_dir = std::env::var_os(CONFIG_DIR_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from);
    resolve_config_dir(
        explicit,
        env_dir.as_deref(),
        Path::new("./config"),
        dirs::home_dir().as_deref(),
    )
}

fn resolve_config_dir(
    explicit: Option<&Path>,
    env_dir: Option<&Path>,
    cwd_config: &Path,
    home: Option<&Path>,
) -> Result<Option<PathBuf>, ConfigLoadError> {
    if let Some(path) = explicit.or(env_dir) {
        if !path.is_dir() {
            return Err(ConfigLoadError::DirectoryNotFound(path.to_path_buf()));
        }
        info!("Using configuration directory: {:?}", path);
        return Ok(Some(path.to_path_buf()));
    }

    if cwd_config.is_dir() {
        return Ok(Some(cwd_config.to_path_buf()));
    }

    if let Some(home) = home {
        let user_config = home.join(".haif").join("config");
        if user_config.is_dir() {
            return Ok(Some(user_config));
        }
    }

    Ok(None)
}

fn find_config_file(base_dir: &Path, stem: &str) -> Option<PathBuf> {
    CONFIG_EXTENSIONS
        .iter()
        .map(|ext| base_dir.join(format!("{}.{}", stem, ext)))
        .find(|path| path.is_file())
}

/// Interpret an environment string as a boolean, integer or float when it
/// looks like one. Integers beyond `u64` are kept as (lossy) floats.
fn coerce_env_value(raw: &str) -> Value {
    match raw.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => return Value::Bool(true),
        "false" | "no" | "0" | "off" => return Value::Bool(false),
        _ => {}
    }

    let is_digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());

    if is_digits(raw) {
        if let Ok(n) = raw.parse::<u64>() {
            return Value::Number(n.into());
        }
        // too large for u64
        if let Some(n) = raw.parse::<f64>().ok().and_then(Number::from_f64) {
            return Value::Number(n);
        }
    }

    if let Some((whole, frac)) = raw.split_once('.') {
        if !frac.contains('.') && is_digits(&format!("{}{}", whole, frac)) {
            if let Some(n) = raw.parse::<f64>().ok().and_then(Number::from_f64) {
                return Value::Number(n);
            }
        }
    }

    Value::String(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_env_values_are_coerced() {
        let mut config = ConfigurationManager::default();
        let loaded = config.load_from_vars([
            ("HAIF_DEBUG", "yes"),
            ("HAIF_VERBOSE", "OFF"),
            ("HAIF_ONE", "1"),
            ("HAIF_WORKERS", "12"),
            ("HAIF_RATIO", "0.75"),
            ("HAIF_VERSION", "1.2.3"),
            ("HAIF_LOG_LEVEL", "DEBUG"),
            ("PATH", "/usr/bin"),
        ]);

        assert_eq!(loaded.len(), 7);
        assert_eq!(config.get("debug"), Some(&json!(true)));
        assert_eq!(config.get("verbose"), Some(&json!(false)));
        assert_eq!(config.get("one"), Some(&json!(true)));
        assert_eq!(config.get("workers"), Some(&json!(12)));
        assert_eq!(config.get("ratio"), Some(&json!(0.75)));
        assert_eq!(config.get_str("version"), Some("1.2.3"));
        assert_eq!(config.get_str("log_level"), Some("DEBUG"));
        assert!(config.get("path").is_none());
    }

    #[test]
    fn test_custom_prefix() {
        let mut config = ConfigurationManager::new("APP_");
        config.load_from_vars([("APP_NAME", "demo"), ("HAIF_NAME", "ignored")]);
        assert_eq!(config.get_str("name"), Some("demo"));
        assert_eq!(config.values().len(), 1);
    }

    #[test]
    fn test_load_yaml_and_json_files() {
        let dir = TempDir::new().unwrap();
        let yaml = dir.path().join("settings.yaml");
        fs::write(&yaml, "framework:\n  ethical_principles:\n    - PRIVACY\nenvironment: staging\n").unwrap();
        let json_path = dir.path().join("override.json");
        fs::write(&json_path, r#"{"environment": "production"}"#).unwrap();

        let mut config = ConfigurationManager::default();
        config.load_from_file(&yaml).unwrap();
        assert_eq!(config.get_str("environment"), Some("staging"));
        assert_eq!(
            config.get("framework"),
            Some(&json!({ "ethical_principles": ["PRIVACY"] }))
        );

        let loaded = config.load_from_file(&json_path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(config.get_str("environment"), Some("production"));
        assert!(config.get("framework").is_some());
    }

    #[test]
    fn test_load_file_errors() {
        let dir = TempDir::new().unwrap();
        let mut config = ConfigurationManager::default();

        let missing = dir.path().join("missing.yaml");
        assert!(matches!(config.load_from_file(&missing), Err(ConfigLoadError::NotFound(_))));

        let toml = dir.path().join("config.toml");
        fs::write(&toml, "a = 1").unwrap();
        assert!(matches!(
            config.load_from_file(&toml),
            Err(ConfigLoadError::UnsupportedFormat(_))
        ));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        assert!(matches!(config.load_from_file(&broken), Err(ConfigLoadError::Parse { .. })));

        let list = dir.path().join("list.yaml");
        fs::write(&list, "- a\n- b\n").unwrap();
        assert!(matches!(config.load_from_file(&list), Err(ConfigLoadError::NotAMapping(_))));

        assert!(config.values().is_empty());
    }

    #[test]
    fn test_empty_file_is_empty_mapping() {
        let dir = TempDir::new().unwrap();
        let empty = dir.path().join("empty.yaml");
        fs::write(&empty, "").unwrap();

        let mut config = ConfigurationManager::default();
        assert!(config.load_from_file(&empty).unwrap().is_empty());
    }

    #[test]
    fn test_hierarchical_environment_overrides_default() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("default.yaml"),
            "environment: development\nlogging:\n  level: INFO\n",
        )
        .unwrap();
        fs::write(dir.path().join("production.json"), r#"{"logging": {"level": "ERROR"}}"#).unwrap();

        let mut config = ConfigurationManager::default();
        let values = config.load_hierarchical(dir.path(), "production").unwrap();
        assert_eq!(values.get("environment"), Some(&json!("development")));
        assert_eq!(values.get("logging"), Some(&json!({ "level": "ERROR" })));
    }

    #[test]
    fn test_hierarchical_skips_missing_files() {
        let dir = TempDir::new().unwrap();
        let mut config = ConfigurationManager::default();
        assert!(config.load_hierarchical(dir.path(), "testing").unwrap().is_empty());
    }

    #[test]
    fn test_yaml_preferred_over_json_for_same_stem() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("default.json"), r#"{"source": "json"}"#).unwrap();
        fs::write(dir.path().join("default.yaml"), "source: yaml\n").unwrap();

        let mut config = ConfigurationManager::default();
        config.load_hierarchical(dir.path(), "development").unwrap();
        assert_eq!(config.get_str("source"), Some("yaml"));
    }

    #[test]
    fn test_set_and_to_value() {
        let mut config = ConfigurationManager::default();
        config.set("environment", json!("testing"));
        assert_eq!(config.to_value(), json!({ "environment": "testing" }));
    }

    #[test]
    fn test_large_integers_stay_numeric() {
        let mut config = ConfigurationManager::default();
        config.load_from_vars([
            ("HAIF_MAX", "18446744073709551615"),
            ("HAIF_HUGE", "123456789012345678901234567890"),
        ]);
        assert_eq!(config.get("max"), Some(&json!(u64::MAX)));
        let expected: f64 = "123456789012345678901234567890".parse().unwrap();
        assert_eq!(config.get("huge").and_then(Value::as_f64), Some(expected));
    }

    #[test]
    fn test_load_from_env_reads_process_environment() {
        std::env::set_var("HAIF_LOADER_TEST_FLAG", "on");
        std::env::set_var("HAIF_LOADER_TEST_WORKERS", "4");

        let mut config = ConfigurationManager::new("HAIF_LOADER_TEST_");
        let loaded = config.load_from_env();

        std::env::remove_var("HAIF_LOADER_TEST_FLAG");
        std::env::remove_var("HAIF_LOADER_TEST_WORKERS");

        assert_eq!(loaded.len(), 2);
        assert_eq!(config.get("flag"), Some(&json!(true)));
        assert_eq!(config.get("workers"), Some(&json!(4)));
    }

    #[cfg(unix)]
    #[test]
    fn test_load_from_env_skips_non_utf8_variables() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let bytes = OsStr::from_bytes(&[0xff, 0xfe]);
        std::env::set_var("HAIF_BYTES_TEST_VALUE", bytes);
        std::env::set_var("HAIF_BYTES_TEST_NAME", "kept");
        std::env::set_var(OsStr::from_bytes(b"HAIF_BYTES_TEST_\xff"), "dropped");

        let mut config = ConfigurationManager::new("HAIF_BYTES_TEST_");
        let loaded = config.load_from_env();

        std::env::remove_var("HAIF_BYTES_TEST_VALUE");
        std::env::remove_var("HAIF_BYTES_TEST_NAME");
        std::env::remove_var(OsStr::from_bytes(b"HAIF_BYTES_TEST_\xff"));

        assert_eq!(loaded.len(), 1);
        assert_eq!(config.get_str("name"), Some("kept"));
    }

    #[test]
    fn test_explicit_config_dir_wins() {
        let dir = TempDir::new().unwrap();
        let env_dir = TempDir::new().unwrap();
        assert_eq!(
            resolve_config_dir(Some(dir.path()), Some(env_dir.path()), Path::new("./config"), None).unwrap(),
            Some(dir.path().to_path_buf())
        );
        assert_eq!(
            discover_config_dir(Some(dir.path())).unwrap(),
            Some(dir.path().to_path_buf())
        );
    }

    #[test]
    fn test_missing_explicit_config_dir_is_an_error() {
        let cwd = TempDir::new().unwrap();
        let cwd_config = cwd.path().join("config");
        fs::create_dir(&cwd_config).unwrap();
        let missing = cwd.path().join("definitely-not-here");

        let err = discover_config_dir(Some(&missing)).unwrap_err();
        assert!(matches!(err, ConfigLoadError::DirectoryNotFound(ref path) if path == &missing));

        let err = resolve_config_dir(None, Some(&missing), &cwd_config, None).unwrap_err();
        assert!(matches!(err, ConfigLoadError::DirectoryNotFound(_)));

        // a plain file is not a directory either
        let file = cwd.path().join("default.yaml");
        fs::write(&file, "environment: testing\n").unwrap();
        assert!(matches!(
            resolve_config_dir(Some(&file), None, &cwd_config, None),
            Err(ConfigLoadError::DirectoryNotFound(_))
        ));
    }

    #[test]
    fn test_config_dir_precedence_chain() {
        let root = TempDir::new().unwrap();
        let env_dir = root.path().join("from-env");
        let cwd_config = root.path().join("cwd").join("config");
        let home = root.path().join("home");
        let home_config = home.join(".haif").join("config");
        for dir in [&env_dir, &cwd_config, &home_config] {
            fs::create_dir_all(dir).unwrap();
        }

        assert_eq!(
            resolve_config_dir(None, Some(&env_dir), &cwd_config, Some(&home)).unwrap(),
            Some(env_dir.clone())
        );
        assert_eq!(
            resolve_config_dir(None, None, &cwd_config, Some(&home)).unwrap(),
            Some(cwd_config.clone())
        );

        fs::remove_dir(&cwd_config).unwrap();
        assert_eq!(
            resolve_config_dir(None, None, &cwd_config, Some(&home)).unwrap(),
            Some(home_config.clone())
        );

        fs::remove_dir(&home_config).unwrap();
        assert_eq!(resolve_config_dir(None, None, &cwd_config, Some(&home)).unwrap(), None);
        assert_eq!(resolve_config_dir(None, None, &cwd_config, None).unwrap(), None);
    }
}
