//! Configuration for the click-analytics agent.
//!
//! Two layers live here: the typed [`AnalyticsConfig`] the agent runs with,
//! and the normalization pass applied to loosely-typed override
//! configuration supplied by page authors before it is trusted.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

use crate::enrich::tags::TagMap;

/// Reserved configuration key holding caller-registered callbacks.
///
/// Callback collections serialize to an empty object by construction, so the
/// normalizer must not treat them as vacuous.
pub const CALLBACK_KEY: &str = "callback";

/// Main configuration for the agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Static core data baked in at page setup
    pub core_data: CoreData,

    /// Static page-tag template shared by every event
    pub page_tags: TagMap,

    /// Which interaction kinds to capture
    pub capture: CaptureConfig,

    /// Attribute marking an element (and its subtree) as do-not-track
    pub dnt_attribute: String,

    /// Drop interactions whose element is not visible in the viewport
    pub drop_invisible_events: bool,

    /// Capacity of the handoff queue to the host pipeline
    pub dispatch_queue_capacity: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            core_data: CoreData::default(),
            page_tags: TagMap::new(),
            capture: CaptureConfig::default(),
            dnt_attribute: "data-pp-dnt".to_string(),
            drop_invisible_events: false,
            dispatch_queue_capacity: 10_000,
        }
    }
}

impl AnalyticsConfig {
    /// Load configuration from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .map_err(|e| ConfigError::IoError(e.to_string()))?;
            let config: AnalyticsConfig = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path();

        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(&config_path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Get the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pagepulse-click-agent")
            .join("config.json")
    }
}

/// Static core data: explicit page facts baked into configuration.
///
/// Values set here win over the corresponding harvested meta tags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreData {
    pub page_name: Option<String>,
    pub request_uri: Option<String>,
    pub page_type: Option<String>,
    pub market: Option<String>,
    pub behavior: Option<String>,
}

/// Which interaction kinds to capture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    pub pointer: bool,
    pub keyboard: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            pointer: true,
            keyboard: true,
        }
    }
}

impl CaptureConfig {
    /// Parse capture configuration from a comma-separated string.
    pub fn from_csv(s: &str) -> Self {
        let kinds: Vec<String> = s.split(',').map(|s| s.trim().to_lowercase()).collect();

        Self {
            pointer: kinds.iter().any(|s| s == "pointer" || s == "all"),
            keyboard: kinds.iter().any(|s| s == "keyboard" || s == "all"),
        }
    }

    /// Check if at least one kind is enabled.
    pub fn any_enabled(&self) -> bool {
        self.pointer || self.keyboard
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {e}"),
            ConfigError::ParseError(e) => write!(f, "Parse error: {e}"),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Whether a configuration entry carries no usable value.
///
/// Null and the empty string are vacuous; so is an object serializing to the
/// empty representation, except under the reserved `callback` key.
fn is_vacuous_entry(key: &str, value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Object(map) => map.is_empty() && key != CALLBACK_KEY,
        _ => false,
    }
}

/// One-level vacuous removal over an object's immediate properties.
///
/// Pure: returns a new map, the input is untouched.
pub fn remove_vacuous_entries(object: &Map<String, Value>) -> Map<String, Value> {
    object
        .iter()
        .filter(|(key, value)| !is_vacuous_entry(key, value))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Sanitize a loosely-typed override configuration graph.
///
/// Applies vacuous removal to the root, then for each name in
/// `expected_object_keys`: object values get the same one-level cleaning of
/// their immediate properties, anything else is dropped entirely. Malformed
/// input degrades to an empty object; this never errors.
pub fn sanitize_config(config: &Value, expected_object_keys: &[&str]) -> Value {
    let Value::Object(root) = config else {
        return Value::Object(Map::new());
    };

    let mut sanitized = remove_vacuous_entries(root);
    for &key in expected_object_keys {
        let cleaned = match sanitized.get(key) {
            Some(Value::Object(inner)) => Some(Value::Object(remove_vacuous_entries(inner))),
            Some(_) => None,
            None => continue,
        };
        match cleaned {
            Some(value) => {
                sanitized.insert(key.to_string(), value);
            }
            None => {
                sanitized.remove(key);
            }
        }
    }

    Value::Object(sanitized)
}
