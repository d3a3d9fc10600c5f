//! Telemetry event types produced by the enrichment core.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enrich::behavior::Behavior;
use crate::enrich::tags::TagMap;

/// A telemetry event as handed to the host pipeline.
///
/// Every event is created fresh per interaction and discarded after handoff.
/// String fields follow first-assignment-wins: once a higher-precedence
/// source sets a field, lower-precedence sources never overwrite it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryEvent {
    /// Unique event identifier
    pub id: Uuid,
    /// Timestamp when the event was created
    pub timestamp: DateTime<Utc>,
    /// Page name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Page uri
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    /// Page classification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_type: Option<String>,
    /// Page market
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market: Option<String>,
    /// Resolved interaction intent
    pub behavior: Behavior,
    /// Event property bag
    pub properties: EventProperties,
}

impl TelemetryEvent {
    /// Create an empty event stamped with a fresh id and the current time.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            name: None,
            uri: None,
            page_type: None,
            market: None,
            behavior: Behavior::Undefined,
            properties: EventProperties::default(),
        }
    }
}

impl Default for TelemetryEvent {
    fn default() -> Self {
        Self::new()
    }
}

/// Property bag attached to every event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventProperties {
    /// Assembled page tags, including the residual `metaTags` sub-map
    pub page_tags: TagMap,
}

/// Caller-supplied per-call overrides, the highest-precedence source for the
/// corresponding event fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverrideValues {
    /// Overrides the derived page name
    pub name: Option<String>,
    /// Overrides the derived page uri
    pub uri: Option<String>,
    /// Overrides the page classification
    pub page_type: Option<String>,
    /// Behavior candidate: a numeric code or a member name
    pub behavior: Option<String>,
    /// Page tags with final say on conflicting leaves
    pub page_tags: Option<TagMap>,
}
