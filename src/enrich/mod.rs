//! Event enrichment: merging page tags, meta-tag values and caller overrides
//! into a telemetry event under a fixed precedence order.
//!
//! The enricher is built once per page with the harvested meta tags and the
//! page-tag template, then invoked once per interaction. It holds no mutable
//! state across invocations; everything extracted during a call stays in
//! call-scoped locals.

pub mod behavior;
pub mod event;
pub mod tags;

use std::collections::BTreeMap;

use serde_json::Value;

use crate::config::CoreData;

// Re-export commonly used types
pub use behavior::{resolve_behavior, Behavior};
pub use event::{EventProperties, OverrideValues, TelemetryEvent};
pub use tags::{deep_merge, TagMap};

/// Meta-tag names promoted to first-class event fields.
///
/// These are excluded from the residual `pageTags.metaTags` map.
pub const RESERVED_META_TAGS: [&str; 3] = ["pageType", "market", "behavior"];

/// Key under which residual meta tags land inside the page tags.
const META_TAGS_KEY: &str = "metaTags";

/// Whether a string value counts as assigned.
///
/// Empty strings are treated the same as absent values throughout the
/// enrichment precedence rules.
pub fn is_value_assigned(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

/// Page-level facts available when the host runs inside a page.
///
/// Outside a browser there is no page surface; the enricher then leaves
/// location-derived fields unassigned instead of failing.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    /// Document title
    pub title: Option<String>,
    /// Current location uri
    pub location_uri: Option<String>,
}

/// Producer of supplemental page tags, invoked once per enrichment call.
pub type PageTagsCallback = Box<dyn Fn() -> TagMap>;

/// Enriches telemetry events with page tags, meta-tag values and overrides.
pub struct EventEnricher {
    core_data: CoreData,
    page_tags_template: TagMap,
    page_tags_callback: Option<PageTagsCallback>,
    meta_tags: BTreeMap<String, String>,
    page: Option<PageContext>,
}

impl EventEnricher {
    /// Create an enricher for the current page.
    ///
    /// `page_tags_template` is the read-only base every event starts from;
    /// merges always allocate new containers and never write back into it.
    pub fn new(
        core_data: CoreData,
        page_tags_template: TagMap,
        meta_tags: BTreeMap<String, String>,
        page: Option<PageContext>,
    ) -> Self {
        Self {
            core_data,
            page_tags_template,
            page_tags_callback: None,
            meta_tags,
            page,
        }
    }

    /// Attach a callback producing supplemental page tags per event.
    pub fn with_page_tags_callback(mut self, callback: PageTagsCallback) -> Self {
        self.page_tags_callback = Some(callback);
        self
    }

    /// Fully enrich `event` from the configured sources and `overrides`.
    ///
    /// Runs to completion before returning; the event is never handed off
    /// partially enriched.
    pub fn enrich(&self, event: &mut TelemetryEvent, overrides: &OverrideValues) {
        self.set_basic_properties(event, overrides);

        let mut page_tags = self.assemble_page_tags(overrides);

        // Extract the reserved meta values into call-scoped locals; the rest
        // of the meta map is copied verbatim under pageTags.metaTags.
        let page_type_meta = self.extract_meta(&self.core_data.page_type, "pageType");
        let market_meta = self.extract_meta(&self.core_data.market, "market");
        let behavior_meta = self.extract_meta(&self.core_data.behavior, "behavior");

        page_tags.insert(
            META_TAGS_KEY.to_string(),
            Value::Object(self.residual_meta_tags()),
        );
        event.properties.page_tags = page_tags;

        if is_value_assigned(overrides.page_type.as_deref()) {
            event.page_type = overrides.page_type.clone();
        }
        // Only assign from meta data when not overridden.
        if is_value_assigned(page_type_meta.as_deref())
            && !is_value_assigned(event.page_type.as_deref())
        {
            event.page_type = page_type_meta;
        }
        // Market is taken from the extracted meta value alone; overrides are
        // not consulted here.
        if is_value_assigned(market_meta.as_deref()) {
            event.market = market_meta;
        }

        let candidate = if is_value_assigned(overrides.behavior.as_deref()) {
            overrides.behavior.clone()
        } else {
            behavior_meta
        };
        event.behavior = resolve_behavior(candidate.as_deref());
    }

    /// Fill `name` and `uri` when still unassigned. First writer wins: a
    /// field already set by the caller is never overwritten.
    fn set_basic_properties(&self, event: &mut TelemetryEvent, overrides: &OverrideValues) {
        if !is_value_assigned(event.name.as_deref()) {
            event.name = self.resolve_page_name(overrides);
        }
        if !is_value_assigned(event.uri.as_deref()) && self.page.is_some() {
            event.uri = self.resolve_page_uri(overrides);
        }
    }

    /// Page name: override, else configured core data, else document title.
    fn resolve_page_name(&self, overrides: &OverrideValues) -> Option<String> {
        if is_value_assigned(overrides.name.as_deref()) {
            return overrides.name.clone();
        }
        if is_value_assigned(self.core_data.page_name.as_deref()) {
            return self.core_data.page_name.clone();
        }
        self.page.as_ref().and_then(|p| p.title.clone())
    }

    /// Page uri: override, else configured request uri, else location.
    fn resolve_page_uri(&self, overrides: &OverrideValues) -> Option<String> {
        if is_value_assigned(overrides.uri.as_deref()) {
            return overrides.uri.clone();
        }
        if is_value_assigned(self.core_data.request_uri.as_deref()) {
            return self.core_data.request_uri.clone();
        }
        self.page.as_ref().and_then(|p| p.location_uri.clone())
    }

    /// Template, then callback tags, then override tags; every merge
    /// allocates new containers.
    fn assemble_page_tags(&self, overrides: &OverrideValues) -> TagMap {
        let mut assembled = self.page_tags_template.clone();
        if let Some(callback) = &self.page_tags_callback {
            assembled = deep_merge(&assembled, &callback());
        }
        if let Some(override_tags) = &overrides.page_tags {
            assembled = deep_merge(&assembled, override_tags);
        }
        assembled
    }

    /// Reserved meta value: configured core data wins over the harvested map.
    fn extract_meta(&self, config_value: &Option<String>, name: &str) -> Option<String> {
        if is_value_assigned(config_value.as_deref()) {
            return config_value.clone();
        }
        self.meta_tags.get(name).cloned()
    }

    /// Meta tags minus the reserved names, as string leaves.
    fn residual_meta_tags(&self) -> TagMap {
        self.meta_tags
            .iter()
            .filter(|(name, _)| !RESERVED_META_TAGS.contains(&name.as_str()))
            .map(|(name, value)| (name.clone(), Value::String(value.clone())))
            .collect()
    }
}
