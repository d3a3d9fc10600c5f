//! PagePulse Click Agent - click-analytics enrichment core for web telemetry.
//!
//! This library enriches raw user-interaction signals (clicks, key presses)
//! captured in a page with contextual metadata before they are handed to a
//! host telemetry pipeline, and decides whether the interacted element was
//! actually visible at the time.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    PagePulse Click Agent                     │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌──────────┐  ┌───────────┐  ┌──────────────┐               │
//! │  │ Classify │  │ DOM walk  │  │  Visibility  │               │
//! │  │ (input)  │  │ (dnt/a)   │  │  (geometry)  │               │
//! │  └────┬─────┘  └─────┬─────┘  └──────┬───────┘               │
//! │       └──────────────┼───────────────┘                       │
//! │                      ▼                                       │
//! │               ┌────────────┐       ┌────────────┐            │
//! │               │  Enricher  │──────▶│ Dispatcher │──▶ host    │
//! │               │ (precedence│       │  (channel) │   pipeline │
//! │               │   merge)   │       └────────────┘            │
//! │               └────────────┘                                 │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Data flows one direction, once per interaction: raw facts (click type,
//! nearest anchor, visibility) combine with the sanitized configuration as
//! inputs to the enricher, whose output event goes to the dispatcher. The
//! core never transmits, persists or retries; that belongs to the host.
//!
//! # Example
//!
//! ```no_run
//! use pagepulse_click_agent::config::AnalyticsConfig;
//! use pagepulse_click_agent::dom::TreeElement;
//! use pagepulse_click_agent::enrich::{EventEnricher, OverrideValues, TagMap};
//! use pagepulse_click_agent::input::RawPointerEvent;
//! use pagepulse_click_agent::pipeline::EventDispatcher;
//! use pagepulse_click_agent::tracker::InteractionTracker;
//! use std::collections::BTreeMap;
//!
//! let config = AnalyticsConfig::default();
//! let enricher = EventEnricher::new(
//!     config.core_data.clone(),
//!     TagMap::new(),
//!     BTreeMap::new(),
//!     None,
//! );
//! let (dispatcher, receiver) = EventDispatcher::with_capacity(1024);
//! let tracker = InteractionTracker::new(&config, enricher, dispatcher);
//!
//! let button = TreeElement::new("button");
//! tracker.track_pointer(&button, &RawPointerEvent::with_which(1), OverrideValues::default());
//! // The host pipeline drains `receiver`.
//! ```

pub mod config;
pub mod dom;
pub mod enrich;
pub mod geometry;
pub mod input;
pub mod pipeline;
pub mod stats;
pub mod tracker;

// Re-export key types at crate root for convenience
pub use config::{sanitize_config, AnalyticsConfig, CaptureConfig, ConfigError, CoreData};
pub use dom::{find_closest_anchor, is_element_dnt, walk_up, DomElement, TreeElement};
pub use enrich::{
    resolve_behavior, Behavior, EventEnricher, OverrideValues, PageContext, TagMap, TelemetryEvent,
};
pub use geometry::{
    intersection_area, is_truly_visible, viewport_bounding_rect, viewport_dimensions, Dimensions,
    Rect, ViewportSurface,
};
pub use input::{
    classify_key, classify_pointer, InteractionEvent, KeyAction, PointerButton, RawKeyEvent,
    RawPointerEvent,
};
pub use pipeline::{DiagnosticCode, EventDispatcher};
pub use stats::{create_shared_stats, CollectionStats, SharedCollectionStats, StatsSnapshot};
pub use tracker::InteractionTracker;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
