//! Per-interaction tracking: from a raw DOM event to a dispatched
//! telemetry event.
//!
//! One call per interaction, fully synchronous. The tracker collects raw
//! facts (click type, nearest anchor, visibility), folds them into the
//! override page tags, runs the enricher and hands the result to the
//! dispatcher. Suppressed interactions are counted, never errors.

use serde_json::Value;
use tracing::debug;

use crate::config::{AnalyticsConfig, CaptureConfig};
use crate::dom::{find_closest_anchor, is_element_dnt, DomElement};
use crate::enrich::{
    deep_merge, is_value_assigned, EventEnricher, OverrideValues, TagMap, TelemetryEvent,
};
use crate::geometry::{
    is_truly_visible, viewport_bounding_rect, viewport_dimensions, ViewportSurface,
};
use crate::input::{
    classify_key, classify_pointer, InteractionEvent, KeyAction, PointerButton, RawKeyEvent,
    RawPointerEvent,
};
use crate::pipeline::EventDispatcher;
use crate::stats::{create_shared_stats, SharedCollectionStats};

/// Key under which interaction facts land inside the page tags.
const INTERACTION_TAG_KEY: &str = "interaction";

/// Tracks individual interactions against a page.
pub struct InteractionTracker {
    enricher: EventEnricher,
    dispatcher: EventDispatcher,
    capture: CaptureConfig,
    dnt_attribute: String,
    drop_invisible_events: bool,
    viewport: Option<ViewportSurface>,
    stats: SharedCollectionStats,
}

impl InteractionTracker {
    /// Create a tracker wired to the given enricher and dispatcher.
    pub fn new(
        config: &AnalyticsConfig,
        enricher: EventEnricher,
        dispatcher: EventDispatcher,
    ) -> Self {
        Self {
            enricher,
            dispatcher,
            capture: config.capture.clone(),
            dnt_attribute: config.dnt_attribute.clone(),
            drop_invisible_events: config.drop_invisible_events,
            viewport: None,
            stats: create_shared_stats(),
        }
    }

    /// Attach the viewport surface used for visibility decisions.
    ///
    /// Without one, every element measures as not visible.
    pub fn with_viewport(mut self, surface: ViewportSurface) -> Self {
        self.viewport = Some(surface);
        self
    }

    /// Shared handle to the session counters.
    pub fn stats(&self) -> SharedCollectionStats {
        self.stats.clone()
    }

    /// Track any raw interaction event on `element`.
    pub fn track<E: DomElement>(
        &self,
        element: &E,
        event: &InteractionEvent,
        overrides: OverrideValues,
    ) -> Option<TelemetryEvent> {
        match event {
            InteractionEvent::Pointer(raw) => self.track_pointer(element, raw, overrides),
            InteractionEvent::Key(raw) => self.track_key(element, raw, overrides),
        }
    }

    /// Track a pointer interaction on `element`.
    ///
    /// Left and middle clicks produce an event; right clicks and
    /// unclassifiable input are observed but not dispatched. Returns the
    /// enriched event when one was produced.
    pub fn track_pointer<E: DomElement>(
        &self,
        element: &E,
        raw: &RawPointerEvent,
        overrides: OverrideValues,
    ) -> Option<TelemetryEvent> {
        self.stats.record_interaction_seen();
        if !self.capture.pointer {
            return None;
        }
        if self.suppressed_by_dnt(element) {
            return None;
        }

        let action = match classify_pointer(raw) {
            Some(PointerButton::Left) => "left",
            Some(PointerButton::Middle) => "middle",
            Some(PointerButton::Right) => {
                debug!("right click not tracked");
                return None;
            }
            None => {
                debug!("unclassifiable pointer event, treating as unknown");
                return None;
            }
        };

        self.finish_track(element, "pointer", action, overrides)
    }

    /// Track a keyboard activation (enter or space) on `element`.
    pub fn track_key<E: DomElement>(
        &self,
        element: &E,
        raw: &RawKeyEvent,
        overrides: OverrideValues,
    ) -> Option<TelemetryEvent> {
        self.stats.record_interaction_seen();
        if !self.capture.keyboard {
            return None;
        }
        if self.suppressed_by_dnt(element) {
            return None;
        }

        let action = match classify_key(raw) {
            Some(KeyAction::Enter) => "enter",
            Some(KeyAction::Space) => "space",
            None => {
                debug!("key event is not an activation, ignoring");
                return None;
            }
        };

        self.finish_track(element, "keyboard", action, overrides)
    }

    fn suppressed_by_dnt<E: DomElement>(&self, element: &E) -> bool {
        if is_element_dnt(element, &self.dnt_attribute) {
            self.stats.record_dnt_suppressed();
            debug!(attribute = %self.dnt_attribute, "element opted out of tracking");
            return true;
        }
        false
    }

    fn finish_track<E: DomElement>(
        &self,
        element: &E,
        kind: &str,
        action: &str,
        overrides: OverrideValues,
    ) -> Option<TelemetryEvent> {
        let visible = self.element_visible(element);
        if !visible && self.drop_invisible_events {
            self.stats.record_invisible_suppressed();
            debug!("element not visible, dropping interaction");
            return None;
        }

        let facts = self.interaction_facts(element, kind, action, visible);
        // Caller-supplied page tags keep final say over the collected facts.
        let page_tags = match &overrides.page_tags {
            Some(override_tags) => deep_merge(&facts, override_tags),
            None => facts,
        };
        let overrides = OverrideValues {
            page_tags: Some(page_tags),
            ..overrides
        };

        let mut event = TelemetryEvent::new();
        self.enricher.enrich(&mut event, &overrides);
        self.stats.record_event_enriched();

        if self.dispatcher.dispatch(event.clone()) {
            self.stats.record_event_dispatched();
        } else {
            self.stats.record_event_dropped();
        }
        Some(event)
    }

    fn element_visible<E: DomElement>(&self, element: &E) -> bool {
        let dimensions = viewport_dimensions(self.viewport.as_ref());
        is_truly_visible(element, viewport_bounding_rect(dimensions))
    }

    fn interaction_facts<E: DomElement>(
        &self,
        element: &E,
        kind: &str,
        action: &str,
        visible: bool,
    ) -> TagMap {
        let mut interaction = TagMap::new();
        interaction.insert("kind".to_string(), Value::String(kind.to_string()));
        interaction.insert("action".to_string(), Value::String(action.to_string()));
        interaction.insert("isVisible".to_string(), Value::Bool(visible));

        if let Some(anchor) = find_closest_anchor(element) {
            let href = anchor.attribute("href");
            if is_value_assigned(href.as_deref()) {
                interaction.insert(
                    "targetUri".to_string(),
                    Value::String(href.unwrap_or_default()),
                );
            }
        }

        let mut facts = TagMap::new();
        facts.insert(INTERACTION_TAG_KEY.to_string(), Value::Object(interaction));
        facts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CoreData;
    use crate::dom::TreeElement;
    use crate::geometry::{Dimensions, Rect};
    use serde_json::json;
    use std::collections::BTreeMap;

    fn viewport() -> ViewportSurface {
        ViewportSurface {
            window_inner: Some(Dimensions {
                w: 1024.0,
                h: 768.0,
            }),
            ..ViewportSurface::default()
        }
    }

    fn tracker_with_queue(
        config: AnalyticsConfig,
    ) -> (InteractionTracker, crossbeam_channel::Receiver<TelemetryEvent>) {
        let enricher = EventEnricher::new(
            config.core_data.clone(),
            config.page_tags.clone(),
            BTreeMap::new(),
            None,
        );
        let (dispatcher, receiver) = EventDispatcher::with_capacity(16);
        let tracker =
            InteractionTracker::new(&config, enricher, dispatcher).with_viewport(viewport());
        (tracker, receiver)
    }

    fn visible_button() -> TreeElement {
        TreeElement::new("button").with_rect(Rect::new(10.0, 10.0, 110.0, 40.0))
    }

    #[test]
    fn test_left_click_produces_event() {
        let (tracker, receiver) = tracker_with_queue(AnalyticsConfig::default());
        let button = visible_button();

        let event = tracker
            .track_pointer(
                &button,
                &RawPointerEvent::with_which(1),
                OverrideValues::default(),
            )
            .expect("left click should produce an event");

        let interaction = &event.properties.page_tags["interaction"];
        assert_eq!(interaction["kind"], json!("pointer"));
        assert_eq!(interaction["action"], json!("left"));
        assert_eq!(interaction["isVisible"], json!(true));

        let dispatched = receiver.try_recv().expect("event should be dispatched");
        assert_eq!(dispatched.id, event.id);

        let snapshot = tracker.stats().snapshot();
        assert_eq!(snapshot.events_dispatched, 1);
    }

    #[test]
    fn test_right_click_not_dispatched() {
        let (tracker, receiver) = tracker_with_queue(AnalyticsConfig::default());
        let button = visible_button();

        let result = tracker.track_pointer(
            &button,
            &RawPointerEvent::with_which(3),
            OverrideValues::default(),
        );
        assert!(result.is_none());
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn test_dnt_ancestor_suppresses() {
        let (tracker, receiver) = tracker_with_queue(AnalyticsConfig::default());
        let section = TreeElement::new("section").with_attr("data-pp-dnt", "");
        let button = visible_button();
        section.append(&button);

        let result = tracker.track_pointer(
            &button,
            &RawPointerEvent::with_which(1),
            OverrideValues::default(),
        );
        assert!(result.is_none());
        assert!(receiver.try_recv().is_err());
        assert_eq!(tracker.stats().snapshot().dnt_suppressed, 1);
    }

    #[test]
    fn test_invisible_element_dropped_when_configured() {
        let config = AnalyticsConfig {
            drop_invisible_events: true,
            ..AnalyticsConfig::default()
        };
        let (tracker, _receiver) = tracker_with_queue(config);
        let offscreen =
            TreeElement::new("button").with_rect(Rect::new(2000.0, 2000.0, 2100.0, 2040.0));

        let result = tracker.track_pointer(
            &offscreen,
            &RawPointerEvent::with_which(1),
            OverrideValues::default(),
        );
        assert!(result.is_none());
        assert_eq!(tracker.stats().snapshot().invisible_suppressed, 1);
    }

    #[test]
    fn test_invisible_element_recorded_when_not_dropping() {
        let (tracker, _receiver) = tracker_with_queue(AnalyticsConfig::default());
        let offscreen =
            TreeElement::new("button").with_rect(Rect::new(2000.0, 2000.0, 2100.0, 2040.0));

        let event = tracker
            .track_pointer(
                &offscreen,
                &RawPointerEvent::with_which(1),
                OverrideValues::default(),
            )
            .expect("event should still be produced");
        assert_eq!(
            event.properties.page_tags["interaction"]["isVisible"],
            json!(false)
        );
    }

    #[test]
    fn test_nearest_anchor_recorded_as_target() {
        let (tracker, _receiver) = tracker_with_queue(AnalyticsConfig::default());
        let anchor = TreeElement::new("a").with_attr("href", "https://example.com/docs");
        let span = TreeElement::new("span").with_rect(Rect::new(10.0, 10.0, 60.0, 30.0));
        anchor.append(&span);

        let event = tracker
            .track_pointer(
                &span,
                &RawPointerEvent::with_which(1),
                OverrideValues::default(),
            )
            .expect("click inside anchor should produce an event");
        assert_eq!(
            event.properties.page_tags["interaction"]["targetUri"],
            json!("https://example.com/docs")
        );
    }

    #[test]
    fn test_keyboard_activation_tracked() {
        let (tracker, _receiver) = tracker_with_queue(AnalyticsConfig::default());
        let button = visible_button();

        let event = tracker
            .track_key(
                &button,
                &RawKeyEvent::with_key_code(13),
                OverrideValues::default(),
            )
            .expect("enter should produce an event");
        assert_eq!(
            event.properties.page_tags["interaction"]["action"],
            json!("enter")
        );

        // Plain character keys are not activations.
        let none = tracker.track_key(
            &button,
            &RawKeyEvent::with_key_code(65),
            OverrideValues::default(),
        );
        assert!(none.is_none());
    }

    #[test]
    fn test_caller_tags_override_collected_facts() {
        let (tracker, _receiver) = tracker_with_queue(AnalyticsConfig::default());
        let button = visible_button();

        let mut caller_interaction = TagMap::new();
        caller_interaction.insert("action".to_string(), json!("custom"));
        let mut caller_tags = TagMap::new();
        caller_tags.insert("interaction".to_string(), Value::Object(caller_interaction));

        let overrides = OverrideValues {
            page_tags: Some(caller_tags),
            ..OverrideValues::default()
        };
        let event = tracker
            .track_pointer(&button, &RawPointerEvent::with_which(1), overrides)
            .expect("event should be produced");

        let interaction = &event.properties.page_tags["interaction"];
        assert_eq!(interaction["action"], json!("custom"));
        // Facts not overridden survive the merge.
        assert_eq!(interaction["kind"], json!("pointer"));
    }

    #[test]
    fn test_unified_event_routing() {
        let (tracker, _receiver) = tracker_with_queue(AnalyticsConfig::default());
        let button = visible_button();

        let pointer = InteractionEvent::Pointer(RawPointerEvent::with_which(1));
        let event = tracker
            .track(&button, &pointer, OverrideValues::default())
            .expect("pointer event should route");
        assert_eq!(
            event.properties.page_tags["interaction"]["kind"],
            json!("pointer")
        );

        let key = InteractionEvent::Key(RawKeyEvent::with_key_code(32));
        let event = tracker
            .track(&button, &key, OverrideValues::default())
            .expect("key event should route");
        assert_eq!(
            event.properties.page_tags["interaction"]["action"],
            json!("space")
        );
    }

    #[test]
    fn test_capture_toggles() {
        let config = AnalyticsConfig {
            capture: CaptureConfig {
                pointer: false,
                keyboard: true,
            },
            ..AnalyticsConfig::default()
        };
        let (tracker, _receiver) = tracker_with_queue(config);
        let button = visible_button();

        let result = tracker.track_pointer(
            &button,
            &RawPointerEvent::with_which(1),
            OverrideValues::default(),
        );
        assert!(result.is_none());
    }

    #[test]
    fn test_core_data_flows_into_event() {
        let config = AnalyticsConfig {
            core_data: CoreData {
                page_name: Some("Home".to_string()),
                page_type: Some("landing".to_string()),
                ..CoreData::default()
            },
            ..AnalyticsConfig::default()
        };
        let (tracker, _receiver) = tracker_with_queue(config);
        let button = visible_button();

        let event = tracker
            .track_pointer(
                &button,
                &RawPointerEvent::with_which(1),
                OverrideValues::default(),
            )
            .expect("event should be produced");
        assert_eq!(event.name.as_deref(), Some("Home"));
        assert_eq!(event.page_type.as_deref(), Some("landing"));
    }
}
