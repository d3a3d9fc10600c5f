//! Demonstration of the PagePulse click-agent enrichment path.
//!
//! This example shows how to:
//! 1. Build a small in-memory element tree
//! 2. Wire an enricher, a dispatcher and a tracker
//! 3. Track clicks, including a do-not-track suppression
//! 4. Drain the handoff queue the way a host pipeline would
//!
//! Run with: cargo run --example enrich_demo

use std::collections::BTreeMap;

use pagepulse_click_agent::{
    AnalyticsConfig, Dimensions, EventDispatcher, EventEnricher, InteractionTracker,
    OverrideValues, PageContext, RawPointerEvent, Rect, TagMap, TreeElement, ViewportSurface,
};

fn main() {
    println!("PagePulse Click Agent - Enrichment Demo");
    println!("=======================================");
    println!();

    // Page-level inputs an external collector would harvest at load time.
    let mut meta_tags = BTreeMap::new();
    meta_tags.insert("pageType".to_string(), "product".to_string());
    meta_tags.insert("market".to_string(), "en-us".to_string());
    meta_tags.insert("author".to_string(), "catalog-team".to_string());

    let page = PageContext {
        title: Some("Widget 9000".to_string()),
        location_uri: Some("https://shop.example/widget-9000".to_string()),
    };

    let config = AnalyticsConfig::default();
    let enricher = EventEnricher::new(
        config.core_data.clone(),
        config.page_tags.clone(),
        meta_tags,
        Some(page),
    );

    let (dispatcher, receiver) = EventDispatcher::with_capacity(config.dispatch_queue_capacity);
    let viewport = ViewportSurface {
        window_inner: Some(Dimensions {
            w: 1280.0,
            h: 800.0,
        }),
        ..ViewportSurface::default()
    };
    let tracker = InteractionTracker::new(&config, enricher, dispatcher).with_viewport(viewport);

    // A product page fragment: a buy link and an opted-out admin button.
    let container = TreeElement::new("main");
    let anchor = TreeElement::new("a").with_attr("href", "https://shop.example/cart");
    let buy_button =
        TreeElement::new("button").with_rect(Rect::new(200.0, 40.0, 360.0, 88.0));
    let admin_button = TreeElement::new("button")
        .with_attr("data-pp-dnt", "")
        .with_rect(Rect::new(10.0, 10.0, 90.0, 34.0));
    container.append(&anchor);
    anchor.append(&buy_button);
    container.append(&admin_button);

    // A left click on the buy button, with a purchase-intent override.
    let mut campaign = TagMap::new();
    campaign.insert("campaign".to_string(), serde_json::json!("summer-sale"));
    let overrides = OverrideValues {
        behavior: Some("AddToCart".to_string()),
        page_tags: Some(campaign),
        ..OverrideValues::default()
    };
    tracker.track_pointer(&buy_button, &RawPointerEvent::with_which(1), overrides);

    // A click on the opted-out button is suppressed.
    tracker.track_pointer(
        &admin_button,
        &RawPointerEvent::with_which(1),
        OverrideValues::default(),
    );

    // The host pipeline drains the handoff queue.
    println!("Dispatched events:");
    while let Ok(event) = receiver.try_recv() {
        match serde_json::to_string_pretty(&event) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("could not serialize event: {e}"),
        }
    }
    println!();

    println!("{}", tracker.stats().summary());
}
