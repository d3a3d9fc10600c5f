//! PagePulse Click Agent CLI
//!
//! Inspect and exercise the enrichment core from the command line.

use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use pagepulse_click_agent::{
    classify_key, classify_pointer, sanitize_config, AnalyticsConfig, EventEnricher,
    OverrideValues, PageContext, RawKeyEvent, RawPointerEvent, TelemetryEvent, VERSION,
};

#[derive(Parser)]
#[command(name = "pagepulse-click")]
#[command(author = "PagePulse")]
#[command(version = VERSION)]
#[command(about = "Click-analytics enrichment core for web telemetry", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enrich a synthetic event and print it as JSON
    Enrich {
        /// Harvested meta tags as name=value pairs
        #[arg(long = "meta", value_name = "NAME=VALUE")]
        meta: Vec<String>,

        /// Override page name
        #[arg(long)]
        name: Option<String>,

        /// Override page uri
        #[arg(long)]
        uri: Option<String>,

        /// Override page type
        #[arg(long)]
        page_type: Option<String>,

        /// Behavior candidate (numeric code or member name)
        #[arg(long)]
        behavior: Option<String>,

        /// Override page tags as a JSON object
        #[arg(long)]
        tags: Option<String>,

        /// Page title the enricher may fall back to
        #[arg(long)]
        title: Option<String>,

        /// Page location uri the enricher may fall back to
        #[arg(long)]
        location: Option<String>,
    },

    /// Classify a raw pointer or keyboard event
    Classify {
        /// Modern button field
        #[arg(long)]
        which: Option<i32>,

        /// Legacy button field
        #[arg(long)]
        button: Option<i32>,

        /// Keyboard key code
        #[arg(long)]
        key_code: Option<u32>,
    },

    /// Sanitize an override configuration file
    Sanitize {
        /// Path to the JSON configuration to sanitize
        input: PathBuf,

        /// Keys expected to hold object values
        #[arg(long = "expect-object", value_name = "KEY")]
        expect_objects: Vec<String>,
    },

    /// Show the active configuration
    Config,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Enrich {
            meta,
            name,
            uri,
            page_type,
            behavior,
            tags,
            title,
            location,
        } => {
            cmd_enrich(meta, name, uri, page_type, behavior, tags, title, location);
        }
        Commands::Classify {
            which,
            button,
            key_code,
        } => {
            cmd_classify(which, button, key_code);
        }
        Commands::Sanitize {
            input,
            expect_objects,
        } => {
            cmd_sanitize(&input, &expect_objects);
        }
        Commands::Config => {
            cmd_config();
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_enrich(
    meta: Vec<String>,
    name: Option<String>,
    uri: Option<String>,
    page_type: Option<String>,
    behavior: Option<String>,
    tags: Option<String>,
    title: Option<String>,
    location: Option<String>,
) {
    let config = AnalyticsConfig::load().unwrap_or_default();

    let meta_tags = match parse_meta_pairs(&meta) {
        Ok(tags) => tags,
        Err(bad) => {
            eprintln!("Error: meta tag '{bad}' is not a NAME=VALUE pair");
            std::process::exit(1);
        }
    };

    let override_tags = match tags.as_deref().map(serde_json::from_str) {
        None => None,
        Some(Ok(serde_json::Value::Object(map))) => Some(map),
        Some(Ok(_)) => {
            eprintln!("Error: --tags must be a JSON object");
            std::process::exit(1);
        }
        Some(Err(e)) => {
            eprintln!("Error: could not parse --tags: {e}");
            std::process::exit(1);
        }
    };

    let page = if title.is_some() || location.is_some() {
        Some(PageContext {
            title,
            location_uri: location,
        })
    } else {
        None
    };

    let enricher = EventEnricher::new(
        config.core_data.clone(),
        config.page_tags.clone(),
        meta_tags,
        page,
    );

    let overrides = OverrideValues {
        name,
        uri,
        page_type,
        behavior,
        page_tags: override_tags,
    };

    let mut event = TelemetryEvent::new();
    enricher.enrich(&mut event, &overrides);

    match serde_json::to_string_pretty(&event) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error: could not serialize event: {e}");
            std::process::exit(1);
        }
    }
}

fn cmd_classify(which: Option<i32>, button: Option<i32>, key_code: Option<u32>) {
    if let Some(key_code) = key_code {
        let raw = RawKeyEvent {
            timestamp: None,
            key_code: Some(key_code),
        };
        match classify_key(&raw) {
            Some(action) => println!("key: {action:?}"),
            None => println!("key: unknown"),
        }
        return;
    }

    let raw = RawPointerEvent {
        timestamp: None,
        which,
        button,
    };
    match classify_pointer(&raw) {
        Some(button) => println!("pointer: {button:?}"),
        None => println!("pointer: unknown"),
    }
}

fn cmd_sanitize(input: &Path, expect_objects: &[String]) {
    let content = match std::fs::read_to_string(input) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error: could not read {}: {e}", input.display());
            std::process::exit(1);
        }
    };

    let value: serde_json::Value = match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            eprintln!("Error: {} is not valid JSON: {e}", input.display());
            std::process::exit(1);
        }
    };

    let keys: Vec<&str> = expect_objects.iter().map(String::as_str).collect();
    let sanitized = sanitize_config(&value, &keys);

    match serde_json::to_string_pretty(&sanitized) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error: could not serialize result: {e}");
            std::process::exit(1);
        }
    }
}

fn cmd_config() {
    println!("PagePulse Click Agent v{VERSION}");
    println!("Config path: {}", AnalyticsConfig::config_path().display());
    println!();

    match AnalyticsConfig::load() {
        Ok(config) => match serde_json::to_string_pretty(&config) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Error: could not serialize config: {e}"),
        },
        Err(e) => {
            eprintln!("Error: could not load config: {e}");
            std::process::exit(1);
        }
    }
}

/// Parse `NAME=VALUE` pairs into a meta-tag map.
fn parse_meta_pairs(pairs: &[String]) -> Result<BTreeMap<String, String>, String> {
    let mut tags = BTreeMap::new();
    for pair in pairs {
        match pair.split_once('=') {
            Some((name, value)) if !name.is_empty() => {
                tags.insert(name.to_string(), value.to_string());
            }
            _ => return Err(pair.clone()),
        }
    }
    Ok(tags)
}
