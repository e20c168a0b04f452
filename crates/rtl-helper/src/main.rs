//! # RTL Helper
//!
//! Keeps the writing direction of a live document's text regions in step
//! with their content.
//!
//! ## Overview
//!
//! The binary loads a document fixture, attaches the engine, replays an
//! optional event script (edits, resize, focus, navigation, manual
//! reprocess) and prints the styled body as JSON.
//!
//! ## Architecture
//!
//! This is Layer 4 - the host binary that ties together:
//! - rtl-helper-core: Core types and configuration
//! - rtl-helper-dom: The document tree
//! - rtl-helper-detector: Classification and styling
//! - rtl-helper-engine: Incremental reprocessing

use anyhow::Context;

use rtl_helper::{Host, Script};
use rtl_helper_core::HelperConfig;
use rtl_helper_dom::{Document, NodeSpec};

const USAGE: &str = "Usage: rtl-helper <fixture.json> [--config <config.yaml>] [--script <script.json>]";

struct Args {
    fixture: String,
    config: Option<String>,
    script: Option<String>,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = std::env::args().skip(1);
    let mut fixture = None;
    let mut config = None;
    let mut script = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => config = Some(args.next().context("--config needs a path")?),
            "--script" => script = Some(args.next().context("--script needs a path")?),
            "-h" | "--help" => {
                println!("{}", USAGE);
                std::process::exit(0);
            }
            other if other.starts_with("--") => anyhow::bail!("Unknown option {}\n{}", other, USAGE),
            other => fixture = Some(other.to_string()),
        }
    }

    Ok(Args {
        fixture: fixture.context(USAGE)?,
        config,
        script,
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = parse_args()?;

    let config = match &args.config {
        Some(path) => HelperConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path))?,
        None => HelperConfig::default(),
    };

    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        )
        .init();

    tracing::info!("RTL Helper v{} starting...", env!("CARGO_PKG_VERSION"));

    let fixture = std::fs::read_to_string(&args.fixture)
        .with_context(|| format!("Failed to read fixture {}", args.fixture))?;
    let spec = NodeSpec::from_json(&fixture).context("Invalid fixture")?;
    let doc = Document::from_spec(&spec).context("Failed to build document")?;

    let script = match &args.script {
        Some(path) => Script::from_file(path)?,
        None => Script::default(),
    };

    let mut host = Host::new(doc, config, script.location.clone());
    if let Err(e) = host.start().await {
        // The document is still printed, unstyled
        tracing::error!("Engine unavailable: {}", e);
    }
    host.run(&script).await.context("Script failed")?;

    let snapshot = host.snapshot()?;
    let (_doc, summary) = host.finish();
    tracing::info!(
        "Done: {} steps, {} batches, {} re-triggers ({})",
        summary.steps,
        summary.batches,
        summary.retriggers,
        summary.report
    );

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
