use std::path::PathBuf;

use anyhow::{Context, Result};
use cardkit_core::adaptive::{CardOptions, InputEvent, ValidationMode};
use clap::Parser;
use tracing::info;

mod report;

use crate::report::{build_report, parse_assignment, read_card};

#[derive(Parser, Debug)]
#[command(author, version, about = "Render an Adaptive Card and simulate a user session", long_about = None)]
struct Opts {
    /// Card JSON file
    card: PathBuf,

    /// Validation mode (off, warn, error). Defaults to CARDKIT_VALIDATION_MODE or error.
    #[arg(long)]
    mode: Option<ValidationMode>,

    /// Type into a text input before submitting (id=value, repeatable)
    #[arg(long = "set", value_name = "ID=VALUE")]
    set: Vec<String>,

    /// Flip a toggle input (repeatable)
    #[arg(long = "toggle", value_name = "ID")]
    toggle: Vec<String>,

    /// Fire the action at this index after all edits
    #[arg(long, value_name = "INDEX")]
    submit: Option<usize>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    let opts = Opts::parse();
    cardkit_telemetry::install("card-viewer")?;

    let mut options = CardOptions::from_env().context("invalid cardkit environment")?;
    if let Some(mode) = opts.mode {
        options.validation_mode = mode;
    }

    let mut events = Vec::new();
    for raw in &opts.set {
        let (id, value) = parse_assignment(raw)?;
        events.push(InputEvent::TextChanged { id, value });
    }
    for id in &opts.toggle {
        events.push(InputEvent::Toggled { id: id.clone() });
    }
    if let Some(action_index) = opts.submit {
        events.push(InputEvent::Submit { action_index });
    }

    let raw = read_card(&opts.card)?;
    info!(
        target: "cardkit.viewer",
        card = %opts.card.display(),
        mode = %options.validation_mode,
        events = events.len(),
        "rendering card"
    );
    let report = build_report(&raw, options, events);
    let output = if opts.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{output}");

    if let Some(failure) = &report.failure {
        anyhow::bail!("{failure}");
    }
    Ok(())
}
