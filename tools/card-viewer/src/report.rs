use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use cardkit_core::adaptive::{
    CardInstance, CardOptions, CardSummary, Diagnostics, InputEvent, SubmissionPayload,
    VisualNode,
};
use serde::Serialize;
use serde_json::Value;

/// Everything the viewer prints for one card.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<CardSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
    pub load_diagnostics: Diagnostics,
    pub render_diagnostics: Diagnostics,
    pub tree: VisualNode,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rejected_events: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission: Option<SubmissionPayload>,
}

pub fn read_card(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read card file {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}

/// Parses `id=value`.
pub fn parse_assignment(raw: &str) -> Result<(String, String)> {
    let Some((id, value)) = raw.split_once('=') else {
        bail!("expected id=value, got '{raw}'");
    };
    let id = id.trim();
    if id.is_empty() {
        bail!("input id is empty in '{raw}'");
    }
    Ok((id.to_string(), value.to_string()))
}

/// Mounts the card, applies `events` in order, and captures the final render.
pub fn build_report(raw: &Value, options: CardOptions, events: Vec<InputEvent>) -> Report {
    let mut instance = CardInstance::builder().options(options).mount(raw);
    let mut rejected_events = Vec::new();
    let mut submission = None;
    for event in events {
        let accepted = match &event {
            InputEvent::TextChanged { id, value } => instance.set_text(id, value.as_str()),
            InputEvent::Toggled { id } => instance.toggle(id),
            InputEvent::Submit { action_index } => match instance.submit(*action_index) {
                Some(payload) => {
                    submission = Some(payload);
                    true
                }
                None => false,
            },
        };
        if !accepted {
            tracing::warn!(target: "cardkit.viewer", ?event, "event rejected");
            rejected_events.push(format!("{event:?}"));
        }
    }

    let rendered = instance.render();
    Report {
        summary: instance.document().map(|card| card.summary()),
        failure: instance.failure().map(str::to_string),
        load_diagnostics: instance.load_diagnostics().clone(),
        render_diagnostics: rendered.diagnostics,
        tree: rendered.tree,
        rejected_events,
        submission,
    }
}
