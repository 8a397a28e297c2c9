#![cfg(feature = "adaptive-cards")]

use std::fs;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use cardkit_core::adaptive::renderer::{StackRole, View, WidthPolicy};
use cardkit_core::adaptive::{CardInstance, Diagnostics, InputStore, parse_card, render_card};
use serde_json::{Value, json};
use tracing_test::traced_test;

#[traced_test]
#[test]
fn unsupported_element_is_skipped_with_one_diagnostic() {
    let card = parse_card(&load_fixture("fail_open")).unwrap();
    let mut diagnostics = Diagnostics::new();
    let root = render_card(&card, &InputStore::new(), &mut diagnostics);

    let container = &root.children()[0];
    let texts: Vec<&str> = container
        .children()
        .iter()
        .filter_map(|node| match &node.view {
            View::Text(text) => Some(text.text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(texts, vec!["before", "after"]);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics.entries()[0].code, "render.unknown_element");
    assert!(logs_contain("skipping unsupported element type 'Media'"));
}

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn unsupported_element_skip_is_logged_at_info_level() {
    let capture = Capture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let card = parse_card(&json!({
        "type": "AdaptiveCard",
        "version": "1.3",
        "body": [
            {"type": "Media"},
            {"type": "TextBlock", "text": "a"}
        ]
    }))
    .unwrap();
    let mut diagnostics = Diagnostics::new();
    tracing::subscriber::with_default(subscriber, || {
        render_card(&card, &InputStore::new(), &mut diagnostics);
    });

    assert_eq!(diagnostics.len(), 1);
    let output = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
    assert!(output.contains("skipping unsupported element type 'Media'"));
    assert!(output.contains("WARN"));
    assert!(output.contains("render.unknown_element"));
}

#[test]
fn survey_renders_expected_structure() {
    let instance = CardInstance::mount(&load_fixture("survey"));
    let rendered = instance.render();
    let root = &rendered.tree;

    let roles: Vec<StackRole> = root
        .children()
        .iter()
        .filter_map(|node| match &node.view {
            View::Stack(stack) => Some(stack.role),
            _ => None,
        })
        .collect();
    assert_eq!(
        roles,
        vec![StackRole::Container, StackRole::ColumnSet, StackRole::Actions]
    );
    // The hidden note renders nothing.
    assert_eq!(root.children().len(), 4);

    let container = &root.children()[1];
    assert_eq!(container.layout.margin_top, 12);
    assert!(container.layout.separator.is_some());

    let widths: Vec<WidthPolicy> = root.children()[2]
        .children()
        .iter()
        .map(|column| column.layout.width)
        .collect();
    assert_eq!(widths, vec![WidthPolicy::Shrink, WidthPolicy::Flex(1.0)]);

    let buttons = root.children()[3].children();
    assert_eq!(buttons.len(), 1);
    assert_eq!(rendered.diagnostics.codes(), vec!["render.unknown_action"]);
}

#[test]
fn failed_cards_render_a_single_error() {
    let instance = CardInstance::mount(&load_fixture("invalid_version"));
    let rendered = instance.render();
    let View::Error(error) = &rendered.tree.view else {
        panic!("expected an error view");
    };
    assert!(error.message.contains("card.unsupported_version"));
    assert_eq!(rendered.tree.descendants().count(), 1);
}

fn load_fixture(name: &str) -> Value {
    let path = format!("tests/fixtures/cards/{name}.json");
    let data = fs::read_to_string(path).expect("fixture missing");
    serde_json::from_str(&data).expect("invalid json")
}
