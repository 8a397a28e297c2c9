#![cfg(feature = "adaptive-cards")]

use std::fs;

use cardkit_core::adaptive::schema::{
    HorizontalAlignment, Spacing, TextColor, TextInputStyle, TextSize, TextWeight,
    VerticalAlignment,
};
use cardkit_core::adaptive::{
    ColumnWidth, Diagnostics, NodeKind, Normalizer, ParseError, parse_card, parse_element,
};
use serde_json::{Value, json};

#[test]
fn text_block_gets_every_default() {
    let node = parse_element(&json!({"type": "TextBlock", "text": "hi"})).unwrap();
    assert_eq!(node.spacing, Spacing::Default);
    assert!(!node.separator);
    assert!(node.visible);
    let NodeKind::TextBlock(block) = node.kind else {
        panic!("expected a TextBlock");
    };
    assert_eq!(block.size, TextSize::Default);
    assert_eq!(block.weight, TextWeight::Default);
    assert_eq!(block.color, TextColor::Default);
    assert_eq!(block.horizontal_alignment, HorizontalAlignment::Left);
    assert!(!block.wrap);
    assert!(!block.subtle);
    assert_eq!(block.max_lines, None);
}

#[test]
fn unknown_enum_values_fall_back() {
    let node = parse_element(&json!({
        "type": "TextBlock",
        "text": "x",
        "size": "Huge",
        "color": 7,
        "spacing": "Enormous"
    }))
    .unwrap();
    assert_eq!(node.spacing, Spacing::Default);
    let NodeKind::TextBlock(block) = node.kind else {
        panic!("expected a TextBlock");
    };
    assert_eq!(block.size, TextSize::Default);
    assert_eq!(block.color, TextColor::Default);
}

#[test]
fn aliases_and_missing_version_are_normalized() {
    let card = parse_card(&load_fixture("aliases")).unwrap();
    assert_eq!(card.version, "1.3");
    assert!(card.actions.is_empty());

    let NodeKind::TextBlock(quiet) = &card.body[0].kind else {
        panic!("expected a TextBlock");
    };
    assert!(quiet.subtle);
    assert_eq!(quiet.size, TextSize::Default);
    assert!(!card.body[1].visible);

    let NodeKind::InputText(notes) = &card.body[2].kind else {
        panic!("expected an Input.Text");
    };
    assert!(notes.multiline);
    assert_eq!(notes.style, TextInputStyle::Url);

    let NodeKind::Column(column) = &card.body[3].kind else {
        panic!("expected a Column");
    };
    assert_eq!(column.vertical_content_alignment, VerticalAlignment::Bottom);
    assert_eq!(column.width, ColumnWidth::Pixels(120));
}

#[test]
fn normalizer_uses_its_default_version() {
    let card = Normalizer::new("1.1")
        .parse_card(&json!({"type": "AdaptiveCard", "body": []}), &mut Diagnostics::new())
        .unwrap();
    assert_eq!(card.version, "1.1");
}

#[test]
fn input_errors_reject_the_whole_card() {
    assert_eq!(parse_card(&Value::Null), Err(ParseError::MissingInput));
    assert_eq!(
        parse_card(&json!({"type": "AdaptiveCard"})),
        Err(ParseError::MissingBody)
    );
    assert_eq!(
        parse_card(&json!({
            "type": "AdaptiveCard",
            "body": [{"type": "Container", "items": [{"text": "no type"}]}]
        })),
        Err(ParseError::MissingType {
            path: "/body/0/items/0".into()
        })
    );
    assert_eq!(
        parse_card(&json!({"type": "AdaptiveCard", "body": [], "actions": [{"title": "x"}]})),
        Err(ParseError::MissingActionType {
            path: "/actions/0".into()
        })
    );
}

#[test]
fn normalization_is_a_fixed_point() {
    for name in ["hello_submit", "survey", "fail_open", "aliases", "invalid_version"] {
        let first = parse_card(&load_fixture(name)).unwrap();
        let serialized = serde_json::to_value(&first).unwrap();
        let second = parse_card(&serialized).unwrap();
        assert_eq!(first, second, "fixture {name} is not stable");
    }
}

#[test]
fn unknown_keys_are_dropped_on_serialize() {
    let card = parse_card(&json!({
        "type": "AdaptiveCard",
        "body": [{"type": "TextBlock", "text": "t", "fontType": "Monospace", "lang": "en"}]
    }))
    .unwrap();
    let value = serde_json::to_value(&card).unwrap();
    assert!(value["body"][0].get("fontType").is_none());
    assert!(value["body"][0].get("lang").is_none());
}

#[cfg(feature = "proptest")]
mod prop {
    use super::*;
    use proptest::collection::vec;
    use proptest::option;
    use proptest::prelude::*;
    use proptest::sample::select;

    fn text_block() -> impl Strategy<Value = Value> {
        (
            "[a-zA-Z ]{0,12}",
            select(vec!["Small", "Default", "Medium", "Large", "ExtraLarge", "Huge"]),
            select(vec!["Lighter", "Default", "Bolder", "heavy"]),
            any::<bool>(),
            option::of(0u32..5),
        )
            .prop_map(|(text, size, weight, wrap, max_lines)| {
                let mut block = json!({
                    "type": "TextBlock",
                    "text": text,
                    "size": size,
                    "weight": weight,
                    "wrap": wrap
                });
                if let Some(lines) = max_lines {
                    block["maxLines"] = json!(lines);
                }
                block
            })
    }

    fn leaf() -> impl Strategy<Value = Value> {
        prop_oneof![
            text_block(),
            "[a-z]{1,6}".prop_map(|id| json!({"type": "Input.Text", "id": id, "style": "Tel"})),
            "[a-z]{1,6}".prop_map(|id| json!({"type": "Input.Toggle", "id": id, "title": "t"})),
            Just(json!({"type": "Rating", "max": 5})),
        ]
    }

    fn element() -> impl Strategy<Value = Value> {
        leaf().prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                vec(inner.clone(), 0..4)
                    .prop_map(|items| json!({"type": "Container", "style": "good", "items": items})),
                (vec(inner, 0..3), select(vec![
                    json!("auto"),
                    json!("stretch"),
                    json!("40px"),
                    json!(2),
                ]))
                .prop_map(|(items, width)| json!({
                    "type": "ColumnSet",
                    "columns": [{"type": "Column", "width": width, "items": items}]
                })),
            ]
        })
    }

    proptest! {
        #[test]
        fn parse_serialize_parse_is_stable(body in vec(element(), 0..4)) {
            let raw = json!({"type": "AdaptiveCard", "version": "1.2", "body": body});
            let first = parse_card(&raw).unwrap();
            let second = parse_card(&serde_json::to_value(&first).unwrap()).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}

fn load_fixture(name: &str) -> Value {
    let path = format!("tests/fixtures/cards/{name}.json");
    let data = fs::read_to_string(path).expect("fixture missing");
    serde_json::from_str(&data).expect("invalid json")
}
