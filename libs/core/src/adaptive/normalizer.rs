//! Rewrites raw card JSON into the canonical [`CardDocument`] tree.
//!
//! Every field ends up with a concrete value: enums outside their allow-list fall back to the
//! documented default, unknown keys are dropped, and `items`/`columns` are normalized
//! recursively. The normalizer does not validate; run the validator first when strictness
//! matters.

use std::borrow::Cow;

use serde_json::{Map, Value};

use crate::adaptive::diagnostics::{Diagnostic, DiagnosticSink, TracingSink, child_path};
use crate::adaptive::error::ParseError;
use crate::adaptive::model::{
    Action, CardDocument, Column, ColumnSet, ColumnWidth, Container, InputText, InputToggle,
    Node, NodeKind, SubmitAction, TextBlock, UnknownAction, UnknownElement,
};
use crate::adaptive::schema::{
    ActionKind, BlockHeight, ContainerStyle, DEFAULT_VERSION, ElementKind, HorizontalAlignment,
    Spacing, TextColor, TextInputStyle, TextSize, TextWeight, VerticalAlignment,
    is_supported_version,
};

/// Parses a card with the default settings, tracing any diagnostics.
pub fn parse_card(raw: &Value) -> Result<CardDocument, ParseError> {
    Normalizer::default().parse_card(raw, &mut TracingSink)
}

/// Parses the string-serialized form of a card.
pub fn parse_card_str(raw: &str) -> Result<CardDocument, ParseError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|err| ParseError::InvalidJson(err.to_string()))?;
    parse_card(&value)
}

pub fn parse_element(raw: &Value) -> Result<Node, ParseError> {
    Normalizer::default().parse_element(raw, "", &mut TracingSink)
}

pub fn parse_action(raw: &Value) -> Result<Action, ParseError> {
    Normalizer::default().parse_action(raw, "", &mut TracingSink)
}

#[derive(Debug, Clone)]
pub struct Normalizer {
    default_version: String,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            default_version: DEFAULT_VERSION.to_string(),
        }
    }
}

impl Normalizer {
    /// `default_version` fills in cards that omit `version`.
    pub fn new(default_version: impl Into<String>) -> Self {
        Self {
            default_version: default_version.into(),
        }
    }

    pub fn parse_card(
        &self,
        raw: &Value,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<CardDocument, ParseError> {
        let raw = decode_document(raw)?;
        let obj = raw.as_object().ok_or_else(|| ParseError::NotObject {
            path: String::new(),
        })?;

        let schema_uri = string_field(obj, &["$schema"]);
        let version = match obj
            .get("version")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|v| !v.is_empty())
        {
            Some(version) => {
                if !is_supported_version(version) {
                    sink.emit(Diagnostic::warning(
                        "card.unsupported_version",
                        "/version",
                        format!("keeping unsupported version {version}"),
                    ));
                }
                version.to_string()
            }
            None => self.default_version.clone(),
        };

        let body_path = child_path("", "body");
        let body = match obj.get("body") {
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(index, item)| self.parse_element(item, &child_path(&body_path, index), sink))
                .collect::<Result<Vec<_>, _>>()?,
            Some(_) => return Err(ParseError::BodyNotArray),
            None => return Err(ParseError::MissingBody),
        };

        let actions_path = child_path("", "actions");
        let actions = match obj.get("actions") {
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    self.parse_action(item, &child_path(&actions_path, index), sink)
                })
                .collect::<Result<Vec<_>, _>>()?,
            None | Some(Value::Null) => Vec::new(),
            Some(_) => return Err(ParseError::ActionsNotArray),
        };

        Ok(CardDocument {
            schema_uri,
            version,
            body,
            actions,
        })
    }

    /// Normalizes one element and, recursively, its children.
    pub fn parse_element(
        &self,
        raw: &Value,
        path: &str,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Node, ParseError> {
        let obj = match raw {
            Value::Null => return Err(ParseError::MissingInput),
            Value::Object(obj) => obj,
            _ => {
                return Err(ParseError::NotObject {
                    path: path.to_string(),
                });
            }
        };
        let type_name = obj
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| ParseError::MissingType {
                path: path.to_string(),
            })?;

        let kind = match ElementKind::parse(type_name) {
            Some(ElementKind::TextBlock) => NodeKind::TextBlock(TextBlock {
                text: string_field(obj, &["text"]).unwrap_or_default(),
                color: TextColor::normalize(obj.get("color")),
                size: TextSize::normalize(obj.get("size")),
                weight: TextWeight::normalize(obj.get("weight")),
                wrap: bool_field(obj, &["wrap"], false),
                max_lines: count_field(obj, "maxLines"),
                horizontal_alignment: HorizontalAlignment::normalize(
                    obj.get("horizontalAlignment"),
                ),
                subtle: bool_field(obj, &["isSubtle", "subtle"], false),
            }),
            Some(ElementKind::Container) => NodeKind::Container(Container {
                items: self.parse_children(obj, "items", path, sink)?,
                style: ContainerStyle::normalize(obj.get("style")),
                vertical_content_alignment: vertical_alignment(obj),
                bleed: bool_field(obj, &["bleed"], false),
            }),
            Some(ElementKind::ColumnSet) => NodeKind::ColumnSet(ColumnSet {
                columns: self.parse_children(obj, "columns", path, sink)?,
            }),
            Some(ElementKind::Column) => NodeKind::Column(Column {
                items: self.parse_children(obj, "items", path, sink)?,
                width: ColumnWidth::normalize(obj.get("width")),
                vertical_content_alignment: vertical_alignment(obj),
            }),
            Some(ElementKind::InputText) => NodeKind::InputText(InputText {
                placeholder: string_field(obj, &["placeholder"]),
                value: string_field(obj, &["value"]).unwrap_or_default(),
                max_length: count_field(obj, "maxLength"),
                multiline: bool_field(obj, &["isMultiline", "multiline"], false),
                style: TextInputStyle::normalize(first_of(obj, &["style", "inputStyle"])),
            }),
            Some(ElementKind::InputToggle) => {
                let defaults = InputToggle::default();
                NodeKind::InputToggle(InputToggle {
                    title: string_field(obj, &["title"]).unwrap_or_default(),
                    value: string_field(obj, &["value"]).unwrap_or(defaults.value),
                    value_on: string_field(obj, &["valueOn"]).unwrap_or(defaults.value_on),
                    value_off: string_field(obj, &["valueOff"]).unwrap_or(defaults.value_off),
                })
            }
            None => NodeKind::Unknown(UnknownElement {
                kind: type_name.to_string(),
                raw: raw.clone(),
            }),
        };

        Ok(Node {
            kind,
            id: string_field(obj, &["id"]),
            spacing: Spacing::normalize(obj.get("spacing")),
            separator: bool_field(obj, &["separator"], false),
            visible: bool_field(obj, &["isVisible", "visible"], true),
            height: BlockHeight::normalize(obj.get("height")),
        })
    }

    pub fn parse_action(
        &self,
        raw: &Value,
        path: &str,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Action, ParseError> {
        let obj = match raw {
            Value::Null => return Err(ParseError::MissingInput),
            Value::Object(obj) => obj,
            _ => {
                return Err(ParseError::NotObject {
                    path: path.to_string(),
                });
            }
        };
        let type_name = obj
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| ParseError::MissingActionType {
                path: path.to_string(),
            })?;
        let title = string_field(obj, &["title"]).unwrap_or_default();
        let id = string_field(obj, &["id"]);

        Ok(match ActionKind::parse(type_name) {
            Some(ActionKind::Submit) => {
                let data = match obj.get("data") {
                    Some(Value::Object(data)) => data.clone(),
                    None | Some(Value::Null) => Map::new(),
                    Some(other) => {
                        sink.emit(Diagnostic::warning(
                            "action.data_not_object",
                            &child_path(path, "data"),
                            format!("ignoring non-object submit data {other}"),
                        ));
                        Map::new()
                    }
                };
                Action::Submit(SubmitAction { id, title, data })
            }
            None => Action::Unknown(UnknownAction {
                kind: type_name.to_string(),
                title,
                id,
            }),
        })
    }

    fn parse_children(
        &self,
        obj: &Map<String, Value>,
        key: &str,
        path: &str,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Vec<Node>, ParseError> {
        let children_path = child_path(path, key);
        match obj.get(key) {
            Some(Value::Array(children)) => children
                .iter()
                .enumerate()
                .map(|(index, child)| {
                    self.parse_element(child, &child_path(&children_path, index), sink)
                })
                .collect(),
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(_) => {
                sink.emit(Diagnostic::warning(
                    "element.children_not_array",
                    &children_path,
                    format!("'{key}' is not an array; treating it as empty"),
                ));
                Ok(Vec::new())
            }
        }
    }
}

/// Accepts either an object or its string-serialized form.
pub(crate) fn decode_document(raw: &Value) -> Result<Cow<'_, Value>, ParseError> {
    match raw {
        Value::Null => Err(ParseError::MissingInput),
        Value::String(text) => {
            let decoded: Value = serde_json::from_str(text)
                .map_err(|err| ParseError::InvalidJson(err.to_string()))?;
            if decoded.is_null() {
                return Err(ParseError::MissingInput);
            }
            Ok(Cow::Owned(decoded))
        }
        other => Ok(Cow::Borrowed(other)),
    }
}

fn first_of<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| obj.get(*key))
}

fn string_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    first_of(obj, keys)
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn bool_field(obj: &Map<String, Value>, keys: &[&str], default: bool) -> bool {
    first_of(obj, keys)
        .and_then(Value::as_bool)
        .unwrap_or(default)
}

fn count_field(obj: &Map<String, Value>, key: &str) -> Option<u32> {
    obj.get(key)
        .and_then(Value::as_u64)
        .filter(|count| *count > 0)
        .and_then(|count| u32::try_from(count).ok())
}

fn vertical_alignment(obj: &Map<String, Value>) -> VerticalAlignment {
    VerticalAlignment::normalize(first_of(
        obj,
        &["verticalContentAlignment", "verticalAlignment"],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adaptive::diagnostics::Diagnostics;
    use serde_json::json;

    #[test]
    fn text_block_gets_every_default() {
        let node = parse_element(&json!({"type": "TextBlock", "text": "hi"})).unwrap();
        assert_eq!(node.spacing, Spacing::Default);
        assert!(!node.separator);
        assert!(node.visible);
        assert_eq!(node.height, BlockHeight::Auto);
        let NodeKind::TextBlock(block) = node.kind else {
            panic!("expected a text block");
        };
        assert_eq!(block.size, TextSize::Default);
        assert_eq!(block.weight, TextWeight::Default);
        assert_eq!(block.color, TextColor::Default);
        assert!(!block.wrap);
        assert!(!block.subtle);
        assert_eq!(block.max_lines, None);
        assert_eq!(block.horizontal_alignment, HorizontalAlignment::Left);
    }

    #[test]
    fn unknown_enum_values_are_replaced() {
        let node =
            parse_element(&json!({"type": "TextBlock", "text": "x", "size": "Huge"})).unwrap();
        let NodeKind::TextBlock(block) = node.kind else {
            panic!("expected a text block");
        };
        assert_eq!(block.size, TextSize::Default);
    }

    #[test]
    fn missing_type_is_an_input_error() {
        let err = parse_element(&json!({"text": "orphan"})).unwrap_err();
        assert_eq!(err, ParseError::MissingType { path: String::new() });
        assert_eq!(parse_element(&Value::Null).unwrap_err(), ParseError::MissingInput);
    }

    #[test]
    fn nested_missing_type_reports_its_path() {
        let err = parse_card(&json!({
            "type": "AdaptiveCard",
            "body": [
                {"type": "Container", "items": [{"type": "TextBlock", "text": "a"}, {}]}
            ]
        }))
        .unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingType {
                path: "/body/0/items/1".into()
            }
        );
    }

    #[test]
    fn card_defaults_version_and_actions() {
        let card = parse_card(&json!({"type": "AdaptiveCard", "body": []})).unwrap();
        assert_eq!(card.version, DEFAULT_VERSION);
        assert!(card.actions.is_empty());
        assert!(card.schema_uri.is_none());
    }

    #[test]
    fn card_without_body_is_rejected() {
        assert_eq!(
            parse_card(&json!({"type": "AdaptiveCard", "version": "1.3"})).unwrap_err(),
            ParseError::MissingBody
        );
        assert_eq!(
            parse_card(&json!({"type": "AdaptiveCard", "body": {}})).unwrap_err(),
            ParseError::BodyNotArray
        );
        assert_eq!(parse_card(&Value::Null).unwrap_err(), ParseError::MissingInput);
    }

    #[test]
    fn string_serialized_cards_are_decoded() {
        let raw = Value::String(r#"{"type":"AdaptiveCard","body":[]}"#.into());
        assert!(parse_card(&raw).unwrap().body.is_empty());
        assert!(matches!(
            parse_card(&Value::String("{not json".into())),
            Err(ParseError::InvalidJson(_))
        ));
        assert!(matches!(
            parse_card_str("[1, 2]"),
            Err(ParseError::NotObject { .. })
        ));
    }

    #[test]
    fn unknown_kinds_keep_common_fields_only() {
        let node = parse_element(&json!({
            "type": "Image",
            "url": "https://example.com/a.png",
            "spacing": "Large",
            "id": "hero"
        }))
        .unwrap();
        assert_eq!(node.kind_name(), "Image");
        assert_eq!(node.spacing, Spacing::Large);
        assert_eq!(node.id.as_deref(), Some("hero"));
        assert!(matches!(node.kind, NodeKind::Unknown(_)));
    }

    #[test]
    fn column_set_tolerates_missing_columns() {
        let node = parse_element(&json!({"type": "ColumnSet"})).unwrap();
        assert!(node.children().is_empty());

        let mut diagnostics = Diagnostics::new();
        let node = Normalizer::default()
            .parse_element(&json!({"type": "Container", "items": 7}), "", &mut diagnostics)
            .unwrap();
        assert!(node.children().is_empty());
        assert_eq!(diagnostics.codes(), vec!["element.children_not_array"]);
    }

    #[test]
    fn toggle_and_text_input_defaults() {
        let toggle = parse_element(&json!({"type": "Input.Toggle", "id": "t"})).unwrap();
        let NodeKind::InputToggle(toggle) = toggle.kind else {
            panic!("expected a toggle");
        };
        assert_eq!(toggle, InputToggle::default());

        let input = parse_element(&json!({
            "type": "Input.Text",
            "id": "email",
            "style": "email",
            "isMultiline": true,
            "maxLength": 40
        }))
        .unwrap();
        let NodeKind::InputText(input) = input.kind else {
            panic!("expected a text input");
        };
        assert_eq!(input.style, TextInputStyle::Email);
        assert!(input.multiline);
        assert_eq!(input.max_length, Some(40));
        assert_eq!(input.value, "");
    }

    #[test]
    fn submit_keeps_data_and_other_actions_are_reduced() {
        let submit = parse_action(&json!({
            "type": "Action.Submit",
            "title": "Send",
            "id": "send",
            "data": {"k": 1}
        }))
        .unwrap();
        let Action::Submit(submit) = submit else {
            panic!("expected a submit action");
        };
        assert_eq!(submit.data.get("k"), Some(&json!(1)));
        assert_eq!(submit.id.as_deref(), Some("send"));

        let open = parse_action(&json!({
            "type": "Action.OpenUrl",
            "title": "Docs",
            "url": "https://example.com"
        }))
        .unwrap();
        assert_eq!(
            open,
            Action::Unknown(UnknownAction {
                kind: "Action.OpenUrl".into(),
                title: "Docs".into(),
                id: None,
            })
        );
    }

    #[test]
    fn non_object_submit_data_is_dropped_with_a_warning() {
        let mut diagnostics = Diagnostics::new();
        let action = Normalizer::default()
            .parse_action(
                &json!({"type": "Action.Submit", "title": "Go", "data": "raw"}),
                "/actions/0",
                &mut diagnostics,
            )
            .unwrap();
        let Action::Submit(submit) = action else {
            panic!("expected a submit action");
        };
        assert!(submit.data.is_empty());
        assert_eq!(diagnostics.entries()[0].path, "/actions/0/data");
    }
}
