//! The normalized card tree.
//!
//! Values here are produced by the normalizer and never mutated afterwards; re-parsing builds a
//! new tree. Serializing a tree yields Adaptive Card JSON that normalizes back to the same tree.

use std::collections::BTreeSet;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::adaptive::schema::{
    BlockHeight, ContainerStyle, ElementKind, HorizontalAlignment, Spacing, TextColor,
    TextInputStyle, TextSize, TextWeight, VerticalAlignment,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "AdaptiveCard")]
pub struct CardDocument {
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema_uri: Option<String>,
    pub version: String,
    pub body: Vec<Node>,
    pub actions: Vec<Action>,
}

impl CardDocument {
    /// Depth-first walk over every node of the body, parents before children.
    pub fn walk(&self) -> impl Iterator<Item = &Node> {
        let mut stack: Vec<&Node> = self.body.iter().rev().collect();
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children().iter().rev());
            Some(node)
        })
    }

    pub fn find_input(&self, id: &str) -> Option<&Node> {
        self.walk()
            .find(|node| node.is_input() && node.id.as_deref() == Some(id))
    }

    pub fn summary(&self) -> CardSummary {
        let mut summary = CardSummary {
            version: self.version.clone(),
            action_count: self.actions.len(),
            ..CardSummary::default()
        };
        for node in self.walk() {
            summary.element_kinds.insert(node.kind_name().to_string());
            if node.is_input()
                && let Some(id) = &node.id
            {
                summary.input_ids.push(id.clone());
            }
        }
        summary
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSummary {
    pub version: String,
    pub element_kinds: BTreeSet<String>,
    pub input_ids: Vec<String>,
    pub action_count: usize,
}

/// One element of a card body with its common, already-defaulted fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    #[serde(flatten)]
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub spacing: Spacing,
    pub separator: bool,
    #[serde(rename = "isVisible")]
    pub visible: bool,
    pub height: BlockHeight,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            id: None,
            spacing: Spacing::default(),
            separator: false,
            visible: true,
            height: BlockHeight::default(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn element_kind(&self) -> Option<ElementKind> {
        match &self.kind {
            NodeKind::TextBlock(_) => Some(ElementKind::TextBlock),
            NodeKind::Container(_) => Some(ElementKind::Container),
            NodeKind::ColumnSet(_) => Some(ElementKind::ColumnSet),
            NodeKind::Column(_) => Some(ElementKind::Column),
            NodeKind::InputText(_) => Some(ElementKind::InputText),
            NodeKind::InputToggle(_) => Some(ElementKind::InputToggle),
            NodeKind::Unknown(_) => None,
        }
    }

    pub fn kind_name(&self) -> &str {
        match &self.kind {
            NodeKind::Unknown(unknown) => &unknown.kind,
            _ => self.element_kind().map(ElementKind::as_str).unwrap_or_default(),
        }
    }

    pub fn is_input(&self) -> bool {
        self.element_kind().is_some_and(ElementKind::is_input)
    }

    pub fn children(&self) -> &[Node] {
        match &self.kind {
            NodeKind::Container(container) => &container.items,
            NodeKind::ColumnSet(set) => &set.columns,
            NodeKind::Column(column) => &column.items,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum NodeKind {
    TextBlock(TextBlock),
    Container(Container),
    ColumnSet(ColumnSet),
    Column(Column),
    #[serde(rename = "Input.Text")]
    InputText(InputText),
    #[serde(rename = "Input.Toggle")]
    InputToggle(InputToggle),
    /// A `type` outside the registry. Rendering skips it with a diagnostic.
    #[serde(untagged)]
    Unknown(UnknownElement),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    pub text: String,
    pub color: TextColor,
    pub size: TextSize,
    pub weight: TextWeight,
    pub wrap: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_lines: Option<u32>,
    pub horizontal_alignment: HorizontalAlignment,
    #[serde(rename = "isSubtle")]
    pub subtle: bool,
}

impl Default for TextBlock {
    fn default() -> Self {
        Self {
            text: String::new(),
            color: TextColor::default(),
            size: TextSize::default(),
            weight: TextWeight::default(),
            wrap: false,
            max_lines: None,
            horizontal_alignment: HorizontalAlignment::default(),
            subtle: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    pub items: Vec<Node>,
    pub style: ContainerStyle,
    pub vertical_content_alignment: VerticalAlignment,
    pub bleed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ColumnSet {
    pub columns: Vec<Node>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub items: Vec<Node>,
    pub width: ColumnWidth,
    pub vertical_content_alignment: VerticalAlignment,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputText {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(rename = "isMultiline")]
    pub multiline: bool,
    pub style: TextInputStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputToggle {
    pub title: String,
    pub value: String,
    pub value_on: String,
    pub value_off: String,
}

impl Default for InputToggle {
    fn default() -> Self {
        Self {
            title: String::new(),
            value: "false".into(),
            value_on: "true".into(),
            value_off: "false".into(),
        }
    }
}

/// Unsupported element. Only the `type` survives serialization; the raw payload is kept for
/// diagnostics and does not take part in equality.
#[derive(Debug, Clone, Serialize)]
pub struct UnknownElement {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip)]
    pub raw: Value,
}

impl PartialEq for UnknownElement {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

/// Width policy of a column.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ColumnWidth {
    #[default]
    Auto,
    Stretch,
    /// `"<n>px"`.
    Pixels(u32),
    /// A bare number.
    Weight(f64),
}

impl ColumnWidth {
    pub fn normalize(raw: Option<&Value>) -> Self {
        match raw {
            Some(Value::String(text)) => Self::parse_str(text).unwrap_or_default(),
            Some(Value::Number(number)) => number
                .as_f64()
                .and_then(positive)
                .map(ColumnWidth::Weight)
                .unwrap_or_default(),
            _ => ColumnWidth::default(),
        }
    }

    fn parse_str(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("auto") {
            return Some(ColumnWidth::Auto);
        }
        if text.eq_ignore_ascii_case("stretch") {
            return Some(ColumnWidth::Stretch);
        }
        if let Some(pixels) = text.strip_suffix("px") {
            return pixels.trim().parse::<u32>().ok().map(ColumnWidth::Pixels);
        }
        text.parse::<f64>()
            .ok()
            .and_then(positive)
            .map(ColumnWidth::Weight)
    }
}

fn positive(value: f64) -> Option<f64> {
    (value.is_finite() && value > 0.0).then_some(value)
}

impl Serialize for ColumnWidth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ColumnWidth::Auto => serializer.serialize_str("auto"),
            ColumnWidth::Stretch => serializer.serialize_str("stretch"),
            ColumnWidth::Pixels(pixels) => serializer.serialize_str(&format!("{pixels}px")),
            ColumnWidth::Weight(weight) => serializer.serialize_f64(*weight),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Action {
    #[serde(rename = "Action.Submit")]
    Submit(SubmitAction),
    #[serde(untagged)]
    Unknown(UnknownAction),
}

impl Action {
    pub fn kind_name(&self) -> &str {
        match self {
            Action::Submit(_) => crate::adaptive::schema::ActionKind::Submit.as_str(),
            Action::Unknown(unknown) => &unknown.kind,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Action::Submit(submit) => &submit.title,
            Action::Unknown(unknown) => &unknown.title,
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            Action::Submit(submit) => submit.id.as_deref(),
            Action::Unknown(unknown) => unknown.id.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SubmitAction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    /// Static payload merged over the live inputs on submit.
    pub data: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnknownAction {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}
