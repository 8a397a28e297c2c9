//! Platform-neutral visual tree handed to the host for drawing.
//!
//! Interactive views carry the identifiers the host needs to report user events back to the
//! card instance; they never hold callbacks themselves.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualNode {
    pub layout: Layout,
    #[serde(flatten)]
    pub view: View,
}

impl VisualNode {
    pub fn new(view: View) -> Self {
        Self {
            layout: Layout::default(),
            view,
        }
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn children(&self) -> &[VisualNode] {
        match &self.view {
            View::Stack(stack) => &stack.children,
            _ => &[],
        }
    }

    /// Depth-first iteration over this node and all descendants.
    pub fn descendants(&self) -> impl Iterator<Item = &VisualNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children().iter().rev());
            Some(node)
        })
    }
}

/// Placement of a node relative to its parent and preceding sibling.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    /// Resolved from the element's `spacing`.
    pub margin_top: u16,
    /// Gap to the previous rendered sibling along the parent's direction; zero for the first.
    pub gap_before: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separator: Option<Separator>,
    /// Negative values pull the node outward past the parent's padding.
    pub inset_horizontal: i16,
    pub width: WidthPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Separator {
    pub thickness: u16,
    pub padding: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum WidthPolicy {
    /// Takes the full cross-axis width of a vertical parent.
    #[default]
    Fill,
    /// Equal share of the remaining row width, scaled by the factor.
    Flex(f64),
    /// Shrinks to its content.
    Shrink,
    Fixed(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    Stack(StackView),
    Text(TextView),
    TextInput(TextInputView),
    Toggle(ToggleView),
    Button(ButtonView),
    Error(ErrorView),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StackRole {
    Card,
    Container,
    ColumnSet,
    Column,
    Actions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Justify {
    #[default]
    Start,
    Center,
    End,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackView {
    pub role: StackRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub direction: Direction,
    pub justify: Justify,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<&'static str>,
    pub padding: u16,
    pub children: Vec<VisualNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextView {
    pub text: String,
    pub color: &'static str,
    pub font_size: u16,
    pub font_weight: u16,
    pub opacity: f32,
    pub align: TextAlign,
    /// Line cap; `None` lets the text grow.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_lines: Option<u32>,
    /// Whether overflowing text ends with an ellipsis.
    pub ellipsize: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyboardType {
    Default,
    Phone,
    Url,
    Email,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextInputView {
    pub input_id: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    pub multiline: bool,
    pub keyboard: KeyboardType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleView {
    pub input_id: String,
    pub title: String,
    pub checked: bool,
    /// Value written to the store when the user flips the toggle.
    pub next_value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonView {
    pub title: String,
    /// Index into the card's `actions`.
    pub action_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorView {
    pub message: String,
}
