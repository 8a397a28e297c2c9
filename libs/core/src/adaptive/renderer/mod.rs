//! Maps the normalized card tree to a [`VisualNode`] tree.
//!
//! Rendering is a pure function of the node, the instance's [`InputStore`], and the diagnostic
//! sink. Unsupported kinds render nothing and report one diagnostic so a single bad node never
//! takes down its siblings.

use crate::adaptive::diagnostics::{Diagnostic, DiagnosticSink, child_path};
use crate::adaptive::model::{CardDocument, Node, NodeKind};
use crate::adaptive::schema::Spacing;
use crate::adaptive::store::InputStore;

mod actions;
mod inputs;
mod layout;
mod text;
pub mod visual;

pub use actions::render_actions;
pub(crate) use inputs::toggle_checked;
pub use visual::{
    ButtonView, Direction, ErrorView, Justify, KeyboardType, Layout, Separator, StackRole,
    StackView, TextAlign, TextInputView, TextView, ToggleView, View, VisualNode, WidthPolicy,
};

pub const CARD_PADDING: u16 = 12;
pub const BODY_GAP: u16 = 8;
pub const SEPARATOR: Separator = Separator {
    thickness: 1,
    padding: 8,
};

pub(crate) struct RenderContext<'a> {
    pub store: &'a InputStore,
    pub sink: &'a mut dyn DiagnosticSink,
}

/// Renders a single element and its children. Returns `None` for hidden or unsupported nodes.
pub fn render_element(
    node: &Node,
    store: &InputStore,
    sink: &mut dyn DiagnosticSink,
) -> Option<VisualNode> {
    let mut ctx = RenderContext { store, sink };
    render_node(node, "", &mut ctx)
}

/// Renders the whole card: the body top to bottom, then a row of action buttons.
pub fn render_card(
    card: &CardDocument,
    store: &InputStore,
    sink: &mut dyn DiagnosticSink,
) -> VisualNode {
    let mut ctx = RenderContext { store, sink };
    let mut children = render_sequence(&card.body, &child_path("", "body"), BODY_GAP, &mut ctx);
    if let Some(mut actions) = render_actions(&card.actions, ctx.sink) {
        if !children.is_empty() {
            actions.layout.gap_before = BODY_GAP;
        }
        children.push(actions);
    }
    VisualNode::new(View::Stack(StackView {
        role: StackRole::Card,
        id: None,
        direction: Direction::Vertical,
        justify: Justify::Start,
        background: None,
        padding: CARD_PADDING,
        children,
    }))
}

/// Terminal view shown in place of a card that could not be loaded.
pub fn render_failure(message: impl Into<String>) -> VisualNode {
    VisualNode::new(View::Error(ErrorView {
        message: message.into(),
    }))
}

pub(crate) fn render_node(node: &Node, path: &str, ctx: &mut RenderContext<'_>) -> Option<VisualNode> {
    if !node.visible {
        return None;
    }
    let view = match &node.kind {
        NodeKind::TextBlock(block) => text::render_text_block(block),
        NodeKind::Container(container) => layout::render_container(node, container, path, ctx),
        NodeKind::ColumnSet(set) => layout::render_column_set(node, set, path, ctx),
        NodeKind::Column(column) => layout::render_column(node, column, path, ctx),
        NodeKind::InputText(input) => inputs::render_text_input(node, input, path, ctx),
        NodeKind::InputToggle(toggle) => inputs::render_toggle(node, toggle, path, ctx),
        NodeKind::Unknown(unknown) => {
            ctx.sink.emit(Diagnostic::warning(
                "render.unknown_element",
                path,
                format!("skipping unsupported element type '{}'", unknown.kind),
            ));
            return None;
        }
    };
    let layout = match &node.kind {
        NodeKind::Container(container) => layout::container_layout(node, container),
        _ => base_layout(node.spacing, node.separator),
    };
    Some(VisualNode::new(view).with_layout(layout))
}

/// Renders `items` in order, placing `gap` between consecutive rendered nodes.
pub(crate) fn render_sequence(
    items: &[Node],
    path: &str,
    gap: u16,
    ctx: &mut RenderContext<'_>,
) -> Vec<VisualNode> {
    let mut rendered: Vec<VisualNode> = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        if let Some(mut visual) = render_node(item, &child_path(path, index), ctx) {
            visual.layout.gap_before = if rendered.is_empty() { 0 } else { gap };
            rendered.push(visual);
        }
    }
    rendered
}

pub(crate) fn base_layout(spacing: Spacing, separator: bool) -> Layout {
    Layout {
        margin_top: spacing.margin(),
        separator: separator.then_some(SEPARATOR),
        ..Layout::default()
    }
}
