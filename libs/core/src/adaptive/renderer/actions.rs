use crate::adaptive::diagnostics::{Diagnostic, DiagnosticSink, child_path};
use crate::adaptive::model::Action;

use super::visual::{ButtonView, Direction, Justify, StackRole, StackView, View, VisualNode};

pub const ACTION_GAP: u16 = 8;

/// Renders the action row. Returns `None` when no action is renderable.
pub fn render_actions(actions: &[Action], sink: &mut dyn DiagnosticSink) -> Option<VisualNode> {
    let actions_path = child_path("", "actions");
    let mut buttons: Vec<VisualNode> = Vec::with_capacity(actions.len());
    for (index, action) in actions.iter().enumerate() {
        match action {
            Action::Submit(submit) => {
                let mut button = VisualNode::new(View::Button(ButtonView {
                    title: submit.title.clone(),
                    action_index: index,
                    action_id: submit.id.clone(),
                }));
                button.layout.gap_before = if buttons.is_empty() { 0 } else { ACTION_GAP };
                buttons.push(button);
            }
            Action::Unknown(unknown) => sink.emit(Diagnostic::warning(
                "render.unknown_action",
                &child_path(&actions_path, index),
                format!("skipping unsupported action type '{}'", unknown.kind),
            )),
        }
    }
    if buttons.is_empty() {
        return None;
    }
    Some(VisualNode::new(View::Stack(StackView {
        role: StackRole::Actions,
        id: None,
        direction: Direction::Horizontal,
        justify: Justify::Start,
        background: None,
        padding: 0,
        children: buttons,
    })))
}
