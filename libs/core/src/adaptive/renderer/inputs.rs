use crate::adaptive::diagnostics::Diagnostic;
use crate::adaptive::model::{InputText, InputToggle, Node};
use crate::adaptive::store::InputStore;

use super::RenderContext;
use super::visual::{TextInputView, ToggleView, View};

pub(super) fn render_text_input(
    node: &Node,
    input: &InputText,
    path: &str,
    ctx: &mut RenderContext<'_>,
) -> View {
    let input_id = input_id(node, path, ctx);
    let value = ctx.store.get(&input_id, &input.value).to_string();
    View::TextInput(TextInputView {
        input_id,
        value,
        placeholder: input.placeholder.clone(),
        max_length: input.max_length,
        multiline: input.multiline,
        keyboard: input.style.keyboard(),
    })
}

pub(super) fn render_toggle(
    node: &Node,
    toggle: &InputToggle,
    path: &str,
    ctx: &mut RenderContext<'_>,
) -> View {
    let input_id = input_id(node, path, ctx);
    let checked = toggle_checked(toggle, ctx.store, &input_id);
    let next_value = if checked {
        toggle.value_off.clone()
    } else {
        toggle.value_on.clone()
    };
    View::Toggle(ToggleView {
        input_id,
        title: toggle.title.clone(),
        checked,
        next_value,
    })
}

/// Store value, then the node's `value`, then `valueOff`, compared against `valueOn`.
pub(crate) fn toggle_checked(toggle: &InputToggle, store: &InputStore, id: &str) -> bool {
    let fallback = if toggle.value.is_empty() {
        toggle.value_off.as_str()
    } else {
        toggle.value.as_str()
    };
    store.get(id, fallback) == toggle.value_on
}

fn input_id(node: &Node, path: &str, ctx: &mut RenderContext<'_>) -> String {
    match node.id.as_deref() {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => {
            ctx.sink.emit(Diagnostic::warning(
                "render.input_without_id",
                path,
                format!("{} has no id; edits cannot be stored", node.kind_name()),
            ));
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adaptive::diagnostics::{Diagnostics, NullSink};
    use crate::adaptive::normalizer::parse_element;
    use crate::adaptive::renderer::render_element;
    use crate::adaptive::renderer::visual::KeyboardType;
    use serde_json::json;

    fn toggle_view(raw: serde_json::Value, store: &InputStore) -> ToggleView {
        let node = parse_element(&raw).unwrap();
        match render_element(&node, store, &mut NullSink).unwrap().view {
            View::Toggle(toggle) => toggle,
            other => panic!("expected a toggle, got {other:?}"),
        }
    }

    #[test]
    fn text_input_prefers_store_over_default() {
        let node = parse_element(&json!({
            "type": "Input.Text",
            "id": "name",
            "value": "draft",
            "style": "Tel"
        }))
        .unwrap();
        let mut store = InputStore::new();
        let View::TextInput(initial) = render_element(&node, &store, &mut NullSink).unwrap().view
        else {
            panic!("expected a text input");
        };
        assert_eq!(initial.value, "draft");
        assert_eq!(initial.keyboard, KeyboardType::Phone);

        store.set("name", "Grace");
        let View::TextInput(edited) = render_element(&node, &store, &mut NullSink).unwrap().view
        else {
            panic!("expected a text input");
        };
        assert_eq!(edited.value, "Grace");
    }

    #[test]
    fn toggle_state_follows_value_on() {
        let raw = json!({
            "type": "Input.Toggle",
            "id": "agree",
            "title": "I agree",
            "valueOn": "yes",
            "valueOff": "no",
            "value": "no"
        });
        let mut store = InputStore::new();
        let off = toggle_view(raw.clone(), &store);
        assert!(!off.checked);
        assert_eq!(off.next_value, "yes");

        store.set("agree", "yes");
        let on = toggle_view(raw, &store);
        assert!(on.checked);
        assert_eq!(on.next_value, "no");
    }

    #[test]
    fn toggle_without_value_falls_back_to_value_off() {
        let view = toggle_view(
            json!({"type": "Input.Toggle", "id": "t", "title": "T", "value": ""}),
            &InputStore::new(),
        );
        assert!(!view.checked);
        assert_eq!(view.next_value, "true");
    }

    #[test]
    fn input_without_id_is_reported() {
        let node = parse_element(&json!({"type": "Input.Text"})).unwrap();
        let mut diagnostics = Diagnostics::new();
        assert!(render_element(&node, &InputStore::new(), &mut diagnostics).is_some());
        assert_eq!(diagnostics.codes(), vec!["render.input_without_id"]);
    }
}
