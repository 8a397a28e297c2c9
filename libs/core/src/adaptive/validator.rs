//! Structural validation of raw card JSON.
//!
//! Every check is a pure pass/fail decision. Failures are reported to the sink as error
//! diagnostics and never abort the caller.

use serde_json::{Map, Value};

use crate::adaptive::diagnostics::{Diagnostic, DiagnosticSink, child_path};
use crate::adaptive::schema::{
    ActionKind, CARD_TYPE, ElementKind, SUPPORTED_VERSIONS, is_supported_version,
};

/// Checks the card envelope: type, `$schema`, version, and the shape of `body`/`actions`.
pub fn validate_card(raw: &Value, sink: &mut dyn DiagnosticSink) -> bool {
    check_card(raw, sink)
}

/// Checks a single element without descending into its children.
pub fn validate_element(raw: &Value, sink: &mut dyn DiagnosticSink) -> bool {
    check_element(raw, "", sink)
}

pub fn validate_action(raw: &Value, sink: &mut dyn DiagnosticSink) -> bool {
    check_action(raw, "", sink)
}

/// Validates the envelope, every element reachable from `body`, and every action.
///
/// All findings are reported; the result is true only when nothing failed.
pub fn validate_tree(raw: &Value, sink: &mut dyn DiagnosticSink) -> bool {
    let card_ok = check_card(raw, sink);
    let contents_ok = validate_contents(raw, sink);
    card_ok && contents_ok
}

/// Element and action checks of [`validate_tree`] without the envelope check.
pub(crate) fn validate_contents(raw: &Value, sink: &mut dyn DiagnosticSink) -> bool {
    let Some(obj) = raw.as_object() else {
        return false;
    };
    let mut ok = true;
    if let Some(Value::Array(body)) = obj.get("body") {
        let body_path = child_path("", "body");
        for (index, element) in body.iter().enumerate() {
            ok &= check_element_deep(element, &child_path(&body_path, index), sink);
        }
    }
    if let Some(Value::Array(actions)) = obj.get("actions") {
        let actions_path = child_path("", "actions");
        for (index, action) in actions.iter().enumerate() {
            ok &= check_action(action, &child_path(&actions_path, index), sink);
        }
    }
    ok
}

fn check_card(raw: &Value, sink: &mut dyn DiagnosticSink) -> bool {
    let Some(obj) = raw.as_object() else {
        return fail(sink, "card.not_object", "", "card must be a JSON object");
    };

    match obj.get("type").and_then(Value::as_str) {
        Some(CARD_TYPE) => {}
        Some(other) => {
            return fail(
                sink,
                "card.invalid_type",
                "/type",
                format!("card type must be '{CARD_TYPE}', found '{other}'"),
            );
        }
        None => return fail(sink, "card.missing_type", "/type", "card is missing 'type'"),
    }

    if !obj.contains_key("$schema") {
        return fail(sink, "card.missing_schema", "/$schema", "card is missing '$schema'");
    }

    let Some(version) = obj.get("version") else {
        return fail(sink, "card.missing_version", "/version", "card is missing 'version'");
    };
    match version.as_str() {
        Some(version) if is_supported_version(version) => {}
        _ => {
            return fail(
                sink,
                "card.unsupported_version",
                "/version",
                format!(
                    "version {version} is not one of {}",
                    SUPPORTED_VERSIONS.join(", ")
                ),
            );
        }
    }

    match obj.get("body") {
        Some(Value::Array(_)) => {}
        Some(_) => return fail(sink, "card.body_not_array", "/body", "'body' must be an array"),
        None => return fail(sink, "card.missing_body", "/body", "card is missing 'body'"),
    }

    if let Some(actions) = obj.get("actions")
        && !actions.is_array()
    {
        return fail(
            sink,
            "card.actions_not_array",
            "/actions",
            "'actions' must be an array when present",
        );
    }

    true
}

fn check_element(raw: &Value, path: &str, sink: &mut dyn DiagnosticSink) -> bool {
    let Some(obj) = raw.as_object() else {
        return fail(sink, "element.not_object", path, "element must be a JSON object");
    };
    let Some(type_name) = obj.get("type").and_then(Value::as_str) else {
        return fail(sink, "element.missing_type", path, "element is missing 'type'");
    };
    let Some(kind) = ElementKind::parse(type_name) else {
        return fail(
            sink,
            "element.unknown_type",
            path,
            format!("unsupported element type '{type_name}'"),
        );
    };

    match kind {
        ElementKind::TextBlock => require_text(obj, "text", "textblock.missing_text", path, sink),
        ElementKind::Container => {
            optional_array(obj, "items", "container.items_not_array", path, sink)
        }
        ElementKind::ColumnSet => match obj.get("columns") {
            Some(Value::Array(columns)) if !columns.is_empty() => true,
            Some(Value::Array(_)) => fail(
                sink,
                "columnset.columns_empty",
                path,
                "ColumnSet needs at least one column",
            ),
            Some(_) => fail(
                sink,
                "columnset.columns_not_array",
                path,
                "ColumnSet 'columns' must be an array",
            ),
            None => fail(
                sink,
                "columnset.missing_columns",
                path,
                "ColumnSet is missing 'columns'",
            ),
        },
        ElementKind::Column => optional_array(obj, "items", "column.items_not_array", path, sink),
        ElementKind::InputText => require_text(obj, "id", "input_text.missing_id", path, sink),
        ElementKind::InputToggle => {
            let has_id = require_text(obj, "id", "input_toggle.missing_id", path, sink);
            let has_title = require_text(obj, "title", "input_toggle.missing_title", path, sink);
            has_id && has_title
        }
    }
}

fn check_element_deep(raw: &Value, path: &str, sink: &mut dyn DiagnosticSink) -> bool {
    let mut ok = check_element(raw, path, sink);
    let Some(obj) = raw.as_object() else {
        return ok;
    };
    let parent_kind = obj
        .get("type")
        .and_then(Value::as_str)
        .and_then(ElementKind::parse);

    for key in ["items", "columns"] {
        let Some(Value::Array(children)) = obj.get(key) else {
            continue;
        };
        let children_path = child_path(path, key);
        for (index, child) in children.iter().enumerate() {
            let entry_path = child_path(&children_path, index);
            if parent_kind == Some(ElementKind::ColumnSet)
                && key == "columns"
                && child.get("type").and_then(Value::as_str) != Some(ElementKind::Column.as_str())
            {
                ok = fail(
                    sink,
                    "columnset.not_a_column",
                    &entry_path,
                    "ColumnSet entries must be of type 'Column'",
                );
            }
            ok &= check_element_deep(child, &entry_path, sink);
        }
    }
    ok
}

fn check_action(raw: &Value, path: &str, sink: &mut dyn DiagnosticSink) -> bool {
    let Some(obj) = raw.as_object() else {
        return fail(sink, "action.not_object", path, "action must be a JSON object");
    };
    let Some(type_name) = obj.get("type").and_then(Value::as_str) else {
        return fail(sink, "action.missing_type", path, "action is missing 'type'");
    };
    match ActionKind::parse(type_name) {
        Some(ActionKind::Submit) => {
            require_text(obj, "title", "action.missing_title", path, sink)
        }
        None => fail(
            sink,
            "action.unsupported_type",
            path,
            format!("unsupported action type '{type_name}'"),
        ),
    }
}

fn require_text(
    obj: &Map<String, Value>,
    key: &str,
    code: &str,
    path: &str,
    sink: &mut dyn DiagnosticSink,
) -> bool {
    match obj.get(key).and_then(Value::as_str) {
        Some(text) if !text.is_empty() => true,
        _ => fail(
            sink,
            code,
            path,
            format!("'{key}' must be a non-empty string"),
        ),
    }
}

fn optional_array(
    obj: &Map<String, Value>,
    key: &str,
    code: &str,
    path: &str,
    sink: &mut dyn DiagnosticSink,
) -> bool {
    match obj.get(key) {
        None | Some(Value::Array(_)) => true,
        Some(_) => fail(sink, code, path, format!("'{key}' must be an array")),
    }
}

fn fail(sink: &mut dyn DiagnosticSink, code: &str, path: &str, message: impl Into<String>) -> bool {
    sink.emit(Diagnostic::error(code, path, message));
    false
}
