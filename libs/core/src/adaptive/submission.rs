use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::adaptive::model::SubmitAction;
use crate::adaptive::schema::ActionKind;
use crate::adaptive::store::InputStore;

pub const SUBMIT_ACTION_KIND: &str = ActionKind::Submit.as_str();

/// What a host receives when an `Action.Submit` fires.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub action: SubmitAction,
    /// Input values overlaid with the action's static `data`.
    pub data: Map<String, Value>,
    pub action_kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_id: Option<String>,
}

/// Merges the store snapshot with `action.data`; static data wins on key collisions.
pub fn build_submission(action: &SubmitAction, store: &InputStore) -> SubmissionPayload {
    let mut data = store.snapshot();
    for (key, value) in &action.data {
        data.insert(key.clone(), value.clone());
    }
    SubmissionPayload {
        action: action.clone(),
        data,
        action_kind: SUBMIT_ACTION_KIND,
        action_id: action.id.clone(),
    }
}

/// Receives submission payloads. Any `FnMut(SubmissionPayload)` closure is a handler.
pub trait SubmitHandler {
    fn submit(&mut self, payload: SubmissionPayload);
}

impl<F> SubmitHandler for F
where
    F: FnMut(SubmissionPayload),
{
    fn submit(&mut self, payload: SubmissionPayload) {
        self(payload)
    }
}

/// Builds the payload and hands it to `handler`. Without a handler the payload is dropped.
pub fn dispatch_submission(
    action: &SubmitAction,
    store: &InputStore,
    handler: Option<&mut dyn SubmitHandler>,
) -> SubmissionPayload {
    let payload = build_submission(action, store);
    debug!(
        target: "cardkit.submit",
        action_id = payload.action_id.as_deref().unwrap_or(""),
        fields = payload.data.len(),
        delivered = handler.is_some(),
        "submit action fired"
    );
    if let Some(handler) = handler {
        handler.submit(payload.clone());
    }
    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn action(data: Value) -> SubmitAction {
        SubmitAction {
            id: Some("send".into()),
            title: "Send".into(),
            data: data.as_object().cloned().unwrap_or_default(),
        }
    }

    #[test]
    fn static_data_overrides_inputs() {
        let mut store = InputStore::new();
        store.set("name", "a");
        let payload = build_submission(&action(json!({"name": "b", "extra": 1})), &store);
        assert_eq!(Value::Object(payload.data), json!({"name": "b", "extra": 1}));
        assert_eq!(payload.action_kind, "Action.Submit");
        assert_eq!(payload.action_id.as_deref(), Some("send"));
    }

    #[test]
    fn inputs_without_collisions_are_kept() {
        let mut store = InputStore::new();
        store.set("comment", "ok");
        let payload = build_submission(&action(json!({"k": 1})), &store);
        assert_eq!(Value::Object(payload.data), json!({"comment": "ok", "k": 1}));
    }

    #[test]
    fn dispatch_without_handler_is_a_no_op() {
        let payload = dispatch_submission(&action(json!({})), &InputStore::new(), None);
        assert!(payload.data.is_empty());
    }

    #[test]
    fn closures_receive_the_payload() {
        let mut received = Vec::new();
        let mut handler = |payload: SubmissionPayload| received.push(payload);
        dispatch_submission(&action(json!({"k": 1})), &InputStore::new(), Some(&mut handler));
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].data.get("k"), Some(&json!(1)));
    }

    #[test]
    fn payload_serializes_in_camel_case() {
        let payload = build_submission(&action(json!({"k": 1})), &InputStore::new());
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["actionKind"], "Action.Submit");
        assert_eq!(value["actionId"], "send");
        assert_eq!(value["data"], json!({"k": 1}));
    }
}
