//! Card-instance controller.
//!
//! A [`CardInstance`] owns one parsed card and the [`InputStore`] behind it. User interaction
//! arrives as [`InputEvent`]s, one at a time; each store write produces exactly one re-render
//! through the render callback. A card that fails to load stays in a terminal failed state and
//! renders a single error view.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::adaptive::config::{CardOptions, ValidationMode};
use crate::adaptive::diagnostics::{Diagnostic, DiagnosticSink, Diagnostics};
use crate::adaptive::error::LoadError;
use crate::adaptive::model::{Action, CardDocument, NodeKind};
use crate::adaptive::normalizer::{Normalizer, decode_document};
use crate::adaptive::renderer::{VisualNode, render_card, render_failure, toggle_checked};
use crate::adaptive::store::InputStore;
use crate::adaptive::submission::{SubmissionPayload, SubmitHandler, dispatch_submission};
use crate::adaptive::telemetry::{CardTelemetry, NullTelemetry, TelemetryHook};
use crate::adaptive::validator::{validate_card, validate_contents};

/// Validates (per `options.validation_mode`) and parses a raw card.
///
/// Only a failed card-level check can block loading, and only in [`ValidationMode::Error`].
/// Element and action findings are reported to `sink` and never block.
pub fn load_card(
    raw: &Value,
    options: &CardOptions,
    sink: &mut dyn DiagnosticSink,
) -> Result<CardDocument, LoadError> {
    let raw = decode_document(raw)?;
    if options.validation_mode != ValidationMode::Off {
        let mut tracker = ErrorTracker::new(sink);
        let card_ok = validate_card(&raw, &mut tracker);
        if !card_ok && options.validation_mode == ValidationMode::Error {
            return Err(LoadError::Validation(tracker.into_errors()));
        }
        validate_contents(&raw, &mut tracker);
    }
    let card = Normalizer::new(options.default_version.as_str()).parse_card(&raw, sink)?;
    Ok(card)
}

/// One user interaction with a mounted card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    TextChanged { id: String, value: String },
    Toggled { id: String },
    Submit { action_index: usize },
}

/// Result of one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub tree: VisualNode,
    pub diagnostics: Diagnostics,
}

enum CardState {
    Ready(CardDocument),
    Failed(String),
}

type RenderCallback = Box<dyn FnMut(&VisualNode)>;

pub struct CardInstance {
    options: CardOptions,
    state: CardState,
    store: InputStore,
    load_diagnostics: Diagnostics,
    on_render: Option<RenderCallback>,
    on_submit: Option<Box<dyn SubmitHandler>>,
    telemetry: Arc<dyn TelemetryHook>,
}

impl fmt::Debug for CardInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardInstance")
            .field("options", &self.options)
            .field("failed", &self.failure())
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
pub struct CardInstanceBuilder {
    options: CardOptions,
    on_render: Option<RenderCallback>,
    on_submit: Option<Box<dyn SubmitHandler>>,
    telemetry: Option<Arc<dyn TelemetryHook>>,
}

impl CardInstanceBuilder {
    pub fn options(mut self, options: CardOptions) -> Self {
        self.options = options;
        self
    }

    pub fn on_render<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&VisualNode) + 'static,
    {
        self.on_render = Some(Box::new(callback));
        self
    }

    pub fn on_submit<H>(mut self, handler: H) -> Self
    where
        H: SubmitHandler + 'static,
    {
        self.on_submit = Some(Box::new(handler));
        self
    }

    pub fn with_telemetry<T: TelemetryHook + 'static>(mut self, hook: T) -> Self {
        self.telemetry = Some(Arc::new(hook));
        self
    }

    /// Loads `raw` and performs the initial render.
    pub fn mount(self, raw: &Value) -> CardInstance {
        let mut instance = CardInstance {
            options: self.options,
            state: CardState::Failed(String::new()),
            store: InputStore::new(),
            load_diagnostics: Diagnostics::new(),
            on_render: self.on_render,
            on_submit: self.on_submit,
            telemetry: self.telemetry.unwrap_or_else(|| Arc::new(NullTelemetry)),
        };
        instance.load(raw);
        instance.publish();
        instance
    }
}

impl CardInstance {
    pub fn builder() -> CardInstanceBuilder {
        CardInstanceBuilder::default()
    }

    /// Mounts `raw` with default options and no callbacks.
    pub fn mount(raw: &Value) -> Self {
        Self::builder().mount(raw)
    }

    /// Replaces the card and discards every stored input value, then re-renders.
    pub fn reload(&mut self, raw: &Value) {
        self.store = InputStore::new();
        self.load(raw);
        self.publish();
    }

    pub fn document(&self) -> Option<&CardDocument> {
        match &self.state {
            CardState::Ready(card) => Some(card),
            CardState::Failed(_) => None,
        }
    }

    /// User-facing message of the terminal failed state.
    pub fn failure(&self) -> Option<&str> {
        match &self.state {
            CardState::Ready(_) => None,
            CardState::Failed(message) => Some(message),
        }
    }

    pub fn store(&self) -> &InputStore {
        &self.store
    }

    /// Diagnostics gathered while validating and normalizing the card.
    pub fn load_diagnostics(&self) -> &Diagnostics {
        &self.load_diagnostics
    }

    pub fn render(&self) -> Rendered {
        let telemetry = CardTelemetry::new(self.telemetry.as_ref());
        let mut diagnostics = Diagnostics::new();
        let tree = match &self.state {
            CardState::Ready(card) => render_card(card, &self.store, &mut diagnostics),
            CardState::Failed(message) => render_failure(message.as_str()),
        };
        telemetry.rendered(diagnostics.len());
        Rendered { tree, diagnostics }
    }

    /// Records an edit of an `Input.Text`. Returns false when `id` names no text input.
    pub fn set_text(&mut self, id: &str, value: impl Into<String>) -> bool {
        let is_text_input = self
            .document()
            .and_then(|card| card.find_input(id))
            .is_some_and(|node| matches!(node.kind, NodeKind::InputText(_)));
        if !is_text_input {
            debug!(target: "cardkit.instance", input = id, "ignoring edit for unknown text input");
            return false;
        }
        self.store.set(id, value);
        self.publish();
        true
    }

    /// Flips an `Input.Toggle` to whichever of `valueOn`/`valueOff` is not active.
    pub fn toggle(&mut self, id: &str) -> bool {
        let next = self
            .document()
            .and_then(|card| card.find_input(id))
            .and_then(|node| match &node.kind {
                NodeKind::InputToggle(toggle) => Some(if toggle_checked(toggle, &self.store, id) {
                    toggle.value_off.clone()
                } else {
                    toggle.value_on.clone()
                }),
                _ => None,
            });
        let Some(next) = next else {
            debug!(target: "cardkit.instance", input = id, "ignoring toggle for unknown input");
            return false;
        };
        self.store.set(id, next);
        self.publish();
        true
    }

    /// Fires the action at `action_index`. Only `Action.Submit` produces a payload.
    pub fn submit(&mut self, action_index: usize) -> Option<SubmissionPayload> {
        let CardState::Ready(card) = &self.state else {
            return None;
        };
        let Some(Action::Submit(action)) = card.actions.get(action_index) else {
            debug!(target: "cardkit.instance", action_index, "no submit action at index");
            return None;
        };
        let handler = self
            .on_submit
            .as_mut()
            .map(|handler| handler.as_mut() as &mut dyn SubmitHandler);
        let payload = dispatch_submission(action, &self.store, handler);
        CardTelemetry::new(self.telemetry.as_ref())
            .submitted(payload.action_id.as_deref(), payload.data.len());
        Some(payload)
    }

    pub fn dispatch(&mut self, event: InputEvent) -> Option<SubmissionPayload> {
        match event {
            InputEvent::TextChanged { id, value } => {
                self.set_text(&id, value);
                None
            }
            InputEvent::Toggled { id } => {
                self.toggle(&id);
                None
            }
            InputEvent::Submit { action_index } => self.submit(action_index),
        }
    }

    fn load(&mut self, raw: &Value) {
        let telemetry = CardTelemetry::new(self.telemetry.as_ref());
        let mut diagnostics = Diagnostics::new();
        self.state = match load_card(raw, &self.options, &mut diagnostics) {
            Ok(card) => {
                info!(
                    target: "cardkit.instance",
                    version = %card.version,
                    elements = card.walk().count(),
                    actions = card.actions.len(),
                    "card mounted"
                );
                telemetry.mounted(&card.version, card.walk().count(), card.actions.len());
                CardState::Ready(card)
            }
            Err(err) => {
                warn!(target: "cardkit.instance", error = %err, "card failed to load");
                telemetry.load_failed(&err);
                CardState::Failed(format!("Failed to load card: {err}"))
            }
        };
        self.load_diagnostics = diagnostics;
    }

    fn publish(&mut self) {
        let rendered = self.render();
        if let Some(callback) = self.on_render.as_mut() {
            callback(&rendered.tree);
        }
    }
}

/// Forwards everything to the wrapped sink and keeps the errors for a [`LoadError`].
struct ErrorTracker<'a> {
    inner: &'a mut dyn DiagnosticSink,
    errors: Vec<Diagnostic>,
}

impl<'a> ErrorTracker<'a> {
    fn new(inner: &'a mut dyn DiagnosticSink) -> Self {
        Self {
            inner,
            errors: Vec::new(),
        }
    }

    fn into_errors(self) -> Vec<Diagnostic> {
        self.errors
    }
}

impl DiagnosticSink for ErrorTracker<'_> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.is_error() {
            self.errors.push(diagnostic.clone());
        }
        self.inner.emit(diagnostic);
    }
}
