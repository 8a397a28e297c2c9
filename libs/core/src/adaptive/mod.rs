//! Adaptive Card pipeline: validate, normalize, render, submit.
//!
//! Raw card JSON goes through the [`validator`] (pass/fail with diagnostics), the
//! [`normalizer`] (canonical [`CardDocument`] tree), and the [`renderer`] (a [`VisualNode`]
//! tree that reads live values from an [`InputStore`]). Firing an `Action.Submit` merges the
//! store with the action's static data into a [`SubmissionPayload`]. [`CardInstance`] ties
//! the pieces together for one mounted card.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod instance;
pub mod model;
pub mod normalizer;
pub mod renderer;
pub mod schema;
pub mod store;
pub mod submission;
pub mod telemetry;
pub mod validator;

pub use config::{CardOptions, ValidationMode};
pub use diagnostics::{Diagnostic, DiagnosticSink, Diagnostics, NullSink, Severity, TracingSink};
pub use error::{ConfigError, LoadError, ParseError};
pub use instance::{CardInstance, CardInstanceBuilder, InputEvent, Rendered, load_card};
pub use model::{
    Action, CardDocument, CardSummary, Column, ColumnSet, ColumnWidth, Container, InputText,
    InputToggle, Node, NodeKind, SubmitAction, TextBlock, UnknownAction, UnknownElement,
};
pub use normalizer::{Normalizer, parse_action, parse_card, parse_card_str, parse_element};
pub use renderer::{VisualNode, render_actions, render_card, render_element, render_failure};
pub use store::InputStore;
pub use submission::{
    SUBMIT_ACTION_KIND, SubmissionPayload, SubmitHandler, build_submission, dispatch_submission,
};
pub use telemetry::{CardTelemetry, NullTelemetry, TelemetryEvent, TelemetryHook};
pub use validator::{validate_action, validate_card, validate_element, validate_tree};
