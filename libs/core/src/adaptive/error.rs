use thiserror::Error;

use crate::adaptive::diagnostics::Diagnostic;

/// Input errors raised at the parse boundary. A card that fails here is never partially built.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("card document is missing")]
    MissingInput,
    #[error("card document is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("expected an object at {}", display_path(.path))]
    NotObject { path: String },
    #[error("element at {} is missing its 'type'", display_path(.path))]
    MissingType { path: String },
    #[error("action at {} is missing its 'type'", display_path(.path))]
    MissingActionType { path: String },
    #[error("card is missing its body array")]
    MissingBody,
    #[error("card body must be an array")]
    BodyNotArray,
    #[error("card actions must be an array when present")]
    ActionsNotArray,
}

/// Why a card instance could not be mounted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("card failed validation: {}", summarize(.0))]
    Validation(Vec<Diagnostic>),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown validation mode '{0}' (expected off, warn or error)")]
    InvalidValidationMode(String),
    #[error("unsupported default card version '{0}'")]
    UnsupportedVersion(String),
}

fn display_path(path: &str) -> &str {
    if path.is_empty() { "/" } else { path }
}

fn summarize(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .filter(|d| d.is_error())
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
