//! Adaptive Card rendering core.
//!
//! Parses a restricted subset of the Adaptive Cards schema (v1.0 to 1.3) into a validated,
//! normalized tree, renders it to a host-agnostic visual tree backed by a per-instance input
//! store, and builds submission payloads for `Action.Submit`.
#[cfg(feature = "adaptive-cards")]
pub mod adaptive;

#[cfg(feature = "adaptive-cards")]
pub use adaptive::*;

/// Returns the semantic version advertised by this crate.
///
/// ```
/// assert_eq!(cardkit_core::version(), env!("CARGO_PKG_VERSION"));
/// ```
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
