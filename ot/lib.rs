//! The public, CLI-free packaging layer over [`ot_core`].
//!
//! This crate is the thing other code actually depends on: it
//! re-exports the six algebra entry points with a uniform contract and
//! owns the one environment knob (`NO_EXTENSIONS`) and the selection
//! point for a drop-in accelerated implementation. No accelerated
//! implementation ships in this workspace — [`Backend::Pure`] is the
//! only variant — but the seam exists so one could be swapped in
//! without touching call sites.

use once_cell::sync::Lazy;
use serde_json::Value;

pub use ot_core::{
  decode_operation,
  Component,
  OtError,
  OtTypeError,
  OtValueError,
};

/// Which implementation of the algebra is backing the functions in this
/// crate. Selected once, at first use, and logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
  /// The pure-Rust implementation in `ot-core`. Currently the only one.
  Pure,
}

fn no_extensions() -> bool {
  match std::env::var("NO_EXTENSIONS") {
    Ok(value) => matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"),
    Err(_) => false,
  }
}

static BACKEND: Lazy<Backend> = Lazy::new(|| {
  let no_extensions = no_extensions();
  // No accelerated backend is compiled into this workspace, so the
  // opt-out switch doesn't currently change anything observable.
  let backend = Backend::Pure;
  tracing::info!(?backend, no_extensions, "ot: backend selected");
  backend
});

fn selected_backend() -> Backend {
  *BACKEND
}

/// Is `op` already in canonical form?
pub fn check(op: &[Value]) -> bool {
  selected_backend();
  ot_core::check(op)
}

/// Fold `op` down to its canonical form.
pub fn normalize(op: &[Value]) -> Result<Vec<Value>, OtError> {
  selected_backend();
  ot_core::normalize(op)
}

/// Apply `op` to `doc`.
pub fn apply(doc: &str, op: &[Value]) -> Result<String, OtError> {
  selected_backend();
  ot_core::apply(doc, op)
}

/// Undo `op` against the document it produced.
pub fn inverse_apply(doc: &str, op: &[Value]) -> Result<String, OtError> {
  selected_backend();
  ot_core::inverse_apply(doc, op)
}

/// Rebase `op_a` so it applies cleanly after `op_b`. `side` must be
/// exactly `"left"` or `"right"`.
pub fn transform(op_a: &[Value], op_b: &[Value], side: &str) -> Result<Vec<Value>, OtError> {
  selected_backend();
  ot_core::transform(op_a, op_b, side)
}

/// Compose `op1` followed by `op2` into a single operation.
pub fn compose(op1: &[Value], op2: &[Value]) -> Result<Vec<Value>, OtError> {
  selected_backend();
  ot_core::compose(op1, op2)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn facade_delegates_to_core() {
    let op = serde_json::json!([1, "x"]);
    assert!(check(op.as_array().unwrap()));
  }

  #[test]
  fn no_extensions_truthy_values() {
    // SAFETY: this process sets no other env vars concurrently from
    // test threads; std::env::set_var/remove_var require `unsafe`
    // since they're not safe to call from multiple threads at once.
    unsafe {
      for v in ["1", "true", "TRUE", "yes", "Yes"] {
        std::env::set_var("NO_EXTENSIONS", v);
        assert!(no_extensions(), "{v:?} should be truthy");
      }
      for v in ["0", "false", "no", ""] {
        std::env::set_var("NO_EXTENSIONS", v);
        assert!(!no_extensions(), "{v:?} should not be truthy");
      }
      std::env::remove_var("NO_EXTENSIONS");
      assert!(!no_extensions());
    }
  }
}
