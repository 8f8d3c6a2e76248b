//! Canonical-form validation and normalization.
//!
//! A canonical operation is a sequence of components where: every
//! component is a valid atom (spec §4.1 `resolve` succeeds on it), no two
//! adjacent components are the same kind, and the last component (if
//! any) is not a `Skip`. [`check`] verifies all three; [`normalize`]
//! takes any sequence of valid atoms and folds it down to the canonical
//! form that represents the same edit.

use serde_json::Value;

use crate::{
  component::{self, Component},
  cursor::Appender,
  error::OtError,
};

/// Is `op` already in canonical form?
///
/// Returns `false` (never an error) for anything malformed — this is a
/// predicate, not a validator; callers that need to know *why* an
/// operation was rejected should resolve it themselves and read the
/// error.
pub fn check(op: &[Value]) -> bool {
  let mut resolved = Vec::with_capacity(op.len());
  for raw in op {
    match Component::resolve(raw) {
      Ok(c) => resolved.push(c),
      Err(_) => return false,
    }
  }
  for pair in resolved.windows(2) {
    if std::mem::discriminant(&pair[0]) == std::mem::discriminant(&pair[1]) {
      return false;
    }
  }
  if matches!(resolved.last(), Some(Component::Skip(_))) {
    return false;
  }
  true
}

fn validate_atoms(op: &[Value]) -> Result<Vec<Component>, OtError> {
  op.iter().map(Component::resolve).collect()
}

/// Fold `op` (any sequence of valid atoms, not necessarily canonical)
/// down to its canonical form.
pub fn normalize(op: &[Value]) -> Result<Vec<Value>, OtError> {
  tracing::trace!(op_len = op.len(), "normalize");
  let atoms = validate_atoms(op)?;
  let mut out = Appender::new();
  for atom in atoms {
    out.push(Some(atom));
  }
  Ok(component::to_raw_all(&out.finish()))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn accepts_canonical() {
    let op = serde_json::json!([2, "a", {"d": "bc"}]);
    assert!(check(op.as_array().unwrap()));
  }

  #[test]
  fn rejects_trailing_skip() {
    let op = serde_json::json!(["a", 2]);
    assert!(!check(op.as_array().unwrap()));
  }

  #[test]
  fn rejects_adjacent_same_kind() {
    let op = serde_json::json!(["a", "b"]);
    assert!(!check(op.as_array().unwrap()));
  }

  #[test]
  fn rejects_malformed_atom() {
    let op = serde_json::json!([0]);
    assert!(!check(op.as_array().unwrap()));
  }

  #[test]
  fn normalize_merges_and_trims() {
    let op = serde_json::json!([1, 1, "a", "b", 3]);
    let normalized = normalize(op.as_array().unwrap()).unwrap();
    assert_eq!(normalized, serde_json::json!([2, "ab"]));
  }
}
