//! Running an operation forward or backward against a document.

use crate::{
  canonical::check,
  component::Component,
  error::{OtError, OtValueError},
  text::CharRope,
};

/// Apply `op` to `doc`, producing the document after the edit.
///
/// `op` must already be in canonical form ([`crate::check`]); this is
/// the same precondition the reference imposes on every operation it's
/// handed, rather than re-normalizing on every call.
pub fn apply(doc: &str, op: &[serde_json::Value]) -> Result<String, OtError> {
  tracing::trace!(op_len = op.len(), doc_len = doc.chars().count(), "apply");
  if !check(op) {
    tracing::warn!("apply: operation is not canonical");
    return Err(OtValueError::InvalidOperation.into());
  }
  let rope = CharRope::new(doc);
  let len = rope.len();
  let mut out = String::new();
  let mut pos = 0usize;

  for raw in op {
    let component = Component::resolve(raw)?;
    match component {
      Component::Skip(n) => {
        if n > len - pos {
          let err = OtValueError::SkipExceedsDocLength { pos, skip: n, remaining: len - pos };
          tracing::warn!(%err, "apply: skip exceeds doc length");
          return Err(err.into());
        }
        out.push_str(&rope.slice(pos, pos + n));
        pos += n;
      }
      Component::Insert(s) => out.push_str(&s),
      Component::Delete(s) => {
        let n = s.chars().count();
        let end = (pos + n).min(len);
        let actual = rope.slice(pos, end);
        if actual != s {
          let err = OtValueError::InconsistentDelete { pos, expected: s, actual };
          tracing::warn!(%err, "apply: inconsistent delete");
          return Err(err.into());
        }
        pos += n;
      }
    }
  }

  out.push_str(&rope.slice(pos, len));
  Ok(out)
}

/// Undo `op`: given the document *after* `op` was applied, recover the
/// document from *before*.
///
/// Walks `op` in reverse, rematerializing deleted text and consuming
/// inserted text, the mirror image of [`apply`].
pub fn inverse_apply(doc: &str, op: &[serde_json::Value]) -> Result<String, OtError> {
  tracing::trace!(op_len = op.len(), doc_len = doc.chars().count(), "inverse_apply");
  if !check(op) {
    tracing::warn!("inverse_apply: operation is not canonical");
    return Err(OtValueError::InvalidOperation.into());
  }
  let rope = CharRope::new(doc);
  let len = rope.len();

  let components: Vec<Component> = op.iter().map(Component::resolve).collect::<Result<_, _>>()?;

  let last_pos: usize = components
    .iter()
    .map(|c| match c {
      Component::Skip(n) => *n,
      Component::Insert(s) => s.chars().count(),
      Component::Delete(_) => 0,
    })
    .sum();
  if last_pos > len {
    let err = OtValueError::SkipExceedsDocLength { pos: 0, skip: last_pos, remaining: len };
    tracing::warn!(%err, "inverse_apply: skip exceeds doc length");
    return Err(err.into());
  }

  // The untouched tail beyond last_pos is carried to the very end of the
  // output verbatim; everything the reverse walk below produces gets
  // sandwiched between the eventual head (doc[..cursor]) and this tail.
  let tail = rope.slice(last_pos, len);
  let mut cursor = last_pos;
  let mut middle: Vec<String> = Vec::with_capacity(components.len());

  for component in components.iter().rev() {
    match component {
      Component::Skip(n) => {
        middle.push(rope.slice(cursor - n, cursor));
        cursor -= n;
      }
      Component::Insert(s) => {
        let n = s.chars().count();
        let actual = rope.slice(cursor - n, cursor);
        if actual != *s {
          let err = OtValueError::InconsistentInsert { pos: cursor - n, expected: s.clone(), actual };
          tracing::warn!(%err, "inverse_apply: inconsistent insert");
          return Err(err.into());
        }
        cursor -= n;
      }
      Component::Delete(s) => middle.push(s.clone()),
    }
  }
  middle.reverse();

  let mut out = rope.slice(0, cursor);
  for chunk in middle {
    out.push_str(&chunk);
  }
  out.push_str(&tail);
  Ok(out)
}
