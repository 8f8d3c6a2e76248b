//! The `Skip`/`Insert`/`Delete` component model and its wire encoding.
//!
//! On the wire (spec §3/§6) one component is one of:
//!
//! - a bare positive integer — `Skip(n)`
//! - a bare non-empty string — `Insert(s)`
//! - an object with exactly the key `d` bound to a non-empty string — `Delete(s)`
//!
//! [`Component::resolve`] is the `resolve` operation from spec §4.1;
//! [`Component::to_raw`] is its inverse, used whenever an algorithm's
//! result needs to go back out over the wire. Every shape mismatch at
//! this level is a [`crate::error::OtValueError`], not a type error: the
//! reference (`examples/original_source/ottype/core.py`) raises a plain
//! `ValueError` for any atom that isn't an `int`/`str`/`dict` of the right
//! shape, reserving `TypeError` for the one level up — "is this op even a
//! sequence at all" — which is [`decode_operation`]'s job.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{OtError, OtTypeError, OtValueError};

/// One atom of an operation.
///
/// All lengths here are counted in `char`s (Unicode scalar values), not
/// bytes — see the crate-level docs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
  /// Move the cursor forward by `n` chars without changing the document.
  Skip(usize),
  /// Insert the given (non-empty) text at the cursor.
  Insert(String),
  /// Delete the given (non-empty) text, which must match the document
  /// at the cursor exactly.
  Delete(String),
}

impl Component {
  /// Decode one wire atom (spec §4.1 `resolve`).
  pub fn resolve(raw: &Value) -> Result<Component, OtError> {
    match raw {
      Value::Number(n) => match n.as_i64() {
        Some(n) if n > 0 => Ok(Component::Skip(n as usize)),
        _ => Err(OtValueError::InvalidOperation.into()),
      },
      Value::String(s) if !s.is_empty() => Ok(Component::Insert(s.clone())),
      Value::Object(map) if map.len() == 1 => match map.get("d") {
        Some(Value::String(s)) if !s.is_empty() => Ok(Component::Delete(s.clone())),
        _ => Err(OtValueError::InvalidOperation.into()),
      },
      _ => Err(OtValueError::InvalidOperation.into()),
    }
  }

  /// Encode back to the wire form (inverse of [`Component::resolve`]).
  pub fn to_raw(&self) -> Value {
    match self {
      Component::Skip(n) => Value::from(*n as u64),
      Component::Insert(s) => Value::from(s.clone()),
      Component::Delete(s) => {
        let mut map = serde_json::Map::with_capacity(1);
        map.insert("d".to_string(), Value::from(s.clone()));
        Value::Object(map)
      }
    }
  }

  /// Number of chars this component spans in its *own* payload.
  pub(crate) fn payload_len(&self) -> usize {
    match self {
      Component::Skip(n) => *n,
      Component::Insert(s) | Component::Delete(s) => s.chars().count(),
    }
  }

  pub(crate) fn is_skip(&self) -> bool {
    matches!(self, Component::Skip(_))
  }

  pub(crate) fn is_insert(&self) -> bool {
    matches!(self, Component::Insert(_))
  }

  pub(crate) fn is_delete(&self) -> bool {
    matches!(self, Component::Delete(_))
  }
}

/// Decode a whole wire operation from an untyped JSON value.
///
/// This is the one genuine type-error boundary in the crate (spec §7's
/// "non-sequence op"): everywhere else, an operation has already been
/// handed over as `&[serde_json::Value]`, so Rust's type system rules out
/// "not a sequence" before any of this crate's code runs. A caller that
/// just deserialized an operation off the wire (where it's still a bare
/// `Value` that *might* be an object, a number, `null`, ...) should go
/// through here first.
pub fn decode_operation(raw: &Value) -> Result<Vec<Value>, OtTypeError> {
  raw.as_array().cloned().ok_or_else(|| OtTypeError::NotAnArray { kind: json_kind(raw) })
}

impl Serialize for Component {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    self.to_raw().serialize(serializer)
  }
}

impl<'de> Deserialize<'de> for Component {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: serde::Deserializer<'de>,
  {
    let raw = Value::deserialize(deserializer)?;
    Component::resolve(&raw).map_err(serde::de::Error::custom)
  }
}

fn json_kind(v: &Value) -> &'static str {
  match v {
    Value::Null => "null",
    Value::Bool(_) => "boolean",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}

pub(crate) fn to_raw_all(components: &[Component]) -> Vec<Value> {
  components.iter().map(Component::to_raw).collect()
}
