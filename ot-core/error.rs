//! The two error kinds the algebra can fail with.
//!
//! A [`OtTypeError`] means the caller handed over an argument of the wrong
//! shape — the one place this is actually reachable in a statically typed
//! API is the untyped wire boundary in [`crate::component::decode_operation`],
//! which takes a raw `serde_json::Value` before anything downstream can
//! assume it's an array. A [`OtValueError`] means the shape was right but
//! the value was semantically invalid: a malformed atom, a non-canonical
//! operation, a skip past the end of the document, text that doesn't match
//! what the document actually holds, or a `side` string that isn't `"left"`
//! or `"right"`.

use thiserror::Error;

/// The caller passed an argument of the wrong shape.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum OtTypeError {
  #[error("operation must be a JSON array, got {kind}")]
  NotAnArray { kind: &'static str },
}

/// The arguments were the right shape but semantically invalid.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum OtValueError {
  #[error("invalid OTs")]
  InvalidOperation,

  #[error("skip exceeds doc length: at position {pos}, skip of {skip} but only {remaining} chars remain")]
  SkipExceedsDocLength {
    pos:       usize,
    skip:      usize,
    remaining: usize,
  },

  #[error("inconsistent delete: expected {expected:?} at position {pos}, found {actual:?}")]
  InconsistentDelete {
    pos:      usize,
    expected: String,
    actual:   String,
  },

  #[error("inconsistent insert: expected {expected:?} at position {pos}, found {actual:?}")]
  InconsistentInsert {
    pos:      usize,
    expected: String,
    actual:   String,
  },

  #[error("inconsistent delete in the second OTs: expected {expected:?}, found {actual:?}")]
  InconsistentComposeDelete { expected: String, actual: String },

  #[error("invalid side")]
  InvalidSide,
}

/// Top-level error returned by every fallible entry point in this crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OtError {
  #[error(transparent)]
  Type(#[from] OtTypeError),

  #[error(transparent)]
  Value(#[from] OtValueError),
}
