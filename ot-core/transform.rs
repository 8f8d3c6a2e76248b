//! Transforming one operation against a concurrent sibling.
//!
//! Given two operations `op1` and `op2` that both start from the same
//! document, `transform(op1, op2, side)` produces the operation that
//! applies `op1`'s intent on top of a document that has already had
//! `op2` applied. `side` breaks the tie when both operations insert at
//! the same position: `"left"` means `op1`'s insert goes first, `"right"`
//! means `op2`'s does. Exactly one of the two calls `transform(op1, op2,
//! "left")` / `transform(op2, op1, "right")` must agree for a pair of
//! concurrent clients to converge (TP1).

use serde_json::Value;

use crate::{
  canonical::check,
  component::{self, Component},
  cursor::{Action, Appender, Indivisible, Taker},
  error::{OtError, OtValueError},
};

/// Which operand wins a same-position insert tie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
  Left,
  Right,
}

impl TryFrom<&str> for Side {
  type Error = OtValueError;

  fn try_from(value: &str) -> Result<Self, Self::Error> {
    match value {
      "left" => Ok(Side::Left),
      "right" => Ok(Side::Right),
      _ => Err(OtValueError::InvalidSide),
    }
  }
}

/// Rebase `op1` so it applies cleanly after `op2`.
///
/// Both operands must already be canonical ([`crate::check`]); `side`
/// must be exactly `"left"` or `"right"`.
pub fn transform(op1: &[Value], op2: &[Value], side: &str) -> Result<Vec<Value>, OtError> {
  tracing::trace!(op1_len = op1.len(), op2_len = op2.len(), side, "transform");
  if !check(op1) || !check(op2) {
    tracing::warn!("transform: operand is not canonical");
    return Err(OtValueError::InvalidOperation.into());
  }
  let side = Side::try_from(side)?;

  let components1: Vec<Component> = op1.iter().map(Component::resolve).collect::<Result<_, _>>()?;
  let atoms2: Vec<Component> = op2.iter().map(Component::resolve).collect::<Result<_, _>>()?;

  let mut result = Appender::new();
  let mut taker = Taker::new(&components1);

  for atom2 in atoms2 {
    match atom2 {
      Component::Skip(mut n) => {
        while n > 0 {
          let chunk = taker.take(Some(n), Some(Indivisible::Insert));
          n -= chunk_advance(&chunk);
          result.push(chunk);
        }
      }
      Component::Insert(s) => {
        if side == Side::Left && taker.peek_action() == Action::Insert {
          let chunk = taker.take(None, None);
          result.push(chunk);
        }
        result.push(Some(Component::Skip(s.chars().count())));
      }
      Component::Delete(s) => {
        let mut n = s.chars().count();
        while n > 0 {
          let chunk = taker.take(Some(n), Some(Indivisible::Insert));
          n -= chunk_advance(&chunk);
          if matches!(chunk, Some(Component::Insert(_))) {
            result.push(chunk);
          }
        }
      }
    }
  }

  while let Some(chunk) = taker.take(None, None) {
    result.push(Some(chunk));
  }

  Ok(component::to_raw_all(&result.finish()))
}

/// How much of the "units still owed" counter a taken chunk accounts
/// for: `Skip`/`Delete` chunks represent real document positions and
/// count down the budget; `Insert` chunks are extra content op1 added
/// at this spot and don't.
fn chunk_advance(chunk: &Option<Component>) -> usize {
  match chunk {
    Some(Component::Skip(n)) => *n,
    Some(Component::Delete(s)) => s.chars().count(),
    _ => 0,
  }
}
