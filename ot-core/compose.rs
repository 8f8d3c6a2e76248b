//! Fusing two sequential operations into one.
//!
//! `compose(op1, op2)` produces the single operation that has the same
//! effect as applying `op1` and then `op2` in sequence — useful for
//! collapsing a client's local edit history before sending it over the
//! wire, or for coalescing `op1` concurrent edits acting on the same
//! connection.

use serde_json::Value;

use crate::{
  canonical::check,
  component::{self, Component},
  cursor::{Appender, Indivisible, Taker},
  error::{OtError, OtValueError},
};

/// Compose `op1` followed by `op2` into a single operation.
///
/// Both operands must already be canonical ([`crate::check`]).
pub fn compose(op1: &[Value], op2: &[Value]) -> Result<Vec<Value>, OtError> {
  tracing::trace!(op1_len = op1.len(), op2_len = op2.len(), "compose");
  if !check(op1) || !check(op2) {
    tracing::warn!("compose: operand is not canonical");
    return Err(OtValueError::InvalidOperation.into());
  }

  let components1: Vec<Component> = op1.iter().map(Component::resolve).collect::<Result<_, _>>()?;
  let atoms2: Vec<Component> = op2.iter().map(Component::resolve).collect::<Result<_, _>>()?;

  let mut result = Appender::new();
  let mut taker = Taker::new(&components1);

  for atom2 in atoms2 {
    match atom2 {
      Component::Skip(mut n) => {
        while n > 0 {
          let chunk = taker.take(Some(n), Some(Indivisible::Delete));
          n -= match &chunk {
            Some(Component::Skip(k)) => *k,
            Some(Component::Insert(s)) => s.chars().count(),
            _ => 0,
          };
          result.push(chunk);
        }
      }
      Component::Insert(s) => {
        result.push(Some(Component::Insert(s)));
      }
      Component::Delete(s) => {
        let target: Vec<char> = s.chars().collect();
        let mut n = target.len();
        let mut offset = 0usize;
        while n > 0 {
          let chunk = taker.take(Some(n), Some(Indivisible::Delete));
          match chunk {
            Some(Component::Skip(k)) => {
              let deleted: String = target[offset..offset + k].iter().collect();
              result.push(Some(Component::Delete(deleted)));
              offset += k;
              n -= k;
            }
            Some(Component::Insert(payload)) => {
              let k = payload.chars().count();
              let expected: String = target[offset..offset + k].iter().collect();
              if payload != expected {
                let err = OtValueError::InconsistentComposeDelete { expected, actual: payload };
                tracing::warn!(%err, "compose: inconsistent delete in the second operand");
                return Err(err.into());
              }
              offset += k;
              n -= k;
            }
            Some(Component::Delete(d)) => {
              result.push(Some(Component::Delete(d)));
            }
            None => unreachable!("take(Some(n), _) never returns None"),
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
