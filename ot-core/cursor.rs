//! Scoped helpers that back [`crate::transform`] and [`crate::compose`].
//!
//! Both algorithms walk two operations side by side: one component at a
//! time off the second operand, and a variable-size, possibly
//! sub-component chunk off the first. [`Taker`] is the cursor that makes
//! the latter possible; [`Appender`] is the output side, merging adjacent
//! same-kind components back down to canonical form as it goes so callers
//! never have to run a second normalization pass.

use crate::component::Component;

/// Builds a canonical component sequence incrementally.
///
/// Pushing `None` is a no-op (mirrors the reference, which lets its
/// inner loops push `None` unconditionally instead of guarding every
/// call site). Pushing `Some` merges with the last pushed component when
/// they're the same kind, otherwise appends.
#[derive(Debug, Default)]
pub(crate) struct Appender {
  out: Vec<Component>,
}

impl Appender {
  pub(crate) fn new() -> Self {
    Self { out: Vec::new() }
  }

  pub(crate) fn push(&mut self, component: Option<Component>) {
    let Some(component) = component else { return };
    if component.payload_len() == 0 {
      return;
    }
    match (self.out.last_mut(), &component) {
      (Some(Component::Skip(last)), Component::Skip(n)) => *last += n,
      (Some(Component::Insert(last)), Component::Insert(s)) => last.push_str(s),
      (Some(Component::Delete(last)), Component::Delete(s)) => last.push_str(s),
      _ => self.out.push(component),
    }
  }

  /// Drop a trailing `Skip`, then hand back the accumulated sequence.
  pub(crate) fn finish(mut self) -> Vec<Component> {
    if matches!(self.out.last(), Some(Component::Skip(_))) {
      self.out.pop();
    }
    self.out
  }
}

/// Which component kind a [`Taker::take`] caller is about to emit, used
/// to decide whether a chunk may be taken whole even though it's bigger
/// than what was asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Indivisible {
  Insert,
  Delete,
}

/// What [`Taker::peek_action`] reports about the component under the
/// cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
  Skip,
  Insert,
  Delete,
  /// The cursor has run off the end of the operation.
  Nop,
}

/// A cursor that consumes an operation in arbitrary-size chunks.
///
/// `take(n, indivisible)` takes up to `n` chars starting at the cursor.
/// `n = None` means "take however much of the current component remains"
/// (the reference's `take(-1, ...)`). Taking past the end of the
/// operation synthesizes an implicit trailing `Skip` — every valid
/// (canonical) operation is implicitly followed by infinite untouched
/// document.
pub(crate) struct Taker<'a> {
  components: &'a [Component],
  index:      usize,
  offset:     usize,
}

impl<'a> Taker<'a> {
  pub(crate) fn new(components: &'a [Component]) -> Self {
    Self { components, index: 0, offset: 0 }
  }

  fn current(&self) -> Option<&'a Component> {
    self.components.get(self.index)
  }

  pub(crate) fn peek_action(&self) -> Action {
    match self.current() {
      None => Action::Nop,
      Some(Component::Skip(_)) => Action::Skip,
      Some(Component::Insert(_)) => Action::Insert,
      Some(Component::Delete(_)) => Action::Delete,
    }
  }

  /// Take up to `n` chars (or the rest of the current component, if
  /// `n` is `None`) starting at the cursor.
  pub(crate) fn take(&mut self, n: Option<usize>, indivisible: Option<Indivisible>) -> Option<Component> {
    let Some(current) = self.current() else {
      return match n {
        None => None,
        Some(n) => Some(Component::Skip(n)),
      };
    };

    match current {
      Component::Skip(total) => {
        let remaining = total - self.offset;
        if n.is_none_or(|n| remaining <= n) {
          self.index += 1;
          self.offset = 0;
          Some(Component::Skip(remaining))
        } else {
          let n = n.unwrap();
          self.offset += n;
          Some(Component::Skip(n))
        }
      }
      Component::Insert(s) => self.take_text(s, n, indivisible == Some(Indivisible::Insert), Component::Insert),
      Component::Delete(s) => self.take_text(s, n, indivisible == Some(Indivisible::Delete), Component::Delete),
    }
  }

  fn take_text(
    &mut self,
    s: &str,
    n: Option<usize>,
    indivisible: bool,
    wrap: fn(String) -> Component,
  ) -> Option<Component> {
    let chars: Vec<char> = s.chars().skip(self.offset).collect();
    let take_whole = n.is_none() || indivisible || chars.len() <= n.unwrap();
    if take_whole {
      self.index += 1;
      self.offset = 0;
      Some(wrap(chars.into_iter().collect()))
    } else {
      let n = n.unwrap();
      let chunk: String = chars.into_iter().take(n).collect();
      self.offset += n;
      Some(wrap(chunk))
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn appender_merges_same_kind() {
    let mut a = Appender::new();
    a.push(Some(Component::Skip(2)));
    a.push(Some(Component::Skip(3)));
    a.push(Some(Component::Insert("a".into())));
    a.push(Some(Component::Insert("b".into())));
    assert_eq!(a.finish(), vec![Component::Skip(5), Component::Insert("ab".into())]);
  }

  #[test]
  fn appender_trims_trailing_skip() {
    let mut a = Appender::new();
    a.push(Some(Component::Insert("a".into())));
    a.push(Some(Component::Skip(5)));
    assert_eq!(a.finish(), vec![Component::Insert("a".into())]);
  }

  #[test]
  fn appender_ignores_none() {
    let mut a = Appender::new();
    a.push(None);
    assert!(a.finish().is_empty());
  }

  #[test]
  fn taker_splits_skip() {
    let ops = vec![Component::Skip(5)];
    let mut t = Taker::new(&ops);
    assert_eq!(t.take(Some(2), None), Some(Component::Skip(2)));
    assert_eq!(t.take(Some(10), None), Some(Component::Skip(3)));
    assert_eq!(t.peek_action(), Action::Nop);
  }

  #[test]
  fn taker_synthesizes_skip_past_end() {
    let ops: Vec<Component> = vec![];
    let mut t = Taker::new(&ops);
    assert_eq!(t.take(Some(4), None), Some(Component::Skip(4)));
    assert_eq!(t.take(None, None), None);
  }

  #[test]
  fn taker_respects_indivisible_hint() {
    let ops = vec![Component::Insert("hello".into())];
    let mut t = Taker::new(&ops);
    assert_eq!(t.take(Some(2), Some(Indivisible::Insert)), Some(Component::Insert("hello".into())));
  }
}
