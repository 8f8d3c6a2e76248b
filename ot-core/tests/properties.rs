//! Property-based fuzzing of the five quantified invariants in the
//! algebra's contract: canonicity, the inverse law, the composition
//! law, TP1 convergence, and the compose/transform interplay law.
//!
//! Random operations are generated *against* a concrete document so
//! that `apply` actually succeeds on them (an operation whose Deletes
//! don't match the document isn't a meaningful edit to transform or
//! compose). Component kind is chosen with the reference's
//! insert:delete:skip weights of 0.4:0.4:0.2.

use ot_core::{apply, check, compose, inverse_apply, normalize, transform};
use quickcheck::{Arbitrary, Gen, QuickCheck};
use serde_json::Value;

const DOC_LEN: usize = 100;
const NUM_COMPONENTS: usize = 20;
const ALPHABET: &[char] = &[
  'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w',
  'x', 'y', 'z', ' ',
];

fn random_doc(g: &mut Gen, len: usize) -> String {
  (0..len).map(|_| *g.choose(ALPHABET).unwrap()).collect()
}

fn random_text(g: &mut Gen, max_len: usize) -> String {
  let len = 1 + (u32::arbitrary(g) as usize % max_len);
  (0..len).map(|_| *g.choose(ALPHABET).unwrap()).collect()
}

/// Build a random canonical operation that `apply` will accept against
/// `doc`: weights 0.4 insert / 0.4 delete / 0.2 skip, stopping at
/// [`NUM_COMPONENTS`] atoms or when the document is exhausted.
fn random_op_against(doc: &str, g: &mut Gen) -> Vec<Value> {
  let chars: Vec<char> = doc.chars().collect();
  let mut pos = 0usize;
  let mut atoms: Vec<Value> = Vec::new();

  for _ in 0..NUM_COMPONENTS {
    if pos >= chars.len() {
      break;
    }
    let remaining = chars.len() - pos;
    let roll = u32::arbitrary(g) % 10;
    if roll < 4 {
      atoms.push(Value::from(random_text(g, 5)));
    } else if roll < 8 {
      let len = 1 + (u32::arbitrary(g) as usize % remaining.min(5));
      let text: String = chars[pos..pos + len].iter().collect();
      atoms.push(serde_json::json!({ "d": text }));
      pos += len;
    } else {
      let len = 1 + (u32::arbitrary(g) as usize % remaining);
      atoms.push(Value::from(len as u64));
      pos += len;
    }
  }

  normalize(&atoms).expect("generated atoms are always well-formed")
}

#[derive(Clone, Debug)]
struct DocWithOp {
  doc: String,
  op:  Vec<Value>,
}

impl Arbitrary for DocWithOp {
  fn arbitrary(g: &mut Gen) -> Self {
    let doc = random_doc(g, DOC_LEN);
    let op = random_op_against(&doc, g);
    DocWithOp { doc, op }
  }
}

#[derive(Clone, Debug)]
struct ComposeChain {
  doc: String,
  op1: Vec<Value>,
  op2: Vec<Value>,
}

impl Arbitrary for ComposeChain {
  fn arbitrary(g: &mut Gen) -> Self {
    let doc = random_doc(g, DOC_LEN);
    let op1 = random_op_against(&doc, g);
    let mid = apply(&doc, &op1).expect("op1 generated against doc must apply");
    let op2 = random_op_against(&mid, g);
    ComposeChain { doc, op1, op2 }
  }
}

#[derive(Clone, Debug)]
struct ConcurrentPair {
  doc:  String,
  op_a: Vec<Value>,
  op_b: Vec<Value>,
}

impl Arbitrary for ConcurrentPair {
  fn arbitrary(g: &mut Gen) -> Self {
    let doc = random_doc(g, DOC_LEN);
    let op_a = random_op_against(&doc, g);
    let op_b = random_op_against(&doc, g);
    ConcurrentPair { doc, op_a, op_b }
  }
}

#[test]
fn law_canonicity() {
  fn prop(input: DocWithOp) -> bool {
    check(&input.op) && normalize(&normalize(&input.op).unwrap()).unwrap() == normalize(&input.op).unwrap()
  }
  QuickCheck::new().tests(1_000).quickcheck(prop as fn(DocWithOp) -> bool);
}

#[test]
fn law_inverse() {
  fn prop(input: DocWithOp) -> bool {
    let after = apply(&input.doc, &input.op).unwrap();
    inverse_apply(&after, &input.op).unwrap() == input.doc
  }
  QuickCheck::new().tests(1_000).quickcheck(prop as fn(DocWithOp) -> bool);
}

#[test]
fn law_composition() {
  fn prop(input: ComposeChain) -> bool {
    let stepwise = apply(&apply(&input.doc, &input.op1).unwrap(), &input.op2).unwrap();
    let composed = compose(&input.op1, &input.op2).unwrap();
    apply(&input.doc, &composed).unwrap() == stepwise
  }
  QuickCheck::new().tests(1_000).quickcheck(prop as fn(ComposeChain) -> bool);
}

#[test]
fn law_tp1_convergence() {
  fn prop(input: ConcurrentPair) -> bool {
    let a_then_b = apply(
      &apply(&input.doc, &input.op_a).unwrap(),
      &transform(&input.op_b, &input.op_a, "left").unwrap(),
    )
    .unwrap();
    let b_then_a = apply(
      &apply(&input.doc, &input.op_b).unwrap(),
      &transform(&input.op_a, &input.op_b, "right").unwrap(),
    )
    .unwrap();
    a_then_b == b_then_a
  }
  QuickCheck::new().tests(1_000).quickcheck(prop as fn(ConcurrentPair) -> bool);
}

#[derive(Clone, Debug)]
struct InterplayScenario {
  doc:  String,
  op1:  Vec<Value>,
  op1a: Vec<Value>,
  op_b: Vec<Value>,
}

impl Arbitrary for InterplayScenario {
  fn arbitrary(g: &mut Gen) -> Self {
    let doc = random_doc(g, DOC_LEN);
    let op1 = random_op_against(&doc, g);
    let mid = apply(&doc, &op1).expect("op1 generated against doc must apply");
    let op1a = random_op_against(&mid, g);
    let op_b = random_op_against(&doc, g);
    InterplayScenario { doc, op1, op1a, op_b }
  }
}

#[test]
fn law_compose_transform_interplay() {
  // Same TP1 equivalence, but op_a is replaced by compose(op1, op1a):
  // a locally-coalesced history must transform exactly like the
  // single operation it's equivalent to.
  fn prop(s: InterplayScenario) -> bool {
    let composed_a = compose(&s.op1, &s.op1a).unwrap();

    let a_then_b = apply(
      &apply(&s.doc, &composed_a).unwrap(),
      &transform(&s.op_b, &composed_a, "left").unwrap(),
    )
    .unwrap();
    let b_then_a = apply(
      &apply(&s.doc, &s.op_b).unwrap(),
      &transform(&composed_a, &s.op_b, "right").unwrap(),
    )
    .unwrap();
    a_then_b == b_then_a
  }
  QuickCheck::new().tests(1_000).quickcheck(prop as fn(InterplayScenario) -> bool);
}
