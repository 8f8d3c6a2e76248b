//! The algebra of text operational-transformation operations.
//!
//! This crate is a pure, stateless library: every public function is a
//! value-in/value-out computation over a UTF-8 `&str` document and a
//! canonical sequence of [`Component`]s. There is no I/O, no shared mutable
//! state, and no long-lived cache.
//!
//! # Module overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`component`] | The `Skip`/`Insert`/`Delete` component model, its wire (de)serialization, and [`component::decode_operation`], the one untyped "is this even an array" boundary |
//! | [`error`] | The two error kinds ([`OtTypeError`], [`OtValueError`]) surfaced to callers |
//! | [`canonical`] | `check`/`normalize` and the canonical-form invariant |
//! | [`cursor`] | The scoped `Appender`/`Taker` helpers that back `transform` and `compose` |
//! | [`apply`] | `apply`/`inverse_apply` |
//! | [`transform`] | `transform`, with the `"left"`/`"right"` tie-break that yields TP1 convergence |
//! | [`compose`] | `compose` |
//!
//! # Design principles
//!
//! - **Pure functions**: every entry point returns a freshly allocated
//!   result; none of them mutate a caller-owned value in place.
//! - **Explicit errors**: `Result<_, OtError>` instead of panics for
//!   malformed input; a canonical-form violation in a *drain* step (every
//!   component of the shorter operand accounted for) is the one place we
//!   treat failure as an internal invariant instead, via `debug_assert!`.
//! - **One indexing unit everywhere**: positions and lengths are counted in
//!   `char`s end to end, in the wire format and in the algorithms alike.

pub mod canonical;
pub mod component;
pub mod cursor;
pub mod error;

mod apply;
mod compose;
mod text;
mod transform;

pub use apply::{apply, inverse_apply};
pub use canonical::{check, normalize};
pub use component::{decode_operation, Component};
pub use compose::compose;
pub use error::{OtError, OtTypeError, OtValueError};
pub use transform::transform;
