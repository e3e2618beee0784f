//! Per-instance single-use guards for initializers.
//!
//! When a value is assembled from parts that each initialize a common ancestor
//! part, the ancestor's initializer is reached once per path. For a diamond
//! (`D` built from `B` and `C`, both of which build `A`) that means `A` is
//! initialized twice. This crate makes such initializers idempotent per
//! instance:
//!
//! - [`SingleUseInit<K, F>`]: wraps an initializer `F` under a slot `K`.
//! - [`InitLedger<K>`]: the per-instance record of called slots, kept as an
//!   ordinary field of the instance.
//! - [`QualifiedName`]: a validated `<Type>::init` slot, for guards keyed by
//!   name rather than by an enum.
//!
//! # Semantics
//!
//! - The first guarded call on an instance marks the slot, then runs the body.
//! - Every later call on the same instance returns immediately, without error.
//! - The mark is written *before* the body runs. Calls reached from inside the
//!   body see it, and a body that fails or panics still consumes its single
//!   use: a second call is a no-op, not a retry.
//! - Ledgers are per instance. Two instances never affect each other, and two
//!   slots on one instance are tracked independently.
//!
//! # Concurrency
//!
//! [`InitLedger`] has no locking; marking it needs `&mut` access to the
//! instance, so concurrent first calls on one instance are rejected by the
//! borrow checker instead of racing. Instances shared across threads use
//! [`SharedInitLedger`] and [`SingleUseInit::call_shared`], where exactly one
//! caller wins each slot.
//!
//! # Features
//!
//! - `tracing` (default): emits `tracing` events when guarded bodies run, when
//!   calls are skipped, and when a name is rejected.
//!
//! # Examples
//!
//! ```rust
//! use single_use_init::{HasInitLedger, InitLedger, SingleUseInit};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Init {
//!    A,
//!    B,
//!    C,
//! }
//!
//! #[derive(Default)]
//! struct D {
//!    ledger: InitLedger<Init>,
//!    log: Vec<&'static str>,
//! }
//!
//! impl HasInitLedger<Init> for D {
//!    fn init_ledger(&self) -> &InitLedger<Init> {
//!       &self.ledger
//!    }
//!    fn init_ledger_mut(&mut self) -> &mut InitLedger<Init> {
//!       &mut self.ledger
//!    }
//! }
//!
//! static A_INIT: SingleUseInit<Init, fn(&mut D, ())> =
//!    SingleUseInit::new(Init::A, |d, ()| d.log.push("A"));
//! static B_INIT: SingleUseInit<Init, fn(&mut D, ())> = SingleUseInit::new(Init::B, |d, ()| {
//!    d.log.push("B");
//!    A_INIT.call(d, ());
//! });
//! static C_INIT: SingleUseInit<Init, fn(&mut D, ())> = SingleUseInit::new(Init::C, |d, ()| {
//!    d.log.push("C");
//!    A_INIT.call(d, ());
//! });
//!
//! let mut d = D::default();
//! B_INIT.call(&mut d, ());
//! C_INIT.call(&mut d, ());
//! assert_eq!(d.log, ["B", "A", "C"]);
//! ```
//!
//! ## Validated names
//!
//! ```rust
//! use single_use_init::{NotAnInitializer, SingleUseInit};
//!
//! let ok = SingleUseInit::named("Widget::init", ());
//! assert!(ok.is_ok());
//!
//! let err: NotAnInitializer = SingleUseInit::named("Widget::render", ()).unwrap_err();
//! assert_eq!(err.qualified_name(), "Widget::render");
//! ```

/// Errors raised while building guards.
mod error;

/// Single-use guard implementation.
mod guard;

/// Per-instance call ledgers.
mod ledger;

/// Initializer identities.
mod slot;

pub use error::NotAnInitializer;
pub use guard::{InitOutput, SingleUseInit};
pub use ledger::{HasInitLedger, HasSharedInitLedger, InitLedger, SharedInitLedger, SlotState};
pub use slot::{InitSlot, QualifiedName, INITIALIZER_METHOD};
