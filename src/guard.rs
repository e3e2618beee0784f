//! Single-use guards for initializer routines.
//!
//! This module provides [`SingleUseInit<K, F>`], a wrapper that makes an
//! initializer idempotent per instance. When an instance is assembled from
//! several parts that each initialize a shared ancestor part, the ancestor's
//! guarded initializer runs for the first path that reaches it and is a
//! silent no-op for every later path.
//!
//! The slot is recorded *before* the wrapped body runs. A body that fails or
//! panics has still consumed its single use; a second call does nothing rather
//! than retry.

use core::fmt;

use crate::error::NotAnInitializer;
use crate::ledger::{HasInitLedger, HasSharedInitLedger};
use crate::slot::{InitSlot, QualifiedName};

/// Return types accepted from guarded initializers.
///
/// A short-circuited call must still produce a value of the initializer's
/// return type; [`InitOutput::skipped`] supplies it.
pub trait InitOutput {
   /// The value returned when the guarded body is not run.
   fn skipped() -> Self;
}

impl InitOutput for () {
   #[inline]
   fn skipped() -> Self {}
}

impl<E> InitOutput for Result<(), E> {
   #[inline]
   fn skipped() -> Self {
      Ok(())
   }
}

/// An initializer routine guarded so that it runs at most once per instance.
///
/// `K` identifies the routine in each instance's ledger; `F` is the routine
/// itself, called as `F(&mut T, A)`. Multiple arguments are passed as a tuple.
///
/// Built with a compile-time slot via [`SingleUseInit::new`], which is `const`
/// and fits in a `static`, or with a validated `<Type>::init` name via
/// [`SingleUseInit::named`].
#[derive(Clone)]
pub struct SingleUseInit<K, F> {
   slot: K,
   init: F,
}

impl<K, F> SingleUseInit<K, F> {
   /// Guards `init` under `slot`.
   #[inline]
   #[must_use]
   pub const fn new(slot: K, init: F) -> Self {
      Self { slot, init }
   }

   /// The slot this guard records in each ledger.
   #[inline]
   pub const fn slot(&self) -> &K {
      &self.slot
   }

   /// The wrapped routine, bypassing the guard.
   #[inline]
   pub const fn inner(&self) -> &F {
      &self.init
   }
}

impl<F> SingleUseInit<QualifiedName, F> {
   /// Guards `init` under the qualified initializer name `name`.
   ///
   /// Fails with [`NotAnInitializer`] unless `name` has the `<Type>::init`
   /// shape. The name is checked here, once; calls never re-validate it.
   pub fn named(name: &'static str, init: F) -> Result<Self, NotAnInitializer> {
      Ok(Self::new(QualifiedName::parse(name)?, init))
   }
}

impl<K: InitSlot, F> SingleUseInit<K, F> {
   /// Runs the guarded initializer on `obj` unless it already ran there.
   ///
   /// - If the slot is already `Called` on `obj`, returns [`InitOutput::skipped`]
   ///   without touching `obj`.
   /// - Otherwise marks the slot, then returns `init(obj, args)`.
   ///
   /// Because the mark precedes the body, guarded calls made from inside the
   /// body (directly or through other initializers) already see it.
   pub fn call<T, A, R>(&self, obj: &mut T, args: A) -> R
   where
      T: HasInitLedger<K> + ?Sized,
      F: Fn(&mut T, A) -> R,
      R: InitOutput,
   {
      if !self.enter(obj) {
         return R::skipped();
      }
      (self.init)(obj, args)
   }

   /// Runs the guarded initializer on a shared `obj` unless it already ran.
   ///
   /// Exactly one caller wins the slot even under contention. Losing callers
   /// return [`InitOutput::skipped`] immediately, possibly before the winner's
   /// body has finished.
   pub fn call_shared<T, A, R>(&self, obj: &T, args: A) -> R
   where
      T: HasSharedInitLedger<K> + ?Sized,
      F: Fn(&T, A) -> R,
      R: InitOutput,
   {
      if !self.enter_shared(obj) {
         return R::skipped();
      }
      (self.init)(obj, args)
   }

   /// Performs the guard's check-and-mark step without running the routine.
   ///
   /// Returns `true` if the slot was `NotCalled` on `obj`; it is `Called` on
   /// return either way. Use this for bodies that cannot be stored as `F`,
   /// such as `async` initializers:
   ///
   /// ```rust
   /// # use single_use_init::{HasInitLedger, InitLedger, SingleUseInit};
   /// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
   /// # enum Init { Conn }
   /// # struct Conn { ledger: InitLedger<Init>, ready: bool }
   /// # impl HasInitLedger<Init> for Conn {
   /// #    fn init_ledger(&self) -> &InitLedger<Init> { &self.ledger }
   /// #    fn init_ledger_mut(&mut self) -> &mut InitLedger<Init> { &mut self.ledger }
   /// # }
   /// static CONNECT: SingleUseInit<Init, ()> = SingleUseInit::new(Init::Conn, ());
   ///
   /// async fn connect(conn: &mut Conn) {
   ///    if CONNECT.enter(conn) {
   ///       conn.ready = true;
   ///    }
   /// }
   /// ```
   #[inline]
   pub fn enter<T>(&self, obj: &mut T) -> bool
   where
      T: HasInitLedger<K> + ?Sized,
   {
      let fresh = obj.init_ledger_mut().mark(self.slot.clone());
      self.trace_enter(fresh);
      fresh
   }

   /// Shared-ledger form of [`SingleUseInit::enter`].
   #[inline]
   pub fn enter_shared<T>(&self, obj: &T) -> bool
   where
      T: HasSharedInitLedger<K> + ?Sized,
   {
      let fresh = obj.shared_init_ledger().mark(self.slot.clone());
      self.trace_enter(fresh);
      fresh
   }

   /// Checks if this guard's slot is `Called` on `obj`.
   #[inline]
   pub fn is_called<T>(&self, obj: &T) -> bool
   where
      T: HasInitLedger<K> + ?Sized,
   {
      obj.init_ledger().is_called(&self.slot)
   }

   /// Shared-ledger form of [`SingleUseInit::is_called`].
   ///
   /// The answer may be stale as soon as it is returned.
   #[inline]
   pub fn is_called_shared<T>(&self, obj: &T) -> bool
   where
      T: HasSharedInitLedger<K> + ?Sized,
   {
      obj.shared_init_ledger().is_called(&self.slot)
   }

   #[cfg(feature = "tracing")]
   #[inline(always)]
   fn trace_enter(&self, fresh: bool) {
      if fresh {
         tracing::debug!(slot = ?self.slot, "running single-use initializer");
      } else {
         tracing::trace!(slot = ?self.slot, "initializer already called; skipping");
      }
   }

   #[cfg(not(feature = "tracing"))]
   #[inline(always)]
   fn trace_enter(&self, _fresh: bool) {}
}

impl<K: fmt::Debug, F> fmt::Debug for SingleUseInit<K, F> {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.debug_struct("SingleUseInit")
         .field("slot", &self.slot)
         .finish_non_exhaustive()
   }
}
