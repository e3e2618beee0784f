//! Per-instance records of which guarded initializers have already run.
//!
//! Every slot follows a two-state machine:
//! - `NotCalled`: no guarded call for the slot has been observed on this instance.
//! - `Called`: a guarded call was attempted. Entered *before* the body runs,
//!   and never left again for the lifetime of the ledger.
//!
//! [`InitLedger`] is the plain form, stored as a field of the instance and
//! reached through `&mut`. [`SharedInitLedger`] performs the same transition
//! under a `parking_lot` mutex for instances shared between threads.

use std::collections::hash_set::{self, HashSet};
use std::fmt;

use parking_lot::Mutex;

use crate::slot::InitSlot;

/// State of one initializer slot on one instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotState {
   /// The guarded initializer has not been invoked on this instance.
   NotCalled,
   /// The guarded initializer was invoked; later calls are no-ops.
   Called,
}

impl SlotState {
   #[inline]
   const fn from_called(called: bool) -> Self {
      if called {
         Self::Called
      } else {
         Self::NotCalled
      }
   }
}

/// The set of guarded initializers already called on one instance.
///
/// Embed it as a field and expose it through [`HasInitLedger`]. An empty
/// ledger does not allocate, so instances that never reach a guarded call pay
/// nothing for it.
///
/// Not synchronized. Marking a slot requires `&mut self`, so two threads can
/// never race on the first call for the same instance; use
/// [`SharedInitLedger`] when the instance itself is shared.
#[derive(Clone)]
pub struct InitLedger<K> {
   called: HashSet<K>,
}

impl<K: InitSlot> InitLedger<K> {
   /// Creates an empty ledger.
   #[inline]
   #[must_use]
   pub fn new() -> Self {
      Self {
         called: HashSet::new(),
      }
   }

   /// Returns the state of `slot`.
   #[inline]
   pub fn state(&self, slot: &K) -> SlotState {
      SlotState::from_called(self.is_called(slot))
   }

   /// Checks if `slot` has been called.
   #[inline]
   pub fn is_called(&self, slot: &K) -> bool {
      self.called.contains(slot)
   }

   /// Moves `slot` to `Called`.
   ///
   /// Returns `true` if the slot was `NotCalled` before, i.e. the caller owns
   /// the single use and should run the body.
   #[inline]
   pub fn mark(&mut self, slot: K) -> bool {
      self.called.insert(slot)
   }

   /// Number of slots in the `Called` state.
   #[inline]
   pub fn len(&self) -> usize {
      self.called.len()
   }

   /// Checks if no slot has been called yet.
   #[inline]
   pub fn is_empty(&self) -> bool {
      self.called.is_empty()
   }

   /// Iterates over the called slots in arbitrary order.
   #[inline]
   pub fn iter(&self) -> hash_set::Iter<'_, K> {
      self.called.iter()
   }
}

impl<K: InitSlot> Default for InitLedger<K> {
   #[inline]
   fn default() -> Self {
      Self::new()
   }
}

impl<K: fmt::Debug> fmt::Debug for InitLedger<K> {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.debug_set().entries(self.called.iter()).finish()
   }
}

impl<'a, K> IntoIterator for &'a InitLedger<K> {
   type Item = &'a K;
   type IntoIter = hash_set::Iter<'a, K>;

   fn into_iter(self) -> Self::IntoIter {
      self.called.iter()
   }
}

/// Access to the [`InitLedger`] embedded in an instance.
pub trait HasInitLedger<K: InitSlot> {
   /// Returns the instance's ledger.
   fn init_ledger(&self) -> &InitLedger<K>;

   /// Returns the instance's ledger for marking.
   fn init_ledger_mut(&mut self) -> &mut InitLedger<K>;
}

/// A ledger that can be marked through a shared reference.
///
/// The check-and-mark step happens under the lock, so exactly one caller wins
/// each slot. The lock is released before the guarded body runs; other
/// callers return immediately instead of waiting for the winner's body to
/// finish.
pub struct SharedInitLedger<K> {
   called: Mutex<HashSet<K>>,
}

impl<K: InitSlot> SharedInitLedger<K> {
   /// Creates an empty shared ledger.
   #[inline]
   #[must_use]
   pub fn new() -> Self {
      Self {
         called: Mutex::new(HashSet::new()),
      }
   }

   /// Returns the state of `slot`.
   ///
   /// The answer may be stale as soon as the lock is released.
   #[inline]
   pub fn state(&self, slot: &K) -> SlotState {
      SlotState::from_called(self.is_called(slot))
   }

   /// Checks if `slot` has been called.
   #[inline]
   pub fn is_called(&self, slot: &K) -> bool {
      self.called.lock().contains(slot)
   }

   /// Moves `slot` to `Called`; returns `true` for the single winning caller.
   #[inline]
   pub fn mark(&self, slot: K) -> bool {
      self.called.lock().insert(slot)
   }

   /// Number of slots in the `Called` state.
   #[inline]
   pub fn len(&self) -> usize {
      self.called.lock().len()
   }

   /// Checks if no slot has been called yet.
   #[inline]
   pub fn is_empty(&self) -> bool {
      self.called.lock().is_empty()
   }

   /// Copies the current contents into a plain [`InitLedger`].
   pub fn snapshot(&self) -> InitLedger<K> {
      InitLedger {
         called: self.called.lock().clone(),
      }
   }

   /// Unwraps into a plain [`InitLedger`].
   pub fn into_inner(self) -> InitLedger<K> {
      InitLedger {
         called: self.called.into_inner(),
      }
   }
}

impl<K: InitSlot> Default for SharedInitLedger<K> {
   #[inline]
   fn default() -> Self {
      Self::new()
   }
}

impl<K: InitSlot> From<InitLedger<K>> for SharedInitLedger<K> {
   fn from(ledger: InitLedger<K>) -> Self {
      Self {
         called: Mutex::new(ledger.called),
      }
   }
}

impl<K: fmt::Debug> fmt::Debug for SharedInitLedger<K> {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      let mut d = f.debug_tuple("SharedInitLedger");
      match self.called.try_lock() {
         Some(called) => d.field(&*called),
         None => d.field(&format_args!("<locked>")),
      };
      d.finish()
   }
}

/// Access to the [`SharedInitLedger`] embedded in an instance.
pub trait HasSharedInitLedger<K: InitSlot> {
   /// Returns the instance's shared ledger.
   fn shared_init_ledger(&self) -> &SharedInitLedger<K>;
}
