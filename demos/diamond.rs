//! Guarded initializers on a diamond.
//!
//! ```text
//!     A         A
//!    / \        |
//!   B   C       B
//!    \ /        |
//!     D1        D2
//! ```
//!
//! Expected output:
//!
//! ```text
//! D1: B, C, A
//! D1 (x)
//! B (x)
//! A
//! C (x)
//!
//! D2: B, A
//! D2 (x)
//! B (x)
//! A
//! ```

use single_use_init::{HasInitLedger, InitLedger, SingleUseInit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Init {
   A,
   B,
   C,
   D1,
   D2,
}

/// Anything built on top of `A`.
trait HasA: HasInitLedger<Init> {}

fn a_init<T: HasA>(obj: &mut T) {
   SingleUseInit::new(Init::A, |_: &mut T, ()| println!("A")).call(obj, ());
}

// The guards on B, C and the leaves are not needed for these two hierarchies,
// but keep them correct if something else is built on top.
fn b_init<T: HasA>(obj: &mut T, x: &str) {
   SingleUseInit::new(Init::B, |obj: &mut T, x: &str| {
      println!("B ({x})");
      a_init(obj);
   })
   .call(obj, x);
}

fn c_init<T: HasA>(obj: &mut T, x: &str) {
   SingleUseInit::new(Init::C, |obj: &mut T, x: &str| {
      println!("C ({x})");
      a_init(obj);
   })
   .call(obj, x);
}

#[derive(Default)]
struct D1 {
   ledger: InitLedger<Init>,
}

impl D1 {
   fn new(x: &str) -> Self {
      let mut this = Self::default();
      SingleUseInit::new(Init::D1, |obj: &mut Self, x: &str| {
         println!("D1 ({x})");
         b_init(obj, x);
         c_init(obj, x);
      })
      .call(&mut this, x);
      this
   }
}

#[derive(Default)]
struct D2 {
   ledger: InitLedger<Init>,
}

impl D2 {
   fn new(x: &str) -> Self {
      let mut this = Self::default();
      SingleUseInit::new(Init::D2, |obj: &mut Self, x: &str| {
         println!("D2 ({x})");
         b_init(obj, x);
      })
      .call(&mut this, x);
      this
   }
}

macro_rules! impl_has_a {
   ($($ty:ty),*) => {$(
      impl HasInitLedger<Init> for $ty {
         fn init_ledger(&self) -> &InitLedger<Init> {
            &self.ledger
         }

         fn init_ledger_mut(&mut self) -> &mut InitLedger<Init> {
            &mut self.ledger
         }
      }

      impl HasA for $ty {}
   )*};
}

impl_has_a!(D1, D2);

fn main() {
   tracing_subscriber::fmt()
      .with_writer(std::io::stderr)
      .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
      .init();

   println!("D1: B, C, A");
   let d1 = D1::new("x");
   assert_eq!(d1.ledger.len(), 4);

   println!();

   println!("D2: B, A");
   let d2 = D2::new("x");
   assert_eq!(d2.ledger.len(), 3);
}
