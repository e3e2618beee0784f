//! Diamond-shaped composition:
//!
//! ```text
//!     A         A
//!    / \        |
//!   B   C       B
//!    \ /        |
//!     D1        D2
//! ```
//!
//! `D1` initializes `B` then `C`, and both of them initialize `A` without
//! knowing about each other.

use single_use_init::{HasInitLedger, InitLedger, SingleUseInit, SlotState};

mod common;
use common::init_tracing;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Init {
   A,
   B,
   C,
   D1,
   D2,
}

trait Node: HasInitLedger<Init> {
   fn log(&mut self, line: String);
   fn guarded(&self) -> bool;
}

fn run<T: Node, Args>(obj: &mut T, slot: Init, args: Args, body: fn(&mut T, Args)) {
   if obj.guarded() {
      SingleUseInit::new(slot, body).call(obj, args)
   } else {
      body(obj, args)
   }
}

fn a_init<T: Node>(obj: &mut T) {
   run(obj, Init::A, (), |obj, ()| obj.log("A".into()));
}

fn b_init<T: Node>(obj: &mut T, x: &str) {
   run(obj, Init::B, x, |obj, x| {
      obj.log(format!("B ({x})"));
      a_init(obj);
   });
}

fn c_init<T: Node>(obj: &mut T, x: &str) {
   run(obj, Init::C, x, |obj, x| {
      obj.log(format!("C ({x})"));
      a_init(obj);
   });
}

fn d1_init<T: Node>(obj: &mut T, x: &str) {
   run(obj, Init::D1, x, |obj, x| {
      obj.log(format!("D1 ({x})"));
      b_init(obj, x);
      c_init(obj, x);
   });
}

fn d2_init<T: Node>(obj: &mut T, x: &str) {
   run(obj, Init::D2, x, |obj, x| {
      obj.log(format!("D2 ({x})"));
      b_init(obj, x);
   });
}

struct Instance {
   ledger: InitLedger<Init>,
   trace: Vec<String>,
   guarded: bool,
}

impl Instance {
   fn empty(guarded: bool) -> Self {
      Self {
         ledger: InitLedger::new(),
         trace: Vec::new(),
         guarded,
      }
   }

   fn d1(x: &str, guarded: bool) -> Self {
      let mut this = Self::empty(guarded);
      d1_init(&mut this, x);
      this
   }

   fn d2(x: &str, guarded: bool) -> Self {
      let mut this = Self::empty(guarded);
      d2_init(&mut this, x);
      this
   }

   fn count(&self, line: &str) -> usize {
      self.trace.iter().filter(|l| *l == line).count()
   }
}

impl HasInitLedger<Init> for Instance {
   fn init_ledger(&self) -> &InitLedger<Init> {
      &self.ledger
   }

   fn init_ledger_mut(&mut self) -> &mut InitLedger<Init> {
      &mut self.ledger
   }
}

impl Node for Instance {
   fn log(&mut self, line: String) {
      self.trace.push(line);
   }

   fn guarded(&self) -> bool {
      self.guarded
   }
}

#[test]
fn test_d1_trace() {
   init_tracing();
   let d1 = Instance::d1("x", true);
   assert_eq!(d1.trace, ["D1 (x)", "B (x)", "A", "C (x)"]);
}

#[test]
fn test_d1_unguarded_runs_ancestor_twice() {
   let d1 = Instance::d1("x", false);
   assert_eq!(d1.trace, ["D1 (x)", "B (x)", "A", "C (x)", "A"]);
   assert_eq!(d1.count("A"), 2);
}

#[test]
fn test_d2_trace() {
   let d2 = Instance::d2("x", true);
   assert_eq!(d2.trace, ["D2 (x)", "B (x)", "A"]);

   // A straight chain behaves the same with or without guards
   assert_eq!(Instance::d2("x", false).trace, d2.trace);
}

#[test]
fn test_ancestor_runs_once_per_instance() {
   let first = Instance::d1("first", true);
   let second = Instance::d1("second", true);
   assert_eq!(first.count("A"), 1);
   assert_eq!(second.count("A"), 1);
   assert_eq!(second.trace[0], "D1 (second)");
}

#[test]
fn test_ledger_after_construction() {
   let d1 = Instance::d1("x", true);
   assert_eq!(d1.ledger.len(), 4);
   for slot in [Init::A, Init::B, Init::C, Init::D1] {
      assert_eq!(d1.ledger.state(&slot), SlotState::Called);
   }
   assert_eq!(d1.ledger.state(&Init::D2), SlotState::NotCalled);
}

#[test]
fn test_reinit_after_construction_is_noop() {
   let mut d1 = Instance::d1("x", true);
   d1_init(&mut d1, "y");
   c_init(&mut d1, "y");
   a_init(&mut d1);
   assert_eq!(d1.trace, ["D1 (x)", "B (x)", "A", "C (x)"]);
}
