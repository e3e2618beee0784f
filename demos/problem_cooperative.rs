//! Cooperative delegation: every initializer hands off to whatever comes next
//! in the instance's linearized order instead of naming its parent.
//!
//! `B` cannot know what follows it. In `D1` the next step is `C`, which needs
//! `x`; in `D2` it is `A`, which takes nothing. Forwarding `x` works for one
//! and fails for the other.
//!
//! Expected output:
//!
//! ```text
//! D1 (x)
//! B (x)
//! C (x)
//! A
//!
//! D2 (x)
//! B (x)
//! error: A takes no argument, but B passed one
//! ```

use thiserror::Error;

#[derive(Debug, Clone, Copy)]
enum Step {
   A,
   B,
   C,
   D1,
   D2,
}

#[derive(Debug, Error)]
enum InitError {
   #[error("{callee:?} takes no argument, but {caller:?} passed one")]
   UnexpectedArgument { caller: Step, callee: Step },
   #[error("{callee:?} needs an argument, but {caller:?} passed none")]
   MissingArgument { caller: Step, callee: Step },
}

/// Runs the step at the head of `order`, which forwards to the rest.
fn init(order: &[Step], caller: Step, arg: Option<&str>) -> Result<(), InitError> {
   let Some((&step, rest)) = order.split_first() else {
      return Ok(());
   };
   match (step, arg) {
      (Step::A, None) => {
         println!("A");
         Ok(())
      }
      (Step::A, Some(_)) => Err(InitError::UnexpectedArgument { caller, callee: step }),
      (_, None) => Err(InitError::MissingArgument { caller, callee: step }),
      (Step::C, Some(x)) => {
         println!("C ({x})");
         init(rest, step, None)
      }
      (_, Some(x)) => {
         println!("{step:?} ({x})");
         init(rest, step, Some(x))
      }
   }
}

fn main() {
   for order in [
      &[Step::D1, Step::B, Step::C, Step::A][..],
      &[Step::D2, Step::B, Step::A][..],
   ] {
      if let Err(err) = init(order, order[0], Some("x")) {
         println!("error: {err}");
      }
      println!();
   }
}
