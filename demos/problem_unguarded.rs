//! The diamond without guards: `A` is initialized once per path.
//!
//! Expected output:
//!
//! ```text
//! D1 (x)
//! B (x)
//! A
//! C (x)
//! A
//!
//! D2 (x)
//! B (x)
//! A
//! ```

#[derive(Default)]
struct Parts {
   a_inits: usize,
}

fn a_init(parts: &mut Parts) {
   println!("A");
   parts.a_inits += 1;
}

fn b_init(parts: &mut Parts, x: &str) {
   println!("B ({x})");
   a_init(parts);
}

fn c_init(parts: &mut Parts, x: &str) {
   println!("C ({x})");
   a_init(parts);
}

fn d1_init(parts: &mut Parts, x: &str) {
   println!("D1 ({x})");
   b_init(parts, x);
   c_init(parts, x);
}

fn d2_init(parts: &mut Parts, x: &str) {
   println!("D2 ({x})");
   b_init(parts, x);
}

fn main() {
   let mut d1 = Parts::default();
   d1_init(&mut d1, "x");
   // A is reached through both B and C
   assert_eq!(d1.a_inits, 2);

   println!();

   let mut d2 = Parts::default();
   d2_init(&mut d2, "x");
   assert_eq!(d2.a_inits, 1);
}
