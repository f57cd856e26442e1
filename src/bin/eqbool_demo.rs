/*!

A short, self-contained demonstration of the engine: builds a handful of expressions, prints them, and
decides a few equivalences. Takes no arguments and reads no files or environment variables; exits nonzero if
an internal assertion about the engine's own behavior fails.

*/

use eqbool::{log::set_global_logging_threshold, Budget, ExprContext, Verdict};

fn main() {
  set_global_logging_threshold(2);

  let ctx = ExprContext::new();
  let a = ctx.get("a");
  let b = ctx.get("b");
  let c = ctx.get("c");

  let de_morgan_lhs = !(a.clone() | b.clone());
  let de_morgan_rhs = !a.clone() & !b.clone();
  println!("{de_morgan_lhs}  vs  {de_morgan_rhs}");

  match de_morgan_lhs.is_equiv(&de_morgan_rhs) {
    Ok(Verdict::Equivalent) => println!("proved equivalent"),
    other => {
      eprintln!("expected De Morgan's law to hold, got {other:?}");
      std::process::exit(1);
    }
  }

  let distinct = a.is_equiv(&b);
  println!("a vs b: {distinct:?}");
  assert_eq!(distinct, Ok(Verdict::Inequivalent));

  let ite = a.ifelse(&b, &c).expect("same context");
  println!("ifelse(a, b, c) = {ite}");

  let budget = Budget::default_budget().with_max_decisions(10);
  let tight = ite.is_equiv_with_budget(&c, &budget);
  println!("ifelse(a, b, c) vs c, budget=10 decisions: {tight:?}");
}
