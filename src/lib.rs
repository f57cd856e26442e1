#![allow(dead_code)]
/*!

Hash-consed boolean expression DAGs with a semantic equivalence decider.

Expressions are built through a [`Context`] (or the ergonomic [`ExprContext`]/[`Expr`] façade), which
hash-conses every node so that structurally identical expressions always share one [`Handle`]. Local
algebraic normalization in the constructors (`or`, `and`, `ifelse`, `eq`) collapses many equivalences for
free; [`Context::is_equiv`] decides the rest by Tseitin-encoding the goal and running a budgeted DPLL search.

```
use eqbool::ExprContext;

let ctx = ExprContext::new();
let a = ctx.get("a");
let b = ctx.get("b");

let lhs = !(a.clone() | b.clone());
let rhs = !a & !b;
assert_eq!(lhs.is_equiv(&rhs), Ok(eqbool::Verdict::Equivalent));
```

*/

pub mod abstractions;
pub mod api;
pub mod core;

pub use abstractions::{log, IString};
pub use api::{Context, EqboolError, Expr, ExprContext};
pub use core::{Budget, Handle, Node, TermKey, Verdict};
