/*!

`Expr` is the ergonomic façade over the raw, handle-based [`crate::api::context::Context`] API: it binds a
handle to the context that produced it, so operator overloads can check at runtime that two operands share a
context rather than silently mixing handles from two unrelated node arenas.

Per the data model, this is a boundary object: cheap to copy (an `Rc` clone and a `Handle`), cached so that
two `Expr`s for the same handle in the same context are the same cached object rather than a fresh allocation
every time, and the only place operator sugar (`&`, `|`, `!`) lives.

*/

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use std::ops::{BitAnd, BitOr, BitXor, Not};
use std::rc::Rc;

use crate::api::context::Context;
use crate::api::error::EqboolError;
use crate::core::decider::{Budget, Verdict};
use crate::core::handle::Handle;
use crate::core::term_key::TermKey;

/// A context together with the per-handle `Expr` cache the façade needs to hand back the same object for the
/// same handle. Kept separate from `Context` itself so the raw API has no knowledge of the façade layer.
struct Bound {
  context: RefCell<Context>,
  cache: RefCell<HashMap<Handle, Expr>>,
}

/// A boolean expression bound to a context. Cheap to clone; all the real state lives in the shared context.
#[derive(Clone)]
pub struct Expr {
  bound: Rc<Bound>,
  handle: Handle,
}

/// Creates a fresh context and returns its `false` and `true` expressions as a starting point, mirroring how
/// callers typically open a session: `let ctx = eqbool::Context::new();`.
pub struct ExprContext {
  bound: Rc<Bound>,
}

impl ExprContext {
  pub fn new() -> ExprContext {
    ExprContext {
      bound: Rc::new(Bound { context: RefCell::new(Context::new()), cache: RefCell::new(HashMap::new()) }),
    }
  }

  fn wrap(&self, handle: Handle) -> Expr {
    if let Some(expr) = self.bound.cache.borrow().get(&handle) {
      return expr.clone();
    }
    let expr = Expr { bound: self.bound.clone(), handle };
    self.bound.cache.borrow_mut().insert(handle, expr.clone());
    expr
  }

  pub fn false_(&self) -> Expr {
    self.wrap(Handle::FALSE)
  }

  pub fn true_(&self) -> Expr {
    self.wrap(Handle::TRUE)
  }

  pub fn get<K: Into<TermKey>>(&self, key: K) -> Expr {
    let handle = self.bound.context.borrow_mut().get(key);
    self.wrap(handle)
  }
}

impl Default for ExprContext {
  fn default() -> ExprContext {
    ExprContext::new()
  }
}

impl Expr {
  fn same_context(&self, other: &Expr) -> bool {
    Rc::ptr_eq(&self.bound, &other.bound)
  }

  fn require_same_context(&self, other: &Expr) -> Result<(), EqboolError> {
    if self.same_context(other) {
      Ok(())
    } else {
      Err(EqboolError::CrossContextMisuse)
    }
  }

  pub fn id(&self) -> Handle {
    self.handle
  }

  pub fn checked_not(&self) -> Expr {
    let h = self.bound.context.borrow().not_(self.handle);
    self.wrap_same(h)
  }

  pub fn checked_or(&self, other: &Expr) -> Result<Expr, EqboolError> {
    self.require_same_context(other)?;
    let h = self.bound.context.borrow_mut().or_([self.handle, other.handle]);
    Ok(self.wrap_same(h))
  }

  pub fn checked_and(&self, other: &Expr) -> Result<Expr, EqboolError> {
    self.require_same_context(other)?;
    let h = self.bound.context.borrow_mut().and_([self.handle, other.handle]);
    Ok(self.wrap_same(h))
  }

  pub fn checked_eq(&self, other: &Expr) -> Result<Expr, EqboolError> {
    self.require_same_context(other)?;
    let h = self.bound.context.borrow_mut().eq_(self.handle, other.handle);
    Ok(self.wrap_same(h))
  }

  pub fn checked_neq(&self, other: &Expr) -> Result<Expr, EqboolError> {
    self.require_same_context(other)?;
    let h = self.bound.context.borrow_mut().neq_(self.handle, other.handle);
    Ok(self.wrap_same(h))
  }

  pub fn ifelse(&self, then: &Expr, else_: &Expr) -> Result<Expr, EqboolError> {
    self.require_same_context(then)?;
    self.require_same_context(else_)?;
    let h = self.bound.context.borrow_mut().ifelse(self.handle, then.handle, else_.handle);
    Ok(self.wrap_same(h))
  }

  pub fn is_equiv(&self, other: &Expr) -> Result<Verdict, EqboolError> {
    self.require_same_context(other)?;
    Ok(self.bound.context.borrow_mut().is_equiv(self.handle, other.handle))
  }

  pub fn is_equiv_with_budget(&self, other: &Expr, budget: &Budget) -> Result<Verdict, EqboolError> {
    self.require_same_context(other)?;
    Ok(self.bound.context.borrow_mut().is_equiv_with_budget(self.handle, other.handle, budget))
  }

  pub fn kind(&self) -> &'static str {
    self.bound.context.borrow().kind(self.handle).expect("expr always refers to a handle in its own context")
  }

  pub fn term(&self) -> Result<TermKey, EqboolError> {
    self.bound.context.borrow().term(self.handle).cloned()
  }

  pub fn args(&self) -> Vec<Expr> {
    let args = self
        .bound
        .context
        .borrow()
        .args(self.handle)
        .expect("expr always refers to a handle in its own context");
    args.into_iter().map(|h| self.wrap_same(h)).collect()
  }

  fn wrap_same(&self, handle: Handle) -> Expr {
    if let Some(expr) = self.bound.cache.borrow().get(&handle) {
      return expr.clone();
    }
    let expr = Expr { bound: self.bound.clone(), handle };
    self.bound.cache.borrow_mut().insert(handle, expr.clone());
    expr
  }
}

impl PartialEq for Expr {
  /// Two `Expr`s are equal if they are literally the same handle, or if the decider has previously proven
  /// them equivalent (see `Context::merge`). This does *not* run the decider; call `is_equiv` for that.
  fn eq(&self, other: &Expr) -> bool {
    if !self.same_context(other) {
      return false;
    }
    if self.handle == other.handle {
      return true;
    }
    let mut ctx = self.bound.context.borrow_mut();
    ctx.find(self.handle) == ctx.find(other.handle)
  }
}

impl Eq for Expr {}

impl Not for Expr {
  type Output = Expr;
  fn not(self) -> Expr {
    self.checked_not()
  }
}

impl BitOr for Expr {
  type Output = Expr;
  fn bitor(self, rhs: Expr) -> Expr {
    self.checked_or(&rhs).expect("cannot combine expressions from different contexts")
  }
}

impl BitAnd for Expr {
  type Output = Expr;
  fn bitand(self, rhs: Expr) -> Expr {
    self.checked_and(&rhs).expect("cannot combine expressions from different contexts")
  }
}

impl BitXor for Expr {
  type Output = Expr;
  fn bitxor(self, rhs: Expr) -> Expr {
    self.checked_neq(&rhs).expect("cannot combine expressions from different contexts")
  }
}

impl Display for Expr {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.bound.context.borrow().print(self.handle))
  }
}

impl fmt::Debug for Expr {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "Expr({})", self.bound.context.borrow().print(self.handle))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn operator_sugar_matches_checked_methods() {
    let ctx = ExprContext::new();
    let a = ctx.get("a");
    let b = ctx.get("b");
    let or_ab = a.clone().checked_or(&b).unwrap();
    let or_ab_sugar = a | b;
    assert_eq!(or_ab, or_ab_sugar);
  }

  #[test]
  fn cross_context_combination_is_rejected() {
    let ctx1 = ExprContext::new();
    let ctx2 = ExprContext::new();
    let a = ctx1.get("a");
    let b = ctx2.get("b");
    assert_eq!(a.checked_or(&b), Err(EqboolError::CrossContextMisuse));
  }

  #[test]
  fn expr_cache_returns_the_same_object_for_the_same_handle() {
    let ctx = ExprContext::new();
    let a1 = ctx.get("a");
    let a2 = ctx.get("a");
    assert_eq!(a1.id(), a2.id());
  }

  #[test]
  fn ifelse_true_branch_collapses_to_or_at_construction_time() {
    let ctx = ExprContext::new();
    let a = ctx.get("a");
    let b = ctx.get("b");
    // `ifelse(a, true, b)` normalizes to `or(a, b)` per the constructor's rule list, so the two already
    // share a handle before any decider call is made.
    let lhs = a.ifelse(&ctx.true_(), &b).unwrap();
    let rhs = a.clone() | b.clone();
    assert_eq!(lhs, rhs);
  }

  #[test]
  fn partial_eq_reflects_proven_equivalence_after_is_equiv() {
    let ctx = ExprContext::new();
    let a = ctx.get("a");
    let b = ctx.get("b");
    let c = ctx.get("c");
    // Distributivity isn't among the local normalization rules, so these two forms of
    // `a & (b | c)` stay distinct handles until the decider actually proves them equivalent.
    let lhs = a.checked_and(&(b.clone() | c.clone())).unwrap();
    let rhs = (a.clone() & b.clone()) | (a.clone() & c.clone());
    assert_ne!(lhs, rhs); // not yet known to be equal: different handles, no proof recorded
    assert_eq!(lhs.is_equiv(&rhs), Ok(Verdict::Equivalent));
    assert_eq!(lhs, rhs); // now the merge table records it
  }

  #[test]
  fn display_renders_the_same_string_as_context_print() {
    let ctx = ExprContext::new();
    let a = ctx.get("a");
    let not_a = !a;
    assert_eq!(format!("{not_a}"), "~a");
  }
}
