/*!

A `Context` owns a node arena, its hash-cons table, and the bookkeeping a façade needs on top of them: a
union-find table recording pairs the decider has proven equivalent (consulted by [`crate::api::expr::Expr`]'s
`PartialEq`, never by the arena itself), and nothing else process-wide — everything the engine needs to run
is owned by the `Context` a caller constructs.

This is the raw, handle-based API described by the data model. [`crate::api::expr::Expr`] is the ergonomic
wrapper most callers should reach for; `Context`'s methods are what it delegates to after checking that both
operands belong to the same context.

*/

use std::collections::HashMap;

use crate::abstractions::log::*;
use crate::abstractions::join_string;
use crate::api::error::EqboolError;
use crate::core::arena::Arena;
use crate::core::decider::{self, Budget, Verdict};
use crate::core::handle::Handle;
use crate::core::hashcons::HashCons;
use crate::core::node::Node;
use crate::core::term_key::TermKey;

pub struct Context {
  arena: Arena,
  hashcons: HashCons,
  /// Union-find parent table recording proven-equivalent pairs, keyed and valued by handle. Not consulted
  /// by the arena or the decider; purely a façade-level cache so `Expr`'s `PartialEq` can short-circuit a
  /// pair that has already been proven equivalent once.
  merged: HashMap<Handle, Handle>,
}

impl Context {
  pub fn new() -> Context {
    info!(2, "context: created new context");
    Context { arena: Arena::new(), hashcons: HashCons::new(), merged: HashMap::new() }
  }

  pub fn false_(&self) -> Handle {
    Handle::FALSE
  }

  pub fn true_(&self) -> Handle {
    Handle::TRUE
  }

  /// Interns a term identified by `key`, returning its canonical handle. Hashing and equality are enforced
  /// statically by `K: Into<TermKey>`'s bound on the underlying key types.
  pub fn get<K: Into<TermKey>>(&mut self, key: K) -> Handle {
    self.intern(Node::Term(key.into()))
  }

  /// Negation never allocates: it's just the handle's polarity bit flipped.
  pub fn not_(&self, h: Handle) -> Handle {
    h.negate()
  }

  /// An n-ary disjunction, normalized at construction time: flattens nested `or`s, drops `false` operands,
  /// short-circuits to `true` on a `true` operand or a complementary pair, and deduplicates.
  pub fn or_(&mut self, args: impl IntoIterator<Item = Handle>) -> Handle {
    let mut flat: Vec<Handle> = Vec::new();
    let mut stack: Vec<Handle> = args.into_iter().collect();

    while let Some(h) = stack.pop() {
      if h.is_true() {
        return Handle::TRUE;
      }
      if h.is_false() {
        continue;
      }
      if !h.polarity() {
        if let Some(Node::Or(inner)) = self.arena.get(h.index()) {
          stack.extend(inner.iter().copied());
          continue;
        }
      }
      flat.push(h);
    }

    flat.sort_by_key(|h| h.raw());
    flat.dedup();
    for pair in flat.windows(2) {
      if pair[0].index() == pair[1].index() && pair[0].polarity() != pair[1].polarity() {
        return Handle::TRUE;
      }
    }

    match flat.len() {
      0 => Handle::FALSE,
      1 => flat[0],
      _ => self.intern(Node::Or(flat)),
    }
  }

  /// `and(args) = not(or(not(args)))`, the De Morgan dual of [`Context::or_`]. No node kind of its own.
  pub fn and_(&mut self, args: impl IntoIterator<Item = Handle>) -> Handle {
    let negated: Vec<Handle> = args.into_iter().map(Handle::negate).collect();
    self.or_(negated).negate()
  }

  /// `if i then t else e`, normalized at construction time through the full rule list: a constant condition
  /// or identical branches collapse immediately; a constant branch reduces to an `or`/`and` of the other two
  /// operands; a branch pair that is a complementary pair, or a condition that coincides with (the negation
  /// of) a branch, likewise reduces to `or`/`and`; and the condition's polarity is canonicalized before
  /// hash-consing, so `ifelse` and its negated-condition form always share a handle.
  pub fn ifelse(&mut self, i: Handle, t: Handle, e: Handle) -> Handle {
    if i.is_true() {
      return t;
    }
    if i.is_false() {
      return e;
    }
    if t.is_true() {
      return self.or_([i, e]);
    }
    if t.is_false() {
      return self.and_([i.negate(), e]);
    }
    if e.is_true() {
      return self.or_([i.negate(), t]);
    }
    if e.is_false() {
      return self.and_([i, t]);
    }
    if t == e {
      return t;
    }
    if t == e.negate() {
      return self.eq_(i, t);
    }
    if i == t || i == e.negate() {
      return self.or_([t, e]);
    }
    if i == e || i == t.negate() {
      return self.and_([t, e]);
    }
    let (i, t, e) = if i.polarity() { (i.negate(), e, t) } else { (i, t, e) };
    self.intern(Node::IfElse { i, t, e })
  }

  /// Boolean equivalence of `a` and `b`. Normalizes identical and complementary operands immediately, a
  /// constant operand reduces to the other operand (possibly negated), and the remaining pair is canonicalized
  /// by ascending handle value with the first operand's polarity flipped to positive (flipping both operands'
  /// polarity along with it) before hash-consing, so `eq(a, b)` and `eq(not(a), not(b))` share a handle.
  pub fn eq_(&mut self, a: Handle, b: Handle) -> Handle {
    if a == b {
      return Handle::TRUE;
    }
    if a == b.negate() {
      return Handle::FALSE;
    }
    if a.is_const() {
      return if a.is_true() { b } else { b.negate() };
    }
    if b.is_const() {
      return if b.is_true() { a } else { a.negate() };
    }
    let (mut x, mut y) = if a.raw() <= b.raw() { (a, b) } else { (b, a) };
    if x.polarity() {
      x = x.negate();
      y = y.negate();
    }
    self.intern(Node::Eq(x, y))
  }

  /// `neq(a, b) = not(eq(a, b))`.
  pub fn neq_(&mut self, a: Handle, b: Handle) -> Handle {
    self.eq_(a, b).negate()
  }

  /// Decides whether `a` and `b` are semantically equivalent, using the default search budget.
  pub fn is_equiv(&mut self, a: Handle, b: Handle) -> Verdict {
    self.is_equiv_with_budget(a, b, &Budget::default_budget())
  }

  /// Decides whether `a` and `b` are semantically equivalent within `budget`. On a proof of equivalence, the
  /// pair (and their negations) is recorded in the merge table so future façade-level comparisons can
  /// short-circuit it.
  pub fn is_equiv_with_budget(&mut self, a: Handle, b: Handle, budget: &Budget) -> Verdict {
    if a == b {
      return Verdict::Equivalent;
    }
    let goal = self.neq_(a, b);
    debug!(1, "context: deciding equivalence of {} and {}", self.print(a), self.print(b));
    let verdict = decider::decide(&self.arena, goal, budget);
    if verdict == Verdict::Equivalent {
      self.merge(a, b);
    }
    verdict
  }

  /// The node kind name at `h` (`"const"`, `"term"`, `"or"`, `"ifelse"`, or `"eq"`).
  pub fn kind(&self, h: Handle) -> Result<&'static str, EqboolError> {
    Ok(self.node_at(h)?.kind_name())
  }

  /// The term key at `h`, if `h` refers to a `term(...)` node.
  pub fn term(&self, h: Handle) -> Result<&TermKey, EqboolError> {
    match self.node_at(h)? {
      Node::Term(key) => Ok(key),
      other => Err(EqboolError::UnexpectedKind { expected: "term", found: other.kind_name() }),
    }
  }

  /// The operand handles of `h`, in node order. Leaves (`const`, `term`) have no operands.
  pub fn args(&self, h: Handle) -> Result<Vec<Handle>, EqboolError> {
    Ok(match self.node_at(h)? {
      Node::Const | Node::Term(_) => Vec::new(),
      Node::Or(args) => args.clone(),
      Node::IfElse { i, t, e } => vec![*i, *t, *e],
      Node::Eq(a, b) => vec![*a, *b],
    })
  }

  /// Renders `h` as a human-readable expression string, e.g. `(a | ~b)`.
  pub fn print(&self, h: Handle) -> String {
    if h.is_false() {
      return "false".to_string();
    }
    if h.is_true() {
      return "true".to_string();
    }
    let body = match self.arena.get(h.index()).expect("handle index must be in range") {
      Node::Const => unreachable!("only index 0 holds Const, handled above"),
      Node::Term(key) => format!("{key}"),
      Node::Or(args) => format!("({})", join_string(args.iter().map(|a| self.print(*a)), " | ")),
      Node::IfElse { i, t, e } => {
        format!("({} ? {} : {})", self.print(*i), self.print(*t), self.print(*e))
      }
      Node::Eq(a, b) => format!("({} = {})", self.print(*a), self.print(*b)),
    };
    if h.polarity() {
      format!("~{body}")
    } else {
      body
    }
  }

  /// The canonical representative of `h` in the proven-equivalence union-find table, with path compression.
  pub(crate) fn find(&mut self, h: Handle) -> Handle {
    match self.merged.get(&h).copied() {
      Some(parent) if parent != h => {
        let root = self.find(parent);
        self.merged.insert(h, root);
        root
      }
      Some(parent) => parent,
      None => h,
    }
  }

  fn merge(&mut self, a: Handle, b: Handle) {
    let ra = self.find(a);
    let rb = self.find(b);
    if ra != rb {
      self.merged.insert(ra, rb);
    }
    // A proof that `a` and `b` agree also proves their negations agree.
    let rna = self.find(a.negate());
    let rnb = self.find(b.negate());
    if rna != rnb {
      self.merged.insert(rna, rnb);
    }
  }

  pub(crate) fn check(&self, h: Handle) -> Result<(), EqboolError> {
    if h.index() < self.arena.len() {
      Ok(())
    } else {
      Err(EqboolError::UnboundHandle)
    }
  }

  fn node_at(&self, h: Handle) -> Result<&Node, EqboolError> {
    self.check(h)?;
    Ok(self.arena.get(h.index()).expect("checked handle must resolve to a node"))
  }

  fn intern(&mut self, node: Node) -> Handle {
    let key = node.structural_key();
    if let Some(index) = self.hashcons.lookup(&key) {
      return Handle::from_parts(index, false);
    }
    let handle = self.arena.alloc(node);
    self.hashcons.insert(key, handle.index());
    handle
  }
}

impl Default for Context {
  fn default() -> Context {
    Context::new()
  }
}
