/*!

The arena stores one [`Node`] per index. A node's operands are always [`Handle`]s whose arena index is
strictly smaller than the node's own index — nodes are only ever built from already-existing handles, so the
DAG is acyclic by construction and a reachable-subgraph walk never needs cycle detection.

Negation is not a node kind: it lives entirely in the handle's polarity bit. `not(h)` never allocates and
never touches the arena.

*/

use std::fmt::{self, Debug, Formatter};

use crate::core::handle::Handle;
use crate::core::term_key::TermKey;

/// A node's shape, with operands given as [`Handle`]s. Constructors apply local normalization (see
/// `Context`'s `or`/`and`/`ifelse`/`eq`/`neq` methods) before a `Node` ever reaches the arena, so nodes
/// appearing here are already in their minimal, order-independent form.
#[derive(Clone, Debug)]
pub enum Node {
  /// The single reserved constant node at index 0.
  Const,
  /// An opaque leaf, identified by a caller-supplied key.
  Term(TermKey),
  /// An n-ary disjunction. Operands are kept sorted and deduplicated by local normalization.
  Or(Vec<Handle>),
  /// `if i then t else e`.
  IfElse { i: Handle, t: Handle, e: Handle },
  /// Boolean equivalence (XNOR) of two operands, in canonical (sorted) order.
  Eq(Handle, Handle),
}

/// The hash-cons lookup key: a node's shape, but interned so structurally-identical nodes compare equal and
/// hash equal without re-walking their operand vectors every lookup.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum StructuralKey {
  Const,
  Term(TermKey),
  Or(Vec<Handle>),
  IfElse(Handle, Handle, Handle),
  Eq(Handle, Handle),
}

impl Node {
  pub fn structural_key(&self) -> StructuralKey {
    match self {
      Node::Const => StructuralKey::Const,
      Node::Term(k) => StructuralKey::Term(k.clone()),
      Node::Or(args) => StructuralKey::Or(args.clone()),
      Node::IfElse { i, t, e } => StructuralKey::IfElse(*i, *t, *e),
      Node::Eq(a, b) => StructuralKey::Eq(*a, *b),
    }
  }

  /// The node kind name, used by introspection and the printer.
  pub fn kind_name(&self) -> &'static str {
    match self {
      Node::Const => "const",
      Node::Term(_) => "term",
      Node::Or(_) => "or",
      Node::IfElse { .. } => "ifelse",
      Node::Eq(..) => "eq",
    }
  }
}

impl Debug for StructuralKey {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      StructuralKey::Const => write!(f, "const"),
      StructuralKey::Term(k) => write!(f, "term({k:?})"),
      StructuralKey::Or(args) => write!(f, "or{args:?}"),
      StructuralKey::IfElse(i, t, e) => write!(f, "ifelse({i:?}, {t:?}, {e:?})"),
      StructuralKey::Eq(a, b) => write!(f, "eq({a:?}, {b:?})"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn structural_keys_of_equal_shapes_are_equal() {
    let a = Node::Or(vec![Handle::FALSE, Handle::TRUE]);
    let b = Node::Or(vec![Handle::FALSE, Handle::TRUE]);
    assert_eq!(a.structural_key(), b.structural_key());
  }

  #[test]
  fn structural_keys_distinguish_operand_order_sensitive_kinds() {
    let a = Node::Eq(Handle::FALSE, Handle::TRUE);
    let b = Node::Eq(Handle::TRUE, Handle::FALSE);
    assert_ne!(a.structural_key(), b.structural_key());
  }
}
