/*!

A `term(t)` node is identified by an externally supplied hashable key `t`. The design notes ask for a small
tagged variant for the common cases (string, integer, tuple-of-same) plus a catch-all opaque variant for
caller-defined key types, rather than forcing every caller to go through one representation.

The opaque variant is grounded on the erased-trait pattern in [`crate::abstractions::erased`]: any type that
is `Hash + Eq + Debug + 'static` can be boxed into a `TermKey::Opaque` without the engine ever naming its
concrete type.

*/

use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::abstractions::{IString, OpaqueKey};

#[derive(Clone)]
pub enum TermKey {
  Str(IString),
  Int(i64),
  Tuple(Vec<TermKey>),
  Opaque(Rc<dyn OpaqueKey>),
}

impl TermKey {
  pub fn opaque<T: Hash + Eq + Debug + 'static>(value: T) -> TermKey {
    TermKey::Opaque(Rc::new(value))
  }
}

impl From<&str> for TermKey {
  fn from(value: &str) -> Self {
    TermKey::Str(IString::from(value))
  }
}

impl From<String> for TermKey {
  fn from(value: String) -> Self {
    TermKey::Str(IString::from(value))
  }
}

impl From<i64> for TermKey {
  fn from(value: i64) -> Self {
    TermKey::Int(value)
  }
}

impl From<i32> for TermKey {
  fn from(value: i32) -> Self {
    TermKey::Int(value as i64)
  }
}

impl From<Vec<TermKey>> for TermKey {
  fn from(value: Vec<TermKey>) -> Self {
    TermKey::Tuple(value)
  }
}

impl PartialEq for TermKey {
  fn eq(&self, other: &Self) -> bool {
    match (self, other) {
      (TermKey::Str(a), TermKey::Str(b)) => a == b,
      (TermKey::Int(a), TermKey::Int(b)) => a == b,
      (TermKey::Tuple(a), TermKey::Tuple(b)) => a == b,
      (TermKey::Opaque(a), TermKey::Opaque(b)) => a.as_ref() == b.as_ref(),
      _ => false,
    }
  }
}

impl Eq for TermKey {}

impl Hash for TermKey {
  fn hash<H: Hasher>(&self, state: &mut H) {
    // Discriminant first so that e.g. `Int(0)` and `Str("")` never collide by accident.
    core::mem::discriminant(self).hash(state);
    match self {
      TermKey::Str(s) => s.hash(state),
      TermKey::Int(i) => i.hash(state),
      TermKey::Tuple(t) => t.hash(state),
      TermKey::Opaque(o) => o.as_ref().hash(state),
    }
  }
}

impl Debug for TermKey {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      TermKey::Str(s) => write!(f, "{s:?}"),
      TermKey::Int(i) => write!(f, "{i}"),
      TermKey::Tuple(t) => write!(f, "{t:?}"),
      TermKey::Opaque(o) => write!(f, "{o:?}"),
    }
  }
}

impl Display for TermKey {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      TermKey::Str(s) => write!(f, "{s}"),
      TermKey::Int(i) => write!(f, "{i}"),
      TermKey::Tuple(t) => {
        write!(f, "(")?;
        for (idx, k) in t.iter().enumerate() {
          if idx > 0 {
            write!(f, ", ")?;
          }
          write!(f, "{k}")?;
        }
        write!(f, ")")
      }
      TermKey::Opaque(o) => write!(f, "{o:?}"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn string_keys_compare_by_value() {
    let a: TermKey = "foo".into();
    let b: TermKey = "foo".into();
    assert_eq!(a, b);
  }

  #[test]
  fn distinct_variants_are_unequal() {
    let a: TermKey = "0".into();
    let b: TermKey = 0i64.into();
    assert_ne!(a, b);
  }

  #[test]
  fn opaque_keys_compare_by_downcast_equality() {
    #[derive(Hash, PartialEq, Eq, Debug)]
    struct Pair(u8, u8);

    let a = TermKey::opaque(Pair(1, 2));
    let b = TermKey::opaque(Pair(1, 2));
    let c = TermKey::opaque(Pair(1, 3));
    assert_eq!(a, b);
    assert_ne!(a, c);
  }
}
