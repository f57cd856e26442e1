/*!

Implements the [erased trait](https://quinedot.github.io/rust-learning/dyn-trait-erased.html) pattern
from [Learning Rust: Hashable Box<dyn Trait>](https://quinedot.github.io/rust-learning/dyn-trait-hash.html).

While this code is very generic, it isn't needed for users of the library. It only exists to support internal code.

So far we do this to implement `Hash` and `Eq` on trait objects, which is how the engine's opaque term key
variant (any caller type implementing `Hash + Eq + 'static`) participates in hash-consing without the engine
knowing the concrete type.

To use `DynHash`, just implement `Hash` for your trait.

```ignore
use eqbool::abstractions::DynHash;
use core::hash::{Hash, Hasher};

pub trait Trait: DynHash{}

impl Hash for dyn Trait {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.dyn_hash(state)
    }
}
```

*/
use core::any::Any;
use core::hash::{Hash, Hasher};

pub trait DynHash {
  fn dyn_hash(&self, state: &mut dyn Hasher);
}

// impl<T: ?Sized + Hash> DynHash for T {
impl<T: Hash> DynHash for T {
  fn dyn_hash(&self, mut state: &mut dyn Hasher) {
    self.hash(&mut state)
  }
}

impl Hash for dyn DynHash + '_ {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.dyn_hash(state)
  }
}

/// Type-erased equality, companion to `DynHash`. `eq` downcasts `other` to `Self`'s concrete type via
/// `Any` and returns `false` for a type mismatch rather than panicking, matching `PartialEq`'s contract.
pub trait DynEq: Any {
  fn as_any(&self) -> &dyn Any;
  fn dyn_eq(&self, other: &dyn DynEq) -> bool;
}

impl<T: Any + PartialEq> DynEq for T {
  fn as_any(&self) -> &dyn Any {
    self
  }

  fn dyn_eq(&self, other: &dyn DynEq) -> bool {
    other
        .as_any()
        .downcast_ref::<T>()
        .is_some_and(|other| self == other)
  }
}

impl PartialEq for dyn DynEq + '_ {
  fn eq(&self, other: &Self) -> bool {
    self.dyn_eq(other)
  }
}

impl Eq for dyn DynEq + '_ {}

/// An opaque term key: any caller-provided type that is hashable, equatable, debug-printable, and owned.
/// This is the "catch-all" bucket described in the data model for keys that aren't one of the fast-path
/// variants (string, integer, tuple).
pub trait OpaqueKey: DynHash + DynEq + std::fmt::Debug {}

impl<T: Hash + Eq + std::fmt::Debug + 'static> OpaqueKey for T {}

impl Hash for dyn OpaqueKey {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.dyn_hash(state)
  }
}

impl PartialEq for dyn OpaqueKey {
  fn eq(&self, other: &Self) -> bool {
    self.dyn_eq(other)
  }
}

impl Eq for dyn OpaqueKey {}
