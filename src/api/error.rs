/*!

The library's single error type. Fatal/programmer-error conditions are reported as `Result`s rather than
panics; `Verdict::Unknown` is deliberately not one of these, since running out of decider budget is an
expected, non-fatal outcome rather than a failure of the engine.

*/

use std::fmt::{self, Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EqboolError {
  /// A handle was used whose arena index doesn't exist in the `Context` it was presented to.
  UnboundHandle,
  /// An introspection call expected a particular node kind (e.g. `term()`) but found a different one.
  UnexpectedKind { expected: &'static str, found: &'static str },
  /// Two `Expr`s bound to different `Context`s were combined.
  CrossContextMisuse,
  /// A caller-supplied opaque key did not satisfy `Hash + Eq`. Rust's type system enforces this statically
  /// for typed entry points, so this variant exists for API completeness rather than ever being reachable
  /// from safe, typed callers.
  KeyUnhashable,
}

impl Display for EqboolError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      EqboolError::UnboundHandle => write!(f, "handle is not bound to this context"),
      EqboolError::UnexpectedKind { expected, found } => {
        write!(f, "expected a {expected} node, found a {found} node")
      }
      EqboolError::CrossContextMisuse => write!(f, "expressions from different contexts cannot be combined"),
      EqboolError::KeyUnhashable => write!(f, "term key does not support hashing and equality"),
    }
  }
}

impl std::error::Error for EqboolError {}
