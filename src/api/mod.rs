/*!

The public API of the library: the raw, handle-based [`context::Context`] and the ergonomic
[`expr::Expr`]/[`expr::ExprContext`] façade built on top of it, plus the error type both return.

*/

pub mod context;
pub mod error;
pub mod expr;

pub use context::Context;
pub use error::EqboolError;
pub use expr::{Expr, ExprContext};
