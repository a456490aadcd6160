//! Lua AST builders for functions, guarded reads, loops, and table literals.
//!
//! These provide a high-level API for constructing Lua syntax,
//! which can then be rendered via CodeBuilder.

mod fns;
mod guard;
mod loops;
mod table;

pub use fns::LuaFn;
pub use guard::Guard;
pub use loops::NumericFor;
pub use table::LuaTable;
