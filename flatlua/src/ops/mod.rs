//! Command operations, separated from argument parsing and rendering.

mod check;
mod generate;

use flatlua_codegen::pipeline::{Pipeline, phases::EscapedIdentifierLint};
use flatlua_codegen_lua::LUA_NAMING;

pub use check::check;
pub use generate::{GenerateRequest, generate};

/// Pipeline with the lints that matter for Lua output.
fn pipeline() -> Pipeline {
    Pipeline::new().lint(EscapedIdentifierLint::new(LUA_NAMING))
}
