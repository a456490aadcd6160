//! Report data structures for commands.
//!
//! Commands build reports, then render them to an [`output::Output`] target.

mod check;
mod generate;
mod output;

pub use check::{CheckReport, Definitions};
pub use generate::{GenerateReport, GenerationResult};
pub use output::{Report, TerminalOutput};
