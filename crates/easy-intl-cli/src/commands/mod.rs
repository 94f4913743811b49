//! CLI command implementations.

mod check;
mod coverage;
mod eval;

pub use check::{CheckArgs, run_check};
pub use coverage::{CoverageArgs, run_coverage};
pub use eval::{EvalArgs, run_eval};
