//! lf-run - the Lakeflow run engine
//!
//! Takes a loaded project and a database connection and does the work of a
//! run: render model SQL, gate it through the contract check, materialize
//! (view / table / incremental), apply constraints with the deferred
//! post-creation semantics of the delta table format, load seeds, and clone
//! schemas.

pub mod clone_op;
pub mod compile;
pub mod constraints;
pub mod error;
pub mod execute;
mod incremental;
pub mod seed;

pub use clone_op::clone_schema;
pub use compile::{compile_model, CompiledModel};
pub use constraints::{constraint_support, ConstraintSupport};
pub use error::{RunError, RunResult};
pub use execute::{run_models, ModelRunResult, RunOptions, RunStatus, RunSummary};
pub use seed::run_seeds;
