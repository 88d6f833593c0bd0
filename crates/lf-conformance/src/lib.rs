//! lf-conformance - adapter conformance suites for Lakeflow
//!
//! Shared base suites validating an adapter's constraint-enforcement and
//! clone behavior, plus the declarative fixtures and the scratch-workspace
//! harness they run in. The dialect-specific parametrization lives in this
//! crate's `tests/` directory.

pub mod fixtures;
pub mod project;
pub mod suites;
pub mod util;

pub use project::{TestProject, TestProjectBuilder};
