//! lf-db - Database abstraction layer for Lakeflow
//!
//! This crate provides the `Database` trait and the DuckDB implementation,
//! including the schema introspection the conformance suites rely on.

pub mod duckdb;
pub mod error;
pub mod traits;

pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use traits::{Database, Relation, RelationKind};
