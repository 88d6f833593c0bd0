//! lf-core - Core library for Lakeflow
//!
//! This crate provides the shared types used across all Lakeflow components:
//! project configuration, model discovery, schema descriptor files (columns
//! and constraints), and contract (columns-equal) verification.

pub mod config;
pub mod contract;
pub mod error;
pub mod project;
pub mod schema;
pub mod sql_utils;

pub use config::{
    Config, FileFormat, IncrementalStrategy, Materialization, ModelsConfig, OnSchemaChange,
    SeedsConfig,
};
pub use contract::{verify_columns, ContractMismatch, MismatchKind};
pub use error::{CoreError, CoreResult};
pub use project::{Model, Project, Seed};
pub use schema::{
    ColumnDef, ConstraintKind, ConstraintSpec, ContractConfig, ModelConfig, ModelSchema, SchemaFile,
};
