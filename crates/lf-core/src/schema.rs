//! Schema descriptor types (schema.yml files)
//!
//! A schema descriptor is a dbt-style YAML file declaring, per model, its
//! config and an ordered list of typed columns, each optionally annotated
//! with constraint declarations.

use crate::config::{FileFormat, IncrementalStrategy, Materialization, OnSchemaChange};
use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A parsed schema descriptor file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaFile {
    /// Descriptor format version (always 2)
    pub version: u32,

    /// Per-model entries
    #[serde(default)]
    pub models: Vec<ModelSchema>,
}

impl SchemaFile {
    /// Parse a descriptor from YAML text
    pub fn parse(content: &str) -> CoreResult<Self> {
        let file: SchemaFile =
            serde_yaml::from_str(content).map_err(|e| CoreError::SchemaParse {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?;
        if file.version != 2 {
            return Err(CoreError::UnsupportedSchemaVersion {
                version: file.version,
            });
        }
        Ok(file)
    }

    /// Load a descriptor from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::parse(&content).map_err(|e| match e {
            CoreError::SchemaParse { message, .. } => CoreError::SchemaParse {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })
    }
}

/// Schema entry for a single model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSchema {
    /// Model name (matches the SQL file stem)
    pub name: String,

    /// Model description
    #[serde(default)]
    pub description: Option<String>,

    /// Per-model config overrides
    #[serde(default)]
    pub config: Option<ModelConfig>,

    /// Ordered column declarations
    #[serde(default)]
    pub columns: Vec<ColumnDef>,
}

impl ModelSchema {
    /// Check if this model has an enforced contract
    pub fn has_enforced_contract(&self) -> bool {
        self.config
            .as_ref()
            .and_then(|c| c.contract.as_ref())
            .map(|c| c.enforced)
            .unwrap_or(false)
    }

    /// Column names in declared order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

/// Per-model config from the descriptor's `config:` block
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Materialization override
    #[serde(default)]
    pub materialized: Option<Materialization>,

    /// Contract definition
    #[serde(default)]
    pub contract: Option<ContractConfig>,

    /// Schema-drift behavior for incremental models
    #[serde(default)]
    pub on_schema_change: Option<OnSchemaChange>,

    /// Upsert key for incremental merge
    #[serde(default)]
    pub unique_key: Option<String>,

    /// Table file format override
    #[serde(default)]
    pub file_format: Option<FileFormat>,

    /// Incremental strategy override
    #[serde(default)]
    pub incremental_strategy: Option<IncrementalStrategy>,
}

/// Contract definition for schema enforcement
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ContractConfig {
    /// Whether the contract is enforced (error on mismatch)
    #[serde(default)]
    pub enforced: bool,
}

/// Column declaration in a schema descriptor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Column name
    pub name: String,

    /// Declared SQL data type
    #[serde(default)]
    pub data_type: Option<String>,

    /// Column description
    #[serde(default)]
    pub description: Option<String>,

    /// Constraint declarations for this column
    #[serde(default)]
    pub constraints: Vec<ConstraintSpec>,
}

/// A single constraint declaration: `{type, name?, expression?}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintSpec {
    /// Constraint kind
    #[serde(rename = "type")]
    pub kind: ConstraintKind,

    /// Optional constraint name (e.g. `fk_n`)
    #[serde(default)]
    pub name: Option<String>,

    /// Kind-specific expression, e.g. `(id > 0)` for check constraints or
    /// `(n) REFERENCES other_schema.raw_numbers` for foreign keys
    #[serde(default)]
    pub expression: Option<String>,
}

/// Constraint kinds accepted in column declarations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    /// Column must not contain NULL values
    NotNull,
    /// Column is the primary key
    PrimaryKey,
    /// Column references another relation
    ForeignKey,
    /// Row-level boolean expression
    Check,
    /// Column values must be unique
    Unique,
}

impl std::fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConstraintKind::NotNull => write!(f, "not_null"),
            ConstraintKind::PrimaryKey => write!(f, "primary_key"),
            ConstraintKind::ForeignKey => write!(f, "foreign_key"),
            ConstraintKind::Check => write!(f, "check"),
            ConstraintKind::Unique => write!(f, "unique"),
        }
    }
}

#[cfg(test)]
#[path = "schema_test.rs"]
mod tests;
