//! Configuration types and parsing for lakeflow.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

/// Name of the project configuration file
pub const CONFIG_FILE: &str = "lakeflow.yml";

/// Main project configuration from lakeflow.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Project name
    pub name: String,

    /// Project version
    #[serde(default = "default_version")]
    pub version: String,

    /// Directories containing model SQL files and schema descriptors
    #[serde(default = "default_model_paths")]
    pub model_paths: Vec<String>,

    /// Directories containing seed CSV files
    #[serde(default = "default_seed_paths")]
    pub seed_paths: Vec<String>,

    /// Output directory for run artifacts
    #[serde(default = "default_target_path")]
    pub target_path: String,

    /// Target schema for models
    #[serde(default = "default_schema")]
    pub schema: String,

    /// Database connection configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Project-level config applied to every model
    #[serde(default)]
    pub models: ModelsConfig,

    /// Project-level config applied to every seed
    #[serde(default)]
    pub seeds: SeedsConfig,

    /// Variables available in templates via var()
    #[serde(default)]
    pub vars: HashMap<String, serde_yaml::Value>,
}

impl Config {
    /// Load configuration from `<project_dir>/lakeflow.yml`
    pub fn load(project_dir: &Path) -> CoreResult<Self> {
        let path = project_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(&path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config =
            serde_yaml::from_str(&content).map_err(|e| CoreError::ConfigParse {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        if config.name.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "project name must not be empty".to_string(),
            });
        }
        Ok(config)
    }

    /// Resolve the database path relative to the project directory.
    ///
    /// `:memory:` is passed through untouched; absolute paths are kept.
    pub fn database_path(&self, project_dir: &Path) -> String {
        let raw = &self.database.path;
        if raw == ":memory:" || Path::new(raw).is_absolute() {
            raw.clone()
        } else {
            project_dir.join(raw).display().to_string()
        }
    }

    /// Schema into which seeds are loaded: the project schema, plus the
    /// `+schema` suffix from the seeds config block when present.
    pub fn seeds_schema(&self) -> String {
        match &self.seeds.schema {
            Some(suffix) => format!("{}_{}", self.schema, suffix),
            None => self.schema.clone(),
        }
    }
}

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database path (file-based, or :memory:)
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Project-level model config block.
///
/// Keys use the `+` prefix convention, e.g.:
///
/// ```yaml
/// models:
///   +file_format: delta
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelsConfig {
    /// Table file format for all models in the project
    #[serde(default, rename = "+file_format")]
    pub file_format: Option<FileFormat>,

    /// Default materialization for all models in the project
    #[serde(default, rename = "+materialized")]
    pub materialized: Option<Materialization>,
}

/// Project-level seed config block
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedsConfig {
    /// Schema suffix for seeds: seeds land in `<schema>_<suffix>`
    #[serde(default, rename = "+schema")]
    pub schema: Option<String>,
}

/// Materialization type for models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Materialization {
    /// Create a view
    #[default]
    View,
    /// Create a table
    Table,
    /// Merge or append into an existing table
    Incremental,
}

impl std::fmt::Display for Materialization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Materialization::View => write!(f, "view"),
            Materialization::Table => write!(f, "table"),
            Materialization::Incremental => write!(f, "incremental"),
        }
    }
}

impl FromStr for Materialization {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "view" => Ok(Materialization::View),
            "table" => Ok(Materialization::Table),
            "incremental" => Ok(Materialization::Incremental),
            other => Err(CoreError::ConfigInvalid {
                message: format!("unknown materialization '{}'", other),
            }),
        }
    }
}

/// Table file format.
///
/// `delta` marks the transactional lakehouse format: constraints are applied
/// after the relation is created, never inline in the CTAS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    /// Engine-native table
    #[default]
    Native,
    /// Transactional lakehouse table
    Delta,
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileFormat::Native => write!(f, "native"),
            FileFormat::Delta => write!(f, "delta"),
        }
    }
}

impl FromStr for FileFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "native" => Ok(FileFormat::Native),
            "delta" => Ok(FileFormat::Delta),
            other => Err(CoreError::ConfigInvalid {
                message: format!("unknown file format '{}'", other),
            }),
        }
    }
}

/// Incremental load strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncrementalStrategy {
    /// Insert all new rows
    Append,
    /// Upsert on unique_key
    Merge,
}

impl std::fmt::Display for IncrementalStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IncrementalStrategy::Append => write!(f, "append"),
            IncrementalStrategy::Merge => write!(f, "merge"),
        }
    }
}

impl FromStr for IncrementalStrategy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "append" => Ok(IncrementalStrategy::Append),
            "merge" => Ok(IncrementalStrategy::Merge),
            other => Err(CoreError::ConfigInvalid {
                message: format!("unknown incremental strategy '{}'", other),
            }),
        }
    }
}

/// What to do when an incremental model's query schema drifts from the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OnSchemaChange {
    /// Keep the existing table schema
    #[default]
    Ignore,
    /// Fail the run
    Fail,
    /// ALTER the table to add new columns
    AppendNewColumns,
}

impl FromStr for OnSchemaChange {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ignore" => Ok(OnSchemaChange::Ignore),
            "fail" => Ok(OnSchemaChange::Fail),
            "append_new_columns" => Ok(OnSchemaChange::AppendNewColumns),
            other => Err(CoreError::ConfigInvalid {
                message: format!("unknown on_schema_change '{}'", other),
            }),
        }
    }
}

fn default_version() -> String {
    "1.0.0".to_string()
}

fn default_model_paths() -> Vec<String> {
    vec!["models".to_string()]
}

fn default_seed_paths() -> Vec<String> {
    vec!["seeds".to_string()]
}

fn default_target_path() -> String {
    "target".to_string()
}

fn default_schema() -> String {
    "main".to_string()
}

fn default_db_path() -> String {
    ":memory:".to_string()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
