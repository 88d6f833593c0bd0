//! Database trait definition

use crate::error::DbResult;
use async_trait::async_trait;

/// Kind of relation in a schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    /// A base table
    Table,
    /// A view
    View,
}

impl std::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelationKind::Table => write!(f, "table"),
            RelationKind::View => write!(f, "view"),
        }
    }
}

/// A relation discovered in a schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    /// Unquoted relation name
    pub name: String,
    /// Table or view
    pub kind: RelationKind,
}

/// Database abstraction trait for Lakeflow.
///
/// Methods that interpolate a relation name into SQL expect an
/// already-quoted qualified name (see `lf_core::sql_utils::qualified_name`);
/// introspection methods take raw, unquoted schema/table parts.
///
/// Implementations must be Send + Sync for async operation.
#[async_trait]
pub trait Database: Send + Sync {
    /// Execute SQL that modifies data, returns affected rows
    async fn execute(&self, sql: &str) -> DbResult<usize>;

    /// Execute multiple SQL statements
    async fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Count the rows a SELECT produces
    async fn query_count(&self, sql: &str) -> DbResult<usize>;

    /// Return the first column of each row as a string (NULL becomes "NULL")
    async fn query_strings(&self, sql: &str) -> DbResult<Vec<String>>;

    /// Column (name, type) sequence a query would return, in output order
    async fn describe_query(&self, sql: &str) -> DbResult<Vec<(String, String)>>;

    /// Column (name, type) sequence of a live table, in ordinal order
    async fn get_table_schema(&self, schema: &str, table: &str)
        -> DbResult<Vec<(String, String)>>;

    /// Check if a table or view exists
    async fn relation_exists(&self, schema: &str, table: &str) -> DbResult<bool>;

    /// List all relations in a schema
    async fn list_relations(&self, schema: &str) -> DbResult<Vec<Relation>>;

    /// ALTER a table to add the given (name, type) columns
    async fn add_columns(&self, qualified: &str, columns: &[(String, String)]) -> DbResult<()>;

    /// Upsert the rows of `select` into a table on the given key columns
    async fn merge_into(&self, qualified: &str, select: &str, unique_keys: &[String])
        -> DbResult<()>;

    /// Create a schema if it does not exist
    async fn create_schema_if_not_exists(&self, schema: &str) -> DbResult<()>;

    /// Drop a schema and everything in it; succeeds if the schema is absent
    async fn drop_schema(&self, schema: &str) -> DbResult<()>;

    /// Drop a table or view if it exists
    async fn drop_if_exists(&self, qualified: &str) -> DbResult<()>;

    /// Load a CSV file into a table, inferring column types
    async fn load_csv(&self, qualified: &str, path: &str) -> DbResult<()>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}
