//! DuckDB database backend implementation

use crate::error::{DbError, DbResult};
use crate::traits::{Database, Relation, RelationKind};
use async_trait::async_trait;
use duckdb::{params, Connection};
use std::path::Path;
use std::sync::Mutex;

/// DuckDB database backend
pub struct DuckDbBackend {
    conn: Mutex<Connection>,
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path).map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    fn lock(&self) -> DbResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))
    }

    fn execute_sync(&self, sql: &str) -> DbResult<usize> {
        log::debug!("execute: {}", sql);
        let conn = self.lock()?;
        conn.execute(sql, [])
            .map_err(|e| DbError::ExecutionError(format!("{}: {}", e, sql)))
    }

    fn query_pairs_sync(&self, sql: &str, params: &[&str]) -> DbResult<Vec<(String, String)>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(sql).map_err(DbError::from)?;
        let rows = stmt
            .query_map(duckdb::params_from_iter(params.iter().copied()), |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })
            .map_err(DbError::from)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    }
}

#[async_trait]
impl Database for DuckDbBackend {
    async fn execute(&self, sql: &str) -> DbResult<usize> {
        self.execute_sync(sql)
    }

    async fn execute_batch(&self, sql: &str) -> DbResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(sql)
            .map_err(|e| DbError::ExecutionError(e.to_string()))
    }

    async fn query_count(&self, sql: &str) -> DbResult<usize> {
        let conn = self.lock()?;
        let count: i64 = conn
            .query_row(&format!("SELECT COUNT(*) FROM ({})", sql), [], |row| {
                row.get(0)
            })
            .map_err(DbError::from)?;
        Ok(count as usize)
    }

    async fn query_strings(&self, sql: &str) -> DbResult<Vec<String>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(sql).map_err(DbError::from)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(row
                    .get::<_, Option<String>>(0)?
                    .unwrap_or_else(|| "NULL".to_string()))
            })
            .map_err(DbError::from)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    }

    async fn describe_query(&self, sql: &str) -> DbResult<Vec<(String, String)>> {
        self.query_pairs_sync(&format!("DESCRIBE {}", sql), &[])
    }

    async fn get_table_schema(
        &self,
        schema: &str,
        table: &str,
    ) -> DbResult<Vec<(String, String)>> {
        self.query_pairs_sync(
            "SELECT column_name, data_type FROM information_schema.columns \
             WHERE table_schema = ? AND table_name = ? ORDER BY ordinal_position",
            &[schema, table],
        )
    }

    async fn relation_exists(&self, schema: &str, table: &str) -> DbResult<bool> {
        let conn = self.lock()?;
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM information_schema.tables \
                 WHERE table_schema = ? AND table_name = ?",
                params![schema, table],
                |row| row.get(0),
            )
            .map_err(DbError::from)?;
        Ok(count > 0)
    }

    async fn list_relations(&self, schema: &str) -> DbResult<Vec<Relation>> {
        let pairs = self.query_pairs_sync(
            "SELECT table_name, table_type FROM information_schema.tables \
             WHERE table_schema = ? ORDER BY table_name",
            &[schema],
        )?;
        Ok(pairs
            .into_iter()
            .map(|(name, table_type)| Relation {
                name,
                kind: if table_type == "VIEW" {
                    RelationKind::View
                } else {
                    RelationKind::Table
                },
            })
            .collect())
    }

    async fn add_columns(&self, qualified: &str, columns: &[(String, String)]) -> DbResult<()> {
        for (name, dtype) in columns {
            let sql = format!(
                "ALTER TABLE {} ADD COLUMN \"{}\" {}",
                qualified, name, dtype
            );
            self.execute_sync(&sql)?;
        }
        Ok(())
    }

    async fn merge_into(
        &self,
        qualified: &str,
        select: &str,
        unique_keys: &[String],
    ) -> DbResult<()> {
        if unique_keys.is_empty() {
            return Err(DbError::ExecutionError(
                "merge requires at least one unique key column".to_string(),
            ));
        }
        let key_match = unique_keys
            .iter()
            .map(|k| format!("t.\"{0}\" = s.\"{0}\"", k))
            .collect::<Vec<_>>()
            .join(" AND ");
        // DuckDB has no MERGE statement; delete-then-insert inside one batch
        // gives the same observable upsert
        let sql = format!(
            "CREATE OR REPLACE TEMP TABLE lf_merge_source AS {select};\n\
             DELETE FROM {qualified} AS t USING lf_merge_source AS s WHERE {key_match};\n\
             INSERT INTO {qualified} SELECT * FROM lf_merge_source;\n\
             DROP TABLE lf_merge_source;"
        );
        let conn = self.lock()?;
        conn.execute_batch(&sql)
            .map_err(|e| DbError::ExecutionError(e.to_string()))
    }

    async fn create_schema_if_not_exists(&self, schema: &str) -> DbResult<()> {
        self.execute_sync(&format!("CREATE SCHEMA IF NOT EXISTS \"{}\"", schema))?;
        Ok(())
    }

    async fn drop_schema(&self, schema: &str) -> DbResult<()> {
        self.execute_sync(&format!("DROP SCHEMA IF EXISTS \"{}\" CASCADE", schema))?;
        Ok(())
    }

    async fn drop_if_exists(&self, qualified: &str) -> DbResult<()> {
        // Try dropping as view first, then as table
        let _ = self.execute_sync(&format!("DROP VIEW IF EXISTS {}", qualified));
        let _ = self.execute_sync(&format!("DROP TABLE IF EXISTS {}", qualified));
        Ok(())
    }

    async fn load_csv(&self, qualified: &str, path: &str) -> DbResult<()> {
        let sql = format!(
            "CREATE OR REPLACE TABLE {} AS SELECT * FROM read_csv_auto('{}')",
            qualified,
            path.replace('\'', "''")
        );
        self.execute_sync(&sql)
            .map_err(|e| DbError::CsvError(e.to_string()))?;
        Ok(())
    }

    fn db_type(&self) -> &'static str {
        "duckdb"
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
