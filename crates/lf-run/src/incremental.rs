//! Incremental execution against an existing table.
//!
//! The increment is staged first, validated against the model's constraints,
//! and only then merged or appended. A violating increment therefore never
//! touches the target and the prior committed state stays visible, unlike
//! the unrecoverable replace on the table path.

use crate::compile::CompiledModel;
use crate::constraints::enforce_on_staged;
use crate::error::{RunError, RunResult};
use lf_core::config::{IncrementalStrategy, OnSchemaChange};
use lf_db::Database;
use std::sync::Arc;

/// Name of the session-local staging relation
const STAGING: &str = "lf_staging";

/// Run an incremental model whose target table already exists.
///
/// Returns the SQL text archived as the run artifact.
pub(crate) async fn execute_existing(
    db: &Arc<dyn Database>,
    compiled: &CompiledModel,
) -> RunResult<String> {
    let qualified = compiled.qualified_name();

    handle_schema_changes(db, compiled, &qualified).await?;

    let stage_sql = format!("CREATE OR REPLACE TEMP TABLE {} AS\n{}", STAGING, compiled.sql);
    db.execute(&stage_sql).await?;

    let outcome = async {
        enforce_on_staged(db, STAGING, &qualified, &compiled.columns).await?;

        let load_sql = match compiled.incremental_strategy {
            IncrementalStrategy::Merge => {
                let unique_key = compiled.unique_key.clone().ok_or_else(|| {
                    RunError::InvalidModelConfig {
                        model: compiled.name.clone(),
                        message: "merge strategy requires unique_key".to_string(),
                    }
                })?;
                db.merge_into(&qualified, &format!("SELECT * FROM {}", STAGING), &[unique_key.clone()])
                    .await?;
                format!(
                    "-- merge on {}\nINSERT INTO {} SELECT * FROM {}",
                    unique_key, qualified, STAGING
                )
            }
            IncrementalStrategy::Append => {
                let sql = format!("INSERT INTO {} SELECT * FROM {}", qualified, STAGING);
                db.execute(&sql).await?;
                sql
            }
        };
        Ok::<String, RunError>(load_sql)
    }
    .await;

    // the staging relation must not outlive the run, success or not
    let _ = db.execute(&format!("DROP TABLE IF EXISTS {}", STAGING)).await;

    let load_sql = outcome?;
    Ok(format!(
        "-- materialization: incremental, file_format: {}\n{};\n{}",
        compiled.file_format, stage_sql, load_sql
    ))
}

/// Compare the query's schema with the existing table and act per
/// on_schema_change.
async fn handle_schema_changes(
    db: &Arc<dyn Database>,
    compiled: &CompiledModel,
    qualified: &str,
) -> RunResult<()> {
    if compiled.on_schema_change == OnSchemaChange::Ignore {
        return Ok(());
    }

    let existing = db
        .get_table_schema(&compiled.schema, &compiled.name)
        .await?;
    let existing_names: std::collections::HashSet<String> =
        existing.iter().map(|(n, _)| n.to_lowercase()).collect();

    let new = db.describe_query(&compiled.sql).await?;
    let new_names: std::collections::HashSet<String> =
        new.iter().map(|(n, _)| n.to_lowercase()).collect();

    let added: Vec<(String, String)> = new
        .iter()
        .filter(|(n, _)| !existing_names.contains(&n.to_lowercase()))
        .cloned()
        .collect();
    let removed: Vec<String> = existing
        .iter()
        .filter(|(n, _)| !new_names.contains(&n.to_lowercase()))
        .map(|(n, _)| n.clone())
        .collect();

    if added.is_empty() && removed.is_empty() {
        return Ok(());
    }

    match compiled.on_schema_change {
        OnSchemaChange::Fail => Err(RunError::SchemaChange {
            model: compiled.name.clone(),
            message: describe_drift(&added, &removed),
        }),
        OnSchemaChange::AppendNewColumns => {
            if !added.is_empty() {
                log::info!(
                    "appending {} new column(s) to {}",
                    added.len(),
                    qualified
                );
                db.add_columns(qualified, &added).await?;
            }
            Ok(())
        }
        OnSchemaChange::Ignore => Ok(()),
    }
}

fn describe_drift(added: &[(String, String)], removed: &[String]) -> String {
    let mut message = String::new();
    if !added.is_empty() {
        message.push_str(&format!(
            "new columns: {}",
            added
                .iter()
                .map(|(n, t)| format!("{} ({})", n, t))
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }
    if !removed.is_empty() {
        if !message.is_empty() {
            message.push_str("; ");
        }
        message.push_str(&format!("removed columns: {}", removed.join(", ")));
    }
    message
}
