//! Sequential model execution over an explicit selection list.

use crate::compile::{compile_model, CompiledModel};
use crate::constraints::enforce_on_table;
use crate::error::RunResult;
use crate::incremental::execute_existing;
use chrono::{DateTime, Utc};
use lf_core::config::Materialization;
use lf_core::Project;
use lf_db::Database;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

/// Options for a run
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Drop and recreate incremental models
    pub full_refresh: bool,
}

/// Outcome of a single model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// Model materialized and its constraints held
    Success,
    /// Model failed (the run stops at the first failure)
    Error,
}

/// Per-model run record
#[derive(Debug, Clone, Serialize)]
pub struct ModelRunResult {
    /// Model name
    pub model: String,
    /// Materialization that ran
    pub materialization: String,
    /// Outcome
    pub status: RunStatus,
    /// Wall-clock duration
    pub duration_secs: f64,
}

/// Summary of a completed run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// When the run finished
    pub timestamp: DateTime<Utc>,
    /// Total elapsed time
    pub elapsed_secs: f64,
    /// Per-model results, in execution order
    pub results: Vec<ModelRunResult>,
}

impl RunSummary {
    /// Number of models that ran successfully
    pub fn success_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.status == RunStatus::Success)
            .count()
    }
}

/// Run the selected models sequentially, stopping at the first failure.
///
/// The project's target schema is created if missing. Each model is
/// compiled (rendered, contract-checked) and materialized, and the SQL of
/// its primary statement is archived to `target/run/<model>.sql`.
pub async fn run_models(
    db: &Arc<dyn Database>,
    project: &Project,
    select: &[&str],
    options: &RunOptions,
) -> RunResult<RunSummary> {
    let run_start = Instant::now();
    db.create_schema_if_not_exists(&project.config.schema)
        .await?;

    let mut results = Vec::with_capacity(select.len());
    for name in select {
        let model_start = Instant::now();
        let compiled = compile_model(db, project, name, options.full_refresh).await?;

        log::info!(
            "running {} ({}, {})",
            name,
            compiled.materialization,
            compiled.file_format
        );
        run_single_model(db, project, &compiled, options).await?;

        results.push(ModelRunResult {
            model: name.to_string(),
            materialization: compiled.materialization.to_string(),
            status: RunStatus::Success,
            duration_secs: model_start.elapsed().as_secs_f64(),
        });
    }

    Ok(RunSummary {
        timestamp: Utc::now(),
        elapsed_secs: run_start.elapsed().as_secs_f64(),
        results,
    })
}

/// Materialize one compiled model and apply its constraints.
async fn run_single_model(
    db: &Arc<dyn Database>,
    project: &Project,
    compiled: &CompiledModel,
    options: &RunOptions,
) -> RunResult<()> {
    let qualified = compiled.qualified_name();

    match compiled.materialization {
        Materialization::View => {
            let sql = compiled.create_sql();
            write_run_artifact(project, &compiled.name, &sql)?;
            db.execute_batch(&sql).await?;
        }
        Materialization::Table => {
            let sql = compiled.create_sql();
            write_run_artifact(project, &compiled.name, &sql)?;
            db.execute_batch(&sql).await?;
            // Constraints land after the replace has already happened; on
            // violation the new data is what remains visible.
            enforce_on_table(db, &qualified, &compiled.columns).await?;
        }
        Materialization::Incremental => {
            let exists = db
                .relation_exists(&compiled.schema, &compiled.name)
                .await?;
            if !exists || options.full_refresh {
                let sql = compiled.create_sql();
                write_run_artifact(project, &compiled.name, &sql)?;
                db.execute_batch(&sql).await?;
                enforce_on_table(db, &qualified, &compiled.columns).await?;
            } else {
                let sql = execute_existing(db, compiled).await?;
                write_run_artifact(project, &compiled.name, &sql)?;
            }
        }
    }

    Ok(())
}

/// Archive the primary statement of a model run to `target/run/<model>.sql`
fn write_run_artifact(project: &Project, model: &str, sql: &str) -> RunResult<()> {
    let path = project.run_artifact_path(model);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(lf_core::CoreError::Io)?;
    }
    std::fs::write(&path, sql).map_err(lf_core::CoreError::Io)?;
    Ok(())
}

#[cfg(test)]
#[path = "execute_test.rs"]
mod tests;
