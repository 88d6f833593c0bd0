//! Model compilation: render, resolve config, gate through the contract
//! check, and wrap the body so materialized column order follows the contract.

use crate::error::{RunError, RunResult};
use lf_core::config::{FileFormat, IncrementalStrategy, Materialization, OnSchemaChange};
use lf_core::contract::{format_mismatches, verify_columns};
use lf_core::schema::ColumnDef;
use lf_core::sql_utils::qualified_name;
use lf_core::Project;
use lf_db::Database;
use lf_jinja::{IncrementalState, JinjaEnvironment, RenderContext};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

/// Captured `{{ config(...) }}` values from a render
type ConfigMap = HashMap<String, minijinja::Value>;

/// A model after rendering and contract checking, ready to materialize
#[derive(Debug, Clone)]
pub struct CompiledModel {
    /// Model name
    pub name: String,
    /// Target schema
    pub schema: String,
    /// Resolved materialization
    pub materialization: Materialization,
    /// Resolved table file format
    pub file_format: FileFormat,
    /// Whether the contract is enforced
    pub contract_enforced: bool,
    /// Upsert key for incremental merge
    pub unique_key: Option<String>,
    /// Schema-drift behavior
    pub on_schema_change: OnSchemaChange,
    /// Incremental strategy
    pub incremental_strategy: IncrementalStrategy,
    /// Declared columns (empty when the model has no schema entry)
    pub columns: Vec<ColumnDef>,
    /// Final SELECT (wrapped in the contract projection when enforced)
    pub sql: String,
}

impl CompiledModel {
    /// Quoted, schema-qualified relation name
    pub fn qualified_name(&self) -> String {
        qualified_name(&self.schema, &self.name)
    }

    /// The create statement executed (and archived as the run artifact) when
    /// this model is (re)created from scratch.
    pub fn create_sql(&self) -> String {
        let header = format!(
            "-- materialization: {}, file_format: {}",
            self.materialization, self.file_format
        );
        let relation = match self.materialization {
            Materialization::View => "view",
            Materialization::Table | Materialization::Incremental => "table",
        };
        format!(
            "{}\ncreate or replace {} {} as\n{}",
            header,
            relation,
            self.qualified_name(),
            self.sql
        )
    }
}

/// Compile one model: render its SQL, resolve config precedence, and when
/// the contract is enforced, verify the query's columns against it.
pub async fn compile_model(
    db: &Arc<dyn Database>,
    project: &Project,
    name: &str,
    full_refresh: bool,
) -> RunResult<CompiledModel> {
    let model = project.get_model(name)?;
    let schema = project.config.schema.clone();
    let model_schema = project.schema_for(name);

    let relation_exists = db.relation_exists(&schema, name).await?;

    // First render pass captures config() so the materialization is known;
    // templates using is_incremental() are re-rendered below once the
    // incremental state can be computed.
    let base_ctx = RenderContext {
        schema: schema.clone(),
        model: name.to_string(),
        vars: project.config.vars.clone(),
        incremental: IncrementalState::default(),
    };
    let env = JinjaEnvironment::for_model(&base_ctx);
    let (mut rendered, captured) =
        env.render_with_config(&model.raw_sql)
            .map_err(|e| RunError::Render {
                model: name.to_string(),
                source: e,
            })?;

    let resolved = resolve_config(project, name, model_schema, &captured)?;

    if resolved.materialization == Materialization::Incremental {
        let ctx = RenderContext {
            incremental: IncrementalState {
                is_incremental_model: true,
                relation_exists,
                full_refresh,
            },
            ..base_ctx
        };
        let env = JinjaEnvironment::for_model(&ctx);
        rendered = env.render(&model.raw_sql).map_err(|e| RunError::Render {
            model: name.to_string(),
            source: e,
        })?;
    }

    let columns: Vec<ColumnDef> = model_schema.map(|s| s.columns.clone()).unwrap_or_default();
    let contract_enforced = model_schema
        .map(|s| s.has_enforced_contract())
        .unwrap_or(false);

    let sql = if contract_enforced && !columns.is_empty() {
        let actual = db.describe_query(&rendered).await?;
        let mismatches = verify_columns(&columns, &actual);
        if !mismatches.is_empty() {
            return Err(RunError::ContractMismatch {
                model: name.to_string(),
                report: format_mismatches(name, &mismatches),
            });
        }
        wrap_contract_sql(&columns, &rendered)
    } else {
        rendered.trim().to_string()
    };

    Ok(CompiledModel {
        name: name.to_string(),
        schema,
        materialization: resolved.materialization,
        file_format: resolved.file_format,
        contract_enforced,
        unique_key: resolved.unique_key,
        on_schema_change: resolved.on_schema_change,
        incremental_strategy: resolved.incremental_strategy,
        columns,
        sql,
    })
}

/// Project the body through the contract's columns so the materialized
/// relation always carries them in declared order.
fn wrap_contract_sql(columns: &[ColumnDef], body: &str) -> String {
    let cols = columns
        .iter()
        .map(|c| format!("  {}", c.name))
        .collect::<Vec<_>>()
        .join(",\n");
    format!("select\n{}\nfrom\n( {} ) as model_subq", cols, body.trim())
}

struct ResolvedConfig {
    materialization: Materialization,
    file_format: FileFormat,
    unique_key: Option<String>,
    on_schema_change: OnSchemaChange,
    incremental_strategy: IncrementalStrategy,
}

/// Config precedence: `{{ config() }}` in SQL > schema descriptor `config:`
/// > project-level `models:` block > defaults.
fn resolve_config(
    project: &Project,
    name: &str,
    model_schema: Option<&lf_core::ModelSchema>,
    captured: &ConfigMap,
) -> RunResult<ResolvedConfig> {
    let yaml = model_schema.and_then(|s| s.config.as_ref());

    let mut materialization = project
        .config
        .models
        .materialized
        .unwrap_or(Materialization::View);
    let mut file_format = project
        .config
        .models
        .file_format
        .unwrap_or(FileFormat::Native);
    let mut unique_key = None;
    let mut on_schema_change = OnSchemaChange::Ignore;
    let mut incremental_strategy = None;

    if let Some(config) = yaml {
        if let Some(m) = config.materialized {
            materialization = m;
        }
        if let Some(f) = config.file_format {
            file_format = f;
        }
        if let Some(k) = &config.unique_key {
            unique_key = Some(k.clone());
        }
        if let Some(osc) = config.on_schema_change {
            on_schema_change = osc;
        }
        if let Some(s) = config.incremental_strategy {
            incremental_strategy = Some(s);
        }
    }

    if let Some(value) = captured_str(captured, "materialized") {
        materialization = Materialization::from_str(&value).map_err(|e| bad_config(name, e))?;
    }
    if let Some(value) = captured_str(captured, "file_format") {
        file_format = FileFormat::from_str(&value).map_err(|e| bad_config(name, e))?;
    }
    if let Some(value) = captured_str(captured, "unique_key") {
        unique_key = Some(value);
    }
    if let Some(value) = captured_str(captured, "on_schema_change") {
        on_schema_change = OnSchemaChange::from_str(&value).map_err(|e| bad_config(name, e))?;
    }
    if let Some(value) = captured_str(captured, "incremental_strategy") {
        incremental_strategy =
            Some(IncrementalStrategy::from_str(&value).map_err(|e| bad_config(name, e))?);
    }

    // with a unique_key the natural incremental behavior is an upsert
    let incremental_strategy = incremental_strategy.unwrap_or(if unique_key.is_some() {
        IncrementalStrategy::Merge
    } else {
        IncrementalStrategy::Append
    });

    Ok(ResolvedConfig {
        materialization,
        file_format,
        unique_key,
        on_schema_change,
        incremental_strategy,
    })
}

fn captured_str(captured: &ConfigMap, key: &str) -> Option<String> {
    captured
        .get(key)
        .and_then(|v| v.as_str().map(String::from))
}

fn bad_config(model: &str, err: lf_core::CoreError) -> RunError {
    RunError::InvalidModelConfig {
        model: model.to_string(),
        message: err.to_string(),
    }
}

#[cfg(test)]
#[path = "compile_test.rs"]
mod tests;
