//! Seed loading: CSV files into the project's seeds schema.

use crate::error::RunResult;
use lf_core::sql_utils::qualified_name;
use lf_core::Project;
use lf_db::Database;
use std::sync::Arc;

/// Load every seed CSV into the seeds schema, replacing existing tables.
///
/// Seeds land in `<schema>_<suffix>` when the project's `seeds:` block sets
/// a `+schema` suffix, otherwise in the project schema itself. Returns the
/// loaded seed names.
pub async fn run_seeds(db: &Arc<dyn Database>, project: &Project) -> RunResult<Vec<String>> {
    let schema = project.config.seeds_schema();
    db.create_schema_if_not_exists(&schema).await?;

    let mut loaded = Vec::with_capacity(project.seeds.len());
    for seed in &project.seeds {
        let qualified = qualified_name(&schema, &seed.name);
        db.load_csv(&qualified, &seed.path.display().to_string())
            .await?;
        log::info!("seeded {} from {}", qualified, seed.path.display());
        loaded.push(seed.name.clone());
    }
    Ok(loaded)
}
