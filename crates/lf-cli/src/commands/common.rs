//! Shared helpers for commands

use crate::cli::GlobalArgs;
use anyhow::{Context, Result};
use lf_core::Project;
use lf_db::{Database, DuckDbBackend};
use std::path::Path;
use std::sync::Arc;

/// Load the project named by --project-dir
pub fn load_project(global: &GlobalArgs) -> Result<Project> {
    Project::load(Path::new(&global.project_dir))
        .with_context(|| format!("failed to load project at '{}'", global.project_dir))
}

/// Open the project's database
pub fn connect(project: &Project) -> Result<Arc<dyn Database>> {
    let path = project.database_path();
    let db = DuckDbBackend::new(&path)
        .with_context(|| format!("failed to open database at '{}'", path))?;
    Ok(Arc::new(db))
}
