//! Seed command implementation

use crate::cli::{GlobalArgs, SeedArgs};
use crate::commands::common::{connect, load_project};
use anyhow::Result;
use lf_run::run_seeds;

/// Execute the seed command
pub async fn execute(_args: &SeedArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let db = connect(&project)?;

    let loaded = run_seeds(&db, &project).await?;
    for name in &loaded {
        println!("  \u{2713} seeded {}", name);
    }
    println!(
        "\nLoaded {} seed(s) into {}",
        loaded.len(),
        project.config.seeds_schema()
    );
    Ok(())
}
