//! Clone command implementation

use crate::cli::{CloneArgs, GlobalArgs};
use crate::commands::common::{connect, load_project};
use anyhow::Result;
use lf_run::clone_schema;

/// Execute the clone command
pub async fn execute(args: &CloneArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let db = connect(&project)?;

    let source = args
        .source_schema
        .clone()
        .unwrap_or_else(|| project.config.schema.clone());

    let cloned = clone_schema(&db, &source, &args.target_schema).await?;
    for relation in &cloned {
        println!("  \u{2713} cloned {} {}", relation.kind, relation.name);
    }
    println!(
        "\nCloned {} relation(s) from {} into {}",
        cloned.len(),
        source,
        args.target_schema
    );
    Ok(())
}
