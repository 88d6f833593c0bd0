//! Run command implementation

use crate::cli::{GlobalArgs, OutputFormat, RunArgs};
use crate::commands::common::{connect, load_project};
use anyhow::Result;
use lf_run::{run_models, RunOptions};

/// Execute the run command
pub async fn execute(args: &RunArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let db = connect(&project)?;

    let selected: Vec<String> = match &args.select {
        Some(list) => list
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        None => project.models.keys().cloned().collect(),
    };
    let select: Vec<&str> = selected.iter().map(String::as_str).collect();

    let options = RunOptions {
        full_refresh: args.full_refresh,
    };

    match run_models(&db, &project, &select, &options).await {
        Ok(summary) => {
            if args.output == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                for result in &summary.results {
                    println!(
                        "  \u{2713} {} ({}) [{}ms]",
                        result.model,
                        result.materialization,
                        (result.duration_secs * 1000.0) as u64
                    );
                }
                println!(
                    "\nCompleted {} model(s) in {:.2}s",
                    summary.success_count(),
                    summary.elapsed_secs
                );
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("  \u{2717} run failed: {}", e);
            Err(e.into())
        }
    }
}
