//! Rollback suite: a constraint-violating rewrite must fail the run, and
//! what remains visible afterwards depends on the materialization. Tables
//! are replaced before constraints land, so the bad data survives; staged
//! increments are rejected before the target is touched, so the prior row
//! survives.

use crate::project::{TestProject, TestProjectBuilder};
use crate::util::assert_any_message;
use lf_core::sql_utils::qualified_name;

/// Parametrization of the rollback suite
pub struct RollbackSpec {
    /// Healthy model SQL (written as my_model.sql)
    pub model_sql: &'static str,
    /// Rewrite violating both the check and not-null constraints on `id`
    pub null_model_sql: &'static str,
    /// Dialect-transformed constraints descriptor
    pub schema_yml: String,
    /// Engine-specific violation substrings, matched with ANY semantics
    pub expected_error_messages: Vec<&'static str>,
    /// Color visible after the failed run: the new value when the engine
    /// cannot roll back, the prior value when the increment never landed
    pub expected_color: &'static str,
}

/// Seed a good row, rewrite the model to violate its constraints, run, and
/// assert both the failure wording and the table's observable state.
pub async fn verify_constraints_rollback(spec: &RollbackSpec) {
    let project = TestProjectBuilder::new("constraints_rollback")
        .delta_file_format()
        .model("my_model.sql", spec.model_sql)
        .model("constraints_schema.yml", &spec.schema_yml)
        .build();

    let summary = project.run(&["my_model"]).await.unwrap();
    assert_eq!(summary.success_count(), 1);
    assert_eq!(colors(&project).await, vec!["blue".to_string()]);

    project.write_model("my_model.sql", spec.null_model_sql);
    let error = project.run_expect_failure(&["my_model"]).await;

    // ANY instead of ALL: the check constraint is applied before the
    // not-null constraint, and the two execution paths word their
    // violations differently
    assert_any_message(&error, &spec.expected_error_messages);

    assert_eq!(
        colors(&project).await,
        vec![spec.expected_color.to_string()]
    );
}

async fn colors(project: &TestProject) -> Vec<String> {
    project
        .query_strings(&format!(
            "SELECT color FROM {}",
            qualified_name(project.schema(), "my_model")
        ))
        .await
}
