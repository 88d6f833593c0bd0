//! DDL enforcement suite: with the delta file format, the archived run SQL
//! must equal a literal expected template with no inline constraint clauses,
//! enforcement deferred to after creation.

use crate::project::TestProjectBuilder;
use crate::util::assert_sql_equal;
use lf_core::sql_utils::qualified_name;

/// Parametrization of the DDL enforcement suite
pub struct DdlEnforcementSpec {
    /// Model under test (written as my_model.sql)
    pub model_sql: &'static str,
    /// Dialect-transformed constraints descriptor
    pub schema_yml: String,
    /// Expected run SQL, with `<model_identifier>` standing in for the
    /// generated relation name
    pub expected_sql: &'static str,
}

/// Run the model with `+file_format: delta` and compare the archived run
/// SQL against the expected template, whitespace-normalized, after
/// substituting the generated identifier.
pub async fn verify_runtime_ddl_enforcement(spec: &DdlEnforcementSpec) {
    let project = TestProjectBuilder::new("constraints_ddl_enforcement")
        .delta_file_format()
        .model("my_model.sql", spec.model_sql)
        .model("constraints_schema.yml", &spec.schema_yml)
        .build();

    project.run(&["my_model"]).await.unwrap();

    let artifact = project.read_run_artifact("my_model");
    let identifier = qualified_name(project.schema(), "my_model");
    let generic = artifact.replace(&identifier, "<model_identifier>");

    assert_sql_equal(&generic, spec.expected_sql);
}
