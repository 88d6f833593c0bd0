//! Foreign-key propagation suite: an enforced contract with a foreign key
//! on the downstream model must survive the upstream build and two
//! downstream runs, the second exercising the incremental upsert with an
//! unchanged constraint.

use crate::fixtures::format_schema;
use crate::project::TestProjectBuilder;

/// Run the two-model pipeline: raw_numbers once, stg_numbers twice.
///
/// The descriptor's `{schema}` placeholder is substituted with the live
/// scratch schema before the first run, since the foreign-key expression
/// must reference a fully qualified relation.
pub async fn verify_incremental_foreign_key_constraint(
    schema_yml: &str,
    raw_numbers_sql: &str,
    stg_numbers_sql: &str,
) {
    let project = TestProjectBuilder::new("incremental_foreign_key")
        .model("schema.yml", schema_yml)
        .model("raw_numbers.sql", raw_numbers_sql)
        .model("stg_numbers.sql", stg_numbers_sql)
        .build();

    let unformatted = project.read_model("schema.yml");
    project.write_model("schema.yml", &format_schema(&unformatted, project.schema()));

    project.run(&["raw_numbers"]).await.unwrap();
    project.run(&["stg_numbers"]).await.unwrap();
    project.run(&["stg_numbers"]).await.unwrap();
}
