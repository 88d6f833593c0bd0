//! Clone suite: a built environment can be cloned into a second schema with
//! relation kinds preserved, and every scratch schema involved can be
//! dropped afterwards.

use crate::project::TestProjectBuilder;
use lf_db::RelationKind;

/// Parametrization of the clone suite
pub struct CloneSpec {
    /// Seed CSV content (written as base_seed.csv)
    pub seed_csv: &'static str,
    /// Table model SQL (written as table_model.sql)
    pub table_model_sql: &'static str,
    /// View model SQL (written as view_model.sql)
    pub view_model_sql: &'static str,
}

/// Seed and build the source environment, clone both its schemas, assert
/// relation kinds survive, then drop every schema explicitly in teardown.
pub async fn verify_clone_possible(spec: &CloneSpec) {
    let project = TestProjectBuilder::new("clone_possible")
        .seeds_schema("seeds")
        .seed("base_seed.csv", spec.seed_csv)
        .model("table_model.sql", spec.table_model_sql)
        .model("view_model.sql", spec.view_model_sql)
        .build();

    project.seed().await.unwrap();
    project.run(&["table_model", "view_model"]).await.unwrap();

    let target = format!("{}_clone", project.schema());
    let cloned = project.clone_to(project.schema(), &target).await.unwrap();
    assert_eq!(cloned.len(), 2);

    let relations = project.db().list_relations(&target).await.unwrap();
    let kind_of = |name: &str| {
        relations
            .iter()
            .find(|r| r.name == name)
            .unwrap_or_else(|| panic!("relation '{}' missing from clone target", name))
            .kind
    };
    assert_eq!(kind_of("table_model"), RelationKind::Table);
    assert_eq!(kind_of("view_model"), RelationKind::View);

    // seeds clone as plain tables
    let seeds_schema = project.seeds_schema();
    let seeds_target = format!("{}_seeds", target);
    let cloned_seeds = project.clone_to(&seeds_schema, &seeds_target).await.unwrap();
    assert_eq!(cloned_seeds.len(), 1);
    assert_eq!(cloned_seeds[0].kind, RelationKind::Table);

    // the shared harness does not drop per-test schemas on this engine, so
    // teardown is explicit here, seeds schema first
    project.drop_schema(&seeds_schema).await;
    project.drop_schema(project.schema()).await;
    project.drop_schema(&seeds_target).await;
    project.drop_schema(&target).await;
}
