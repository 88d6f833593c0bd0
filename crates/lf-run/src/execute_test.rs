use super::*;
use crate::clone_op::clone_schema;
use crate::error::RunError;
use crate::seed::run_seeds;
use lf_db::{DuckDbBackend, RelationKind};
use tempfile::TempDir;

struct Harness {
    _dir: TempDir,
    root: std::path::PathBuf,
    db: Arc<dyn Database>,
}

impl Harness {
    fn new(config_extra: &str, files: &[(&str, &str)]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("lakeflow.yml"),
            format!("name: t\nschema: scratch\n{}", config_extra),
        )
        .unwrap();
        let models = dir.path().join("models");
        std::fs::create_dir_all(&models).unwrap();
        for (file, content) in files {
            std::fs::write(models.join(file), content).unwrap();
        }
        Self {
            root: dir.path().to_path_buf(),
            _dir: dir,
            db: Arc::new(DuckDbBackend::in_memory().unwrap()),
        }
    }

    fn write_model(&self, file: &str, content: &str) {
        std::fs::write(self.root.join("models").join(file), content).unwrap();
    }

    async fn run(&self, select: &[&str]) -> RunResult<RunSummary> {
        let project = Project::load(&self.root).unwrap();
        run_models(&self.db, &project, select, &RunOptions::default()).await
    }
}

#[tokio::test]
async fn test_run_table_model() {
    let h = Harness::new(
        "",
        &[("m.sql", "{{ config(materialized='table') }}select 1 as id")],
    );
    let summary = h.run(&["m"]).await.unwrap();

    assert_eq!(summary.success_count(), 1);
    assert_eq!(summary.results[0].materialization, "table");
    assert!(h.db.relation_exists("scratch", "m").await.unwrap());
}

#[tokio::test]
async fn test_run_view_model() {
    let h = Harness::new("", &[("v.sql", "select 1 as id")]);
    h.run(&["v"]).await.unwrap();

    let relations = h.db.list_relations("scratch").await.unwrap();
    assert_eq!(relations[0].kind, RelationKind::View);
}

#[tokio::test]
async fn test_run_artifact_matches_executed_sql() {
    let h = Harness::new(
        "models:\n  +file_format: delta\n",
        &[("m.sql", "{{ config(materialized='table') }}select 1 as id")],
    );
    h.run(&["m"]).await.unwrap();

    let artifact =
        std::fs::read_to_string(h.root.join("target").join("run").join("m.sql")).unwrap();
    assert!(artifact.starts_with("-- materialization: table, file_format: delta"));
    assert!(artifact.contains("create or replace table \"scratch\".\"m\" as"));
}

#[tokio::test]
async fn test_table_violation_leaves_new_data_visible() {
    let schema_yml = r#"
version: 2
models:
  - name: m
    config:
      contract:
        enforced: true
      materialized: table
    columns:
      - name: id
        data_type: integer
        constraints:
          - type: not_null
          - type: check
            expression: (id > 0)
      - name: color
        data_type: varchar
"#;
    let h = Harness::new(
        "",
        &[
            ("m.sql", "select 1 as id, 'blue' as color"),
            ("schema.yml", schema_yml),
        ],
    );
    h.run(&["m"]).await.unwrap();

    h.write_model("m.sql", "select cast(null as integer) as id, 'red' as color");
    let err = h.run(&["m"]).await.unwrap_err();
    assert!(err.to_string().contains("violate the new CHECK constraint"));

    // the replace happened before enforcement: the bad row is what remains
    let colors = h
        .db
        .query_strings("SELECT color FROM scratch.m")
        .await
        .unwrap();
    assert_eq!(colors, vec!["red".to_string()]);
}

#[tokio::test]
async fn test_incremental_violation_preserves_target() {
    let schema_yml = r#"
version: 2
models:
  - name: m
    config:
      contract:
        enforced: true
      materialized: incremental
    columns:
      - name: id
        data_type: integer
        constraints:
          - type: not_null
          - type: check
            expression: (id > 0)
      - name: color
        data_type: varchar
"#;
    let h = Harness::new(
        "",
        &[
            ("m.sql", "select 1 as id, 'blue' as color"),
            ("schema.yml", schema_yml),
        ],
    );
    h.run(&["m"]).await.unwrap();

    h.write_model("m.sql", "select cast(null as integer) as id, 'red' as color");
    let err = h.run(&["m"]).await.unwrap_err();
    assert!(err.to_string().contains("violated"));

    // the staged increment was rejected before reaching the target
    let colors = h
        .db
        .query_strings("SELECT color FROM scratch.m")
        .await
        .unwrap();
    assert_eq!(colors, vec!["blue".to_string()]);
}

#[tokio::test]
async fn test_incremental_append_grows_table() {
    let h = Harness::new(
        "",
        &[(
            "m.sql",
            "{{ config(materialized='incremental') }}select 1 as id",
        )],
    );
    h.run(&["m"]).await.unwrap();
    h.run(&["m"]).await.unwrap();

    let count = h.db.query_count("SELECT * FROM scratch.m").await.unwrap();
    assert_eq!(count, 2);
}

#[tokio::test]
async fn test_incremental_merge_is_idempotent() {
    let h = Harness::new(
        "",
        &[(
            "m.sql",
            "{{ config(materialized='incremental', unique_key='id') }}select 1 as id, 'blue' as color",
        )],
    );
    h.run(&["m"]).await.unwrap();
    h.run(&["m"]).await.unwrap();

    let count = h.db.query_count("SELECT * FROM scratch.m").await.unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_run_stops_at_first_failure() {
    let h = Harness::new(
        "",
        &[
            ("bad.sql", "select broken syntax from"),
            ("good.sql", "select 1 as id"),
        ],
    );
    let err = h.run(&["bad", "good"]).await.unwrap_err();
    assert!(matches!(err, RunError::Db(_)));
    assert!(!h.db.relation_exists("scratch", "good").await.unwrap());
}

#[tokio::test]
async fn test_missing_model_is_an_error() {
    let h = Harness::new("", &[("m.sql", "select 1 as id")]);
    let err = h.run(&["absent"]).await.unwrap_err();
    assert!(err.to_string().contains("Model not found"));
}

#[tokio::test]
async fn test_seeds_land_in_suffixed_schema() {
    let h = Harness::new("seeds:\n  +schema: seeds\n", &[]);
    let seeds_dir = h.root.join("seeds");
    std::fs::create_dir_all(&seeds_dir).unwrap();
    std::fs::write(seeds_dir.join("numbers.csv"), "n\n1\n2\n3\n").unwrap();

    let project = Project::load(&h.root).unwrap();
    let loaded = run_seeds(&h.db, &project).await.unwrap();

    assert_eq!(loaded, vec!["numbers".to_string()]);
    assert_eq!(
        h.db.query_count("SELECT * FROM scratch_seeds.numbers")
            .await
            .unwrap(),
        3
    );
}

#[tokio::test]
async fn test_clone_preserves_relation_kinds() {
    let h = Harness::new(
        "",
        &[
            ("base.sql", "{{ config(materialized='table') }}select 1 as id"),
            ("v.sql", "select * from {{ ref('base') }}"),
        ],
    );
    h.run(&["base", "v"]).await.unwrap();

    let cloned = clone_schema(&h.db, "scratch", "scratch_cloned").await.unwrap();
    assert_eq!(cloned.len(), 2);

    let relations = h.db.list_relations("scratch_cloned").await.unwrap();
    assert_eq!(relations.len(), 2);
    assert_eq!(relations[0].name, "base");
    assert_eq!(relations[0].kind, RelationKind::Table);
    assert_eq!(relations[1].name, "v");
    assert_eq!(relations[1].kind, RelationKind::View);
}

#[tokio::test]
async fn test_clone_empty_schema_fails() {
    let h = Harness::new("", &[]);
    h.db.create_schema_if_not_exists("empty").await.unwrap();
    let err = clone_schema(&h.db, "empty", "elsewhere").await.unwrap_err();
    assert!(matches!(err, RunError::CloneFailed { .. }));
}
