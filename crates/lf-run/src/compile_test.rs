use super::*;
use lf_core::Project;
use lf_db::DuckDbBackend;
use tempfile::TempDir;

fn scratch_project(config_extra: &str, files: &[(&str, &str)]) -> (TempDir, Project) {
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
    let project = Project::load(dir.path()).unwrap();
    (dir, project)
}

fn db() -> Arc<dyn Database> {
    Arc::new(DuckDbBackend::in_memory().unwrap())
}

#[tokio::test]
async fn test_defaults_to_view() {
    let (_dir, project) = scratch_project("", &[("m.sql", "select 1 as id")]);
    let compiled = compile_model(&db(), &project, "m", false).await.unwrap();

    assert_eq!(compiled.materialization, Materialization::View);
    assert_eq!(compiled.file_format, FileFormat::Native);
    assert!(!compiled.contract_enforced);
    assert_eq!(compiled.sql, "select 1 as id");
}

#[tokio::test]
async fn test_sql_config_beats_yaml() {
    let (_dir, project) = scratch_project(
        "",
        &[
            (
                "m.sql",
                "{{ config(materialized='table') }}\nselect 1 as id",
            ),
            (
                "schema.yml",
                "version: 2\nmodels:\n  - name: m\n    config:\n      materialized: view\n",
            ),
        ],
    );
    let compiled = compile_model(&db(), &project, "m", false).await.unwrap();
    assert_eq!(compiled.materialization, Materialization::Table);
}

#[tokio::test]
async fn test_project_file_format_flows_through() {
    let (_dir, project) = scratch_project(
        "models:\n  +file_format: delta\n",
        &[("m.sql", "{{ config(materialized='table') }}select 1 as id")],
    );
    let compiled = compile_model(&db(), &project, "m", false).await.unwrap();

    assert_eq!(compiled.file_format, FileFormat::Delta);
    assert!(compiled
        .create_sql()
        .starts_with("-- materialization: table, file_format: delta"));
}

#[tokio::test]
async fn test_contract_wrap_projects_declared_order() {
    let (_dir, project) = scratch_project(
        "",
        &[
            (
                "m.sql",
                "select\n  1 as id,\n  'blue' as color",
            ),
            (
                "schema.yml",
                r#"
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
      - name: color
        data_type: varchar
"#,
            ),
        ],
    );
    let compiled = compile_model(&db(), &project, "m", false).await.unwrap();

    assert!(compiled.contract_enforced);
    assert!(compiled.sql.starts_with("select\n  id,\n  color\nfrom"));
    assert!(compiled.sql.contains(") as model_subq"));
}

#[tokio::test]
async fn test_contract_mismatch_fails_compilation() {
    let (_dir, project) = scratch_project(
        "",
        &[
            ("m.sql", "select 1 as error, 'blue' as color"),
            (
                "schema.yml",
                r#"
version: 2
models:
  - name: m
    config:
      contract:
        enforced: true
    columns:
      - name: id
        data_type: integer
      - name: color
        data_type: varchar
"#,
            ),
        ],
    );
    let err = compile_model(&db(), &project, "m", false).await.unwrap_err();

    let message = err.to_string();
    assert!(matches!(err, RunError::ContractMismatch { .. }));
    assert!(message.contains("missing in definition"));
    assert!(message.contains("missing in contract"));
}

#[tokio::test]
async fn test_incremental_defaults_to_merge_with_unique_key() {
    let (_dir, project) = scratch_project(
        "",
        &[(
            "m.sql",
            "{{ config(materialized='incremental', unique_key='id') }}select 1 as id",
        )],
    );
    let compiled = compile_model(&db(), &project, "m", false).await.unwrap();

    assert_eq!(compiled.materialization, Materialization::Incremental);
    assert_eq!(compiled.unique_key.as_deref(), Some("id"));
    assert_eq!(
        compiled.incremental_strategy,
        IncrementalStrategy::Merge
    );
}

#[tokio::test]
async fn test_incremental_without_key_appends() {
    let (_dir, project) = scratch_project(
        "",
        &[(
            "m.sql",
            "{{ config(materialized='incremental') }}select 1 as id",
        )],
    );
    let compiled = compile_model(&db(), &project, "m", false).await.unwrap();
    assert_eq!(
        compiled.incremental_strategy,
        IncrementalStrategy::Append
    );
}

#[tokio::test]
async fn test_unknown_materialization_rejected() {
    let (_dir, project) = scratch_project(
        "",
        &[("m.sql", "{{ config(materialized='snapshot') }}select 1")],
    );
    let err = compile_model(&db(), &project, "m", false).await.unwrap_err();
    assert!(matches!(err, RunError::InvalidModelConfig { .. }));
}

#[tokio::test]
async fn test_render_error_surfaces_model_name() {
    let (_dir, project) = scratch_project("", &[("m.sql", "select {{ var('absent') }}")]);
    let err = compile_model(&db(), &project, "m", false).await.unwrap_err();
    assert!(err.to_string().contains("'m'"));
}
