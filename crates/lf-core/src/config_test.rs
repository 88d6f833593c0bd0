use super::*;

fn parse(yaml: &str) -> Config {
    serde_yaml::from_str(yaml).unwrap()
}

#[test]
fn test_minimal_config() {
    let config = parse("name: demo\n");
    assert_eq!(config.name, "demo");
    assert_eq!(config.model_paths, vec!["models".to_string()]);
    assert_eq!(config.seed_paths, vec!["seeds".to_string()]);
    assert_eq!(config.schema, "main");
    assert_eq!(config.database.path, ":memory:");
    assert!(config.models.file_format.is_none());
}

#[test]
fn test_file_format_override() {
    let config = parse(
        r#"
name: demo
models:
  +file_format: delta
"#,
    );
    assert_eq!(config.models.file_format, Some(FileFormat::Delta));
}

#[test]
fn test_seeds_schema_suffix() {
    let config = parse(
        r#"
name: demo
schema: scratch
seeds:
  +schema: seeds
"#,
    );
    assert_eq!(config.seeds_schema(), "scratch_seeds");
}

#[test]
fn test_seeds_schema_without_suffix() {
    let config = parse("name: demo\nschema: scratch\n");
    assert_eq!(config.seeds_schema(), "scratch");
}

#[test]
fn test_unknown_field_rejected() {
    let result: Result<Config, _> = serde_yaml::from_str("name: demo\nbogus: 1\n");
    assert!(result.is_err());
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(dir.path()).unwrap_err();
    assert!(matches!(err, CoreError::ConfigNotFound { .. }));
}

#[test]
fn test_load_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(CONFIG_FILE),
        "name: demo\ndatabase:\n  path: demo.duckdb\n",
    )
    .unwrap();

    let config = Config::load(dir.path()).unwrap();
    assert_eq!(config.name, "demo");
    // relative db path resolves under the project dir
    let resolved = config.database_path(dir.path());
    assert!(resolved.ends_with("demo.duckdb"));
    assert!(Path::new(&resolved).is_absolute() || resolved.contains(std::path::MAIN_SEPARATOR));
}

#[test]
fn test_memory_db_path_passthrough() {
    let config = parse("name: demo\n");
    assert_eq!(config.database_path(Path::new("/tmp/proj")), ":memory:");
}

#[test]
fn test_materialization_from_str() {
    assert_eq!(
        "incremental".parse::<Materialization>().unwrap(),
        Materialization::Incremental
    );
    assert!("snapshot".parse::<Materialization>().is_err());
}

#[test]
fn test_on_schema_change_from_str() {
    assert_eq!(
        "append_new_columns".parse::<OnSchemaChange>().unwrap(),
        OnSchemaChange::AppendNewColumns
    );
    assert_eq!(
        "ignore".parse::<OnSchemaChange>().unwrap(),
        OnSchemaChange::Ignore
    );
}

#[test]
fn test_display_roundtrip() {
    assert_eq!(Materialization::Table.to_string(), "table");
    assert_eq!(FileFormat::Delta.to_string(), "delta");
    assert_eq!(IncrementalStrategy::Merge.to_string(), "merge");
}
