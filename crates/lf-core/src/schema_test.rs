use super::*;

const DESCRIPTOR: &str = r#"
version: 2
models:
  - name: my_model
    config:
      contract:
        enforced: true
      materialized: table
    columns:
      - name: id
        data_type: integer
        description: hello
        constraints:
          - type: not_null
          - type: primary_key
          - type: check
            expression: (id > 0)
      - name: color
        data_type: text
      - name: date_day
        data_type: text
"#;

#[test]
fn test_parse_descriptor() {
    let file = SchemaFile::parse(DESCRIPTOR).unwrap();
    assert_eq!(file.version, 2);
    assert_eq!(file.models.len(), 1);

    let model = &file.models[0];
    assert_eq!(model.name, "my_model");
    assert!(model.has_enforced_contract());
    assert_eq!(model.column_names(), vec!["id", "color", "date_day"]);
    assert_eq!(
        model.config.as_ref().unwrap().materialized,
        Some(Materialization::Table)
    );
}

#[test]
fn test_constraint_specs() {
    let file = SchemaFile::parse(DESCRIPTOR).unwrap();
    let id = &file.models[0].columns[0];

    assert_eq!(id.constraints.len(), 3);
    assert_eq!(id.constraints[0].kind, ConstraintKind::NotNull);
    assert_eq!(id.constraints[1].kind, ConstraintKind::PrimaryKey);
    assert_eq!(id.constraints[2].kind, ConstraintKind::Check);
    assert_eq!(
        id.constraints[2].expression.as_deref(),
        Some("(id > 0)")
    );
}

#[test]
fn test_foreign_key_with_name() {
    let file = SchemaFile::parse(
        r#"
version: 2
models:
  - name: stg_numbers
    config:
      contract:
        enforced: true
      materialized: incremental
      on_schema_change: append_new_columns
      unique_key: n
    columns:
      - name: n
        data_type: integer
        constraints:
          - type: foreign_key
            name: fk_n
            expression: (n) REFERENCES other.raw_numbers
"#,
    )
    .unwrap();

    let model = &file.models[0];
    let config = model.config.as_ref().unwrap();
    assert_eq!(config.unique_key.as_deref(), Some("n"));
    assert_eq!(
        config.on_schema_change,
        Some(OnSchemaChange::AppendNewColumns)
    );

    let fk = &model.columns[0].constraints[0];
    assert_eq!(fk.kind, ConstraintKind::ForeignKey);
    assert_eq!(fk.name.as_deref(), Some("fk_n"));
}

#[test]
fn test_wrong_version_rejected() {
    let err = SchemaFile::parse("version: 1\nmodels: []\n").unwrap_err();
    assert!(matches!(
        err,
        CoreError::UnsupportedSchemaVersion { version: 1 }
    ));
}

#[test]
fn test_contract_defaults_off() {
    let file = SchemaFile::parse(
        "version: 2\nmodels:\n  - name: m\n    columns:\n      - name: id\n",
    )
    .unwrap();
    assert!(!file.models[0].has_enforced_contract());
    assert!(file.models[0].columns[0].data_type.is_none());
}

#[test]
fn test_unknown_constraint_kind_rejected() {
    let result = SchemaFile::parse(
        r#"
version: 2
models:
  - name: m
    columns:
      - name: id
        constraints:
          - type: exclusion
"#,
    );
    assert!(result.is_err());
}
