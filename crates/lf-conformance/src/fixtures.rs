//! Model SQL and schema descriptor fixtures for the conformance suites.
//!
//! The descriptor fixtures are written against a generic dialect (`text`
//! string type, inline primary keys); the transforms at the bottom let a
//! dialect substitute its own type names and strip declarations its engine
//! does not accept.

/// Correct table model: columns in contract order
pub const MY_MODEL_SQL: &str = r#"{{ config(materialized = "table") }}

select
  1 as id,
  'blue' as color,
  '2019-01-01' as date_day
"#;

/// Table model with its first two columns swapped
pub const MY_MODEL_WRONG_ORDER_SQL: &str = r#"{{ config(materialized = "table") }}

select
  'blue' as color,
  1 as id,
  '2019-01-01' as date_day
"#;

/// Table model with `id` misnamed `error`
pub const MY_MODEL_WRONG_NAME_SQL: &str = r#"{{ config(materialized = "table") }}

select
  1 as error,
  'blue' as color,
  '2019-01-01' as date_day
"#;

/// Table model violating both the check and not-null constraints on `id`
pub const MY_MODEL_WITH_NULLS_SQL: &str = r#"{{ config(materialized = "table") }}

select
  cast(null as integer) as id,
  'red' as color,
  '2019-01-01' as date_day
"#;

/// Correct view model
pub const MY_MODEL_VIEW_SQL: &str = r#"{{ config(materialized = "view") }}

select
  1 as id,
  'blue' as color,
  '2019-01-01' as date_day
"#;

/// View variants of the wrong-order / wrong-name models
pub const MY_MODEL_VIEW_WRONG_ORDER_SQL: &str = r#"{{ config(materialized = "view") }}

select
  'blue' as color,
  1 as id,
  '2019-01-01' as date_day
"#;

pub const MY_MODEL_VIEW_WRONG_NAME_SQL: &str = r#"{{ config(materialized = "view") }}

select
  1 as error,
  'blue' as color,
  '2019-01-01' as date_day
"#;

/// Correct incremental model
pub const MY_INCREMENTAL_MODEL_SQL: &str = r#"{{ config(materialized = "incremental") }}

select
  1 as id,
  'blue' as color,
  '2019-01-01' as date_day
"#;

/// Incremental variants of the wrong-order / wrong-name models
pub const MY_MODEL_INCREMENTAL_WRONG_ORDER_SQL: &str =
    r#"{{ config(materialized = "incremental") }}

select
  'blue' as color,
  1 as id,
  '2019-01-01' as date_day
"#;

pub const MY_MODEL_INCREMENTAL_WRONG_NAME_SQL: &str =
    r#"{{ config(materialized = "incremental") }}

select
  1 as error,
  'blue' as color,
  '2019-01-01' as date_day
"#;

/// Incremental model violating both constraints on `id`
pub const MY_INCREMENTAL_MODEL_WITH_NULLS_SQL: &str =
    r#"{{ config(materialized = "incremental") }}

select
  cast(null as integer) as id,
  'red' as color,
  '2019-01-01' as date_day
"#;

/// Generic constraints descriptor shared by the columns-equal, DDL
/// enforcement and rollback suites. One entry per fixture model so every
/// variant is covered by the same contract.
pub const MODEL_SCHEMA_YML: &str = r#"version: 2
models:
  - name: my_model
    config:
      contract:
        enforced: true
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
  - name: my_model_wrong_order
    config:
      contract:
        enforced: true
    columns:
      - name: id
        data_type: integer
        constraints:
          - type: not_null
          - type: primary_key
          - type: check
            expression: (id > 0)
      - name: color
        data_type: text
      - name: date_day
        data_type: text
  - name: my_model_wrong_name
    config:
      contract:
        enforced: true
    columns:
      - name: id
        data_type: integer
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

/// Two-model foreign-key pipeline. The `{schema}` placeholder is filled in
/// at runtime with the live scratch schema, since foreign-key expressions
/// must reference a fully qualified relation.
pub const FOREIGN_KEY_SCHEMA_YML: &str = r#"version: 2
models:
  - name: raw_numbers
    config:
      contract:
        enforced: true
      materialized: table
    columns:
      - name: n
        data_type: integer
        constraints:
          - type: primary_key
          - type: not_null
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
            expression: (n) REFERENCES {schema}.raw_numbers
"#;

pub const FOREIGN_KEY_RAW_NUMBERS_SQL: &str = "select 1 as n\n";

pub const FOREIGN_KEY_STG_NUMBERS_SQL: &str = "select * from {{ ref('raw_numbers') }}\n";

/// Seed and models for the clone suite
pub const CLONE_SEED_CSV: &str = "id,name\n1,Alice\n2,Bob\n3,Carol\n";

pub const CLONE_TABLE_MODEL_SQL: &str = r#"{{ config(materialized = "table") }}

select 1 as id, 'blue' as color
"#;

pub const CLONE_VIEW_MODEL_SQL: &str = "select * from {{ ref('table_model') }}\n";

/// Single-column model for the data-type checks
pub fn data_type_model_sql(materialized: &str, sql_value: &str) -> String {
    format!(
        "{{{{ config(materialized = \"{}\") }}}}\n\nselect {} as value_col\n",
        materialized, sql_value
    )
}

/// Descriptor for the data-type checks, declaring `value_col` as the given
/// type with the contract enforced.
pub fn data_type_schema_yml(data_type: &str) -> String {
    format!(
        r#"version: 2
models:
  - name: my_model_data_type
    config:
      contract:
        enforced: true
    columns:
      - name: value_col
        data_type: {}
"#,
        data_type
    )
}

/// Substitute the generic `text` type with the dialect's string type
pub fn with_string_type(yml: &str, string_type: &str) -> String {
    yml.replace("text", string_type)
}

/// Strip primary_key constraint declarations from a descriptor
pub fn without_primary_key(yml: &str) -> String {
    yml.lines()
        .filter(|line| !line.trim_start().starts_with("- type: primary_key"))
        .collect::<Vec<_>>()
        .join("\n")
        + "\n"
}

/// Fill the `{schema}` placeholder with the live scratch schema
pub fn format_schema(yml: &str, schema: &str) -> String {
    yml.replace("{schema}", schema)
}

#[cfg(test)]
#[path = "fixtures_test.rs"]
mod tests;
