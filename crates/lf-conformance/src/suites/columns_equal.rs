//! Columns-equal suite: enforced contracts reject misordered or misnamed
//! columns and accept a matching declaration for every supported data type.

use crate::fixtures::{data_type_model_sql, data_type_schema_yml};
use crate::project::TestProjectBuilder;
use lf_core::contract::types_equal;

/// One row of the dialect's data-type table
#[derive(Debug, Clone)]
pub struct DataTypeCase {
    /// SQL expression producing a value of the type
    pub sql_value: &'static str,
    /// Type name as declared in the descriptor
    pub schema_type: &'static str,
    /// Type name as the engine reports it in error messages
    pub error_type: &'static str,
}

/// Parametrization of the columns-equal suite for one materialization
pub struct ColumnsEqualSpec {
    /// "table", "view" or "incremental"
    pub materialized: &'static str,
    /// Correct-variant model SQL
    pub correct_sql: &'static str,
    /// Misordered-variant model SQL
    pub wrong_order_sql: &'static str,
    /// Misnamed-variant model SQL
    pub wrong_name_sql: &'static str,
    /// Dialect-transformed constraints descriptor
    pub schema_yml: String,
    /// Expected (name, type) sequence of the correct variant
    pub expected_columns: Vec<(&'static str, &'static str)>,
    /// Dialect's native string type
    pub string_type: &'static str,
    /// Dialect data-type table
    pub data_types: Vec<DataTypeCase>,
}

/// A model whose columns are in the wrong order must fail the build with a
/// schema-mismatch error.
pub async fn verify_wrong_column_order_rejected(spec: &ColumnsEqualSpec) {
    let project = TestProjectBuilder::new("constraints_columns_equal")
        .model("my_model_wrong_order.sql", spec.wrong_order_sql)
        .model("constraints_schema.yml", &spec.schema_yml)
        .build();

    let error = project.run_expect_failure(&["my_model_wrong_order"]).await;
    assert!(
        error.contains("contract mismatch"),
        "expected a schema-mismatch error, got: {}",
        error
    );
    assert!(error.contains("model returns"), "unexpected error: {}", error);
}

/// A model with a misnamed column must fail the build, naming both sides of
/// the mismatch.
pub async fn verify_wrong_column_name_rejected(spec: &ColumnsEqualSpec) {
    let project = TestProjectBuilder::new("constraints_columns_equal")
        .model("my_model_wrong_name.sql", spec.wrong_name_sql)
        .model("constraints_schema.yml", &spec.schema_yml)
        .build();

    let error = project.run_expect_failure(&["my_model_wrong_name"]).await;
    for expected in ["id", "error", "missing in definition", "missing in contract"] {
        assert!(
            error.contains(expected),
            "expected '{}' in error: {}",
            expected,
            error
        );
    }
}

/// The correct variant builds, and its live column name/type sequence equals
/// the declared sequence exactly, in order.
pub async fn verify_correct_variant_columns(spec: &ColumnsEqualSpec) {
    let project = TestProjectBuilder::new("constraints_columns_equal")
        .model("my_model.sql", spec.correct_sql)
        .model("constraints_schema.yml", &spec.schema_yml)
        .build();

    project.run(&["my_model"]).await.unwrap();

    let actual = project.table_schema("my_model").await;
    let actual_names: Vec<&str> = actual.iter().map(|(n, _)| n.as_str()).collect();
    let expected_names: Vec<&str> = spec.expected_columns.iter().map(|(n, _)| *n).collect();
    assert_eq!(actual_names, expected_names);

    for ((_, expected_type), (name, actual_type)) in
        spec.expected_columns.iter().zip(actual.iter())
    {
        assert!(
            types_equal(expected_type, actual_type),
            "column '{}': expected type {}, engine reports {}",
            name,
            expected_type,
            actual_type
        );
    }
}

/// Every entry of the data-type table builds cleanly when the declared type
/// matches, and the live column carries that type.
pub async fn verify_correct_column_data_types(spec: &ColumnsEqualSpec) {
    for case in &spec.data_types {
        let project = TestProjectBuilder::new("constraints_data_types")
            .model(
                "my_model_data_type.sql",
                &data_type_model_sql(spec.materialized, case.sql_value),
            )
            .model(
                "data_type_schema.yml",
                &data_type_schema_yml(case.schema_type),
            )
            .build();

        project.run(&["my_model_data_type"]).await.unwrap_or_else(|e| {
            panic!(
                "data type case '{}' ({}) failed: {}",
                case.sql_value, case.schema_type, e
            )
        });

        let actual = project.table_schema("my_model_data_type").await;
        assert_eq!(actual.len(), 1);
        assert_eq!(actual[0].0, "value_col");
        assert!(
            types_equal(case.schema_type, &actual[0].1),
            "case '{}': declared {}, engine reports {}",
            case.sql_value,
            case.schema_type,
            actual[0].1
        );
    }
}

/// Declaring the wrong type for each data-type case must fail with a
/// type-mismatch error naming the engine's actual type.
pub async fn verify_wrong_column_data_types_rejected(spec: &ColumnsEqualSpec) {
    for case in &spec.data_types {
        // pick a declared type guaranteed not to match
        let wrong_type = if case.schema_type == "integer" {
            spec.string_type
        } else {
            "integer"
        };

        let project = TestProjectBuilder::new("constraints_data_types")
            .model(
                "my_model_data_type.sql",
                &data_type_model_sql(spec.materialized, case.sql_value),
            )
            .model("data_type_schema.yml", &data_type_schema_yml(wrong_type))
            .build();

        let error = project.run_expect_failure(&["my_model_data_type"]).await;
        assert!(
            error.contains("type mismatch"),
            "case '{}': expected a type mismatch, got: {}",
            case.sql_value,
            error
        );
        assert!(
            error.contains(case.error_type),
            "case '{}': expected engine type '{}' in error: {}",
            case.sql_value,
            case.error_type,
            error
        );
    }
}
