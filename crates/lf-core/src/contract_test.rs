use super::*;

fn columns(defs: &[(&str, Option<&str>)]) -> Vec<ColumnDef> {
    defs.iter()
        .map(|(name, dtype)| ColumnDef {
            name: name.to_string(),
            data_type: dtype.map(|s| s.to_string()),
            description: None,
            constraints: vec![],
        })
        .collect()
}

fn actual(cols: &[(&str, &str)]) -> Vec<(String, String)> {
    cols.iter()
        .map(|(n, t)| (n.to_string(), t.to_string()))
        .collect()
}

#[test]
fn test_matching_contract() {
    let expected = columns(&[("id", Some("integer")), ("color", Some("varchar"))]);
    let result = verify_columns(
        &expected,
        &actual(&[("id", "INTEGER"), ("color", "VARCHAR")]),
    );
    assert!(result.is_empty());
}

#[test]
fn test_wrong_name_reports_both_sides() {
    let expected = columns(&[("id", Some("integer")), ("color", Some("varchar"))]);
    let result = verify_columns(
        &expected,
        &actual(&[("error", "INTEGER"), ("color", "VARCHAR")]),
    );

    assert!(result.iter().any(|m| matches!(
        &m.kind,
        MismatchKind::MissingInDefinition { column } if column == "id"
    )));
    assert!(result.iter().any(|m| matches!(
        &m.kind,
        MismatchKind::MissingInContract { column } if column == "error"
    )));

    let report = format_mismatches("my_model", &result);
    assert!(report.contains("missing in definition"));
    assert!(report.contains("missing in contract"));
}

#[test]
fn test_wrong_order_fails() {
    let expected = columns(&[
        ("id", Some("integer")),
        ("color", Some("varchar")),
        ("date_day", Some("varchar")),
    ]);
    let result = verify_columns(
        &expected,
        &actual(&[
            ("color", "VARCHAR"),
            ("id", "INTEGER"),
            ("date_day", "VARCHAR"),
        ]),
    );

    // positions 0 and 1 are swapped; date_day is in place
    let order_mismatches: Vec<_> = result
        .iter()
        .filter(|m| matches!(m.kind, MismatchKind::OrderMismatch { .. }))
        .collect();
    assert_eq!(order_mismatches.len(), 2);
    assert!(order_mismatches[0]
        .message
        .contains("contract declares 'id', model returns 'color'"));
}

#[test]
fn test_order_mismatch_suppresses_type_check() {
    let expected = columns(&[("id", Some("integer")), ("color", Some("varchar"))]);
    let result = verify_columns(
        &expected,
        &actual(&[("color", "VARCHAR"), ("id", "INTEGER")]),
    );
    assert!(result
        .iter()
        .all(|m| matches!(m.kind, MismatchKind::OrderMismatch { .. })));
}

#[test]
fn test_type_mismatch() {
    let expected = columns(&[("my_col", Some("varchar"))]);
    let result = verify_columns(&expected, &actual(&[("my_col", "INTEGER")]));

    assert_eq!(result.len(), 1);
    assert!(matches!(
        &result[0].kind,
        MismatchKind::TypeMismatch { column, .. } if column == "my_col"
    ));
    assert!(result[0].message.contains("type mismatch"));
    assert!(result[0].message.contains("INTEGER"));
}

#[test]
fn test_name_mismatch_wins_over_type_check() {
    // when name sets differ, no type errors are emitted
    let expected = columns(&[("id", Some("integer"))]);
    let result = verify_columns(&expected, &actual(&[("uid", "VARCHAR")]));
    assert_eq!(result.len(), 2);
    assert!(result
        .iter()
        .all(|m| !matches!(m.kind, MismatchKind::TypeMismatch { .. })));
}

#[test]
fn test_case_insensitive_names() {
    let expected = columns(&[("OrderId", Some("integer"))]);
    let result = verify_columns(&expected, &actual(&[("orderid", "INTEGER")]));
    assert!(result.is_empty());
}

#[test]
fn test_untyped_column_accepts_anything() {
    let expected = columns(&[("id", None)]);
    let result = verify_columns(&expected, &actual(&[("id", "VARCHAR")]));
    assert!(result.is_empty());
}

#[test]
fn test_type_normalization() {
    assert!(types_equal("int", "INTEGER"));
    assert!(types_equal("text", "VARCHAR"));
    assert!(types_equal("string", "varchar"));
    assert!(types_equal("decimal(4, 2)", "DECIMAL(4,2)"));
    assert!(types_equal("varchar[]", "VARCHAR[]"));
    assert!(!types_equal("decimal(4,2)", "DECIMAL(10,2)"));
    assert!(!types_equal("integer", "varchar"));
    assert!(!types_equal("integer[]", "varchar[]"));
}
