//! Assertion helpers shared by the suites

/// Collapse all whitespace runs so SQL comparisons ignore layout
pub fn normalize_sql(sql: &str) -> String {
    sql.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Assert two SQL texts are equal modulo whitespace
pub fn assert_sql_equal(actual: &str, expected: &str) {
    let actual_norm = normalize_sql(actual);
    let expected_norm = normalize_sql(expected);
    assert_eq!(
        actual_norm, expected_norm,
        "generated SQL did not match expectation\n--- actual ---\n{}\n--- expected ---\n{}",
        actual, expected
    );
}

/// Assert the error text contains at least one of the expected substrings.
///
/// ANY semantics, never ALL: which constraint trips first and how the
/// message is worded depends on the execution path, so requiring every
/// substring would be wrong by construction.
pub fn assert_any_message(error: &str, expected: &[&str]) {
    assert!(
        expected.iter().any(|needle| error.contains(needle)),
        "error message did not contain any of {:?}:\n{}",
        expected,
        error
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_layout() {
        assert_eq!(
            normalize_sql("select\n  id,\n  color\nfrom t"),
            "select id, color from t"
        );
    }

    #[test]
    fn test_any_message_semantics() {
        assert_any_message("the CHECK constraint tripped", &["NOT NULL", "CHECK"]);
    }

    #[test]
    #[should_panic(expected = "did not contain any")]
    fn test_any_message_fails_when_absent() {
        assert_any_message("something else entirely", &["NOT NULL", "CHECK"]);
    }
}
