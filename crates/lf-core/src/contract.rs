//! Contract (columns-equal) verification
//!
//! When a model's contract is enforced, the columns returned by its query
//! must equal the declared columns exactly: same names, same order, same
//! (normalized) types. Name-set differences are reported before order, so a
//! misnamed column reads as "missing in contract" / "missing in definition"
//! rather than as a cascade of positional errors.

use crate::schema::ColumnDef;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One contract mismatch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractMismatch {
    /// What kind of mismatch
    pub kind: MismatchKind,
    /// Human-readable description
    pub message: String,
}

/// Kinds of contract mismatches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MismatchKind {
    /// Declared in the contract but absent from the model's output
    MissingInDefinition { column: String },
    /// Produced by the model but absent from the contract
    MissingInContract { column: String },
    /// Same name sets, different order
    OrderMismatch {
        position: usize,
        expected: String,
        actual: String,
    },
    /// Declared type does not match the query's type
    TypeMismatch {
        column: String,
        expected: String,
        actual: String,
    },
}

/// Verify a model's actual output columns against its declared contract.
///
/// `actual` is the ordered (name, type) sequence the query returns, as
/// reported by the engine. Returns all mismatches found; an empty vec means
/// the contract holds.
pub fn verify_columns(expected: &[ColumnDef], actual: &[(String, String)]) -> Vec<ContractMismatch> {
    let mut mismatches = Vec::new();

    let expected_names: Vec<String> = expected.iter().map(|c| c.name.to_lowercase()).collect();
    let actual_names: Vec<String> = actual.iter().map(|(n, _)| n.to_lowercase()).collect();
    let expected_set: HashSet<&str> = expected_names.iter().map(String::as_str).collect();
    let actual_set: HashSet<&str> = actual_names.iter().map(String::as_str).collect();

    for column in expected {
        if !actual_set.contains(column.name.to_lowercase().as_str()) {
            mismatches.push(ContractMismatch {
                kind: MismatchKind::MissingInDefinition {
                    column: column.name.clone(),
                },
                message: format!(
                    "column '{}' is declared in the contract but missing in definition",
                    column.name
                ),
            });
        }
    }
    for (name, _) in actual {
        if !expected_set.contains(name.to_lowercase().as_str()) {
            mismatches.push(ContractMismatch {
                kind: MismatchKind::MissingInContract {
                    column: name.clone(),
                },
                message: format!(
                    "column '{}' is returned by the model but missing in contract",
                    name
                ),
            });
        }
    }

    // Order and types are only meaningful once the name sets agree
    if !mismatches.is_empty() {
        return mismatches;
    }

    for (position, (expected_name, actual_name)) in
        expected_names.iter().zip(actual_names.iter()).enumerate()
    {
        if expected_name != actual_name {
            mismatches.push(ContractMismatch {
                kind: MismatchKind::OrderMismatch {
                    position,
                    expected: expected_name.clone(),
                    actual: actual_name.clone(),
                },
                message: format!(
                    "position {}: contract declares '{}', model returns '{}'",
                    position, expected_name, actual_name
                ),
            });
        }
    }

    for (column, (actual_name, actual_type)) in expected.iter().zip(actual.iter()) {
        if !column.name.eq_ignore_ascii_case(actual_name) {
            continue; // already reported as an order mismatch
        }
        if let Some(declared) = &column.data_type {
            if !types_equal(declared, actual_type) {
                mismatches.push(ContractMismatch {
                    kind: MismatchKind::TypeMismatch {
                        column: column.name.clone(),
                        expected: declared.clone(),
                        actual: actual_type.clone(),
                    },
                    message: format!(
                        "column '{}' type mismatch: contract declares {}, model returns {}",
                        column.name, declared, actual_type
                    ),
                });
            }
        }
    }

    mismatches
}

/// Render mismatches as the multi-line error report attached to a failed run
pub fn format_mismatches(model: &str, mismatches: &[ContractMismatch]) -> String {
    let mut report = format!("contract mismatch for model '{}':", model);
    for m in mismatches {
        report.push_str("\n  ");
        report.push_str(&m.message);
    }
    report
}

/// Compare two SQL types after normalization.
///
/// Normalization uppercases, strips internal whitespace (`decimal(4, 2)` ==
/// `DECIMAL(4,2)`) and maps common aliases onto the engine's canonical names.
/// Precision and scale are preserved: a contract declaring `decimal(4,2)`
/// does not match a `DECIMAL(10,2)` output.
pub fn types_equal(declared: &str, actual: &str) -> bool {
    normalize_type(declared) == normalize_type(actual)
}

fn normalize_type(t: &str) -> String {
    let t: String = t.trim().to_uppercase().replace(' ', "");

    // Split off parameters / array suffix so aliasing applies to the base name
    let split = t.find(['(', '[']).unwrap_or(t.len());
    let (base, rest) = t.split_at(split);

    let canonical = match base {
        "INT" | "INT4" => "INTEGER",
        "BOOL" => "BOOLEAN",
        "TEXT" | "STRING" => "VARCHAR",
        "FLOAT" | "REAL" | "FLOAT8" => "DOUBLE",
        "NUMERIC" => "DECIMAL",
        "DATETIME" => "TIMESTAMP",
        other => other,
    };

    format!("{}{}", canonical, rest)
}

#[cfg(test)]
#[path = "contract_test.rs"]
mod tests;
