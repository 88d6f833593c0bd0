//! Constraint application with deferred (post-creation) semantics.
//!
//! The engine's CTAS accepts no inline constraint clauses, so constraints
//! are applied after the relation exists. Two paths, with different error
//! wording, both surfaced verbatim to callers:
//!
//! - `enforce_on_table`: the relation has already been created or replaced.
//!   A violation here cannot restore the previous table state.
//! - `enforce_on_staged`: the increment sits in a staging relation and is
//!   validated before any of it reaches the target.
//!
//! Check constraints are applied before not-null constraints, matching the
//! order the ALTER statements would run in.

use crate::error::{RunError, RunResult};
use lf_core::schema::{ColumnDef, ConstraintKind, ConstraintSpec};
use lf_core::sql_utils::quote_ident;
use lf_db::Database;
use std::sync::Arc;

/// How far the engine goes for a given constraint kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintSupport {
    /// Validated against the data; violations fail the run
    Enforced,
    /// Accepted and recorded, never validated
    NotEnforced,
    /// Not representable; dropped with a warning
    NotSupported,
}

/// Support matrix for the delta-style table format
pub fn constraint_support(kind: ConstraintKind) -> ConstraintSupport {
    match kind {
        ConstraintKind::Check | ConstraintKind::NotNull => ConstraintSupport::Enforced,
        ConstraintKind::PrimaryKey | ConstraintKind::ForeignKey => ConstraintSupport::NotEnforced,
        ConstraintKind::Unique => ConstraintSupport::NotSupported,
    }
}

/// Apply constraints to a freshly (re)created table.
pub async fn enforce_on_table(
    db: &Arc<dyn Database>,
    qualified: &str,
    columns: &[ColumnDef],
) -> RunResult<()> {
    for (column, spec) in enforced_specs(columns) {
        match spec.kind {
            ConstraintKind::Check => {
                let expr = check_expression(qualified, column, spec)?;
                let violations = db
                    .query_count(&format!(
                        "SELECT * FROM {} WHERE NOT ({expr}) OR ({expr}) IS NULL",
                        qualified
                    ))
                    .await?;
                if violations > 0 {
                    return Err(RunError::ConstraintViolation {
                        relation: qualified.to_string(),
                        message: format!(
                            "{} row(s) in {} violate the new CHECK constraint {}",
                            violations, qualified, expr
                        ),
                    });
                }
            }
            ConstraintKind::NotNull => {
                let violations = db
                    .query_count(&format!(
                        "SELECT * FROM {} WHERE {} IS NULL",
                        qualified,
                        quote_ident(&column.name)
                    ))
                    .await?;
                if violations > 0 {
                    return Err(RunError::ConstraintViolation {
                        relation: qualified.to_string(),
                        message: format!(
                            "{} row(s) in {} violate the new NOT NULL constraint on column {}",
                            violations, qualified, column.name
                        ),
                    });
                }
            }
            _ => unreachable!("enforced_specs only yields enforced kinds"),
        }
    }
    Ok(())
}

/// Validate a staged increment before it is merged or appended.
pub async fn enforce_on_staged(
    db: &Arc<dyn Database>,
    staged: &str,
    target: &str,
    columns: &[ColumnDef],
) -> RunResult<()> {
    for (column, spec) in enforced_specs(columns) {
        match spec.kind {
            ConstraintKind::Check => {
                let expr = check_expression(target, column, spec)?;
                let row = first_violating_row(
                    db,
                    staged,
                    columns,
                    &format!("NOT ({expr}) OR ({expr}) IS NULL"),
                )
                .await?;
                if let Some(row) = row {
                    return Err(RunError::ConstraintViolation {
                        relation: target.to_string(),
                        message: format!(
                            "CHECK constraint {} violated by row with values: {}",
                            expr, row
                        ),
                    });
                }
            }
            ConstraintKind::NotNull => {
                let predicate = format!("{} IS NULL", quote_ident(&column.name));
                let row = first_violating_row(db, staged, columns, &predicate).await?;
                if let Some(row) = row {
                    return Err(RunError::ConstraintViolation {
                        relation: target.to_string(),
                        message: format!(
                            "NOT NULL constraint violated for column: {}, row values: {}",
                            column.name, row
                        ),
                    });
                }
            }
            _ => unreachable!("enforced_specs only yields enforced kinds"),
        }
    }
    Ok(())
}

/// Enforced specs in application order: all checks, then all not-nulls,
/// each group in column-declaration order. Not-enforced and unsupported
/// kinds are logged here so every declared constraint is accounted for.
fn enforced_specs<'a>(
    columns: &'a [ColumnDef],
) -> Vec<(&'a ColumnDef, &'a ConstraintSpec)> {
    let mut checks = Vec::new();
    let mut not_nulls = Vec::new();
    for column in columns {
        for spec in &column.constraints {
            match constraint_support(spec.kind) {
                ConstraintSupport::Enforced => {
                    if spec.kind == ConstraintKind::Check {
                        checks.push((column, spec));
                    } else {
                        not_nulls.push((column, spec));
                    }
                }
                ConstraintSupport::NotEnforced => {
                    log::warn!(
                        "constraint {} on column '{}' is informational only and will not be validated",
                        spec.kind,
                        column.name
                    );
                }
                ConstraintSupport::NotSupported => {
                    log::warn!(
                        "constraint {} on column '{}' is not supported and was ignored",
                        spec.kind,
                        column.name
                    );
                }
            }
        }
    }
    checks.extend(not_nulls);
    checks
}

fn check_expression(relation: &str, column: &ColumnDef, spec: &ConstraintSpec) -> RunResult<String> {
    spec.expression
        .clone()
        .ok_or_else(|| RunError::InvalidModelConfig {
            model: relation.to_string(),
            message: format!(
                "check constraint on column '{}' requires an expression",
                column.name
            ),
        })
}

/// Render the first row matching `predicate` as "(v1, v2, ...)", NULLs
/// spelled out, for inclusion in violation messages.
async fn first_violating_row(
    db: &Arc<dyn Database>,
    staged: &str,
    columns: &[ColumnDef],
    predicate: &str,
) -> RunResult<Option<String>> {
    let rendered = columns
        .iter()
        .map(|c| {
            format!(
                "coalesce(cast({} as varchar), 'NULL')",
                quote_ident(&c.name)
            )
        })
        .collect::<Vec<_>>()
        .join(" || ', ' || ");
    let sql = format!(
        "SELECT '(' || {} || ')' FROM {} WHERE {} LIMIT 1",
        rendered, staged, predicate
    );
    let rows = db.query_strings(&sql).await?;
    Ok(rows.into_iter().next())
}

#[cfg(test)]
#[path = "constraints_test.rs"]
mod tests;
