//! Schema cloning: copy every relation of one schema into another.
//!
//! The engine has no zero-copy clone, so tables become full copies and views
//! are recreated over their source relation. Relation kinds survive the
//! clone, which is the property downstream tooling depends on.

use crate::error::{RunError, RunResult};
use lf_core::sql_utils::qualified_name;
use lf_db::{Database, Relation, RelationKind};
use std::sync::Arc;

/// Clone all relations from `source_schema` into `target_schema`.
///
/// Returns the relations that were cloned, in name order. Cloning an empty
/// source schema is an error: it almost always means the source environment
/// was never built.
pub async fn clone_schema(
    db: &Arc<dyn Database>,
    source_schema: &str,
    target_schema: &str,
) -> RunResult<Vec<Relation>> {
    let relations = db.list_relations(source_schema).await?;
    if relations.is_empty() {
        return Err(RunError::CloneFailed {
            message: format!("schema '{}' has no relations to clone", source_schema),
        });
    }

    db.create_schema_if_not_exists(target_schema).await?;

    for relation in &relations {
        let source = qualified_name(source_schema, &relation.name);
        let target = qualified_name(target_schema, &relation.name);
        let sql = match relation.kind {
            RelationKind::Table => {
                format!("CREATE OR REPLACE TABLE {} AS SELECT * FROM {}", target, source)
            }
            RelationKind::View => {
                format!("CREATE OR REPLACE VIEW {} AS SELECT * FROM {}", target, source)
            }
        };
        db.execute(&sql).await?;
        log::info!("cloned {} {} -> {}", relation.kind, source, target);
    }

    Ok(relations)
}
