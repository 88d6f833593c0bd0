//! Shared base suites, parametrized by explicit spec structs.
//!
//! Each suite is a linear run-and-assert sequence over a `TestProject`; the
//! dialect-specific values (type names, expected error substrings, expected
//! DDL templates) are supplied by the caller.

pub mod clone;
pub mod columns_equal;
pub mod ddl_enforcement;
pub mod foreign_key;
pub mod rollback;
