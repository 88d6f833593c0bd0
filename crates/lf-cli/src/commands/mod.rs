//! Command implementations

pub mod clone;
pub mod common;
pub mod run;
pub mod seed;
