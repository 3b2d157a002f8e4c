//! SQL statement layer
//!
//! Turns translated fragments into complete PostgreSQL statements. Fragments carry
//! `?` placeholders; they are renumbered `$1`, `$2`, ... when a statement is rendered.

pub mod bind;
mod statement;

pub use statement::{SelectBuilder, WhereClause};
