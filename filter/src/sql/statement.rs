//! SELECT statement builder

use crate::error::FilterError;
use crate::filters::{Fragment, Value};
use crate::utils::sql::replace_placeholders;

/// A statement builder that accepts WHERE predicates
///
/// `and_where` returns a new builder with `predicate` ANDed onto the existing
/// ones; the receiver is left as it was.
pub trait WhereClause: Sized {
    fn and_where(&self, predicate: Fragment) -> Self;
}

/// Immutable PostgreSQL SELECT builder
///
/// Renders `SELECT .. FROM .. WHERE p1 AND p2` with `$n` placeholders numbered
/// across all predicates in order.
#[derive(Debug, Clone, Default)]
pub struct SelectBuilder {
    columns: Vec<String>,
    table: Option<String>,
    predicates: Vec<Fragment>,
}

impl SelectBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(mut self, columns: &[&str]) -> Self {
        self.columns
            .extend(columns.iter().map(|column| column.to_string()));
        self
    }

    pub fn from(mut self, table: &str) -> Self {
        self.table = Some(table.to_string());
        self
    }

    /// Number of WHERE predicates added so far
    pub fn predicate_count(&self) -> usize {
        self.predicates.len()
    }

    /// Render the statement and its ordered arguments
    pub fn to_sql(&self) -> Result<(String, Vec<Value>), FilterError> {
        let mut sql = String::from("SELECT ");
        if self.columns.is_empty() {
            sql.push('*');
        } else {
            sql.push_str(&self.columns.join(", "));
        }
        if let Some(table) = &self.table {
            sql.push_str(" FROM ");
            sql.push_str(table);
        }

        let mut args = Vec::new();
        for (i, predicate) in self.predicates.iter().enumerate() {
            let (predicate_sql, predicate_args) = predicate.to_sql()?;
            sql.push_str(if i == 0 { " WHERE " } else { " AND " });
            sql.push_str(&predicate_sql);
            args.extend(predicate_args);
        }

        Ok((replace_placeholders(&sql, |i| format!("${}", i)), args))
    }
}

impl WhereClause for SelectBuilder {
    fn and_where(&self, predicate: Fragment) -> Self {
        let mut next = self.clone();
        next.predicates.push(predicate);
        next
    }
}
