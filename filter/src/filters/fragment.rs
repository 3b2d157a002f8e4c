//! SQL fragments
//!
//! A fragment is the translation of one condition: it renders to SQL text with `?`
//! placeholders plus the ordered arguments for those placeholders. Placeholder
//! numbering is left to the statement builder.

use crate::core::constants::{SQL_FALSE, SQL_TRUE};
use crate::error::FilterError;
use crate::utils::sql::placeholders;

use super::types::Value;

/// Comparison operators for `column OP ?` fragments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    NotEq,
    Gt,
    GtOrEq,
    Lt,
    LtOrEq,
}

impl CompareOp {
    pub fn as_sql(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::NotEq => "<>",
            CompareOp::Gt => ">",
            CompareOp::GtOrEq => ">=",
            CompareOp::Lt => "<",
            CompareOp::LtOrEq => "<=",
        }
    }

    fn is_equality(&self) -> bool {
        matches!(self, CompareOp::Eq | CompareOp::NotEq)
    }
}

/// PostgreSQL array operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayOp {
    /// `column = ANY (?)`
    Any,
    /// `column @> ARRAY[..]`
    Contains,
    /// `column <@ ARRAY[..]`
    IsContained,
    /// `column && ARRAY[..]`
    Overlaps,
}

impl ArrayOp {
    pub fn as_sql(&self) -> &'static str {
        match self {
            ArrayOp::Any => "= ANY",
            ArrayOp::Contains => "@>",
            ArrayOp::IsContained => "<@",
            ArrayOp::Overlaps => "&&",
        }
    }
}

/// Logical connective of a conjunction fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Logic {
    And,
    Or,
}

impl Logic {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Logic::And => "AND",
            Logic::Or => "OR",
        }
    }

    /// Rendering of a conjunction with no parts
    fn identity(&self) -> &'static str {
        match self {
            Logic::And => SQL_TRUE,
            Logic::Or => SQL_FALSE,
        }
    }
}

/// Translated condition
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    /// `column OP ?`; equality against null or a sequence renders `IS NULL` / `IN (..)`
    Compare {
        column: String,
        op: CompareOp,
        value: Value,
    },
    /// `column ILIKE ?`, optionally with `ESCAPE '\'`
    Like {
        column: String,
        pattern: String,
        escaped: bool,
    },
    /// `column ~ ?` or `column !~ ?`
    Regex {
        column: String,
        expression: String,
        negated: bool,
    },
    /// Array operator against flattened arguments
    Array {
        column: String,
        op: ArrayOp,
        args: Vec<Value>,
    },
    /// `(1=1)` or `(1=0)`
    Literal(bool),
    /// Ordered parts joined by AND/OR, rendered in parentheses
    Conjunction { logic: Logic, parts: Vec<Fragment> },
    /// `NOT (..)`
    Not(Box<Fragment>),
    /// Explicitly grouped fragment; never spliced into a parent conjunction
    Group(Box<Fragment>),
}

impl Fragment {
    /// Comparison fragment, rejecting values the operator cannot express
    pub fn compare(column: String, op: CompareOp, value: Value) -> Result<Self, FilterError> {
        check_comparable(&column, op, &value)?;
        Ok(Self::Compare { column, op, value })
    }

    /// Conjunction of `parts`; empty parts render the connective's identity
    pub fn conjunction(logic: Logic, parts: Vec<Fragment>) -> Self {
        Self::Conjunction { logic, parts }
    }

    pub fn negate(inner: Fragment) -> Self {
        Self::Not(Box::new(inner))
    }

    pub fn group(inner: Fragment) -> Self {
        Self::Group(Box::new(inner))
    }

    /// Render SQL with `?` placeholders and the ordered arguments
    pub fn to_sql(&self) -> Result<(String, Vec<Value>), FilterError> {
        let mut sql = String::new();
        let mut args = Vec::new();
        self.write_sql(&mut sql, &mut args)?;
        Ok((sql, args))
    }

    fn write_sql(&self, sql: &mut String, args: &mut Vec<Value>) -> Result<(), FilterError> {
        match self {
            Self::Compare { column, op, value } => {
                check_comparable(column, *op, value)?;
                write_compare(sql, args, column, *op, value);
            }
            Self::Like {
                column,
                pattern,
                escaped,
            } => {
                sql.push_str(&format!("{} ILIKE ?", column));
                if *escaped {
                    sql.push_str(" ESCAPE '\\'");
                }
                args.push(Value::from(pattern.as_str()));
            }
            Self::Regex {
                column,
                expression,
                negated,
            } => {
                let op = if *negated { "!~" } else { "~" };
                sql.push_str(&format!("{} {} ?", column, op));
                args.push(Value::from(expression.as_str()));
            }
            Self::Array {
                column,
                op,
                args: values,
            } => {
                if values.is_empty() {
                    sql.push_str(SQL_FALSE);
                    return Ok(());
                }
                match op {
                    ArrayOp::Any => {
                        if values.len() != 1 {
                            return Err(FilterError::invalid_value(
                                column,
                                format!("= ANY takes one argument, got {}", values.len()),
                            ));
                        }
                        sql.push_str(&format!("{} = ANY (?)", column));
                    }
                    _ => {
                        sql.push_str(&format!(
                            "{} {} ARRAY[{}]",
                            column,
                            op.as_sql(),
                            placeholders(values.len())
                        ));
                    }
                }
                args.extend(values.iter().cloned());
            }
            Self::Literal(true) => sql.push_str(SQL_TRUE),
            Self::Literal(false) => sql.push_str(SQL_FALSE),
            Self::Conjunction { logic, parts } => {
                if parts.is_empty() {
                    sql.push_str(logic.identity());
                    return Ok(());
                }
                sql.push('(');
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        sql.push_str(&format!(" {} ", logic.as_sql()));
                    }
                    part.write_sql(sql, args)?;
                }
                sql.push(')');
            }
            Self::Not(inner) => {
                sql.push_str("NOT (");
                inner.write_sql(sql, args)?;
                sql.push(')');
            }
            Self::Group(inner) => inner.write_sql(sql, args)?,
        }
        Ok(())
    }
}

/// Ordering operators only accept a single scalar
fn check_comparable(column: &str, op: CompareOp, value: &Value) -> Result<(), FilterError> {
    if op.is_equality() {
        return Ok(());
    }
    match value {
        Value::Scalar(_) => Ok(()),
        Value::Null => Err(FilterError::invalid_value(
            column,
            format!("cannot use null with {} operator", op.as_sql()),
        )),
        Value::Sequence(_) => Err(FilterError::invalid_value(
            column,
            format!("cannot use a sequence with {} operator", op.as_sql()),
        )),
    }
}

fn write_compare(
    sql: &mut String,
    args: &mut Vec<Value>,
    column: &str,
    op: CompareOp,
    value: &Value,
) {
    let negated = op == CompareOp::NotEq;
    match value {
        Value::Null if op.is_equality() => {
            let is = if negated { "IS NOT" } else { "IS" };
            sql.push_str(&format!("{} {} NULL", column, is));
        }
        Value::Sequence(items) if op.is_equality() => {
            if items.is_empty() {
                sql.push_str(if negated { SQL_TRUE } else { SQL_FALSE });
                return;
            }
            let in_op = if negated { "NOT IN" } else { "IN" };
            sql.push_str(&format!(
                "{} {} ({})",
                column,
                in_op,
                placeholders(items.len())
            ));
            args.extend(value.elements());
        }
        _ => {
            sql.push_str(&format!("{} {} ?", column, op.as_sql()));
            args.push(value.clone());
        }
    }
}
