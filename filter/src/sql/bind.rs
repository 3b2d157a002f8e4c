//! sqlx binding
//!
//! Converts a rendered `?`-placeholder statement and its arguments into a sqlx
//! `QueryBuilder`. Nothing is executed here.

use sqlx::{Postgres, QueryBuilder};

use crate::error::FilterError;
use crate::filters::{Scalar, Value};
use crate::utils::sql::split_placeholders;

/// Build a PostgreSQL `QueryBuilder` from `?`-placeholder SQL and its arguments
///
/// Placeholders are renumbered by sqlx (`$1`, `$2`, ...). Null binds a typed
/// NULL; a sequence binds as one array parameter and must be homogeneous.
pub fn to_query_builder(
    sql: &str,
    args: &[Value],
) -> Result<QueryBuilder<'static, Postgres>, FilterError> {
    let mut segments = split_placeholders(sql).into_iter();
    let placeholders = segments.len().saturating_sub(1);
    if placeholders != args.len() {
        return Err(FilterError::bind(
            placeholders.min(args.len()) + 1,
            format!(
                "statement has {} placeholders but {} arguments",
                placeholders,
                args.len()
            ),
        ));
    }

    let mut builder = QueryBuilder::new(segments.next().unwrap_or_default());
    for (i, (arg, segment)) in args.iter().zip(segments).enumerate() {
        push_value(&mut builder, i + 1, arg)?;
        builder.push(segment);
    }

    tracing::trace!(args = args.len(), "Bound filter arguments");
    Ok(builder)
}

fn push_value(
    builder: &mut QueryBuilder<'static, Postgres>,
    index: usize,
    value: &Value,
) -> Result<(), FilterError> {
    match value {
        Value::Null => {
            builder.push_bind(None::<String>);
        }
        Value::Scalar(scalar) => push_scalar(builder, scalar),
        Value::Sequence(items) => push_sequence(builder, index, items)?,
    }
    Ok(())
}

fn push_scalar(builder: &mut QueryBuilder<'static, Postgres>, scalar: &Scalar) {
    match scalar {
        Scalar::Bool(v) => {
            builder.push_bind(*v);
        }
        Scalar::Int(v) => {
            builder.push_bind(*v);
        }
        Scalar::Float(v) => {
            builder.push_bind(*v);
        }
        Scalar::Text(v) => {
            builder.push_bind(v.clone());
        }
    }
}

fn push_sequence(
    builder: &mut QueryBuilder<'static, Postgres>,
    index: usize,
    items: &[Scalar],
) -> Result<(), FilterError> {
    match items.first() {
        None => {
            builder.push_bind(Vec::<String>::new());
        }
        Some(Scalar::Bool(_)) => {
            builder.push_bind(homogeneous(items, index, |s| match s {
                Scalar::Bool(v) => Some(*v),
                _ => None,
            })?);
        }
        Some(Scalar::Int(_)) => {
            builder.push_bind(homogeneous(items, index, |s| match s {
                Scalar::Int(v) => Some(*v),
                _ => None,
            })?);
        }
        Some(Scalar::Float(_)) => {
            builder.push_bind(homogeneous(items, index, |s| match s {
                Scalar::Float(v) => Some(*v),
                _ => None,
            })?);
        }
        Some(Scalar::Text(_)) => {
            builder.push_bind(homogeneous(items, index, |s| match s {
                Scalar::Text(v) => Some(v.clone()),
                _ => None,
            })?);
        }
    }
    Ok(())
}

fn homogeneous<T, F>(items: &[Scalar], index: usize, pick: F) -> Result<Vec<T>, FilterError>
where
    F: Fn(&Scalar) -> Option<T>,
{
    items
        .iter()
        .map(|item| {
            pick(item)
                .ok_or_else(|| FilterError::bind(index, "sequence mixes element types"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::FilterOptions;
    use crate::filters::{Condition, translate};

    #[test]
    fn binds_translated_fragment() {
        let condition = Condition::and([
            Condition::equals("status", "ok"),
            Condition::overlaps("tags", vec!["a", "b"]),
        ]);
        let translation = translate(&condition, &FilterOptions::default()).unwrap();
        let (sql, args) = translation.fragment().unwrap().to_sql().unwrap();

        let builder = to_query_builder(&format!("SELECT * FROM spans WHERE {}", sql), &args)
            .unwrap();
        assert_eq!(
            builder.sql(),
            "SELECT * FROM spans WHERE (status = $1 AND tags && ARRAY[$2,$3])"
        );
    }

    #[test]
    fn binds_sequence_as_single_array() {
        let builder =
            to_query_builder("ids = ANY (?)", &[Value::seq([1, 2, 3])]).unwrap();
        assert_eq!(builder.sql(), "ids = ANY ($1)");
    }

    #[test]
    fn binds_null() {
        let builder = to_query_builder("parent_id = ?", &[Value::Null]).unwrap();
        assert_eq!(builder.sql(), "parent_id = $1");
    }

    #[test]
    fn rejects_mixed_sequence() {
        let mixed = Value::Sequence(vec![Scalar::Int(1), Scalar::Text("a".to_string())]);
        let err = to_query_builder("ids = ANY (?)", &[mixed]).err().unwrap();
        assert!(matches!(err, FilterError::Bind { index: 1, .. }));
    }

    #[test]
    fn rejects_argument_count_mismatch() {
        let err = to_query_builder("a = ? AND b = ?", &[Value::from(1)]).err().unwrap();
        assert_eq!(
            err.to_string(),
            "cannot bind argument 2: statement has 2 placeholders but 1 arguments"
        );
    }

    #[test]
    fn escaped_placeholder_is_not_bound() {
        let builder = to_query_builder("data ?? 'k' AND id = ?", &[Value::from(5)]).unwrap();
        assert_eq!(builder.sql(), "data ? 'k' AND id = $1");
    }
}
