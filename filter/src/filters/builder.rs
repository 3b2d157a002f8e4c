//! SQL filter builder
//!
//! Translates a condition tree into a single fragment and appends it to a
//! statement builder. Each call owns its alias collector, so translations on
//! different threads never share state.

use crate::core::config::FilterOptions;
use crate::error::FilterError;
use crate::sql::WhereClause;
use crate::utils::sql::escape_like_pattern;

use super::aliases::AliasCollector;
use super::fragment::{ArrayOp, CompareOp, Fragment, Logic};
use super::mapper::FieldMapper;
use super::types::{Condition, Value};

/// Result of translating a condition tree
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    fragment: Option<Fragment>,
    aliases: Vec<String>,
}

impl Translation {
    /// Translated predicate; `None` when the tree has no predicate (e.g. `Where(None)`)
    pub fn fragment(&self) -> Option<&Fragment> {
        self.fragment.as_ref()
    }

    /// Distinct table qualifiers of every resolved column, sorted
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn into_parts(self) -> (Option<Fragment>, Vec<String>) {
        (self.fragment, self.aliases)
    }
}

/// Translate `condition` into a fragment without touching a statement builder
pub fn translate(
    condition: &Condition,
    options: &FilterOptions,
) -> Result<Translation, FilterError> {
    let mut translator = Translator::new(options);
    let fragment = translator.translate(condition)?;
    Ok(Translation {
        fragment,
        aliases: translator.aliases.into_vec(),
    })
}

/// Append `condition` to `builder` as a WHERE predicate (ANDed with existing ones)
///
/// Returns the augmented builder and the table aliases referenced by the filter.
/// A `None` condition returns an unchanged builder. On error nothing is appended:
/// the caller's builder is only borrowed and stays as it was.
pub fn apply_filter<B>(
    builder: &B,
    condition: Option<&Condition>,
    options: &FilterOptions,
) -> Result<(B, Vec<String>), FilterError>
where
    B: WhereClause + Clone,
{
    let Some(condition) = condition else {
        return Ok((builder.clone(), Vec::new()));
    };

    let (fragment, aliases) = translate(condition, options)?.into_parts();
    tracing::debug!(
        condition = %condition.condition_type(),
        aliases = aliases.len(),
        has_predicate = fragment.is_some(),
        "Filter applied"
    );

    let builder = match fragment {
        Some(fragment) => builder.and_where(fragment),
        None => builder.clone(),
    };
    Ok((builder, aliases))
}

/// One-shot recursive fold over a condition tree
struct Translator<'a> {
    mapper: &'a dyn FieldMapper,
    escape_like: bool,
    aliases: AliasCollector,
    depth: usize,
}

impl<'a> Translator<'a> {
    fn new(options: &'a FilterOptions) -> Self {
        Self {
            mapper: options.mapper(),
            escape_like: options.escape_like(),
            aliases: AliasCollector::new(),
            depth: 0,
        }
    }

    /// Dispatch a condition to its builder. `Ok(None)` means "no predicate".
    fn translate(&mut self, condition: &Condition) -> Result<Option<Fragment>, FilterError> {
        tracing::trace!(
            condition = %condition.condition_type(),
            depth = self.depth,
            "Translating condition"
        );

        match condition {
            Condition::Equals { field, value } | Condition::In { field, value } => {
                self.compare(field, CompareOp::Eq, value.clone())
            }
            Condition::NotEquals { field, value } => {
                self.compare(field, CompareOp::NotEq, value.clone())
            }
            Condition::GreaterThan { field, value } => {
                self.compare(field, CompareOp::Gt, value.clone())
            }
            Condition::GreaterThanOrEqual { field, value } => {
                self.compare(field, CompareOp::GtOrEq, value.clone())
            }
            Condition::LowerThan { field, value } => {
                self.compare(field, CompareOp::Lt, value.clone())
            }
            Condition::LowerThanOrEqual { field, value } => {
                self.compare(field, CompareOp::LtOrEq, value.clone())
            }
            Condition::IsNil { field } => self.compare(field, CompareOp::Eq, Value::Null),
            Condition::NotNil { field } => self.compare(field, CompareOp::NotEq, Value::Null),
            Condition::Contains { field, value } => self.contains(field, value),
            Condition::Regex { field, expression } => self.regex(field, expression, false),
            Condition::NotRegex { field, expression } => self.regex(field, expression, true),
            Condition::ArrayContains { field, value } => self.array(field, ArrayOp::Any, value),
            Condition::ArrayContainsArray { field, value } => {
                self.array(field, ArrayOp::Contains, value)
            }
            Condition::ArrayIsContained { field, value } => {
                self.array(field, ArrayOp::IsContained, value)
            }
            Condition::Overlaps { field, value } | Condition::ArraysOverlap { field, value } => {
                self.array(field, ArrayOp::Overlaps, value)
            }
            Condition::And { conditions } => self.conjunction(Logic::And, conditions),
            Condition::Or { conditions } => self.conjunction(Logic::Or, conditions),
            Condition::Not { condition } => self.negate(condition),
            Condition::Group { condition } => match condition {
                Some(inner) => Ok(self.child(inner)?.map(Fragment::group)),
                None => Ok(None),
            },
            Condition::Where { condition } => match condition {
                Some(inner) => self.child(inner),
                None => Ok(None),
            },
        }
    }

    fn child(&mut self, condition: &Condition) -> Result<Option<Fragment>, FilterError> {
        self.depth += 1;
        let result = self.translate(condition);
        self.depth -= 1;
        result
    }

    /// Map a field to its column reference and record its qualifier
    fn resolve(&mut self, field: &str) -> Result<String, FilterError> {
        let column = self.mapper.map_field(field).map_err(|e| {
            tracing::debug!(field = %field, error = %e, "Field mapping rejected");
            FilterError::FieldMapping(e)
        })?;
        self.aliases.record(&column);
        Ok(column)
    }

    fn compare(
        &mut self,
        field: &str,
        op: CompareOp,
        value: Value,
    ) -> Result<Option<Fragment>, FilterError> {
        let column = self.resolve(field)?;
        Fragment::compare(column, op, value).map(Some)
    }

    fn contains(&mut self, field: &str, value: &Value) -> Result<Option<Fragment>, FilterError> {
        let column = self.resolve(field)?;
        let text = match value {
            Value::Scalar(scalar) => scalar.to_string(),
            Value::Null => {
                return Err(FilterError::invalid_value(
                    &column,
                    "cannot use null with ILIKE operator",
                ));
            }
            Value::Sequence(_) => {
                return Err(FilterError::invalid_value(
                    &column,
                    "cannot use a sequence with ILIKE operator",
                ));
            }
        };

        let pattern = if self.escape_like {
            format!("%{}%", escape_like_pattern(&text))
        } else {
            format!("%{}%", text)
        };
        Ok(Some(Fragment::Like {
            column,
            pattern,
            escaped: self.escape_like,
        }))
    }

    fn regex(
        &mut self,
        field: &str,
        expression: &str,
        negated: bool,
    ) -> Result<Option<Fragment>, FilterError> {
        let column = self.resolve(field)?;
        Ok(Some(Fragment::Regex {
            column,
            expression: expression.to_string(),
            negated,
        }))
    }

    /// Null and empty sequences short-circuit to `(1=0)`; a scalar counts as a
    /// one-element sequence. `= ANY` binds one argument: the single element, or
    /// the whole sequence as an array.
    fn array(
        &mut self,
        field: &str,
        op: ArrayOp,
        value: &Value,
    ) -> Result<Option<Fragment>, FilterError> {
        let column = self.resolve(field)?;

        let mut args = value.elements();
        if args.is_empty() {
            return Ok(Some(Fragment::Literal(false)));
        }
        if op == ArrayOp::Any && args.len() > 1 {
            args = vec![value.clone()];
        }
        Ok(Some(Fragment::Array { column, op, args }))
    }

    /// AND/OR. Ungrouped children with the same connective are spliced in place.
    fn conjunction(
        &mut self,
        logic: Logic,
        conditions: &[Condition],
    ) -> Result<Option<Fragment>, FilterError> {
        let operator = logic.as_sql();
        if conditions.len() < 2 {
            return Err(FilterError::arity(operator, conditions.len()));
        }

        let mut parts = Vec::with_capacity(conditions.len());
        for (i, condition) in conditions.iter().enumerate() {
            match self.child(condition)? {
                Some(Fragment::Conjunction {
                    logic: nested,
                    parts: nested_parts,
                }) if nested == logic => parts.extend(nested_parts),
                Some(fragment) => parts.push(fragment),
                None => {
                    return Err(FilterError::structural(
                        operator,
                        format!("child {} produced no predicate", i),
                    ));
                }
            }
        }
        Ok(Some(Fragment::conjunction(logic, parts)))
    }

    fn negate(&mut self, condition: &Condition) -> Result<Option<Fragment>, FilterError> {
        let inner = self
            .child(condition)?
            .ok_or_else(|| FilterError::structural("NOT", "child produced no predicate"))?;
        Ok(Some(Fragment::negate(inner)))
    }
}
