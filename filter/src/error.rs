//! Error type for filter translation
//!
//! Every error is fatal for the translation that raised it: the first one aborts
//! the tree walk and the caller's statement builder is left untouched.

use thiserror::Error;

/// Error returned by a field mapper, surfaced to the caller verbatim
pub type MapperError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while parsing, translating or binding a filter
#[derive(Error, Debug)]
pub enum FilterError {
    /// A condition tag with no registered builder
    #[error("unknown condition: {tag}")]
    UnknownConditionType { tag: String },

    /// A payload that does not fit its condition tag
    #[error("condition {tag} has an invalid payload: {reason}")]
    PayloadMismatch { tag: String, reason: String },

    /// AND/OR given fewer than two children
    #[error("{operator} condition must have at least two conditions, got {count}")]
    Arity {
        operator: &'static str,
        count: usize,
    },

    /// The field mapper rejected a field name
    #[error(transparent)]
    FieldMapping(MapperError),

    /// A combinator child that did not translate to a single predicate
    #[error("{operator} condition {reason}")]
    StructuralMismatch {
        operator: &'static str,
        reason: String,
    },

    /// A value the operator cannot express in SQL
    #[error("invalid value for {column}: {reason}")]
    InvalidValue { column: String, reason: String },

    /// An argument sqlx cannot bind
    #[error("cannot bind argument {index}: {reason}")]
    Bind { index: usize, reason: String },

    /// Malformed, oversized or too deeply nested filter JSON
    #[error("invalid filter JSON: {0}")]
    InvalidJson(String),
}

impl FilterError {
    pub fn unknown_condition(tag: impl Into<String>) -> Self {
        Self::UnknownConditionType { tag: tag.into() }
    }

    pub fn payload_mismatch(tag: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::PayloadMismatch {
            tag: tag.into(),
            reason: reason.into(),
        }
    }

    pub fn arity(operator: &'static str, count: usize) -> Self {
        Self::Arity { operator, count }
    }

    pub fn structural(operator: &'static str, reason: impl Into<String>) -> Self {
        Self::StructuralMismatch {
            operator,
            reason: reason.into(),
        }
    }

    pub fn invalid_value(column: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            column: column.to_string(),
            reason: reason.into(),
        }
    }

    pub fn bind(index: usize, reason: impl Into<String>) -> Self {
        Self::Bind {
            index,
            reason: reason.into(),
        }
    }

    /// Whether the error came from the caller-supplied field mapper
    pub fn is_mapping(&self) -> bool {
        matches!(self, Self::FieldMapping(_))
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_arity_error_display() {
        let err = FilterError::arity("OR", 1);
        assert_eq!(
            err.to_string(),
            "OR condition must have at least two conditions, got 1"
        );
    }

    #[test]
    fn test_unknown_condition_display() {
        let err = FilterError::unknown_condition("between");
        assert_eq!(err.to_string(), "unknown condition: between");
    }

    #[test]
    fn test_field_mapping_is_verbatim() {
        let source: MapperError = "field name error".into();
        let err = FilterError::FieldMapping(source);
        assert_eq!(err.to_string(), "field name error");
        assert!(err.is_mapping());
    }

    #[test]
    fn test_structural_display() {
        let err = FilterError::structural("NOT", "requires a predicate");
        assert_eq!(err.to_string(), "NOT condition requires a predicate");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_invalid_value_display() {
        let err = FilterError::invalid_value("age", "cannot use null with < operator");
        assert_eq!(
            err.to_string(),
            "invalid value for age: cannot use null with < operator"
        );
    }
}
