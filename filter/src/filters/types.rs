//! Condition tree and value definitions
//!
//! Defines the filter conditions and the closed value type they carry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// A single SQL-bindable value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::Float(v) => write!(f, "{}", v),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

/// Value carried by a leaf condition
///
/// Whether a value is a scalar or a sequence is fixed when the condition is built.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Scalar(Scalar),
    Sequence(Vec<Scalar>),
}

impl Value {
    /// Build a sequence value from any iterator of scalars
    pub fn seq<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Scalar>,
    {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }

    /// Elements as positional arguments: a scalar is a one-element sequence
    pub fn elements(&self) -> Vec<Value> {
        match self {
            Self::Null => Vec::new(),
            Self::Scalar(s) => vec![Self::Scalar(s.clone())],
            Self::Sequence(items) => items.iter().cloned().map(Self::Scalar).collect(),
        }
    }
}

macro_rules! impl_scalar_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Scalar {
                fn from(v: $ty) -> Self {
                    Self::$variant(v.into())
                }
            }

            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::Scalar(v.into())
                }
            }
        )*
    };
}

impl_scalar_from!(
    bool => Bool,
    i32 => Int,
    i64 => Int,
    u32 => Int,
    f64 => Float,
    String => Text,
    &str => Text,
);

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        Self::Scalar(s)
    }
}

impl<T: Into<Scalar>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::seq(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// Filter condition tree
///
/// Leaf variants compare one field against a value; composite variants combine
/// child conditions. The JSON shape uses `type` as the tag:
/// `{"type": "equals", "field": "id", "value": 1}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    Equals {
        field: String,
        #[serde(default)]
        value: Value,
    },
    NotEquals {
        field: String,
        #[serde(default)]
        value: Value,
    },
    GreaterThan {
        field: String,
        #[serde(default)]
        value: Value,
    },
    GreaterThanOrEqual {
        field: String,
        #[serde(default)]
        value: Value,
    },
    LowerThan {
        field: String,
        #[serde(default)]
        value: Value,
    },
    LowerThanOrEqual {
        field: String,
        #[serde(default)]
        value: Value,
    },
    In {
        field: String,
        #[serde(default)]
        value: Value,
    },
    Contains {
        field: String,
        #[serde(default)]
        value: Value,
    },
    IsNil {
        field: String,
    },
    NotNil {
        field: String,
    },
    Regex {
        field: String,
        expression: String,
    },
    NotRegex {
        field: String,
        expression: String,
    },
    ArrayContains {
        field: String,
        #[serde(default)]
        value: Value,
    },
    ArrayContainsArray {
        field: String,
        #[serde(default)]
        value: Value,
    },
    ArrayIsContained {
        field: String,
        #[serde(default)]
        value: Value,
    },
    Overlaps {
        field: String,
        #[serde(default)]
        value: Value,
    },
    ArraysOverlap {
        field: String,
        #[serde(default)]
        value: Value,
    },
    And {
        conditions: Vec<Condition>,
    },
    Or {
        conditions: Vec<Condition>,
    },
    Not {
        condition: Box<Condition>,
    },
    Group {
        #[serde(default)]
        condition: Option<Box<Condition>>,
    },
    Where {
        #[serde(default)]
        condition: Option<Box<Condition>>,
    },
}

impl Condition {
    pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn not_equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::NotEquals {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn greater_than(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::GreaterThan {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn greater_than_or_equal(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::GreaterThanOrEqual {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn lower_than(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::LowerThan {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn lower_than_or_equal(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::LowerThanOrEqual {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn in_values(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::In {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn contains(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Contains {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn is_nil(field: impl Into<String>) -> Self {
        Self::IsNil {
            field: field.into(),
        }
    }

    pub fn not_nil(field: impl Into<String>) -> Self {
        Self::NotNil {
            field: field.into(),
        }
    }

    pub fn regex(field: impl Into<String>, expression: impl Into<String>) -> Self {
        Self::Regex {
            field: field.into(),
            expression: expression.into(),
        }
    }

    pub fn not_regex(field: impl Into<String>, expression: impl Into<String>) -> Self {
        Self::NotRegex {
            field: field.into(),
            expression: expression.into(),
        }
    }

    pub fn array_contains(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::ArrayContains {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn array_contains_array(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::ArrayContainsArray {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn array_is_contained(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::ArrayIsContained {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn overlaps(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Overlaps {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn arrays_overlap(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::ArraysOverlap {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn and(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Self::And {
            conditions: conditions.into_iter().collect(),
        }
    }

    pub fn or(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Self::Or {
            conditions: conditions.into_iter().collect(),
        }
    }

    pub fn not(condition: Condition) -> Self {
        Self::Not {
            condition: Box::new(condition),
        }
    }

    /// Explicit grouping; `None` yields no predicate
    pub fn group(condition: impl Into<Option<Condition>>) -> Self {
        Self::Group {
            condition: condition.into().map(Box::new),
        }
    }

    /// Root wrapper; `None` yields no predicate
    pub fn where_(condition: impl Into<Option<Condition>>) -> Self {
        Self::Where {
            condition: condition.into().map(Box::new),
        }
    }

    pub fn condition_type(&self) -> ConditionType {
        match self {
            Self::Equals { .. } => ConditionType::Equals,
            Self::NotEquals { .. } => ConditionType::NotEquals,
            Self::GreaterThan { .. } => ConditionType::GreaterThan,
            Self::GreaterThanOrEqual { .. } => ConditionType::GreaterThanOrEqual,
            Self::LowerThan { .. } => ConditionType::LowerThan,
            Self::LowerThanOrEqual { .. } => ConditionType::LowerThanOrEqual,
            Self::In { .. } => ConditionType::In,
            Self::Contains { .. } => ConditionType::Contains,
            Self::IsNil { .. } => ConditionType::IsNil,
            Self::NotNil { .. } => ConditionType::NotNil,
            Self::Regex { .. } => ConditionType::Regex,
            Self::NotRegex { .. } => ConditionType::NotRegex,
            Self::ArrayContains { .. } => ConditionType::ArrayContains,
            Self::ArrayContainsArray { .. } => ConditionType::ArrayContainsArray,
            Self::ArrayIsContained { .. } => ConditionType::ArrayIsContained,
            Self::Overlaps { .. } => ConditionType::Overlaps,
            Self::ArraysOverlap { .. } => ConditionType::ArraysOverlap,
            Self::And { .. } => ConditionType::And,
            Self::Or { .. } => ConditionType::Or,
            Self::Not { .. } => ConditionType::Not,
            Self::Group { .. } => ConditionType::Group,
            Self::Where { .. } => ConditionType::Where,
        }
    }
}

/// Tag identifying a condition variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConditionType {
    Equals,
    NotEquals,
    GreaterThan,
    GreaterThanOrEqual,
    LowerThan,
    LowerThanOrEqual,
    In,
    Contains,
    IsNil,
    NotNil,
    Regex,
    NotRegex,
    ArrayContains,
    ArrayContainsArray,
    ArrayIsContained,
    Overlaps,
    ArraysOverlap,
    And,
    Or,
    Not,
    Group,
    Where,
}

impl ConditionType {
    /// Every condition tag, in declaration order
    pub const ALL: [ConditionType; 22] = [
        Self::Equals,
        Self::NotEquals,
        Self::GreaterThan,
        Self::GreaterThanOrEqual,
        Self::LowerThan,
        Self::LowerThanOrEqual,
        Self::In,
        Self::Contains,
        Self::IsNil,
        Self::NotNil,
        Self::Regex,
        Self::NotRegex,
        Self::ArrayContains,
        Self::ArrayContainsArray,
        Self::ArrayIsContained,
        Self::Overlaps,
        Self::ArraysOverlap,
        Self::And,
        Self::Or,
        Self::Not,
        Self::Group,
        Self::Where,
    ];

    /// Tag name as it appears in filter JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::NotEquals => "not_equals",
            Self::GreaterThan => "greater_than",
            Self::GreaterThanOrEqual => "greater_than_or_equal",
            Self::LowerThan => "lower_than",
            Self::LowerThanOrEqual => "lower_than_or_equal",
            Self::In => "in",
            Self::Contains => "contains",
            Self::IsNil => "is_nil",
            Self::NotNil => "not_nil",
            Self::Regex => "regex",
            Self::NotRegex => "not_regex",
            Self::ArrayContains => "array_contains",
            Self::ArrayContainsArray => "array_contains_array",
            Self::ArrayIsContained => "array_is_contained",
            Self::Overlaps => "overlaps",
            Self::ArraysOverlap => "arrays_overlap",
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
            Self::Group => "group",
            Self::Where => "where",
        }
    }
}

impl FromStr for ConditionType {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| FilterError::unknown_condition(s))
    }
}

impl fmt::Display for ConditionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
