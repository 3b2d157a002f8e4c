//! Condition tree to SQL WHERE translation
//!
//! A [`Condition`] tree is folded into one [`Fragment`]: parameterized SQL text with
//! `?` placeholders and its ordered arguments. Field names pass through a
//! [`FieldMapper`] first, and every table qualifier seen along the way is reported
//! back so callers know which joins the filter needs.
//!
//! ## Usage
//!
//! ```no_run
//! use filter_sql::filters::{Condition, apply_filter, parse_condition};
//! use filter_sql::sql::SelectBuilder;
//! use filter_sql::FilterOptions;
//!
//! let json_str = r#"{"type": "equals", "field": "status", "value": "ok"}"#;
//! let condition = parse_condition(json_str).unwrap();
//! let builder = SelectBuilder::new().from("spans");
//! let (builder, aliases) =
//!     apply_filter(&builder, Some(&condition), &FilterOptions::default()).unwrap();
//! let (sql, args) = builder.to_sql().unwrap();
//! ```

mod aliases;
mod builder;
mod fragment;
mod mapper;
mod parser;
mod types;

pub use aliases::{AliasCollector, qualifier};
pub use builder::{Translation, apply_filter, translate};
pub use fragment::{ArrayOp, CompareOp, Fragment, Logic};
pub use mapper::{ColumnMapper, FieldMapper, IdentityMapper, PrefixMapper};
pub use parser::parse_condition;
pub use types::{Condition, ConditionType, Scalar, Value};
