//! Condition trees to parameterized SQL WHERE predicates
//!
//! Build a [`Condition`] tree (or parse one from JSON), then hand it to
//! [`apply_filter`] together with a statement builder. The result is the builder
//! with one more WHERE predicate and the table aliases the filter references.
//!
//! ```
//! use filter_sql::sql::SelectBuilder;
//! use filter_sql::{Condition, FilterOptions, Value, apply_filter};
//!
//! let builder = SelectBuilder::new().select(&["*"]).from("users");
//! let condition = Condition::where_(Condition::equals("id", 1234));
//! let (builder, aliases) =
//!     apply_filter(&builder, Some(&condition), &FilterOptions::default()).unwrap();
//!
//! let (sql, args) = builder.to_sql().unwrap();
//! assert_eq!(sql, "SELECT * FROM users WHERE id = $1");
//! assert_eq!(args, vec![Value::from(1234)]);
//! assert!(aliases.is_empty());
//! ```

pub mod core;
pub mod error;
pub mod filters;
pub mod sql;
pub mod utils;

pub use crate::core::FilterOptions;
pub use error::{FilterError, MapperError};
pub use filters::{
    ColumnMapper, Condition, ConditionType, FieldMapper, Fragment, IdentityMapper, PrefixMapper,
    Scalar, Translation, Value, apply_filter, parse_condition, translate,
};
pub use sql::{SelectBuilder, WhereClause};
