//! Field mapping
//!
//! Maps domain field names used in conditions to physical column references.

use std::collections::HashMap;

use crate::error::MapperError;

/// Maps a domain field name to a column reference
///
/// A reference may be qualified (`u.id`); the qualifier is reported back to the
/// caller as a table alias.
pub trait FieldMapper: Send + Sync {
    fn map_field(&self, field: &str) -> Result<String, MapperError>;
}

impl<F> FieldMapper for F
where
    F: Fn(&str) -> Result<String, MapperError> + Send + Sync,
{
    fn map_field(&self, field: &str) -> Result<String, MapperError> {
        self(field)
    }
}

/// Uses field names as column names
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityMapper;

impl FieldMapper for IdentityMapper {
    fn map_field(&self, field: &str) -> Result<String, MapperError> {
        Ok(field.to_string())
    }
}

/// Qualifies every field with a table alias (`"u"` → `u.id`)
#[derive(Debug, Clone)]
pub struct PrefixMapper {
    alias: String,
}

impl PrefixMapper {
    pub fn new(alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
        }
    }
}

impl FieldMapper for PrefixMapper {
    fn map_field(&self, field: &str) -> Result<String, MapperError> {
        if self.alias.is_empty() {
            return Ok(field.to_string());
        }
        Ok(format!("{}.{}", self.alias, field))
    }
}

/// Explicit field whitelist with per-field column references
///
/// Fields that were not registered are rejected.
#[derive(Debug, Clone, Default)]
pub struct ColumnMapper {
    columns: HashMap<String, String>,
}

impl ColumnMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a field under its own name
    pub fn field(self, name: &str) -> Self {
        self.column(name, name)
    }

    /// Register a field mapped to a different column reference
    pub fn column(mut self, field: &str, column: &str) -> Self {
        self.columns.insert(field.to_string(), column.to_string());
        self
    }

    /// Register a set of fields under their own names
    pub fn fields(self, names: &[&str]) -> Self {
        names.iter().fold(self, |mapper, name| mapper.field(name))
    }
}

impl FieldMapper for ColumnMapper {
    fn map_field(&self, field: &str) -> Result<String, MapperError> {
        self.columns
            .get(field)
            .cloned()
            .ok_or_else(|| format!("Cannot filter by field: {}", field).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_mapper_returns_field() {
        assert_eq!(IdentityMapper.map_field("user_id").unwrap(), "user_id");
    }

    #[test]
    fn prefix_mapper_qualifies_field() {
        let mapper = PrefixMapper::new("u");
        assert_eq!(mapper.map_field("id").unwrap(), "u.id");
        assert_eq!(PrefixMapper::new("").map_field("id").unwrap(), "id");
    }

    #[test]
    fn column_mapper_maps_and_rejects() {
        let mapper = ColumnMapper::new()
            .fields(&["label", "tags"])
            .column("start_time", "sp.timestamp_start");

        assert_eq!(mapper.map_field("label").unwrap(), "label");
        assert_eq!(
            mapper.map_field("start_time").unwrap(),
            "sp.timestamp_start"
        );
        let err = mapper.map_field("password").unwrap_err();
        assert_eq!(err.to_string(), "Cannot filter by field: password");
    }

    #[test]
    fn closure_is_a_mapper() {
        let mapper = |field: &str| -> Result<String, MapperError> {
            if field == "secret" {
                return Err("field name error".into());
            }
            Ok(format!("t.{}", field))
        };
        assert_eq!(mapper.map_field("a").unwrap(), "t.a");
        assert_eq!(
            mapper.map_field("secret").unwrap_err().to_string(),
            "field name error"
        );
    }
}
