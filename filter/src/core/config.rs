use std::fmt;
use std::sync::Arc;

use crate::filters::{FieldMapper, IdentityMapper};

// =============================================================================
// Filter Options
// =============================================================================

/// Options for a single filter translation
///
/// Unspecified options fall back to defaults: identity field mapping and unescaped
/// LIKE patterns. Cloning is cheap and the options can be shared across threads.
#[derive(Clone)]
pub struct FilterOptions {
    mapper: Arc<dyn FieldMapper>,
    escape_like: bool,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            mapper: Arc::new(IdentityMapper),
            escape_like: false,
        }
    }
}

impl fmt::Debug for FilterOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterOptions")
            .field("escape_like", &self.escape_like)
            .finish_non_exhaustive()
    }
}

impl FilterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the field mapper; `None` keeps the current one
    pub fn with_mapper<M>(mut self, mapper: Option<M>) -> Self
    where
        M: FieldMapper + 'static,
    {
        if let Some(mapper) = mapper {
            self.mapper = Arc::new(mapper);
        }
        self
    }

    /// Escape `%`, `_` and `\` in Contains values and render `ESCAPE '\'`
    pub fn with_like_escaping(mut self, enabled: bool) -> Self {
        self.escape_like = enabled;
        self
    }

    pub fn mapper(&self) -> &dyn FieldMapper {
        self.mapper.as_ref()
    }

    pub fn escape_like(&self) -> bool {
        self.escape_like
    }
}
