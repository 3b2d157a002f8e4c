//! Table alias collection
//!
//! Records the table qualifier of every resolved column reference so the caller
//! can decide which joins a filter needs.

use std::collections::BTreeSet;

use crate::core::constants::QUALIFIER_SEPARATOR;

/// Insert-only set of table qualifiers seen during one translation
#[derive(Debug, Default)]
pub struct AliasCollector {
    aliases: BTreeSet<String>,
}

impl AliasCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the qualifier of `column`, if it has one
    pub fn record(&mut self, column: &str) {
        if let Some(alias) = qualifier(column) {
            self.aliases.insert(alias.to_string());
        }
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Distinct qualifiers in sorted order
    pub fn into_vec(self) -> Vec<String> {
        self.aliases.into_iter().collect()
    }
}

/// Table qualifier of a column reference: `u` for `u.id`, none for `id`
pub fn qualifier(column: &str) -> Option<&str> {
    let (alias, _) = column.split_once(QUALIFIER_SEPARATOR)?;
    if alias.is_empty() {
        return None;
    }
    Some(alias)
}
