// =============================================================================
// Portable SQL Literals
// =============================================================================

/// Always-false predicate used where an operator has nothing to match
pub const SQL_FALSE: &str = "(1=0)";

/// Always-true predicate (`<> ()` with an empty list)
pub const SQL_TRUE: &str = "(1=1)";

// =============================================================================
// Placeholders
// =============================================================================

/// Positional placeholder emitted by fragments before `$n` numbering
pub const PLACEHOLDER: char = '?';

/// Escaped placeholder that renders as a literal `?`
pub const ESCAPED_PLACEHOLDER: &str = "??";

// =============================================================================
// Filter JSON Limits
// =============================================================================

/// Maximum size of filter JSON in bytes (64KB)
pub const MAX_FILTER_JSON_SIZE: usize = 64 * 1024;

/// Maximum nesting depth of a parsed condition tree
pub const MAX_FILTER_DEPTH: usize = 32;

// =============================================================================
// Field References
// =============================================================================

/// Separator between a table qualifier and a column name
pub const QUALIFIER_SEPARATOR: char = '.';
