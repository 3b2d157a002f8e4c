//! Utility functions for SQL text handling

pub mod sql;
