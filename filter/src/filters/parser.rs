//! Filter parsing
//!
//! Parses a JSON condition tree with validation. Tags are checked before
//! payloads, so an unknown `type` anywhere in the tree is reported as such rather
//! than as a generic deserialization failure.

use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::core::constants::{MAX_FILTER_DEPTH, MAX_FILTER_JSON_SIZE};
use crate::error::FilterError;

use super::types::{Condition, ConditionType};

/// Parse a condition tree from JSON
///
/// Validates JSON size and nesting depth, resolves every `type` tag, then checks
/// each node's payload against its tag.
pub fn parse_condition(json_str: &str) -> Result<Condition, FilterError> {
    if json_str.len() > MAX_FILTER_JSON_SIZE {
        return Err(FilterError::InvalidJson(format!(
            "Filter JSON exceeds maximum size of {} bytes",
            MAX_FILTER_JSON_SIZE
        )));
    }

    let tree: JsonValue = serde_json::from_str(json_str).map_err(|e| {
        tracing::debug!(error = %e, "Rejected malformed filter JSON");
        FilterError::InvalidJson(e.to_string())
    })?;

    check_node(&tree, 1).inspect_err(|e| {
        tracing::debug!(error = %e, "Rejected filter condition");
    })?;

    let root_tag = tree
        .get("type")
        .and_then(JsonValue::as_str)
        .unwrap_or_default()
        .to_string();
    serde_json::from_value(tree).map_err(|e| FilterError::payload_mismatch(root_tag, e.to_string()))
}

/// Children of a composite must be condition objects; anything else is a payload
/// error of the parent
fn check_child(parent_tag: &str, child: &JsonValue, depth: usize) -> Result<(), FilterError> {
    if !child.is_object() {
        return Err(FilterError::payload_mismatch(
            parent_tag,
            format!("expected a condition object, got {}", child),
        ));
    }
    check_node(child, depth)
}

fn check_node(node: &JsonValue, depth: usize) -> Result<(), FilterError> {
    if depth > MAX_FILTER_DEPTH {
        return Err(FilterError::InvalidJson(format!(
            "Filter nesting exceeds maximum depth of {}",
            MAX_FILTER_DEPTH
        )));
    }

    let object = node
        .as_object()
        .ok_or_else(|| FilterError::InvalidJson("condition must be a JSON object".to_string()))?;
    let tag = object
        .get("type")
        .and_then(JsonValue::as_str)
        .ok_or_else(|| FilterError::InvalidJson("condition is missing its \"type\" tag".to_string()))?;
    let condition_type: ConditionType = tag.parse()?;

    match condition_type {
        ConditionType::And | ConditionType::Or => {
            let children = object
                .get("conditions")
                .and_then(JsonValue::as_array)
                .ok_or_else(|| FilterError::payload_mismatch(tag, "expected a \"conditions\" array"))?;
            for child in children {
                check_child(tag, child, depth + 1)?;
            }
        }
        ConditionType::Not => match object.get("condition") {
            Some(child) if !child.is_null() => check_child(tag, child, depth + 1)?,
            _ => {
                return Err(FilterError::payload_mismatch(
                    tag,
                    "expected a \"condition\" object",
                ));
            }
        },
        ConditionType::Group | ConditionType::Where => match object.get("condition") {
            None | Some(JsonValue::Null) => {}
            Some(child) => check_child(tag, child, depth + 1)?,
        },
        _ => {
            Condition::deserialize(node)
                .map_err(|e| FilterError::payload_mismatch(tag, e.to_string()))?;
        }
    }
    Ok(())
}
