use serde_json::Value;

use crate::error::TransformError;

pub fn validate_json(content: &str) -> Result<(), TransformError> {
    serde_json::from_str::<Value>(content)?;
    Ok(())
}

/// Re-indents with two spaces. Object keys keep their source order.
pub fn format_json(content: &str) -> Result<String, TransformError> {
    let value: Value = serde_json::from_str(content)?;
    Ok(serde_json::to_string_pretty(&value)?)
}

pub fn compress_json(content: &str) -> Result<String, TransformError> {
    let value: Value = serde_json::from_str(content)?;
    Ok(serde_json::to_string(&value)?)
}
