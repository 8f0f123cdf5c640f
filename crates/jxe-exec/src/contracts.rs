use jxe_core::Lang;
use jxe_core::TransformKind;
use jxe_core::TransformReport;
use serde::Deserialize;
use serde::Serialize;

use crate::error::TransformError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformRequest {
    pub run_id: u64,
    pub kind: TransformKind,
    pub lang: Lang,
    pub content: String,
}

/// Wire shape of a finished transform, as handed back to the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessResult {
    pub ok: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
}

impl ProcessResult {
    pub fn success(message: impl Into<String>, output: Option<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
            output,
            line: None,
            column: None,
        }
    }

    pub fn failure(err: &TransformError) -> Self {
        let (line, column) = match err.position() {
            Some((line, column)) => (Some(line), Some(column)),
            None => (None, None),
        };
        Self {
            ok: false,
            message: err.to_string(),
            output: None,
            line,
            column,
        }
    }
}

impl From<ProcessResult> for TransformReport {
    fn from(result: ProcessResult) -> Self {
        Self {
            ok: result.ok,
            message: result.message,
            output: result.output,
            line: result.line,
            column: result.column,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn success_omits_absent_fields_on_the_wire() {
        let result = ProcessResult::success("JSON is valid.", None);
        let json = serde_json::to_string(&result).expect("serialize");
        assert_eq!(json, r#"{"ok":true,"message":"JSON is valid."}"#);
    }

    #[test]
    fn failure_carries_parser_position() {
        let err = crate::json::validate_json("{\n  \"foo\":\n}").expect_err("invalid");
        let result = ProcessResult::failure(&err);
        assert!(!result.ok);
        assert_eq!(result.line, Some(3));
        assert!(result.column.is_some());

        let report = TransformReport::from(result.clone());
        assert_eq!(report.message, result.message);
        assert_eq!(report.line, Some(3));
    }
}
