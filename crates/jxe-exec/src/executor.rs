use jxe_core::Lang;
use jxe_core::TransformKind;

use crate::contracts::ProcessResult;
use crate::contracts::TransformRequest;
use crate::error::TransformError;
use crate::json;
use crate::xml;

pub trait Transformer {
    fn run(&self, request: &TransformRequest) -> ProcessResult;
}

/// Runs transforms in-process against the request content.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalTransformer;

impl Transformer for LocalTransformer {
    fn run(&self, request: &TransformRequest) -> ProcessResult {
        let result = match apply(request.kind, request.lang, &request.content) {
            Ok(output) => ProcessResult::success(success_message(request.kind, request.lang), output),
            Err(err) => ProcessResult::failure(&err),
        };
        tracing::info!(
            run_id = request.run_id,
            kind = request.kind.label(),
            lang = request.lang.label(),
            ok = result.ok,
            "transform finished"
        );
        result
    }
}

/// Returns `None` for validation, which produces no output.
pub fn apply(
    kind: TransformKind,
    lang: Lang,
    content: &str,
) -> Result<Option<String>, TransformError> {
    match (kind, lang) {
        (TransformKind::Validate, Lang::Json) => json::validate_json(content).map(|()| None),
        (TransformKind::Validate, Lang::Xml) => xml::validate_xml(content).map(|()| None),
        (TransformKind::Format, Lang::Json) => json::format_json(content).map(Some),
        (TransformKind::Format, Lang::Xml) => xml::format_xml(content).map(Some),
        (TransformKind::Compress, Lang::Json) => json::compress_json(content).map(Some),
        (TransformKind::Compress, Lang::Xml) => xml::compress_xml(content).map(Some),
        (kind, Lang::Plaintext) => Err(TransformError::Unsupported { kind, lang }),
    }
}

fn success_message(kind: TransformKind, lang: Lang) -> &'static str {
    match (kind, lang) {
        (TransformKind::Validate, Lang::Xml) => "XML is well-formed.",
        (TransformKind::Validate, _) => "JSON is valid.",
        (TransformKind::Format, Lang::Xml) => "XML formatted.",
        (TransformKind::Format, _) => "JSON formatted.",
        (TransformKind::Compress, Lang::Xml) => "XML compressed.",
        (TransformKind::Compress, _) => "JSON compressed.",
    }
}
