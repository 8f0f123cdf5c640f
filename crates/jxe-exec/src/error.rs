use jxe_core::Lang;
use jxe_core::TransformKind;

#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{message}")]
    Xml {
        message: String,
        line: u32,
        column: u32,
    },

    #[error("failed to write output: {0}")]
    Write(String),

    #[error("{} is only supported for JSON/XML.", operation_noun(.kind))]
    Unsupported { kind: TransformKind, lang: Lang },
}

impl TransformError {
    /// 1-based position of the failure, when the parser reported one.
    pub fn position(&self) -> Option<(u32, u32)> {
        match self {
            Self::Json(err) if err.line() > 0 => {
                Some((saturating_u32(err.line()), saturating_u32(err.column())))
            }
            Self::Xml { line, column, .. } => Some((*line, *column)),
            _ => None,
        }
    }
}

fn operation_noun(kind: &TransformKind) -> &'static str {
    match kind {
        TransformKind::Format => "Formatting",
        TransformKind::Validate => "Validation",
        TransformKind::Compress => "Compression",
    }
}

pub(crate) fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// Maps a byte offset into `content` to a 1-based line and column.
pub(crate) fn line_column(content: &str, offset: usize) -> (u32, u32) {
    let mut end = offset.min(content.len());
    while !content.is_char_boundary(end) {
        end -= 1;
    }
    let before = &content[..end];
    let line = before.matches('\n').count() + 1;
    let column = match before.rfind('\n') {
        Some(newline) => before[newline + 1..].chars().count() + 1,
        None => before.chars().count() + 1,
    };
    (saturating_u32(line), saturating_u32(column))
}
