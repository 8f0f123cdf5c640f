use std::sync::OnceLock;

use quick_xml::events::Event;
use quick_xml::Reader;
use quick_xml::Writer;
use regex::Regex;

use crate::error::line_column;
use crate::error::TransformError;

static BETWEEN_TAGS: OnceLock<Regex> = OnceLock::new();

pub fn validate_xml(content: &str) -> Result<(), TransformError> {
    walk(content, |_| Ok(()))
}

/// Pretty-prints with two-space indentation. Whitespace-only text between
/// elements is dropped so existing indentation does not accumulate; any other
/// text is written back untouched.
pub fn format_xml(content: &str) -> Result<String, TransformError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    walk(content, |event| {
        if let Event::Text(text) = &event {
            if text.iter().all(u8::is_ascii_whitespace) {
                return Ok(());
            }
        }
        writer
            .write_event(event)
            .map_err(|err| TransformError::Write(err.to_string()))
    })?;
    String::from_utf8(writer.into_inner()).map_err(|err| TransformError::Write(err.to_string()))
}

/// Removes whitespace between tags and any remaining newlines.
pub fn compress_xml(content: &str) -> Result<String, TransformError> {
    validate_xml(content)?;

    let collapsed = between_tags().replace_all(content, "><");
    Ok(collapsed.replace(['\r', '\n'], "").trim().to_string())
}

fn between_tags() -> &'static Regex {
    BETWEEN_TAGS.get_or_init(|| {
        Regex::new(r">\s+<").expect("BETWEEN_TAGS is a valid static regex pattern")
    })
}

fn walk<F>(content: &str, mut visit: F) -> Result<(), TransformError>
where
    F: FnMut(Event<'_>) -> Result<(), TransformError>,
{
    let mut reader = Reader::from_str(content);

    let mut depth = 0usize;
    loop {
        match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(event) => {
                match &event {
                    Event::Start(_) => depth += 1,
                    Event::End(_) => depth = depth.saturating_sub(1),
                    _ => {}
                }
                visit(event)?;
            }
            Err(err) => {
                let offset = usize::try_from(reader.error_position()).unwrap_or(usize::MAX);
                return Err(xml_error(content, offset, err.to_string()));
            }
        }
    }

    if depth > 0 {
        return Err(xml_error(
            content,
            content.len(),
            format!("unexpected end of document: {depth} element(s) left open"),
        ));
    }
    Ok(())
}

fn xml_error(content: &str, offset: usize, message: String) -> TransformError {
    let (line, column) = line_column(content, offset);
    tracing::debug!(line, column, "xml parse failed: {message}");
    TransformError::Xml {
        message,
        line,
        column,
    }
}
