use crate::ParserError;
use indexmap::IndexMap;
use models::FieldValue;

/// Parse one evaluator output line. Each line is a serialized key/value
/// pair (`"name": "zsh"` or `"source": ["a", "b"]`); wrapping it in braces
/// must yield a single-entry JSON object whose value is a string or an
/// array of strings. Anything else fails loudly rather than being dropped.
pub fn parse_line(line: &str) -> Result<(String, FieldValue), ParserError> {
    let trimmed = line.trim().trim_end_matches(',');
    let wrapped = format!("{{{}}}", trimmed);

    let entries: IndexMap<String, FieldValue> =
        serde_json::from_str(&wrapped).map_err(|e| ParserError::Protocol {
            line: line.to_string(),
            reason: e.to_string(),
        })?;

    let mut entries = entries.into_iter();
    match (entries.next(), entries.next()) {
        (Some((name, value)), None) => Ok((name, value)),
        _ => Err(ParserError::Protocol {
            line: line.to_string(),
            reason: "expected exactly one key/value pair".to_string(),
        }),
    }
}
