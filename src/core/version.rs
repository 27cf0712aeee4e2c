use crate::types::errors::RecordError;

const KEYWORD: &str = "VERSION";

/// Decode a `VERSION "<version>"` line. The trailing `;` is optional; any
/// other deviation from the quoted-string shape is an error.
pub(crate) fn decode(line: &str) -> Result<String, RecordError> {
    let rest = line
        .trim()
        .strip_prefix(KEYWORD)
        .ok_or_else(|| syntax("missing VERSION keyword"))?
        .trim();
    let rest = rest.strip_suffix(';').map(str::trim_end).unwrap_or(rest);

    let inner = rest
        .strip_prefix('"')
        .and_then(|r| r.strip_suffix('"'))
        .ok_or_else(|| syntax("expected a quoted version string"))?;
    if inner.contains('"') {
        return Err(syntax("unexpected content after version string"));
    }
    Ok(inner.to_string())
}

fn syntax(detail: &str) -> RecordError {
    RecordError::Syntax {
        keyword: KEYWORD,
        detail: detail.to_string(),
    }
}
