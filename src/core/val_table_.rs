use std::collections::BTreeMap;

use crate::core::strings;
use crate::types::{errors::RecordError, value_table::ValueTable};

const KEYWORD: &str = "VAL_TABLE_";

/// Decode a `VAL_TABLE_ <name> <value> "<label>" … ;` line.
///
/// The remainder after the name must tokenize into an even count of
/// `(integer, quoted-string)` pairs; labels may contain spaces. Duplicate
/// keys are last-write-wins.
pub(crate) fn decode(line: &str) -> Result<ValueTable, RecordError> {
    let rest = line
        .trim()
        .strip_prefix(KEYWORD)
        .ok_or_else(|| syntax("missing VAL_TABLE_ keyword".to_string()))?
        .trim();
    let rest = rest
        .strip_suffix(';')
        .ok_or_else(|| syntax("missing terminating ';'".to_string()))?;

    let tokens = strings::tokenize_quoted(rest);
    let mut it = tokens.iter();

    let name = it
        .next()
        .filter(|tok| !tok.starts_with('"'))
        .ok_or_else(|| syntax("missing table name".to_string()))?
        .clone();

    let mut values: BTreeMap<i64, String> = BTreeMap::new();
    while let Some(key_token) = it.next() {
        let key: i64 = key_token.parse().map_err(|_| RecordError::InvalidInt {
            token: key_token.clone(),
        })?;
        let label_token = it
            .next()
            .ok_or_else(|| syntax(format!("value {key} has no label (odd token count)")))?;
        let label = strings::unquote(label_token)
            .ok_or_else(|| syntax(format!("expected a quoted label, found '{label_token}'")))?;
        values.insert(key, label.to_string()); // last write wins
    }

    Ok(ValueTable { name, values })
}

fn syntax(detail: String) -> RecordError {
    RecordError::Syntax {
        keyword: KEYWORD,
        detail,
    }
}
