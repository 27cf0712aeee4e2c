use crate::types::{errors::RecordError, node::BaudRate};

/// Decode a `BS_:` bit-timing line. The rate token is optional: `BS_:`,
/// `BS_: 500000` and `BS_: 500000;` are all accepted. Anything after the
/// first token is ignored.
pub(crate) fn decode(line: &str) -> Result<Option<BaudRate>, RecordError> {
    let rest = line.trim().strip_prefix("BS_").unwrap_or(line).trim_start();
    let rest = rest.strip_prefix(':').unwrap_or(rest);

    let Some(token) = rest.split_ascii_whitespace().next() else {
        return Ok(None);
    };
    let token = token.trim_end_matches(';');
    if token.is_empty() {
        return Ok(None);
    }

    let rate: u32 = token.parse().map_err(|_| RecordError::InvalidInt {
        token: token.to_string(),
    })?;
    Ok(Some(BaudRate { rate }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode() {
        assert_eq!(decode("BS_:").unwrap(), None);
        assert_eq!(decode("BS_: 500000").unwrap(), Some(BaudRate { rate: 500000 }));
        assert_eq!(decode("BS_: 500000;").unwrap(), Some(BaudRate { rate: 500000 }));
        assert_eq!(decode("BS_ : 250000;").unwrap(), Some(BaudRate { rate: 250000 }));
    }

    #[test]
    fn test_decode_rejects_non_integer_rate() {
        assert_eq!(
            decode("BS_: fast;").unwrap_err(),
            RecordError::InvalidInt {
                token: "fast".to_string()
            }
        );
    }
}
