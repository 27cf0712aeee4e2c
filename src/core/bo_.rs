use crate::types::{errors::RecordError, message::Message};

const KEYWORD: &str = "BO_";

/// Decode a `BO_ <id> <name>: <dlc> <transmitters>` message header line.
///
/// The shape is fixed: exactly four whitespace tokens after the keyword, the
/// name immediately followed by `:`, and the transmitter list as one
/// comma-separated token with no embedded whitespace.
pub(crate) fn decode(line: &str) -> Result<Message, RecordError> {
    let tokens: Vec<&str> = line.trim().split_ascii_whitespace().collect();
    if tokens.first() != Some(&KEYWORD) {
        return Err(syntax("missing BO_ keyword".to_string()));
    }
    if tokens.len() != 5 {
        return Err(syntax(format!(
            "expected 'BO_ <id> <name>: <dlc> <transmitters>', found {} fields",
            tokens.len() - 1
        )));
    }

    let id: u32 = tokens[1].parse().map_err(|_| RecordError::InvalidInt {
        token: tokens[1].to_string(),
    })?;

    let name = tokens[2]
        .strip_suffix(':')
        .filter(|name| !name.is_empty())
        .ok_or_else(|| syntax(format!("message name '{}' must end with ':'", tokens[2])))?;

    let dlc: u16 = tokens[3].parse().map_err(|_| RecordError::InvalidInt {
        token: tokens[3].to_string(),
    })?;

    let transmitters: Vec<String> = tokens[4]
        .split(',')
        .filter(|tx| !tx.is_empty())
        .map(str::to_string)
        .collect();

    Ok(Message {
        id,
        name: name.to_string(),
        dlc,
        transmitters,
        signals: Vec::new(),
        comment: String::new(),
    })
}

fn syntax(detail: String) -> RecordError {
    RecordError::Syntax {
        keyword: KEYWORD,
        detail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode() {
        let msg = decode("BO_ 100 EngineData: 8 ECU1").unwrap();
        assert_eq!(msg.id, 100);
        assert_eq!(msg.name, "EngineData");
        assert_eq!(msg.dlc, 8);
        assert_eq!(msg.transmitters, vec!["ECU1"]);
        assert!(msg.signals.is_empty());
    }

    #[test]
    fn test_decode_comma_separated_transmitters() {
        let msg = decode("BO_ 2527679645 Motor_01: 8 Motor,Backup_Motor").unwrap();
        assert_eq!(msg.transmitters, vec!["Motor", "Backup_Motor"]);
    }

    #[test]
    fn test_decode_rejects_malformed() {
        // missing transmitter field
        assert!(decode("BO_ 100 EngineData: 8").is_err());
        // name without colon
        assert!(decode("BO_ 100 EngineData 8 ECU1").is_err());
        // non-numeric id and dlc
        assert!(matches!(
            decode("BO_ abc EngineData: 8 ECU1").unwrap_err(),
            RecordError::InvalidInt { .. }
        ));
        assert!(matches!(
            decode("BO_ 100 EngineData: x ECU1").unwrap_err(),
            RecordError::InvalidInt { .. }
        ));
    }
}
