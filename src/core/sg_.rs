use crate::types::{
    errors::RecordError,
    signal::{Endianness, MuxRole, Signal, Signess},
};

const KEYWORD: &str = "SG_";

/// Decode a `SG_` signal line:
/// `SG_ <name> [M|m<N>] : <start>|<length>@<endian><sign> (<factor>,<offset>) [<min>|<max>] "<unit>" <receivers…>`
///
/// The unit is matched non-greedily (first quote pair after the range), so it
/// cannot swallow the receiver list. Receivers are split on comma or
/// whitespace; at least one is required.
pub(crate) fn decode(line: &str) -> Result<Signal, RecordError> {
    let rest = line
        .trim()
        .strip_prefix(KEYWORD)
        .ok_or_else(|| syntax("missing SG_ keyword".to_string()))?;
    let (left, right) = rest
        .split_once(':')
        .ok_or_else(|| syntax("missing ':' separator".to_string()))?;

    // Left side: "<name> [M|mX]"
    let mut left_it = left.split_ascii_whitespace();
    let name = left_it
        .next()
        .ok_or_else(|| syntax("missing signal name".to_string()))?;
    let mux_tag = left_it.next();
    if left_it.next().is_some() {
        return Err(syntax("unexpected token before ':'".to_string()));
    }
    let (mux_role, mux_value) = decode_mux_tag(mux_tag)?;

    // Right side, field by field. The '(' of the scaling pair terminates the
    // bit-layout token.
    let right = right.trim();
    let open_paren = right
        .find('(')
        .ok_or_else(|| syntax("missing '(<factor>,<offset>)'".to_string()))?;

    // "<start>|<length>@<endian><sign>"
    let bit_info = right[..open_paren].trim();
    let (position, layout) = bit_info
        .split_once('@')
        .ok_or_else(|| syntax("missing '@' in bit layout".to_string()))?;
    let (start_token, length_token) = position
        .split_once('|')
        .ok_or_else(|| syntax("missing '|' in bit layout".to_string()))?;
    let bit_start: u16 = parse_int(start_token.trim())?;
    let bit_length: u16 = parse_int(length_token.trim())?;

    let mut layout_chars = layout.trim().chars();
    let endian = match layout_chars.next() {
        Some('0') => Endianness::Motorola,
        Some('1') => Endianness::Intel,
        other => {
            return Err(syntax(format!(
                "invalid endianness '{}'",
                other.map(String::from).unwrap_or_default()
            )));
        }
    };
    let sign = match layout_chars.next() {
        Some('+') => Signess::Unsigned,
        Some('-') => Signess::Signed,
        other => {
            return Err(syntax(format!(
                "invalid sign '{}'",
                other.map(String::from).unwrap_or_default()
            )));
        }
    };
    if layout_chars.next().is_some() {
        return Err(syntax("trailing characters after sign".to_string()));
    }

    // "(<factor>,<offset>)"
    let close_paren = right[open_paren..]
        .find(')')
        .map(|i| open_paren + i)
        .ok_or_else(|| syntax("unclosed '(<factor>,<offset>)'".to_string()))?;
    let (factor_token, offset_token) = right[open_paren + 1..close_paren]
        .split_once(',')
        .ok_or_else(|| syntax("missing ',' in '(<factor>,<offset>)'".to_string()))?;
    let factor = parse_float(factor_token)?;
    let offset = parse_float(offset_token)?;

    // "[<min>|<max>]"
    let open_bracket = right[close_paren..]
        .find('[')
        .map(|i| close_paren + i)
        .ok_or_else(|| syntax("missing '[<min>|<max>]'".to_string()))?;
    if !right[close_paren + 1..open_bracket].trim().is_empty() {
        return Err(syntax("unexpected content before '[<min>|<max>]'".to_string()));
    }
    let close_bracket = right[open_bracket..]
        .find(']')
        .map(|i| open_bracket + i)
        .ok_or_else(|| syntax("unclosed '[<min>|<max>]'".to_string()))?;
    let (min_token, max_token) = right[open_bracket + 1..close_bracket]
        .split_once('|')
        .ok_or_else(|| syntax("missing '|' in '[<min>|<max>]'".to_string()))?;
    let min = parse_float(min_token)?;
    let max = parse_float(max_token)?;

    // "<unit>": first quote pair after the range
    let open_quote = right[close_bracket..]
        .find('"')
        .map(|i| close_bracket + i)
        .ok_or_else(|| syntax("missing quoted unit".to_string()))?;
    if !right[close_bracket + 1..open_quote].trim().is_empty() {
        return Err(syntax("unexpected content before unit".to_string()));
    }
    let close_quote = right[open_quote + 1..]
        .find('"')
        .map(|i| open_quote + 1 + i)
        .ok_or_else(|| syntax("unclosed unit string".to_string()))?;
    let unit = right[open_quote + 1..close_quote].to_string();

    // receivers, comma or whitespace separated
    let receivers: Vec<String> = right[close_quote + 1..]
        .split(|c: char| c == ',' || c.is_ascii_whitespace())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect();
    if receivers.is_empty() {
        return Err(syntax("missing receiver list".to_string()));
    }

    Ok(Signal {
        name: name.to_string(),
        bit_start,
        bit_length,
        endian,
        sign,
        factor,
        offset,
        min,
        max,
        unit,
        receivers,
        mux_role,
        mux_value,
        comment: String::new(),
    })
}

/// Decode the optional multiplex tag: absent, `M` (multiplexer switch) or
/// `m<N>` (active when the switch equals N, leading `m`/`M` stripped).
fn decode_mux_tag(tag: Option<&str>) -> Result<(MuxRole, u32), RecordError> {
    match tag {
        None => Ok((MuxRole::None, 0)),
        Some("M") => Ok((MuxRole::Multiplexor, 0)),
        Some(tag) => {
            let digits = tag
                .strip_prefix(['m', 'M'])
                .ok_or_else(|| syntax(format!("invalid multiplex tag '{tag}'")))?;
            let value: u32 = digits.parse().map_err(|_| RecordError::InvalidInt {
                token: digits.to_string(),
            })?;
            Ok((MuxRole::Multiplexed, value))
        }
    }
}

fn parse_int(token: &str) -> Result<u16, RecordError> {
    token.parse().map_err(|_| RecordError::InvalidInt {
        token: token.to_string(),
    })
}

fn parse_float(token: &str) -> Result<f64, RecordError> {
    let token = token.trim();
    token.parse().map_err(|_| RecordError::InvalidFloat {
        token: token.to_string(),
    })
}

fn syntax(detail: String) -> RecordError {
    RecordError::Syntax {
        keyword: KEYWORD,
        detail,
    }
}
