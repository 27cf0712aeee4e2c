use crate::core::strings;
use crate::types::{
    comment::{Comment, CommentObject},
    errors::RecordError,
};

const KEYWORD: &str = "CM_";

/// Decode a `CM_` comment line. Four shapes are accepted:
///
/// - `CM_ "<text>";` (file-level)
/// - `CM_ BO_ <ref> "<text>";` (message-level)
/// - `CM_ BU_ <name> "<text>";` (node-level)
/// - `CM_ SG_ <ref> <signal> "<text>";` (signal-level, stored with the
///   combined key `"<ref> <signal>"`)
///
/// The trailing `;` is optional; any other leading-group combination is a
/// syntax error.
pub(crate) fn decode(line: &str) -> Result<Comment, RecordError> {
    let rest = line
        .trim()
        .strip_prefix(KEYWORD)
        .ok_or_else(|| syntax("missing CM_ keyword".to_string()))?
        .trim_start()
        .trim_end();
    let rest = rest.strip_suffix(';').map(str::trim_end).unwrap_or(rest);

    if rest.starts_with('"') {
        return Ok(Comment {
            object: CommentObject::File,
            object_name: String::new(),
            text: quoted_text(rest)?,
        });
    }

    let (tag, after) = rest
        .split_once(char::is_whitespace)
        .ok_or_else(|| syntax("missing comment text".to_string()))?;

    match tag {
        "BO_" | "BU_" => {
            let (object_name, text_part) = after
                .trim_start()
                .split_once(char::is_whitespace)
                .ok_or_else(|| syntax("missing comment text".to_string()))?;
            if object_name.contains('"') {
                return Err(syntax(format!("malformed object reference '{object_name}'")));
            }
            let object = if tag == "BO_" {
                CommentObject::Message
            } else {
                CommentObject::Node
            };
            Ok(Comment {
                object,
                object_name: object_name.to_string(),
                text: quoted_text(text_part.trim_start())?,
            })
        }
        "SG_" => {
            let after = after.trim_start();
            let (message_ref, rest) = after
                .split_once(char::is_whitespace)
                .ok_or_else(|| syntax("missing signal name".to_string()))?;
            if message_ref.contains('"') {
                return Err(syntax(format!("malformed message reference '{message_ref}'")));
            }
            let (signal_name, text_part) = rest
                .trim_start()
                .split_once(char::is_whitespace)
                .ok_or_else(|| syntax("missing comment text".to_string()))?;
            if !signal_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
            {
                return Err(syntax(format!("malformed signal name '{signal_name}'")));
            }
            Ok(Comment {
                object: CommentObject::Signal,
                object_name: format!("{message_ref} {signal_name}"),
                text: quoted_text(text_part.trim_start())?,
            })
        }
        other => Err(syntax(format!("unsupported comment target '{other}'"))),
    }
}

/// The comment text must be exactly one quoted run with no embedded quotes.
fn quoted_text(s: &str) -> Result<String, RecordError> {
    strings::unquote(s)
        .map(str::to_string)
        .ok_or_else(|| syntax(format!("malformed quoted text '{s}'")))
}

fn syntax(detail: String) -> RecordError {
    RecordError::Syntax {
        keyword: KEYWORD,
        detail,
    }
}
