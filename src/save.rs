//! DBC serializer.
//!
//! Deterministic single-pass emission in fixed section order. Serialization
//! never mutates the model and never reorders entities; the only documented
//! losses are namespace body content, baud rates beyond the first and raw
//! sections (see the crate docs).

use std::fmt::{self, Write as FmtWrite};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::types::{
    attributes::AttrType,
    comment::CommentObject,
    database::BusDefinition,
    errors::DbcSaveError,
    signal::{Endianness, MuxRole, Signal, Signess},
};

/// Placeholder transmitter/receiver written when a message or signal names
/// none.
const NO_NODE: &str = "Vector__XXX";

const NS_KEYWORDS: &[&str] = &[
    "NS_DESC_",
    "CM_",
    "BA_DEF_",
    "BA_",
    "VAL_",
    "CAT_DEF_",
    "CAT_",
    "FILTER",
    "BA_DEF_DEF_",
    "EV_DATA_",
    "ENVVAR_DATA_",
    "SGTYPE_",
    "SGTYPE_VAL_",
    "BA_DEF_SGTYPE_",
    "BA_SGTYPE_",
    "SIG_TYPE_REF_",
    "VAL_TABLE_",
    "SIG_GROUP_",
    "SIG_VALTYPE_",
    "SIGTYPE_VALTYPE_",
    "BO_TX_BU_",
    "BA_DEF_REL_",
    "BA_REL_",
    "BA_DEF_DEF_REL_",
    "BU_SG_REL_",
    "BU_EV_REL_",
    "BU_BO_REL_",
];

/// Serializes `db` as DBC text into `writer`.
///
/// # Errors
/// Returns an `Err(DbcSaveError)` on formatting or write failures. A failed
/// save may leave a truncated destination; there is no transactional
/// guarantee.
pub fn save<W: Write>(db: &BusDefinition, mut writer: W) -> Result<(), DbcSaveError> {
    let serialized: String = serialize_bus_definition(db)?;
    writer
        .write_all(serialized.as_bytes())
        .map_err(|source| DbcSaveError::Write { source })?;
    writer
        .flush()
        .map_err(|source| DbcSaveError::Write { source })?;
    Ok(())
}

/// Serializes `db` into DBC text and writes it to `path`.
///
/// Ensures the destination has a `.dbc` extension and creates intermediate
/// directories when needed.
///
/// # Errors
/// Returns an `Err(DbcSaveError)` detailing path, I/O or formatting failures.
pub fn save_to_file(path: &str, db: &BusDefinition) -> Result<(), DbcSaveError> {
    if !path.to_ascii_lowercase().ends_with(".dbc") {
        return Err(DbcSaveError::InvalidExtension {
            path: path.to_string(),
        });
    }

    let path_ref: &Path = Path::new(path);
    if let Some(parent) = path_ref.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| DbcSaveError::CreateDirectory {
            path: parent.display().to_string(),
            source,
        })?;
    }

    let file = File::create(path_ref).map_err(|source| DbcSaveError::CreateFile {
        path: path.to_string(),
        source,
    })?;
    save(db, BufWriter::new(file))?;

    debug!(path, messages = db.messages.len(), "saved DBC file");
    Ok(())
}

fn serialize_bus_definition(db: &BusDefinition) -> Result<String, DbcSaveError> {
    let mut out = String::new();

    write_fmt(&mut out, format_args!("VERSION \"{}\";\n\n", db.version))?;

    // Namespace placeholder block; body content is not round-tripped.
    out.push_str("NS_:\n");
    for keyword in NS_KEYWORDS {
        out.push('\t');
        out.push_str(keyword);
        out.push('\n');
    }
    out.push('\n');

    // The bit-timing line is always emitted: it is what closes the namespace
    // block on reparse. Only the first baud rate survives.
    match db.baud_rates.first() {
        Some(baud) => write_fmt(&mut out, format_args!("BS_: {};\n\n", baud.rate))?,
        None => out.push_str("BS_:\n\n"),
    }

    if !db.nodes.is_empty() {
        out.push_str("BU_:");
        for node in &db.nodes {
            out.push(' ');
            out.push_str(&node.name);
        }
        out.push_str(";\n\n");
    }

    write_value_tables(db, &mut out)?;
    write_attribute_definitions(db, &mut out)?;
    write_attribute_values(db, &mut out)?;
    write_comments(db, &mut out)?;
    write_messages(db, &mut out)?;

    Ok(out)
}

fn write_value_tables(db: &BusDefinition, out: &mut String) -> Result<(), DbcSaveError> {
    for table in &db.value_tables {
        write_fmt(out, format_args!("VAL_TABLE_ {}", table.name))?;
        for (value, label) in &table.values {
            write_fmt(out, format_args!(" {} \"{}\"", value, label))?;
        }
        out.push_str(";\n");
    }
    if !db.value_tables.is_empty() {
        out.push('\n');
    }
    Ok(())
}

fn write_attribute_definitions(db: &BusDefinition, out: &mut String) -> Result<(), DbcSaveError> {
    for def in &db.attributes {
        let mut parts: Vec<String> = vec!["BA_DEF_".to_string()];
        for object in &def.applies_to {
            let keyword = object.keyword();
            if !keyword.is_empty() {
                parts.push(keyword.to_string());
            }
        }
        parts.push(def.name.clone());
        if def.kind == AttrType::Enum {
            parts.push("ENUM".to_string());
            for value in &def.enum_values {
                parts.push(format!("\"{}\"", value));
            }
        } else {
            parts.push(def.kind.keyword().to_string());
            if !def.default_value.is_empty() {
                parts.push(def.default_value.clone());
            }
        }
        write_fmt(out, format_args!("{};\n", parts.join(" ")))?;
    }
    if !db.attributes.is_empty() {
        out.push('\n');
    }
    Ok(())
}

fn write_attribute_values(db: &BusDefinition, out: &mut String) -> Result<(), DbcSaveError> {
    for av in &db.attr_values {
        let mut parts: Vec<String> = vec!["BA_".to_string()];
        let keyword = av.object_type.keyword();
        if !keyword.is_empty() {
            parts.push(keyword.to_string());
        }
        if !av.object_name.is_empty() {
            parts.push(av.object_name.clone());
        }
        parts.push(av.attr_name.clone());
        parts.push(av.value.clone());
        write_fmt(out, format_args!("{};\n", parts.join(" ")))?;
    }
    if !db.attr_values.is_empty() {
        out.push('\n');
    }
    Ok(())
}

/// Comments grouped by object type: file first, then nodes, messages and
/// signals, keeping stored order within each group.
fn write_comments(db: &BusDefinition, out: &mut String) -> Result<(), DbcSaveError> {
    for group in [
        CommentObject::File,
        CommentObject::Node,
        CommentObject::Message,
        CommentObject::Signal,
    ] {
        for comment in db.comments.iter().filter(|c| c.object == group) {
            match group {
                CommentObject::File => {
                    write_fmt(out, format_args!("CM_ \"{}\";\n", comment.text))?;
                }
                CommentObject::Node => {
                    write_fmt(
                        out,
                        format_args!("CM_ BU_ {} \"{}\";\n", comment.object_name, comment.text),
                    )?;
                }
                CommentObject::Message => {
                    write_fmt(
                        out,
                        format_args!("CM_ BO_ {} \"{}\";\n", comment.object_name, comment.text),
                    )?;
                }
                CommentObject::Signal => {
                    // the stored key is "<messageRef> <signalName>"
                    if let Some((message_ref, signal_name)) = comment.object_name.split_once(' ') {
                        write_fmt(
                            out,
                            format_args!(
                                "CM_ SG_ {} {} \"{}\";\n",
                                message_ref, signal_name, comment.text
                            ),
                        )?;
                    }
                }
            }
        }
    }
    if !db.comments.is_empty() {
        out.push('\n');
    }
    Ok(())
}

fn write_messages(db: &BusDefinition, out: &mut String) -> Result<(), DbcSaveError> {
    for message in &db.messages {
        let transmitters = if message.transmitters.is_empty() {
            NO_NODE.to_string()
        } else {
            message.transmitters.join(",")
        };
        write_fmt(
            out,
            format_args!(
                "BO_ {} {}: {} {}\n",
                message.id, message.name, message.dlc, transmitters
            ),
        )?;

        for signal in &message.signals {
            write_signal(signal, out)?;
        }
        out.push('\n');
    }
    Ok(())
}

fn write_signal(signal: &Signal, out: &mut String) -> Result<(), DbcSaveError> {
    let mux_tag = match signal.mux_role {
        MuxRole::None => String::new(),
        MuxRole::Multiplexor => " M".to_string(),
        MuxRole::Multiplexed => format!(" m{}", signal.mux_value),
    };
    let endian = match signal.endian {
        Endianness::Motorola => '0',
        Endianness::Intel => '1',
    };
    let sign = match signal.sign {
        Signess::Unsigned => '+',
        Signess::Signed => '-',
    };
    let receivers = if signal.receivers.is_empty() {
        NO_NODE.to_string()
    } else {
        signal.receivers.join(",")
    };

    // f64 Display is the shortest representation that round-trips
    write_fmt(
        out,
        format_args!(
            "\tSG_ {}{} : {}|{}@{}{} ({},{}) [{}|{}] \"{}\" {}\n",
            signal.name,
            mux_tag,
            signal.bit_start,
            signal.bit_length,
            endian,
            sign,
            signal.factor,
            signal.offset,
            signal.min,
            signal.max,
            signal.unit,
            receivers
        ),
    )
}

fn write_fmt(out: &mut String, args: fmt::Arguments<'_>) -> Result<(), DbcSaveError> {
    out.write_fmt(args).map_err(|_| DbcSaveError::Format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{parse, parse_from_file, parse_str};
    use crate::types::attributes::{AttrObject, AttributeDefinition, AttributeValue};
    use crate::types::message::Message;
    use crate::types::node::BaudRate;

    fn render(db: &BusDefinition) -> String {
        let mut buf: Vec<u8> = Vec::new();
        save(db, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_sections_come_out_in_fixed_order() {
        let dbc_content = r#"
VERSION "1.0";
BS_: 500000;
BU_: A B;
VAL_TABLE_ Gear 0 "P";
BO_ 1 M: 8 A
 SG_ S : 0|8@1+ (1,0) [0|255] "" B
CM_ BU_ A "node a";
"#;
        let db = parse_str(dbc_content).unwrap();
        let text = render(&db);

        let order = [
            text.find("VERSION").unwrap(),
            text.find("NS_:").unwrap(),
            text.find("BS_:").unwrap(),
            text.find("BU_: A B;").unwrap(),
            text.find("VAL_TABLE_ Gear").unwrap(),
            text.find("CM_ BU_ A").unwrap(),
            text.find("BO_ 1 M: 8 A").unwrap(),
            text.find("\tSG_ S : 0|8@1+ (1,0) [0|255] \"\" B").unwrap(),
        ];
        assert!(order.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_round_trip_preserves_nodes_messages_signals() {
        let dbc_content = r#"
VERSION "1.0.2"
BS_: 500000;
BU_: Motor Infotainment Gateway;
VAL_TABLE_ Gear 0 "P" 1 "D" 2 "R";
BO_ 2527679645 Motor_01: 8 Motor
 SG_ Status : 61|1@1+ (1,0) [0|1] "" Infotainment,Gateway
 SG_ Mode M : 0|4@1+ (1,0) [0|15] "" Gateway
 SG_ Detail m2 : 8|8@1- (0.1,-40) [-40|215] "degC" Gateway
BO_ 708 ZV_04: 4 Gateway,Motor
 SG_ Lock : 3|1@0+ (1,0) [0|1] "" Motor
CM_ SG_ 2527679645 Status "Motor status";
"#;
        let first = parse_str(dbc_content).unwrap();
        let second = parse(render(&first).as_bytes()).unwrap();

        assert_eq!(first.version, second.version);
        assert_eq!(first.nodes, second.nodes);
        assert_eq!(first.baud_rates, second.baud_rates);
        assert_eq!(first.value_tables, second.value_tables);
        assert_eq!(first.messages, second.messages);
        assert_eq!(first.comments, second.comments);
    }

    #[test]
    fn test_round_trip_drops_extra_baud_rates() {
        let dbc_content = "BS_: 500000;\nBS_: 250000;\nBU_: A;\n";
        let first = parse_str(dbc_content).unwrap();
        assert_eq!(first.baud_rates.len(), 2);

        let second = parse(render(&first).as_bytes()).unwrap();
        assert_eq!(second.baud_rates, vec![BaudRate { rate: 500000 }]);
        assert_eq!(second.nodes, first.nodes);
    }

    #[test]
    fn test_signal_line_renders_all_fields() {
        let dbc_content = r#"
BO_ 42 Frame: 8 TX
 SG_ Val m7 : 12|10@0- (0.001,-1.5) [-2.5|2.5] "deg per s" A,B
"#;
        let first = parse_str(dbc_content).unwrap();
        let text = render(&first);
        assert!(
            text.contains("\tSG_ Val m7 : 12|10@0- (0.001,-1.5) [-2.5|2.5] \"deg per s\" A,B"),
            "unexpected signal rendering in:\n{text}"
        );

        // and the rendered line decodes back to the same signal
        let second = parse(text.as_bytes()).unwrap();
        assert_eq!(first.messages[0].signals, second.messages[0].signals);
    }

    #[test]
    fn test_signal_comment_reserializes_identically() {
        let db = parse_str("BO_ 100 EngineData: 8 ECU1\nCM_ SG_ 100 RPM \"Engine speed\";\n").unwrap();
        let text = render(&db);
        assert!(text.contains("CM_ SG_ 100 RPM \"Engine speed\";"));
    }

    #[test]
    fn test_empty_model_still_closes_namespace_block() {
        // a bare BS_: line must follow the NS_ block so a reparse leaves
        // namespace mode even when no baud rate is stored
        let db = BusDefinition::default();
        let text = render(&db);
        assert!(text.contains("BS_:\n"));

        let reparsed = parse(text.as_bytes()).unwrap();
        assert!(reparsed.messages.is_empty());
        assert!(reparsed.baud_rates.is_empty());
    }

    #[test]
    fn test_placeholder_transmitter_when_none_stored() {
        let mut db = BusDefinition::default();
        db.messages.push(Message {
            id: 9,
            name: "Orphan".to_string(),
            dlc: 8,
            ..Default::default()
        });
        let text = render(&db);
        assert!(text.contains("BO_ 9 Orphan: 8 Vector__XXX"));
    }

    #[test]
    fn test_attribute_sections_render() {
        let mut db = BusDefinition::default();
        db.attributes.push(AttributeDefinition {
            name: "GenMsgCycleTime".to_string(),
            kind: AttrType::Int,
            applies_to: vec![AttrObject::Message],
            default_value: "100".to_string(),
            enum_values: Vec::new(),
        });
        db.attributes.push(AttributeDefinition {
            name: "SendType".to_string(),
            kind: AttrType::Enum,
            applies_to: vec![AttrObject::Signal],
            default_value: String::new(),
            enum_values: vec!["Cyclic".to_string(), "Event".to_string()],
        });
        db.attr_values.push(AttributeValue {
            object_type: AttrObject::Message,
            object_name: "100".to_string(),
            attr_name: "GenMsgCycleTime".to_string(),
            value: "500".to_string(),
        });

        let text = render(&db);
        assert!(text.contains("BA_DEF_ BO_ GenMsgCycleTime INT 100;"));
        assert!(text.contains("BA_DEF_ SG_ SendType ENUM \"Cyclic\" \"Event\";"));
        assert!(text.contains("BA_ BO_ 100 GenMsgCycleTime 500;"));
    }

    #[test]
    fn test_save_to_file_round_trip() {
        let dbc_content = r#"
VERSION "3";
BU_: A B;
BO_ 5 F: 8 A
 SG_ S : 0|8@1+ (2,1) [0|510] "V" B
"#;
        let db = parse_str(dbc_content).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.dbc");
        let path = path.to_str().unwrap();

        save_to_file(path, &db).unwrap();
        let reparsed = parse_from_file(path).unwrap();

        assert_eq!(reparsed.file_name, "out.dbc");
        assert_eq!(db.version, reparsed.version);
        assert_eq!(db.nodes, reparsed.nodes);
        assert_eq!(db.messages, reparsed.messages);
    }

    #[test]
    fn test_save_to_file_rejects_wrong_extension() {
        let db = BusDefinition::default();
        assert!(matches!(
            save_to_file("out.txt", &db).unwrap_err(),
            DbcSaveError::InvalidExtension { .. }
        ));
    }
}
