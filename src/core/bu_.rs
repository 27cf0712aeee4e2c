use crate::types::node::Node;

/// Decode a `BU_:` line listing node names, preserving declaration order and
/// duplicates. The trailing `;` is stripped before tokenizing, so
/// `BU_: ECU1 ECU2;` yields `ECU2`, not `ECU2;`.
pub(crate) fn decode(line: &str) -> Vec<Node> {
    let rest = line.trim().trim_end_matches(';');
    let rest = rest.strip_prefix("BU_").unwrap_or(rest).trim_start();
    let rest = rest.strip_prefix(':').unwrap_or(rest);

    rest.split_ascii_whitespace()
        .map(|name| Node {
            name: name.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(nodes: &[Node]) -> Vec<&str> {
        nodes.iter().map(|n| n.name.as_str()).collect()
    }

    #[test]
    fn test_decode() {
        assert_eq!(names(&decode("BU_: ECU1 ECU2")), vec!["ECU1", "ECU2"]);
        assert_eq!(names(&decode("BU_: ECU1 ECU2;")), vec!["ECU1", "ECU2"]);
        assert_eq!(names(&decode("BU_ : Gateway")), vec!["Gateway"]);
        assert!(decode("BU_:").is_empty());
    }

    #[test]
    fn test_decode_preserves_order_and_duplicates() {
        assert_eq!(
            names(&decode("BU_: B A B;")),
            vec!["B", "A", "B"]
        );
    }
}
