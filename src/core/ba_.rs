use tracing::trace;

// The attribute sub-grammars are intentionally inert: `BA_DEF_` and `BA_`
// lines are recognized and consumed whole (they never reach the raw buffer),
// produce no model mutation and never error. Callers can still build
// attribute sections programmatically; the serializer writes them out.

/// Recognize a `BA_DEF_` attribute-definition line without interpreting it.
pub(crate) fn decode_definition(line: &str) {
    trace!(line, "attribute definition recognized, not interpreted");
}

/// Recognize a `BA_` attribute-value line without interpreting it.
pub(crate) fn decode_value(line: &str) {
    trace!(line, "attribute value recognized, not interpreted");
}
