use crate::logging::VALUE_FORMAT;
use crate::schema::Value;

/// Prefix of byte payloads rendered as hex.
pub const HEX_MARKER: &str = "(hex) ";

/// Display string of a value that is not expanded into child rows.
///
/// Rules apply in order: sequences show their type name, enums their symbolic
/// name (or the raw number), bytes are text unless a control character forces
/// hex, values without a string conversion show their type name, and
/// everything else its natural string form.
pub fn format_value(value: &Value<'_>) -> String {
    match value {
        Value::Sequence(seq) => seq.type_name().into_owned(),
        Value::Enum(raw, table) => match table.name_of(*raw) {
            Some(name) => name.to_string(),
            None => {
                tracing::trace!(
                    target: VALUE_FORMAT,
                    raw = *raw,
                    enum_type = table.type_name(),
                    "enum value has no symbolic name"
                );
                raw.to_string()
            }
        },
        Value::Bytes(data) => format_bytes(data),
        Value::Composite(gadget) => gadget.type_name().into_owned(),
        Value::Absent(type_name) | Value::Opaque(type_name) => type_name.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Scalar(text) => text.to_string(),
    }
}

/// Renders bytes as text, or as marked hex when any byte is a control character.
pub fn format_bytes(data: &[u8]) -> String {
    if data.iter().any(u8::is_ascii_control) {
        format!("{}{}", HEX_MARKER, hex::encode(data))
    } else {
        String::from_utf8_lossy(data).into_owned()
    }
}

/// Lowercase hex of `data` starting at `offset`.
pub fn data_to_hex(data: &[u8], offset: usize) -> String {
    hex::encode(data.get(offset..).unwrap_or_default())
}

/// Reverses [`format_bytes`] for hex-marked strings.
pub fn decode_hex_display(display: &str) -> Option<Vec<u8>> {
    display
        .strip_prefix(HEX_MARKER)
        .and_then(|encoded| hex::decode(encoded).ok())
}
