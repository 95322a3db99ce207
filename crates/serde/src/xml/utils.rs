//! Element naming shared by the XML serializer and deserializer.

/// HL7 v2 XML namespace URI.
///
/// Declared on the root element of every encoded message.
pub const HL7_V2_NAMESPACE: &str = "urn:hl7-org:v2xml";

/// Element name for a field (`PID.5`) or component (`XPN.1`).
pub fn element_name(prefix: &str, position: usize) -> String {
    format!("{}.{}", prefix, position)
}

/// Splits an element name into its prefix and 1-based position.
///
/// Returns `None` when the name does not end in `.<position>`.
pub fn split_element_name(name: &str) -> Option<(&str, usize)> {
    let (prefix, position) = name.rsplit_once('.')?;
    let position = position.parse().ok()?;
    if prefix.is_empty() || position == 0 {
        return None;
    }
    Some((prefix, position))
}

/// Whether `name` can be used as an element name.
///
/// Accepts letters, `_` or `:` first, then letters, digits, `_`, `:`, `-`
/// or `.`.
pub fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | ':' | '-' | '.'))
}

/// Resolves the body of an entity or character reference (`amp`, `#38`, `#x26`).
pub fn resolve_reference(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let number = name.strip_prefix('#')?;
            let code = match number.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}
