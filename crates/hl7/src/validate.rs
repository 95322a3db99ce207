//! Grammar checks applied while a builder assigns values.

use crate::error::{BuildError, Result};

/// Free text: no segment terminator, and only characters an XML 1.0
/// document can carry.
pub(crate) fn text(location: &str, value: &str) -> Result<String> {
    if value.contains(['\r', '\n']) {
        return Err(BuildError::invalid(location, "contains a segment terminator"));
    }
    if !value.chars().all(is_xml_char) {
        return Err(BuildError::invalid(location, "contains a control character"));
    }
    Ok(value.to_string())
}

/// Coded value (`ID`, `IS`): non-empty, no whitespace.
pub(crate) fn code(location: &str, value: &str) -> Result<String> {
    if value.is_empty() {
        return Err(BuildError::invalid(location, "coded value is empty"));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(BuildError::invalid(location, "coded value contains whitespace"));
    }
    if !value.chars().all(is_xml_char) {
        return Err(BuildError::invalid(location, "contains a control character"));
    }
    Ok(value.to_string())
}

/// Time stamp at second precision: exactly 14 ASCII digits.
pub(crate) fn timestamp(location: &str, value: &str) -> Result<String> {
    if value.len() != 14 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(BuildError::invalid(
            location,
            format!("expected yyyyMMddHHmmss, got {:?}", value),
        ));
    }
    Ok(value.to_string())
}

/// Whether `c` belongs to the XML 1.0 `Char` production.
pub fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}
