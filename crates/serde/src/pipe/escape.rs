//! ER7 escape sequences.
//!
//! | Character | Sequence |
//! |-----------|----------|
//! | field separator | `\F\` |
//! | component separator | `\S\` |
//! | sub-component separator | `\T\` |
//! | repetition separator | `\R\` |
//! | escape character | `\E\` |
//!
//! The escape character itself comes from MSH-2, so `\` above stands for
//! whatever the message declares.

use courier_hl7::Delimiters;

use crate::error::{Result, SerdeError};

/// Appends `text` to `out`, escaping every delimiter.
pub fn escape_into(out: &mut String, text: &str, delimiters: &Delimiters) {
    for c in text.chars() {
        let code = if c == delimiters.field {
            'F'
        } else if c == delimiters.component {
            'S'
        } else if c == delimiters.subcomponent {
            'T'
        } else if c == delimiters.repetition {
            'R'
        } else if c == delimiters.escape {
            'E'
        } else {
            out.push(c);
            continue;
        };
        out.push(delimiters.escape);
        out.push(code);
        out.push(delimiters.escape);
    }
}

/// Escapes every delimiter in `text`.
pub fn escape(text: &str, delimiters: &Delimiters) -> String {
    let mut out = String::with_capacity(text.len());
    escape_into(&mut out, text, delimiters);
    out
}

/// Resolves escape sequences.
///
/// Sequences other than the five delimiter escapes (formatting commands,
/// hexadecimal data) are kept verbatim.
pub fn unescape(text: &str, delimiters: &Delimiters) -> Result<String> {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(delimiters.escape) {
        out.push_str(&rest[..start]);
        let after = &rest[start + delimiters.escape.len_utf8()..];
        let end = after.find(delimiters.escape).ok_or_else(|| {
            SerdeError::Decode(format!("unterminated escape sequence in {:?}", text))
        })?;
        match &after[..end] {
            "F" => out.push(delimiters.field),
            "S" => out.push(delimiters.component),
            "T" => out.push(delimiters.subcomponent),
            "R" => out.push(delimiters.repetition),
            "E" => out.push(delimiters.escape),
            other => {
                out.push(delimiters.escape);
                out.push_str(other);
                out.push(delimiters.escape);
            }
        }
        rest = &after[end + delimiters.escape.len_utf8()..];
    }
    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_all_delimiters() {
        let d = Delimiters::default();
        assert_eq!(escape("a|b^c&d~e\\f", &d), "a\\F\\b\\S\\c\\T\\d\\R\\e\\E\\f");
    }

    #[test]
    fn test_plain_text_untouched() {
        let d = Delimiters::default();
        assert_eq!(escape("Via Mazzini 93", &d), "Via Mazzini 93");
        assert_eq!(unescape("Via Mazzini 93", &d).unwrap(), "Via Mazzini 93");
    }

    #[test]
    fn test_unescape() {
        let d = Delimiters::default();
        assert_eq!(unescape("Smith\\S\\Jones\\T\\Co", &d).unwrap(), "Smith^Jones&Co");
        assert_eq!(unescape("\\E\\\\F\\", &d).unwrap(), "\\|");
    }

    #[test]
    fn test_unknown_sequence_kept() {
        let d = Delimiters::default();
        assert_eq!(unescape("line\\.br\\next", &d).unwrap(), "line\\.br\\next");
    }

    #[test]
    fn test_unterminated_sequence() {
        let d = Delimiters::default();
        assert!(matches!(unescape("bad\\F", &d), Err(SerdeError::Decode(_))));
    }

    #[test]
    fn test_custom_escape_character() {
        let d = Delimiters::parse("#", "$%@!").unwrap();
        assert_eq!(escape("a#b", &d), "a@F@b");
        assert_eq!(unescape("a@F@b", &d).unwrap(), "a#b");
    }
}
