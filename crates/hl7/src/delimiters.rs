//! HL7 v2 delimiter set (MSH-1 and MSH-2).

use crate::error::{BuildError, Result};
use crate::message::Segment;

/// The five delimiters declared by a message header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiters {
    /// Field separator (MSH-1), normally `|`.
    pub field: char,
    /// Component separator, normally `^`.
    pub component: char,
    /// Repetition separator, normally `~`.
    pub repetition: char,
    /// Escape character, normally `\`.
    pub escape: char,
    /// Sub-component separator, normally `&`.
    pub subcomponent: char,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            field: '|',
            component: '^',
            repetition: '~',
            escape: '\\',
            subcomponent: '&',
        }
    }
}

impl Delimiters {
    /// Parses MSH-1 and MSH-2 into a delimiter set.
    ///
    /// MSH-1 must be a single character and MSH-2 exactly four. All five
    /// characters must be distinct, and none may be alphanumeric, whitespace
    /// or a control character.
    pub fn parse(field_separator: &str, encoding_characters: &str) -> Result<Self> {
        let mut field = field_separator.chars();
        let field = match (field.next(), field.next()) {
            (Some(c), None) => c,
            _ => {
                return Err(BuildError::InvalidDelimiters {
                    reason: format!(
                        "field separator must be one character, got {:?}",
                        field_separator
                    ),
                });
            }
        };

        let encoding: Vec<char> = encoding_characters.chars().collect();
        if encoding.len() != 4 {
            return Err(BuildError::InvalidDelimiters {
                reason: format!(
                    "encoding characters must be four characters, got {:?}",
                    encoding_characters
                ),
            });
        }

        let delimiters = Self {
            field,
            component: encoding[0],
            repetition: encoding[1],
            escape: encoding[2],
            subcomponent: encoding[3],
        };

        let all = delimiters.as_array();
        for (i, c) in all.iter().enumerate() {
            if c.is_alphanumeric() || c.is_whitespace() || c.is_control() {
                return Err(BuildError::InvalidDelimiters {
                    reason: format!("{:?} cannot be used as a delimiter", c),
                });
            }
            if all[i + 1..].contains(c) {
                return Err(BuildError::InvalidDelimiters {
                    reason: format!("{:?} is used for more than one delimiter", c),
                });
            }
        }

        Ok(delimiters)
    }

    /// Reads the delimiters from an `MSH` segment.
    pub fn from_msh(msh: &Segment) -> Result<Self> {
        if msh.id() != "MSH" {
            return Err(BuildError::InvalidDelimiters {
                reason: format!("expected MSH segment, got {}", msh.id()),
            });
        }
        Self::parse(
            msh.field(1).as_text().unwrap_or_default(),
            msh.field(2).as_text().unwrap_or_default(),
        )
    }

    /// Returns the MSH-2 representation (`^~\&` by default).
    pub fn encoding_characters(&self) -> String {
        [self.component, self.repetition, self.escape, self.subcomponent]
            .iter()
            .collect()
    }

    /// Returns the MSH-1 representation.
    pub fn field_separator(&self) -> String {
        self.field.to_string()
    }

    fn as_array(&self) -> [char; 5] {
        [
            self.field,
            self.component,
            self.repetition,
            self.escape,
            self.subcomponent,
        ]
    }
}
