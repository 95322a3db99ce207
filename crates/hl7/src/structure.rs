//! Human-readable structure dump.

use std::fmt;

use crate::message::{Message, Value};
use crate::schema::{self, DataType};

const INDENT: &str = "   ";

/// Renders every populated field of a message, one per line, with the
/// descriptive names from the schema.
///
/// ```text
/// ADT_A01 (start)
///    MSH - Message Header
///       MSH-3 Sending Application
///          HD.1 namespace ID: Sistema di partenza
/// ...
/// ADT_A01 (end)
/// ```
pub fn print_structure(message: &dyn Message) -> String {
    StructureDump(message).to_string()
}

struct StructureDump<'a>(&'a dyn Message);

impl fmt::Display for StructureDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let structure = self.0.structure();
        writeln!(f, "{} (start)", structure)?;
        for segment in self.0.segments() {
            let def = schema::segment(segment.id());
            match def {
                Some(def) => writeln!(f, "{}{} - {}", INDENT, segment.id(), def.name)?,
                None => writeln!(f, "{}{}", INDENT, segment.id())?,
            }
            for (position, value) in segment.populated_fields() {
                let field = def.and_then(|def| def.field(position));
                let label = match field {
                    Some(field) => format!("{}-{} {}", segment.id(), position, field.name),
                    None => format!("{}-{}", segment.id(), position),
                };
                write_value(f, 2, &label, value, field.map(|field| field.datatype))?;
            }
        }
        writeln!(f, "{} (end)", structure)
    }
}

fn write_value(
    f: &mut fmt::Formatter<'_>,
    depth: usize,
    label: &str,
    value: &Value,
    datatype: Option<&'static DataType>,
) -> fmt::Result {
    let indent = INDENT.repeat(depth);
    match value {
        Value::Empty => Ok(()),
        Value::Text(text) => writeln!(f, "{}{}: {}", indent, label, text),
        Value::Composite(_) => {
            writeln!(f, "{}{}", indent, label)?;
            let type_name = datatype.map(DataType::name).unwrap_or("?");
            for (position, component) in value.components() {
                let def = datatype.and_then(|datatype| datatype.component(position));
                let label = match def {
                    Some(def) => format!("{}.{} {}", type_name, position, def.name),
                    None => format!("{}.{}", type_name, position),
                };
                write_value(f, depth + 1, &label, component, def.map(|def| def.datatype))?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{RawMessage, Segment};

    fn message() -> RawMessage {
        RawMessage::new(
            "ADT_A01",
            vec![
                Segment::new("EVN", vec![Value::text("A01")]),
                Segment::new(
                    "PV1",
                    vec![
                        Value::Empty,
                        Value::Empty,
                        Value::composite(vec![
                            Value::text("ER"),
                            Value::Empty,
                            Value::Empty,
                            Value::composite(vec![Value::text("General")]),
                        ]),
                    ],
                ),
            ],
        )
    }

    #[test]
    fn test_dump_frames_message() {
        let dump = print_structure(&message());
        assert!(dump.starts_with("ADT_A01 (start)\n"));
        assert!(dump.ends_with("ADT_A01 (end)\n"));
    }

    #[test]
    fn test_dump_uses_schema_names() {
        let dump = print_structure(&message());
        assert!(dump.contains("   EVN - Event Type\n"));
        assert!(dump.contains("      EVN-1 Event Type Code: A01\n"));
        assert!(dump.contains("      PV1-3 Assigned Patient Location\n"));
        assert!(dump.contains("         PL.1 point of care: ER\n"));
        assert!(dump.contains("            HD.1 namespace ID: General\n"));
    }

    #[test]
    fn test_dump_skips_empty_fields() {
        let dump = print_structure(&message());
        assert!(!dump.contains("PV1-1"));
        assert!(!dump.contains("PL.2"));
    }
}
