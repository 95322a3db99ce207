//! XML serialization.
//!
//! Walks the checked segments and writes quick-xml events directly, indented
//! by two spaces.

use std::io::Write;

use courier_hl7::{Message, is_xml_char};
use courier_hl7::message::Value;
use courier_hl7::schema::DataType;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use tracing::trace;

use crate::error::{Result, SerdeError};
use crate::traverse::{self, Checked};
use crate::xml::utils;

/// Encodes a message as an XML string.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use courier_hl7::{MessageFactory, SystemClock};
/// use courier_serde::xml::to_xml_string;
///
/// let factory = MessageFactory::with_defaults(Arc::new(SystemClock));
/// let message = factory.create("A01").unwrap();
/// let xml = to_xml_string(message.as_ref()).unwrap();
/// assert!(xml.contains("<ADT_A01 xmlns=\"urn:hl7-org:v2xml\">"));
/// ```
pub fn to_xml_string(message: &dyn Message) -> Result<String> {
    let buffer = to_xml_vec(message)?;
    String::from_utf8(buffer).map_err(|e| SerdeError::Utf8(e.utf8_error()))
}

/// Encodes a message as XML bytes.
pub fn to_xml_vec(message: &dyn Message) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    to_xml_writer(message, &mut buffer)?;
    Ok(buffer)
}

/// Encodes a message as XML into a writer.
pub fn to_xml_writer<W: Write>(message: &dyn Message, writer: W) -> Result<()> {
    let segments = traverse::segments(message)?;
    let mut serializer = XmlSerializer::new(writer);
    serializer.write_message(message.structure(), &segments)?;
    serializer.writer.get_mut().flush()?;
    Ok(())
}

struct XmlSerializer<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> XmlSerializer<W> {
    fn new(writer: W) -> Self {
        Self {
            writer: Writer::new_with_indent(writer, b' ', 2),
        }
    }

    fn write_message(&mut self, structure: &str, segments: &[Checked]) -> Result<()> {
        if !utils::is_xml_name(structure) {
            return Err(SerdeError::Encode(format!(
                "{:?} is not a valid element name",
                structure
            )));
        }

        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut root = BytesStart::new(structure);
        root.push_attribute(("xmlns", utils::HL7_V2_NAMESPACE));
        self.writer.write_event(Event::Start(root))?;

        for checked in segments {
            self.write_segment(checked)?;
        }

        self.writer.write_event(Event::End(BytesEnd::new(structure)))?;
        Ok(())
    }

    fn write_segment(&mut self, checked: &Checked) -> Result<()> {
        let id = checked.segment.id();
        self.writer.write_event(Event::Start(BytesStart::new(id)))?;

        for (position, value) in checked.segment.populated_fields() {
            let field = checked
                .def
                .field(position)
                .ok_or_else(|| SerdeError::UnknownField(format!("{}-{}", id, position)))?;
            let name = utils::element_name(id, position);
            self.write_value(&name, value, field.datatype)?;
        }

        self.writer.write_event(Event::End(BytesEnd::new(id)))?;
        trace!(segment = id, "Encoded segment");
        Ok(())
    }

    fn write_value(&mut self, name: &str, value: &Value, datatype: &DataType) -> Result<()> {
        match value {
            Value::Empty => {}
            Value::Text(text) => {
                if !text.chars().all(is_xml_char) {
                    return Err(SerdeError::Encode(format!(
                        "{} contains a character XML cannot carry",
                        name
                    )));
                }
                self.writer.write_event(Event::Start(BytesStart::new(name)))?;
                self.writer.write_event(Event::Text(BytesText::new(text)))?;
                self.writer.write_event(Event::End(BytesEnd::new(name)))?;
            }
            Value::Composite(_) => {
                self.writer.write_event(Event::Start(BytesStart::new(name)))?;
                for (position, component) in value.components() {
                    let def = datatype.component(position).ok_or_else(|| {
                        SerdeError::UnknownField(utils::element_name(name, position))
                    })?;
                    let child = utils::element_name(datatype.name(), position);
                    self.write_value(&child, component, def.datatype)?;
                }
                self.writer.write_event(Event::End(BytesEnd::new(name)))?;
            }
        }
        Ok(())
    }
}
