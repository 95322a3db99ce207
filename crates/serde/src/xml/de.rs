//! XML deserialization.
//!
//! Reads quick-xml events and rebuilds the generic message. Element names
//! are checked against the schema on the way down: `PID.5` must be a field
//! of the enclosing `PID`, `XPN.1` a component of the enclosing `XPN` field.

use courier_hl7::message::{RawMessage, Segment, Value};
use courier_hl7::schema::{self, DataType, SegmentDef};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{Result, SerdeError};
use crate::xml::utils;

/// Decodes an XML message.
///
/// # Examples
///
/// ```
/// use courier_hl7::Message;
/// use courier_serde::xml::from_xml_str;
///
/// let xml = r#"<?xml version="1.0"?>
/// <ADT_A01 xmlns="urn:hl7-org:v2xml">
///   <EVN>
///     <EVN.1>A01</EVN.1>
///   </EVN>
/// </ADT_A01>"#;
/// let message = from_xml_str(xml).unwrap();
/// assert_eq!(message.structure(), "ADT_A01");
/// ```
pub fn from_xml_str(xml: &str) -> Result<RawMessage> {
    let mut reader = Reader::from_str(xml);
    let mut deserializer = XmlDeserializer::default();

    loop {
        match reader.read_event()? {
            Event::Start(element) => {
                let name = local_name(&element)?;
                deserializer.open(name)?;
            }
            Event::Empty(element) => {
                let name = local_name(&element)?;
                deserializer.open(name)?;
                deserializer.close()?;
            }
            Event::End(_) => deserializer.close()?,
            Event::Text(text) => deserializer.text(&String::from_utf8_lossy(&text))?,
            Event::CData(data) => deserializer.text(&String::from_utf8_lossy(&data))?,
            Event::GeneralRef(reference) => {
                let name = String::from_utf8_lossy(&reference);
                let c = utils::resolve_reference(&name).ok_or_else(|| {
                    SerdeError::Decode(format!("unknown entity reference &{};", name))
                })?;
                deserializer.text(c.encode_utf8(&mut [0; 4]))?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    deserializer.finish()
}

/// Decodes an XML message from bytes.
pub fn from_xml_slice(xml: &[u8]) -> Result<RawMessage> {
    from_xml_str(std::str::from_utf8(xml)?)
}

fn local_name(element: &BytesStart<'_>) -> Result<String> {
    Ok(std::str::from_utf8(element.local_name().as_ref())?.to_string())
}

/// A field or component element being read.
struct Frame {
    path: String,
    position: usize,
    datatype: &'static DataType,
    text: String,
    children: Vec<(usize, Value)>,
}

struct OpenSegment {
    id: String,
    def: &'static SegmentDef,
    fields: Vec<(usize, Value)>,
}

#[derive(Default)]
struct XmlDeserializer {
    structure: Option<String>,
    closed: bool,
    segments: Vec<Segment>,
    segment: Option<OpenSegment>,
    frames: Vec<Frame>,
}

impl XmlDeserializer {
    fn open(&mut self, name: String) -> Result<()> {
        if self.closed {
            return Err(SerdeError::Decode(format!(
                "element <{}> after the root element",
                name
            )));
        }
        if self.structure.is_none() {
            self.structure = Some(name);
            return Ok(());
        }

        let Some(segment) = self.segment.as_ref() else {
            let def =
                schema::segment(&name).ok_or_else(|| SerdeError::UnknownSegment(name.clone()))?;
            self.segment = Some(OpenSegment {
                id: name,
                def,
                fields: Vec::new(),
            });
            return Ok(());
        };

        let (prefix, position) = utils::split_element_name(&name)
            .ok_or_else(|| SerdeError::Decode(format!("unexpected element <{}>", name)))?;

        let frame = match self.frames.last() {
            None => {
                if prefix != segment.id {
                    return Err(SerdeError::Decode(format!(
                        "<{}> inside <{}>",
                        name, segment.id
                    )));
                }
                let path = format!("{}-{}", segment.id, position);
                let field = segment
                    .def
                    .field(position)
                    .ok_or_else(|| SerdeError::UnknownField(path.clone()))?;
                Frame::new(path, position, field.datatype)
            }
            Some(parent) => {
                let path = format!("{}.{}", parent.path, position);
                if prefix != parent.datatype.name() {
                    return Err(SerdeError::Decode(format!(
                        "<{}> where a {} component was expected",
                        name,
                        parent.datatype.name()
                    )));
                }
                let component = parent
                    .datatype
                    .component(position)
                    .ok_or_else(|| SerdeError::UnknownField(path.clone()))?;
                Frame::new(path, position, component.datatype)
            }
        };
        self.frames.push(frame);
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if let Some(frame) = self.frames.pop() {
            let value = if frame.children.is_empty() {
                Value::text(frame.text)
            } else {
                Value::composite(positioned(&frame.path, frame.children)?)
            };
            match self.frames.last_mut() {
                Some(parent) => parent.children.push((frame.position, value)),
                None => {
                    if let Some(segment) = self.segment.as_mut() {
                        segment.fields.push((frame.position, value));
                    }
                }
            }
        } else if let Some(segment) = self.segment.take() {
            let fields = positioned(&segment.id, segment.fields)?;
            self.segments.push(Segment::new(segment.id, fields));
        } else {
            self.closed = true;
        }
        Ok(())
    }

    fn text(&mut self, text: &str) -> Result<()> {
        match self.frames.last_mut() {
            Some(frame) => frame.text.push_str(text),
            None if text.trim().is_empty() => {}
            None => {
                return Err(SerdeError::Decode(format!(
                    "unexpected text {:?} outside a field",
                    text
                )));
            }
        }
        Ok(())
    }

    fn finish(self) -> Result<RawMessage> {
        match self.structure {
            Some(structure) if self.closed => Ok(RawMessage::new(structure, self.segments)),
            _ => Err(SerdeError::Decode("document is incomplete".to_string())),
        }
    }
}

impl Frame {
    fn new(path: String, position: usize, datatype: &'static DataType) -> Self {
        Self {
            path,
            position,
            datatype,
            text: String::new(),
            children: Vec::new(),
        }
    }
}

/// Places `(position, value)` pairs at their 1-based positions.
fn positioned(path: &str, values: Vec<(usize, Value)>) -> Result<Vec<Value>> {
    let len = values.iter().map(|(position, _)| *position).max().unwrap_or(0);
    let mut out = vec![Value::Empty; len];
    let mut seen = vec![false; len];
    for (position, value) in values {
        if seen[position - 1] {
            return Err(SerdeError::Decode(format!(
                "{} repeats position {}, repetitions are not supported",
                path, position
            )));
        }
        seen[position - 1] = true;
        out[position - 1] = value;
    }
    Ok(out)
}
