//! ER7 deserialization.
//!
//! Decoding is schema-driven: the datatype of each field decides whether its
//! text is split into components and sub-components. Segments are accepted
//! with any of the `\r`, `\n` or `\r\n` terminators.

use courier_hl7::schema::{self, DataType};
use courier_hl7::{Delimiters, RawMessage, Segment, Value};

use crate::error::{Result, SerdeError};
use crate::pipe::escape;

/// Decodes an ER7 message.
///
/// # Examples
///
/// ```
/// use courier_hl7::Message;
/// use courier_serde::pipe::from_pipe_str;
///
/// let message = from_pipe_str("MSH|^~\\&|App||||20240309120507||ADT^A01|1\rEVN|A01\r").unwrap();
/// assert_eq!(message.structure(), "ADT_A01");
/// assert_eq!(message.segments().len(), 2);
/// ```
pub fn from_pipe_str(input: &str) -> Result<RawMessage> {
    let mut lines = input
        .split(['\r', '\n'])
        .filter(|line| !line.is_empty());

    let header = lines
        .next()
        .ok_or_else(|| SerdeError::Decode("message is empty".to_string()))?;
    let deserializer = PipeDeserializer::from_header(header)?;

    let mut segments = vec![deserializer.header_segment(header)?];
    for line in lines {
        segments.push(deserializer.segment(line)?);
    }

    let msh = &segments[0];
    let message_type = msh.field(9);
    let structure = match (
        message_type.component(1).as_text(),
        message_type.component(2).as_text(),
    ) {
        (Some(code), Some(event)) => format!("{}_{}", code, event),
        _ => {
            return Err(SerdeError::Decode(
                "MSH-9 message type is missing".to_string(),
            ));
        }
    };

    Ok(RawMessage::new(structure, segments))
}

/// Decodes an ER7 message from bytes.
pub fn from_pipe_slice(input: &[u8]) -> Result<RawMessage> {
    from_pipe_str(std::str::from_utf8(input)?)
}

struct PipeDeserializer {
    delimiters: Delimiters,
}

impl PipeDeserializer {
    fn from_header(line: &str) -> Result<Self> {
        let rest = line
            .strip_prefix("MSH")
            .ok_or_else(|| SerdeError::Decode("message must start with MSH".to_string()))?;
        let mut chars = rest.chars();
        let field = chars
            .next()
            .ok_or_else(|| SerdeError::Decode("MSH-1 field separator is missing".to_string()))?;
        let encoding: String = chars.take_while(|c| *c != field).collect();
        let delimiters = Delimiters::parse(&field.to_string(), &encoding)
            .map_err(|e| SerdeError::Decode(e.to_string()))?;
        Ok(Self { delimiters })
    }

    fn header_segment(&self, line: &str) -> Result<Segment> {
        let def = schema::segment("MSH")
            .ok_or_else(|| SerdeError::UnknownSegment("MSH".to_string()))?;
        let rest = &line[3 + self.delimiters.field.len_utf8()..];
        let mut fields = vec![Value::text(self.delimiters.field_separator())];
        for (i, raw) in rest.split(self.delimiters.field).enumerate() {
            let position = i + 2;
            if position == 2 {
                fields.push(Value::text(raw));
                continue;
            }
            fields.push(self.field("MSH", def, position, raw)?);
        }
        Ok(Segment::new("MSH", fields))
    }

    fn segment(&self, line: &str) -> Result<Segment> {
        let mut parts = line.split(self.delimiters.field);
        let id = parts.next().unwrap_or_default();
        let def = schema::segment(id).ok_or_else(|| SerdeError::UnknownSegment(id.to_string()))?;
        let fields = parts
            .enumerate()
            .map(|(i, raw)| self.field(id, def, i + 1, raw))
            .collect::<Result<Vec<_>>>()?;
        Ok(Segment::new(id, fields))
    }

    fn field(
        &self,
        id: &str,
        def: &schema::SegmentDef,
        position: usize,
        raw: &str,
    ) -> Result<Value> {
        if raw.is_empty() {
            return Ok(Value::Empty);
        }
        let path = format!("{}-{}", id, position);
        if raw.contains(self.delimiters.repetition) {
            return Err(SerdeError::Decode(format!(
                "{} has repetitions, which are not supported",
                path
            )));
        }
        let field = def
            .field(position)
            .ok_or_else(|| SerdeError::UnknownField(path.clone()))?;
        self.value(&path, raw, field.datatype, 0)
    }

    fn value(&self, path: &str, raw: &str, datatype: &DataType, depth: usize) -> Result<Value> {
        let separator = match depth {
            0 => Some(self.delimiters.component),
            1 => Some(self.delimiters.subcomponent),
            _ => None,
        };
        match separator {
            Some(separator) if datatype.is_composite() => {
                let components = raw
                    .split(separator)
                    .enumerate()
                    .map(|(i, raw)| {
                        let position = i + 1;
                        let path = format!("{}.{}", path, position);
                        if raw.is_empty() {
                            return Ok(Value::Empty);
                        }
                        let component = datatype
                            .component(position)
                            .ok_or_else(|| SerdeError::UnknownField(path.clone()))?;
                        self.value(&path, raw, component.datatype, depth + 1)
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Value::composite(components))
            }
            _ => {
                if let Some(c) = [self.delimiters.component, self.delimiters.subcomponent]
                    .into_iter()
                    .find(|c| raw.contains(*c))
                {
                    return Err(SerdeError::UnknownField(format!(
                        "{}.{}",
                        path,
                        raw.split(c).count()
                    )));
                }
                Ok(Value::text(escape::unescape(raw, &self.delimiters)?))
            }
        }
    }
}
