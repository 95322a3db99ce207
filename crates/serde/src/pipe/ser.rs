//! ER7 serialization.

use std::io::Write;

use courier_hl7::{Delimiters, Message, Segment, Value};
use tracing::trace;

use crate::error::{Result, SerdeError};
use crate::pipe::SegmentTerminator;
use crate::pipe::escape;
use crate::traverse::{self, Checked};

/// Encodes a message as an ER7 string.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use courier_hl7::{MessageFactory, SystemClock};
/// use courier_serde::pipe::{SegmentTerminator, to_pipe_string};
///
/// let factory = MessageFactory::with_defaults(Arc::new(SystemClock));
/// let message = factory.create("A01").unwrap();
/// let er7 = to_pipe_string(message.as_ref(), SegmentTerminator::Cr).unwrap();
/// assert!(er7.starts_with("MSH|^~\\&|Sistema di partenza|"));
/// ```
pub fn to_pipe_string(message: &dyn Message, terminator: SegmentTerminator) -> Result<String> {
    let buffer = to_pipe_vec(message, terminator)?;
    String::from_utf8(buffer).map_err(|e| SerdeError::Utf8(e.utf8_error()))
}

/// Encodes a message as ER7 bytes.
pub fn to_pipe_vec(message: &dyn Message, terminator: SegmentTerminator) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    to_pipe_writer(message, &mut buffer, terminator)?;
    Ok(buffer)
}

/// Encodes a message as ER7 into a writer.
pub fn to_pipe_writer<W: Write>(
    message: &dyn Message,
    writer: W,
    terminator: SegmentTerminator,
) -> Result<()> {
    let segments = traverse::segments(message)?;
    let msh = segments
        .first()
        .filter(|checked| checked.segment.id() == "MSH")
        .ok_or_else(|| SerdeError::Encode("first segment must be MSH".to_string()))?;
    let delimiters =
        Delimiters::from_msh(&msh.segment).map_err(|e| SerdeError::Encode(e.to_string()))?;

    let mut serializer = PipeSerializer {
        writer,
        delimiters,
        terminator,
    };
    for checked in &segments {
        serializer.write_segment(checked)?;
    }
    serializer.writer.flush()?;
    Ok(())
}

struct PipeSerializer<W: Write> {
    writer: W,
    delimiters: Delimiters,
    terminator: SegmentTerminator,
}

impl<W: Write> PipeSerializer<W> {
    fn write_segment(&mut self, checked: &Checked) -> Result<()> {
        let segment = &checked.segment;
        let line = if segment.id() == "MSH" {
            self.header_line(segment)?
        } else {
            let mut line = String::from(segment.id());
            for value in traverse::trimmed(segment.fields()) {
                line.push(self.delimiters.field);
                self.push_value(&mut line, value, 0)?;
            }
            line
        };
        trace!(segment = segment.id(), "Encoded segment");

        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(self.terminator.as_str().as_bytes())?;
        Ok(())
    }

    /// MSH-1 is the separator right after the segment id and MSH-2 is written
    /// raw; numbering of the remaining fields continues from there.
    fn header_line(&self, segment: &Segment) -> Result<String> {
        let mut line = String::from(segment.id());
        line.push(self.delimiters.field);
        line.push_str(&self.delimiters.encoding_characters());
        for value in traverse::trimmed(segment.fields()).iter().skip(2) {
            line.push(self.delimiters.field);
            self.push_value(&mut line, value, 0)?;
        }
        Ok(line)
    }

    fn push_value(&self, out: &mut String, value: &Value, depth: usize) -> Result<()> {
        match value {
            Value::Empty => {}
            Value::Text(text) => escape::escape_into(out, text, &self.delimiters),
            Value::Composite(components) => {
                let separator = match depth {
                    0 => self.delimiters.component,
                    1 => self.delimiters.subcomponent,
                    _ => {
                        return Err(SerdeError::Encode(
                            "values nest deeper than sub-components".to_string(),
                        ));
                    }
                };
                for (i, component) in traverse::trimmed(components).iter().enumerate() {
                    if i > 0 {
                        out.push(separator);
                    }
                    self.push_value(out, component, depth + 1)?;
                }
            }
        }
        Ok(())
    }
}
