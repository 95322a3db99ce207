//! Generic, position-based view of an HL7 v2 message.
//!
//! Typed messages convert into this view through [`Message::segments`]. The
//! encoders in `courier-serde` only ever see this representation, so a field
//! added to a typed segment is picked up by every encoding at once.

use std::any::Any;
use std::fmt;

static EMPTY: Value = Value::Empty;

/// A field, component or sub-component value.
///
/// Constructors normalise their input: empty text becomes [`Value::Empty`],
/// trailing empty components are dropped and a composite without any
/// populated component becomes [`Value::Empty`]. Two values describing the
/// same logical content therefore compare equal no matter how they were
/// produced (built, decoded from pipe, decoded from XML).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Value {
    /// Unset. Serializes as zero-length.
    #[default]
    Empty,
    /// A primitive value (`ST`, `ID`, `IS`, ...).
    Text(String),
    /// Ordered components; index 0 is component 1.
    Composite(Vec<Value>),
}

impl Value {
    /// Creates a primitive value.
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            Value::Empty
        } else {
            Value::Text(value)
        }
    }

    /// Creates a composite value from ordered components.
    pub fn composite(mut components: Vec<Value>) -> Self {
        while components.last().is_some_and(Value::is_empty) {
            components.pop();
        }
        if components.is_empty() {
            Value::Empty
        } else {
            Value::Composite(components)
        }
    }

    /// Returns `true` if nothing is populated.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Empty => true,
            Value::Text(text) => text.is_empty(),
            Value::Composite(components) => components.iter().all(Value::is_empty),
        }
    }

    /// Returns the primitive value, if this is one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the 1-based component, or [`Value::Empty`] when unset.
    pub fn component(&self, position: usize) -> &Value {
        match self {
            Value::Composite(components) => position
                .checked_sub(1)
                .and_then(|i| components.get(i))
                .unwrap_or(&EMPTY),
            _ => &EMPTY,
        }
    }

    /// Returns the populated components with their 1-based positions.
    pub fn components(&self) -> impl Iterator<Item = (usize, &Value)> {
        let components: &[Value] = match self {
            Value::Composite(components) => components,
            _ => &[],
        };
        components
            .iter()
            .enumerate()
            .filter(|(_, value)| !value.is_empty())
            .map(|(i, value)| (i + 1, value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::text(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::text(value)
    }
}

/// A named segment: an identifier plus ordered 1-based fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    id: String,
    fields: Vec<Value>,
}

impl Segment {
    /// Creates a segment. `fields[0]` is field 1; trailing empty fields are dropped.
    pub fn new(id: impl Into<String>, mut fields: Vec<Value>) -> Self {
        while fields.last().is_some_and(Value::is_empty) {
            fields.pop();
        }
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Returns the segment identifier (`MSH`, `PID`, ...).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the fields up to the last populated one.
    pub fn fields(&self) -> &[Value] {
        &self.fields
    }

    /// Returns the 1-based field, or [`Value::Empty`] when unset.
    pub fn field(&self, position: usize) -> &Value {
        position
            .checked_sub(1)
            .and_then(|i| self.fields.get(i))
            .unwrap_or(&EMPTY)
    }

    /// Returns the populated fields with their 1-based positions.
    pub fn populated_fields(&self) -> impl Iterator<Item = (usize, &Value)> {
        self.fields
            .iter()
            .enumerate()
            .filter(|(_, value)| !value.is_empty())
            .map(|(i, value)| (i + 1, value))
    }
}

/// Any HL7 v2 message the gateway can encode.
pub trait Message: fmt::Debug + Send + Sync {
    /// The message structure name, e.g. `ADT_A01`.
    fn structure(&self) -> &str;

    /// The segments in wire order.
    fn segments(&self) -> Vec<Segment>;

    /// Gives access to the concrete type for typed accessors.
    fn as_any(&self) -> &dyn Any;
}

/// A message with no typed layer, as produced by the decoders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMessage {
    structure: String,
    segments: Vec<Segment>,
}

impl RawMessage {
    /// Creates a raw message.
    pub fn new(structure: impl Into<String>, segments: Vec<Segment>) -> Self {
        Self {
            structure: structure.into(),
            segments,
        }
    }

    /// Returns the first segment with the given id.
    pub fn segment(&self, id: &str) -> Option<&Segment> {
        self.segments.iter().find(|segment| segment.id() == id)
    }
}

impl Message for RawMessage {
    fn structure(&self) -> &str {
        &self.structure
    }

    fn segments(&self) -> Vec<Segment> {
        self.segments.clone()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Flattens a message into `(path, value)` pairs for every populated leaf.
///
/// Paths look like `MSH-10`, `PID-5.1` or `PV1-3.4.1`. The result is in wire
/// order and is independent of the grammar the message came from.
pub fn leaves(message: &dyn Message) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for segment in message.segments() {
        for (position, value) in segment.populated_fields() {
            collect_leaves(&format!("{}-{}", segment.id(), position), value, &mut out);
        }
    }
    out
}

fn collect_leaves(path: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Empty => {}
        Value::Text(text) => out.push((path.to_string(), text.clone())),
        Value::Composite(_) => {
            for (position, component) in value.components() {
                collect_leaves(&format!("{}.{}", path, position), component, out);
            }
        }
    }
}
