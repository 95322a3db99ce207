//! The schema walk shared by both encoders.
//!
//! Each encoder calls [`segments`] once. It pairs every segment with its
//! schema definition and rejects any populated position the schema does not
//! describe, so the encoders never have to decide what an unknown value
//! means and always agree on which leaves exist.

use courier_hl7::message::{Message, Segment, Value};
use courier_hl7::schema::{self, DataType, SegmentDef};

use crate::error::{Result, SerdeError};

/// A segment with its schema definition.
pub(crate) struct Checked {
    pub segment: Segment,
    pub def: &'static SegmentDef,
}

/// Returns the message's segments in wire order, checked against the schema.
pub(crate) fn segments(message: &dyn Message) -> Result<Vec<Checked>> {
    message
        .segments()
        .into_iter()
        .map(|segment| -> Result<Checked> {
            let def = schema::segment(segment.id())
                .ok_or_else(|| SerdeError::UnknownSegment(segment.id().to_string()))?;
            for (position, value) in segment.populated_fields() {
                let path = format!("{}-{}", segment.id(), position);
                let field = def
                    .field(position)
                    .ok_or_else(|| SerdeError::UnknownField(path.clone()))?;
                check_value(&path, value, field.datatype)?;
            }
            Ok(Checked { segment, def })
        })
        .collect()
}

fn check_value(path: &str, value: &Value, datatype: &'static DataType) -> Result<()> {
    for (position, component) in value.components() {
        let path = format!("{}.{}", path, position);
        let def = datatype
            .component(position)
            .ok_or_else(|| SerdeError::UnknownField(path.clone()))?;
        check_value(&path, component, def.datatype)?;
    }
    Ok(())
}

/// Drops trailing empty values.
pub(crate) fn trimmed(values: &[Value]) -> &[Value] {
    let len = values
        .iter()
        .rposition(|value| !value.is_empty())
        .map_or(0, |i| i + 1);
    &values[..len]
}
