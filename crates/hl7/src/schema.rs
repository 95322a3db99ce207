//! Static segment and datatype definitions.
//!
//! Positions follow HL7 v2.3, the structure version of the messages built by
//! this crate. Only the segments the gateway produces are described. Fields a
//! segment never populates are left out of its definition, and encoders treat
//! a populated position without a definition as an error.

/// An HL7 datatype.
#[derive(Debug)]
pub enum DataType {
    /// A primitive type carrying text directly (`ST`, `ID`, `IS`, `SI`).
    Primitive(&'static str),
    /// A composite type with named components.
    Composite {
        /// Type name used for XML component elements (`XPN.1`).
        name: &'static str,
        /// Components in order; index 0 is component 1.
        components: &'static [Component],
    },
}

impl DataType {
    /// Returns the type name.
    pub fn name(&self) -> &'static str {
        match *self {
            DataType::Primitive(name) => name,
            DataType::Composite { name, .. } => name,
        }
    }

    /// Returns the 1-based component definition of a composite type.
    pub fn component(&self, position: usize) -> Option<&'static Component> {
        match *self {
            DataType::Primitive(_) => None,
            DataType::Composite { components, .. } => {
                position.checked_sub(1).and_then(|i| components.get(i))
            }
        }
    }

    /// Returns `true` for composite types.
    pub fn is_composite(&self) -> bool {
        matches!(self, DataType::Composite { .. })
    }
}

/// A named component of a composite datatype.
#[derive(Debug)]
pub struct Component {
    /// Human-readable component name.
    pub name: &'static str,
    /// Component datatype.
    pub datatype: &'static DataType,
}

/// A field definition inside a segment.
#[derive(Debug)]
pub struct FieldDef {
    /// 1-based position.
    pub position: usize,
    /// Human-readable field name.
    pub name: &'static str,
    /// Field datatype.
    pub datatype: &'static DataType,
}

/// A segment definition.
#[derive(Debug)]
pub struct SegmentDef {
    /// Three-letter segment id.
    pub id: &'static str,
    /// Human-readable segment name.
    pub name: &'static str,
    /// Defined fields, ordered by position.
    pub fields: &'static [FieldDef],
}

impl SegmentDef {
    /// Returns the definition of the field at `position`.
    pub fn field(&self, position: usize) -> Option<&'static FieldDef> {
        self.fields.iter().find(|field| field.position == position)
    }
}

macro_rules! component {
    ($name:expr, $datatype:expr) => {
        Component {
            name: $name,
            datatype: &$datatype,
        }
    };
}

macro_rules! field {
    ($position:expr, $name:expr, $datatype:expr) => {
        FieldDef {
            position: $position,
            name: $name,
            datatype: &$datatype,
        }
    };
}

/// String data.
pub static ST: DataType = DataType::Primitive("ST");
/// Coded value for HL7-defined tables.
pub static ID: DataType = DataType::Primitive("ID");
/// Coded value for user-defined tables.
pub static IS: DataType = DataType::Primitive("IS");
/// Sequence id.
pub static SI: DataType = DataType::Primitive("SI");

/// Hierarchic designator.
pub static HD: DataType = DataType::Composite {
    name: "HD",
    components: &[
        component!("namespace ID", IS),
        component!("universal ID", ST),
        component!("universal ID type", ID),
    ],
};

/// Time stamp.
pub static TS: DataType = DataType::Composite {
    name: "TS",
    components: &[
        component!("time of an event", ST),
        component!("degree of precision", ST),
    ],
};

/// Message type.
pub static CM_MSG: DataType = DataType::Composite {
    name: "CM_MSG",
    components: &[
        component!("message type", ID),
        component!("trigger event", ID),
    ],
};

/// Processing type.
pub static PT: DataType = DataType::Composite {
    name: "PT",
    components: &[
        component!("processing ID", ID),
        component!("processing mode", ID),
    ],
};

/// Extended composite id with check digit.
pub static CX: DataType = DataType::Composite {
    name: "CX",
    components: &[
        component!("ID", ST),
        component!("check digit", ST),
        component!("code identifying the check digit scheme employed", ID),
        component!("assigning authority", HD),
        component!("identifier type code", IS),
        component!("assigning facility", HD),
    ],
};

/// Extended person name.
pub static XPN: DataType = DataType::Composite {
    name: "XPN",
    components: &[
        component!("family name", ST),
        component!("given name", ST),
        component!("middle initial or name", ST),
        component!("suffix", ST),
        component!("prefix", ST),
        component!("degree", ST),
        component!("name type code", ID),
    ],
};

/// Extended address.
pub static XAD: DataType = DataType::Composite {
    name: "XAD",
    components: &[
        component!("street address", ST),
        component!("other designation", ST),
        component!("city", ST),
        component!("state or province", ST),
        component!("zip or postal code", ST),
        component!("country", ID),
        component!("address type", ID),
        component!("other geographic designation", ST),
    ],
};

/// Person location.
pub static PL: DataType = DataType::Composite {
    name: "PL",
    components: &[
        component!("point of care", IS),
        component!("room", IS),
        component!("bed", IS),
        component!("facility", HD),
        component!("location status", IS),
        component!("person location type", IS),
        component!("building", IS),
        component!("floor", IS),
        component!("location type", ST),
    ],
};

/// Extended composite id number and name.
pub static XCN: DataType = DataType::Composite {
    name: "XCN",
    components: &[
        component!("ID number", ST),
        component!("family name", ST),
        component!("given name", ST),
        component!("middle initial or name", ST),
        component!("suffix", ST),
        component!("prefix", ST),
        component!("degree", ST),
        component!("source table", ID),
        component!("assigning authority", HD),
        component!("name type code", ID),
        component!("identifier check digit", ST),
        component!("code identifying the check digit scheme employed", ID),
        component!("identifier type code", IS),
    ],
};

/// Message header.
pub static MSH: SegmentDef = SegmentDef {
    id: "MSH",
    name: "Message Header",
    fields: &[
        field!(1, "Field Separator", ST),
        field!(2, "Encoding Characters", ST),
        field!(3, "Sending Application", HD),
        field!(4, "Sending Facility", HD),
        field!(5, "Receiving Application", HD),
        field!(6, "Receiving Facility", HD),
        field!(7, "Date/Time Of Message", TS),
        field!(8, "Security", ST),
        field!(9, "Message Type", CM_MSG),
        field!(10, "Message Control ID", ST),
        field!(11, "Processing ID", PT),
        field!(12, "Version ID", ID),
    ],
};

/// Event type.
pub static EVN: SegmentDef = SegmentDef {
    id: "EVN",
    name: "Event Type",
    fields: &[
        field!(1, "Event Type Code", ID),
        field!(2, "Recorded Date/Time", TS),
    ],
};

/// Patient identification.
pub static PID: SegmentDef = SegmentDef {
    id: "PID",
    name: "Patient Identification",
    fields: &[
        field!(1, "Set ID - Patient ID", SI),
        field!(2, "Patient ID (External ID)", CX),
        field!(3, "Patient ID (Internal ID)", CX),
        field!(4, "Alternate Patient ID", CX),
        field!(5, "Patient Name", XPN),
        field!(6, "Mother's Maiden Name", XPN),
        field!(7, "Date of Birth", TS),
        field!(8, "Sex", IS),
        field!(9, "Patient Alias", XPN),
        field!(10, "Race", IS),
        field!(11, "Patient Address", XAD),
    ],
};

/// Patient visit.
pub static PV1: SegmentDef = SegmentDef {
    id: "PV1",
    name: "Patient Visit",
    fields: &[
        field!(1, "Set ID - Patient Visit", SI),
        field!(2, "Patient Class", IS),
        field!(3, "Assigned Patient Location", PL),
        field!(4, "Admission Type", IS),
        field!(5, "Preadmit Number", CX),
        field!(6, "Prior Patient Location", PL),
        field!(7, "Attending Doctor", XCN),
        field!(8, "Referring Doctor", XCN),
        field!(9, "Consulting Doctor", XCN),
        field!(10, "Hospital Service", IS),
        field!(44, "Admit Date/Time", TS),
        field!(45, "Discharge Date/Time", TS),
    ],
};

static SEGMENTS: [&SegmentDef; 4] = [&MSH, &EVN, &PID, &PV1];

/// Looks up a segment definition by id.
pub fn segment(id: &str) -> Option<&'static SegmentDef> {
    SEGMENTS.iter().copied().find(|def| def.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_lookup() {
        assert_eq!(segment("PID").map(|def| def.name), Some("Patient Identification"));
        assert!(segment("ZZZ").is_none());
    }

    #[test]
    fn test_field_lookup() {
        let name = PID.field(5).unwrap();
        assert_eq!(name.datatype.name(), "XPN");
        assert_eq!(name.datatype.component(2).unwrap().name, "given name");
        assert!(PV1.field(20).is_none());
    }

    #[test]
    fn test_nested_component_types() {
        let facility = PL.component(4).unwrap();
        assert_eq!(facility.datatype.name(), "HD");
        assert!(facility.datatype.is_composite());
        assert_eq!(XCN.component(13).unwrap().name, "identifier type code");
        assert!(XCN.component(14).is_none());
        assert!(XCN.component(0).is_none());
    }
}
