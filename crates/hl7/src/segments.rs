//! Typed segments of the admission message.
//!
//! Segment structs are created by builders only; callers read them through
//! accessors. [`ToSegment`] maps each one onto the generic [`Segment`] using
//! the positions from [`crate::schema`].

use crate::datatype::{Cx, Hd, MessageType, Pl, ProcessingType, ToValue, Ts, Xad, Xcn, Xpn};
use crate::delimiters::Delimiters;
use crate::message::{Segment, Value};

/// Conversion of a typed segment into the generic form.
pub trait ToSegment {
    /// Segment identifier.
    const ID: &'static str;

    /// Returns the generic segment.
    fn to_segment(&self) -> Segment;
}

/// Places `(position, value)` pairs into a field vector.
fn positioned(id: &str, values: Vec<(usize, Value)>) -> Segment {
    let len = values.iter().map(|(position, _)| *position).max().unwrap_or(0);
    let mut fields = vec![Value::Empty; len];
    for (position, value) in values {
        fields[position - 1] = value;
    }
    Segment::new(id, fields)
}

/// `MSH` message header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Msh {
    pub(crate) delimiters: Delimiters,
    pub(crate) sending_application: Hd,
    pub(crate) sending_facility: Hd,
    pub(crate) receiving_application: Hd,
    pub(crate) receiving_facility: Hd,
    pub(crate) date_time_of_message: Ts,
    pub(crate) message_type: MessageType,
    pub(crate) message_control_id: String,
    pub(crate) processing_id: ProcessingType,
    pub(crate) version_id: String,
}

impl Msh {
    /// MSH-1 and MSH-2 as a delimiter set.
    pub fn delimiters(&self) -> Delimiters {
        self.delimiters
    }

    /// MSH-3.
    pub fn sending_application(&self) -> &Hd {
        &self.sending_application
    }

    /// MSH-4.
    pub fn sending_facility(&self) -> &Hd {
        &self.sending_facility
    }

    /// MSH-5.
    pub fn receiving_application(&self) -> &Hd {
        &self.receiving_application
    }

    /// MSH-6.
    pub fn receiving_facility(&self) -> &Hd {
        &self.receiving_facility
    }

    /// MSH-7.
    pub fn date_time_of_message(&self) -> &Ts {
        &self.date_time_of_message
    }

    /// MSH-9.
    pub fn message_type(&self) -> &MessageType {
        &self.message_type
    }

    /// MSH-10.
    pub fn message_control_id(&self) -> &str {
        &self.message_control_id
    }

    /// MSH-11.
    pub fn processing_id(&self) -> &ProcessingType {
        &self.processing_id
    }

    /// MSH-12.
    pub fn version_id(&self) -> &str {
        &self.version_id
    }
}

impl ToSegment for Msh {
    const ID: &'static str = "MSH";

    fn to_segment(&self) -> Segment {
        positioned(
            Self::ID,
            vec![
                (1, Value::text(self.delimiters.field_separator())),
                (2, Value::text(self.delimiters.encoding_characters())),
                (3, self.sending_application.to_value()),
                (4, self.sending_facility.to_value()),
                (5, self.receiving_application.to_value()),
                (6, self.receiving_facility.to_value()),
                (7, self.date_time_of_message.to_value()),
                (9, self.message_type.to_value()),
                (10, self.message_control_id.to_value()),
                (11, self.processing_id.to_value()),
                (12, self.version_id.to_value()),
            ],
        )
    }
}

/// `EVN` event type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evn {
    pub(crate) event_type_code: String,
    pub(crate) recorded_date_time: Ts,
}

impl Evn {
    /// EVN-1.
    pub fn event_type_code(&self) -> &str {
        &self.event_type_code
    }

    /// EVN-2.
    pub fn recorded_date_time(&self) -> &Ts {
        &self.recorded_date_time
    }
}

impl ToSegment for Evn {
    const ID: &'static str = "EVN";

    fn to_segment(&self) -> Segment {
        positioned(
            Self::ID,
            vec![
                (1, self.event_type_code.to_value()),
                (2, self.recorded_date_time.to_value()),
            ],
        )
    }
}

/// `PID` patient identification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pid {
    pub(crate) patient_id_external: Cx,
    pub(crate) patient_name: Xpn,
    pub(crate) patient_address: Xad,
}

impl Pid {
    /// PID-2.
    pub fn patient_id_external(&self) -> &Cx {
        &self.patient_id_external
    }

    /// PID-5.
    pub fn patient_name(&self) -> &Xpn {
        &self.patient_name
    }

    /// PID-11.
    pub fn patient_address(&self) -> &Xad {
        &self.patient_address
    }
}

impl ToSegment for Pid {
    const ID: &'static str = "PID";

    fn to_segment(&self) -> Segment {
        positioned(
            Self::ID,
            vec![
                (2, self.patient_id_external.to_value()),
                (5, self.patient_name.to_value()),
                (11, self.patient_address.to_value()),
            ],
        )
    }
}

/// `PV1` patient visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pv1 {
    pub(crate) patient_class: String,
    pub(crate) assigned_patient_location: Pl,
    pub(crate) admission_type: String,
    pub(crate) referring_doctor: Xcn,
    pub(crate) admit_date_time: Ts,
}

impl Pv1 {
    /// PV1-2.
    pub fn patient_class(&self) -> &str {
        &self.patient_class
    }

    /// PV1-3.
    pub fn assigned_patient_location(&self) -> &Pl {
        &self.assigned_patient_location
    }

    /// PV1-4.
    pub fn admission_type(&self) -> &str {
        &self.admission_type
    }

    /// PV1-8.
    pub fn referring_doctor(&self) -> &Xcn {
        &self.referring_doctor
    }

    /// PV1-44.
    pub fn admit_date_time(&self) -> &Ts {
        &self.admit_date_time
    }
}

impl ToSegment for Pv1 {
    const ID: &'static str = "PV1";

    fn to_segment(&self) -> Segment {
        positioned(
            Self::ID,
            vec![
                (2, self.patient_class.to_value()),
                (3, self.assigned_patient_location.to_value()),
                (4, self.admission_type.to_value()),
                (8, self.referring_doctor.to_value()),
                (44, self.admit_date_time.to_value()),
            ],
        )
    }
}
