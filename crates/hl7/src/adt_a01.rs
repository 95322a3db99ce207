//! ADT^A01 (admit/visit notification) message and its builder.

use std::any::Any;
use std::sync::Arc;

use tracing::debug;

use crate::clock::{Clock, control_id, format_timestamp};
use crate::datatype::{Cx, Hd, MessageType, Pl, ProcessingType, Ts, Xad, Xcn, Xpn};
use crate::delimiters::Delimiters;
use crate::error::Result;
use crate::factory::MessageBuilder;
use crate::message::{Message, Segment};
use crate::segments::{Evn, Msh, Pid, Pv1, ToSegment};
use crate::validate;

/// Message structure name.
pub const STRUCTURE: &str = "ADT_A01";

/// Trigger event handled by [`AdtA01Builder`].
pub const TRIGGER_EVENT: &str = "A01";

/// The fixed sample values an admission message is populated with.
///
/// [`Default`] yields the gateway's demonstration record. Tests override
/// individual values to exercise the encoders and the grammar checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmissionSample {
    /// MSH-1.
    pub field_separator: String,
    /// MSH-2.
    pub encoding_characters: String,
    /// MSH-3.
    pub sending_application: String,
    /// MSH-4.
    pub sending_facility: String,
    /// MSH-5.
    pub receiving_application: String,
    /// MSH-6.
    pub receiving_facility: String,
    /// MSH-11.
    pub processing_id: String,
    /// MSH-12.
    pub version_id: String,
    /// PID-2.
    pub patient_external_id: String,
    /// PID-5.1.
    pub patient_family_name: String,
    /// PID-5.2.
    pub patient_given_name: String,
    /// PID-11.1.
    pub street_address: String,
    /// PID-11.3.
    pub city: String,
    /// PID-11.4.
    pub state_or_province: String,
    /// PID-11.6.
    pub country: String,
    /// PV1-2.
    pub patient_class: String,
    /// PV1-3.4.
    pub facility_name: String,
    /// PV1-3.1.
    pub point_of_care: String,
    /// PV1-4.
    pub admission_type: String,
    /// PV1-8.1.
    pub referring_id_number: String,
    /// PV1-8.2.
    pub referring_family_name: String,
    /// PV1-8.3.
    pub referring_given_name: String,
    /// PV1-8.13.
    pub referring_identifier_type_code: String,
}

impl Default for AdmissionSample {
    fn default() -> Self {
        Self {
            field_separator: "|".to_string(),
            encoding_characters: "^~\\&".to_string(),
            sending_application: "Sistema di partenza".to_string(),
            sending_facility: "Infrastruttura di partenza".to_string(),
            receiving_application: "Sistema di arrivo".to_string(),
            receiving_facility: "Infrastruttura di arrivo".to_string(),
            processing_id: "P".to_string(),
            version_id: "2.4".to_string(),
            patient_external_id: "378785433211".to_string(),
            patient_family_name: "Gaetano".to_string(),
            patient_given_name: "Cassalia".to_string(),
            street_address: "Via Mazzini 93".to_string(),
            city: "Reggio Calabria".to_string(),
            state_or_province: "Calabria".to_string(),
            country: "IT".to_string(),
            patient_class: "O".to_string(),
            facility_name: "Nome Centro Sanitario".to_string(),
            point_of_care: "Punto di Cura (Point of Care)".to_string(),
            admission_type: "ALERT".to_string(),
            referring_id_number: "99999999".to_string(),
            referring_family_name: "Mario".to_string(),
            referring_given_name: "Rossi".to_string(),
            referring_identifier_type_code: "456789".to_string(),
        }
    }
}

/// A fully built ADT^A01 message. Immutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdtA01 {
    msh: Msh,
    evn: Evn,
    pid: Pid,
    pv1: Pv1,
}

impl AdtA01 {
    /// Message header.
    pub fn msh(&self) -> &Msh {
        &self.msh
    }

    /// Event type.
    pub fn evn(&self) -> &Evn {
        &self.evn
    }

    /// Patient identification.
    pub fn pid(&self) -> &Pid {
        &self.pid
    }

    /// Patient visit.
    pub fn pv1(&self) -> &Pv1 {
        &self.pv1
    }
}

impl Message for AdtA01 {
    fn structure(&self) -> &str {
        STRUCTURE
    }

    fn segments(&self) -> Vec<Segment> {
        vec![
            self.msh.to_segment(),
            self.evn.to_segment(),
            self.pid.to_segment(),
            self.pv1.to_segment(),
        ]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Builds [`AdtA01`] messages from an [`AdmissionSample`].
///
/// The header timestamp is read from the clock once and shared by MSH-7,
/// MSH-10 and EVN-2. PV1-44 reads the clock again, so on a live clock it may
/// fall in the following second.
#[derive(Debug, Clone)]
pub struct AdtA01Builder {
    clock: Arc<dyn Clock>,
    sample: AdmissionSample,
}

impl AdtA01Builder {
    /// Creates a builder with the default sample values.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            sample: AdmissionSample::default(),
        }
    }

    /// Replaces the sample values.
    pub fn with_sample(mut self, sample: AdmissionSample) -> Self {
        self.sample = sample;
        self
    }

    /// Builds the message. Nothing is returned unless every segment is valid.
    pub fn build(&self) -> Result<AdtA01> {
        let now = self.clock.now();
        let timestamp = format_timestamp(now);
        let control_id = control_id(now);
        debug!(%control_id, "Building ADT^A01 message");

        let msh = self.build_msh(&timestamp, control_id)?;
        let evn = self.build_evn(&timestamp)?;
        let pid = self.build_pid()?;
        let pv1 = self.build_pv1()?;

        Ok(AdtA01 { msh, evn, pid, pv1 })
    }

    fn build_msh(&self, timestamp: &str, control_id: String) -> Result<Msh> {
        let s = &self.sample;
        Ok(Msh {
            delimiters: Delimiters::parse(&s.field_separator, &s.encoding_characters)?,
            sending_application: Hd {
                namespace_id: validate::text("MSH-3.1", &s.sending_application)?,
            },
            sending_facility: Hd {
                namespace_id: validate::text("MSH-4.1", &s.sending_facility)?,
            },
            receiving_application: Hd {
                namespace_id: validate::text("MSH-5.1", &s.receiving_application)?,
            },
            receiving_facility: Hd {
                namespace_id: validate::text("MSH-6.1", &s.receiving_facility)?,
            },
            date_time_of_message: Ts {
                time: validate::timestamp("MSH-7.1", timestamp)?,
            },
            message_type: MessageType {
                message_type: "ADT".to_string(),
                trigger_event: TRIGGER_EVENT.to_string(),
            },
            message_control_id: validate::text("MSH-10", &control_id)?,
            processing_id: ProcessingType {
                processing_id: validate::code("MSH-11.1", &s.processing_id)?,
            },
            version_id: validate::code("MSH-12", &s.version_id)?,
        })
    }

    fn build_evn(&self, timestamp: &str) -> Result<Evn> {
        Ok(Evn {
            event_type_code: TRIGGER_EVENT.to_string(),
            recorded_date_time: Ts {
                time: validate::timestamp("EVN-2.1", timestamp)?,
            },
        })
    }

    fn build_pid(&self) -> Result<Pid> {
        let s = &self.sample;
        Ok(Pid {
            patient_id_external: Cx {
                id: validate::text("PID-2.1", &s.patient_external_id)?,
            },
            patient_name: Xpn {
                family_name: validate::text("PID-5.1", &s.patient_family_name)?,
                given_name: validate::text("PID-5.2", &s.patient_given_name)?,
            },
            patient_address: Xad {
                street_address: validate::text("PID-11.1", &s.street_address)?,
                city: validate::text("PID-11.3", &s.city)?,
                state_or_province: validate::text("PID-11.4", &s.state_or_province)?,
                country: validate::code("PID-11.6", &s.country)?,
            },
        })
    }

    fn build_pv1(&self) -> Result<Pv1> {
        let s = &self.sample;
        let admitted_at = format_timestamp(self.clock.now());
        Ok(Pv1 {
            patient_class: validate::code("PV1-2", &s.patient_class)?,
            assigned_patient_location: Pl {
                point_of_care: validate::text("PV1-3.1", &s.point_of_care)?,
                facility: Hd {
                    namespace_id: validate::text("PV1-3.4.1", &s.facility_name)?,
                },
            },
            admission_type: validate::code("PV1-4", &s.admission_type)?,
            referring_doctor: Xcn {
                id_number: validate::text("PV1-8.1", &s.referring_id_number)?,
                family_name: validate::text("PV1-8.2", &s.referring_family_name)?,
                given_name: validate::text("PV1-8.3", &s.referring_given_name)?,
                identifier_type_code: validate::code(
                    "PV1-8.13",
                    &s.referring_identifier_type_code,
                )?,
            },
            admit_date_time: Ts {
                time: validate::timestamp("PV1-44.1", &admitted_at)?,
            },
        })
    }
}

impl MessageBuilder for AdtA01Builder {
    fn build_message(&self) -> Result<Box<dyn Message>> {
        Ok(Box::new(self.build()?))
    }
}
