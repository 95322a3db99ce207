//! Typed HL7 v2 datatypes.
//!
//! Each struct covers the components the gateway populates. Components that
//! are not represented stay empty when the value is converted into the
//! generic [`Value`] form, at the position the schema assigns them.

use crate::message::Value;

/// Conversion into the generic value representation.
pub trait ToValue {
    /// Converts `self` into a [`Value`].
    fn to_value(&self) -> Value;
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::text(self.as_str())
    }
}

/// `HD` hierarchic designator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hd {
    /// HD.1 namespace ID.
    pub namespace_id: String,
}

impl ToValue for Hd {
    fn to_value(&self) -> Value {
        Value::composite(vec![Value::text(self.namespace_id.as_str())])
    }
}

/// `TS` time stamp at second precision (`yyyyMMddHHmmss`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ts {
    /// TS.1 time of an event.
    pub time: String,
}

impl ToValue for Ts {
    fn to_value(&self) -> Value {
        Value::composite(vec![Value::text(self.time.as_str())])
    }
}

/// `CM_MSG` message type (MSH-9).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageType {
    /// CM_MSG.1 message type, e.g. `ADT`.
    pub message_type: String,
    /// CM_MSG.2 trigger event, e.g. `A01`.
    pub trigger_event: String,
}

impl MessageType {
    /// Returns the message structure name (`ADT_A01`).
    pub fn structure(&self) -> String {
        format!("{}_{}", self.message_type, self.trigger_event)
    }
}

impl ToValue for MessageType {
    fn to_value(&self) -> Value {
        Value::composite(vec![
            Value::text(self.message_type.as_str()),
            Value::text(self.trigger_event.as_str()),
        ])
    }
}

/// `PT` processing type (MSH-11).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessingType {
    /// PT.1 processing ID (`P` production, `T` training, `D` debugging).
    pub processing_id: String,
}

impl ToValue for ProcessingType {
    fn to_value(&self) -> Value {
        Value::composite(vec![Value::text(self.processing_id.as_str())])
    }
}

/// `CX` extended composite id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cx {
    /// CX.1 ID.
    pub id: String,
}

impl ToValue for Cx {
    fn to_value(&self) -> Value {
        Value::composite(vec![Value::text(self.id.as_str())])
    }
}

/// `XPN` extended person name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Xpn {
    /// XPN.1 family name.
    pub family_name: String,
    /// XPN.2 given name.
    pub given_name: String,
}

impl ToValue for Xpn {
    fn to_value(&self) -> Value {
        Value::composite(vec![
            Value::text(self.family_name.as_str()),
            Value::text(self.given_name.as_str()),
        ])
    }
}

/// `XAD` extended address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Xad {
    /// XAD.1 street address.
    pub street_address: String,
    /// XAD.3 city.
    pub city: String,
    /// XAD.4 state or province.
    pub state_or_province: String,
    /// XAD.6 country.
    pub country: String,
}

impl ToValue for Xad {
    fn to_value(&self) -> Value {
        Value::composite(vec![
            Value::text(self.street_address.as_str()),
            Value::Empty,
            Value::text(self.city.as_str()),
            Value::text(self.state_or_province.as_str()),
            Value::Empty,
            Value::text(self.country.as_str()),
        ])
    }
}

/// `PL` person location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pl {
    /// PL.1 point of care.
    pub point_of_care: String,
    /// PL.4 facility.
    pub facility: Hd,
}

impl ToValue for Pl {
    fn to_value(&self) -> Value {
        Value::composite(vec![
            Value::text(self.point_of_care.as_str()),
            Value::Empty,
            Value::Empty,
            self.facility.to_value(),
        ])
    }
}

/// `XCN` extended composite id number and name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Xcn {
    /// XCN.1 ID number.
    pub id_number: String,
    /// XCN.2 family name.
    pub family_name: String,
    /// XCN.3 given name.
    pub given_name: String,
    /// XCN.13 identifier type code.
    pub identifier_type_code: String,
}

impl ToValue for Xcn {
    fn to_value(&self) -> Value {
        let mut components = vec![Value::Empty; 13];
        components[0] = Value::text(self.id_number.as_str());
        components[1] = Value::text(self.family_name.as_str());
        components[2] = Value::text(self.given_name.as_str());
        components[12] = Value::text(self.identifier_type_code.as_str());
        Value::composite(components)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xad_positions() {
        let address = Xad {
            street_address: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            state_or_province: "IL".to_string(),
            country: "US".to_string(),
        };
        let value = address.to_value();
        assert_eq!(value.component(1).as_text(), Some("1 Main St"));
        assert_eq!(value.component(2), &Value::Empty);
        assert_eq!(value.component(3).as_text(), Some("Springfield"));
        assert_eq!(value.component(6).as_text(), Some("US"));
    }

    #[test]
    fn test_pl_facility_is_subcomponent() {
        let location = Pl {
            point_of_care: "ER".to_string(),
            facility: Hd {
                namespace_id: "General".to_string(),
            },
        };
        let value = location.to_value();
        assert_eq!(value.component(4).component(1).as_text(), Some("General"));
    }

    #[test]
    fn test_xcn_identifier_type_code_position() {
        let doctor = Xcn {
            id_number: "1".to_string(),
            identifier_type_code: "NPI".to_string(),
            ..Default::default()
        };
        let value = doctor.to_value();
        assert_eq!(value.component(13).as_text(), Some("NPI"));
        assert_eq!(value.component(2), &Value::Empty);
    }

    #[test]
    fn test_unset_composite_is_empty() {
        assert_eq!(Xpn::default().to_value(), Value::Empty);
    }

    #[test]
    fn test_message_type_structure() {
        let message_type = MessageType {
            message_type: "ADT".to_string(),
            trigger_event: "A01".to_string(),
        };
        assert_eq!(message_type.structure(), "ADT_A01");
    }
}
