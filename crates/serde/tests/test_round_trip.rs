//! Properties that tie the two encodings together.
//!
//! - Encoding is deterministic
//! - Decoding and re-encoding reproduces the original bytes
//! - Both grammars describe the same leaves

use std::sync::Arc;

use chrono::NaiveDate;
use courier_hl7::{AdmissionSample, AdtA01, AdtA01Builder, FixedClock, Message, leaves};
use courier_serde::Result;
use courier_serde::pipe::{SegmentTerminator, from_pipe_str, to_pipe_string};
use courier_serde::xml::{from_xml_str, to_xml_string};

fn build(sample: AdmissionSample) -> AdtA01 {
    let now = NaiveDate::from_ymd_opt(2024, 12, 31)
        .and_then(|d| d.and_hms_opt(23, 59, 59))
        .expect("valid date");
    AdtA01Builder::new(Arc::new(FixedClock::new(now)))
        .with_sample(sample)
        .build()
        .expect("build")
}

fn samples() -> Vec<AdmissionSample> {
    vec![
        AdmissionSample::default(),
        AdmissionSample {
            patient_family_name: "Doe".to_string(),
            patient_given_name: "Jane".to_string(),
            country: "US".to_string(),
            ..Default::default()
        },
        AdmissionSample {
            street_address: "Corso d'Italia 5 | Scala B".to_string(),
            facility_name: "Ospedale <Nord> & Sud".to_string(),
            point_of_care: "Reparto ^2~3\\".to_string(),
            ..Default::default()
        },
        AdmissionSample {
            patient_given_name: String::new(),
            city: String::new(),
            ..Default::default()
        },
    ]
}

#[test]
fn test_encoding_is_deterministic() -> Result<()> {
    for sample in samples() {
        let message = build(sample);
        assert_eq!(
            to_pipe_string(&message, SegmentTerminator::Cr)?,
            to_pipe_string(&message, SegmentTerminator::Cr)?
        );
        assert_eq!(to_xml_string(&message)?, to_xml_string(&message)?);
    }

    Ok(())
}

#[test]
fn test_pipe_round_trip_is_byte_identical() -> Result<()> {
    for sample in samples() {
        let message = build(sample);
        for terminator in [SegmentTerminator::Cr, SegmentTerminator::Lf, SegmentTerminator::CrLf] {
            let first = to_pipe_string(&message, terminator)?;
            let decoded = from_pipe_str(&first)?;
            assert_eq!(to_pipe_string(&decoded, terminator)?, first);
        }
    }

    Ok(())
}

#[test]
fn test_xml_round_trip_is_byte_identical() -> Result<()> {
    for sample in samples() {
        let message = build(sample);
        let first = to_xml_string(&message)?;
        let decoded = from_xml_str(&first)?;
        assert_eq!(to_xml_string(&decoded)?, first);
    }

    Ok(())
}

#[test]
fn test_decoded_message_equals_built_segments() -> Result<()> {
    for sample in samples() {
        let message = build(sample);
        let from_pipe = from_pipe_str(&to_pipe_string(&message, SegmentTerminator::Cr)?)?;
        let from_xml = from_xml_str(&to_xml_string(&message)?)?;

        assert_eq!(from_pipe.structure(), "ADT_A01");
        assert_eq!(from_xml.structure(), "ADT_A01");
        assert_eq!(from_pipe.segments(), message.segments());
        assert_eq!(from_xml.segments(), message.segments());
    }

    Ok(())
}

#[test]
fn test_both_grammars_agree_on_every_leaf() -> Result<()> {
    for sample in samples() {
        let message = build(sample);
        let from_pipe = from_pipe_str(&to_pipe_string(&message, SegmentTerminator::Cr)?)?;
        let from_xml = from_xml_str(&to_xml_string(&message)?)?;

        let pipe_leaves = leaves(&from_pipe);
        assert!(!pipe_leaves.is_empty());
        assert_eq!(pipe_leaves, leaves(&from_xml));
        assert_eq!(pipe_leaves, leaves(&message));
    }

    Ok(())
}

#[test]
fn test_cross_encoding() -> Result<()> {
    let message = build(AdmissionSample::default());

    let xml_from_pipe = to_xml_string(&from_pipe_str(&to_pipe_string(
        &message,
        SegmentTerminator::Cr,
    )?)?)?;
    let pipe_from_xml = to_pipe_string(
        &from_xml_str(&to_xml_string(&message)?)?,
        SegmentTerminator::Cr,
    )?;

    assert_eq!(xml_from_pipe, to_xml_string(&message)?);
    assert_eq!(pipe_from_xml, to_pipe_string(&message, SegmentTerminator::Cr)?);

    Ok(())
}
