use std::sync::Arc;

use chrono::NaiveDate;
use courier_hl7::{AdmissionSample, AdtA01Builder, FixedClock};
use courier_serde::pipe::{SegmentTerminator, from_pipe_str, to_pipe_string};
use courier_serde::xml::to_xml_string;
use courier_serde::{Result, SerdeError};

fn builder() -> AdtA01Builder {
    let now = NaiveDate::from_ymd_opt(2024, 3, 9)
        .and_then(|d| d.and_hms_opt(12, 5, 7))
        .expect("valid date");
    AdtA01Builder::new(Arc::new(FixedClock::new(now)))
}

#[test]
fn test_xml_serialize_sample_message() -> Result<()> {
    let message = builder().build().expect("build");
    let xml = to_xml_string(&message)?;

    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"));
    assert!(xml.contains("<ADT_A01 xmlns=\"urn:hl7-org:v2xml\">"));
    assert!(xml.contains("<MSH.1>|</MSH.1>"));
    assert!(xml.contains("<MSH.2>^~\\&amp;</MSH.2>"));
    assert!(xml.contains("<MSH.10>123420240309120507</MSH.10>"));
    assert!(xml.contains("<CM_MSG.1>ADT</CM_MSG.1>"));
    assert!(xml.contains("<XAD.3>Reggio Calabria</XAD.3>"));
    assert!(xml.contains("<XCN.13>456789</XCN.13>"));
    assert!(xml.ends_with("</ADT_A01>"));

    Ok(())
}

#[test]
fn test_xml_serialize_segment_order() -> Result<()> {
    let message = builder().build().expect("build");
    let xml = to_xml_string(&message)?;

    let positions: Vec<usize> = ["<MSH>", "<EVN>", "<PID>", "<PV1>"]
        .iter()
        .map(|tag| xml.find(tag).expect("segment element"))
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));

    Ok(())
}

#[test]
fn test_xml_serialize_custom_subject() -> Result<()> {
    let sample = AdmissionSample {
        patient_family_name: "Doe".to_string(),
        patient_given_name: "Jane".to_string(),
        country: "US".to_string(),
        ..Default::default()
    };
    let message = builder().with_sample(sample).build().expect("build");
    let xml = to_xml_string(&message)?;

    assert!(xml.contains(concat!(
        "    <PID.5>\n",
        "      <XPN.1>Doe</XPN.1>\n",
        "      <XPN.2>Jane</XPN.2>\n",
        "    </PID.5>\n",
    )));
    assert!(xml.contains("      <XAD.6>US</XAD.6>\n    </PID.11>"));

    Ok(())
}

#[test]
fn test_xml_serialize_nested_facility() -> Result<()> {
    let message = builder().build().expect("build");
    let xml = to_xml_string(&message)?;

    assert!(xml.contains(concat!(
        "      <PL.4>\n",
        "        <HD.1>Nome Centro Sanitario</HD.1>\n",
        "      </PL.4>\n",
    )));
    assert!(!xml.contains("<PL.2>"));
    assert!(!xml.contains("<PV1.1>"));

    Ok(())
}

#[test]
fn test_xml_serialize_escapes_markup() -> Result<()> {
    let sample = AdmissionSample {
        facility_name: "Ospedale <Nord> & Sud".to_string(),
        ..Default::default()
    };
    let message = builder().with_sample(sample).build().expect("build");
    let xml = to_xml_string(&message)?;

    assert!(xml.contains("<HD.1>Ospedale &lt;Nord&gt; &amp; Sud</HD.1>"));

    Ok(())
}

#[test]
fn test_xml_serialize_rejects_foreign_message_type() -> Result<()> {
    let message = builder().build().expect("build");
    let er7 = to_pipe_string(&message, SegmentTerminator::Cr)?;
    let foreign = from_pipe_str(&er7.replace("|ADT^A01|", "|A D T^A01|"))?;

    let err = to_xml_string(&foreign).unwrap_err();
    assert!(matches!(err, SerdeError::Encode(_)));

    Ok(())
}
