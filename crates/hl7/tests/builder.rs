//! Integration tests for the ADT^A01 builder.
//!
//! Covers:
//! - Sample values landing at their grammar positions
//! - Control id behavior across clock ticks
//! - Construction failures

use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use courier_hl7::{AdmissionSample, AdtA01, AdtA01Builder, BuildError, FixedClock, Message, leaves};

fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 31)
        .and_then(|d| d.and_hms_opt(23, 59, 58))
        .expect("valid date")
}

fn leaf<'a>(leaves: &'a [(String, String)], path: &str) -> Option<&'a str> {
    leaves
        .iter()
        .find(|(p, _)| p == path)
        .map(|(_, value)| value.as_str())
}

#[test]
fn test_default_sample_leaves() {
    let clock = Arc::new(FixedClock::new(start()));
    let message = AdtA01Builder::new(clock).build().expect("build");
    let leaves = leaves(&message);

    assert_eq!(leaf(&leaves, "MSH-1"), Some("|"));
    assert_eq!(leaf(&leaves, "MSH-2"), Some("^~\\&"));
    assert_eq!(leaf(&leaves, "MSH-7.1"), Some("20250131235958"));
    assert_eq!(leaf(&leaves, "MSH-9.1"), Some("ADT"));
    assert_eq!(leaf(&leaves, "MSH-9.2"), Some("A01"));
    assert_eq!(leaf(&leaves, "MSH-10"), Some("123420250131235958"));
    assert_eq!(leaf(&leaves, "MSH-11.1"), Some("P"));
    assert_eq!(leaf(&leaves, "EVN-2.1"), Some("20250131235958"));
    assert_eq!(leaf(&leaves, "PID-2.1"), Some("378785433211"));
    assert_eq!(leaf(&leaves, "PID-5.1"), Some("Gaetano"));
    assert_eq!(leaf(&leaves, "PID-11.3"), Some("Reggio Calabria"));
    assert_eq!(leaf(&leaves, "PV1-3.4.1"), Some("Nome Centro Sanitario"));
    assert_eq!(leaf(&leaves, "PV1-8.13"), Some("456789"));
    assert_eq!(leaf(&leaves, "PV1-44.1"), Some("20250131235958"));
}

#[test]
fn test_custom_subject() {
    let clock = Arc::new(FixedClock::new(start()));
    let sample = AdmissionSample {
        patient_family_name: "Doe".to_string(),
        patient_given_name: "Jane".to_string(),
        country: "US".to_string(),
        ..Default::default()
    };
    let message = AdtA01Builder::new(clock)
        .with_sample(sample)
        .build()
        .expect("build");

    let name = message.pid().patient_name();
    assert_eq!(name.family_name, "Doe");
    assert_eq!(name.given_name, "Jane");
    assert_eq!(message.pid().patient_address().country, "US");
}

#[test]
fn test_control_id_same_second_collides() {
    let clock = Arc::new(FixedClock::new(start()));
    let builder = AdtA01Builder::new(clock.clone());

    let first = builder.build().expect("first build");
    clock.advance(Duration::milliseconds(400));
    let second = builder.build().expect("second build");

    assert_eq!(
        first.msh().message_control_id(),
        second.msh().message_control_id()
    );
}

#[test]
fn test_control_id_next_second_differs() {
    let clock = Arc::new(FixedClock::new(start()));
    let builder = AdtA01Builder::new(clock.clone());

    let first = builder.build().expect("first build");
    clock.advance(Duration::seconds(1));
    let second = builder.build().expect("second build");

    assert_ne!(
        first.msh().message_control_id(),
        second.msh().message_control_id()
    );
    assert_eq!(second.msh().message_control_id(), "123420250131235959");
}

#[test]
fn test_coded_value_with_whitespace_rejected() {
    let clock = Arc::new(FixedClock::new(start()));
    let sample = AdmissionSample {
        admission_type: "AL ERT".to_string(),
        ..Default::default()
    };
    let err = AdtA01Builder::new(clock)
        .with_sample(sample)
        .build()
        .unwrap_err();

    match err {
        BuildError::InvalidValue { location, .. } => assert_eq!(location, "PV1-4"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_downcast_from_trait_object() {
    let clock = Arc::new(FixedClock::new(start()));
    let message: Box<dyn Message> = Box::new(AdtA01Builder::new(clock).build().expect("build"));
    let typed = message
        .as_any()
        .downcast_ref::<AdtA01>()
        .expect("ADT_A01 message");
    assert_eq!(typed.pv1().admission_type(), "ALERT");
}
