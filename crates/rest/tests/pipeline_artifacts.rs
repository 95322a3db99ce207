//! Artifact tests.
//!
//! Runs the pipeline through HTTP and checks what lands on disk and on the
//! console:
//! - Both files equal the encoders' output for the run's message
//! - Files are replaced, never appended to
//! - Concurrent requests never interleave their writes

mod common;

use std::fs;
use std::sync::Arc;

use chrono::Duration;
use common::assertions::assert_status;
use common::harness::{GatewayHarness, start_time};
use courier_hl7::{AdtA01, AdtA01Builder, FixedClock, Message, MessageFactory, print_structure};
use courier_rest::ServerConfig;
use courier_rest::pipeline::{FileSystemSink, MemorySink, Pipeline};
use courier_serde::SegmentTerminator;
use courier_serde::pipe::{from_pipe_str, to_pipe_string};
use courier_serde::xml::{from_xml_str, to_xml_string};
use tempfile::TempDir;

fn expected_message() -> AdtA01 {
    AdtA01Builder::new(Arc::new(FixedClock::new(start_time())))
        .build()
        .expect("build")
}

#[tokio::test]
async fn test_artifacts_equal_encoder_output() {
    let harness = GatewayHarness::new();

    let response = harness.server.get("/hl7/createMessage").await;
    assert_status(&response, 200);

    let message = expected_message();
    assert_eq!(
        harness.read_pipe(),
        to_pipe_string(&message, SegmentTerminator::Cr).unwrap()
    );
    assert_eq!(harness.read_xml(), to_xml_string(&message).unwrap());
}

#[tokio::test]
async fn test_artifacts_decode_to_same_message() {
    let harness = GatewayHarness::new();
    harness.server.get("/hl7/createMessage").await;

    let from_pipe = from_pipe_str(&harness.read_pipe()).unwrap();
    let from_xml = from_xml_str(&harness.read_xml()).unwrap();

    assert_eq!(from_pipe.structure(), "ADT_A01");
    assert_eq!(from_pipe.segments(), from_xml.segments());
    assert_eq!(from_pipe.segments(), expected_message().segments());
}

#[tokio::test]
async fn test_console_output() {
    let harness = GatewayHarness::new();
    harness.server.get("/hl7/createMessage").await;

    let message = expected_message();
    assert_eq!(
        harness.console.entries(),
        vec![
            to_pipe_string(&message, SegmentTerminator::Cr).unwrap(),
            print_structure(&message),
        ]
    );
}

#[tokio::test]
async fn test_configured_names_and_terminator() {
    let harness = GatewayHarness::with_config(|config| ServerConfig {
        pipe_output_file: "admission.hl7".to_string(),
        xml_output_file: "admission.xml".to_string(),
        segment_terminator: SegmentTerminator::CrLf,
        ..config
    });

    let response = harness.server.get("/hl7/createMessage").await;
    assert_status(&response, 200);

    assert!(harness.dir().join("admission.hl7").exists());
    assert!(harness.dir().join("admission.xml").exists());
    assert!(!harness.dir().join("testPipeDelimitedOutputFile.txt").exists());

    let er7 = harness.read_pipe();
    assert_eq!(er7.matches("\r\n").count(), 4);
    assert!(er7.ends_with("\r\n"));
}

#[tokio::test]
async fn test_second_run_replaces_artifacts() {
    let harness = GatewayHarness::new();

    harness.server.get("/hl7/createMessage").await;
    let first = harness.read_pipe();

    harness.clock.advance(Duration::seconds(1));
    harness.server.get("/hl7/createMessage").await;
    let second = harness.read_pipe();

    assert_ne!(first, second);
    assert_eq!(first.len(), second.len());
    assert!(second.contains("123420240309120508"));
    assert!(!second.contains("123420240309120507"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_succeed() {
    let harness = GatewayHarness::new();
    let request = || async { harness.server.get("/hl7/createMessage").await };

    let (a, b, c, d) = tokio::join!(request(), request(), request(), request());
    for response in [&a, &b, &c, &d] {
        assert_status(response, 200);
    }

    // Every run builds the same message, so a clean last write is identical
    // to a single run's output.
    let message = expected_message();
    assert_eq!(
        harness.read_pipe(),
        to_pipe_string(&message, SegmentTerminator::Cr).unwrap()
    );
    assert_eq!(harness.read_xml(), to_xml_string(&message).unwrap());
    assert_eq!(harness.console.entries().len(), 8);
}

#[test]
fn test_concurrent_runs_leave_matching_artifacts() {
    let dir = TempDir::new().unwrap();
    let clock = Arc::new(FixedClock::new(start_time()));
    let pipeline = Pipeline::new(
        MessageFactory::with_defaults(clock.clone()),
        Arc::new(FileSystemSink::new(dir.path())),
        Arc::new(MemorySink::new()),
    );

    std::thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                clock.advance(Duration::seconds(1));
                pipeline.run("A01").unwrap();
            });
        }
    });

    // Both files must come from the same run.
    let er7 = fs::read_to_string(dir.path().join("testPipeDelimitedOutputFile.txt")).unwrap();
    let xml = fs::read_to_string(dir.path().join("testXmlOutputFile.xml")).unwrap();
    let from_pipe = from_pipe_str(&er7).unwrap();
    let from_xml = from_xml_str(&xml).unwrap();
    assert_eq!(from_pipe.segments(), from_xml.segments());
    assert_eq!(to_pipe_string(&from_xml, SegmentTerminator::Cr).unwrap(), er7);
}
