//! # courier-serde - HL7 v2 Encodings
//!
//! Encoders and decoders for the two wire grammars the Courier gateway
//! writes: pipe-delimited ER7 and HL7 v2 XML.
//!
//! ## Architecture
//!
//! Both encoders take a `&dyn Message`, call [`Message::segments`] once and
//! walk the result against the static schema in `courier_hl7::schema`. A
//! populated position the schema does not describe is an error in either
//! grammar, so the two encodings always describe the same leaves.
//!
//! The decoders return a [`RawMessage`]. Re-encoding a decoded message yields
//! the original bytes, and [`courier_hl7::leaves`] of a pipe-decoded message
//! equals that of the XML-decoded one.
//!
//! ## Examples
//!
//! ```
//! use std::sync::Arc;
//! use courier_hl7::{MessageFactory, SystemClock, leaves};
//! use courier_serde::pipe::{SegmentTerminator, from_pipe_str, to_pipe_string};
//! use courier_serde::xml::{from_xml_str, to_xml_string};
//!
//! let factory = MessageFactory::with_defaults(Arc::new(SystemClock));
//! let message = factory.create("A01").unwrap();
//!
//! let er7 = to_pipe_string(message.as_ref(), SegmentTerminator::Cr).unwrap();
//! let xml = to_xml_string(message.as_ref()).unwrap();
//!
//! let from_pipe = from_pipe_str(&er7).unwrap();
//! let from_xml = from_xml_str(&xml).unwrap();
//! assert_eq!(leaves(&from_pipe), leaves(&from_xml));
//! ```
//!
//! [`Message::segments`]: courier_hl7::Message::segments
//! [`RawMessage`]: courier_hl7::RawMessage

pub mod error;
pub mod pipe;
mod traverse;
pub mod xml;

// Re-export common types
pub use error::{Result, SerdeError};
pub use pipe::SegmentTerminator;
