//! # courier-hl7 - HL7 v2 Message Model
//!
//! This crate holds the in-memory representation of the HL7 v2 messages the
//! Courier gateway produces, together with the builders that populate them.
//!
//! ## Layers
//!
//! - **Typed layer**: message structs such as [`AdtA01`] made of segment structs
//!   ([`segments::Msh`], [`segments::Evn`], [`segments::Pid`], [`segments::Pv1`])
//!   and datatype structs ([`datatype::Xpn`], [`datatype::Xad`], ...). These are
//!   immutable once a builder returns them.
//! - **Generic layer**: [`Segment`] and [`Value`], an ordered position-based view
//!   of any message. Every message implements [`Message`], whose
//!   [`Message::segments`] is the one traversal all encoders consume.
//! - **Schema**: static segment and datatype definitions ([`schema`]) that give
//!   names to positions. Encoders, decoders and the structure dump all read it.
//!
//! ## Building Messages
//!
//! ```rust
//! use std::sync::Arc;
//! use courier_hl7::{MessageFactory, SystemClock};
//!
//! let factory = MessageFactory::with_defaults(Arc::new(SystemClock));
//! let message = factory.create("A01").unwrap();
//! assert_eq!(message.structure(), "ADT_A01");
//!
//! let unsupported = factory.create("ZZZ");
//! assert!(unsupported.is_err());
//! ```
//!
//! ## Segment Order
//!
//! | Position | Segment | Description |
//! |----------|---------|-------------|
//! | 1 | `MSH` | Message header |
//! | 2 | `EVN` | Event type |
//! | 3 | `PID` | Patient identification |
//! | 4 | `PV1` | Patient visit |

pub mod adt_a01;
pub mod clock;
pub mod datatype;
pub mod delimiters;
pub mod error;
pub mod factory;
pub mod message;
pub mod schema;
pub mod segments;
pub mod structure;
mod validate;

pub use adt_a01::{AdmissionSample, AdtA01, AdtA01Builder};
pub use clock::{Clock, FixedClock, SystemClock, control_id, format_timestamp};
pub use delimiters::Delimiters;
pub use error::{BuildError, Result};
pub use factory::{MessageBuilder, MessageFactory};
pub use message::{Message, RawMessage, Segment, Value, leaves};
pub use structure::print_structure;
pub use validate::is_xml_char;
