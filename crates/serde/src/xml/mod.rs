//! HL7 v2 XML encoding.
//!
//! The root element is named after the message structure and declares the
//! `urn:hl7-org:v2xml` namespace. Each segment is an element containing one
//! element per populated field, named `SEG.n`. Composite fields contain one
//! element per populated component, named after the component's datatype
//! (`XPN.1`, `PL.4`, `HD.1`). Empty values produce no element.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <ADT_A01 xmlns="urn:hl7-org:v2xml">
//!   <PID>
//!     <PID.5>
//!       <XPN.1>Gaetano</XPN.1>
//!       <XPN.2>Cassalia</XPN.2>
//!     </PID.5>
//!   </PID>
//! </ADT_A01>
//! ```

pub mod de;
pub mod ser;
mod utils;

pub use utils::HL7_V2_NAMESPACE;

// Re-export serialization functions
pub use ser::{to_xml_string, to_xml_vec, to_xml_writer};

// Re-export deserialization functions
pub use de::{from_xml_slice, from_xml_str};
