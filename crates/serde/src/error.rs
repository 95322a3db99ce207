/// Error types for HL7 v2 encoding and decoding.
#[derive(Debug)]
pub enum SerdeError {
    /// XML reader or writer error
    Xml(quick_xml::Error),

    /// IO error while writing encoded output
    Io(std::io::Error),

    /// Input is not valid UTF-8
    Utf8(std::str::Utf8Error),

    /// The message cannot be expressed in the target grammar
    Encode(String),

    /// The input does not follow the grammar
    Decode(String),

    /// A segment id with no schema definition
    UnknownSegment(String),

    /// A populated field or component position with no schema definition (`PID-5.9`)
    UnknownField(String),
}

impl std::fmt::Display for SerdeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SerdeError::Xml(e) => write!(f, "XML error: {}", e),
            SerdeError::Io(e) => write!(f, "IO error: {}", e),
            SerdeError::Utf8(e) => write!(f, "invalid UTF-8: {}", e),
            SerdeError::Encode(msg) => write!(f, "cannot encode message: {}", msg),
            SerdeError::Decode(msg) => write!(f, "cannot decode message: {}", msg),
            SerdeError::UnknownSegment(id) => write!(f, "unknown segment {}", id),
            SerdeError::UnknownField(path) => write!(f, "unknown field {}", path),
        }
    }
}

impl std::error::Error for SerdeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SerdeError::Xml(e) => Some(e),
            SerdeError::Io(e) => Some(e),
            SerdeError::Utf8(e) => Some(e),
            _ => None,
        }
    }
}

impl From<quick_xml::Error> for SerdeError {
    fn from(err: quick_xml::Error) -> Self {
        SerdeError::Xml(err)
    }
}

impl From<std::io::Error> for SerdeError {
    fn from(err: std::io::Error) -> Self {
        SerdeError::Io(err)
    }
}

impl From<std::str::Utf8Error> for SerdeError {
    fn from(err: std::str::Utf8Error) -> Self {
        SerdeError::Utf8(err)
    }
}

/// Result type alias for HL7 v2 encoding operations
pub type Result<T> = std::result::Result<T, SerdeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            SerdeError::UnknownSegment("ZZZ".to_string()).to_string(),
            "unknown segment ZZZ"
        );
        assert_eq!(
            SerdeError::UnknownField("PID-5.9".to_string()).to_string(),
            "unknown field PID-5.9"
        );
    }

    #[test]
    fn test_source() {
        use std::error::Error;
        let io = SerdeError::from(std::io::Error::other("disk full"));
        assert!(io.source().is_some());
        assert!(SerdeError::Decode("bad".to_string()).source().is_none());
    }
}
