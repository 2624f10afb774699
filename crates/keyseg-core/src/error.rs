use thiserror::Error;

/// Canonical error type exposed by the core primitives.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum KeysegError {
    /// A window request fell outside the segment being read.
    #[error("window out of range: position {position}, count {count}, length {len}")]
    OutOfRange {
        position: isize,
        count: usize,
        len: usize,
    },

    /// Key material of the wrong size was handed to a fixed-size slot.
    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    /// An enumerated option outside its recognised domain.
    #[error("unknown {kind} value: {value}")]
    UnknownEnumerationValue { kind: &'static str, value: String },

    /// Malformed higher-level configuration object.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl KeysegError {
    pub(crate) fn unknown_value(kind: &'static str, value: impl ToString) -> Self {
        KeysegError::UnknownEnumerationValue {
            kind,
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let err = KeysegError::OutOfRange {
            position: 7,
            count: 4,
            len: 10,
        };
        assert_eq!(
            err.to_string(),
            "window out of range: position 7, count 4, length 10"
        );

        let err = KeysegError::InvalidKeyLength {
            expected: 32,
            actual: 31,
        };
        assert!(err.to_string().contains("expected 32 bytes, got 31"));

        let err = KeysegError::unknown_value("seek origin", "sideways");
        assert_eq!(err.to_string(), "unknown seek origin value: sideways");
    }
}
