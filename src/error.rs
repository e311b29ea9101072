use std::fmt;

use crate::encoding::TextEncoding;

/// Errors produced while building or materializing a XOR combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XorError {
    /// No inputs were given to combine.
    NoInputs,
    /// The strict length policy needs at least one input with a known length.
    MissingKnownLength,
    /// The text encoding name is not supported.
    UnknownEncoding(String),
    /// A character of a text input cannot be represented in the encoding.
    Unencodable {
        encoding: TextEncoding,
        character: char,
        position: usize,
    },
    /// A combined value does not fit in a byte.
    ByteOutOfRange { index: usize, value: i64 },
}

impl XorError {
    // errors caused by how the combination was set up, not by the data
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            XorError::NoInputs | XorError::MissingKnownLength | XorError::UnknownEncoding(_)
        )
    }
}

impl fmt::Display for XorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XorError::NoInputs => write!(f, "At least one input is required"),
            XorError::MissingKnownLength => write!(
                f,
                "One of the inputs must have a known length, or the length policy must not be Longest"
            ),
            XorError::UnknownEncoding(name) => write!(f, "Unknown text encoding: '{name}'"),
            XorError::Unencodable {
                encoding,
                character,
                position,
            } => write!(
                f,
                "Character {character:?} at position {position} cannot be encoded as {encoding}"
            ),
            XorError::ByteOutOfRange { index, value } => write!(
                f,
                "Value {value} at index {index} is outside the byte range 0..=255"
            ),
        }
    }
}

impl std::error::Error for XorError {}

#[test]
fn display_missing_known_length_test() {
    assert_eq!(
        XorError::MissingKnownLength.to_string(),
        "One of the inputs must have a known length, or the length policy must not be Longest"
    );
}

#[test]
fn display_byte_out_of_range_test() {
    let err = XorError::ByteOutOfRange {
        index: 0,
        value: 256,
    };
    assert_eq!(
        err.to_string(),
        "Value 256 at index 0 is outside the byte range 0..=255"
    );
}

#[test]
fn display_unencodable_test() {
    let err = XorError::Unencodable {
        encoding: TextEncoding::Ascii,
        character: 'é',
        position: 3,
    };
    assert_eq!(
        err.to_string(),
        "Character 'é' at position 3 cannot be encoded as ascii"
    );
}

#[test]
fn configuration_errors_test() {
    assert!(XorError::NoInputs.is_configuration());
    assert!(XorError::MissingKnownLength.is_configuration());
    assert!(XorError::UnknownEncoding("ebcdic".to_string()).is_configuration());
    assert!(!XorError::ByteOutOfRange {
        index: 1,
        value: -1
    }
    .is_configuration());
}
