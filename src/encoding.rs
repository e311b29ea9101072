use log::error;
use strum_macros::{Display, EnumIter, EnumString};

use std::str::FromStr;

use crate::error::XorError;

// available encodings for text inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum TextEncoding {
    #[default]
    #[strum(to_string = "ascii", serialize = "us-ascii")]
    Ascii,
    #[strum(to_string = "utf-8", serialize = "utf8")]
    Utf8,
    #[strum(to_string = "latin-1", serialize = "latin1", serialize = "iso-8859-1")]
    Latin1,
    #[strum(to_string = "utf-16-le", serialize = "utf-16le")]
    Utf16Le,
    #[strum(to_string = "utf-16-be", serialize = "utf-16be")]
    Utf16Be,
}

impl TextEncoding {
    pub fn from_name(name: &str) -> Result<Self, XorError> {
        TextEncoding::from_str(name.trim()).map_err(|_| {
            error!("Unknown text encoding: {name}");
            XorError::UnknownEncoding(name.to_string())
        })
    }

    /// Encodes `text` into the byte values of this encoding.
    ///
    /// Fails on the first character the encoding cannot represent.
    pub fn encode(&self, text: &str) -> Result<Vec<u8>, XorError> {
        match self {
            TextEncoding::Ascii => self.encode_single_byte(text, 0x7F),
            TextEncoding::Latin1 => self.encode_single_byte(text, 0xFF),
            TextEncoding::Utf8 => Ok(text.as_bytes().to_vec()),
            TextEncoding::Utf16Le => Ok(text
                .encode_utf16()
                .flat_map(|unit| unit.to_le_bytes())
                .collect()),
            TextEncoding::Utf16Be => Ok(text
                .encode_utf16()
                .flat_map(|unit| unit.to_be_bytes())
                .collect()),
        }
    }

    fn encode_single_byte(&self, text: &str, max: u32) -> Result<Vec<u8>, XorError> {
        text.chars()
            .enumerate()
            .map(|(position, character)| {
                let code = character as u32;
                if code > max {
                    return Err(XorError::Unencodable {
                        encoding: *self,
                        character,
                        position,
                    });
                }
                Ok(code as u8)
            })
            .collect()
    }
}

#[test]
fn encode_ascii_test() {
    assert_eq!(TextEncoding::Ascii.encode("Test 1").unwrap(), b"Test 1");
}

#[test]
fn encode_ascii_rejects_non_ascii_test() {
    assert_eq!(
        TextEncoding::Ascii.encode("caf\u{e9}"),
        Err(XorError::Unencodable {
            encoding: TextEncoding::Ascii,
            character: '\u{e9}',
            position: 3,
        })
    );
}

#[test]
fn encode_latin1_test() {
    assert_eq!(TextEncoding::Latin1.encode("caf\u{e9}").unwrap(), b"caf\xe9");
    assert!(TextEncoding::Latin1.encode("\u{20ac}").is_err());
}

#[test]
fn encode_utf8_test() {
    assert_eq!(
        TextEncoding::Utf8.encode("caf\u{e9}").unwrap(),
        b"caf\xc3\xa9"
    );
}

#[test]
fn encode_utf16_test() {
    assert_eq!(TextEncoding::Utf16Le.encode("A\u{e9}").unwrap(), b"A\x00\xe9\x00");
    assert_eq!(TextEncoding::Utf16Be.encode("A\u{e9}").unwrap(), b"\x00A\x00\xe9");
}

#[test]
fn from_name_test() {
    assert_eq!(TextEncoding::from_name("ASCII").unwrap(), TextEncoding::Ascii);
    assert_eq!(TextEncoding::from_name("utf8").unwrap(), TextEncoding::Utf8);
    assert_eq!(
        TextEncoding::from_name("ISO-8859-1").unwrap(),
        TextEncoding::Latin1
    );
    assert_eq!(
        TextEncoding::from_name("utf-16-be").unwrap(),
        TextEncoding::Utf16Be
    );
    assert_eq!(
        TextEncoding::from_name("ebcdic"),
        Err(XorError::UnknownEncoding("ebcdic".to_string()))
    );
}

#[test]
fn display_round_trips_through_from_name_test() {
    use strum::IntoEnumIterator;

    for encoding in TextEncoding::iter() {
        assert_eq!(
            TextEncoding::from_name(&encoding.to_string()).unwrap(),
            encoding
        );
    }
}

#[test]
fn default_is_ascii_test() {
    assert_eq!(TextEncoding::default(), TextEncoding::Ascii);
}
