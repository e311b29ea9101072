//! Cyclic XOR of byte-like inputs.
//!
//! Every input is repeated from its start once it runs out, and the values
//! at each position are XORed together. Inputs can be single integers, text,
//! byte or integer sequences, or iterators of unknown length.
//!
//! ```
//! use xorcycle::{xor, Input};
//!
//! let out = xor([Input::from(b"111"), Input::from(b"1")], None).unwrap();
//! assert_eq!(out, b"\x00\x00\x00");
//! ```
//!
//! This is plain XOR with a repeating key. It offers no security.

use log::warn;

pub mod combine;
mod cycle;
pub mod encoding;
pub mod error;
mod input;

pub use combine::{xor_iter, Combiner, LengthPolicy, XorIter};
pub use encoding::TextEncoding;
pub use error::XorError;
pub use input::Input;

/// XORs `inputs` into bytes.
///
/// The result is `length` bytes long when given. Otherwise it has the length
/// of the longest input with a known length, and fails if there is none.
pub fn xor<'a, I>(inputs: I, length: Option<usize>) -> Result<Vec<u8>, XorError>
where
    I: IntoIterator,
    I::Item: Into<Input<'a>>,
{
    xor_with(inputs, length, TextEncoding::default())
}

// same as xor, with text inputs converted by `encoding`
pub fn xor_with<'a, I>(
    inputs: I,
    length: Option<usize>,
    encoding: TextEncoding,
) -> Result<Vec<u8>, XorError>
where
    I: IntoIterator,
    I::Item: Into<Input<'a>>,
{
    xor_iter(inputs, length, encoding)?
        .enumerate()
        .map(|(index, value)| {
            u8::try_from(value).map_err(|_| {
                warn!("Combined value {value} at index {index} does not fit in a byte");
                XorError::ByteOutOfRange { index, value }
            })
        })
        .collect()
}

#[test]
fn xor_cycles_shorter_input_test() {
    assert_eq!(
        xor([Input::from(b"111"), Input::from(b"1")], None).unwrap(),
        b"\x00\x00\x00"
    );
}

#[test]
fn xor_explicit_length_test() {
    assert_eq!(
        xor([Input::from(b"111"), Input::from(b"1")], Some(2)).unwrap(),
        b"\x00\x00"
    );
}

#[test]
fn xor_longer_than_inputs_test() {
    assert_eq!(
        xor([Input::from(b"ab"), Input::from(0x20_i64)], Some(5)).unwrap(),
        b"ABABA"
    );
}

#[test]
fn xor_out_of_range_test() {
    assert_eq!(
        xor(
            [Input::from(vec![256_i64, 123]), Input::from(vec![0_i64, 123])],
            None
        ),
        Err(XorError::ByteOutOfRange {
            index: 0,
            value: 256
        })
    );
}

#[test]
fn xor_negative_value_test() {
    assert_eq!(
        xor([Input::from(vec![1_i64, -1])], None),
        Err(XorError::ByteOutOfRange {
            index: 1,
            value: -1
        })
    );
}

#[test]
fn xor_requires_known_length_test() {
    assert_eq!(
        xor(
            [
                Input::stream(std::iter::repeat(0x31)),
                Input::stream(std::iter::repeat(0x31))
            ],
            None
        ),
        Err(XorError::MissingKnownLength)
    );
}

#[test]
fn xor_with_encoding_test() {
    assert_eq!(
        xor_with(
            [Input::from("\u{e9}t\u{e9}"), Input::from(0xE9_i64)],
            None,
            TextEncoding::Latin1
        )
        .unwrap(),
        vec![0x00, b't' ^ 0xE9, 0x00]
    );
}

#[test]
fn xor_default_encoding_rejects_non_ascii_test() {
    assert!(matches!(
        xor([Input::from("\u{e9}")], None),
        Err(XorError::Unencodable { .. })
    ));
}
