use std::fmt;

use crate::{encoding::TextEncoding, error::XorError};

/// One operand of a XOR combination.
pub enum Input<'a> {
    /// A single value, repeated at every position.
    Scalar(i64),
    /// Text, converted with the combination's [`TextEncoding`].
    Text(String),
    /// A finite sequence with a known length.
    Sequence(Vec<i64>),
    /// Values of unknown length, finite or not, possibly borrowed.
    Stream(Box<dyn Iterator<Item = i64> + 'a>),
}

impl<'a> Input<'a> {
    pub fn stream<I>(values: I) -> Self
    where
        I: IntoIterator<Item = i64>,
        I::IntoIter: 'a,
    {
        Input::Stream(Box::new(values.into_iter()))
    }

    /// Length of the input as given, before normalization.
    ///
    /// Text counts chars, not encoded bytes.
    pub fn known_len(&self) -> Option<usize> {
        match self {
            Input::Text(text) => Some(text.chars().count()),
            Input::Sequence(values) => Some(values.len()),
            Input::Scalar(_) | Input::Stream(_) => None,
        }
    }
}

impl fmt::Debug for Input<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Scalar(value) => f.debug_tuple("Scalar").field(value).finish(),
            Input::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Input::Sequence(values) => f.debug_tuple("Sequence").field(values).finish(),
            Input::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

impl From<i64> for Input<'_> {
    fn from(value: i64) -> Self {
        Input::Scalar(value)
    }
}

impl From<u8> for Input<'_> {
    fn from(value: u8) -> Self {
        Input::Scalar(value as i64)
    }
}

impl From<&str> for Input<'_> {
    fn from(text: &str) -> Self {
        Input::Text(text.to_string())
    }
}

impl From<String> for Input<'_> {
    fn from(text: String) -> Self {
        Input::Text(text)
    }
}

impl From<&[u8]> for Input<'_> {
    fn from(bytes: &[u8]) -> Self {
        Input::Sequence(bytes.iter().map(|&b| b as i64).collect())
    }
}

impl<const N: usize> From<&[u8; N]> for Input<'_> {
    fn from(bytes: &[u8; N]) -> Self {
        Input::from(&bytes[..])
    }
}

impl From<Vec<u8>> for Input<'_> {
    fn from(bytes: Vec<u8>) -> Self {
        Input::from(bytes.as_slice())
    }
}

impl From<&[i64]> for Input<'_> {
    fn from(values: &[i64]) -> Self {
        Input::Sequence(values.to_vec())
    }
}

impl From<Vec<i64>> for Input<'_> {
    fn from(values: Vec<i64>) -> Self {
        Input::Sequence(values)
    }
}

/// A normalized input: plain integers, ready to be cycled.
pub enum Source<'a> {
    Finite(Vec<i64>),
    Stream(Box<dyn Iterator<Item = i64> + 'a>),
}

impl fmt::Debug for Source<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Finite(values) => f.debug_tuple("Finite").field(values).finish(),
            Source::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

// convert every input into integers, keeping their order
pub fn normalize<'a, I>(inputs: I, encoding: TextEncoding) -> Result<Vec<Source<'a>>, XorError>
where
    I: IntoIterator<Item = Input<'a>>,
{
    inputs
        .into_iter()
        .map(|input| match input {
            Input::Scalar(value) => Ok(Source::Finite(vec![value])),
            Input::Text(text) => encoding
                .encode(&text)
                .map(|bytes| Source::Finite(bytes.into_iter().map(i64::from).collect())),
            Input::Sequence(values) => Ok(Source::Finite(values)),
            Input::Stream(values) => Ok(Source::Stream(values)),
        })
        .collect()
}

#[cfg(test)]
fn finite<'s>(source: &'s Source<'_>) -> &'s [i64] {
    match source {
        Source::Finite(values) => values,
        Source::Stream(_) => panic!("expected a finite source"),
    }
}

#[test]
fn normalize_scalar_test() {
    let sources = normalize(vec![Input::from(0x31_i64)], TextEncoding::Ascii).unwrap();
    assert_eq!(finite(&sources[0]), &[0x31]);
}

#[test]
fn normalize_text_test() {
    let sources = normalize(vec![Input::from("1a")], TextEncoding::Ascii).unwrap();
    assert_eq!(finite(&sources[0]), &[0x31, 0x61]);
}

#[test]
fn normalize_keeps_order_and_values_test() {
    let sources = normalize(
        vec![
            Input::from(vec![256_i64, -1]),
            Input::from(b"x"),
            Input::stream(std::iter::repeat(7)),
        ],
        TextEncoding::Ascii,
    )
    .unwrap();

    assert_eq!(sources.len(), 3);
    assert_eq!(finite(&sources[0]), &[256, -1]);
    assert_eq!(finite(&sources[1]), &[b'x' as i64]);
    assert!(matches!(sources[2], Source::Stream(_)));
}

#[test]
fn normalize_text_encoding_error_test() {
    let err = normalize(vec![Input::from("\u{e9}")], TextEncoding::Ascii).unwrap_err();
    assert!(matches!(err, XorError::Unencodable { position: 0, .. }));
}

#[test]
fn known_len_test() {
    assert_eq!(Input::from(b"111").known_len(), Some(3));
    assert_eq!(Input::from("caf\u{e9}").known_len(), Some(4));
    assert_eq!(Input::from(1_i64).known_len(), None);
    assert_eq!(Input::stream(vec![1, 2]).known_len(), None);
}

#[test]
fn stream_borrows_local_values_test() {
    let local = vec![3_i64, 4];
    let input = Input::stream(local.iter().copied());
    assert_eq!(input.known_len(), None);

    let sources = normalize(vec![input], TextEncoding::Ascii).unwrap();
    match sources.into_iter().next() {
        Some(Source::Stream(values)) => assert_eq!(values.collect::<Vec<_>>(), local),
        _ => panic!("expected a stream source"),
    };
}
