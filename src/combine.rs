use log::debug;

use std::iter::FusedIterator;

use crate::{
    cycle::Cycle,
    encoding::TextEncoding,
    error::XorError,
    input::{normalize, Input},
};

/// When a combination stops producing values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthPolicy {
    /// Like [`LengthPolicy::Longest`], but endless when no input has a known length.
    #[default]
    Default,
    /// Stop at the length of the longest input with a known length.
    Longest,
    /// Never stop.
    Unbounded,
    /// Stop after exactly this many values.
    Exact(usize),
}

impl LengthPolicy {
    // turn the policy into a concrete limit, None meaning endless
    fn resolve(self, inputs: &[Input<'_>]) -> Result<Option<usize>, XorError> {
        let max_size = inputs.iter().filter_map(Input::known_len).max();
        match self {
            LengthPolicy::Default => Ok(max_size),
            LengthPolicy::Longest => max_size.map(Some).ok_or(XorError::MissingKnownLength),
            LengthPolicy::Unbounded => Ok(None),
            LengthPolicy::Exact(length) => Ok(Some(length)),
        }
    }
}

impl From<usize> for LengthPolicy {
    fn from(length: usize) -> Self {
        LengthPolicy::Exact(length)
    }
}

impl From<Option<usize>> for LengthPolicy {
    fn from(length: Option<usize>) -> Self {
        match length {
            Some(length) => LengthPolicy::Exact(length),
            None => LengthPolicy::Longest,
        }
    }
}

/// Collects inputs and options for a XOR combination.
#[derive(Debug, Default)]
pub struct Combiner<'a> {
    inputs: Vec<Input<'a>>,
    policy: LengthPolicy,
    encoding: TextEncoding,
}

impl<'a> Combiner<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn policy(mut self, policy: impl Into<LengthPolicy>) -> Self {
        self.policy = policy.into();
        self
    }

    pub fn encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn input(mut self, input: impl Into<Input<'a>>) -> Self {
        self.inputs.push(input.into());
        self
    }

    pub fn inputs<I>(mut self, inputs: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Input<'a>>,
    {
        self.inputs.extend(inputs.into_iter().map(Into::into));
        self
    }

    /// Validates the options and returns the lazy combination.
    ///
    /// Every error is raised here, before the first value is produced.
    pub fn build(self) -> Result<XorIter<'a>, XorError> {
        if self.inputs.is_empty() {
            return Err(XorError::NoInputs);
        }

        let limit = self.policy.resolve(&self.inputs)?;
        debug!(
            "combining {} inputs, policy {:?} resolved to limit {:?}",
            self.inputs.len(),
            self.policy,
            limit
        );

        let views = normalize(self.inputs, self.encoding)?
            .into_iter()
            .map(Cycle::new)
            .collect();

        Ok(XorIter {
            views,
            remaining: limit,
            limit,
            done: false,
        })
    }
}

/// Lazily XORs the current value of every input, position by position.
#[derive(Debug)]
pub struct XorIter<'a> {
    views: Vec<Cycle<'a>>,
    remaining: Option<usize>,
    limit: Option<usize>,
    done: bool,
}

impl XorIter<'_> {
    /// The resolved number of values to produce, `None` if endless.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}

impl Iterator for XorIter<'_> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        if self.done || self.remaining == Some(0) {
            return None;
        }

        let mut acc = 0;
        for view in self.views.iter_mut() {
            match view.next() {
                Some(value) => acc ^= value,
                None => {
                    // an empty input ends the whole combination
                    self.done = true;
                    return None;
                }
            }
        }

        if let Some(remaining) = self.remaining.as_mut() {
            *remaining -= 1;
        }
        Some(acc)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done || self.views.iter().any(Cycle::is_empty) {
            return (0, Some(0));
        }
        match self.remaining {
            Some(remaining) => (0, Some(remaining)),
            None => (0, None),
        }
    }
}

impl FusedIterator for XorIter<'_> {}

/// Builds a lazy XOR combination of `inputs`.
///
/// Inputs shorter than the stopping point start over from their first value.
pub fn xor_iter<'a, I>(
    inputs: I,
    policy: impl Into<LengthPolicy>,
    encoding: TextEncoding,
) -> Result<XorIter<'a>, XorError>
where
    I: IntoIterator,
    I::Item: Into<Input<'a>>,
{
    Combiner::new()
        .inputs(inputs)
        .policy(policy)
        .encoding(encoding)
        .build()
}

#[test]
fn xor_iter_longest_by_default_test() {
    let values: Vec<i64> = xor_iter(
        vec![Input::from(b"111"), Input::from(b"1")],
        LengthPolicy::Default,
        TextEncoding::Ascii,
    )
    .unwrap()
    .collect();
    assert_eq!(values, vec![0, 0, 0]);
}

#[test]
fn xor_iter_default_without_known_length_is_endless_test() {
    let mut iter = xor_iter(
        vec![
            Input::stream(std::iter::repeat(0x31)),
            Input::stream(std::iter::repeat(0x31)),
        ],
        LengthPolicy::Default,
        TextEncoding::Ascii,
    )
    .unwrap();
    assert_eq!(iter.limit(), None);
    assert_eq!(iter.next(), Some(0));
}

#[test]
fn xor_iter_longest_without_known_length_fails_test() {
    let err = xor_iter(
        vec![Input::from(1_i64), Input::stream(0..)],
        LengthPolicy::Longest,
        TextEncoding::Ascii,
    )
    .unwrap_err();
    assert_eq!(err, XorError::MissingKnownLength);
}

#[test]
fn xor_iter_ignores_unknown_lengths_test() {
    let iter = xor_iter(
        vec![Input::from(b"ab"), Input::stream(0..)],
        LengthPolicy::Longest,
        TextEncoding::Ascii,
    )
    .unwrap();
    assert_eq!(iter.limit(), Some(2));
    assert_eq!(iter.collect::<Vec<_>>(), vec![b'a' as i64, b'b' as i64 ^ 1]);
}

#[test]
fn xor_iter_exact_test() {
    let values: Vec<i64> = xor_iter(
        vec![Input::from(vec![1_i64, 2]), Input::from(vec![3_i64])],
        5_usize,
        TextEncoding::Ascii,
    )
    .unwrap()
    .collect();
    assert_eq!(values, vec![2, 1, 2, 1, 2]);
}

#[test]
fn xor_iter_exact_zero_test() {
    let mut iter = xor_iter(vec![Input::from(b"abc")], 0_usize, TextEncoding::Ascii).unwrap();
    assert_eq!(iter.size_hint(), (0, Some(0)));
    assert_eq!(iter.next(), None);
}

#[test]
fn xor_iter_unbounded_test() {
    let iter = xor_iter(
        vec![Input::from(vec![256_i64, 123]), Input::from(vec![123_i64])],
        LengthPolicy::Unbounded,
        TextEncoding::Ascii,
    )
    .unwrap();
    let values: Vec<i64> = iter.take(100).collect();
    assert_eq!(values.len(), 100);
    assert_eq!(&values[..4], &[256 ^ 123, 0, 256 ^ 123, 0]);
}

#[test]
fn xor_iter_no_inputs_test() {
    let err = xor_iter(Vec::<Input<'_>>::new(), LengthPolicy::Default, TextEncoding::Ascii)
        .unwrap_err();
    assert_eq!(err, XorError::NoInputs);
}

#[test]
fn xor_iter_empty_input_ends_combination_test() {
    let mut iter = xor_iter(
        vec![Input::from(b"abc"), Input::from(Vec::<u8>::new())],
        LengthPolicy::Default,
        TextEncoding::Ascii,
    )
    .unwrap();
    assert_eq!(iter.limit(), Some(3));
    assert_eq!(iter.size_hint(), (0, Some(0)));
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next(), None);
}

#[test]
fn xor_iter_text_uses_encoding_test() {
    let values: Vec<i64> = xor_iter(
        vec![Input::from("\u{e9}"), Input::from(0xE9_i64)],
        LengthPolicy::Longest,
        TextEncoding::Latin1,
    )
    .unwrap()
    .collect();
    assert_eq!(values, vec![0]);
}

#[test]
fn xor_iter_text_length_counts_chars_test() {
    // two chars, three utf-8 bytes
    let values: Vec<i64> = xor_iter(
        vec![Input::from("a\u{e9}")],
        LengthPolicy::Longest,
        TextEncoding::Utf8,
    )
    .unwrap()
    .collect();
    assert_eq!(values, vec![0x61, 0xC3]);
}

#[test]
fn combiner_builder_test() {
    let values: Vec<i64> = Combiner::new()
        .input(b"11")
        .input(0x31_i64)
        .policy(Some(4_usize))
        .build()
        .unwrap()
        .collect();
    assert_eq!(values, vec![0, 0, 0, 0]);
}

#[test]
fn policy_from_option_test() {
    assert_eq!(LengthPolicy::from(None::<usize>), LengthPolicy::Longest);
    assert_eq!(LengthPolicy::from(Some(3_usize)), LengthPolicy::Exact(3));
}

#[test]
fn xor_iter_borrowed_stream_test() {
    let key = [0x20_i64, 0x00];
    let values: Vec<i64> = xor_iter(
        vec![Input::from(b"abcd"), Input::stream(key.iter().copied())],
        LengthPolicy::Default,
        TextEncoding::Ascii,
    )
    .unwrap()
    .collect();
    assert_eq!(values, vec![0x41, 0x62, 0x43, 0x64]);
}

#[test]
fn xor_iter_endless_streams_test() {
    let iter = xor_iter(
        vec![Input::stream(std::iter::repeat(0x31)), Input::stream(0..)],
        LengthPolicy::Unbounded,
        TextEncoding::Ascii,
    )
    .unwrap();
    assert_eq!(iter.skip(100_000).next(), Some(0x31 ^ 100_000));
}
