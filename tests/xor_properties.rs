mod common;

use xorcycle::{xor, xor_iter, Input, LengthPolicy, TextEncoding, XorError};

fn bytes(hex: &str) -> Vec<u8> {
    hex::decode(hex).unwrap()
}

#[test]
fn xor_equal_length_inputs_test() {
    let _logger = common::logger();

    let lhs = bytes("1c0111001f010100061a024b53535009181c");
    let rhs = bytes("686974207468652062756c6c277320657965");

    let out = xor([Input::from(lhs.clone()), Input::from(rhs.clone())], None).unwrap();

    assert_eq!(out.len(), lhs.len());
    assert_eq!(hex::encode(&out), "746865206b696420646f6e277420706c6179");
    for (i, byte) in out.iter().enumerate() {
        assert_eq!(*byte, lhs[i] ^ rhs[i]);
    }
}

#[test]
fn xor_is_an_involution_test() {
    let _logger = common::logger();

    let plain = b"cooking MC's like a pound of bacon".to_vec();
    let key = bytes("0b3637272a2b2e63622c2e69692a23693a2a3c6324202d623d63343c2a2622632427");
    assert_eq!(plain.len(), key.len());

    let cipher = xor([Input::from(plain.clone()), Input::from(key.clone())], None).unwrap();
    let back = xor([Input::from(cipher), Input::from(key)], None).unwrap();

    assert_eq!(back, plain);
}

#[test]
fn xor_repeating_key_test() {
    let _logger = common::logger();

    let out = xor(
        [
            Input::from("Burning 'em, if you ain't quick and nimble"),
            Input::from("ICE"),
        ],
        None,
    )
    .unwrap();

    assert_eq!(
        hex::encode(out),
        "0b3637272a2b2e63622c2e69692a23693a2a3c6324202d623d63343c2a26226324272765272a282b2f20"
    );
}

#[test]
fn xor_cycling_test() {
    assert_eq!(
        xor([Input::from(b"111"), Input::from(b"1")], None).unwrap(),
        b"\x00\x00\x00"
    );
    assert_eq!(
        xor(
            [Input::from(b"111"), Input::stream(b"1".repeat(8).into_iter().map(i64::from))],
            None
        )
        .unwrap(),
        b"\x00\x00\x00"
    );
}

#[test]
fn xor_explicit_length_truncates_test() {
    assert_eq!(
        xor([Input::from(b"111"), Input::from(b"1")], Some(2)).unwrap(),
        b"\x00\x00"
    );
}

#[test]
fn xor_text_and_bytes_test() {
    assert_eq!(
        xor([Input::from(b"1"), Input::from("1")], None).unwrap(),
        b"\x00"
    );
}

#[test]
fn xor_scalar_broadcast_test() {
    assert_eq!(
        xor([Input::from(b"11"), Input::from(0x31_i64)], None).unwrap(),
        b"\x00\x00"
    );
    assert_eq!(
        xor([Input::from(b"11"), Input::from(b'1')], None).unwrap(),
        xor([Input::from(b"11"), Input::from(vec![0x31_i64])], None).unwrap()
    );
}

#[test]
fn unknown_length_strict_failure_test() {
    let _logger = common::logger();

    let ones = || Input::stream(std::iter::repeat(i64::from(b'1')));

    assert_eq!(xor([ones(), ones()], None), Err(XorError::MissingKnownLength));
    assert_eq!(
        xor_iter([ones(), ones()], LengthPolicy::Longest, TextEncoding::Ascii).unwrap_err(),
        XorError::MissingKnownLength
    );
    assert!(XorError::MissingKnownLength.is_configuration());
}

#[test]
fn unknown_length_default_is_lazy_test() {
    let ones = || Input::stream(std::iter::repeat(i64::from(b'1')));

    let mut iter = xor_iter([ones(), ones()], LengthPolicy::Default, TextEncoding::Ascii).unwrap();
    assert_eq!(iter.next(), Some(0));
}

#[test]
fn range_checked_only_when_materialized_test() {
    let _logger = common::logger();

    let inputs = || [Input::from(vec![256_i64, 123]), Input::from(vec![0_i64, 123])];

    assert_eq!(
        xor(inputs(), None),
        Err(XorError::ByteOutOfRange {
            index: 0,
            value: 256
        })
    );
    assert_eq!(
        xor_iter(inputs(), LengthPolicy::Default, TextEncoding::Ascii)
            .unwrap()
            .collect::<Vec<_>>(),
        vec![256, 0]
    );
}

#[test]
fn unbounded_prefix_test() {
    let iter = xor_iter(
        [Input::from(vec![256_i64, 123]), Input::from(vec![123_i64])],
        LengthPolicy::Unbounded,
        TextEncoding::Ascii,
    )
    .unwrap();

    assert_eq!(iter.take(100).count(), 100);
}

#[test]
fn no_inputs_test() {
    assert_eq!(xor(Vec::<Input>::new(), None), Err(XorError::NoInputs));
}

#[test]
fn encoding_by_name_test() {
    let encoding = TextEncoding::from_name("latin-1").unwrap();
    let out = xor_iter(
        [Input::from("\u{ff}\u{ff}"), Input::from(0xFF_i64)],
        LengthPolicy::Longest,
        encoding,
    )
    .unwrap();

    assert_eq!(out.collect::<Vec<_>>(), vec![0, 0]);
    assert_eq!(
        TextEncoding::from_name("klingon"),
        Err(XorError::UnknownEncoding("klingon".to_string()))
    );
}
