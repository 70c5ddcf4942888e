//! Known encodings of common values.

use bytes::Bytes;
use ledger_rlp::{
    decode_bigint, encode_bigint,
    num_bigint::{BigInt, BigUint},
    util::{from_hex, from_hex_formatted, hex},
    Decode, DecodeExt, Encode, EncodeSize, Error, Raw, Read, Sign, Write,
};
use std::fmt::Debug;
use test_case::test_case;

const LOREM_55: &str = "Lorem ipsum dolor sit amet, consectetur adipisicing eli";
const LOREM_56: &str = "Lorem ipsum dolor sit amet, consectetur adipisicing elit";

fn check<T>(value: T, expected: &str)
where
    T: Write + EncodeSize + Decode + PartialEq + Debug,
    T::Cfg: Default,
{
    let encoded = value.encode();
    assert_eq!(hex(&encoded), expected.to_lowercase());
    assert_eq!(value.encode_size(), encoded.len());
    assert_eq!(T::decode(encoded).unwrap(), value);
}

#[test_case(0, "80")]
#[test_case(127, "7F")]
#[test_case(128, "8180")]
#[test_case(256, "820100")]
#[test_case(1024, "820400")]
#[test_case(0xFFFFFF, "83FFFFFF")]
#[test_case(0xFFFFFFFF, "84FFFFFFFF")]
fn test_u32(value: u32, expected: &str) {
    check(value, expected);
}

#[test_case(0xFFFFFFFFFF, "85FFFFFFFFFF")]
#[test_case(0xFFFFFFFFFFFF, "86FFFFFFFFFFFF")]
#[test_case(0xFFFFFFFFFFFFFF, "87FFFFFFFFFFFFFF")]
#[test_case(u64::MAX, "88FFFFFFFFFFFFFFFF")]
fn test_u64(value: u64, expected: &str) {
    check(value, expected);
}

#[test_case(0, "80")]
#[test_case(256, "820100")]
#[test_case(-1024, "820400")]
#[test_case(0xFFFFFFFF, "84FFFFFFFF")]
#[test_case(-0xFFFFFFFF, "84FFFFFFFF")]
#[test_case(-0xFFFFFFFFFFFFFF, "87FFFFFFFFFFFFFF")]
#[test_case(i64::MAX, "887FFFFFFFFFFFFFFF")]
#[test_case(-i64::MAX, "887FFFFFFFFFFFFFFF")]
#[test_case(i64::MIN, "888000000000000000")]
fn test_i64(value: i64, expected: &str) {
    let encoded = value.encode();
    assert_eq!(hex(&encoded), expected.to_lowercase());
    let sign = if value < 0 { Sign::Negative } else { Sign::Positive };
    assert_eq!(i64::decode_cfg(encoded, &sign).unwrap(), value);
}

#[test]
fn test_narrow_signed() {
    assert_eq!(hex(&127i8.encode()), "7f");
    assert_eq!(hex(&(-127i8).encode()), "7f");
    assert_eq!(hex(&128i16.encode()), "8180");
    assert_eq!(hex(&(-128i16).encode()), "8180");
    assert_eq!(
        i16::decode_cfg(Bytes::from_static(&[0x81, 0x80]), &Sign::Negative).unwrap(),
        -128
    );
    assert_eq!(
        i8::decode_cfg(Bytes::from_static(&[0x81, 0x80]), &Sign::Negative).unwrap(),
        i8::MIN
    );
    assert_eq!(
        i8::decode_cfg(Bytes::from_static(&[0x81, 0x80]), &Sign::Positive),
        Err(Error::Overflow(1, 1))
    );
}

#[test_case(true, "01")]
#[test_case(false, "80")]
fn test_bool(value: bool, expected: &str) {
    check(value, expected);
}

#[test_case("0", "80"; "zero")]
#[test_case("1", "01"; "one")]
#[test_case("7F", "7F"; "self encoded")]
#[test_case("80", "8180"; "prefixed")]
#[test_case("FFFFFFFFFFFFFF", "87FFFFFFFFFFFFFF"; "seven bytes")]
#[test_case("102030405060708090A0B0C0D0E0F2", "8F102030405060708090A0B0C0D0E0F2"; "fifteen bytes")]
#[test_case(
    "0100020003000400050006000700080009000A000B000C000D000E01",
    "9C0100020003000400050006000700080009000A000B000C000D000E01";
    "twenty eight bytes"
)]
#[test_case(
    "010000000000000000000000000000000000000000000000000000000000000000",
    "A1010000000000000000000000000000000000000000000000000000000000000000";
    "thirty three bytes"
)]
fn test_big(magnitude: &str, expected: &str) {
    let value = BigUint::parse_bytes(magnitude.as_bytes(), 16).unwrap();
    check(value.clone(), expected);

    let signed = BigInt::from(value);
    let mut buf = Vec::new();
    encode_bigint(&signed, &mut buf).unwrap();
    assert_eq!(hex(&buf), expected.to_lowercase());
    assert_eq!(decode_bigint(&mut buf.as_slice()).unwrap(), signed);
}

#[test]
fn test_negative_big() {
    let mut buf = Vec::new();
    assert_eq!(
        encode_bigint(&BigInt::from(-1), &mut buf),
        Err(Error::NegativeBigInt)
    );
    assert!(buf.is_empty());
}

#[test_case(&[], "80"; "empty")]
#[test_case(&[0x7E], "7E"; "low byte")]
#[test_case(&[0x7F], "7F"; "highest self encoded")]
#[test_case(&[0x80], "8180"; "lowest prefixed")]
#[test_case(&[1, 2, 3], "83010203"; "three bytes")]
fn test_bytes(value: &'static [u8], expected: &str) {
    check(Bytes::from_static(value), expected);
}

#[test]
fn test_strings() {
    check(String::new(), "80");
    check(String::from("\x7E"), "7E");
    check(String::from("dog"), "83646F67");
    check([1u8, 2, 3], "83010203");

    let short = String::from(LOREM_55).encode();
    assert_eq!(short[0], 0xB7);
    assert_eq!(&short[1..], LOREM_55.as_bytes());

    let long = String::from(LOREM_56).encode();
    assert_eq!(&long[..2], &[0xB8, 0x38]);
    assert_eq!(&long[2..], LOREM_56.as_bytes());
    assert_eq!(String::decode(long).unwrap(), LOREM_56);
}

#[test]
fn test_long_string_vector() {
    let expected = from_hex_formatted(
        "0x
        B8384C6F72656D20697073756D20646F
        6C6F722073697420616D65742C20636F
        6E736563746574757220616469706973
        6963696E6720656C6974",
    )
    .unwrap();
    assert_eq!(String::from(LOREM_56).encode(), expected.as_slice());
    assert_eq!(String::decode(Bytes::from(expected)).unwrap(), LOREM_56);
}

#[test]
fn test_lists() {
    check(Vec::<u64>::new(), "C0");
    check(vec![1u64, 2, 3], "C3010203");

    let strings: Vec<String> = ["aaa", "bbb", "ccc", "ddd", "eee", "fff", "ggg", "hhh", "iii"]
        .into_iter()
        .chain(["jjj", "kkk", "lll", "mmm", "nnn", "ooo"])
        .map(String::from)
        .collect();
    let encoded = strings.encode();
    assert_eq!(&encoded[..2], &[0xF8, 0x3C]);
    assert_eq!(Vec::<String>::decode(encoded).unwrap(), strings);

    let row = vec![
        String::from("asdf"),
        String::from("qwer"),
        String::from("zxcv"),
    ];
    let grid = vec![row; 32];
    let encoded = grid.encode();
    assert_eq!(&encoded[..3], &[0xF9, 0x02, 0x00]);
    assert_eq!(
        hex(&encoded[3..19]),
        "cf84617364668471776572847a786376"
    );
    assert_eq!(Vec::<Vec<String>>::decode(encoded).unwrap(), grid);
}

#[test]
fn test_nested_empty_lists() {
    // [ [], [[]], [ [], [[]] ] ]
    let value = (
        Vec::<u8>::new(),
        (Vec::<u8>::new(),),
        (Vec::<u8>::new(), (Vec::<u8>::new(),)),
    );
    check(value, "C7C0C1C0C3C0C1C0");
}

#[test]
fn test_raw() {
    for expected in ["01", "82FFFF"] {
        let raw = Raw::new(Bytes::from(from_hex(expected).unwrap())).unwrap();
        check(raw, expected);
    }

    let items = vec![
        Raw::new(Bytes::from_static(&[0x01])).unwrap(),
        Raw::new(Bytes::from_static(&[0x02])).unwrap(),
    ];
    check(items, "C20102");
}

#[test]
fn test_nil() {
    check(None::<u64>, "80");
    check(None::<String>, "80");
    check(None::<Bytes>, "80");
    check(None::<[u8; 10]>, "80");
    check(None::<BigUint>, "80");
    check(None::<Vec<String>>, "C0");
    check(None::<(u64,)>, "C0");
}

#[test]
fn test_read_leaves_rest() {
    let mut buf = Bytes::from_static(&[0x83, b'd', b'o', b'g', 0x01]);
    assert_eq!(String::read_cfg(&mut buf, &Default::default()).unwrap(), "dog");
    assert_eq!(&buf[..], &[0x01]);
}
