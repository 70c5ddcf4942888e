#![no_main]

use arbitrary::Arbitrary;
use bytes::Bytes;
use ledger_rlp::{
    num_bigint::BigUint, Decode, DecodeExt, Encode, EncodeSize, RangeCfg, Raw, Read, Sign,
    Value, Write,
};
use libfuzzer_sys::fuzz_target;
use std::{collections::BTreeMap, fmt::Debug};

fn roundtrip<T>(value: &T, cfg: &T::Cfg)
where
    T: Write + EncodeSize + Read + PartialEq + Debug,
{
    let encoded = value.encode();
    assert_eq!(value.encode_size(), encoded.len());
    let decoded = T::decode_cfg(encoded, cfg).expect("Failed to decode a successfully encoded input!");
    assert_eq!(value, &decoded);
}

fn roundtrip_signed(value: i64) {
    roundtrip(&value, &Sign::of(value));
    roundtrip(&(value as i32), &Sign::of(value as i32 as i64));
    roundtrip(&(value as i8), &Sign::of(value as i8 as i64));
}

fn roundtrip_big(bytes: &[u8]) {
    roundtrip(&BigUint::from_bytes_be(bytes), &());
}

// Any input that decodes must re-encode to the same bytes.
fn canonical(input: &[u8]) {
    let Ok(value) = Value::decode(Bytes::copy_from_slice(input)) else {
        return;
    };
    assert_eq!(value.encode(), input);
    let schema = value.schema();
    assert_eq!(Value::decode_cfg(Bytes::copy_from_slice(input), &schema).unwrap(), value);

    let raw = Raw::new(Bytes::copy_from_slice(input)).expect("Failed to wrap a decodable input!");
    assert_eq!(raw.as_bytes(), input);
}

#[derive(Arbitrary, Debug)]
enum FuzzInput<'a> {
    Canonical(&'a [u8]),

    // Primitives
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Signed(i64),
    Big(&'a [u8]),

    // Strings
    Bytes(&'a [u8]),
    String(String),
    Array([u8; 20]),

    // Collections
    Vec(Vec<u64>),
    Nested(Vec<Vec<String>>),
    Option(Option<u32>),
    Tuple((u8, Option<String>, Vec<bool>)),
    BTreeMap(BTreeMap<u64, String>),
}

fn fuzz(input: FuzzInput) {
    match input {
        FuzzInput::Canonical(it) => canonical(it),
        FuzzInput::Bool(it) => roundtrip(&it, &()),
        FuzzInput::U8(it) => roundtrip(&it, &()),
        FuzzInput::U16(it) => roundtrip(&it, &()),
        FuzzInput::U32(it) => roundtrip(&it, &()),
        FuzzInput::U64(it) => roundtrip(&it, &()),
        FuzzInput::Signed(it) => roundtrip_signed(it),
        FuzzInput::Big(it) => roundtrip_big(it),
        FuzzInput::Bytes(it) => roundtrip(&Bytes::copy_from_slice(it), &(..).into()),
        FuzzInput::String(it) => roundtrip(&it, &(..).into()),
        FuzzInput::Array(it) => roundtrip(&it, &()),
        FuzzInput::Vec(it) => roundtrip(&it, &((..).into(), ())),
        FuzzInput::Nested(it) => roundtrip(&it, &((..).into(), ((..).into(), (..).into()))),
        // An empty inner value shares its encoding with `None`.
        FuzzInput::Option(it) => roundtrip(&it.filter(|v| *v != 0), &()),
        FuzzInput::Tuple((a, b, c)) => {
            let it = (a, b.filter(|s| !s.is_empty()), c);
            roundtrip(&it, &((), (..).into(), ((..).into(), ())))
        }
        FuzzInput::BTreeMap(it) => {
            let cfg: (RangeCfg, ((), RangeCfg)) = ((..).into(), ((), (..).into()));
            roundtrip(&it, &cfg)
        }
    }
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
