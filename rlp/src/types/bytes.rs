//! Implementations of Codec for byte strings.
//!
//! [Bytes], [String] and `[u8; N]` are written as byte strings. A one-byte string whose byte
//! is below `0x80` is its own encoding; everything else carries a string header.
//!
//! [Raw] holds an item that is already encoded and is copied to and from the wire untouched.

use crate::{
    header::{self, Header, Kind},
    EncodeSize, Error, Kinded, RangeCfg, Read, Write,
};
use bytes::{Buf, BufMut, Bytes, BytesMut};

impl Kinded for Bytes {
    const KIND: Kind = Kind::String;
}

impl Write for Bytes {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        header::write_string(self, buf);
    }
}

impl EncodeSize for Bytes {
    #[inline]
    fn encode_size(&self) -> usize {
        header::string_size(self)
    }
}

impl Read for Bytes {
    type Cfg = RangeCfg;

    #[inline]
    fn read_cfg(buf: &mut impl Buf, range: &Self::Cfg) -> Result<Self, Error> {
        let len = header::read_string(buf)?;
        if !range.contains(len) {
            return Err(Error::InvalidLength(len));
        }
        Ok(buf.copy_to_bytes(len))
    }
}

impl Kinded for String {
    const KIND: Kind = Kind::String;
}

impl Write for String {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        header::write_string(self.as_bytes(), buf);
    }
}

impl EncodeSize for String {
    #[inline]
    fn encode_size(&self) -> usize {
        header::string_size(self.as_bytes())
    }
}

impl Read for String {
    type Cfg = RangeCfg;

    #[inline]
    fn read_cfg(buf: &mut impl Buf, range: &Self::Cfg) -> Result<Self, Error> {
        let bytes = Bytes::read_cfg(buf, range)?;
        String::from_utf8(bytes.into()).map_err(|_| Error::InvalidData("String", "invalid UTF-8"))
    }
}

// Constant-size array implementation
impl<const N: usize> Kinded for [u8; N] {
    const KIND: Kind = Kind::String;
}

impl<const N: usize> Write for [u8; N] {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        header::write_string(self, buf);
    }
}

impl<const N: usize> EncodeSize for [u8; N] {
    #[inline]
    fn encode_size(&self) -> usize {
        header::string_size(self)
    }
}

impl<const N: usize> Read for [u8; N] {
    type Cfg = ();

    #[inline]
    fn read_cfg(buf: &mut impl Buf, _: &()) -> Result<Self, Error> {
        let len = header::read_string(buf)?;
        if len != N {
            return Err(Error::InvalidLength(len));
        }
        let mut dst = [0; N];
        buf.copy_to_slice(&mut dst);
        Ok(dst)
    }
}

/// A single item kept in its encoded form.
///
/// Useful for passing through parts of a message without decoding them, or for splicing in
/// an encoding produced elsewhere.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Raw(Bytes);

impl Raw {
    /// Wraps `encoded`, checking that it holds exactly one item with a canonical header.
    ///
    /// Only the outermost header is checked; the payload is not decoded.
    pub fn new(encoded: impl Into<Bytes>) -> Result<Self, Error> {
        let mut encoded: Bytes = encoded.into();
        let raw = Self::read_cfg(&mut encoded, &())?;
        if encoded.has_remaining() {
            return Err(Error::ExtraData(encoded.remaining()));
        }
        Ok(raw)
    }

    /// Returns the encoded item, header included.
    pub fn as_bytes(&self) -> &Bytes {
        &self.0
    }

    pub fn into_inner(self) -> Bytes {
        self.0
    }
}

impl Write for Raw {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        buf.put_slice(&self.0);
    }
}

impl EncodeSize for Raw {
    #[inline]
    fn encode_size(&self) -> usize {
        self.0.len()
    }
}

impl Read for Raw {
    type Cfg = ();

    fn read_cfg(buf: &mut impl Buf, _: &()) -> Result<Self, Error> {
        let (header, consumed) = Header::decode_counted(buf)?;
        if consumed == 0 {
            // Self-encoded byte.
            return Ok(Self(buf.copy_to_bytes(1)));
        }
        let mut encoded = BytesMut::with_capacity(consumed + header.payload_length);
        header.write(&mut encoded);
        encoded.extend_from_slice(&buf.copy_to_bytes(header.payload_length));
        Ok(Self(encoded.freeze()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{util::from_hex, Decode, DecodeExt, Encode};
    use test_case::test_case;

    const LOREM_55: &str = "Lorem ipsum dolor sit amet, consectetur adipisicing eli";
    const LOREM_56: &str = "Lorem ipsum dolor sit amet, consectetur adipisicing elit";

    #[test_case(&[], "80"; "empty")]
    #[test_case(&[0x7E], "7e"; "self encoded")]
    #[test_case(&[0x7F], "7f"; "largest self encoded")]
    #[test_case(&[0x80], "8180"; "prefixed single byte")]
    #[test_case(&[1, 2, 3], "83010203"; "short")]
    fn test_bytes_vectors(value: &'static [u8], expected: &str) {
        let value = Bytes::from_static(value);
        let encoded = value.encode();
        assert_eq!(encoded, from_hex(expected).unwrap().as_slice());
        assert_eq!(value.encode_size(), encoded.len());
        assert_eq!(Bytes::decode(encoded).unwrap(), value);
    }

    #[test]
    fn test_string_boundary() {
        let encoded = LOREM_55.to_string().encode();
        assert_eq!(encoded[0], 0xB7);
        assert_eq!(&encoded[1..], LOREM_55.as_bytes());

        let encoded = LOREM_56.to_string().encode();
        assert_eq!(&encoded[..2], &[0xB8, 0x38]);
        assert_eq!(&encoded[2..], LOREM_56.as_bytes());
        assert_eq!(String::decode(encoded).unwrap(), LOREM_56);

        let long = "a".repeat(1024);
        let encoded = long.encode();
        assert_eq!(&encoded[..3], &[0xB9, 0x04, 0x00]);
        assert_eq!(String::decode(encoded).unwrap(), long);

        assert_eq!(String::from("dog").encode(), &[0x83, b'd', b'o', b'g'][..]);
    }

    #[test]
    fn test_range() {
        let value = Bytes::from_static(&[1, 2, 3]);
        let len = value.len();
        assert_eq!(
            Bytes::decode_cfg(value.encode(), &RangeCfg::exact(len)).unwrap(),
            value
        );
        assert_eq!(
            Bytes::decode_cfg(value.encode(), &(0..len).into()),
            Err(Error::InvalidLength(3))
        );
        assert_eq!(
            Bytes::decode_cfg(value.encode(), &(len + 1..).into()),
            Err(Error::InvalidLength(3))
        );
    }

    #[test]
    fn test_invalid_utf8() {
        let encoded = Bytes::from_static(&[0x82, 0xC3, 0x28]);
        assert!(matches!(
            String::decode(encoded),
            Err(Error::InvalidData("String", _))
        ));
    }

    #[test]
    fn test_array() {
        let values = [1u8, 2, 3];
        let encoded = values.encode();
        assert_eq!(encoded, &[0x83, 1, 2, 3][..]);
        assert_eq!(<[u8; 3]>::decode(encoded).unwrap(), values);

        let encoded = [0x05u8; 1].encode();
        assert_eq!(encoded, &[0x05][..]);
        assert_eq!(<[u8; 1]>::decode(encoded).unwrap(), [0x05]);

        assert_eq!(
            <[u8; 4]>::decode(Bytes::from_static(&[0x83, 1, 2, 3])),
            Err(Error::InvalidLength(3))
        );
    }

    #[test_case("01"; "self encoded byte")]
    #[test_case("82ffff"; "string")]
    #[test_case("c20102"; "list")]
    #[test_case("80"; "empty string")]
    fn test_raw_round_trip(hex: &str) {
        let encoded = Bytes::from(from_hex(hex).unwrap());
        let raw = Raw::new(encoded.clone()).unwrap();
        assert_eq!(raw.as_bytes(), &encoded);
        assert_eq!(raw.encode(), encoded.as_ref());
        assert_eq!(Raw::decode(encoded).unwrap(), raw);
    }

    #[test]
    fn test_raw_rejects_invalid() {
        assert_eq!(Raw::new(vec![0x01, 0x02]), Err(Error::ExtraData(1)));
        assert_eq!(Raw::new(vec![0x83, 0x01]), Err(Error::LengthExceeded(3, 1)));
        assert!(matches!(
            Raw::new(vec![0x81, 0x01]),
            Err(Error::NonCanonicalHeader(_))
        ));
    }

    #[test]
    fn test_raw_stops_at_item() {
        let mut buf = Bytes::from_static(&[0xC2, 0x01, 0x02, 0x03]);
        let raw = Raw::read_cfg(&mut buf, &()).unwrap();
        assert_eq!(raw.as_bytes().as_ref(), &[0xC2, 0x01, 0x02]);
        assert_eq!(buf.as_ref(), &[0x03]);
    }
}
