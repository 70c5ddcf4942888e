//! Implementations of Codec for sequences and boxes.
//!
//! A [Vec] is a list: its header declares the total length of the encoded items, which are
//! decoded one by one from a reader bounded by that length.

use crate::{
    header::{Header, Kind},
    Bounded, EncodeSize, Error, Kinded, RangeCfg, Read, Write,
};
use bytes::{Buf, BufMut};
use tracing::trace;

fn payload_size<T: EncodeSize>(items: &[T]) -> usize {
    items.iter().map(EncodeSize::encode_size).sum()
}

// Vec implementation
impl<T> Kinded for Vec<T> {
    const KIND: Kind = Kind::List;
}

impl<T: Write + EncodeSize> Write for Vec<T> {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        Header::list(payload_size(self)).write(buf);
        for item in self {
            item.write(buf);
        }
    }
}

impl<T: EncodeSize> EncodeSize for Vec<T> {
    #[inline]
    fn encode_size(&self) -> usize {
        let payload = payload_size(self);
        Header::list(payload).encode_size() + payload
    }
}

impl<T: Read> Read for Vec<T> {
    type Cfg = (RangeCfg, T::Cfg);

    #[inline]
    fn read_cfg(buf: &mut impl Buf, (range, cfg): &Self::Cfg) -> Result<Self, Error> {
        let mut body = Bounded::list(buf)?;
        let mut items = Vec::new();
        while !body.is_exhausted() {
            items.push(T::read_cfg(&mut body, cfg)?);
        }
        if !range.contains(items.len()) {
            trace!(count = items.len(), "list length out of range");
            return Err(Error::InvalidLength(items.len()));
        }
        Ok(items)
    }
}

// Box implementation
impl<T: Kinded> Kinded for Box<T> {
    const KIND: Kind = T::KIND;
    const NULLABLE: bool = T::NULLABLE;
}

impl<T: Write> Write for Box<T> {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        self.as_ref().write(buf);
    }
}

impl<T: EncodeSize> EncodeSize for Box<T> {
    #[inline]
    fn encode_size(&self) -> usize {
        self.as_ref().encode_size()
    }
}

impl<T: Read> Read for Box<T> {
    type Cfg = T::Cfg;

    #[inline]
    fn read_cfg(buf: &mut impl Buf, cfg: &Self::Cfg) -> Result<Self, Error> {
        T::read_cfg(buf, cfg).map(Box::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{util::from_hex, Decode, DecodeExt, Encode, Sign};
    use bytes::Bytes;

    #[test]
    fn test_vec() {
        let vec_values = [vec![], vec![1u8], vec![1u8, 2u8, 3u8]];
        for value in vec_values {
            let encoded = value.encode();
            assert_eq!(encoded.len(), value.len() + 1);
            assert_eq!(value.encode_size(), encoded.len());

            // Valid decoding
            let len = value.len();
            let decoded = Vec::<u8>::decode_cfg(encoded, &(RangeCfg::exact(len), ())).unwrap();
            assert_eq!(value, decoded);

            // Failure for too long
            assert!(matches!(
                Vec::<u8>::decode_cfg(value.encode(), &((0..len).into(), ())),
                Err(Error::InvalidLength(_))
            ));

            // Failure for too short
            assert!(matches!(
                Vec::<u8>::decode_cfg(value.encode(), &((len + 1..).into(), ())),
                Err(Error::InvalidLength(_))
            ));
        }
    }

    #[test]
    fn test_vectors() {
        assert_eq!(Vec::<u32>::new().encode(), &[0xC0][..]);
        assert_eq!(vec![1u32, 2, 3].encode(), &[0xC3, 0x01, 0x02, 0x03][..]);

        let strings: Vec<String> = ["aaa", "bbb", "ccc", "ddd", "eee", "fff", "ggg", "hhh"]
            .into_iter()
            .chain(["iii", "jjj", "kkk", "lll", "mmm", "nnn", "ooo"])
            .map(String::from)
            .collect();
        let encoded = strings.encode();
        assert_eq!(&encoded[..2], &[0xF8, 0x3C]);
        assert_eq!(&encoded[2..6], &[0x83, b'a', b'a', b'a']);
        assert_eq!(Vec::<String>::decode(encoded).unwrap(), strings);

        let row: Vec<String> = ["asdf", "qwer", "zxcv"].map(String::from).to_vec();
        let grid = vec![row; 32];
        let encoded = grid.encode();
        let expected_row = from_hex("cf84617364668471776572847a786376").unwrap();
        assert_eq!(&encoded[..3], &[0xF9, 0x02, 0x00]);
        assert_eq!(&encoded[3..19], expected_row.as_slice());
        assert_eq!(encoded.len(), 3 + 32 * 16);
        assert_eq!(Vec::<Vec<String>>::decode(encoded).unwrap(), grid);
    }

    #[test]
    fn test_nested_empty_lists() {
        // [ [], [[]], [ [], [[]] ] ]
        let value: (Vec<u8>, Vec<Vec<u8>>, (Vec<u8>, Vec<Vec<u8>>)) =
            (vec![], vec![vec![]], (vec![], vec![vec![]]));
        let encoded = value.encode();
        assert_eq!(encoded, from_hex("c7c0c1c0c3c0c1c0").unwrap().as_slice());
        assert_eq!(
            <(Vec<u8>, Vec<Vec<u8>>, (Vec<u8>, Vec<Vec<u8>>))>::decode(encoded).unwrap(),
            value
        );
    }

    #[test]
    fn test_signed_elements() {
        let value = vec![-1i32, -256];
        let encoded = value.encode();
        assert_eq!(encoded, &[0xC4, 0x01, 0x82, 0x01, 0x00][..]);
        let decoded =
            Vec::<i32>::decode_cfg(encoded, &(RangeCfg::default(), Sign::Negative)).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn test_element_bounded_by_list() {
        // The inner list claims 3 bytes but the outer list only holds 1 more.
        let encoded = Bytes::from_static(&[0xC2, 0xC3, 0x01, 0x02, 0x03]);
        assert_eq!(
            Vec::<Vec<u8>>::decode(encoded),
            Err(Error::LengthExceeded(3, 1))
        );
    }

    #[test]
    fn test_list_expected() {
        let encoded = Bytes::from_static(&[0x83, 0x01, 0x02, 0x03]);
        assert_eq!(Vec::<u8>::decode(encoded), Err(Error::UnexpectedString));
    }

    #[test]
    fn test_box() {
        let value = Box::new(1024u32);
        let encoded = value.encode();
        assert_eq!(encoded, &[0x82, 0x04, 0x00][..]);
        assert_eq!(Box::<u32>::decode(encoded).unwrap(), value);
        assert_eq!(<Box<Vec<u8>> as Kinded>::KIND, Kind::List);
        assert!(<Box<Option<u8>> as Kinded>::NULLABLE);
    }
}
