//! Arbitrary-precision integers.
//!
//! Big integers share the encoding of fixed-width unsigned integers: the minimal big-endian
//! magnitude wrapped as a byte string. Only non-negative values have an encoding.

use crate::{
    header::{self, Header, Kind},
    EncodeSize, Error, Kinded, Read, Write,
};
use bytes::{Buf, BufMut};
use num_bigint::{BigInt, BigUint};

/// Writes a non-negative `value` to `buf`.
///
/// Returns [Error::NegativeBigInt] without writing anything if `value` is negative.
pub fn encode_bigint(value: &BigInt, buf: &mut impl BufMut) -> Result<(), Error> {
    let magnitude = value.to_biguint().ok_or(Error::NegativeBigInt)?;
    magnitude.write(buf);
    Ok(())
}

/// Reads a big integer from `buf`. The result is never negative.
pub fn decode_bigint(buf: &mut impl Buf) -> Result<BigInt, Error> {
    BigUint::read_cfg(buf, &()).map(BigInt::from)
}

fn magnitude_len(value: &BigUint) -> usize {
    value.bits().div_ceil(8) as usize
}

impl Kinded for BigUint {
    const KIND: Kind = Kind::String;
}

impl Write for BigUint {
    fn write(&self, buf: &mut impl BufMut) {
        if self.bits() == 0 {
            buf.put_u8(header::EMPTY_STRING_CODE);
            return;
        }
        header::write_string(&self.to_bytes_be(), buf);
    }
}

impl EncodeSize for BigUint {
    fn encode_size(&self) -> usize {
        let len = magnitude_len(self);
        if len == 1 && self.bits() < 8 {
            return 1;
        }
        Header::string(len).encode_size() + len
    }
}

impl Read for BigUint {
    type Cfg = ();

    fn read_cfg(buf: &mut impl Buf, _: &()) -> Result<Self, Error> {
        let len = header::read_string(buf)?;
        let magnitude = buf.copy_to_bytes(len);
        match magnitude.first() {
            None => Ok(BigUint::default()),
            Some(0) => Err(Error::LeadingZero),
            Some(_) => Ok(BigUint::from_bytes_be(&magnitude)),
        }
    }
}
