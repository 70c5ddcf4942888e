//! Codec implementations for Rust primitive types.
//!
//! # Integers
//!
//! Every integer is a byte string holding its minimal big-endian magnitude, so `0` is `0x80`,
//! `1..=127` encode as themselves and `128` is `0x81 0x80`. A decoder rejects magnitudes with a
//! leading zero byte and magnitudes wider than the destination type.
//!
//! Signed integers drop their sign on the wire: `-1024i32` and `1024i32` both encode as
//! `0x82 0x04 0x00`. When decoding, the sign comes from the [Sign] config (positive by default).
//!
//! # Booleans
//!
//! `true` is `0x01` and `false` is the empty string `0x80`.
//!
//! # Options
//!
//! `None` is written as the empty item of the inner type's [Kind] (`0x80` or `0xC0`) and that
//! empty item always decodes back to `None`. An inner value whose own encoding is the empty
//! item (`Some(0)`, `Some(vec![])`) therefore decodes as `None`.

use crate::{
    header::{self, Kind},
    numeric::{bytes_to_int, bytes_to_uint, int_to_bytes, read_magnitude, uint_to_bytes, SInt, UInt},
    util::at_least,
    EncodeSize, Error, Kinded, Read, Sign, Write,
};
use bytes::{Buf, BufMut};

macro_rules! impl_unsigned {
    ($type:ty) => {
        impl Kinded for $type {
            const KIND: Kind = Kind::String;
        }

        impl Write for $type {
            #[inline]
            fn write(&self, buf: &mut impl BufMut) {
                header::write_string(uint_to_bytes(u64::from(*self)).as_ref(), buf);
            }
        }

        impl EncodeSize for $type {
            #[inline]
            fn encode_size(&self) -> usize {
                header::string_size(uint_to_bytes(u64::from(*self)).as_ref())
            }
        }

        impl Read for $type {
            type Cfg = ();

            #[inline]
            fn read_cfg(buf: &mut impl Buf, _: &()) -> Result<Self, Error> {
                let magnitude = read_magnitude(buf, <$type as UInt>::BYTES)?;
                bytes_to_uint(magnitude.as_ref())
            }
        }
    };
}

impl_unsigned!(u8);
impl_unsigned!(u16);
impl_unsigned!(u32);
impl_unsigned!(u64);

macro_rules! impl_signed {
    ($type:ty) => {
        impl Kinded for $type {
            const KIND: Kind = Kind::String;
        }

        impl Write for $type {
            #[inline]
            fn write(&self, buf: &mut impl BufMut) {
                let (_, magnitude) = int_to_bytes(i64::from(*self));
                header::write_string(magnitude.as_ref(), buf);
            }
        }

        impl EncodeSize for $type {
            #[inline]
            fn encode_size(&self) -> usize {
                let (_, magnitude) = int_to_bytes(i64::from(*self));
                header::string_size(magnitude.as_ref())
            }
        }

        impl Read for $type {
            type Cfg = Sign;

            #[inline]
            fn read_cfg(buf: &mut impl Buf, sign: &Sign) -> Result<Self, Error> {
                let magnitude = read_magnitude(buf, <$type as SInt>::BYTES)?;
                bytes_to_int(magnitude.as_ref(), sign.is_negative())
            }
        }
    };
}

impl_signed!(i8);
impl_signed!(i16);
impl_signed!(i32);
impl_signed!(i64);

// Bool implementation
impl Kinded for bool {
    const KIND: Kind = Kind::String;
}

impl Write for bool {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        buf.put_u8(if *self { 0x01 } else { header::EMPTY_STRING_CODE });
    }
}

impl EncodeSize for bool {
    #[inline]
    fn encode_size(&self) -> usize {
        1
    }
}

impl Read for bool {
    type Cfg = ();

    #[inline]
    fn read_cfg(buf: &mut impl Buf, _: &()) -> Result<Self, Error> {
        match header::read_string(buf)? {
            0 => Ok(false),
            1 if buf.get_u8() == 0x01 => Ok(true),
            _ => Err(Error::InvalidBool),
        }
    }
}

// Option implementation
impl<T: Kinded> Kinded for Option<T> {
    const KIND: Kind = T::KIND;
    const NULLABLE: bool = true;
}

impl<T: Kinded + Write> Write for Option<T> {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        match self {
            Some(inner) => inner.write(buf),
            None => buf.put_u8(T::KIND.empty_code()),
        }
    }
}

impl<T: Kinded + EncodeSize> EncodeSize for Option<T> {
    #[inline]
    fn encode_size(&self) -> usize {
        match self {
            Some(inner) => inner.encode_size(),
            None => 1,
        }
    }
}

impl<T: Kinded + Read> Read for Option<T> {
    type Cfg = T::Cfg;

    #[inline]
    fn read_cfg(buf: &mut impl Buf, cfg: &Self::Cfg) -> Result<Self, Error> {
        at_least(buf, 1)?;
        if buf.chunk()[0] == T::KIND.empty_code() {
            buf.advance(1);
            return Ok(None);
        }
        Ok(Some(T::read_cfg(buf, cfg)?))
    }
}
