//! Minimal big-endian magnitudes for fixed-width integers.
//!
//! An integer is written as the big-endian bytes of its absolute value with every leading zero
//! byte removed, so zero becomes the empty byte string. The sign is never part of the bytes: it
//! is returned next to the magnitude on the way out and supplied by the caller on the way in.
//!
//! `u128`/`i128` and `usize`/`isize` are omitted; the widest supported integer is 64 bits and
//! the wire format does not depend on the target architecture.

use crate::{header, Error};
use bytes::Buf;

const MAX_BYTES: usize = 8;

/// A big-endian integer with redundant leading bytes removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MinBytes {
    buf: [u8; MAX_BYTES],
    start: usize,
}

impl MinBytes {
    fn new(buf: [u8; MAX_BYTES], start: usize) -> Self {
        Self { buf, start }
    }

    pub fn len(&self) -> usize {
        MAX_BYTES - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == MAX_BYTES
    }
}

impl AsRef<[u8]> for MinBytes {
    fn as_ref(&self) -> &[u8] {
        &self.buf[self.start..]
    }
}

/// A trait for unsigned integers that can be written as minimal magnitudes.
pub trait UInt: Copy + Into<u64> + TryFrom<u64> {
    /// Width of the integer in bytes.
    const BYTES: usize;
}

/// A trait for signed integers that can be written as a magnitude and a sign.
pub trait SInt: Copy + Into<i64> + TryFrom<i128> {
    /// Width of the integer in bytes.
    const BYTES: usize;
}

macro_rules! impl_int {
    ($trait:ident, $type:ty) => {
        impl $trait for $type {
            const BYTES: usize = std::mem::size_of::<$type>();
        }
    };
}
impl_int!(UInt, u8);
impl_int!(UInt, u16);
impl_int!(UInt, u32);
impl_int!(UInt, u64);
impl_int!(SInt, i8);
impl_int!(SInt, i16);
impl_int!(SInt, i32);
impl_int!(SInt, i64);

/// Returns the minimal big-endian magnitude of `value`. Zero maps to an empty sequence.
pub fn uint_to_bytes(value: u64) -> MinBytes {
    let start = (value.leading_zeros() / 8) as usize;
    MinBytes::new(value.to_be_bytes(), start)
}

/// Interprets `bytes` as a big-endian unsigned integer. Empty input yields zero.
///
/// Leading zero bytes are tolerated here; canonical decoding rejects them before calling this.
pub fn bytes_to_uint<T: UInt>(bytes: &[u8]) -> Result<T, Error> {
    if bytes.len() > T::BYTES {
        return Err(Error::Overflow(bytes.len(), T::BYTES));
    }
    let value = bytes
        .iter()
        .fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte));
    T::try_from(value).map_err(|_| Error::Overflow(bytes.len(), T::BYTES))
}

/// Splits `value` into its sign and the minimal magnitude of its absolute value.
pub fn int_to_bytes(value: i64) -> (bool, MinBytes) {
    (value < 0, uint_to_bytes(value.unsigned_abs()))
}

/// Rebuilds a signed integer from a big-endian magnitude and an externally supplied sign.
///
/// Fails if the magnitude is wider than `T` or doesn't fit once the sign is applied (the
/// magnitude `0x80` is `-128` as a negative `i8` but has no positive `i8`).
pub fn bytes_to_int<T: SInt>(bytes: &[u8], negative: bool) -> Result<T, Error> {
    if bytes.len() > T::BYTES {
        return Err(Error::Overflow(bytes.len(), T::BYTES));
    }
    let magnitude = i128::from(bytes_to_uint::<u64>(bytes)?);
    let value = if negative { -magnitude } else { magnitude };
    T::try_from(value).map_err(|_| Error::Overflow(bytes.len(), T::BYTES))
}

/// Returns the minimal two's-complement bytes of `value`.
///
/// Leading `0xFF` bytes of a negative value are dropped while the next byte still carries the
/// sign bit, so `-0x80` takes one byte and `-0x81` takes two. Zero maps to an empty sequence.
pub fn neg_int_to_min_bytes(value: i64) -> MinBytes {
    if value == 0 {
        return MinBytes::new([0; MAX_BYTES], MAX_BYTES);
    }
    let be = value.to_be_bytes();
    let fill = if value < 0 { 0xFF } else { 0x00 };
    let mut start = 0;
    while start < MAX_BYTES - 1
        && be[start] == fill
        && (be[start + 1] & 0x80) == (fill & 0x80)
    {
        start += 1;
    }
    MinBytes::new(be, start)
}

/// Reads a string header and its payload as an integer magnitude of at most `width` bytes.
///
/// Rejects magnitudes with a leading zero byte: zero is the empty string.
pub(crate) fn read_magnitude(buf: &mut impl Buf, width: usize) -> Result<MinBytes, Error> {
    let len = header::read_string(buf)?;
    if len > width.min(MAX_BYTES) {
        return Err(Error::Overflow(len, width));
    }
    let start = MAX_BYTES - len;
    let mut be = [0u8; MAX_BYTES];
    buf.copy_to_slice(&mut be[start..]);
    if len > 0 && be[start] == 0 {
        return Err(Error::LeadingZero);
    }
    Ok(MinBytes::new(be, start))
}
