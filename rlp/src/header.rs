//! Length-prefix headers.
//!
//! Every item on the wire is either a byte string or a list. The first byte of an item tells
//! which one it is and how long its payload is:
//!
//! | prefix      | meaning                                                      |
//! |-------------|--------------------------------------------------------------|
//! | `0x00-0x7F` | a single byte string holding the prefix itself (no header)   |
//! | `0x80-0xB7` | string of `prefix - 0x80` bytes (0 to 55)                    |
//! | `0xB8-0xBF` | string whose length takes the next `prefix - 0xB7` bytes     |
//! | `0xC0-0xF7` | list whose payload is `prefix - 0xC0` bytes (0 to 55)        |
//! | `0xF8-0xFF` | list whose payload length takes the next `prefix - 0xF7` bytes |
//!
//! Decoding is strict: every header has exactly one accepted form.

use crate::{util::at_least, EncodeSize, Error, Write};
use bytes::{Buf, BufMut};

/// Prefix of the empty byte string (also the encoding of zero).
pub const EMPTY_STRING_CODE: u8 = 0x80;

/// Prefix of the empty list.
pub const EMPTY_LIST_CODE: u8 = 0xC0;

const LONG_STRING_OFFSET: u8 = 0xB7;
const LONG_LIST_OFFSET: u8 = 0xF7;

/// Largest payload that fits a single-byte header.
pub const MAX_SHORT_LENGTH: usize = 55;

const USIZE_BYTES: usize = std::mem::size_of::<usize>();

/// The two shapes an item can take on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    String,
    List,
}

impl Kind {
    /// Returns the single byte encoding an empty item of this kind.
    pub const fn empty_code(self) -> u8 {
        match self {
            Kind::String => EMPTY_STRING_CODE,
            Kind::List => EMPTY_LIST_CODE,
        }
    }
}

/// The length prefix of an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Header {
    /// Whether the payload is a byte string or the concatenated items of a list.
    pub kind: Kind,
    /// Exact byte length of the payload following the header.
    pub payload_length: usize,
}

impl Header {
    /// Header of a byte string with `len` bytes.
    pub const fn string(len: usize) -> Self {
        Self {
            kind: Kind::String,
            payload_length: len,
        }
    }

    /// Header of a list whose items take `len` bytes.
    pub const fn list(len: usize) -> Self {
        Self {
            kind: Kind::List,
            payload_length: len,
        }
    }

    pub const fn is_list(&self) -> bool {
        matches!(self.kind, Kind::List)
    }

    /// Reads a header, advancing past it.
    ///
    /// A single byte below `0x80` is its own header: it is reported as a one-byte string and
    /// the buffer is left untouched.
    pub fn decode(buf: &mut impl Buf) -> Result<Self, Error> {
        Self::decode_counted(buf).map(|(header, _)| header)
    }

    /// Like [Header::decode], also returning how many header bytes were consumed.
    pub fn decode_counted(buf: &mut impl Buf) -> Result<(Self, usize), Error> {
        at_least(buf, 1)?;
        let prefix = buf.chunk()[0];
        let (header, consumed) = match prefix {
            0x00..=0x7F => (Self::string(1), 0),
            0x80..=0xB7 => {
                buf.advance(1);
                (Self::string((prefix - EMPTY_STRING_CODE) as usize), 1)
            }
            0xB8..=0xBF => {
                buf.advance(1);
                let len_of_len = (prefix - LONG_STRING_OFFSET) as usize;
                (Self::string(read_length(buf, len_of_len)?), 1 + len_of_len)
            }
            0xC0..=0xF7 => {
                buf.advance(1);
                (Self::list((prefix - EMPTY_LIST_CODE) as usize), 1)
            }
            0xF8..=0xFF => {
                buf.advance(1);
                let len_of_len = (prefix - LONG_LIST_OFFSET) as usize;
                (Self::list(read_length(buf, len_of_len)?), 1 + len_of_len)
            }
        };

        let remaining = buf.remaining();
        if remaining < header.payload_length {
            return Err(Error::LengthExceeded(header.payload_length, remaining));
        }

        // A lone byte below 0x80 must be self-encoded.
        if consumed == 1 && header == Self::string(1) && buf.chunk()[0] < EMPTY_STRING_CODE {
            return Err(Error::NonCanonicalHeader("single byte below 0x80 has a prefix"));
        }
        Ok((header, consumed))
    }
}

impl Write for Header {
    fn write(&self, buf: &mut impl BufMut) {
        let (short, long) = match self.kind {
            Kind::String => (EMPTY_STRING_CODE, LONG_STRING_OFFSET),
            Kind::List => (EMPTY_LIST_CODE, LONG_LIST_OFFSET),
        };
        if self.payload_length <= MAX_SHORT_LENGTH {
            buf.put_u8(short + self.payload_length as u8);
            return;
        }
        let be = self.payload_length.to_be_bytes();
        let len_of_len = length_of_length(self.payload_length);
        buf.put_u8(long + len_of_len as u8);
        buf.put_slice(&be[USIZE_BYTES - len_of_len..]);
    }
}

impl EncodeSize for Header {
    fn encode_size(&self) -> usize {
        if self.payload_length <= MAX_SHORT_LENGTH {
            1
        } else {
            1 + length_of_length(self.payload_length)
        }
    }
}

/// Number of bytes in the minimal big-endian form of `len`.
pub const fn length_of_length(len: usize) -> usize {
    USIZE_BYTES - (len.leading_zeros() / 8) as usize
}

/// Reads the long-form length that follows a `0xB8..` or `0xF8..` prefix.
fn read_length(buf: &mut impl Buf, len_of_len: usize) -> Result<usize, Error> {
    if len_of_len > USIZE_BYTES {
        return Err(Error::Overflow(len_of_len, USIZE_BYTES));
    }
    at_least(buf, len_of_len)?;
    let mut be = [0u8; USIZE_BYTES];
    buf.copy_to_slice(&mut be[USIZE_BYTES - len_of_len..]);
    if be[USIZE_BYTES - len_of_len] == 0 {
        return Err(Error::NonCanonicalHeader("leading zero in length"));
    }
    let len = usize::from_be_bytes(be);
    if len <= MAX_SHORT_LENGTH {
        return Err(Error::NonCanonicalHeader("long form for short payload"));
    }
    Ok(len)
}

/// Writes `payload` as a byte string.
pub fn write_string(payload: &[u8], buf: &mut impl BufMut) {
    if let [byte] = payload {
        if *byte < EMPTY_STRING_CODE {
            buf.put_u8(*byte);
            return;
        }
    }
    Header::string(payload.len()).write(buf);
    buf.put_slice(payload);
}

/// Returns the number of bytes [write_string] produces for `payload`.
pub fn string_size(payload: &[u8]) -> usize {
    match payload {
        [byte] if *byte < EMPTY_STRING_CODE => 1,
        _ => Header::string(payload.len()).encode_size() + payload.len(),
    }
}

/// Reads a string header, returning the payload length.
pub fn read_string(buf: &mut impl Buf) -> Result<usize, Error> {
    let header = Header::decode(buf)?;
    match header.kind {
        Kind::String => Ok(header.payload_length),
        Kind::List => Err(Error::UnexpectedList),
    }
}

/// Reads a list header, returning the length of its items.
pub fn read_list(buf: &mut impl Buf) -> Result<usize, Error> {
    let header = Header::decode(buf)?;
    match header.kind {
        Kind::List => Ok(header.payload_length),
        Kind::String => Err(Error::UnexpectedString),
    }
}
