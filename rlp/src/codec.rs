//! Core codec traits

use crate::{error::Error, header::Kind};
use bytes::{Buf, BufMut, BytesMut};

/// Trait for types whose encoding is always of the same [Kind].
///
/// The kind picks the empty sentinel written for an absent value: `0x80` for
/// [Kind::String] and `0xC0` for [Kind::List].
pub trait Kinded {
    /// The kind of every encoding of this type.
    const KIND: Kind;

    /// Whether the empty sentinel of [Kinded::KIND] decodes to an absent value.
    const NULLABLE: bool = false;
}

/// Trait for types that can be written (encoded) to a buffer.
pub trait Write {
    /// Encodes this value by writing to a buffer.
    ///
    /// Implementations should panic if the buffer doesn't have enough capacity.
    fn write(&self, buf: &mut impl BufMut);
}

/// Trait for types that know their encoded length in advance.
pub trait EncodeSize {
    /// Returns the encoded length of this value.
    ///
    /// This method MUST return the exact number of bytes that will be written by `write()`.
    fn encode_size(&self) -> usize;
}

/// Trait for types that can be read/decoded from a buffer.
///
/// The `Cfg` type allows for configuration during the read process. The wire format carries no
/// type information, so anything that can't be recovered from the bytes (like the sign of an
/// integer or the shape of a dynamic value) is supplied here.
pub trait Read: Sized {
    /// The configuration used while reading.
    type Cfg;

    /// Reads a value from the buffer using the provided configuration `cfg`, consuming the
    /// bytes of exactly one item.
    fn read_cfg(buf: &mut impl Buf, cfg: &Self::Cfg) -> Result<Self, Error>;
}

/// Trait for types that can be encoded to a buffer.
pub trait Encode: Write + EncodeSize {
    /// Encodes a value to a `BytesMut` buffer.
    ///
    /// Panics if the `write` implementation does not write the expected number of bytes.
    fn encode(&self) -> BytesMut {
        let len = self.encode_size();
        let mut buffer = BytesMut::with_capacity(len);
        self.write(&mut buffer);
        assert_eq!(buffer.len(), len, "write() did not write expected bytes");
        buffer
    }
}

// Automatically implement `Encode` for types that implement `Write` and `EncodeSize`.
impl<T: Write + EncodeSize> Encode for T {}

/// Trait for types that can be decoded from a buffer, ensuring the entire buffer is consumed.
pub trait Decode: Read {
    /// Decodes a value from a buffer, ensuring the buffer is fully consumed.
    fn decode_cfg(mut buf: impl Buf, cfg: &Self::Cfg) -> Result<Self, Error> {
        let result = Self::read_cfg(&mut buf, cfg)?;

        // Check that the buffer is fully consumed.
        let remaining = buf.remaining();
        if remaining > 0 {
            return Err(Error::ExtraData(remaining));
        }

        Ok(result)
    }
}

// Automatically implement `Decode` for types that implement `Read`.
impl<T: Read> Decode for T {}

/// Trait for types that can be encoded and decoded.
pub trait Codec: Encode + Decode {}

// Automatically implement `Codec` for types that implement `Encode` and `Decode`.
impl<T: Encode + Decode> Codec for T {}

/// Extension trait providing an ergonomic read method using the default configuration.
pub trait ReadExt: Read {
    /// Reads a value using the default config.
    fn read(buf: &mut impl Buf) -> Result<Self, Error>
    where
        Self::Cfg: Default,
    {
        Self::read_cfg(buf, &Default::default())
    }
}

// Automatically implement `ReadExt` for types that implement `Read`.
impl<T: Read> ReadExt for T {}

/// Extension trait providing an ergonomic decode method using the default configuration.
pub trait DecodeExt: Decode {
    /// Decodes a value using the default config.
    fn decode(buf: impl Buf) -> Result<Self, Error>
    where
        Self::Cfg: Default,
    {
        Self::decode_cfg(buf, &Default::default())
    }
}

// Automatically implement `DecodeExt` for types that implement `Decode`.
impl<T: Decode> DecodeExt for T {}
