//! Dynamically shaped values.
//!
//! [Value] describes data whose shape is only known at runtime: a tree of scalars, byte
//! strings, lists and records. It encodes exactly like the equivalent typed data (a
//! `Value::Uint(Width::W32, 5)` is written like `5u32`, a record like a struct declared with
//! [record!](crate::record)). Since the wire carries no type information, decoding a [Value]
//! needs a [Schema](crate::Schema) describing the expected shape.

use crate::{
    header::{self, Header, Kind},
    numeric::{int_to_bytes, uint_to_bytes},
    record::Tag,
    schema::{FieldSchema, Schema},
    EncodeSize, Error, Sign, Write,
};
use bytes::{BufMut, Bytes};
use num_bigint::{BigInt, BigUint};

/// Bit width of a fixed-size integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Width {
    W8,
    W16,
    W32,
    W64,
}

impl Width {
    /// Size of the integer in bytes.
    pub const fn bytes(self) -> usize {
        match self {
            Width::W8 => 1,
            Width::W16 => 2,
            Width::W32 => 4,
            Width::W64 => 8,
        }
    }

    const fn bits(self) -> u32 {
        self.bytes() as u32 * 8
    }

    /// Returns true if `value` is representable as an unsigned integer of this width.
    pub const fn fits_unsigned(self, value: u64) -> bool {
        matches!(self, Width::W64) || value >> self.bits() == 0
    }

    /// Returns true if `value` is representable as a signed integer of this width.
    pub const fn fits_signed(self, value: i64) -> bool {
        if matches!(self, Width::W64) {
            return true;
        }
        let half = 1i64 << (self.bits() - 1);
        value >= -half && value < half
    }
}

/// A field of a [Value::Record].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub tag: Tag,
    pub value: Value,
}

impl Field {
    pub fn new(name: impl Into<String>, tag: Tag, value: Value) -> Self {
        Self {
            name: name.into(),
            tag,
            value,
        }
    }

    pub fn required(name: impl Into<String>, value: Value) -> Self {
        Self::new(name, Tag::Required, value)
    }

    /// A field that may hold [Value::Nil].
    pub fn optional(name: impl Into<String>, value: Value) -> Self {
        Self::new(name, Tag::Optional, value)
    }

    /// A field whose items are written inline at the end of the record.
    pub fn tail(name: impl Into<String>, items: Vec<Value>) -> Self {
        Self::new(name, Tag::Tail, Value::List(items))
    }

    /// A field that is not encoded.
    pub fn skip(name: impl Into<String>, value: Value) -> Self {
        Self::new(name, Tag::Skip, value)
    }

    fn encode_size(&self) -> usize {
        match (&self.tag, &self.value) {
            (Tag::Skip, _) => 0,
            (Tag::Tail, Value::List(items)) => items.iter().map(EncodeSize::encode_size).sum(),
            (Tag::Tail, Value::Nil(_)) => 0,
            (_, value) => value.encode_size(),
        }
    }

    fn write(&self, buf: &mut impl BufMut) {
        match (&self.tag, &self.value) {
            (Tag::Skip, _) => {}
            (Tag::Tail, Value::List(items)) => {
                for item in items {
                    item.write(buf);
                }
            }
            (Tag::Tail, Value::Nil(_)) => {}
            (_, value) => value.write(buf),
        }
    }
}

/// A value whose shape is known at runtime.
///
/// The variants are public so values can be matched on, but building integers through
/// [Value::uint] and [Value::int] keeps them within their width. A value assembled by hand can
/// be checked with [Value::validate] before it is encoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    /// Unsigned integer of a given width. See [Value::uint].
    Uint(Width, u64),
    /// Signed integer of a given width. Only the magnitude is written. See [Value::int].
    Int(Width, i64),
    /// Non-negative integer of any size.
    Big(BigUint),
    /// Byte string (text included).
    Bytes(Bytes),
    /// Ordered sequence of values of any shape.
    List(Vec<Value>),
    /// Ordered named fields, written as a list.
    Record(Vec<Field>),
    /// An absent value, written as the empty item of its kind.
    Nil(Kind),
}

impl Value {
    /// Builds an unsigned integer, checking that it fits `width`.
    pub fn uint(width: Width, value: u64) -> Result<Self, Error> {
        if !width.fits_unsigned(value) {
            return Err(Error::Overflow(uint_to_bytes(value).len(), width.bytes()));
        }
        Ok(Value::Uint(width, value))
    }

    /// Builds a signed integer, checking that it fits `width`.
    pub fn int(width: Width, value: i64) -> Result<Self, Error> {
        if !width.fits_signed(value) {
            let (_, magnitude) = int_to_bytes(value);
            return Err(Error::Overflow(magnitude.len(), width.bytes()));
        }
        Ok(Value::Int(width, value))
    }

    /// Builds a big integer. Negative values have no encoding.
    pub fn big(value: &BigInt) -> Result<Self, Error> {
        value
            .to_biguint()
            .map(Value::Big)
            .ok_or(Error::NegativeBigInt)
    }

    /// Returns the kind of item this value encodes to.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Uint(..) | Value::Int(..) | Value::Big(_) | Value::Bytes(_) => Kind::String,
            Value::List(_) | Value::Record(_) => Kind::List,
            Value::Nil(kind) => *kind,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil(_))
    }

    /// Checks that this value decodes back from its own encoding.
    ///
    /// Integers must fit their width, and a tail field must be the last field of its record
    /// and hold a [Value::List] or [Value::Nil].
    pub fn validate(&self) -> Result<(), Error> {
        match self {
            Value::Uint(width, value) => Value::uint(*width, *value).map(drop),
            Value::Int(width, value) => Value::int(*width, *value).map(drop),
            Value::Big(_) | Value::Bytes(_) | Value::Nil(_) => Ok(()),
            Value::List(items) => items.iter().try_for_each(Value::validate),
            Value::Record(fields) => {
                for (i, field) in fields.iter().enumerate() {
                    if field.tag == Tag::Tail {
                        if i + 1 != fields.len() {
                            return Err(Error::InvalidSchema("tail field must be the last field"));
                        }
                        if !matches!(field.value, Value::List(_) | Value::Nil(_)) {
                            return Err(Error::InvalidSchema("tail field must be a list"));
                        }
                    }
                    field.value.validate()?;
                }
                Ok(())
            }
        }
    }

    /// Derives a schema that decodes the encoding of this value.
    ///
    /// Lists are described position by position, so the schema also fixes their length. The
    /// result reproduces the value exactly unless the value holds data that does not survive
    /// a round trip: skipped fields (they decode to [Value::Nil]), optional fields holding an
    /// empty item (zero, empty bytes or an empty list also decode to [Value::Nil]) and tails
    /// mixing differently shaped items (read with [Schema::Any]).
    pub fn schema(&self) -> Schema {
        match self {
            Value::Uint(width, _) => Schema::Uint(*width),
            Value::Int(width, value) => Schema::Int(*width, Sign::of(*value)),
            Value::Big(_) => Schema::Big,
            Value::Bytes(_) | Value::Nil(Kind::String) => Schema::Bytes,
            Value::Nil(Kind::List) => Schema::Any,
            Value::List(items) => Schema::Tuple(items.iter().map(Value::schema).collect()),
            Value::Record(fields) => Schema::Record(
                fields
                    .iter()
                    .map(|field| {
                        let schema = match (&field.tag, &field.value) {
                            (Tag::Tail, Value::List(items)) => Schema::List(Box::new(
                                common_schema(items).unwrap_or(Schema::Any),
                            )),
                            (Tag::Tail, _) => Schema::List(Box::new(Schema::Any)),
                            (_, value) => value.schema(),
                        };
                        FieldSchema::new(field.name.clone(), field.tag, schema)
                    })
                    .collect(),
            ),
        }
    }
}

/// Returns the schema shared by every item, if there is one.
fn common_schema(items: &[Value]) -> Option<Schema> {
    let (first, rest) = items.split_first()?;
    let schema = first.schema();
    rest.iter()
        .all(|item| item.schema() == schema)
        .then_some(schema)
}

fn list_payload(items: &[Value]) -> usize {
    items.iter().map(EncodeSize::encode_size).sum()
}

fn record_payload(fields: &[Field]) -> usize {
    fields.iter().map(Field::encode_size).sum()
}

impl Write for Value {
    fn write(&self, buf: &mut impl BufMut) {
        match self {
            Value::Uint(_, value) => header::write_string(uint_to_bytes(*value).as_ref(), buf),
            Value::Int(_, value) => {
                let (_, magnitude) = int_to_bytes(*value);
                header::write_string(magnitude.as_ref(), buf);
            }
            Value::Big(value) => value.write(buf),
            Value::Bytes(bytes) => header::write_string(bytes, buf),
            Value::List(items) => {
                Header::list(list_payload(items)).write(buf);
                for item in items {
                    item.write(buf);
                }
            }
            Value::Record(fields) => {
                Header::list(record_payload(fields)).write(buf);
                for field in fields {
                    field.write(buf);
                }
            }
            Value::Nil(kind) => buf.put_u8(kind.empty_code()),
        }
    }
}

impl EncodeSize for Value {
    fn encode_size(&self) -> usize {
        match self {
            Value::Uint(_, value) => header::string_size(uint_to_bytes(*value).as_ref()),
            Value::Int(_, value) => {
                let (_, magnitude) = int_to_bytes(*value);
                header::string_size(magnitude.as_ref())
            }
            Value::Big(value) => value.encode_size(),
            Value::Bytes(bytes) => header::string_size(bytes),
            Value::List(items) => {
                let payload = list_payload(items);
                Header::list(payload).encode_size() + payload
            }
            Value::Record(fields) => {
                let payload = record_payload(fields);
                Header::list(payload).encode_size() + payload
            }
            Value::Nil(_) => 1,
        }
    }
}

macro_rules! impl_from_int {
    ($variant:ident, $type:ty, $width:ident) => {
        impl From<$type> for Value {
            fn from(value: $type) -> Self {
                Value::$variant(Width::$width, value.into())
            }
        }
    };
}
impl_from_int!(Uint, u8, W8);
impl_from_int!(Uint, u16, W16);
impl_from_int!(Uint, u32, W32);
impl_from_int!(Uint, u64, W64);
impl_from_int!(Int, i8, W8);
impl_from_int!(Int, i16, W16);
impl_from_int!(Int, i32, W32);
impl_from_int!(Int, i64, W64);

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Uint(Width::W8, u64::from(value))
    }
}

impl From<BigUint> for Value {
    fn from(value: BigUint) -> Self {
        Value::Big(value)
    }
}

impl From<Bytes> for Value {
    fn from(value: Bytes) -> Self {
        Value::Bytes(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Bytes(Bytes::copy_from_slice(value.as_bytes()))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Bytes(Bytes::from(value))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}
