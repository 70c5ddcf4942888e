//! Runtime descriptions of the shape of a [Value].
//!
//! Decoding a [Value] is driven by a [Schema], supplied as the decode config. The schema
//! says how to interpret each item: which integer width and sign to apply to a string, which
//! fields a list holds, and which of them are optional, collect the tail or are skipped.
//!
//! [Schema::Any] needs no knowledge of the data and reads any canonical encoding as a tree
//! of [Value::Bytes] and [Value::List].

use crate::{
    header::{Header, Kind},
    numeric::{bytes_to_int, bytes_to_uint, read_magnitude},
    record::{finish, read_element, Tag},
    value::{Field, Value, Width},
    Bounded, Error, RangeCfg, Read, Sign,
};
use bytes::{Buf, Bytes};
use num_bigint::BigUint;
use tracing::debug;

/// The expected shape of a [Value].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Schema {
    /// Unsigned integer of the given width.
    Uint(Width),
    /// Signed integer of the given width, read with the given sign.
    Int(Width, Sign),
    /// Non-negative integer of any size.
    Big,
    /// Byte string.
    Bytes,
    /// List of any number of items sharing one shape.
    List(Box<Schema>),
    /// List with exactly one item per schema, in order.
    Tuple(Vec<Schema>),
    /// List of named fields.
    Record(Vec<FieldSchema>),
    /// Anything: strings read as [Value::Bytes], lists as [Value::List].
    #[default]
    Any,
}

/// Describes one field of a [Schema::Record].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSchema {
    pub name: String,
    pub tag: Tag,
    pub schema: Schema,
}

impl FieldSchema {
    pub fn new(name: impl Into<String>, tag: Tag, schema: Schema) -> Self {
        Self {
            name: name.into(),
            tag,
            schema,
        }
    }
}

impl Schema {
    /// Schema of a list of items with the shape `item`.
    pub fn list(item: Schema) -> Self {
        Schema::List(Box::new(item))
    }

    /// Schema of a record, checking that at most one field collects the tail, that it is
    /// the last field and that it is a list.
    pub fn record(fields: Vec<FieldSchema>) -> Result<Self, Error> {
        validate_fields(&fields)?;
        Ok(Schema::Record(fields))
    }

    /// Returns the kind of item this schema reads. [Schema::Any] is treated as a list, so an
    /// absent value described by it is written as `0xC0`.
    pub fn kind(&self) -> Kind {
        match self {
            Schema::Uint(_) | Schema::Int(..) | Schema::Big | Schema::Bytes => Kind::String,
            Schema::List(_) | Schema::Tuple(_) | Schema::Record(_) | Schema::Any => Kind::List,
        }
    }
}

fn validate_fields(fields: &[FieldSchema]) -> Result<(), Error> {
    for (i, field) in fields.iter().enumerate() {
        if field.tag != Tag::Tail {
            continue;
        }
        if i + 1 != fields.len() {
            debug!(field = %field.name, "tail field is not last");
            return Err(Error::InvalidSchema("tail field must be the last field"));
        }
        if !matches!(field.schema, Schema::List(_)) {
            debug!(field = %field.name, "tail field is not a list");
            return Err(Error::InvalidSchema("tail field must be a list"));
        }
    }
    Ok(())
}

impl Read for Value {
    type Cfg = Schema;

    fn read_cfg(buf: &mut impl Buf, schema: &Schema) -> Result<Self, Error> {
        match schema {
            Schema::Uint(width) => {
                let magnitude = read_magnitude(buf, width.bytes())?;
                Ok(Value::Uint(*width, bytes_to_uint(magnitude.as_ref())?))
            }
            Schema::Int(width, sign) => {
                let magnitude = read_magnitude(buf, width.bytes())?;
                let value: i64 = bytes_to_int(magnitude.as_ref(), sign.is_negative())?;
                if !width.fits_signed(value) {
                    return Err(Error::Overflow(magnitude.len(), width.bytes()));
                }
                Ok(Value::Int(*width, value))
            }
            Schema::Big => BigUint::read_cfg(buf, &()).map(Value::Big),
            Schema::Bytes => Bytes::read_cfg(buf, &RangeCfg::default()).map(Value::Bytes),
            Schema::List(item) => {
                let mut body = Bounded::list(buf)?;
                let mut items = Vec::new();
                while !body.is_exhausted() {
                    items.push(Value::read_cfg(&mut body, item)?);
                }
                Ok(Value::List(items))
            }
            Schema::Tuple(schemas) => {
                let mut body = Bounded::list(buf)?;
                let items = schemas
                    .iter()
                    .map(|schema| read_element::<Value>(&mut body, schema, "tuple"))
                    .collect::<Result<Vec<_>, _>>()?;
                finish(&body, "tuple")?;
                Ok(Value::List(items))
            }
            Schema::Record(fields) => read_record(buf, fields),
            Schema::Any => read_any(buf),
        }
    }
}

fn read_record(buf: &mut impl Buf, fields: &[FieldSchema]) -> Result<Value, Error> {
    validate_fields(fields)?;
    let mut body = Bounded::list(buf)?;
    let mut values = Vec::with_capacity(fields.len());
    for field in fields {
        let kind = field.schema.kind();
        let value = match field.tag {
            Tag::Skip => Value::Nil(kind),
            Tag::Optional => {
                if body.is_exhausted() {
                    Value::Nil(kind)
                } else if body.chunk()[0] == kind.empty_code() {
                    body.advance(1);
                    Value::Nil(kind)
                } else {
                    Value::read_cfg(&mut body, &field.schema)?
                }
            }
            Tag::Tail => {
                let Schema::List(item) = &field.schema else {
                    return Err(Error::InvalidSchema("tail field must be a list"));
                };
                let mut items = Vec::new();
                while !body.is_exhausted() {
                    items.push(Value::read_cfg(&mut body, item)?);
                }
                Value::List(items)
            }
            Tag::Required => read_element::<Value>(&mut body, &field.schema, &field.name)?,
        };
        values.push(Field::new(field.name.clone(), field.tag, value));
    }
    finish(&body, "record")?;
    Ok(Value::Record(values))
}

fn read_any(buf: &mut impl Buf) -> Result<Value, Error> {
    let header = Header::decode(buf)?;
    match header.kind {
        Kind::String => Ok(Value::Bytes(buf.copy_to_bytes(header.payload_length))),
        Kind::List => {
            let mut body = Bounded::nested(buf, header.payload_length)?;
            let mut items = Vec::new();
            while !body.is_exhausted() {
                items.push(read_any(&mut body)?);
            }
            Ok(Value::List(items))
        }
    }
}
