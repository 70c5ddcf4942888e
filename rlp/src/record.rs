//! Structs encoded as lists of their fields.
//!
//! A record is written as a list holding each field in declaration order. The [record!] macro
//! declares the struct together with a descriptor of its fields ([Record::FIELDS]) and the
//! codec implementations. Each field is read in turn from a [Bounded] reader scoped to the
//! list, so a field can never consume bytes past the end of its record.
//!
//! Fields come in four flavors ([Tag]):
//!
//! - required: any field without an attribute whose type is not an [Option].
//! - optional: an `Option<T>` field. `None` is written as the empty item of `T`'s [Kind] and
//!   the empty item reads back as `None`, as does a missing element.
//! - `#[tail]`: a `Vec<T>` whose items are written inline, directly in the record list, and
//!   which absorbs every element left when it is reached. Must be the last field.
//! - `#[skip]`: neither written nor read; decodes to `Default::default()`.
//!
//! A required or optional field is decoded with the default config of its type unless it is
//! given one with `#[config(expr)]`. A tail field takes its item config as `#[tail(expr)]`.

use crate::{header::Kind, Bounded, EncodeSize, Error, Kinded, Read, Write};
use bytes::BufMut;
use tracing::debug;

/// How a field takes part in the list of its record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Must be present.
    #[default]
    Required,
    /// The empty sentinel of the field's kind stands for an absent value.
    Optional,
    /// Absorbs all remaining elements. Only allowed on the last field.
    Tail,
    /// Not part of the encoding.
    Skip,
}

/// Describes one field of a [Record].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: Kind,
    pub tag: Tag,
}

/// A struct encoded as the list of its fields.
///
/// Implemented by [record!].
pub trait Record {
    /// Fields in declaration (and wire) order.
    const FIELDS: &'static [FieldSpec];
}

/// Returns true if `fields` describes an encodable record: a tail field must be the last one
/// and must be a list.
pub const fn validate(fields: &[FieldSpec]) -> bool {
    let mut i = 0;
    while i < fields.len() {
        if matches!(fields[i].tag, Tag::Tail)
            && (i + 1 != fields.len() || !matches!(fields[i].kind, Kind::List))
        {
            return false;
        }
        i += 1;
    }
    true
}

/// Reads the next element of a list body.
///
/// Fails with [Error::TooFewElements] if the body holds no more elements.
pub fn read_element<T: Read>(
    body: &mut Bounded<'_>,
    cfg: &T::Cfg,
    field: &str,
) -> Result<T, Error> {
    if body.is_exhausted() {
        debug!(field, "list ended before field");
        return Err(Error::TooFewElements);
    }
    T::read_cfg(body, cfg)
}

/// Reads the next field of a record.
///
/// Like [read_element], except that a nullable field whose element is missing reads as if
/// the empty sentinel of its kind were present.
pub fn read_field<T: Read + Kinded>(
    body: &mut Bounded<'_>,
    cfg: &T::Cfg,
    field: &str,
) -> Result<T, Error> {
    if T::NULLABLE && body.is_exhausted() {
        let mut sentinel: &[u8] = &[T::KIND.empty_code()];
        return T::read_cfg(&mut sentinel, cfg);
    }
    read_element(body, cfg, field)
}

/// Reads every element left in a list body.
pub fn read_tail<T: Read>(body: &mut Bounded<'_>, cfg: &T::Cfg) -> Result<Vec<T>, Error> {
    let mut items = Vec::new();
    while !body.is_exhausted() {
        items.push(T::read_cfg(body, cfg)?);
    }
    Ok(items)
}

/// Checks that nothing is left in a list body once every field was read.
pub fn finish(body: &Bounded<'_>, record: &str) -> Result<(), Error> {
    if body.is_exhausted() {
        return Ok(());
    }
    let remaining = body.limit();
    debug!(record, remaining, "elements left after last field");
    Err(Error::TooManyElements(remaining))
}

/// Encoded size of tail items written inline.
pub fn tail_size<T: EncodeSize>(items: &[T]) -> usize {
    items.iter().map(EncodeSize::encode_size).sum()
}

/// Writes tail items inline, without a list header of their own.
pub fn write_tail<T: Write>(items: &[T], buf: &mut impl BufMut) {
    for item in items {
        item.write(buf);
    }
}

/// Declares a struct encoded as the list of its fields.
///
/// Every field type must implement [Kinded](crate::Kinded) and the codec traits. Fields are
/// decoded with the [Default] config of their type unless an attribute supplies one:
/// `#[config(expr)]` on a required or optional field, `#[tail(expr)]` on a tail field. The
/// generated [Read](crate::Read) uses `Cfg = ()`.
///
/// # Example
///
/// ```
/// use ledger_rlp::{record, DecodeExt, Encode, Raw, Sign};
///
/// record! {
///     #[derive(Debug, PartialEq)]
///     pub struct Message {
///         pub id: u64,
///         #[config(Sign::Negative)]
///         pub offset: i64,
///         pub parent: Option<Box<Message>>,
///         #[skip]
///         pub cached: u64,
///         #[tail]
///         pub rest: Vec<Raw>,
///     }
/// }
///
/// let message = Message { id: 5, offset: -2, parent: None, cached: 9, rest: Vec::new() };
/// let encoded = message.encode();
/// assert_eq!(encoded, &[0xC3, 0x05, 0x02, 0xC0][..]);
///
/// let decoded = Message::decode(encoded).unwrap();
/// assert_eq!(decoded.id, 5);
/// assert_eq!(decoded.offset, -2);
/// assert_eq!(decoded.cached, 0);
/// ```
#[macro_export]
macro_rules! record {
    (@tag $ty:ty) => {
        if <$ty as $crate::Kinded>::NULLABLE {
            $crate::record::Tag::Optional
        } else {
            $crate::record::Tag::Required
        }
    };
    (@tag $ty:ty, config) => {
        $crate::record!(@tag $ty)
    };
    (@tag $ty:ty, tail) => {
        $crate::record::Tag::Tail
    };
    (@tag $ty:ty, skip) => {
        $crate::record::Tag::Skip
    };

    (@size $value:expr) => {
        $crate::EncodeSize::encode_size(&$value)
    };
    (@size $value:expr, config) => {
        $crate::record!(@size $value)
    };
    (@size $value:expr, tail) => {
        $crate::record::tail_size(&$value)
    };
    (@size $value:expr, skip) => {
        0
    };

    (@write $value:expr, $buf:ident) => {
        $crate::Write::write(&$value, $buf)
    };
    (@write $value:expr, $buf:ident, config) => {
        $crate::record!(@write $value, $buf)
    };
    (@write $value:expr, $buf:ident, tail) => {
        $crate::record::write_tail(&$value, $buf)
    };
    (@write $value:expr, $buf:ident, skip) => {};

    (@read $body:ident, $ty:ty, $field:expr) => {
        $crate::record::read_field::<$ty>(&mut $body, &Default::default(), $field)?
    };
    (@read $body:ident, $ty:ty, $field:expr, config, $cfg:expr) => {
        $crate::record::read_field::<$ty>(&mut $body, &$cfg, $field)?
    };
    (@read $body:ident, $ty:ty, $field:expr, tail) => {
        $crate::record::read_tail(&mut $body, &Default::default())?
    };
    (@read $body:ident, $ty:ty, $field:expr, tail, $cfg:expr) => {
        $crate::record::read_tail(&mut $body, &$cfg)?
    };
    (@read $body:ident, $ty:ty, $field:expr, skip) => {
        Default::default()
    };

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $(#[$tag:ident $(($cfg:expr))?])? $fvis:vis $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $( $fvis $field: $ty, )*
        }

        impl $crate::Record for $name {
            const FIELDS: &'static [$crate::record::FieldSpec] = &[
                $(
                    $crate::record::FieldSpec {
                        name: stringify!($field),
                        kind: <$ty as $crate::Kinded>::KIND,
                        tag: $crate::record!(@tag $ty $(, $tag)?),
                    },
                )*
            ];
        }

        const _: () = assert!(
            $crate::record::validate(<$name as $crate::Record>::FIELDS),
            "a #[tail] field must be the last field and a list"
        );

        impl $crate::Kinded for $name {
            const KIND: $crate::Kind = $crate::Kind::List;
        }

        impl $crate::EncodeSize for $name {
            fn encode_size(&self) -> usize {
                let payload = 0 $( + $crate::record!(@size self.$field $(, $tag)?) )*;
                $crate::EncodeSize::encode_size(&$crate::Header::list(payload)) + payload
            }
        }

        impl $crate::Write for $name {
            fn write(&self, buf: &mut impl $crate::bytes::BufMut) {
                let payload = 0 $( + $crate::record!(@size self.$field $(, $tag)?) )*;
                $crate::Write::write(&$crate::Header::list(payload), buf);
                $( $crate::record!(@write self.$field, buf $(, $tag)?); )*
            }
        }

        impl $crate::Read for $name {
            type Cfg = ();

            fn read_cfg(
                buf: &mut impl $crate::bytes::Buf,
                _: &(),
            ) -> Result<Self, $crate::Error> {
                let mut body = $crate::Bounded::list(buf)?;
                $(
                    let $field: $ty =
                        $crate::record!(@read body, $ty, stringify!($field) $(, $tag $(, $cfg)?)?);
                )*
                $crate::record::finish(&body, stringify!($name))?;
                Ok(Self { $( $field, )* })
            }
        }
    };
}
