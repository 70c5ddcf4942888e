//! Codec implementation for tuples.
//!
//! A tuple is a list with one element per position. Unlike a [Vec] its elements may have
//! different types, and the decoder expects exactly as many elements as the tuple has.

use crate::{
    header::{Header, Kind},
    record::{finish, read_element},
    Bounded, EncodeSize, Error, Kinded, Read, Write,
};
use bytes::{Buf, BufMut};
use paste::paste;

macro_rules! impl_codec_for_tuple {
    ($($index:literal),*) => {
        paste! {
            impl<$( [<T $index>] ),*> Kinded for ( $( [<T $index>], )* ) {
                const KIND: Kind = Kind::List;
            }

            impl<$( [<T $index>]: EncodeSize ),*> EncodeSize for ( $( [<T $index>], )* ) {
                #[inline]
                fn encode_size(&self) -> usize {
                    let payload = 0 $( + self.$index.encode_size() )*;
                    Header::list(payload).encode_size() + payload
                }
            }

            impl<$( [<T $index>]: Write + EncodeSize ),*> Write for ( $( [<T $index>], )* ) {
                #[inline]
                fn write(&self, buf: &mut impl BufMut) {
                    let payload = 0 $( + self.$index.encode_size() )*;
                    Header::list(payload).write(buf);
                    $( self.$index.write(buf); )*
                }
            }

            impl<$( [<T $index>]: Read ),*> Read for ( $( [<T $index>], )* ) {
                type Cfg = ( $( [<T $index>]::Cfg, )* );

                #[inline]
                fn read_cfg(buf: &mut impl Buf, cfg: &Self::Cfg) -> Result<Self, Error> {
                    let mut body = Bounded::list(buf)?;
                    let value = ( $(
                        read_element::<[<T $index>]>(&mut body, &cfg.$index, stringify!($index))?,
                    )* );
                    finish(&body, "tuple")?;
                    Ok(value)
                }
            }
        }
    };
}

// Generate implementations for tuple sizes 1 through 12
impl_codec_for_tuple!(0);
impl_codec_for_tuple!(0, 1);
impl_codec_for_tuple!(0, 1, 2);
impl_codec_for_tuple!(0, 1, 2, 3);
impl_codec_for_tuple!(0, 1, 2, 3, 4);
impl_codec_for_tuple!(0, 1, 2, 3, 4, 5);
impl_codec_for_tuple!(0, 1, 2, 3, 4, 5, 6);
impl_codec_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7);
impl_codec_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7, 8);
impl_codec_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7, 8, 9);
impl_codec_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10);
impl_codec_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11);
