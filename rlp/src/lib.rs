//! Canonical recursive-length-prefix (RLP) encoding.
//!
//! # Overview
//!
//! Every value is either a byte string or a list of values. Strings and lists carry a short
//! header declaring their payload length, and every value has exactly one valid encoding:
//! decoders reject headers that are longer than needed, integers with leading zeros and
//! trailing bytes. Untrusted input is safe to decode: a list's items are always read through
//! a [Bounded] reader scoped to the list, so no item can claim bytes that belong elsewhere,
//! and lists nested deeper than [MAX_DEPTH] levels are rejected with [Error::DepthExceeded].
//!
//! # Supported Types
//!
//! - Unsigned integers `u8` to `u64` and [num_bigint::BigUint] as minimal big-endian strings.
//! - Signed integers `i8` to `i64` as the magnitude string; the sign is supplied when decoding
//!   ([Sign]).
//! - `bool`, [bytes::Bytes], [String] and `[u8; N]` as strings.
//! - [Vec], tuples and [std::collections::BTreeMap] as lists.
//! - [Option] as the empty item of its kind when absent.
//! - Structs declared with [record!] as the list of their fields.
//! - [Raw] for an already encoded item kept verbatim.
//! - [Value], a dynamic tree decoded against a runtime [Schema].
//!
//! # Example
//!
//! ```
//! use ledger_rlp::{record, DecodeExt, Encode, Error};
//!
//! record! {
//!     #[derive(Debug, PartialEq)]
//!     pub struct Transfer {
//!         pub nonce: u64,
//!         pub to: [u8; 4],
//!         pub memo: Option<String>,
//!         #[tail]
//!         pub amounts: Vec<u64>,
//!     }
//! }
//!
//! let transfer = Transfer {
//!     nonce: 1,
//!     to: [0xAA; 4],
//!     memo: None,
//!     amounts: vec![1024, 7],
//! };
//! let encoded = transfer.encode();
//! assert_eq!(
//!     encoded,
//!     &[0xCB, 0x01, 0x84, 0xAA, 0xAA, 0xAA, 0xAA, 0x80, 0x82, 0x04, 0x00, 0x07][..]
//! );
//! assert_eq!(Transfer::decode(encoded).unwrap(), transfer);
//!
//! // Integers must be minimal.
//! let padded = &[0xC8, 0x81, 0x01, 0x84, 0xAA, 0xAA, 0xAA, 0xAA, 0x80][..];
//! assert!(matches!(Transfer::decode(padded), Err(Error::NonCanonicalHeader(_))));
//! ```

mod bigint;
mod bounded;
pub mod codec;
mod config;
pub mod error;
pub mod header;
pub mod numeric;
pub mod record;
pub mod schema;
pub mod types;
pub mod util;
pub mod value;

pub use bigint::{decode_bigint, encode_bigint};
pub use bounded::{Bounded, MAX_DEPTH};
pub use codec::{Codec, Decode, DecodeExt, Encode, EncodeSize, Kinded, Read, ReadExt, Write};
pub use config::{RangeCfg, Sign};
pub use error::Error;
pub use header::{Header, Kind, EMPTY_LIST_CODE, EMPTY_STRING_CODE, MAX_SHORT_LENGTH};
pub use record::{FieldSpec, Record, Tag};
pub use schema::{FieldSchema, Schema};
pub use types::bytes::Raw;
pub use value::{Field, Value, Width};

#[doc(hidden)]
pub use bytes;
pub use num_bigint;
