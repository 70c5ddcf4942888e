//! Error types for codec operations

use thiserror::Error;

/// Error type for codec operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("unexpected end of buffer")]
    EndOfBuffer,
    #[error("extra data found: {0} bytes")]
    ExtraData(usize),
    #[error("length exceeded: {0} > {1}")]
    LengthExceeded(usize, usize), // declared, remaining
    #[error("non-canonical header: {0}")]
    NonCanonicalHeader(&'static str),
    #[error("non-canonical integer: leading zero byte")]
    LeadingZero,
    #[error("overflow: {0} bytes do not fit in {1}")]
    Overflow(usize, usize), // found, max
    #[error("cannot encode negative big integer")]
    NegativeBigInt,
    #[error("expected string, found list")]
    UnexpectedList,
    #[error("expected list, found string")]
    UnexpectedString,
    #[error("too few elements")]
    TooFewElements,
    #[error("too many elements: {0} bytes left in list")]
    TooManyElements(usize),
    #[error("invalid length: {0}")]
    InvalidLength(usize),
    #[error("invalid bool")]
    InvalidBool,
    #[error("invalid data in {0}: {1}")]
    InvalidData(&'static str, &'static str), // context, message
    #[error("nesting too deep: more than {0} levels")]
    DepthExceeded(usize),
    #[error("invalid schema: {0}")]
    InvalidSchema(&'static str),
}
