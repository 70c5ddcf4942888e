//! Codec implementations for common types.
//!
//! Scalars and byte strings become strings on the wire; [Vec], tuples and maps become lists.

pub mod bytes;
pub mod map;
pub mod primitives;
pub mod tuple;
pub mod vec;
