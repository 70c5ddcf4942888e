//! Decode-time settings passed as [crate::Read::Cfg].

use core::ops::{Bound, RangeBounds};

/// Inclusive bounds on a byte length or an element count.
///
/// Strings check their payload length against it, lists and maps their number of items. A
/// header can never claim more bytes than its parent holds, so [RangeCfg::default] (any
/// length) is fine for untrusted input. Narrower bounds only reject unwanted sizes earlier.
///
/// Any standard range of `usize` converts into it:
///
/// ```
/// use ledger_rlp::RangeCfg;
///
/// let cfg = RangeCfg::from(1..=32);
/// assert!(cfg.contains(32));
/// assert!(!cfg.contains(0));
///
/// let cfg = RangeCfg::from(..=4);
/// assert_eq!((cfg.min(), cfg.max()), (0, 4));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RangeCfg {
    min: usize,
    max: usize,
}

impl RangeCfg {
    /// Accepts any length.
    pub const ANY: Self = Self::between(0, usize::MAX);

    /// Accepts lengths from `min` to `max`, both included.
    pub const fn between(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// Accepts `len` only.
    pub const fn exact(len: usize) -> Self {
        Self::between(len, len)
    }

    /// Converts any range of `usize`. A range holding nothing rejects every length.
    pub fn new(bounds: impl RangeBounds<usize>) -> Self {
        let min = match bounds.start_bound() {
            Bound::Included(&n) => Some(n),
            Bound::Excluded(&n) => n.checked_add(1),
            Bound::Unbounded => Some(0),
        };
        let max = match bounds.end_bound() {
            Bound::Included(&n) => Some(n),
            Bound::Excluded(&n) => n.checked_sub(1),
            Bound::Unbounded => Some(usize::MAX),
        };
        match (min, max) {
            (Some(min), Some(max)) => Self::between(min, max),
            _ => Self::between(1, 0),
        }
    }

    pub const fn min(&self) -> usize {
        self.min
    }

    pub const fn max(&self) -> usize {
        self.max
    }

    /// Returns true if `len` is within the bounds.
    pub const fn contains(&self, len: usize) -> bool {
        self.min <= len && len <= self.max
    }
}

impl Default for RangeCfg {
    fn default() -> Self {
        Self::ANY
    }
}

macro_rules! impl_from_range {
    ($($range:ty),*) => {
        $(
            impl From<$range> for RangeCfg {
                fn from(range: $range) -> Self {
                    Self::new(range)
                }
            }
        )*
    };
}

impl_from_range!(
    core::ops::Range<usize>,
    core::ops::RangeInclusive<usize>,
    core::ops::RangeFrom<usize>,
    core::ops::RangeToInclusive<usize>,
    core::ops::RangeFull
);

/// Sign of a decoded signed integer.
///
/// Integers are written as their magnitude alone, so `5` and `-5` share an encoding. The reader
/// supplies the sign the destination expects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Sign {
    #[default]
    Positive,
    Negative,
}

impl Sign {
    pub const fn is_negative(self) -> bool {
        matches!(self, Sign::Negative)
    }

    /// Sign of `value` (zero is positive).
    pub const fn of(value: i64) -> Self {
        if value < 0 {
            Sign::Negative
        } else {
            Sign::Positive
        }
    }
}
