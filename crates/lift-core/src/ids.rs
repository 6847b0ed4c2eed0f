//! Strongly typed, zero-cost identifier wrappers.
//!
//! Ids are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! without ceremony.  The inner integer is `pub`; prefer `.index()` when
//! indexing into the worker pool.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
///
/// `$prefix` is the short tag used by `Display` (`E0`, `R12`, …), matching
/// the way elevators and requests are named in log output.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty) = $prefix:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $prefix, self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Position of an elevator in the building's worker pool.
    pub struct ElevatorId(u32) = "E";
}

typed_id! {
    /// Identifier assigned to a request when it is submitted.
    pub struct RequestId(u32) = "R";
}
