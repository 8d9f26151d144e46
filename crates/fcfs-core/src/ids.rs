//! Strongly typed identifier wrappers.
//!
//! IDs are `Copy + Ord + Hash` so they can be sorted and used as map keys
//! without ceremony.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
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

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
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
    /// Passenger identity.  Assigned from 1 upwards at spawn, never reused
    /// within one run.
    pub struct PassengerId(u32);
}

typed_id! {
    /// Position of a stop in the route's fixed stop list.
    pub struct StopIndex(u16);
}

impl PassengerId {
    /// The first id handed out by a fresh simulation.
    pub const FIRST: PassengerId = PassengerId(1);

    #[inline]
    pub fn next(self) -> PassengerId {
        PassengerId(self.0 + 1)
    }
}

impl fmt::Display for PassengerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Stops are shown 1-based, the way riders read the signs.
impl fmt::Display for StopIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stop {}", self.0 as u32 + 1)
    }
}
