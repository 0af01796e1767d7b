//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  The inner integer is `pub`; prefer
//! the `.index()` helpers when indexing into `Vec`s.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
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
    /// Dense index of a street-graph node.
    pub struct NodeId(u32);
}

typed_id! {
    /// Dense index of a directed street-graph edge.
    pub struct EdgeId(u32);
}

typed_id! {
    /// Spawner-assigned agent identifier.  Allocated from a monotonically
    /// increasing counter and never reused within a run.
    pub struct AgentId(u32);
}

typed_id! {
    /// Engine-assigned dense position of a live agent in the engine's own
    /// per-agent arrays.  Slots shift down when a lower slot is deleted, so
    /// a slot is only meaningful until the next deletion.
    pub struct AgentSlot(u32);
}

impl AgentId {
    /// Engine-facing callsign, e.g. `D17`.
    pub fn callsign(self) -> String {
        format!("D{}", self.0)
    }
}

/// Identity of a directed edge: its endpoints plus the parallel-edge key that
/// distinguishes several edges between the same ordered pair.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeKey {
    pub u:   NodeId,
    pub v:   NodeId,
    pub key: u32,
}

impl EdgeKey {
    #[inline]
    pub fn new(u: NodeId, v: NodeId, key: u32) -> Self {
        Self { u, v, key }
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.u.0, self.v.0, self.key)
    }
}
