//! `EdgeId`, `VertexId` and `FaceId`: strong, zero-cost handles.
//!
//! Every undirected edge of a [`Manifold`](crate::topology::manifold::Manifold)
//! is stored as a bundle of four directed records at consecutive ids whose low
//! two bits are `0..=3`:
//!
//! | id bits | record | `data` holds |
//! |---|---|---|
//! | `..00` | the primal edge `e` (src → dst) | source vertex |
//! | `..01` | `right(e)` | left face |
//! | `..10` | `flip(e)` (dst → src) | destination vertex |
//! | `..11` | `left(e)` | right face |
//!
//! The quarter-turn functions below only rotate the low two bits, so they are
//! pure arithmetic and never touch storage.

use std::fmt;

/// Handle of one directed edge record.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct EdgeId(u32);

impl EdgeId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        EdgeId(raw)
    }

    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// First record of the bundle this record belongs to.
    #[inline]
    pub const fn base(self) -> Self {
        EdgeId(self.0 & !3)
    }

    /// Position inside the bundle, `0..=3`.
    #[inline]
    pub const fn quarter(self) -> u32 {
        self.0 & 3
    }

    /// `true` for the two vertex-carrying records (`e` and `flip(e)`).
    #[inline]
    pub const fn is_primal(self) -> bool {
        self.0 & 1 == 0
    }

    /// Quarter turn: the dual edge crossing `self` from right to left.
    #[inline]
    pub const fn right(self) -> Self {
        EdgeId((self.0 & !3) + (self.0.wrapping_add(1) & 3))
    }

    /// Half turn: same edge, opposite direction.
    #[inline]
    pub const fn flip(self) -> Self {
        EdgeId((self.0 & !3) + (self.0.wrapping_add(2) & 3))
    }

    /// Three quarter turns (the inverse of [`EdgeId::right`]).
    #[inline]
    pub const fn left(self) -> Self {
        EdgeId((self.0 & !3) + (self.0.wrapping_add(3) & 3))
    }
}

impl fmt::Debug for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EdgeId").field(&self.0).finish()
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Dense vertex handle, assigned in allocation order and never reused.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
)]
#[repr(transparent)]
pub struct VertexId(pub u32);

impl VertexId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Caller-chosen face label stored on the dual records.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
)]
#[repr(transparent)]
pub struct FaceId(pub u32);

impl fmt::Display for FaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ids are stored and uploaded as plain u32
static_assertions::assert_eq_size!(EdgeId, u32);
static_assertions::assert_eq_size!(VertexId, u32);
static_assertions::assert_eq_size!(FaceId, u32);
static_assertions::assert_eq_align!(EdgeId, u32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_turns_stay_in_bundle() {
        let e = EdgeId::new(8);
        assert_eq!(e.right(), EdgeId::new(9));
        assert_eq!(e.flip(), EdgeId::new(10));
        assert_eq!(e.left(), EdgeId::new(11));
        assert_eq!(EdgeId::new(11).right(), EdgeId::new(8));
        assert_eq!(EdgeId::new(10).flip(), EdgeId::new(8));
    }

    #[test]
    fn base_and_quarter() {
        let e = EdgeId::new(14);
        assert_eq!(e.base(), EdgeId::new(12));
        assert_eq!(e.quarter(), 2);
        assert!(e.is_primal());
        assert!(!e.right().is_primal());
    }

    #[test]
    fn top_of_range_does_not_overflow() {
        let e = EdgeId::new(u32::MAX);
        assert_eq!(e.right(), EdgeId::new(u32::MAX - 3));
        assert_eq!(e.flip().flip(), e);
    }

    #[test]
    fn debug_and_display() {
        let e = EdgeId::new(7);
        assert_eq!(format!("{:?}", e), "EdgeId(7)");
        assert_eq!(format!("{}", e), "7");
        assert_eq!(format!("{}", VertexId(3)), "3");
        assert_eq!(format!("{}", FaceId(2)), "2");
    }
}
