//! Floor numbers and travel direction.
//!
//! Floors are 1-based signed integers.  Nothing here clamps to the building's
//! floor count: the bound is advisory and enforced by whoever generates
//! requests, not by the cab that moves.

use std::fmt;

// ── Direction ─────────────────────────────────────────────────────────────────

/// Travel direction of a cab between two floors.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Signed step applied to a floor number when travelling this way.
    #[inline]
    pub fn step(self) -> i32 {
        match self {
            Direction::Up   => 1,
            Direction::Down => -1,
        }
    }
}

// ── Floor ─────────────────────────────────────────────────────────────────────

/// A floor number.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Floor(pub i32);

impl Floor {
    /// Every cab starts here.
    pub const GROUND: Floor = Floor(1);

    /// Which way to travel from `self` to reach `target`; `None` if already there.
    #[inline]
    pub fn direction_to(self, target: Floor) -> Option<Direction> {
        match target.0.cmp(&self.0) {
            std::cmp::Ordering::Greater => Some(Direction::Up),
            std::cmp::Ordering::Less    => Some(Direction::Down),
            std::cmp::Ordering::Equal   => None,
        }
    }

    /// The adjacent floor one step closer to `target` (or `self` if equal).
    #[inline]
    pub fn step_toward(self, target: Floor) -> Floor {
        match self.direction_to(target) {
            Some(dir) => Floor(self.0 + dir.step()),
            None      => self,
        }
    }

    /// Number of floors between `self` and `target`.
    #[inline]
    pub fn distance_to(self, target: Floor) -> u32 {
        self.0.abs_diff(target.0)
    }
}

impl Default for Floor {
    fn default() -> Self {
        Floor::GROUND
    }
}

impl fmt::Display for Floor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
