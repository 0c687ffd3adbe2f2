use std::{
    cmp::Ordering,
    ops::{Add, Sub},
};

/// A cell coordinate on the unbounded grid
///
/// 64-bit components leave enough headroom that adding a neighbor offset
/// never overflows for anything a view can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos2 {
    pub x: i64,
    pub y: i64,
}

/// Offsets of the 8 cells surrounding a position, row by row
pub const MOORE_OFFSETS: [Pos2; 8] = [
    Pos2::new(-1, -1),
    Pos2::new(0, -1),
    Pos2::new(1, -1),
    Pos2::new(-1, 0),
    Pos2::new(1, 0),
    Pos2::new(-1, 1),
    Pos2::new(0, 1),
    Pos2::new(1, 1),
];

impl Pos2 {
    #[inline]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
    #[inline]
    pub fn zero() -> Self {
        Self { x: 0, y: 0 }
    }
    #[inline]
    pub fn one() -> Self {
        Self { x: 1, y: 1 }
    }

    /// The Moore neighborhood of this position, excluding the position itself
    #[inline]
    pub fn neighbors(self) -> impl Iterator<Item = Pos2> {
        MOORE_OFFSETS.into_iter().map(move |offset| self + offset)
    }
}
impl Default for Pos2 {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}
impl From<(i64, i64)> for Pos2 {
    #[inline]
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}
impl PartialOrd for Pos2 {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Pos2 {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        // row-major: y first, then x
        Ord::cmp(&self.y, &other.y).then(Ord::cmp(&self.x, &other.x))
    }
}
impl Add for Pos2 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}
impl Sub for Pos2 {
    type Output = Pos2;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}
