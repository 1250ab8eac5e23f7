//! Leg model: the index lines protruding from a tensor's faces.
//!
//! A tensor box has four [`Side`]s. Each side carries zero or more [`Leg`]s,
//! placed by [`place_legs`] so that they are evenly spaced and centered as a
//! group on the side's midpoint.
//!
//! ```text
//!            n1  n2  n3
//!             │   │   │
//!         ┌───┴───┴───┴───┐
//!   w1 ───┤               ├─── e1
//!         └───┬───┬───┬───┘
//!             │   │   │
//!            s1  s2  s3
//! ```
//!
//! Ordinals are 1-based and run left-to-right on north/south sides and
//! top-to-bottom on west/east sides.

use std::fmt;

use log::trace;
use serde::Deserialize;
use thiserror::Error;

use crate::geometry::{Bounds, Point};

/// One of the four faces of a tensor box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    North,
    South,
    West,
    East,
}

impl Side {
    /// All sides, in the order legs are emitted.
    pub const ALL: [Side; 4] = [Side::North, Side::South, Side::West, Side::East];

    /// Unit vector pointing away from the box center.
    pub fn outward(self) -> Point {
        match self {
            Self::North => Point::new(0.0, -1.0),
            Self::South => Point::new(0.0, 1.0),
            Self::West => Point::new(-1.0, 0.0),
            Self::East => Point::new(1.0, 0.0),
        }
    }

    /// Unit vector along the side, in increasing ordinal direction.
    pub fn along(self) -> Point {
        if self.is_vertical_leg() {
            Point::new(1.0, 0.0)
        } else {
            Point::new(0.0, 1.0)
        }
    }

    /// Returns `true` for north and south, whose legs are drawn vertically.
    pub fn is_vertical_leg(self) -> bool {
        matches!(self, Self::North | Self::South)
    }

    /// Midpoint of this side of `bounds`.
    pub fn midpoint_of(self, bounds: Bounds) -> Point {
        let center = bounds.center();
        match self {
            Self::North => center.with_y(bounds.min_y()),
            Self::South => center.with_y(bounds.max_y()),
            Self::West => center.with_x(bounds.min_x()),
            Self::East => center.with_x(bounds.max_x()),
        }
    }

    /// Length of this side of `bounds`.
    pub fn extent_of(self, bounds: Bounds) -> f32 {
        if self.is_vertical_leg() {
            bounds.width()
        } else {
            bounds.height()
        }
    }

    /// Single-letter tag used in anchor names.
    pub fn letter(self) -> char {
        match self {
            Self::North => 'n',
            Self::South => 's',
            Self::West => 'w',
            Self::East => 'e',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::West => "west",
            Self::East => "east",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Largest number of legs a single side may carry.
pub const MAX_LEGS_PER_SIDE: usize = 1024;

/// A leg count outside `0..=MAX_LEGS_PER_SIDE` was supplied for a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error(
    "invalid leg count {count} on {side} side, counts must be between 0 and {}",
    MAX_LEGS_PER_SIDE
)]
pub struct LegCountError {
    side: Side,
    count: i64,
}

impl LegCountError {
    pub fn side(&self) -> Side {
        self.side
    }

    pub fn count(&self) -> i64 {
        self.count
    }
}

/// Number of legs on each side of a tensor.
///
/// # Examples
///
/// ```
/// # use tensordraw_core::leg::{LegCounts, Side};
/// let counts = LegCounts::new(3, 3, 1, 1);
/// assert_eq!(counts.get(Side::North), 3);
/// assert_eq!(counts.max_vertical(), 3);
///
/// assert!(LegCounts::try_from_signed(1, -1, 0, 0).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LegCounts {
    north: usize,
    south: usize,
    west: usize,
    east: usize,
}

impl LegCounts {
    pub fn new(north: usize, south: usize, west: usize, east: usize) -> Self {
        Self {
            north,
            south,
            west,
            east,
        }
    }

    /// Same count on every side
    pub fn uniform(count: usize) -> Self {
        Self::new(count, count, count, count)
    }

    /// Builds counts from signed input, rejecting negative values and values
    /// above [`MAX_LEGS_PER_SIDE`].
    ///
    /// # Errors
    ///
    /// Returns [`LegCountError`] naming the first bad side in north, south,
    /// west, east order.
    pub fn try_from_signed(
        north: i64,
        south: i64,
        west: i64,
        east: i64,
    ) -> Result<Self, LegCountError> {
        let check = |side: Side, count: i64| {
            usize::try_from(count)
                .ok()
                .filter(|count| *count <= MAX_LEGS_PER_SIDE)
                .ok_or(LegCountError { side, count })
        };
        Ok(Self {
            north: check(Side::North, north)?,
            south: check(Side::South, south)?,
            west: check(Side::West, west)?,
            east: check(Side::East, east)?,
        })
    }

    pub fn get(&self, side: Side) -> usize {
        match side {
            Side::North => self.north,
            Side::South => self.south,
            Side::West => self.west,
            Side::East => self.east,
        }
    }

    /// Returns a copy with `side` set to `count`.
    pub fn with(mut self, side: Side, count: usize) -> Self {
        match side {
            Side::North => self.north = count,
            Side::South => self.south = count,
            Side::West => self.west = count,
            Side::East => self.east = count,
        }
        self
    }

    /// Larger of the north and south counts
    pub fn max_vertical(&self) -> usize {
        self.north.max(self.south)
    }

    /// Larger of the west and east counts
    pub fn max_horizontal(&self) -> usize {
        self.west.max(self.east)
    }

    /// Checks every side against [`MAX_LEGS_PER_SIDE`].
    ///
    /// # Errors
    ///
    /// Returns [`LegCountError`] for the first side over the limit.
    pub fn validate(&self) -> Result<(), LegCountError> {
        for side in Side::ALL {
            let count = self.get(side);
            if count > MAX_LEGS_PER_SIDE {
                return Err(LegCountError {
                    side,
                    count: i64::try_from(count).unwrap_or(i64::MAX),
                });
            }
        }
        Ok(())
    }
}

/// How legs sharing a side are spaced.
///
/// Both policies center the group on the side's midpoint; they differ only in
/// the distance between neighbouring legs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SpacingPolicy {
    /// Cut the side into equal segments and put one leg in the middle of each.
    #[default]
    Even,
    /// Keep a constant distance between legs regardless of the side length.
    Fixed { pitch: f32 },
}

impl SpacingPolicy {
    /// Distance between neighbouring leg centers.
    pub fn pitch(&self, extent: f32, count: usize) -> f32 {
        match *self {
            Self::Even if count > 0 => extent / count as f32,
            Self::Even => 0.0,
            Self::Fixed { pitch } => pitch,
        }
    }
}

/// A single leg attached to one side of a tensor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Leg {
    side: Side,
    ordinal: usize,
    length: f32,
    inner: Point,
    outer: Point,
}

impl Leg {
    pub fn side(&self) -> Side {
        self.side
    }

    /// 1-based position along the side
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    /// Endpoint on the tensor boundary
    pub fn inner(&self) -> Point {
        self.inner
    }

    /// Free endpoint (tip)
    pub fn outer(&self) -> Point {
        self.outer
    }
}

/// Places `count` legs on `side` of `node_box`.
///
/// Leg `i` (1-based) sits at offset `(i - (count + 1) / 2) * pitch` from the
/// side midpoint, so the group is centered and a single leg lands exactly on
/// the midpoint. Each outer point is the inner point moved `leg_length` along
/// the side's outward normal.
///
/// # Examples
///
/// ```
/// # use tensordraw_core::geometry::{Bounds, Point, Size};
/// # use tensordraw_core::leg::{place_legs, Side, SpacingPolicy};
/// let node_box = Bounds::new_from_center(Point::default(), Size::new(3.0, 1.0));
/// let legs = place_legs(Side::North, 3, node_box, 0.5, SpacingPolicy::Even);
///
/// assert_eq!(legs.len(), 3);
/// assert_eq!(legs[0].inner(), Point::new(-1.0, -0.5));
/// assert_eq!(legs[1].outer(), Point::new(0.0, -1.0));
/// ```
pub fn place_legs(
    side: Side,
    count: usize,
    node_box: Bounds,
    leg_length: f32,
    spacing: SpacingPolicy,
) -> Vec<Leg> {
    if count == 0 {
        return Vec::new();
    }

    let midpoint = side.midpoint_of(node_box);
    let pitch = spacing.pitch(side.extent_of(node_box), count);
    let along = side.along();
    let outward = side.outward().scale(leg_length);
    let center_ordinal = (count as f32 + 1.0) / 2.0;
    trace!(side:% = side, count = count, pitch = pitch; "Placing legs");

    (1..=count)
        .map(|ordinal| {
            let offset = (ordinal as f32 - center_ordinal) * pitch;
            let inner = midpoint.add_point(along.scale(offset));
            Leg {
                side,
                ordinal,
                length: leg_length,
                inner,
                outer: inner.add_point(outward),
            }
        })
        .collect()
}
