//! Pure layout computation for tensors and chains.
//!
//! Nothing in this module touches the anchor registry: [`node`] and
//! [`chain`] turn leg counts and options into geometry values, and the
//! [`Session`](crate::session::Session) publishes the result.

pub mod chain;
pub mod node;

pub use chain::{Bond, ChainGeometry, ChainOptions, MAX_CHAIN_LENGTH, Strand};
pub use node::{NodeGeometry, NodeOptions};

use tensordraw_core::{
    geometry::{Point, Size},
    leg::{LegCounts, Side},
};

use crate::config::Defaults;

/// Where an item goes when no explicit center is given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Center of the (first) tensor.
    Center(Point),
    /// Left edge of the item, west leg tips included, at the given height.
    LeftEdge(Point),
}

impl Placement {
    /// Center of a tensor of `size` with `counts` legs placed here.
    pub(crate) fn center_for(
        &self,
        size: Size,
        counts: LegCounts,
        west_leg_length: f32,
    ) -> Point {
        match *self {
            Self::Center(center) => center,
            Self::LeftEdge(edge) => {
                let west_reach = if counts.get(Side::West) > 0 {
                    west_leg_length
                } else {
                    0.0
                };
                edge.translate(west_reach + size.width() / 2.0, 0.0)
            }
        }
    }
}

/// Size a tensor gets when none is given explicitly.
///
/// `width = max(tensor_width, leg_pitch * max(north, south))` and
/// `height = max(tensor_height, leg_pitch * max(west, east))`.
pub fn implied_size(counts: LegCounts, defaults: &Defaults) -> Size {
    let width = defaults
        .tensor_width()
        .max(defaults.leg_pitch() * counts.max_vertical() as f32);
    let height = defaults
        .tensor_height()
        .max(defaults.leg_pitch() * counts.max_horizontal() as f32);
    Size::new(width, height)
}
