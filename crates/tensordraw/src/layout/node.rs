//! Layout of a single tensor box and its legs.

use log::debug;

use tensordraw_core::{
    geometry::{Bounds, Point, Size},
    identifier::Id,
    leg::{Leg, LegCounts, MAX_LEGS_PER_SIDE, Side, SpacingPolicy, place_legs},
};

use super::{Placement, implied_size};
use crate::{
    config::{Defaults, check_non_negative, check_positive, check_spacing},
    error::LayoutError,
    registry::AnchorKey,
};

/// Per-call overrides for a tensor.
///
/// Every value left unset falls back to the session [`Defaults`]. An explicit
/// width or height always wins over the size implied by leg counts.
///
/// # Examples
///
/// ```
/// # use tensordraw::layout::NodeOptions;
/// # use tensordraw::geometry::Point;
/// let options = NodeOptions::new()
///     .with_width(4.0)
///     .with_center(Point::new(2.0, 0.0));
/// assert_eq!(options.center(), Some(Point::new(2.0, 0.0)));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NodeOptions {
    width: Option<f32>,
    height: Option<f32>,
    center: Option<Point>,
    horizontal_leg_length: Option<f32>,
    vertical_leg_length: Option<f32>,
    spacing: Option<SpacingPolicy>,
}

impl NodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_center(mut self, center: Point) -> Self {
        self.center = Some(center);
        self
    }

    pub fn with_horizontal_leg_length(mut self, length: f32) -> Self {
        self.horizontal_leg_length = Some(length);
        self
    }

    pub fn with_vertical_leg_length(mut self, length: f32) -> Self {
        self.vertical_leg_length = Some(length);
        self
    }

    pub fn with_spacing(mut self, spacing: SpacingPolicy) -> Self {
        self.spacing = Some(spacing);
        self
    }

    pub fn center(&self) -> Option<Point> {
        self.center
    }

    /// Leg length for `side`, falling back to `defaults`.
    pub fn leg_length(&self, side: Side, defaults: &Defaults) -> f32 {
        let explicit = if side.is_vertical_leg() {
            self.vertical_leg_length
        } else {
            self.horizontal_leg_length
        };
        explicit.unwrap_or_else(|| defaults.leg_length(side))
    }

    pub fn spacing(&self, defaults: &Defaults) -> SpacingPolicy {
        self.spacing.unwrap_or_else(|| defaults.spacing())
    }

    /// Box size for a tensor with `counts` legs.
    ///
    /// Each explicit dimension replaces the implied one independently.
    pub fn size(&self, counts: LegCounts, defaults: &Defaults) -> Size {
        let implied = implied_size(counts, defaults);
        Size::new(
            self.width.unwrap_or(implied.width()),
            self.height.unwrap_or(implied.height()),
        )
    }

    pub(crate) fn validate(&self, owner: &str) -> Result<(), LayoutError> {
        if let Some(width) = self.width {
            check_positive(owner, "width", width)?;
        }
        if let Some(height) = self.height {
            check_positive(owner, "height", height)?;
        }
        if let Some(length) = self.horizontal_leg_length {
            check_non_negative(owner, "horizontal_leg_length", length)?;
        }
        if let Some(length) = self.vertical_leg_length {
            check_non_negative(owner, "vertical_leg_length", length)?;
        }
        if let Some(spacing) = self.spacing {
            check_spacing(owner, spacing)?;
        }
        match self.center {
            Some(center) if !center.x().is_finite() => {
                Err(LayoutError::invalid_dimension(owner, "center x", center.x()))
            }
            Some(center) if !center.y().is_finite() => {
                Err(LayoutError::invalid_dimension(owner, "center y", center.y()))
            }
            _ => Ok(()),
        }
    }
}

/// Geometry of one laid-out tensor.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeGeometry {
    name: Id,
    counts: LegCounts,
    bounds: Bounds,
    legs: Vec<Leg>,
}

impl NodeGeometry {
    pub fn name(&self) -> Id {
        self.name
    }

    pub fn center(&self) -> Point {
        self.bounds.center()
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn counts(&self) -> LegCounts {
        self.counts
    }

    /// All legs, grouped by side in [`Side::ALL`] order, then by ordinal.
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    pub fn legs_on(&self, side: Side) -> impl Iterator<Item = &Leg> {
        self.legs.iter().filter(move |leg| leg.side() == side)
    }

    pub fn leg(&self, side: Side, ordinal: usize) -> Option<&Leg> {
        self.legs_on(side).find(|leg| leg.ordinal() == ordinal)
    }

    /// Bounds of the box together with every leg tip.
    pub fn extent(&self) -> Bounds {
        self.legs
            .iter()
            .fold(self.bounds, |acc, leg| acc.include(leg.outer()))
    }

    /// Anchors this tensor publishes: the center, then inner and outer
    /// points of every leg in leg order.
    pub fn anchors(&self) -> Vec<(AnchorKey, Point)> {
        let mut anchors = Vec::with_capacity(1 + 2 * self.legs.len());
        anchors.push((AnchorKey::center(self.name), self.center()));
        for leg in &self.legs {
            anchors.push((
                AnchorKey::inner(self.name, leg.side(), leg.ordinal()),
                leg.inner(),
            ));
            anchors.push((
                AnchorKey::outer(self.name, leg.side(), leg.ordinal()),
                leg.outer(),
            ));
        }
        anchors
    }
}

/// Computes the geometry of tensor `name` without publishing anything.
///
/// The center is `options`' explicit center if given, otherwise derived from
/// `placement`.
///
/// # Errors
///
/// - [`LayoutError::InvalidLegCount`] if a side has more than
///   [`MAX_LEGS_PER_SIDE`] legs.
/// - [`LayoutError::InvalidDimension`] if an override is not a usable size,
///   length or position.
pub fn layout_node(
    name: Id,
    counts: LegCounts,
    options: &NodeOptions,
    defaults: &Defaults,
    placement: Placement,
) -> Result<NodeGeometry, LayoutError> {
    let owner = name.to_string();
    counts
        .validate()
        .map_err(|err| LayoutError::invalid_leg_count(&owner, err))?;
    options.validate(&owner)?;

    let size = options.size(counts, defaults);
    let center = options.center().unwrap_or_else(|| {
        placement.center_for(size, counts, options.leg_length(Side::West, defaults))
    });

    Ok(build_node(name, counts, center, size, options, defaults))
}

/// Places the box and all four leg groups. Inputs are assumed valid.
pub(crate) fn build_node(
    name: Id,
    counts: LegCounts,
    center: Point,
    size: Size,
    options: &NodeOptions,
    defaults: &Defaults,
) -> NodeGeometry {
    let bounds = Bounds::new_from_center(center, size);
    let spacing = options.spacing(defaults);

    let legs: Vec<Leg> = Side::ALL
        .iter()
        .flat_map(|&side| {
            place_legs(
                side,
                counts.get(side),
                bounds,
                options.leg_length(side, defaults),
                spacing,
            )
        })
        .collect();

    debug!(
        name:% = name,
        x = center.x(),
        y = center.y(),
        width = size.width(),
        height = size.height(),
        legs = legs.len();
        "Laid out tensor"
    );

    NodeGeometry {
        name,
        counts,
        bounds,
        legs,
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn origin() -> Placement {
        Placement::Center(Point::new(0.0, 0.0))
    }

    #[test]
    fn test_rho_layout() {
        let rho = layout_node(
            Id::new("rho"),
            LegCounts::new(3, 3, 1, 1),
            &NodeOptions::new(),
            &Defaults::default(),
            origin(),
        )
        .unwrap();

        assert_eq!(rho.bounds().width(), 3.0);
        assert_eq!(rho.legs_on(Side::North).count(), 3);
        assert_eq!(rho.legs_on(Side::South).count(), 3);
        assert_eq!(rho.legs_on(Side::West).count(), 1);
        assert_eq!(rho.legs_on(Side::East).count(), 1);

        let west = rho.leg(Side::West, 1).unwrap();
        assert_eq!(west.inner(), Point::new(-1.5, 0.0));
        assert_eq!(west.outer(), Point::new(-2.0, 0.0));

        let xs: Vec<f32> = rho.legs_on(Side::South).map(|leg| leg.inner().x()).collect();
        assert_eq!(xs, vec![-1.0, 0.0, 1.0]);

        let (center_key, center) = rho.anchors()[0];
        assert_eq!(center_key.to_string(), "rho");
        assert_eq!(center, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_anchor_count_matches_legs() {
        let node = layout_node(
            Id::new("node_anchor_count"),
            LegCounts::new(2, 0, 1, 0),
            &NodeOptions::new(),
            &Defaults::default(),
            origin(),
        )
        .unwrap();

        assert_eq!(node.anchors().len(), 1 + 2 * 3);
        assert!(node.legs_on(Side::South).next().is_none());
    }

    #[test]
    fn test_explicit_size_wins_over_implied() {
        let node = layout_node(
            Id::new("node_explicit"),
            LegCounts::new(6, 0, 0, 0),
            &NodeOptions::new().with_width(2.0).with_height(0.5),
            &Defaults::default(),
            origin(),
        )
        .unwrap();

        assert_eq!(node.bounds().width(), 2.0);
        assert_eq!(node.bounds().height(), 0.5);
        // Legs still share the narrower side evenly
        let first = node.leg(Side::North, 1).unwrap().inner().x();
        let second = node.leg(Side::North, 2).unwrap().inner().x();
        assert_approx_eq!(f32, second - first, 2.0 / 6.0);
    }

    #[test]
    fn test_leg_length_overrides() {
        let node = layout_node(
            Id::new("node_lengths"),
            LegCounts::uniform(1),
            &NodeOptions::new()
                .with_vertical_leg_length(1.0)
                .with_horizontal_leg_length(0.25),
            &Defaults::default(),
            origin(),
        )
        .unwrap();

        assert_approx_eq!(f32, node.leg(Side::North, 1).unwrap().length(), 1.0);
        assert_approx_eq!(f32, node.leg(Side::East, 1).unwrap().length(), 0.25);
        assert_eq!(node.extent().min_y(), -1.5);
        assert_eq!(node.extent().max_x(), 1.75);
    }

    #[test]
    fn test_left_edge_placement() {
        let node = layout_node(
            Id::new("node_left_edge"),
            LegCounts::new(0, 0, 1, 1),
            &NodeOptions::new(),
            &Defaults::default(),
            Placement::LeftEdge(Point::new(0.0, 0.0)),
        )
        .unwrap();

        assert_eq!(node.extent().min_x(), 0.0);
        assert_eq!(node.center(), Point::new(2.0, 0.0));
    }

    #[test]
    fn test_explicit_center_beats_placement() {
        let node = layout_node(
            Id::new("node_center"),
            LegCounts::default(),
            &NodeOptions::new().with_center(Point::new(7.0, -1.0)),
            &Defaults::default(),
            Placement::LeftEdge(Point::new(100.0, 100.0)),
        )
        .unwrap();

        assert_eq!(node.center(), Point::new(7.0, -1.0));
    }

    #[test]
    fn test_invalid_override_rejected() {
        let err = layout_node(
            Id::new("node_bad"),
            LegCounts::default(),
            &NodeOptions::new().with_width(-1.0),
            &Defaults::default(),
            origin(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            LayoutError::InvalidDimension { what: "width", .. }
        ));
    }

    #[test]
    fn test_oversized_leg_count_rejected() {
        let err = layout_node(
            Id::new("crowded"),
            LegCounts::new(MAX_LEGS_PER_SIDE + 1, 0, 0, 0),
            &NodeOptions::new(),
            &Defaults::default(),
            origin(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            LayoutError::InvalidLegCount { ref owner, .. } if owner == "crowded"
        ));
    }
}
