//! Layout of a matrix product array (MPA): a left-to-right train of tensors.
//!
//! Site `i` (1-based) of a chain named `A` is the tensor `A_i`. Each pair of
//! neighbours is joined by a [`Bond`]: the east legs of the left tensor and
//! the west legs of the right tensor are the same physical index, so their
//! counts must agree. Only the west legs of the first site and the east legs
//! of the last site stay dangling.
//!
//! ```text
//!        │         │         │
//!   ── A_1 ───── A_2 ───── A_3 ──
//!        │         │         │
//! ```

use log::debug;

use tensordraw_core::{
    geometry::{Bounds, Point},
    identifier::Id,
    leg::{Leg, LegCounts, Side},
};

use super::{
    Placement,
    node::{NodeGeometry, NodeOptions, build_node},
};
use crate::{
    config::{Defaults, check_non_negative},
    error::LayoutError,
    registry::AnchorKey,
};

/// Largest number of sites a single chain may have.
pub const MAX_CHAIN_LENGTH: usize = 4096;

/// Options for a chain.
///
/// Node overrides apply to every site; an explicit center in them is the
/// center of the first site.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainOptions {
    base_name: Id,
    node: NodeOptions,
    gap: Option<f32>,
}

impl ChainOptions {
    pub fn new(base_name: &str) -> Self {
        Self {
            base_name: Id::new(base_name),
            node: NodeOptions::default(),
            gap: None,
        }
    }

    pub fn with_node_options(mut self, node: NodeOptions) -> Self {
        self.node = node;
        self
    }

    /// Center of the first site.
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.node = self.node.with_center(origin);
        self
    }

    /// Free horizontal space between neighbouring boxes.
    pub fn with_gap(mut self, gap: f32) -> Self {
        self.gap = Some(gap);
        self
    }

    pub fn base_name(&self) -> Id {
        self.base_name
    }

    pub fn node_options(&self) -> &NodeOptions {
        &self.node
    }

    /// Name of the site at 1-based `index`.
    pub fn node_name(&self, index: usize) -> Id {
        self.base_name.indexed(index)
    }

    pub fn gap(&self, defaults: &Defaults) -> f32 {
        self.gap.unwrap_or_else(|| defaults.node_gap())
    }
}

/// One line of a bond, joining east leg `ordinal` of the left tensor to west
/// leg `ordinal` of the right tensor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Strand {
    ordinal: usize,
    from: Point,
    to: Point,
}

impl Strand {
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    pub fn from(&self) -> Point {
        self.from
    }

    pub fn to(&self) -> Point {
        self.to
    }
}

/// Internal connection between two neighbouring sites.
///
/// A chain of length `L` always has `L - 1` bonds. A bond between tensors
/// without east/west legs has no strands.
#[derive(Debug, Clone, PartialEq)]
pub struct Bond {
    left: Id,
    right: Id,
    strands: Vec<Strand>,
}

impl Bond {
    pub fn left(&self) -> Id {
        self.left
    }

    pub fn right(&self) -> Id {
        self.right
    }

    pub fn strands(&self) -> &[Strand] {
        &self.strands
    }
}

/// Geometry of a laid-out chain.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainGeometry {
    base_name: Id,
    nodes: Vec<NodeGeometry>,
    bonds: Vec<Bond>,
}

impl ChainGeometry {
    pub fn base_name(&self) -> Id {
        self.base_name
    }

    /// Sites in left-to-right order. Never empty.
    pub fn nodes(&self) -> &[NodeGeometry] {
        &self.nodes
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Bond to the right of the site at 0-based `index`.
    pub fn bond_after(&self, index: usize) -> Option<&Bond> {
        self.bonds.get(index)
    }

    /// West legs of the first site.
    pub fn dangling_west(&self) -> impl Iterator<Item = &Leg> {
        self.nodes
            .first()
            .into_iter()
            .flat_map(|node| node.legs_on(Side::West))
    }

    /// East legs of the last site.
    pub fn dangling_east(&self) -> impl Iterator<Item = &Leg> {
        self.nodes
            .last()
            .into_iter()
            .flat_map(|node| node.legs_on(Side::East))
    }

    /// Both groups of dangling end legs, west group first.
    pub fn dangling_legs(&self) -> Vec<&Leg> {
        self.dangling_west().chain(self.dangling_east()).collect()
    }

    /// Bounds of every box and leg tip in the chain.
    pub fn extent(&self) -> Bounds {
        self.nodes
            .iter()
            .map(NodeGeometry::extent)
            .reduce(|acc, extent| acc.merge(&extent))
            .unwrap_or_default()
    }

    /// Anchors of every site, in site order.
    pub fn anchors(&self) -> Vec<(AnchorKey, Point)> {
        self.nodes.iter().flat_map(NodeGeometry::anchors).collect()
    }
}

/// Checks that a chain of `length` sites is within `1..=MAX_CHAIN_LENGTH`.
///
/// # Errors
///
/// Returns [`LayoutError::InvalidChainLength`] otherwise.
pub fn check_chain_length(name: &str, length: usize) -> Result<(), LayoutError> {
    if (1..=MAX_CHAIN_LENGTH).contains(&length) {
        return Ok(());
    }
    Err(LayoutError::InvalidChainLength {
        name: name.to_string(),
        length: i64::try_from(length).unwrap_or(i64::MAX),
    })
}

/// Checks that every interior pair agrees on its bond leg count.
///
/// # Errors
///
/// Returns [`LayoutError::BondMismatch`] for the first pair whose east and
/// west counts differ.
pub fn validate_bonds(options: &ChainOptions, sites: &[LegCounts]) -> Result<(), LayoutError> {
    for (index, pair) in sites.windows(2).enumerate() {
        let east = pair[0].get(Side::East);
        let west = pair[1].get(Side::West);
        if east != west {
            return Err(LayoutError::BondMismatch {
                left: options.node_name(index + 1).to_string(),
                right: options.node_name(index + 2).to_string(),
                east,
                west,
            });
        }
    }
    Ok(())
}

/// Computes the geometry of a chain with one [`LegCounts`] per site, without
/// publishing anything.
///
/// Site `i + 1` is centered `w_i / 2 + gap + w_{i+1} / 2` to the right of
/// site `i`, so centers strictly increase in x.
///
/// # Errors
///
/// - [`LayoutError::InvalidChainLength`] if `sites` is empty or longer than
///   [`MAX_CHAIN_LENGTH`].
/// - [`LayoutError::InvalidLegCount`] if a site exceeds the per-side leg limit.
/// - [`LayoutError::BondMismatch`] if neighbours disagree on a bond.
/// - [`LayoutError::InvalidDimension`] for unusable overrides or gap.
pub fn layout_chain(
    sites: &[LegCounts],
    options: &ChainOptions,
    defaults: &Defaults,
    placement: Placement,
) -> Result<ChainGeometry, LayoutError> {
    let base_name = options.base_name();
    let owner = base_name.to_string();

    check_chain_length(&owner, sites.len())?;
    for (index, counts) in sites.iter().enumerate() {
        counts
            .validate()
            .map_err(|err| LayoutError::invalid_leg_count(options.node_name(index + 1), err))?;
    }
    options.node.validate(&owner)?;
    let gap = options.gap(defaults);
    check_non_negative(&owner, "gap", gap)?;
    validate_bonds(options, sites)?;

    let mut nodes: Vec<NodeGeometry> = Vec::with_capacity(sites.len());
    for (index, &counts) in sites.iter().enumerate() {
        let size = options.node.size(counts, defaults);
        let center = match nodes.last() {
            Some(previous) => previous
                .center()
                .translate(previous.bounds().width() / 2.0 + gap + size.width() / 2.0, 0.0),
            None => options.node.center().unwrap_or_else(|| {
                placement.center_for(size, counts, options.node.leg_length(Side::West, defaults))
            }),
        };
        nodes.push(build_node(
            options.node_name(index + 1),
            counts,
            center,
            size,
            &options.node,
            defaults,
        ));
    }

    let bonds: Vec<Bond> = nodes.windows(2).map(|pair| connect(&pair[0], &pair[1])).collect();

    debug!(
        name:% = base_name,
        length = nodes.len(),
        bonds = bonds.len(),
        gap = gap;
        "Laid out chain"
    );

    Ok(ChainGeometry {
        base_name,
        nodes,
        bonds,
    })
}

fn connect(left: &NodeGeometry, right: &NodeGeometry) -> Bond {
    let strands = left
        .legs_on(Side::East)
        .zip(right.legs_on(Side::West))
        .map(|(east, west)| Strand {
            ordinal: east.ordinal(),
            from: east.inner(),
            to: west.inner(),
        })
        .collect();

    Bond {
        left: left.name(),
        right: right.name(),
        strands,
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn origin() -> Placement {
        Placement::Center(Point::new(0.0, 0.0))
    }

    fn uniform(length: usize, counts: LegCounts) -> Vec<LegCounts> {
        vec![counts; length]
    }

    #[test]
    fn test_three_site_chain() {
        let chain = layout_chain(
            &uniform(3, LegCounts::uniform(1)),
            &ChainOptions::new("A"),
            &Defaults::default(),
            origin(),
        )
        .unwrap();

        let names: Vec<String> = chain.nodes().iter().map(|n| n.name().to_string()).collect();
        assert_eq!(names, vec!["A_1", "A_2", "A_3"]);

        assert_eq!(chain.bonds().len(), 2);
        assert_eq!(chain.bonds()[0].left(), "A_1");
        assert_eq!(chain.bonds()[0].right(), "A_2");
        assert_eq!(chain.bonds()[1].left(), "A_2");
        assert_eq!(chain.bonds()[1].right(), "A_3");

        let west: Vec<&Leg> = chain.dangling_west().collect();
        let east: Vec<&Leg> = chain.dangling_east().collect();
        assert_eq!(west.len(), 1);
        assert_eq!(east.len(), 1);
        assert_eq!(west[0].inner(), chain.nodes()[0].leg(Side::West, 1).unwrap().inner());
        assert_eq!(east[0].inner(), chain.nodes()[2].leg(Side::East, 1).unwrap().inner());
    }

    #[test]
    fn test_sites_are_spaced_by_width_and_gap() {
        let chain = layout_chain(
            &uniform(3, LegCounts::uniform(1)),
            &ChainOptions::new("spaced").with_gap(0.5),
            &Defaults::default(),
            origin(),
        )
        .unwrap();

        let xs: Vec<f32> = chain.nodes().iter().map(|n| n.center().x()).collect();
        assert_eq!(xs, vec![0.0, 3.5, 7.0]);
    }

    #[test]
    fn test_bond_strand_joins_inner_points() {
        let chain = layout_chain(
            &uniform(2, LegCounts::new(0, 0, 2, 2)),
            &ChainOptions::new("strands"),
            &Defaults::default(),
            origin(),
        )
        .unwrap();

        let bond = chain.bond_after(0).unwrap();
        assert_eq!(bond.strands().len(), 2);
        for strand in bond.strands() {
            let east = chain.nodes()[0].leg(Side::East, strand.ordinal()).unwrap();
            let west = chain.nodes()[1].leg(Side::West, strand.ordinal()).unwrap();
            assert_eq!(strand.from(), east.inner());
            assert_eq!(strand.to(), west.inner());
        }
        assert_approx_eq!(f32, bond.strands()[0].from().distance(bond.strands()[0].to()), 1.0);
    }

    #[test]
    fn test_mismatched_bond_fails() {
        let err = layout_chain(
            &uniform(2, LegCounts::new(0, 0, 1, 2)),
            &ChainOptions::new("mismatch"),
            &Defaults::default(),
            origin(),
        )
        .unwrap_err();

        assert_eq!(
            err,
            LayoutError::BondMismatch {
                left: "mismatch_1".to_string(),
                right: "mismatch_2".to_string(),
                east: 2,
                west: 1,
            }
        );
    }

    #[test]
    fn test_empty_chain_fails() {
        let err = layout_chain(&[], &ChainOptions::new("empty"), &Defaults::default(), origin())
            .unwrap_err();
        assert!(matches!(err, LayoutError::InvalidChainLength { length: 0, .. }));
    }

    #[test]
    fn test_chain_length_limit() {
        let at_limit = uniform(MAX_CHAIN_LENGTH, LegCounts::new(0, 0, 1, 1));
        let chain = layout_chain(
            &at_limit,
            &ChainOptions::new("long"),
            &Defaults::default(),
            origin(),
        )
        .unwrap();
        assert_eq!(chain.len(), MAX_CHAIN_LENGTH);

        let too_long = uniform(MAX_CHAIN_LENGTH + 1, LegCounts::default());
        let err = layout_chain(
            &too_long,
            &ChainOptions::new("too_long"),
            &Defaults::default(),
            origin(),
        )
        .unwrap_err();
        assert!(matches!(err, LayoutError::InvalidChainLength { .. }));

        let err = check_chain_length("huge", usize::MAX).unwrap_err();
        assert_eq!(
            err,
            LayoutError::InvalidChainLength {
                name: "huge".to_string(),
                length: i64::MAX,
            }
        );
    }

    #[test]
    fn test_oversized_site_legs_name_the_site() {
        let sites = [LegCounts::uniform(1), LegCounts::new(usize::MAX, 0, 1, 1)];
        let err = layout_chain(
            &sites,
            &ChainOptions::new("heavy"),
            &Defaults::default(),
            origin(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            LayoutError::InvalidLegCount { ref owner, .. } if owner == "heavy_2"
        ));
    }

    #[test]
    fn test_single_site_keeps_both_ends() {
        let chain = layout_chain(
            &[LegCounts::new(1, 0, 2, 3)],
            &ChainOptions::new("single"),
            &Defaults::default(),
            origin(),
        )
        .unwrap();

        assert!(chain.bonds().is_empty());
        assert_eq!(chain.dangling_west().count(), 2);
        assert_eq!(chain.dangling_east().count(), 3);
        assert_eq!(chain.dangling_legs().len(), 5);
    }

    #[test]
    fn test_non_uniform_sites() {
        let sites = [
            LegCounts::new(1, 0, 0, 1),
            LegCounts::new(5, 0, 1, 1),
            LegCounts::new(1, 0, 1, 0),
        ];
        let chain = layout_chain(
            &sites,
            &ChainOptions::new("mixed"),
            &Defaults::default(),
            origin(),
        )
        .unwrap();

        assert_eq!(chain.nodes()[1].bounds().width(), 5.0);
        // 3/2 + 1 + 5/2
        assert_eq!(chain.nodes()[1].center().x(), 5.0);
        // 5 + 5/2 + 1 + 3/2
        assert_eq!(chain.nodes()[2].center().x(), 10.0);
        assert_eq!(chain.dangling_legs().len(), 0);
    }

    #[test]
    fn test_left_edge_placement_starts_at_edge() {
        let chain = layout_chain(
            &uniform(2, LegCounts::uniform(1)),
            &ChainOptions::new("edge"),
            &Defaults::default(),
            Placement::LeftEdge(Point::new(1.0, 4.0)),
        )
        .unwrap();

        assert_eq!(chain.extent().min_x(), 1.0);
        assert_eq!(chain.nodes()[0].center().y(), 4.0);
    }
}
