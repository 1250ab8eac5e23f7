//! Declarative diagram descriptions.
//!
//! A [`DiagramDescription`] is the serde model of a whole diagram: optional
//! layout defaults followed by an ordered list of elements. The CLI reads it
//! from TOML:
//!
//! ```toml
//! [defaults]
//! node_gap = 1.5
//!
//! [[element]]
//! kind = "node"
//! name = "rho"
//! legs = { north = 3, south = 3, west = 1, east = 1 }
//!
//! [[element]]
//! kind = "chain"
//! name = "A"
//! length = 4
//! legs = { north = 1, west = 1, east = 1 }
//!
//! [[element.sites]]
//! index = 2
//! legs = { north = 2 }
//! ```
//!
//! Counts, lengths and indices arrive as signed numbers and are validated
//! when the description is applied, so a bad value becomes a
//! [`LayoutError`] naming the element instead of a parse failure. Unknown
//! keys are parse failures, so a misspelt option is never silently dropped.

use log::debug;
use serde::Deserialize;

use tensordraw_core::{
    geometry::Point,
    leg::{LegCounts, Side, SpacingPolicy},
};

use crate::{
    config::DefaultsOverride,
    error::LayoutError,
    layout::{ChainOptions, MAX_CHAIN_LENGTH, NodeOptions},
    session::Session,
};

/// A complete diagram request.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiagramDescription {
    /// Overrides applied on top of the configured defaults
    pub defaults: DefaultsOverride,
    /// Elements in placement order
    #[serde(rename = "element")]
    pub elements: Vec<ElementDescription>,
}

impl DiagramDescription {
    /// Merges the description defaults into `session` and lays out every
    /// element in order.
    ///
    /// Stops at the first failing element. Elements laid out before it stay
    /// published.
    ///
    /// # Errors
    ///
    /// Returns the [`LayoutError`] of the first element that fails.
    pub fn apply(&self, session: &mut Session) -> Result<(), LayoutError> {
        let defaults = session.defaults().merged(&self.defaults);
        session.set_defaults(defaults);

        for element in &self.elements {
            element.apply(session)?;
        }
        debug!(elements = self.elements.len(); "Applied diagram description");
        Ok(())
    }
}

/// One `[[element]]` entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ElementDescription {
    Node(NodeDescription),
    Chain(ChainDescription),
}

impl ElementDescription {
    pub fn name(&self) -> &str {
        match self {
            Self::Node(node) => &node.name,
            Self::Chain(chain) => &chain.name,
        }
    }

    /// Lays this element out in `session`.
    ///
    /// # Errors
    ///
    /// Returns a [`LayoutError`] for invalid values or a rejected layout.
    pub fn apply(&self, session: &mut Session) -> Result<(), LayoutError> {
        match self {
            Self::Node(node) => node.apply(session),
            Self::Chain(chain) => chain.apply(session),
        }
    }
}

/// Per-side leg counts. Missing sides keep the base value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LegsDescription {
    pub north: Option<i64>,
    pub south: Option<i64>,
    pub west: Option<i64>,
    pub east: Option<i64>,
}

impl LegsDescription {
    fn get(&self, side: Side) -> Option<i64> {
        match side {
            Side::North => self.north,
            Side::South => self.south,
            Side::West => self.west,
            Side::East => self.east,
        }
    }

    /// Replaces every count of `base` this description sets.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidLegCount`] for a negative count.
    pub fn resolve(&self, base: LegCounts, owner: &str) -> Result<LegCounts, LayoutError> {
        let signed = |side: Side| {
            self.get(side)
                .unwrap_or_else(|| i64::try_from(base.get(side)).unwrap_or(i64::MAX))
        };
        LegCounts::try_from_signed(
            signed(Side::North),
            signed(Side::South),
            signed(Side::West),
            signed(Side::East),
        )
        .map_err(|err| LayoutError::invalid_leg_count(owner, err))
    }
}

/// Box and leg overrides shared by nodes and chains.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShapeDescription {
    /// Center of the node, or of the first chain site, as `[x, y]`
    pub at: Option<[f32; 2]>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub horizontal_leg_length: Option<f32>,
    pub vertical_leg_length: Option<f32>,
    pub spacing: Option<SpacingPolicy>,
}

impl ShapeDescription {
    pub fn node_options(&self) -> NodeOptions {
        let mut options = NodeOptions::new();
        if let Some([x, y]) = self.at {
            options = options.with_center(Point::new(x, y));
        }
        if let Some(width) = self.width {
            options = options.with_width(width);
        }
        if let Some(height) = self.height {
            options = options.with_height(height);
        }
        if let Some(length) = self.horizontal_leg_length {
            options = options.with_horizontal_leg_length(length);
        }
        if let Some(length) = self.vertical_leg_length {
            options = options.with_vertical_leg_length(length);
        }
        if let Some(spacing) = self.spacing {
            options = options.with_spacing(spacing);
        }
        options
    }
}

/// `kind = "node"`: a single tensor.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeDescription {
    pub name: String,
    #[serde(default)]
    pub legs: LegsDescription,
    pub at: Option<[f32; 2]>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub horizontal_leg_length: Option<f32>,
    pub vertical_leg_length: Option<f32>,
    pub spacing: Option<SpacingPolicy>,
}

impl NodeDescription {
    pub fn shape(&self) -> ShapeDescription {
        ShapeDescription {
            at: self.at,
            width: self.width,
            height: self.height,
            horizontal_leg_length: self.horizontal_leg_length,
            vertical_leg_length: self.vertical_leg_length,
            spacing: self.spacing,
        }
    }

    fn apply(&self, session: &mut Session) -> Result<(), LayoutError> {
        let counts = self.legs.resolve(LegCounts::default(), &self.name)?;
        session.layout_node(&self.name, counts, &self.shape().node_options())?;
        Ok(())
    }
}

/// `kind = "chain"`: a matrix product array of `length` sites.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChainDescription {
    /// Base name; site `i` is named `{name}_{i}`
    pub name: String,
    pub length: i64,
    /// Leg counts shared by every site
    #[serde(default)]
    pub legs: LegsDescription,
    pub gap: Option<f32>,
    /// Center of the first site
    pub at: Option<[f32; 2]>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub horizontal_leg_length: Option<f32>,
    pub vertical_leg_length: Option<f32>,
    pub spacing: Option<SpacingPolicy>,
    /// Per-site leg count overrides
    #[serde(default)]
    pub sites: Vec<SiteDescription>,
}

/// Leg counts for one chain site, by 1-based index.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteDescription {
    pub index: i64,
    #[serde(default)]
    pub legs: LegsDescription,
}

impl ChainDescription {
    /// Leg counts of every site, overrides applied in order.
    ///
    /// # Errors
    ///
    /// - [`LayoutError::InvalidChainLength`] if `length` is outside
    ///   `1..=MAX_CHAIN_LENGTH`.
    /// - [`LayoutError::SiteOutOfRange`] for an override outside `1..=length`.
    /// - [`LayoutError::InvalidLegCount`] for a negative count.
    pub fn site_counts(&self) -> Result<Vec<LegCounts>, LayoutError> {
        let length = usize::try_from(self.length)
            .ok()
            .filter(|length| (1..=MAX_CHAIN_LENGTH).contains(length))
            .ok_or_else(|| LayoutError::InvalidChainLength {
                name: self.name.clone(),
                length: self.length,
            })?;

        let uniform = self.legs.resolve(LegCounts::default(), &self.name)?;
        let mut sites = vec![uniform; length];

        for site in &self.sites {
            let slot = usize::try_from(site.index)
                .ok()
                .filter(|index| (1..=length).contains(index))
                .ok_or_else(|| LayoutError::SiteOutOfRange {
                    name: self.name.clone(),
                    index: site.index,
                    length,
                })?
                - 1;
            let owner = format!("{}_{}", self.name, site.index);
            sites[slot] = site.legs.resolve(sites[slot], &owner)?;
        }
        Ok(sites)
    }

    pub fn shape(&self) -> ShapeDescription {
        ShapeDescription {
            at: self.at,
            width: self.width,
            height: self.height,
            horizontal_leg_length: self.horizontal_leg_length,
            vertical_leg_length: self.vertical_leg_length,
            spacing: self.spacing,
        }
    }

    pub fn chain_options(&self) -> ChainOptions {
        let options = ChainOptions::new(&self.name).with_node_options(self.shape().node_options());
        match self.gap {
            Some(gap) => options.with_gap(gap),
            None => options,
        }
    }

    fn apply(&self, session: &mut Session) -> Result<(), LayoutError> {
        let sites = self.site_counts()?;
        session.layout_chain_sites(&sites, &self.chain_options())?;
        Ok(())
    }
}
