//! Build session: the unit of one diagram build.
//!
//! A [`Session`] owns the layout [`Defaults`], the [`AnchorRegistry`], the
//! placement cursor and every laid-out item. Layout calls run one after the
//! other and are atomic: a call either publishes all of its anchors or none.
//!
//! # Example
//!
//! ```
//! # use tensordraw::session::Session;
//! # use tensordraw::config::Defaults;
//! # use tensordraw::layout::{ChainOptions, NodeOptions};
//! # use tensordraw::leg::{LegCounts, Side};
//! # use tensordraw::registry::AnchorKey;
//! # use tensordraw::identifier::Id;
//! let mut session = Session::new(Defaults::default());
//!
//! session.layout_node("rho", LegCounts::new(3, 3, 1, 1), &NodeOptions::new())?;
//! session.layout_chain(3, LegCounts::uniform(1), &ChainOptions::new("A"))?;
//!
//! let tip = session.resolve(&AnchorKey::outer(Id::new("A_1"), Side::West, 1))?;
//! assert!(tip.x() > 0.0);
//!
//! let diagram = session.finish();
//! assert!(!diagram.commands().is_empty());
//! # Ok::<(), tensordraw::error::LayoutError>(())
//! ```

use std::slice;

use log::{debug, info, warn};

use tensordraw_core::{
    geometry::{Bounds, Point},
    identifier::Id,
    leg::LegCounts,
};

use crate::{
    config::Defaults,
    emit::{DrawCommand, Emitter},
    error::LayoutError,
    layout::{
        ChainGeometry, ChainOptions, NodeGeometry, NodeOptions, Placement, chain, node,
    },
    registry::{AnchorKey, AnchorRegistry, check_name},
};

/// One laid-out element of a diagram.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutItem {
    Node(NodeGeometry),
    Chain(ChainGeometry),
}

impl LayoutItem {
    /// Tensors of this item in layout order.
    pub fn nodes(&self) -> &[NodeGeometry] {
        match self {
            Self::Node(node) => slice::from_ref(node),
            Self::Chain(chain) => chain.nodes(),
        }
    }

    /// Bounds of every box and leg tip.
    pub fn extent(&self) -> Bounds {
        match self {
            Self::Node(node) => node.extent(),
            Self::Chain(chain) => chain.extent(),
        }
    }
}

/// State of one diagram build.
#[derive(Debug, Clone, Default)]
pub struct Session {
    defaults: Defaults,
    registry: AnchorRegistry,
    items: Vec<LayoutItem>,
    cursor: Point,
}

impl Session {
    pub fn new(defaults: Defaults) -> Self {
        Self {
            defaults,
            ..Self::default()
        }
    }

    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    /// Mutable access to the defaults used by later layout calls.
    pub fn defaults_mut(&mut self) -> &mut Defaults {
        &mut self.defaults
    }

    pub fn set_defaults(&mut self, defaults: Defaults) {
        self.defaults = defaults;
    }

    pub fn registry(&self) -> &AnchorRegistry {
        &self.registry
    }

    pub fn items(&self) -> &[LayoutItem] {
        &self.items
    }

    /// Left edge where the next item without an explicit center goes.
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// Looks up a published anchor.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::NotFound`] if nothing was published under `key`.
    pub fn resolve(&self, key: &AnchorKey) -> Result<Point, LayoutError> {
        self.registry.resolve(key)
    }

    /// Lays out tensor `name` and publishes its anchors.
    ///
    /// # Errors
    ///
    /// - [`LayoutError::InvalidName`] if `name` is empty or contains `.`.
    /// - [`LayoutError::NameCollision`] if `name` is already used in this session.
    /// - [`LayoutError::InvalidLegCount`] if a side has too many legs.
    /// - [`LayoutError::InvalidDimension`] for unusable defaults or overrides.
    pub fn layout_node(
        &mut self,
        name: &str,
        counts: LegCounts,
        options: &NodeOptions,
    ) -> Result<NodeGeometry, LayoutError> {
        let result =
            check_name(name).and_then(|()| self.try_layout_node(Id::new(name), counts, options));
        if let Err(err) = &result {
            warn!(name = name, err:% = err; "Tensor layout rejected");
        }
        result
    }

    fn try_layout_node(
        &mut self,
        id: Id,
        counts: LegCounts,
        options: &NodeOptions,
    ) -> Result<NodeGeometry, LayoutError> {
        self.defaults.validate()?;
        self.ensure_unused(id)?;

        let geometry = node::layout_node(
            id,
            counts,
            options,
            &self.defaults,
            Placement::LeftEdge(self.cursor),
        )?;
        let published = self.registry.register_all(geometry.anchors())?;
        debug!(name:% = id, anchors = published; "Published tensor anchors");

        self.commit(LayoutItem::Node(geometry.clone()));
        Ok(geometry)
    }

    /// Lays out a chain of `length` identical sites and publishes their anchors.
    ///
    /// # Errors
    ///
    /// - [`LayoutError::InvalidChainLength`] if `length` is outside
    ///   `1..=MAX_CHAIN_LENGTH`.
    /// - Otherwise see [`Session::layout_chain_sites`].
    pub fn layout_chain(
        &mut self,
        length: usize,
        counts: LegCounts,
        options: &ChainOptions,
    ) -> Result<ChainGeometry, LayoutError> {
        if let Err(err) = chain::check_chain_length(&options.base_name().to_string(), length) {
            warn!(name:% = options.base_name(), err:% = err; "Chain layout rejected");
            return Err(err);
        }
        self.layout_chain_sites(&vec![counts; length], options)
    }

    /// Lays out a chain with one [`LegCounts`] per site and publishes the
    /// anchors of every site.
    ///
    /// Nothing is published unless the whole chain is valid.
    ///
    /// # Errors
    ///
    /// - [`LayoutError::InvalidName`] if the base name is empty or contains `.`.
    /// - [`LayoutError::InvalidChainLength`] if `sites` is empty or too long.
    /// - [`LayoutError::InvalidLegCount`] if a site has too many legs on a side.
    /// - [`LayoutError::BondMismatch`] if neighbouring sites disagree on a bond.
    /// - [`LayoutError::NameCollision`] if a site name is already used.
    /// - [`LayoutError::InvalidDimension`] for unusable defaults or overrides.
    pub fn layout_chain_sites(
        &mut self,
        sites: &[LegCounts],
        options: &ChainOptions,
    ) -> Result<ChainGeometry, LayoutError> {
        let base_name = options.base_name().to_string();
        let result =
            check_name(&base_name).and_then(|()| self.try_layout_chain(sites, options));
        if let Err(err) = &result {
            warn!(name:% = options.base_name(), err:% = err; "Chain layout rejected");
        }
        result
    }

    fn try_layout_chain(
        &mut self,
        sites: &[LegCounts],
        options: &ChainOptions,
    ) -> Result<ChainGeometry, LayoutError> {
        self.defaults.validate()?;

        let geometry = chain::layout_chain(
            sites,
            options,
            &self.defaults,
            Placement::LeftEdge(self.cursor),
        )?;
        for site in geometry.nodes() {
            self.ensure_unused(site.name())?;
        }
        let published = self.registry.register_all(geometry.anchors())?;
        debug!(
            name:% = options.base_name(),
            sites = geometry.len(),
            anchors = published;
            "Published chain anchors"
        );

        self.commit(LayoutItem::Chain(geometry.clone()));
        Ok(geometry)
    }

    fn ensure_unused(&self, id: Id) -> Result<(), LayoutError> {
        if self.registry.contains_owner(id) {
            return Err(LayoutError::NameCollision {
                name: id.to_string(),
            });
        }
        Ok(())
    }

    fn commit(&mut self, item: LayoutItem) {
        let right_edge = item.extent().max_x() + self.defaults.node_gap();
        self.cursor = self.cursor.with_x(self.cursor.x().max(right_edge));
        self.items.push(item);
    }

    /// Draw commands for everything laid out so far.
    pub fn emit(&self) -> Vec<DrawCommand> {
        Emitter::new(&self.items, &self.registry).emit()
    }

    /// Clears the registry, items and cursor. Defaults are kept.
    pub fn reset(&mut self) {
        self.registry.reset();
        self.items.clear();
        self.cursor = Point::default();
    }

    /// Ends the build, producing its draw commands and anchors.
    pub fn finish(self) -> Diagram {
        let commands = self.emit();
        let bounds = self
            .items
            .iter()
            .map(LayoutItem::extent)
            .reduce(|acc, extent| acc.merge(&extent))
            .unwrap_or_default();

        info!(
            items = self.items.len(),
            commands = commands.len(),
            anchors = self.registry.len();
            "Diagram built"
        );

        Diagram {
            commands,
            registry: self.registry,
            bounds,
        }
    }
}

/// A finished diagram: draw commands plus the anchors published while
/// building it.
#[derive(Debug, Clone)]
pub struct Diagram {
    commands: Vec<DrawCommand>,
    registry: AnchorRegistry,
    bounds: Bounds,
}

impl Diagram {
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Anchors for label placement.
    pub fn registry(&self) -> &AnchorRegistry {
        &self.registry
    }

    /// Bounds of every box and leg tip.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}
