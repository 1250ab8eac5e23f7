//! Tensordraw - layout of tensor-network diagrams.
//!
//! Turns tensors (boxes with legs on four sides) and matrix product arrays
//! (left-to-right chains of tensors joined by bonds) into positioned
//! geometry, publishes every leg endpoint as a named anchor, and emits
//! backend-neutral draw commands that can be exported as SVG or as a plain
//! listing.

pub mod config;
pub mod description;
pub mod emit;
pub mod error;
pub mod export;
pub mod layout;
pub mod registry;
pub mod session;

pub use tensordraw_core::{geometry, identifier, leg};

pub use error::{LayoutError, TensorDrawError};
pub use session::{Diagram, Session};

use log::{debug, info};

use config::AppConfig;
use description::DiagramDescription;
use export::{Exporter, listing::ListingExporter, svg::SvgExporter};

/// Builder for laying out and rendering tensor diagrams.
///
/// # Examples
///
/// ```rust
/// use tensordraw::{DiagramBuilder, config::AppConfig, description::DiagramDescription};
///
/// let description: DiagramDescription = Default::default();
///
/// let builder = DiagramBuilder::new(AppConfig::default());
/// let diagram = builder.build(&description)?;
/// let svg = builder.render_svg(&diagram)?;
/// assert!(svg.starts_with("<svg"));
/// # Ok::<(), tensordraw::TensorDrawError>(())
/// ```
#[derive(Debug, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Layout defaults and SVG style
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// A fresh build session seeded with the configured layout defaults.
    pub fn session(&self) -> Session {
        Session::new(self.config.layout().clone())
    }

    /// Lay out every element of `description` in a fresh session.
    ///
    /// # Errors
    ///
    /// Returns `TensorDrawError::Layout` for the first element that cannot be
    /// laid out.
    pub fn build(&self, description: &DiagramDescription) -> Result<Diagram, TensorDrawError> {
        info!(elements = description.elements.len(); "Building diagram");

        let mut session = self.session();
        description.apply(&mut session)?;

        debug!(anchors = session.registry().len(); "Layout finished");
        Ok(session.finish())
    }

    /// Render a built diagram to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns `TensorDrawError::Export` if the diagram cannot be rendered.
    pub fn render_svg(&self, diagram: &Diagram) -> Result<String, TensorDrawError> {
        let exporter = SvgExporter::new(self.config.style().clone());
        let svg = exporter.export(diagram.commands())?;

        info!(bytes = svg.len(); "SVG rendered successfully");
        Ok(svg)
    }

    /// Render a built diagram to a line-per-command listing.
    ///
    /// # Errors
    ///
    /// Returns `TensorDrawError::Export` if the diagram cannot be rendered.
    pub fn render_listing(&self, diagram: &Diagram) -> Result<String, TensorDrawError> {
        let listing = ListingExporter::new().export(diagram.commands())?;

        info!(lines = diagram.commands().len(); "Listing rendered successfully");
        Ok(listing)
    }
}
