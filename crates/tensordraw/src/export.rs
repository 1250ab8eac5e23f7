//! Export of draw commands to output formats.
//!
//! # Pipeline Position
//!
//! ```text
//! Leg counts + options
//!     ↓ layout
//! Geometry + anchor registry
//!     ↓ emit
//! Draw commands
//!     ↓ export (this module)
//! Output text
//! ```
//!
//! # Available Backends
//!
//! - [`svg`]: SVG documents via [`svg::SvgExporter`]
//! - [`listing`]: a plain-text command listing via [`listing::ListingExporter`]

pub mod listing;
pub mod svg;

use thiserror::Error;

use tensordraw_core::geometry::Bounds;

use crate::emit::DrawCommand;

/// Abstraction for export backends.
pub trait Exporter {
    /// Renders `commands` to the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if a command cannot be expressed in the
    /// target format.
    fn export(&self, commands: &[DrawCommand]) -> Result<String, Error>;
}

/// Errors that can occur during export.
///
/// Converted into [`TensorDrawError::Export`](crate::error::TensorDrawError::Export)
/// at the crate boundary.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Render error: {0}")]
    Render(String),
}

/// Checks that every coordinate in `commands` is finite.
pub(crate) fn check_finite(commands: &[DrawCommand]) -> Result<(), Error> {
    for command in commands {
        let bounds = command.bounds();
        let finite = [bounds.min_x(), bounds.min_y(), bounds.max_x(), bounds.max_y()]
            .iter()
            .all(|value| value.is_finite());
        if !finite {
            return Err(Error::Render(format!(
                "non-finite coordinate in {command:?}"
            )));
        }
    }
    Ok(())
}

/// Combined bounds of `commands`, or `None` if there are none.
pub(crate) fn commands_bounds(commands: &[DrawCommand]) -> Option<Bounds> {
    commands
        .iter()
        .map(DrawCommand::bounds)
        .reduce(|acc, bounds| acc.merge(&bounds))
}
