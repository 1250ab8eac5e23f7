//! SVG export backend.
//!
//! Diagram units are scaled by [`StyleConfig::scale`] and shifted so that the
//! padded content starts at the document origin. Output is grouped into four
//! layers, bottom to top: `tensors`, `legs`, `bonds` and `anchors`.

use log::debug;
use svg::{
    Document,
    node::element::{Circle, Group, Line, Rectangle},
};

use tensordraw_core::geometry::{Bounds, Insets, Point};

use super::{Error, Exporter, check_finite, commands_bounds};
use crate::{
    config::StyleConfig,
    emit::{DrawCommand, LineKind},
};

const STROKE_COLOR: &str = "black";
const BOX_FILL: &str = "white";
const ANCHOR_RADIUS: f32 = 2.0;

/// Renders draw commands as an SVG document.
#[derive(Debug, Clone, Default)]
pub struct SvgExporter {
    style: StyleConfig,
}

impl SvgExporter {
    pub fn new(style: StyleConfig) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Builds the document for `commands`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] for non-finite coordinates or an unusable
    /// scale.
    pub fn render_document(&self, commands: &[DrawCommand]) -> Result<Document, Error> {
        check_finite(commands)?;
        let scale = self.style.scale();
        if !(scale.is_finite() && scale > 0.0) {
            return Err(Error::Render(format!("invalid scale {scale}")));
        }

        let content = commands_bounds(commands)
            .unwrap_or_default()
            .add_padding(Insets::uniform(self.style.padding().max(0.0)));
        let canvas = Canvas { content, scale };
        let width = content.width() * scale;
        let height = content.height() * scale;

        let mut tensors = Group::new().set("id", "tensors");
        let mut legs = Group::new().set("id", "legs");
        let mut bonds = Group::new().set("id", "bonds");
        let mut anchors = Group::new().set("id", "anchors");

        for command in commands {
            match command {
                DrawCommand::Box { owner, bounds } => {
                    let rectangle = self
                        .rectangle(&canvas, *bounds)
                        .set("data-tensor", owner.to_string());
                    tensors = tensors.add(rectangle);
                }
                DrawCommand::Line { from, to, kind } => {
                    let line = self.line(&canvas, *from, *to);
                    match kind {
                        LineKind::Leg => legs = legs.add(line),
                        LineKind::Bond => bonds = bonds.add(line),
                    }
                }
                DrawCommand::Anchor { name, point } => {
                    anchors = anchors.add(self.anchor(&canvas, name, *point));
                }
            }
        }

        debug!(
            width = width,
            height = height,
            commands = commands.len();
            "Rendered SVG document"
        );

        Ok(Document::new()
            .set("viewBox", format!("0 0 {width} {height}"))
            .set("width", width)
            .set("height", height)
            .add(tensors)
            .add(legs)
            .add(bonds)
            .add(anchors))
    }

    fn rectangle(&self, canvas: &Canvas, bounds: Bounds) -> Rectangle {
        let corner = canvas.map(bounds.min_point());
        Rectangle::new()
            .set("x", corner.x())
            .set("y", corner.y())
            .set("width", bounds.width() * canvas.scale)
            .set("height", bounds.height() * canvas.scale)
            .set("fill", BOX_FILL)
            .set("stroke", STROKE_COLOR)
            .set("stroke-width", self.style.stroke_width())
    }

    fn line(&self, canvas: &Canvas, from: Point, to: Point) -> Line {
        let from = canvas.map(from);
        let to = canvas.map(to);
        Line::new()
            .set("x1", from.x())
            .set("y1", from.y())
            .set("x2", to.x())
            .set("y2", to.y())
            .set("stroke", STROKE_COLOR)
            .set("stroke-width", self.style.stroke_width())
    }

    fn anchor(&self, canvas: &Canvas, name: &str, point: Point) -> Circle {
        let center = canvas.map(point);
        let circle = Circle::new()
            .set("cx", center.x())
            .set("cy", center.y())
            .set("data-anchor", name);
        if self.style.show_anchors() {
            circle.set("r", ANCHOR_RADIUS).set("fill", STROKE_COLOR)
        } else {
            circle.set("r", 0).set("fill", "none")
        }
    }
}

impl Exporter for SvgExporter {
    fn export(&self, commands: &[DrawCommand]) -> Result<String, Error> {
        self.render_document(commands).map(|document| document.to_string())
    }
}

/// Maps diagram coordinates into document pixels.
struct Canvas {
    content: Bounds,
    scale: f32,
}

impl Canvas {
    fn map(&self, point: Point) -> Point {
        point.sub_point(self.content.min_point()).scale(self.scale)
    }
}
