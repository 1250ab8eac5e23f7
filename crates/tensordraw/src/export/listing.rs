//! Plain-text listing of draw commands.
//!
//! One line per command, coordinates in diagram units with three decimals:
//!
//! ```text
//! box rho 0.500 -0.500 3.500 0.500
//! leg 1.000 -0.500 1.000 -1.000
//! bond 4.500 0.000 5.500 0.000
//! anchor rho.n1.outer 1.000 -1.000
//! ```
//!
//! Boxes list their minimum then maximum corner; lines list start then end.

use std::fmt::Write;

use super::{Error, Exporter, check_finite};
use crate::emit::{DrawCommand, LineKind};

/// Renders draw commands as a line-per-command text listing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListingExporter;

impl ListingExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for ListingExporter {
    fn export(&self, commands: &[DrawCommand]) -> Result<String, Error> {
        check_finite(commands)?;

        let mut output = String::new();
        for command in commands {
            let line = match command {
                DrawCommand::Box { owner, bounds } => format!(
                    "box {owner} {} {} {} {}",
                    coord(bounds.min_x()),
                    coord(bounds.min_y()),
                    coord(bounds.max_x()),
                    coord(bounds.max_y())
                ),
                DrawCommand::Line { from, to, kind } => {
                    let tag = match kind {
                        LineKind::Leg => "leg",
                        LineKind::Bond => "bond",
                    };
                    format!(
                        "{tag} {} {} {} {}",
                        coord(from.x()),
                        coord(from.y()),
                        coord(to.x()),
                        coord(to.y())
                    )
                }
                DrawCommand::Anchor { name, point } => {
                    format!("anchor {name} {} {}", coord(point.x()), coord(point.y()))
                }
            };
            writeln!(output, "{line}").map_err(|err| Error::Render(err.to_string()))?;
        }
        Ok(output)
    }
}

fn coord(value: f32) -> String {
    let text = format!("{value:.3}");
    // Tiny negatives round to "-0.000"
    if text == "-0.000" {
        "0.000".to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use tensordraw_core::{
        geometry::{Bounds, Point},
        identifier::Id,
        leg::LegCounts,
    };

    use super::*;
    use crate::{layout::NodeOptions, session::Session};

    #[test]
    fn test_line_formats() {
        let commands = vec![
            DrawCommand::Box {
                owner: Id::new("list_box"),
                bounds: Bounds::from_corners(Point::new(0.0, -0.5), Point::new(3.0, 0.5)),
            },
            DrawCommand::Line {
                from: Point::new(1.0, -0.5),
                to: Point::new(1.0, -1.0),
                kind: LineKind::Leg,
            },
            DrawCommand::Line {
                from: Point::new(3.0, 0.0),
                to: Point::new(4.0, 0.0),
                kind: LineKind::Bond,
            },
            DrawCommand::Anchor {
                name: "list_box.n1.outer".to_string(),
                point: Point::new(1.0, -1.0),
            },
        ];

        let output = ListingExporter::new().export(&commands).unwrap();

        let expected = "\
box list_box 0.000 -0.500 3.000 0.500
leg 1.000 -0.500 1.000 -1.000
bond 3.000 0.000 4.000 0.000
anchor list_box.n1.outer 1.000 -1.000
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_negative_zero_normalised() {
        assert_eq!(coord(-0.0), "0.000");
        assert_eq!(coord(-0.0001), "0.000");
        assert_eq!(coord(-0.25), "-0.250");
        assert_eq!(coord(1.0 / 3.0), "0.333");
    }

    #[test]
    fn test_one_line_per_command() {
        let mut session = Session::default();
        session
            .layout_node("list_rho", LegCounts::new(3, 3, 1, 1), &NodeOptions::new())
            .unwrap();
        let commands = session.emit();

        let output = ListingExporter::new().export(&commands).unwrap();

        assert_eq!(output.lines().count(), commands.len());
        assert!(output.lines().next().unwrap().starts_with("box list_rho "));
        assert!(output.contains("anchor list_rho.w1.outer 0.000 0.000"));
    }
}
