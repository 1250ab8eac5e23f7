//! Turns laid-out items into an ordered list of draw commands.
//!
//! The order is fixed so that the same build always produces the same
//! output:
//!
//! 1. one [`DrawCommand::Box`] per tensor, in layout order;
//! 2. legs and bonds, per tensor, per side in [`Side::ALL`] order, then by
//!    ordinal;
//! 3. one [`DrawCommand::Anchor`] per registry entry, in registration order.
//!
//! A bond is drawn once, as a [`LineKind::Bond`] line from the east leg of
//! the left tensor to the west leg of the right tensor. The west legs of the
//! right tensor are not drawn again.

use log::debug;

use tensordraw_core::{
    geometry::{Bounds, Point},
    identifier::Id,
    leg::Side,
};

use crate::{
    layout::{Bond, NodeGeometry},
    registry::AnchorRegistry,
    session::LayoutItem,
};

/// What a line represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// A leg owned by a single tensor
    Leg,
    /// A contracted index joining two tensors
    Bond,
}

/// A backend-neutral drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Box { owner: Id, bounds: Bounds },
    Line { from: Point, to: Point, kind: LineKind },
    Anchor { name: String, point: Point },
}

impl DrawCommand {
    /// Area the command covers, in diagram units.
    pub fn bounds(&self) -> Bounds {
        match self {
            Self::Box { bounds, .. } => *bounds,
            Self::Line { from, to, .. } => Bounds::from_corners(*from, *to),
            Self::Anchor { point, .. } => Bounds::from_corners(*point, *point),
        }
    }
}

/// Produces [`DrawCommand`]s for a set of items and their anchors.
pub struct Emitter<'a> {
    items: &'a [LayoutItem],
    registry: &'a AnchorRegistry,
}

impl<'a> Emitter<'a> {
    pub fn new(items: &'a [LayoutItem], registry: &'a AnchorRegistry) -> Self {
        Self { items, registry }
    }

    pub fn emit(&self) -> Vec<DrawCommand> {
        let mut commands = Vec::new();

        for node in self.items.iter().flat_map(LayoutItem::nodes) {
            commands.push(DrawCommand::Box {
                owner: node.name(),
                bounds: node.bounds(),
            });
        }

        for item in self.items {
            match item {
                LayoutItem::Node(node) => emit_lines(node, false, None, &mut commands),
                LayoutItem::Chain(chain) => {
                    for (index, node) in chain.nodes().iter().enumerate() {
                        emit_lines(node, index > 0, chain.bond_after(index), &mut commands);
                    }
                }
            }
        }

        commands.extend(self.registry.iter().map(|(key, point)| DrawCommand::Anchor {
            name: key.to_string(),
            point: *point,
        }));

        debug!(commands = commands.len(); "Emitted draw commands");
        commands
    }
}

/// Legs of one tensor. West legs fed by an incoming bond are skipped and
/// east legs feeding an outgoing bond are drawn as bond strands.
fn emit_lines(
    node: &NodeGeometry,
    bonded_west: bool,
    east_bond: Option<&Bond>,
    commands: &mut Vec<DrawCommand>,
) {
    for side in Side::ALL {
        if side == Side::West && bonded_west {
            continue;
        }
        match east_bond {
            Some(bond) if side == Side::East => {
                commands.extend(bond.strands().iter().map(|strand| DrawCommand::Line {
                    from: strand.from(),
                    to: strand.to(),
                    kind: LineKind::Bond,
                }));
            }
            _ => {
                commands.extend(node.legs_on(side).map(|leg| DrawCommand::Line {
                    from: leg.inner(),
                    to: leg.outer(),
                    kind: LineKind::Leg,
                }));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use tensordraw_core::leg::LegCounts;

    use super::*;
    use crate::{
        layout::{ChainOptions, NodeOptions},
        session::Session,
    };

    fn count_lines(commands: &[DrawCommand], wanted: LineKind) -> usize {
        commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::Line { kind, .. } if *kind == wanted))
            .count()
    }

    #[test]
    fn test_single_node_order() {
        let mut session = Session::default();
        session
            .layout_node("emit_rho", LegCounts::new(3, 3, 1, 1), &NodeOptions::new())
            .unwrap();

        let commands = session.emit();

        assert_eq!(commands.len(), 1 + 8 + 17);
        assert!(matches!(commands[0], DrawCommand::Box { .. }));
        assert!(commands[1..9]
            .iter()
            .all(|command| matches!(command, DrawCommand::Line { kind: LineKind::Leg, .. })));
        assert!(commands[9..]
            .iter()
            .all(|command| matches!(command, DrawCommand::Anchor { .. })));

        // North legs come first, left to right
        let DrawCommand::Line { from, .. } = commands[1] else {
            panic!("expected a line");
        };
        assert!(from.y() < 0.0);
        let DrawCommand::Anchor { ref name, .. } = commands[9] else {
            panic!("expected an anchor");
        };
        assert_eq!(name, "emit_rho");
    }

    #[test]
    fn test_chain_bonds_drawn_once() {
        let mut session = Session::default();
        session
            .layout_chain(3, LegCounts::uniform(1), &ChainOptions::new("emit_A"))
            .unwrap();

        let commands = session.emit();

        let boxes = commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::Box { .. }))
            .count();
        assert_eq!(boxes, 3);
        assert_eq!(count_lines(&commands, LineKind::Bond), 2);
        // 3 north + 3 south + dangling west + dangling east
        assert_eq!(count_lines(&commands, LineKind::Leg), 8);
    }

    #[test]
    fn test_bond_joins_east_and_west_tips() {
        let mut session = Session::default();
        let chain = session
            .layout_chain(2, LegCounts::new(0, 0, 2, 2), &ChainOptions::new("emit_B"))
            .unwrap();

        let commands = session.emit();
        let bonds: Vec<(Point, Point)> = commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Line {
                    from,
                    to,
                    kind: LineKind::Bond,
                } => Some((*from, *to)),
                _ => None,
            })
            .collect();

        let left = &chain.nodes()[0];
        let right = &chain.nodes()[1];
        assert_eq!(bonds.len(), 2);
        for (ordinal, (from, to)) in bonds.iter().enumerate() {
            assert_eq!(*from, left.leg(Side::East, ordinal + 1).unwrap().inner());
            assert_eq!(*to, right.leg(Side::West, ordinal + 1).unwrap().inner());
        }
    }

    #[test]
    fn test_emit_is_deterministic() {
        let build = || {
            let mut session = Session::default();
            session
                .layout_node("emit_det_t", LegCounts::new(2, 1, 0, 1), &NodeOptions::new())
                .unwrap();
            session
                .layout_chain(4, LegCounts::new(1, 2, 1, 1), &ChainOptions::new("emit_det_C"))
                .unwrap();
            session.emit()
        };

        assert_eq!(build(), build());
    }

    #[test]
    fn test_empty_session_emits_nothing() {
        assert!(Session::default().emit().is_empty());
    }
}
