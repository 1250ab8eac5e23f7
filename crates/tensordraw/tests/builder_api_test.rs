//! Integration tests for the DiagramBuilder API
//!
//! These tests drive the public API end to end: description in, anchors and
//! rendered output out.

use tensordraw::{
    DiagramBuilder, LayoutError, TensorDrawError,
    config::{AppConfig, Defaults, StyleConfig},
    description::DiagramDescription,
    emit::DrawCommand,
    identifier::Id,
    layout::{ChainOptions, NodeOptions},
    leg::{LegCounts, Side},
    registry::AnchorKey,
};

fn description(source: &str) -> DiagramDescription {
    toml::from_str(source).expect("Failed to parse description")
}

#[test]
fn test_builder_api_exists() {
    let _builder = DiagramBuilder::default();
}

#[test]
fn test_build_and_render_rho() {
    let builder = DiagramBuilder::default();
    let diagram = builder
        .build(&description(
            r#"
            [[element]]
            kind = "node"
            name = "api_rho"
            legs = { north = 3, south = 3, west = 1, east = 1 }
            "#,
        ))
        .expect("Failed to build diagram");

    let center = diagram
        .registry()
        .resolve(&AnchorKey::center(Id::new("api_rho")))
        .unwrap();
    let west_tip = diagram.registry().resolve_name("api_rho.w1.outer").unwrap();
    assert_eq!(west_tip.y(), center.y());

    let svg = builder.render_svg(&diagram).expect("Failed to render");
    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");
    assert!(svg.contains("data-anchor=\"api_rho.n3.outer\""));
}

#[test]
fn test_mps_chain_anchors() {
    let builder = DiagramBuilder::default();
    let diagram = builder
        .build(&description(
            r#"
            [[element]]
            kind = "chain"
            name = "api_A"
            length = 3
            legs = { north = 1, south = 1, west = 1, east = 1 }
            "#,
        ))
        .unwrap();
    let registry = diagram.registry();

    for site in 1..=3 {
        let name = Id::new(&format!("api_A_{site}"));
        assert!(registry.contains_owner(name));
    }
    // Bond endpoints exist for every site, dangling tips only matter at the ends
    let first_west = registry
        .resolve(&AnchorKey::outer(Id::new("api_A_1"), Side::West, 1))
        .unwrap();
    let last_east = registry
        .resolve(&AnchorKey::outer(Id::new("api_A_3"), Side::East, 1))
        .unwrap();
    assert!(first_west.x() < last_east.x());
    assert!(
        registry
            .resolve(&AnchorKey::outer(Id::new("api_A_4"), Side::West, 1))
            .is_err()
    );
}

#[test]
fn test_bond_mismatch_is_layout_error() {
    let builder = DiagramBuilder::default();
    let err = builder
        .build(&description(
            r#"
            [[element]]
            kind = "chain"
            name = "api_bad"
            length = 2
            legs = { west = 1, east = 2 }
            "#,
        ))
        .unwrap_err();

    assert!(matches!(
        err,
        TensorDrawError::Layout(LayoutError::BondMismatch { east: 2, west: 1, .. })
    ));
}

#[test]
fn test_build_is_deterministic() {
    let source = r#"
        [[element]]
        kind = "node"
        name = "api_det_rho"
        legs = { north = 2, south = 2 }

        [[element]]
        kind = "chain"
        name = "api_det_C"
        length = 4
        legs = { north = 1, west = 2, east = 2 }
    "#;
    let builder = DiagramBuilder::default();

    let first = builder.build(&description(source)).unwrap();
    let second = builder.build(&description(source)).unwrap();

    assert_eq!(first.commands(), second.commands());
    assert_eq!(
        builder.render_listing(&first).unwrap(),
        builder.render_listing(&second).unwrap()
    );
}

#[test]
fn test_config_defaults_reach_layout() {
    let mut defaults = Defaults::default();
    defaults.set_tensor_width(8.0);
    let builder = DiagramBuilder::new(AppConfig::new(defaults, StyleConfig::default()));

    let diagram = builder
        .build(&description(
            r#"
            [[element]]
            kind = "node"
            name = "api_cfg"
            "#,
        ))
        .unwrap();

    let DrawCommand::Box { bounds, .. } = diagram.commands()[0] else {
        panic!("first command should be a box");
    };
    assert_eq!(bounds.width(), 8.0);
}

#[test]
fn test_session_api_round_trip() {
    let mut session = DiagramBuilder::default().session();
    let rho = session
        .layout_node("api_sess_rho", LegCounts::new(1, 2, 0, 1), &NodeOptions::new())
        .unwrap();
    let chain = session
        .layout_chain(2, LegCounts::uniform(1), &ChainOptions::new("api_sess_M"))
        .unwrap();

    for (key, point) in rho.anchors().into_iter().chain(chain.anchors()) {
        assert_eq!(session.resolve(&key).unwrap(), point);
    }
    assert!(chain.nodes()[0].center().x() > rho.extent().max_x());

    let diagram: tensordraw::Diagram = session.finish();
    assert_eq!(diagram.registry().len(), rho.anchors().len() + chain.anchors().len());
}

#[test]
fn test_builder_reusability() {
    let builder = DiagramBuilder::default();
    let source = r#"
        [[element]]
        kind = "node"
        name = "api_reuse"
        legs = { east = 1 }
    "#;

    // Each build gets its own registry, so the same names can be reused
    let first = builder.build(&description(source)).unwrap();
    let second = builder.build(&description(source)).unwrap();
    assert_eq!(first.registry().len(), second.registry().len());
}
