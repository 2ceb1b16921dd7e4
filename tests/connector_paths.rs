//! End-to-end path synthesis checks on the serialized SVG path data.

use glam::dvec2;
use trazo::{
    Connector, ConnectorStyle, ElementKind, ElementTree, FatHead, FatStyle, JoinType, LineType,
    ThinHead, ThinStyle, parse_transform_list,
};

fn thin(head: ThinHead, tail: ThinHead, line: LineType) -> ConnectorStyle {
    ConnectorStyle::Thin(ThinStyle {
        head,
        tail,
        head_size: 10.0,
        tail_size: 10.0,
        line,
    })
}

fn joined(connector: &Connector) -> String {
    connector
        .paths()
        .iter()
        .map(|p| p.to_path_data())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn thin_stick_arrow() {
    let mut c = Connector::new(thin(ThinHead::Stick, ThinHead::None, LineType::Straight));
    c.set_endpoints(dvec2(0.0, 0.0), dvec2(100.0, 0.0));
    insta::assert_snapshot!(joined(&c), @r"
    M85.00,5.00L100.00,0.00L85.00,-5.00
    M0.00,0.00L100.00,0.00
    ");
}

#[test]
fn thin_diamond_arrow_shortens_the_line() {
    let mut c = Connector::new(thin(ThinHead::Diamond, ThinHead::None, LineType::Straight));
    c.set_endpoints(dvec2(0.0, 0.0), dvec2(100.0, 0.0));
    insta::assert_snapshot!(joined(&c), @r"
    M100.00,0.00L95.00,5.00L90.00,0.00L95.00,-5.00Z
    M0.00,0.00L90.00,0.00
    ");
}

#[test]
fn orthogonal_route_through_a_midpoint() {
    let mut c = Connector::new(thin(ThinHead::None, ThinHead::None, LineType::Orthogonal));
    c.set_endpoints(dvec2(0.0, 0.0), dvec2(100.0, 50.0));
    c.midpoints.push(dvec2(40.0, 50.0));
    insta::assert_snapshot!(joined(&c), @"M0.00,0.00L40.00,0.00L40.00,50.00L100.00,50.00");
}

#[test]
fn curved_route_through_a_midpoint() {
    let mut c = Connector::new(thin(ThinHead::None, ThinHead::None, LineType::Curved));
    c.set_endpoints(dvec2(0.0, 0.0), dvec2(100.0, 0.0));
    c.midpoints.push(dvec2(50.0, 30.0));
    insta::assert_snapshot!(
        joined(&c),
        @"M0.00,0.00C8.33,5.00 33.33,30.00 50.00,30.00C66.67,30.00 91.67,5.00 100.00,0.00"
    );
}

#[test]
fn fat_arrow_with_a_head() {
    let mut c = Connector::new(ConnectorStyle::Fat(FatStyle {
        head: FatHead::Regular,
        tail: FatHead::None,
        head_size: 10.0,
        tail_size: 10.0,
        width: 5.0,
        join: JoinType::Miter,
    }));
    c.set_endpoints(dvec2(0.0, 0.0), dvec2(100.0, 0.0));
    insta::assert_snapshot!(
        joined(&c),
        @"M0.00,5.00L85.00,5.00L85.00,15.00L100.00,0.00L85.00,-15.00L85.00,-5.00L0.00,-5.00Z"
    );
}

#[test]
fn fat_arrow_with_both_heads() {
    let mut c = Connector::new(ConnectorStyle::Fat(FatStyle {
        head: FatHead::Regular,
        tail: FatHead::Regular,
        head_size: 10.0,
        tail_size: 10.0,
        width: 5.0,
        join: JoinType::Miter,
    }));
    c.set_endpoints(dvec2(0.0, 0.0), dvec2(100.0, 0.0));
    insta::assert_snapshot!(
        joined(&c),
        @"M15.00,5.00L85.00,5.00L85.00,15.00L100.00,0.00L85.00,-15.00L85.00,-5.00L15.00,-5.00L15.00,-15.00L0.00,0.00L15.00,15.00Z"
    );
}

#[test]
fn connector_paths_are_mapped_through_ancestor_transforms() {
    let mut c = Connector::new(thin(ThinHead::None, ThinHead::None, LineType::Straight));
    c.set_endpoints(dvec2(0.0, 0.0), dvec2(100.0, 0.0));

    let mut tree = ElementTree::new();
    let root = tree.add_root(
        ElementKind::Group,
        Some(parse_transform_list("translate(10, 20)")),
    );
    let child = tree.add_child(root, ElementKind::Connector(c), None);

    let paths = tree.paths(child).unwrap();
    assert_eq!(paths.len(), 1);
    insta::assert_snapshot!(paths[0].to_path_data(), @"M10.00,20.00L110.00,20.00");
}
