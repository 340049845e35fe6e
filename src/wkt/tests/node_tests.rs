//! Tests for the WKT tree model

use crate::srs::errors::SrsError;
use crate::wkt::{MatchMode, RemapDirection, RemapTable, WktNode};

const WGS84: &str = "GEOGCS[\"WGS 84\",DATUM[\"WGS_1984\",SPHEROID[\"WGS 84\",6378137,298.257223563,AUTHORITY[\"EPSG\",7030]],AUTHORITY[\"EPSG\",6326]],PRIMEM[\"Greenwich\",0,AUTHORITY[\"EPSG\",8901]],UNIT[\"degree\",0.0174532925199433,AUTHORITY[\"EPSG\",9122]],AXIS[\"Lat\",NORTH],AXIS[\"Long\",EAST],AUTHORITY[\"EPSG\",4326]]";

#[test]
fn test_parse_serialize_round_trip() {
    let tree = WktNode::parse(WGS84).unwrap();
    assert_eq!(tree.value(), "GEOGCS");
    assert_eq!(tree.child_count(), 7);
    assert_eq!(tree.to_wkt(), WGS84);

    let reparsed = WktNode::parse(&tree.to_wkt()).unwrap();
    assert_eq!(reparsed, tree);
}

#[test]
fn test_parse_accepts_parentheses_and_whitespace() {
    let tree = WktNode::parse("UNIT ( \"metre\" , 1 )").unwrap();
    assert_eq!(tree.value(), "UNIT");
    assert_eq!(tree.child_value(0), Some("metre"));
    assert_eq!(tree.child_value(1), Some("1"));
}

#[test]
fn test_quoted_values_keep_delimiters() {
    let tree = WktNode::parse("PROJCS[\"a,b[c]\",UNIT[\"m\",1]]").unwrap();
    assert_eq!(tree.child_value(0), Some("a,b[c]"));
    assert_eq!(tree.to_wkt(), "PROJCS[\"a,b[c]\",UNIT[\"m\",1]]");
}

#[test]
fn test_quoting_heuristic() {
    let tree = WktNode::with_children("X", vec![
        WktNode::new("12.5"),
        WktNode::new("E12"),
        WktNode::new("abc"),
        WktNode::with_leaves("AUTHORITY", &["123", "456"]),
        WktNode::with_leaves("AXIS", &["Easting", "EAST"]),
    ]);
    assert_eq!(tree.to_wkt(), "X[12.5,\"E12\",\"abc\",AUTHORITY[\"123\",456],AXIS[\"Easting\",EAST]]");
}

#[test]
fn test_unterminated_definition_fails() {
    match WktNode::parse("GEOGCS[\"X\"") {
        Err(SrsError::MalformedInput { position, .. }) => assert_eq!(position, Some(6)),
        other => panic!("expected malformed input, got {:?}", other),
    }
}

#[test]
fn test_mismatched_delimiter_fails() {
    assert!(matches!(WktNode::parse("UNIT[\"m\",1)"), Err(SrsError::MalformedInput { .. })));
    assert!(matches!(WktNode::parse("UNIT[\"m"), Err(SrsError::MalformedInput { .. })));
    assert!(matches!(WktNode::parse("UNIT[\"m\",1]]"), Err(SrsError::MalformedInput { .. })));
    assert!(matches!(WktNode::parse("   "), Err(SrsError::MalformedInput { .. })));
}

#[test]
fn test_get_node_is_depth_first() {
    let tree = WktNode::parse(WGS84).unwrap();
    let spheroid = tree.get_node("SPHEROID").unwrap();
    assert_eq!(spheroid.child_value(1), Some("6378137"));

    // The first AUTHORITY found is the direct child of GEOGCS, not the nested ones
    let authority = tree.get_node("AUTHORITY").unwrap();
    assert_eq!(authority.child_value(1), Some("4326"));

    let path = tree.attr_path("DATUM|AUTHORITY").unwrap();
    assert_eq!(tree.node_at(&path).unwrap().child_value(1), Some("6326"));
    assert_eq!(tree.parent_of(&path).unwrap().value(), "DATUM");
    assert!(tree.get_node("PROJECTION").is_none());
}

#[test]
fn test_remap_respects_anchor() {
    let mut tree = WktNode::parse("PROJCS[\"Mercator\",PROJECTION[\"Mercator\"]]").unwrap();
    let table = RemapTable::from_pairs(&[("Mercator_1SP", "Mercator")], MatchMode::ExactIgnoreCase);

    let changed = tree.apply_remap(Some("PROJECTION"), &table, RemapDirection::ToWkt);
    assert_eq!(changed, 1);
    assert_eq!(tree.child_value(0), Some("Mercator"));
    assert_eq!(tree.get_attr_value("PROJECTION", 0), Some("Mercator_1SP"));

    let changed = tree.apply_remap(None, &table, RemapDirection::ToWkt);
    assert_eq!(changed, 1);
    assert_eq!(tree.child_value(0), Some("Mercator_1SP"));
}

#[test]
fn test_fixup_ordering() {
    let mut tree = WktNode::parse(
        "PROJCS[\"p\",AUTHORITY[\"EPSG\",1],UNIT[\"metre\",1],PARAMETER[\"a\",1],PROJECTION[\"Mercator_1SP\"],GEOGCS[\"g\",UNIT[\"degree\",1],DATUM[\"d\",SPHEROID[\"s\",1,2]]]]",
    ).unwrap();
    tree.fixup_ordering();
    assert_eq!(
        tree.to_wkt(),
        "PROJCS[\"p\",GEOGCS[\"g\",DATUM[\"d\",SPHEROID[\"s\",1,2]],UNIT[\"degree\",1]],PROJECTION[\"Mercator_1SP\"],PARAMETER[\"a\",1],UNIT[\"metre\",1],AUTHORITY[\"EPSG\",1]]"
    );
}

#[test]
fn test_fixup_ordering_keeps_unknown_kinds_in_place() {
    let mut tree = WktNode::parse("DATUM[\"d\",AUTHORITY[\"EPSG\",1],CUSTOM[1],SPHEROID[\"s\",1,2]]").unwrap();
    tree.fixup_ordering();
    assert_eq!(tree.child(2).unwrap().value(), "CUSTOM");
}

#[test]
fn test_strip_nodes() {
    let mut tree = WktNode::parse(WGS84).unwrap();
    assert_eq!(tree.strip_nodes("AUTHORITY"), 5);
    assert_eq!(tree.strip_nodes("AXIS"), 2);
    assert!(!tree.to_wkt().contains("AUTHORITY"));
    assert_eq!(tree.child_count(), 4);
}

#[test]
fn test_pretty_wkt_reparses() {
    let tree = WktNode::parse(WGS84).unwrap();
    let pretty = tree.to_pretty_wkt();
    assert!(pretty.contains("\n    DATUM["));
    assert!(pretty.contains("\n        SPHEROID["));
    assert_eq!(WktNode::parse(&pretty).unwrap(), tree);
}
