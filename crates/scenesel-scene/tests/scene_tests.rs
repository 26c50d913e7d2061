//! Tests for scene tree construction, traversal and JSON loading.

use scenesel_scene::{AttributeValue, NodeData, NodeId, SceneError, SceneGraph, SceneTree};

fn page() -> SceneTree {
    SceneTree::new(NodeData::new("page", "page"))
}

// ========== construction ==========

#[test]
fn test_type_tag_is_uppercased() {
    let data = NodeData::new("r", "rect");
    assert_eq!(data.node_type, "RECT");
}

#[test]
fn test_append_child_links_parent() {
    let mut tree = page();
    let frame = tree.alloc_container(NodeData::new("frame", "FRAME"));
    tree.append_child(NodeId::ROOT, frame).unwrap();

    assert_eq!(tree.parent(frame), Some(NodeId::ROOT));
    assert_eq!(tree.children(NodeId::ROOT), Some(&[frame][..]));
    assert_eq!(tree.children(frame), Some(&[][..]));
}

#[test]
fn test_leaf_has_no_children_capability() {
    let mut tree = page();
    let rect = tree.alloc_leaf(NodeData::new("rect", "RECT"));
    tree.append_child(NodeId::ROOT, rect).unwrap();

    assert!(!tree.is_container(rect));
    assert_eq!(tree.children(rect), None);
    assert_eq!(tree.find_all(rect, &mut |_| true), None);
}

#[test]
fn test_append_to_leaf_fails() {
    let mut tree = page();
    let rect = tree.alloc_leaf(NodeData::new("rect", "RECT"));
    let other = tree.alloc_leaf(NodeData::new("other", "RECT"));
    tree.append_child(NodeId::ROOT, rect).unwrap();

    let err = tree.append_child(rect, other).unwrap_err();
    assert!(matches!(err, SceneError::NotAContainer(id) if id == rect));
}

#[test]
fn test_append_attached_node_fails() {
    let mut tree = page();
    let a = tree.alloc_container(NodeData::new("a", "FRAME"));
    let b = tree.alloc_container(NodeData::new("b", "FRAME"));
    let child = tree.alloc_leaf(NodeData::new("c", "RECT"));
    tree.append_child(NodeId::ROOT, a).unwrap();
    tree.append_child(NodeId::ROOT, b).unwrap();
    tree.append_child(a, child).unwrap();

    let err = tree.append_child(b, child).unwrap_err();
    assert!(matches!(err, SceneError::AlreadyAttached { parent, .. } if parent == a));
}

#[test]
fn test_append_ancestor_is_a_cycle() {
    let mut tree = page();
    let frame = tree.alloc_container(NodeData::new("frame", "FRAME"));
    tree.append_child(NodeId::ROOT, frame).unwrap();

    let err = tree.append_child(frame, NodeId::ROOT).unwrap_err();
    assert!(matches!(err, SceneError::Cycle { .. }));
}

#[test]
fn test_append_unknown_node_fails() {
    let mut tree = page();
    let err = tree.append_child(NodeId::ROOT, NodeId(42)).unwrap_err();
    assert!(matches!(err, SceneError::UnknownNode(NodeId(42))));
}

// ========== traversal ==========

#[test]
fn test_find_all_excludes_self_and_keeps_document_order() {
    let mut tree = page();
    let a = tree.alloc_container(NodeData::new("a", "FRAME"));
    let a1 = tree.alloc_leaf(NodeData::new("a1", "RECT"));
    let b = tree.alloc_leaf(NodeData::new("b", "RECT"));
    tree.append_child(NodeId::ROOT, a).unwrap();
    tree.append_child(a, a1).unwrap();
    tree.append_child(NodeId::ROOT, b).unwrap();

    let all = tree.find_all(NodeId::ROOT, &mut |_| true).unwrap();
    assert_eq!(all, vec![a, a1, b]);

    let rects = tree
        .find_all(NodeId::ROOT, &mut |n| {
            tree.data(n).is_some_and(|d| d.node_type == "RECT")
        })
        .unwrap();
    assert_eq!(rects, vec![a1, b]);
}

#[test]
fn test_ancestors_walk_to_root() {
    let mut tree = page();
    let a = tree.alloc_container(NodeData::new("a", "FRAME"));
    let b = tree.alloc_leaf(NodeData::new("b", "RECT"));
    tree.append_child(NodeId::ROOT, a).unwrap();
    tree.append_child(a, b).unwrap();

    let ancestors: Vec<NodeId> = tree.ancestors(b).collect();
    assert_eq!(ancestors, vec![a, NodeId::ROOT]);
}

#[test]
fn test_find_by_id() {
    let mut tree = page();
    let a = tree.alloc_container(NodeData::new("a", "FRAME"));
    tree.append_child(NodeId::ROOT, a).unwrap();

    assert_eq!(tree.find_by_id("page"), Some(NodeId::ROOT));
    assert_eq!(tree.find_by_id("a"), Some(a));
    assert_eq!(tree.find_by_id("missing"), None);
}

// ========== attributes ==========

#[test]
fn test_attribute_resolves_identity_fields() {
    let data = NodeData::new("btn-1", "frame").with_attr("fill", "red");
    assert_eq!(
        data.attribute("id").as_deref(),
        Some(&AttributeValue::String("btn-1".to_string()))
    );
    assert_eq!(
        data.attribute("type").as_deref(),
        Some(&AttributeValue::String("FRAME".to_string()))
    );
    assert_eq!(data.attribute("fill").as_deref(), Some(&AttributeValue::from("red")));
    assert!(data.attribute("stroke").is_none());
}

#[test]
fn test_attribute_value_string_coercion() {
    assert_eq!(AttributeValue::Number(5.0).to_string(), "5");
    assert_eq!(AttributeValue::Number(0.5).to_string(), "0.5");
    assert_eq!(AttributeValue::Bool(true).to_string(), "true");
    assert_eq!(AttributeValue::Null.to_string(), "null");
    assert_eq!(AttributeValue::from("a b").to_string(), "a b");
}

#[test]
fn test_equals_str_does_not_coerce() {
    assert!(AttributeValue::from("5").equals_str("5"));
    assert!(!AttributeValue::Number(5.0).equals_str("5"));
    assert!(!AttributeValue::Bool(true).equals_str("true"));
}

// ========== JSON ==========

const SCENE: &str = r#"{
    "id": "0:1",
    "type": "PAGE",
    "name": "Page 1",
    "children": [
        {
            "id": "header",
            "type": "frame",
            "children": [
                { "id": "1:3", "type": "RECT", "fill": "red banner", "opacity": 0.5, "visible": true }
            ]
        },
        { "id": "1:4", "type": "TEXT", "characters": "Hello", "fills": [{"type": "SOLID"}] }
    ]
}"#;

#[test]
fn test_from_json_builds_tree() {
    let tree = SceneTree::from_json_str(SCENE).unwrap();
    assert_eq!(tree.len(), 4);
    assert_eq!(tree.data(NodeId::ROOT).unwrap().name(), Some("Page 1"));

    let header = tree.find_by_id("header").unwrap();
    assert!(tree.is_container(header));
    assert_eq!(tree.data(header).unwrap().node_type, "FRAME");

    let rect = tree.find_by_id("1:3").unwrap();
    assert!(!tree.is_container(rect));
    assert_eq!(tree.parent(rect), Some(header));
    let rect_data = tree.data(rect).unwrap();
    assert_eq!(rect_data.attrs.get("opacity"), Some(&AttributeValue::Number(0.5)));
    assert_eq!(rect_data.attrs.get("visible"), Some(&AttributeValue::Bool(true)));
}

#[test]
fn test_from_json_preserves_child_order() {
    let tree = SceneTree::from_json_str(SCENE).unwrap();
    let ids: Vec<&str> = tree
        .children(NodeId::ROOT)
        .unwrap()
        .iter()
        .map(|&c| tree.data(c).unwrap().id.as_str())
        .collect();
    assert_eq!(ids, vec!["header", "1:4"]);
}

#[test]
fn test_from_json_skips_non_scalar_attributes() {
    let tree = SceneTree::from_json_str(SCENE).unwrap();
    let text = tree.find_by_id("1:4").unwrap();
    let data = tree.data(text).unwrap();
    assert!(data.attrs.get("fills").is_none());
    assert_eq!(data.attrs.get("characters"), Some(&AttributeValue::from("Hello")));
}

#[test]
fn test_from_json_rejects_missing_type() {
    let err = SceneTree::from_json_str(r#"{"id": "x"}"#).unwrap_err();
    assert!(matches!(err, SceneError::Json(_)));
}

#[test]
fn test_from_json_file_reports_path() {
    let err = SceneTree::from_json_file("/nonexistent/scene.json").unwrap_err();
    assert!(matches!(err, SceneError::Io { .. }));
    assert!(err.to_string().contains("/nonexistent/scene.json"));
}
