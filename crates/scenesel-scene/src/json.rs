//! JSON scene documents.
//!
//! ```json
//! { "id": "0:1", "type": "PAGE", "children": [
//!     { "id": "header", "type": "FRAME", "children": [
//!         { "id": "1:3", "type": "RECT", "fill": "red banner", "opacity": 0.5 }
//!     ] }
//! ] }
//! ```
//!
//! A node with a `children` key is a container, one without is a leaf. Every
//! other key becomes an attribute. Only scalar values are kept.

use serde::Deserialize;
use serde_json::{Map, Value};

use scenesel_common::warning::warn_once;

use crate::{AttributeValue, NodeData, NodeId, SceneError, SceneTree};

#[derive(Debug, Deserialize)]
struct RawNode {
    id: String,
    #[serde(rename = "type")]
    node_type: String,
    #[serde(default)]
    children: Option<Vec<Self>>,
    #[serde(flatten)]
    attrs: Map<String, Value>,
}

impl RawNode {
    /// Split into node data and the optional child list.
    fn into_parts(self) -> (NodeData, Option<Vec<Self>>) {
        let mut data = NodeData::new(self.id, &self.node_type);
        for (name, value) in self.attrs {
            match scalar(value) {
                Some(value) => {
                    let _ = data.attrs.insert(name, value);
                }
                None => warn_once(
                    "scene",
                    &format!("attribute '{name}' has a non-scalar value and was skipped"),
                ),
            }
        }
        (data, self.children)
    }
}

fn scalar(value: Value) -> Option<AttributeValue> {
    match value {
        Value::Null => Some(AttributeValue::Null),
        Value::Bool(b) => Some(AttributeValue::Bool(b)),
        Value::Number(n) => n.as_f64().map(AttributeValue::Number),
        Value::String(s) => Some(AttributeValue::String(s)),
        Value::Array(_) | Value::Object(_) => None,
    }
}

pub(crate) fn parse_scene(json: &str) -> Result<SceneTree, SceneError> {
    let root: RawNode = serde_json::from_str(json)?;
    let (root_data, root_children) = root.into_parts();
    let mut tree = SceneTree::new(root_data);

    // (parent, children still to attach), walked without recursion
    let mut pending: Vec<(NodeId, Vec<RawNode>)> = Vec::new();
    if let Some(children) = root_children {
        pending.push((NodeId::ROOT, children));
    }

    while let Some((parent, children)) = pending.pop() {
        for raw in children {
            let (data, grandchildren) = raw.into_parts();
            let id = match grandchildren {
                Some(grandchildren) => {
                    let id = tree.alloc_container(data);
                    pending.push((id, grandchildren));
                    id
                }
                None => tree.alloc_leaf(data),
            };
            tree.append_child(parent, id)?;
        }
    }

    log::debug!(target: "scene", "built scene with {} nodes", tree.len());
    Ok(tree)
}
