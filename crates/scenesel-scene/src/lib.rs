//! Scene graph for scenesel queries.
//!
//! A scene is a root container holding recursively nested nodes. Each node has
//! an identifier, a type tag, named attributes and, if it is a container, an
//! ordered list of children.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships.
//! Node identity is the [`NodeId`]: two nodes with identical data are still
//! different nodes.
//!
//! Leaf shapes (rectangles, text, vectors) cannot hold children. They are
//! allocated with [`SceneTree::alloc_leaf`] and report no children capability
//! through [`SceneGraph`], which is how query code tells them apart from empty
//! containers.

mod attribute;
mod json;

use std::path::PathBuf;

use thiserror::Error;

pub use attribute::{AttributeValue, AttributesMap, NodeData};

/// A type-safe index into the scene tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root node is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// Errors raised while building or loading a scene.
#[derive(Debug, Error)]
pub enum SceneError {
    /// The id does not refer to a node of this tree.
    #[error("node {0:?} does not exist in this scene")]
    UnknownNode(NodeId),

    /// The parent is a leaf and cannot hold children.
    #[error("node {0:?} is a leaf and cannot have children")]
    NotAContainer(NodeId),

    /// The child already has a parent.
    #[error("node {child:?} is already attached to {parent:?}")]
    AlreadyAttached {
        /// The node being appended.
        child: NodeId,
        /// Its current parent.
        parent: NodeId,
    },

    /// The child is the parent itself or one of its ancestors.
    #[error("appending {child:?} under {parent:?} would create a cycle")]
    Cycle {
        /// The node being appended.
        child: NodeId,
        /// The requested parent.
        parent: NodeId,
    },

    /// The scene document is not valid JSON or does not have the expected shape.
    #[error("invalid scene JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The scene file could not be read.
    #[error("failed to read scene file '{}': {source}", .path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// A node in the arena: payload plus tree links.
#[derive(Debug, Clone)]
pub struct Node {
    /// Identity, type tag and attributes.
    pub data: NodeData,
    /// Parent container, `None` for the root and for detached nodes.
    pub parent: Option<NodeId>,
    /// Ordered children. `None` means the node is a leaf that cannot hold any.
    pub children: Option<Vec<NodeId>>,
}

/// The capabilities a tree exposes to selector matching.
///
/// Both traversal capabilities are optional per node: a node that returns
/// `None` from [`children`](Self::children) or [`find_all`](Self::find_all)
/// simply contributes nothing to a query.
pub trait SceneGraph {
    /// The data of a node, or `None` for an unknown id.
    fn node(&self, id: NodeId) -> Option<&NodeData>;

    /// Immediate children in order, or `None` if the node cannot have children.
    fn children(&self, id: NodeId) -> Option<&[NodeId]>;

    /// Every descendant of `id` (not `id` itself) accepted by `predicate`.
    ///
    /// Returns `None` if the node has no descendant-search capability. The
    /// default walks the subtree depth-first in document order.
    fn find_all(
        &self,
        id: NodeId,
        predicate: &mut dyn FnMut(NodeId) -> bool,
    ) -> Option<Vec<NodeId>> {
        let mut stack: Vec<NodeId> = self.children(id)?.iter().rev().copied().collect();
        let mut found = Vec::new();
        while let Some(current) = stack.pop() {
            if predicate(current) {
                found.push(current);
            }
            if let Some(children) = self.children(current) {
                stack.extend(children.iter().rev().copied());
            }
        }
        Some(found)
    }
}

/// Arena-based scene tree.
///
/// All nodes live in one vector and refer to each other by [`NodeId`].
/// The root is always a container at [`NodeId::ROOT`].
#[derive(Debug, Clone)]
pub struct SceneTree {
    nodes: Vec<Node>,
}

impl SceneTree {
    /// Create a tree whose root container carries `root`.
    #[must_use]
    pub fn new(root: NodeData) -> Self {
        Self {
            nodes: vec![Node {
                data: root,
                parent: None,
                children: Some(Vec::new()),
            }],
        }
    }

    /// Load a scene from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Json`] if the text is not a valid scene document.
    pub fn from_json_str(json: &str) -> Result<Self, SceneError> {
        json::parse_scene(json)
    }

    /// Load a scene from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Io`] if the file cannot be read and
    /// [`SceneError::Json`] if its content is not a valid scene document.
    pub fn from_json_file(path: impl Into<PathBuf>) -> Result<Self, SceneError> {
        let path = path.into();
        let text = std::fs::read_to_string(&path).map_err(|source| SceneError::Io {
            path: path.clone(),
            source,
        })?;
        log::debug!(target: "scene", "loaded {} bytes from {}", text.len(), path.display());
        json::parse_scene(&text)
    }

    /// Get the root node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a node's data by its ID.
    #[must_use]
    pub fn data(&self, id: NodeId) -> Option<&NodeData> {
        self.get(id).map(|n| &n.data)
    }

    /// Get the number of nodes in the arena, attached or not.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root exists from construction.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a container node. It is not yet attached to the tree.
    pub fn alloc_container(&mut self, data: NodeData) -> NodeId {
        self.alloc(data, Some(Vec::new()))
    }

    /// Allocate a leaf node. It is not yet attached to the tree.
    pub fn alloc_leaf(&mut self, data: NodeData) -> NodeId {
        self.alloc(data, None)
    }

    fn alloc(&mut self, data: NodeData, children: Option<Vec<NodeId>>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            data,
            parent: None,
            children,
        });
        id
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// # Errors
    ///
    /// Fails if either id is unknown, if `parent` is a leaf, if `child` already
    /// has a parent, or if `child` is `parent` or one of its ancestors.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        let child_node = self.get(child).ok_or(SceneError::UnknownNode(child))?;
        if let Some(existing) = child_node.parent {
            return Err(SceneError::AlreadyAttached {
                child,
                parent: existing,
            });
        }
        if child == parent || self.ancestors(parent).any(|a| a == child) {
            return Err(SceneError::Cycle { child, parent });
        }

        let parent_node = self
            .nodes
            .get_mut(parent.0)
            .ok_or(SceneError::UnknownNode(parent))?;
        let Some(children) = parent_node.children.as_mut() else {
            return Err(SceneError::NotAContainer(parent));
        };
        children.push(child);
        self.nodes[child.0].parent = Some(parent);
        Ok(())
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get the children of a node, or `None` for a leaf.
    #[must_use]
    pub fn children(&self, id: NodeId) -> Option<&[NodeId]> {
        self.get(id).and_then(|n| n.children.as_deref())
    }

    /// Whether the node can hold children.
    #[must_use]
    pub fn is_container(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(|n| n.children.is_some())
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Find the first attached node (in document order) whose identifier is `id`.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        if self.nodes[NodeId::ROOT.0].data.id == id {
            return Some(NodeId::ROOT);
        }
        self.find_all(NodeId::ROOT, &mut |n| {
            self.data(n).is_some_and(|d| d.id == id)
        })
        .and_then(|found| found.first().copied())
    }
}

impl SceneGraph for SceneTree {
    fn node(&self, id: NodeId) -> Option<&NodeData> {
        self.data(id)
    }

    fn children(&self, id: NodeId) -> Option<&[NodeId]> {
        Self::children(self, id)
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a SceneTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}
