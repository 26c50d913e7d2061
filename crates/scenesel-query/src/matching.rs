//! Selector group evaluation against a scene.
//!
//! Groups are applied left to right. The first group searches below the
//! start node; every later group searches below the nodes the previous group
//! matched. A descendant group searches whole subtrees, a `>` group only the
//! immediate children. The start node itself is never a candidate.

use std::collections::HashSet;

use scenesel_scene::{NodeId, SceneGraph};

use crate::selector::SelectorGroup;

/// Node set unique by identity that remembers first-insertion order.
#[derive(Debug, Default)]
struct MatchSet {
    order: Vec<NodeId>,
    seen: HashSet<NodeId>,
}

impl MatchSet {
    fn insert(&mut self, id: NodeId) {
        if self.seen.insert(id) {
            self.order.push(id);
        }
    }

    fn into_vec(self) -> Vec<NodeId> {
        self.order
    }
}

/// Evaluate compiled groups starting from `root`.
///
/// Each node appears at most once in the result. Nodes that expose neither
/// children nor descendant search contribute nothing. No groups means no
/// matches.
pub fn match_groups<G>(groups: &[SelectorGroup], graph: &G, root: NodeId) -> Vec<NodeId>
where
    G: SceneGraph + ?Sized,
{
    if groups.is_empty() {
        return Vec::new();
    }

    let mut context = vec![root];
    for (index, group) in groups.iter().enumerate() {
        let mut next = MatchSet::default();
        let mut accepts = |id: NodeId| graph.node(id).is_some_and(|data| group.matches(data));

        for &node in &context {
            if group.direct_children_only {
                let Some(children) = graph.children(node) else {
                    continue;
                };
                for &child in children {
                    if accepts(child) {
                        next.insert(child);
                    }
                }
            } else {
                let Some(found) = graph.find_all(node, &mut accepts) else {
                    continue;
                };
                for id in found {
                    next.insert(id);
                }
            }
        }

        context = next.into_vec();
        log::trace!(
            target: "matching",
            "group {index} `{group}` left {} node(s) in context",
            context.len()
        );
        if context.is_empty() {
            break;
        }
    }

    context
}
