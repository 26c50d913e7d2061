//! CSS-like selector queries over scene graphs.
//!
//! # Scope
//!
//! This crate implements:
//! - **Selector Tokenizer** (after [CSS Syntax § 4](https://www.w3.org/TR/css-syntax-3/#tokenization))
//!   - Whitespace, punctuation, words, `#hash`, quoted strings, comments, escapes
//!
//! - **Selector Compiler**
//!   - Type (`rect`), ID (`#header`) and universal (`*`) selectors
//!   - Attribute selectors with `=`, `~=`, `|=`, `^=`, `$=`, `*=`
//!   - Compound selectors (`rect[fill="red"]`)
//!   - Descendant (whitespace) and child (`>`) combinators
//!
//! - **Matching Engine**
//!   - Left-to-right context narrowing across groups
//!   - Result sets unique by node identity
//!
//! # Not Implemented
//!
//! - Pseudo-classes and pseudo-elements
//! - Sibling combinators (`+`, `~`)
//! - Class selectors and selector lists
//! - Specificity
//!
//! # Example
//!
//! ```
//! use scenesel_query::select;
//! use scenesel_scene::{NodeData, NodeId, SceneTree};
//!
//! let mut tree = SceneTree::new(NodeData::new("page", "PAGE"));
//! let header = tree.alloc_container(NodeData::new("header", "FRAME"));
//! let banner = tree.alloc_leaf(NodeData::new("banner", "RECT").with_attr("fill", "red banner"));
//! tree.append_child(NodeId::ROOT, header).unwrap();
//! tree.append_child(header, banner).unwrap();
//!
//! let found = select(r#"#header > rect[fill~="banner"]"#, &tree, NodeId::ROOT);
//! assert_eq!(found, vec![banner]);
//! ```

/// Selector group evaluation.
pub mod matching;
/// Selector types and the selector compiler.
pub mod selector;
/// Selector tokenizer.
pub mod tokenizer;

use scenesel_scene::{NodeId, SceneGraph};

pub use matching::match_groups;
pub use selector::{
    AttributeOperator, AttributeSelector, Selector, SelectorGroup, compile, compile_tokens,
    to_selector_string,
};

/// Return every node below `root` that the selector matches.
///
/// The result holds each node once, in the order it was first reached. An
/// empty or unparseable selector returns nothing; `root` itself is never
/// returned.
///
/// Unsupported syntax is reported through
/// [`warn_once`](scenesel_common::warning::warn_once), whose registry is
/// process-wide: a construct reported by one call stays silent in later calls
/// until [`clear_warnings`](scenesel_common::warning::clear_warnings) runs.
/// Matching itself keeps no state between calls.
pub fn select<G>(selector: &str, graph: &G, root: NodeId) -> Vec<NodeId>
where
    G: SceneGraph + ?Sized,
{
    let groups = compile(selector);
    log::debug!(
        target: "selector",
        "compiled `{selector}` into {} group(s): {}",
        groups.len(),
        to_selector_string(&groups)
    );
    match_groups(&groups, graph, root)
}
