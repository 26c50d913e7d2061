//! Selector types and per-node predicates.
//!
//! A compiled selector is an ordered list of [`SelectorGroup`]s. Each group is
//! a compound selector (every [`Selector`] in it must match the same node) plus
//! the combinator that links it to the group before it.
//!
//! Example: `#header > rect[fill~="red"]` compiles to
//! ```text
//! [#header] --(child)--> [rect, [fill~="red"]]
//! ```

mod compiler;

use core::fmt;

use scenesel_scene::NodeData;
use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumString};

pub use compiler::{compile, compile_tokens};

/// Code points that build up an attribute operator inside `[...]`.
pub const OPERATOR_CHARS: [char; 7] = ['~', '|', '^', '=', '$', '-', '*'];

/// A single condition on a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Selector {
    /// `*` - matches every node.
    All,

    /// `#id` - matches nodes whose identifier is exactly `id`.
    ById(String),

    /// `rect` - matches nodes whose type tag equals the upper-cased name.
    ///
    /// Scene type tags are upper-case (`RECT`, `FRAME`), selectors are
    /// usually written lower-case. Both sides use Unicode upper-casing, so
    /// `ébauche` matches `ÉBAUCHE`.
    ByType(String),

    /// `[name op "value"]` - compares a named attribute with a literal.
    ByAttribute(AttributeSelector),
}

impl Selector {
    /// Check if this selector matches the given node.
    #[must_use]
    pub fn matches(&self, node: &NodeData) -> bool {
        match self {
            Self::All => true,
            Self::ById(id) => node.id == *id,
            Self::ByType(name) => node.node_type == name.to_uppercase(),
            Self::ByAttribute(attr) => attr.matches(node),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("*"),
            Self::ById(id) => write!(f, "#{id}"),
            Self::ByType(name) => f.write_str(name),
            Self::ByAttribute(attr) => write!(f, "{attr}"),
        }
    }
}

/// [§ 6.4 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
///
/// How an attribute value is compared with the selector literal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, EnumString, Display, AsRefStr,
)]
pub enum AttributeOperator {
    /// `[attr=value]` - exact value, no string coercion.
    #[default]
    #[strum(to_string = "=", serialize = "")]
    Equals,

    /// `[attr~=value]` - one of the space-separated words is exactly `value`.
    #[strum(to_string = "~=")]
    Includes,

    /// `[attr|=value]` - exactly `value`, or contains `value-`.
    #[strum(to_string = "|=")]
    DashMatch,

    /// `[attr^=value]` - starts with `value`.
    #[strum(to_string = "^=")]
    PrefixMatch,

    /// `[attr$=value]` - ends with `value`.
    #[strum(to_string = "$=")]
    SuffixMatch,

    /// `[attr*=value]` - contains `value`.
    #[strum(to_string = "*=")]
    SubstringMatch,
}

impl AttributeOperator {
    /// Resolve the operator text accumulated while parsing.
    ///
    /// Unrecognised text (`==`, `-=`, a lone `~`) compares like `=`.
    #[must_use]
    pub fn from_accumulated(text: &str) -> Self {
        text.parse()
            .unwrap_or_else(|_: strum::ParseError| Self::default())
    }
}

/// An attribute selector as it is built up token by token.
///
/// `[` opens it; the first word or string becomes the name, the second the
/// value; operator characters are appended to `operator`; `]` closes it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AttributeSelector {
    /// Attribute name, the first parameter.
    pub name: Option<String>,
    /// Literal to compare against, the second parameter.
    pub value: Option<String>,
    /// Operator characters in the order they were seen.
    pub operator: String,
    /// Whether the closing `]` has been consumed.
    pub closed: bool,
}

impl AttributeSelector {
    /// Create an open attribute selector with no parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next parameter: name first, then value. Later ones are ignored.
    pub fn push_param(&mut self, param: String) {
        if self.name.is_none() {
            self.name = Some(param);
        } else if self.value.is_none() {
            self.value = Some(param);
        } else {
            log::trace!(target: "selector", "extra attribute parameter '{param}' ignored");
        }
    }

    /// Append an operator character.
    pub fn push_operator(&mut self, c: char) {
        self.operator.push(c);
    }

    /// Mark the selector as closed by `]`.
    pub const fn close(&mut self) {
        self.closed = true;
    }

    /// The comparison this selector performs.
    #[must_use]
    pub fn operator(&self) -> AttributeOperator {
        AttributeOperator::from_accumulated(&self.operator)
    }

    /// Check the node's attribute against the literal.
    ///
    /// A selector without a value never matches, and neither does a node
    /// lacking the attribute.
    #[must_use]
    pub fn matches(&self, node: &NodeData) -> bool {
        let (Some(name), Some(needle)) = (&self.name, &self.value) else {
            return false;
        };
        let Some(value) = node.attribute(name) else {
            return false;
        };
        let needle = needle.as_str();

        match self.operator() {
            AttributeOperator::Equals => value.equals_str(needle),
            AttributeOperator::Includes => value.to_string().split(' ').any(|word| word == needle),
            AttributeOperator::DashMatch => {
                value.equals_str(needle) || value.to_string().contains(&format!("{needle}-"))
            }
            AttributeOperator::PrefixMatch => value.to_string().starts_with(needle),
            AttributeOperator::SuffixMatch => value.to_string().ends_with(needle),
            AttributeOperator::SubstringMatch => value.to_string().contains(needle),
        }
    }
}

impl fmt::Display for AttributeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        if let Some(name) = &self.name {
            f.write_str(name)?;
        }
        if let Some(value) = &self.value {
            let operator = if self.operator.is_empty() {
                "="
            } else {
                self.operator.as_str()
            };
            write!(f, "{operator}{value:?}")?;
        }
        if self.closed {
            f.write_str("]")?;
        }
        Ok(())
    }
}

/// [§ 4.2 Compound selectors](https://www.w3.org/TR/selectors-4/#compound)
///
/// Selectors that must all match the same node, plus the combinator that
/// relates this group to the previous one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectorGroup {
    /// The simple selectors, all of which must match.
    pub selectors: Vec<Selector>,
    /// `true` when introduced by `>`: only direct children of the previous
    /// group's matches are candidates. Otherwise any descendant is.
    pub direct_children_only: bool,
}

impl SelectorGroup {
    /// Returns true if the group holds no selectors.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    /// Check that every selector of the group matches the node.
    #[must_use]
    pub fn matches(&self, node: &NodeData) -> bool {
        self.selectors.iter().all(|selector| selector.matches(node))
    }
}

impl fmt::Display for SelectorGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.direct_children_only {
            f.write_str("> ")?;
        }
        for selector in &self.selectors {
            write!(f, "{selector}")?;
        }
        Ok(())
    }
}

/// Render compiled groups back into selector text.
#[must_use]
pub fn to_selector_string(groups: &[SelectorGroup]) -> String {
    groups
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
