//! Node payload: identity, type tag and named attributes.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

/// Map of attribute names to values for a node.
pub type AttributesMap = HashMap<String, AttributeValue>;

/// A scalar attribute value.
///
/// Scene exports carry numbers and booleans next to strings (`opacity: 0.5`,
/// `visible: true`), so values keep their underlying type. Substring-style
/// comparisons work on the [`Display`](fmt::Display) form; plain equality
/// does not coerce.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// A boolean flag.
    Bool(bool),
    /// A numeric value.
    Number(f64),
    /// A text value.
    String(String),
    /// An explicit `null`.
    Null,
}

impl AttributeValue {
    /// Returns the text if this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Equality against a selector literal without coercion.
    ///
    /// Only a string value can equal a literal: `Number(5.0)` does not equal `"5"`.
    #[must_use]
    pub fn equals_str(&self, needle: &str) -> bool {
        self.as_str() == Some(needle)
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            // f64's Display already drops the fractional part of whole numbers
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
            Self::Null => f.write_str("null"),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// The data carried by every scene node.
///
/// `id` and `node_type` are always present; everything else lives in `attrs`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeData {
    /// Node identifier, matched exactly by `#id` selectors.
    pub id: String,
    /// Type tag, stored upper-cased (`FRAME`, `RECT`, `TEXT`).
    #[serde(rename = "type")]
    pub node_type: String,
    /// Arbitrary named attributes.
    #[serde(flatten)]
    pub attrs: AttributesMap,
}

impl NodeData {
    /// Create node data with no attributes. The type tag is upper-cased.
    #[must_use]
    pub fn new(id: impl Into<String>, node_type: &str) -> Self {
        Self {
            id: id.into(),
            node_type: node_type.to_uppercase(),
            attrs: AttributesMap::new(),
        }
    }

    /// Builder-style attribute insertion.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        let _ = self.attrs.insert(name.into(), value.into());
        self
    }

    /// Look up an attribute by name.
    ///
    /// `id` and `type` resolve to the node's identity fields, so `[type="RECT"]`
    /// and `[id^="btn"]` work like any other attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<Cow<'_, AttributeValue>> {
        match name {
            "id" => Some(Cow::Owned(AttributeValue::String(self.id.clone()))),
            "type" => Some(Cow::Owned(AttributeValue::String(self.node_type.clone()))),
            _ => self.attrs.get(name).map(Cow::Borrowed),
        }
    }

    /// The `name` attribute, if it is a string.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.attrs.get("name").and_then(AttributeValue::as_str)
    }
}
