//! HTML node tree
//!
//! A document is a tree of [`HtmlNode`]s: leaves carry text (or nothing, for
//! images) and parents own an ordered list of children.

use indexmap::IndexMap;

/// Tag of the only leaf element allowed to carry an empty value
pub const IMAGE_TAG: &str = "img";

/// Element attributes, serialized in insertion order
pub type Attributes = IndexMap<String, String>;

/// A node in the HTML tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlNode {
    /// Childless node: raw text when `tag` is absent, otherwise an element
    /// wrapping `value`
    Leaf {
        tag: Option<String>,
        value: String,
        attrs: Option<Attributes>,
    },

    /// Element owning an ordered sequence of children
    Parent {
        tag: String,
        children: Vec<HtmlNode>,
        attrs: Option<Attributes>,
    },
}

impl HtmlNode {
    /// Create a tagged leaf without attributes
    pub fn leaf(tag: &str, value: impl Into<String>) -> Self {
        HtmlNode::Leaf {
            tag: Some(tag.to_string()),
            value: value.into(),
            attrs: None,
        }
    }

    /// Create an untagged leaf, rendered as its raw value
    pub fn text(value: impl Into<String>) -> Self {
        HtmlNode::Leaf {
            tag: None,
            value: value.into(),
            attrs: None,
        }
    }

    /// Create a tagged leaf with attributes
    pub fn leaf_with_attrs(tag: &str, value: impl Into<String>, attrs: Vec<(&str, &str)>) -> Self {
        HtmlNode::Leaf {
            tag: Some(tag.to_string()),
            value: value.into(),
            attrs: Some(collect_attrs(attrs)),
        }
    }

    /// Create a parent element without attributes
    pub fn parent(tag: &str, children: Vec<HtmlNode>) -> Self {
        HtmlNode::Parent {
            tag: tag.to_string(),
            children,
            attrs: None,
        }
    }

    /// Create a parent element with attributes
    pub fn parent_with_attrs(
        tag: &str,
        children: Vec<HtmlNode>,
        attrs: Vec<(&str, &str)>,
    ) -> Self {
        HtmlNode::Parent {
            tag: tag.to_string(),
            children,
            attrs: Some(collect_attrs(attrs)),
        }
    }

    /// Get the tag, if any
    pub fn tag(&self) -> Option<&str> {
        match self {
            HtmlNode::Leaf { tag, .. } => tag.as_deref(),
            HtmlNode::Parent { tag, .. } => Some(tag.as_str()),
        }
    }

    /// Get the attributes, if any
    pub fn attrs(&self) -> Option<&Attributes> {
        match self {
            HtmlNode::Leaf { attrs, .. } | HtmlNode::Parent { attrs, .. } => attrs.as_ref(),
        }
    }

    /// Get all child nodes (empty for leaves)
    pub fn children(&self) -> &[HtmlNode] {
        match self {
            HtmlNode::Leaf { .. } => &[],
            HtmlNode::Parent { children, .. } => children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HtmlNode::Leaf { .. })
    }

    pub fn is_parent(&self) -> bool {
        matches!(self, HtmlNode::Parent { .. })
    }

    /// Render this node and its descendants to markup
    pub fn to_html(&self) -> crate::Result<String> {
        crate::render(self)
    }
}

fn collect_attrs(attrs: Vec<(&str, &str)>) -> Attributes {
    attrs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
