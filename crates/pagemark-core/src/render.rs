//! HTML tree rendering
//!
//! Converts an [`HtmlNode`] tree into markup text. Nothing is escaped: values
//! and attribute values are written verbatim.

use crate::node::{Attributes, HtmlNode, IMAGE_TAG};
use crate::{RenderError, Result};

/// Render a node tree to an HTML string
pub fn render(node: &HtmlNode) -> Result<String> {
    let mut output = String::with_capacity(1024);
    render_node(node, &mut output)?;
    Ok(output)
}

/// Serialize attributes as ` key="value"` pairs in insertion order
pub fn attributes_to_html(attrs: Option<&Attributes>) -> String {
    let mut out = String::new();
    push_attributes(attrs, &mut out);
    out
}

fn render_node(node: &HtmlNode, out: &mut String) -> Result<()> {
    match node {
        HtmlNode::Leaf { tag, value, attrs } => {
            let tag = match tag.as_deref() {
                Some(tag) if !tag.is_empty() => tag,
                _ => {
                    out.push_str(value);
                    return Ok(());
                }
            };
            if value.is_empty() && tag != IMAGE_TAG {
                return Err(RenderError::EmptyValue {
                    tag: tag.to_string(),
                });
            }
            push_open(tag, attrs.as_ref(), out);
            out.push_str(value);
            push_close(tag, out);
        }

        HtmlNode::Parent {
            tag,
            children,
            attrs,
        } => {
            if tag.is_empty() {
                return Err(RenderError::MissingTag);
            }
            if children.is_empty() {
                return Err(RenderError::EmptyChildren { tag: tag.clone() });
            }
            push_open(tag, attrs.as_ref(), out);
            for child in children {
                render_node(child, out)?;
            }
            push_close(tag, out);
        }
    }
    Ok(())
}

fn push_open(tag: &str, attrs: Option<&Attributes>, out: &mut String) {
    out.push('<');
    out.push_str(tag);
    push_attributes(attrs, out);
    out.push('>');
}

fn push_close(tag: &str, out: &mut String) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn push_attributes(attrs: Option<&Attributes>, out: &mut String) {
    let Some(attrs) = attrs else {
        return;
    };
    for (name, value) in attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(value);
        out.push('"');
    }
}
