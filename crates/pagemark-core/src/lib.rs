//! pagemark-core - HTML node tree and rendering
//!
//! This crate provides the HTML tree used by `pagemark` as the target of
//! markdown conversion, and the renderer that turns that tree into markup text.
//!
//! # Architecture
//!
//! ```text
//!                  ┌───────────┐
//! Markdown ──────▶ │ HTML tree │ ──render──▶ HTML String
//!   (pagemark)     └───────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use pagemark_core::{render, HtmlNode};
//!
//! let tree = HtmlNode::parent(
//!     "p",
//!     vec![
//!         HtmlNode::text("This is "),
//!         HtmlNode::leaf("b", "bold"),
//!         HtmlNode::text(" text."),
//!     ],
//! );
//!
//! let html = render(&tree).unwrap();
//! assert_eq!(html, "<p>This is <b>bold</b> text.</p>");
//! ```

mod node;
mod render;

pub use node::{Attributes, HtmlNode, IMAGE_TAG};
pub use render::{attributes_to_html, render};

/// Structural violations of the HTML tree, raised only while rendering
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("Leaf node <{tag}> must have a value")]
    EmptyValue { tag: String },

    #[error("Parent node must have a tag")]
    MissingTag,

    #[error("Parent node <{tag}> must have children")]
    EmptyChildren { tag: String },
}

pub type Result<T> = std::result::Result<T, RenderError>;
