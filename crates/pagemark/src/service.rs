//! PagemarkService - the main entry point for markdown to HTML conversion.

use pagemark_core::{render, Attributes, HtmlNode};
use tracing::debug;

use crate::blocks::markdown_to_blocks;
use crate::Result;

/// Options for PagemarkService
#[derive(Debug, Clone)]
pub struct PagemarkOptions {
    /// Tag of the root element wrapping every block
    pub container_tag: String,

    /// Attributes of the root element
    pub container_attrs: Option<Attributes>,
}

impl Default for PagemarkOptions {
    fn default() -> Self {
        Self {
            container_tag: "div".to_string(),
            container_attrs: None,
        }
    }
}

/// The main service for converting markdown to HTML
#[derive(Debug, Clone, Default)]
pub struct PagemarkService {
    options: PagemarkOptions,
}

impl PagemarkService {
    /// Create a new PagemarkService with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a PagemarkService with custom options
    pub fn with_options(options: PagemarkOptions) -> Self {
        Self { options }
    }

    /// Get the current options
    pub fn options(&self) -> &PagemarkOptions {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut PagemarkOptions {
        &mut self.options
    }

    /// Convert a markdown document into an HTML tree.
    ///
    /// Every block becomes one child of the root container, in source order.
    /// The first block that fails aborts the whole conversion.
    pub fn to_document(&self, markdown: &str) -> Result<HtmlNode> {
        let blocks = markdown_to_blocks(markdown);
        debug!(blocks = blocks.len(), "Converting markdown document");

        let children = blocks
            .into_iter()
            .map(|block| {
                debug!(kind = ?block.kind(), "Rendering block");
                block.to_html_node()
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(HtmlNode::Parent {
            tag: self.options.container_tag.clone(),
            children,
            attrs: self.options.container_attrs.clone(),
        })
    }

    /// Convert a markdown document to an HTML string
    pub fn to_html(&self, markdown: &str) -> Result<String> {
        let document = self.to_document(markdown)?;
        Ok(render(&document)?)
    }
}
