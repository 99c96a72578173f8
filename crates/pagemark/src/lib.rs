//! # pagemark
//!
//! Convert markdown documents to HTML for a static-site generator.
//!
//! ## Design
//!
//! Conversion runs as a small pipeline of pure functions:
//!
//! - **Blocks**: the document is split on blank lines and each block is
//!   classified (heading, code, quote, list, paragraph)
//! - **Inline spans**: block text is tokenized into bold, italic, code, link
//!   and image spans
//! - **HTML tree**: spans and blocks become [`HtmlNode`]s under one root
//!   container, which [`render`] turns into markup
//!
//! Nothing is escaped. Callers that feed untrusted input must sanitize it first.
//!
//! ## Example
//!
//! ```rust
//! use pagemark::markdown_to_html;
//!
//! let html = markdown_to_html("# Hello\n\nThis is **bold**").unwrap();
//! assert_eq!(html, "<div><h1>Hello</h1><p>This is <b>bold</b></p></div>");
//! ```
//!
//! ## Example (service with options)
//!
//! ```rust
//! use pagemark::{PagemarkOptions, PagemarkService};
//!
//! let options = PagemarkOptions {
//!     container_tag: "article".to_string(),
//!     ..Default::default()
//! };
//! let service = PagemarkService::with_options(options);
//! let html = service.to_html("Hello").unwrap();
//! assert_eq!(html, "<article><p>Hello</p></article>");
//! ```

pub mod blocks;
pub mod inline;
mod service;
mod utilities;

pub use blocks::{markdown_to_blocks, Block, BlockKind};
pub use inline::{tokenize, DelimiterKind, SpanKind, TextSpan};
pub use pagemark_core::{render, Attributes, HtmlNode, RenderError};
pub use service::{PagemarkOptions, PagemarkService};
pub use utilities::extract_title;

/// Error type for pagemark operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PagemarkError {
    #[error("Malformed markup: unterminated `{delimiter}` in {text:?}")]
    MalformedMarkup { delimiter: String, text: String },

    #[error("No title: document must start with a level-1 heading")]
    NoTitle,

    #[error(transparent)]
    Render(#[from] RenderError),
}

pub type Result<T> = std::result::Result<T, PagemarkError>;

/// Convert a markdown document into an HTML tree under a `div` container
pub fn to_document(markdown: &str) -> Result<HtmlNode> {
    PagemarkService::new().to_document(markdown)
}

/// Convert a markdown document straight to an HTML string
pub fn markdown_to_html(markdown: &str) -> Result<String> {
    PagemarkService::new().to_html(markdown)
}
