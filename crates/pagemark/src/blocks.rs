//! Block classifier.
//!
//! A document is cut into blocks on blank lines. Each block is normalized,
//! classified by its leading markers, and rendered into one [`HtmlNode`] whose
//! text content goes through the inline tokenizer.

use once_cell::sync::Lazy;
use pagemark_core::HtmlNode;
use regex::Regex;
use tracing::trace;

use crate::inline::tokenize;
use crate::Result;

/// Fence opening and closing a code block
pub const FENCE: &str = "```";

static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(#{1,6}) ").expect("valid heading regex"));

// Any non-word character may follow the period, not only a space.
static ORDERED_ITEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\.\W").expect("valid ordered item regex"));

/// Structural kind of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Paragraph,
    Heading,
    Code,
    Quote,
    UnorderedList,
    OrderedList,
}

/// A normalized, classified document segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    content: String,
    kind: BlockKind,
}

impl Block {
    /// Normalize `raw` and classify the result
    pub fn new(raw: &str) -> Self {
        let content = normalize(raw);
        let kind = classify(&content);
        Self { content, kind }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    /// Render this block into an HTML node.
    ///
    /// Only inline tokenization can fail, so the error is always
    /// [`crate::PagemarkError::MalformedMarkup`].
    pub fn to_html_node(self) -> Result<HtmlNode> {
        let content = self.content.as_str();
        let node = match self.kind {
            BlockKind::Heading => {
                let (hashes, text) = content.split_once(' ').unwrap_or((content, ""));
                HtmlNode::parent(&format!("h{}", hashes.len()), text_to_children(text)?)
            }

            BlockKind::Code => {
                // A lone fence opens and closes at once, leaving no body
                let body = content
                    .strip_prefix(FENCE)
                    .filter(|rest| rest.len() >= FENCE.len())
                    .and_then(|rest| rest.strip_suffix(FENCE))
                    .unwrap_or_default();
                let body = body.strip_prefix('\n').unwrap_or(body);
                HtmlNode::parent("pre", vec![HtmlNode::leaf("code", body)])
            }

            BlockKind::Quote => {
                let text = content
                    .lines()
                    .map(|line| {
                        let line = line.strip_prefix('>').unwrap_or(line);
                        line.strip_prefix(' ').unwrap_or(line)
                    })
                    .collect::<Vec<_>>()
                    .join("\n");
                HtmlNode::parent("blockquote", text_to_children(&text)?)
            }

            BlockKind::UnorderedList => {
                let items = content
                    .lines()
                    .map(|line| list_item(line.strip_prefix("- ").unwrap_or(line)))
                    .collect::<Result<Vec<_>>>()?;
                HtmlNode::parent("ul", items)
            }

            BlockKind::OrderedList => {
                let items = content
                    .lines()
                    .map(|line| {
                        let start = ORDERED_ITEM_RE.find(line).map_or(0, |m| m.end());
                        list_item(&line[start..])
                    })
                    .collect::<Result<Vec<_>>>()?;
                HtmlNode::parent("ol", items)
            }

            BlockKind::Paragraph => {
                let text = content.lines().collect::<Vec<_>>().join(" ");
                HtmlNode::parent("p", text_to_children(&text)?)
            }
        };
        Ok(node)
    }
}

/// Split a document into blocks on blank lines, in source order
pub fn markdown_to_blocks(markdown: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut segment: Vec<&str> = Vec::new();

    for line in markdown.lines() {
        if line.trim().is_empty() {
            if !segment.is_empty() {
                blocks.push(Block::new(&segment.join("\n")));
                segment.clear();
            }
        } else {
            segment.push(line);
        }
    }
    if !segment.is_empty() {
        blocks.push(Block::new(&segment.join("\n")));
    }

    trace!(blocks = blocks.len(), "Split document into blocks");
    blocks
}

/// Strip leading whitespace from every line and one trailing newline
pub fn normalize(raw: &str) -> String {
    let stripped = raw
        .split('\n')
        .map(str::trim_start)
        .collect::<Vec<_>>()
        .join("\n");
    match stripped.strip_suffix('\n') {
        Some(s) => s.to_string(),
        None => stripped,
    }
}

/// Classify normalized block content; the first matching rule wins
pub fn classify(content: &str) -> BlockKind {
    if content.is_empty() {
        return BlockKind::Paragraph;
    }

    let first_line = content.lines().next().unwrap_or_default();
    if HEADING_RE.is_match(first_line) {
        return BlockKind::Heading;
    }

    if content.starts_with(FENCE) && content.ends_with(FENCE) {
        return BlockKind::Code;
    }

    if content.lines().all(|line| line.starts_with('>')) {
        return BlockKind::Quote;
    }

    if content.lines().all(|line| line.starts_with("- ")) {
        return BlockKind::UnorderedList;
    }

    if is_ordered_list(content) {
        return BlockKind::OrderedList;
    }

    BlockKind::Paragraph
}

/// Every line is `<n>.` plus a separator, numbered 1, 2, 3, ...
fn is_ordered_list(content: &str) -> bool {
    content.lines().enumerate().all(|(i, line)| {
        ORDERED_ITEM_RE
            .captures(line)
            .and_then(|caps| caps[1].parse::<usize>().ok())
            == Some(i + 1)
    })
}

fn list_item(text: &str) -> Result<HtmlNode> {
    Ok(HtmlNode::parent("li", text_to_children(text)?))
}

fn text_to_children(text: &str) -> Result<Vec<HtmlNode>> {
    Ok(tokenize(text)?
        .into_iter()
        .map(|span| span.to_html_node())
        .collect())
}
