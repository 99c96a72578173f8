//! Inline span tokenizer.
//!
//! Block text is turned into a flat sequence of [`TextSpan`]s by running a
//! fixed series of passes over a single plain span:
//!
//! 1. `**` delimits bold
//! 2. `_` delimits italic
//! 3. `` ` `` delimits code
//! 4. `![alt](url)` images
//! 5. `[text](url)` links
//!
//! Bold runs before italic so `**` is never read as two italic markers, and
//! images run before links because the link pattern is a suffix of the image
//! pattern. Every pass only touches spans that are still plain.

use once_cell::sync::Lazy;
use pagemark_core::HtmlNode;
use regex::Regex;
use tracing::{debug, trace};

use crate::{PagemarkError, Result};

static IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[([^\[\]]*)\]\(([^\(\)]*)\)").expect("valid image regex"));

// The optional `!` lets the link pass see (and skip) image patterns, since
// the regex crate has no look-behind.
static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(!?)\[([^\[\]]*)\]\(([^\(\)]*)\)").expect("valid link regex"));

/// Markup kind of an inline span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    Plain,
    Bold,
    Italic,
    Code,
    Link,
    Image,
}

impl SpanKind {
    /// Whether spans of this kind carry a URL
    pub fn has_url(self) -> bool {
        matches!(self, SpanKind::Link | SpanKind::Image)
    }
}

/// Span kinds produced by a delimiter pass; none of them carries a URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DelimiterKind {
    Bold,
    Italic,
    Code,
}

impl From<DelimiterKind> for SpanKind {
    fn from(kind: DelimiterKind) -> Self {
        match kind {
            DelimiterKind::Bold => SpanKind::Bold,
            DelimiterKind::Italic => SpanKind::Italic,
            DelimiterKind::Code => SpanKind::Code,
        }
    }
}

/// A run of inline text tagged with one markup kind.
///
/// `url` is present exactly when the kind is [`SpanKind::Link`] or
/// [`SpanKind::Image`]; the constructors keep it that way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSpan {
    text: String,
    kind: SpanKind,
    url: Option<String>,
}

impl TextSpan {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: SpanKind::Plain,
            url: None,
        }
    }

    /// Create a bold, italic or code span
    pub fn delimited(text: impl Into<String>, kind: DelimiterKind) -> Self {
        Self {
            text: text.into(),
            kind: kind.into(),
            url: None,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self::delimited(text, DelimiterKind::Bold)
    }

    pub fn italic(text: impl Into<String>) -> Self {
        Self::delimited(text, DelimiterKind::Italic)
    }

    pub fn code(text: impl Into<String>) -> Self {
        Self::delimited(text, DelimiterKind::Code)
    }

    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: SpanKind::Link,
            url: Some(url.into()),
        }
    }

    /// Create an image span; `alt` becomes the span text
    pub fn image(alt: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: alt.into(),
            kind: SpanKind::Image,
            url: Some(url.into()),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> SpanKind {
        self.kind
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Convert this span into a leaf HTML node
    pub fn to_html_node(self) -> HtmlNode {
        let url = self.url.unwrap_or_default();
        match self.kind {
            SpanKind::Plain => HtmlNode::text(self.text),
            SpanKind::Bold => HtmlNode::leaf("b", self.text),
            SpanKind::Italic => HtmlNode::leaf("i", self.text),
            SpanKind::Code => HtmlNode::leaf("code", self.text),
            SpanKind::Link => {
                HtmlNode::leaf_with_attrs("a", self.text, vec![("href", url.as_str())])
            }
            SpanKind::Image => HtmlNode::leaf_with_attrs(
                "img",
                "",
                vec![("src", url.as_str()), ("alt", self.text.as_str())],
            ),
        }
    }
}

/// Tokenize inline markdown into spans.
///
/// Fails with [`PagemarkError::MalformedMarkup`] when a bold, italic or code
/// delimiter is left unterminated.
pub fn tokenize(text: &str) -> Result<Vec<TextSpan>> {
    let spans = vec![TextSpan::plain(text)];
    let spans = split_delimiter(spans, "**", DelimiterKind::Bold)?;
    let spans = split_delimiter(spans, "_", DelimiterKind::Italic)?;
    let spans = split_delimiter(spans, "`", DelimiterKind::Code)?;
    let spans = split_images(spans);
    let spans = split_links(spans);
    trace!(spans = spans.len(), "Tokenized inline text");
    Ok(spans)
}

/// Split every plain span on `delimiter`, marking the enclosed regions as `kind`.
///
/// Text between an opening and closing delimiter becomes a `kind` span; text
/// outside stays plain. Empty fragments are dropped and non-plain spans pass
/// through untouched.
pub fn split_delimiter(
    spans: Vec<TextSpan>,
    delimiter: &str,
    kind: DelimiterKind,
) -> Result<Vec<TextSpan>> {
    let mut result = Vec::with_capacity(spans.len());

    for span in spans {
        if span.kind != SpanKind::Plain {
            result.push(span);
            continue;
        }

        let fragments: Vec<&str> = span.text.split(delimiter).collect();
        // Balanced delimiters always leave an odd number of fragments
        if fragments.len() % 2 == 0 {
            debug!(delimiter, text = %span.text, "Rejecting unterminated delimiter");
            return Err(PagemarkError::MalformedMarkup {
                delimiter: delimiter.to_string(),
                text: span.text.clone(),
            });
        }

        for (i, fragment) in fragments.into_iter().enumerate() {
            if fragment.is_empty() {
                continue;
            }
            result.push(if i % 2 == 0 {
                TextSpan::plain(fragment)
            } else {
                TextSpan::delimited(fragment, kind)
            });
        }
    }

    trace!(delimiter, spans = result.len(), "Delimiter pass");
    Ok(result)
}

/// Extract `![alt](url)` images from every plain span
pub fn split_images(spans: Vec<TextSpan>) -> Vec<TextSpan> {
    split_pattern(spans, &IMAGE_RE, SpanKind::Image)
}

/// Extract `[text](url)` links from every plain span, leaving image patterns alone
pub fn split_links(spans: Vec<TextSpan>) -> Vec<TextSpan> {
    split_pattern(spans, &LINK_RE, SpanKind::Link)
}

/// Collect the `(alt, url)` pairs of every image in `text`
pub fn extract_markdown_images(text: &str) -> Vec<(String, String)> {
    IMAGE_RE
        .captures_iter(text)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}

/// Collect the `(text, url)` pairs of every link in `text`, ignoring images
pub fn extract_markdown_links(text: &str) -> Vec<(String, String)> {
    LINK_RE
        .captures_iter(text)
        .filter(|caps| caps[1].is_empty())
        .map(|caps| (caps[2].to_string(), caps[3].to_string()))
        .collect()
}

fn split_pattern(spans: Vec<TextSpan>, pattern: &Regex, kind: SpanKind) -> Vec<TextSpan> {
    let mut result = Vec::with_capacity(spans.len());

    for span in spans {
        if span.kind != SpanKind::Plain {
            result.push(span);
            continue;
        }

        let text = span.text.as_str();
        let mut last = 0;

        for caps in pattern.captures_iter(text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            // Links: group 1 is the optional `!`, a present one means an image
            let (label, url) = match kind {
                SpanKind::Link if !caps[1].is_empty() => continue,
                SpanKind::Link => (&caps[2], &caps[3]),
                _ => (&caps[1], &caps[2]),
            };

            if whole.start() > last {
                result.push(TextSpan::plain(&text[last..whole.start()]));
            }
            result.push(match kind {
                SpanKind::Image => TextSpan::image(label, url),
                _ => TextSpan::link(label, url),
            });
            last = whole.end();
        }

        if last < text.len() {
            result.push(TextSpan::plain(&text[last..]));
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_plain_text() {
        assert_eq!(
            tokenize("Just some text").unwrap(),
            vec![TextSpan::plain("Just some text")]
        );
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(tokenize("").unwrap(), vec![]);
    }

    #[test]
    fn test_split_bold() {
        let spans = split_delimiter(
            vec![TextSpan::plain("This is **bold** text")],
            "**",
            DelimiterKind::Bold,
        )
        .unwrap();
        assert_eq!(
            spans,
            vec![
                TextSpan::plain("This is "),
                TextSpan::bold("bold"),
                TextSpan::plain(" text"),
            ]
        );
    }

    #[test]
    fn test_split_multiple_regions() {
        let spans = split_delimiter(
            vec![TextSpan::plain("_one_ and _two_")],
            "_",
            DelimiterKind::Italic,
        )
        .unwrap();
        assert_eq!(
            spans,
            vec![
                TextSpan::italic("one"),
                TextSpan::plain(" and "),
                TextSpan::italic("two"),
            ]
        );
    }

    #[test]
    fn test_split_skips_non_plain() {
        let spans = split_delimiter(
            vec![TextSpan::bold("a_b"), TextSpan::plain("c")],
            "_",
            DelimiterKind::Italic,
        )
        .unwrap();
        assert_eq!(spans, vec![TextSpan::bold("a_b"), TextSpan::plain("c")]);
    }

    #[rstest]
    #[case("This `is broken", "`")]
    #[case("This **is broken", "**")]
    #[case("This _is broken", "_")]
    fn test_unterminated_delimiter(#[case] text: &str, #[case] delimiter: &str) {
        assert_eq!(
            tokenize(text),
            Err(PagemarkError::MalformedMarkup {
                delimiter: delimiter.to_string(),
                text: text.to_string(),
            })
        );
    }

    #[test]
    fn test_bold_before_code() {
        assert_eq!(
            tokenize("Bold with `code` inside **bold**").unwrap(),
            vec![
                TextSpan::plain("Bold with "),
                TextSpan::code("code"),
                TextSpan::plain(" inside "),
                TextSpan::bold("bold"),
            ]
        );
    }

    #[test]
    fn test_all_delimiters() {
        assert_eq!(
            tokenize("This is **text** with an _italic_ word and a `code block`").unwrap(),
            vec![
                TextSpan::plain("This is "),
                TextSpan::bold("text"),
                TextSpan::plain(" with an "),
                TextSpan::italic("italic"),
                TextSpan::plain(" word and a "),
                TextSpan::code("code block"),
            ]
        );
    }

    #[test]
    fn test_image_before_link() {
        assert_eq!(
            tokenize("![alt](img.png) and [link](url)").unwrap(),
            vec![
                TextSpan::image("alt", "img.png"),
                TextSpan::plain(" and "),
                TextSpan::link("link", "url"),
            ]
        );
    }

    #[test]
    fn test_split_images() {
        let spans = split_images(vec![TextSpan::plain(
            "This is text with an ![image](https://i.imgur.com/zjjcJKZ.png) and another ![second image](https://i.imgur.com/3elNhQu.png)",
        )]);
        assert_eq!(
            spans,
            vec![
                TextSpan::plain("This is text with an "),
                TextSpan::image("image", "https://i.imgur.com/zjjcJKZ.png"),
                TextSpan::plain(" and another "),
                TextSpan::image("second image", "https://i.imgur.com/3elNhQu.png"),
            ]
        );
    }

    #[test]
    fn test_split_links_trailing_text() {
        let spans = split_links(vec![TextSpan::plain(
            "Visit [Boot.dev](https://www.boot.dev) for learning.",
        )]);
        assert_eq!(
            spans,
            vec![
                TextSpan::plain("Visit "),
                TextSpan::link("Boot.dev", "https://www.boot.dev"),
                TextSpan::plain(" for learning."),
            ]
        );
    }

    #[test]
    fn test_split_links_ignores_images() {
        let spans = split_links(vec![TextSpan::plain("see ![cat](cat.png)")]);
        assert_eq!(spans, vec![TextSpan::plain("see ![cat](cat.png)")]);
    }

    #[test]
    fn test_split_without_match_keeps_span() {
        let spans = split_links(vec![TextSpan::plain("no links [here]")]);
        assert_eq!(spans, vec![TextSpan::plain("no links [here]")]);
    }

    #[test]
    fn test_extract_markdown_images() {
        assert_eq!(
            extract_markdown_images("Here is ![img1](url1.png) and here is ![img2](url2.jpg)"),
            vec![
                ("img1".to_string(), "url1.png".to_string()),
                ("img2".to_string(), "url2.jpg".to_string()),
            ]
        );
    }

    #[test]
    fn test_extract_image_and_link_separately() {
        let text = "Here is ![img](img.png) and a link: [Boot.dev](https://boot.dev)";
        assert_eq!(
            extract_markdown_images(text),
            vec![("img".to_string(), "img.png".to_string())]
        );
        assert_eq!(
            extract_markdown_links(text),
            vec![("Boot.dev".to_string(), "https://boot.dev".to_string())]
        );
    }

    #[rstest]
    #[case(DelimiterKind::Bold)]
    #[case(DelimiterKind::Italic)]
    #[case(DelimiterKind::Code)]
    fn test_delimited_spans_have_no_url(#[case] kind: DelimiterKind) {
        assert!(!SpanKind::from(kind).has_url());

        let spans = split_delimiter(vec![TextSpan::plain("a |b| c")], "|", kind).unwrap();
        assert_eq!(
            spans,
            vec![
                TextSpan::plain("a "),
                TextSpan::delimited("b", kind),
                TextSpan::plain(" c"),
            ]
        );
        assert!(spans.iter().all(|span| span.url().is_none()));
        assert_eq!(spans[1].kind(), SpanKind::from(kind));
    }

    #[test]
    fn test_url_invariant() {
        assert_eq!(TextSpan::plain("x").url(), None);
        assert_eq!(TextSpan::link("x", "/y").url(), Some("/y"));
        assert_eq!(TextSpan::image("x", "/y.png").url(), Some("/y.png"));
    }

    #[test]
    fn test_span_equality() {
        assert_eq!(TextSpan::bold("This is a text node"), TextSpan::bold("This is a text node"));
        assert_ne!(TextSpan::bold("This is a text node"), TextSpan::italic("This is a text node"));
        assert_ne!(TextSpan::link("a", "/x"), TextSpan::link("a", "/y"));
    }

    #[rstest]
    #[case(TextSpan::plain("Just text"), HtmlNode::text("Just text"))]
    #[case(TextSpan::bold("bold text"), HtmlNode::leaf("b", "bold text"))]
    #[case(TextSpan::italic("italic text"), HtmlNode::leaf("i", "italic text"))]
    #[case(TextSpan::code("print('hi')"), HtmlNode::leaf("code", "print('hi')"))]
    #[case(
        TextSpan::link("Boot.dev", "https://www.boot.dev"),
        HtmlNode::leaf_with_attrs("a", "Boot.dev", vec![("href", "https://www.boot.dev")])
    )]
    #[case(
        TextSpan::image("alt text", "img/test.png"),
        HtmlNode::leaf_with_attrs("img", "", vec![("src", "img/test.png"), ("alt", "alt text")])
    )]
    fn test_to_html_node(#[case] span: TextSpan, #[case] expected: HtmlNode) {
        assert_eq!(span.to_html_node(), expected);
    }
}
