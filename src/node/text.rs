use crate::StrSpan;

/// A span of text inside an element of the document tree.
///
/// The text is kept exactly as written in the source; entity references are not expanded.
#[derive(Debug, Clone, PartialEq)]
pub struct TextNode<'src> {
    /// The span of the text node in the input XML.
    span: StrSpan<'src>,

    /// The text of the node
    text: StrSpan<'src>,
}
impl<'src> TextNode<'src> {
    /// Create a new text node.
    pub fn new(span: impl Into<StrSpan<'src>>, text: impl Into<StrSpan<'src>>) -> Self {
        Self {
            span: span.into(),
            text: text.into(),
        }
    }

    /// Returns the span of the node in the original source.
    #[must_use]
    pub fn span(&self) -> &StrSpan<'src> {
        &self.span
    }

    /// Returns the text of the node.
    #[must_use]
    pub fn text(&self) -> &StrSpan<'src> {
        &self.text
    }

    /// True when the text is nothing but whitespace, like the indentation between tags.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.as_str().trim().is_empty()
    }
}
