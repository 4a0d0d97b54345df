use crate::StrSpan;

/// A CDATA node:  
/// `<![CDATA[content]]>`
#[derive(Debug, Clone, PartialEq)]
pub struct CdataNode<'src> {
    span: StrSpan<'src>,
    content: StrSpan<'src>,
}
impl<'src> CdataNode<'src> {
    /// Create a new CDATA node.
    pub fn new<T: Into<StrSpan<'src>>>(span: T, content: T) -> Self {
        Self {
            span: span.into(),
            content: content.into(),
        }
    }

    /// Returns the span of the node in the original source.
    #[must_use]
    pub fn span(&self) -> &StrSpan<'src> {
        &self.span
    }

    /// Returns the content of the CDATA node.
    #[must_use]
    pub fn content(&self) -> &StrSpan<'src> {
        &self.content
    }
}
