//! The types of nodes and related data that can appear in an XML document.
use super::StrSpan;

mod name;
pub use name::*;

mod text;
pub use text::*;

mod element;
pub use element::*;

mod pi;
pub use pi::*;

mod cdata;
pub use cdata::*;

mod unsupported;
pub use unsupported::*;

/// A node in the document tree. Can be any of:
/// - `Element` - an element node
/// - `Text` - a text node
/// - `Cdata` - a CDATA node
/// - `Comment` - a comment node
/// - `ProcessingInstruction` - a processing instruction node
/// - `Unsupported` - a DTD or fragment, which cannot be formatted
///
/// The top level of a document can contain any of these except for text.
#[derive(Debug, Clone, PartialEq)]
pub enum Node<'src> {
    /// An element node.
    Element(ElementNode<'src>),

    /// A text node.
    Text(TextNode<'src>),

    /// A CDATA node.
    Cdata(CdataNode<'src>),

    /// A comment node.
    Comment(StrSpan<'src>),

    /// A processing instruction node.
    ProcessingInstruction(ProcessingInstructionNode<'src>),

    /// A node with no rendering rule.
    Unsupported(UnsupportedNode<'src>),
}
impl<'src> Node<'src> {
    /// Returns the span of the node in the original source.
    #[must_use]
    pub fn span(&self) -> &StrSpan<'src> {
        match self {
            Self::Element(node) => node.span(),
            Self::Text(node) => node.span(),
            Self::Cdata(node) => node.span(),
            Self::Comment(span) => span,
            Self::ProcessingInstruction(node) => node.span(),
            Self::Unsupported(node) => node.span(),
        }
    }

    /// Returns the element, if this node is one.
    #[must_use]
    pub fn as_element(&self) -> Option<&ElementNode<'src>> {
        match self {
            Self::Element(node) => Some(node),
            _ => None,
        }
    }
}
