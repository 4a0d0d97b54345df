use crate::StrSpan;

/// The node kinds that are kept in the tree but cannot be formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnsupportedKind {
    /// A `<!DOCTYPE ...>` declaration, including its internal subset
    DocumentType,

    /// A detached group of nodes with no element around them
    Fragment,
}
impl std::fmt::Display for UnsupportedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DocumentType => write!(f, "document type declaration"),
            Self::Fragment => write!(f, "document fragment"),
        }
    }
}

/// A node the formatter has no rendering rule for:  
/// `<!DOCTYPE root SYSTEM "root.dtd">`
#[derive(Debug, Clone, PartialEq)]
pub struct UnsupportedNode<'src> {
    span: StrSpan<'src>,
    kind: UnsupportedKind,
}
impl<'src> UnsupportedNode<'src> {
    /// Create a new unsupported node covering `span` in the source.
    pub fn new(kind: UnsupportedKind, span: impl Into<StrSpan<'src>>) -> Self {
        Self {
            span: span.into(),
            kind,
        }
    }

    /// Returns the span of the node in the original source.
    #[must_use]
    pub fn span(&self) -> &StrSpan<'src> {
        &self.span
    }

    /// Returns which kind of node this is.
    #[must_use]
    pub fn kind(&self) -> UnsupportedKind {
        self.kind
    }
}
