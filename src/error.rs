//! Error handling for reading, parsing and formatting documents
use crate::{StrSpan, StringSpan, UnsupportedKind};

/// A result type for the formatter, which can be either a successful value or an error.
pub type Result<T> = std::result::Result<T, Error>;

/// An error that aborted formatting a document.
///
/// Every error is fatal for the run; there is no partial output.
#[derive(Debug)]
pub struct Error {
    /// Where in the source the error occurred, if it relates to a location
    pub context: Option<Box<ErrorContext>>,

    /// The kind of error that occurred
    pub kind: ErrorKind,
}
impl Error {
    /// Creates a new `Error` pointing into the source document
    #[must_use]
    pub fn new(kind: ErrorKind, context: ErrorContext) -> Self {
        Self {
            context: Some(Box::new(context)),
            kind,
        }
    }

    /// Creates a new `Error` that has no location in the source
    #[must_use]
    pub fn bare(kind: ErrorKind) -> Self {
        Self {
            context: None,
            kind,
        }
    }

    /// Returns the kind of error that occurred
    #[must_use]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}
impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Some(context) = &self.context else {
            return write!(f, "{}", self.kind);
        };

        write!(f, "{context}")?;
        for line in self.kind.to_string().lines() {
            writeln!(f, "= {line}")?;
        }
        Ok(())
    }
}
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}
impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::bare(kind)
    }
}
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::bare(ErrorKind::Io(err))
    }
}

/// The kind of error that aborted formatting a document.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Standard input is an interactive terminal instead of a pipe or file
    #[error("Input must be piped in, but standard input is a terminal")]
    InputNotPiped,

    /// The input could not be turned into a document tree
    #[error("Your input XML could not be parsed: {0}")]
    Parse(#[from] ParseError),

    /// The tree holds a node that has no rendering rule
    #[error("Unsupported node kind: {0}")]
    UnsupportedNodeKind(UnsupportedKind),

    /// A style override could not be understood
    #[error("Invalid style: {0}")]
    InvalidStyle(String),

    /// IO error occurred while reading input or writing output
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The reason the parser could not build a tree.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The tokenizer rejected the input
    #[error("{0}")]
    Xml(#[from] xmlparser::Error),

    /// Input ended before a root element was found
    #[error("End of file reached unexpectedly")]
    UnexpectedEof,

    /// Input ended with an element left open
    #[error("Unclosed tag: {0}")]
    UnclosedTag(String),

    /// A closing tag does not match the element it closes
    #[error("Mismatched closing tag: expected </{expected}>, found </{found}>")]
    MismatchedTag {
        /// Name of the open element
        expected: String,

        /// Name in the closing tag
        found: String,
    },

    /// The XML declaration was not first
    #[error("The <?xml> declaration must appear at the start of the document")]
    DeclarationNotFirst,

    /// A token appeared where the document structure does not allow it
    #[error("{0}")]
    Unexpected(String),
}

/// Context describing the error location in the source document.
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// Full source of the document that was parsed, for row/col calculation.
    pub source: String,

    /// Position of the error in the source.
    pub span: StringSpan,
}
impl ErrorContext {
    /// Creates a new `ErrorContext` with the given source, and span.
    #[must_use]
    pub fn new(source: &str, span: StrSpan) -> Self {
        Self {
            source: source.to_string(),
            span: span.into(),
        }
    }

    /// Returns the row and column of the error in the source.
    #[must_use]
    pub fn position(&self) -> (usize, usize) {
        self.span.position(&self.source)
    }
}
impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let span = self.span.as_ref();
        let line = span.split('\n').next().unwrap_or(span);

        if !line.is_empty() {
            writeln!(f, "| {line}")?;
        }

        if self.span.start() > 0 {
            let (row, col) = self.position();
            writeln!(f, "= At {row}:{col}")?;
        }
        Ok(())
    }
}

/// Returns early with an [`Error`] located in the source.
///
/// - `bail!(src, span, kind)` points at `span`
/// - `bail!(src, kind)` points at the end of the source
/// - `bail!(src, span, msg = "...", args)` raises [`ParseError::Unexpected`]
macro_rules! bail {
    ($src:expr, $span:expr, msg = $($fmt:tt)+) => {
        return Err($crate::error::Error::new(
            $crate::error::ParseError::Unexpected(format!($($fmt)+)).into(),
            $crate::error::ErrorContext::new($src, $span.into()),
        ))
    };
    ($src:expr, $span:expr, $kind:expr) => {
        return Err($crate::error::Error::new(
            $kind.into(),
            $crate::error::ErrorContext::new($src, $span.into()),
        ))
    };
    ($src:expr, $kind:expr) => {
        return Err($crate::error::Error::new(
            $kind.into(),
            $crate::error::ErrorContext::new($src, $crate::StrSpan::end($src)),
        ))
    };
}
pub(crate) use bail;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_context() {
        let src = "<a>\n  <b></c>\n</a>";
        let err = Error::new(
            ParseError::MismatchedTag {
                expected: "b".to_string(),
                found: "c".to_string(),
            }
            .into(),
            ErrorContext::new(src, StrSpan::new("</c>", 9)),
        );

        let text = err.to_string();
        assert_eq!(
            text,
            "| </c>\n= At 2:6\n= Your input XML could not be parsed: Mismatched closing tag: expected </b>, found </c>\n"
        );
    }

    #[test]
    fn test_display_without_context() {
        let err = Error::from(ErrorKind::InputNotPiped);
        assert_eq!(
            err.to_string(),
            "Input must be piped in, but standard input is a terminal"
        );
        assert!(err.context.is_none());
    }

    #[test]
    fn test_source_skips_kind() {
        use std::error::Error as _;

        let err = Error::from(ErrorKind::InputNotPiped);
        assert!(err.source().is_none());

        let io = std::io::Error::other("broken pipe");
        let err = Error::from(ErrorKind::Io(io));
        assert_eq!(err.source().map(ToString::to_string).as_deref(), Some("broken pipe"));
    }

    #[test]
    fn test_bail_variants() {
        fn at_span(src: &str) -> Result<()> {
            bail!(src, StrSpan::new("x", 2), ParseError::UnexpectedEof);
        }
        fn at_end(src: &str) -> Result<()> {
            bail!(src, ErrorKind::UnsupportedNodeKind(UnsupportedKind::Fragment));
        }
        fn with_msg(src: &str) -> Result<()> {
            bail!(src, StrSpan::new("x", 2), msg = "Unexpected {} here", "thing");
        }

        let err = at_span("abx").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Parse(ParseError::UnexpectedEof)));
        assert_eq!(err.context.unwrap().position(), (1, 3));

        let err = at_end("abx").unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::UnsupportedNodeKind(UnsupportedKind::Fragment)
        ));

        let err = with_msg("abx").unwrap_err();
        match err.kind {
            ErrorKind::Parse(ParseError::Unexpected(msg)) => assert_eq!(msg, "Unexpected thing here"),
            other => panic!("unexpected kind {other:?}"),
        }
    }
}
