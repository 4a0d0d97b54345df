/// A span of a string in the input XML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StrSpan<'a> {
    /// The string slice.
    pub text: &'a str,

    /// The start position of the span in the input XML.
    pub start: usize,
}
impl<'a> StrSpan<'a> {
    /// Create a new span over `text`, starting at byte offset `start` of the source.
    #[must_use]
    pub fn new(text: &'a str, start: usize) -> Self {
        Self { text, start }
    }

    /// Create a span at the end of the string.
    #[must_use]
    pub fn end(str: &str) -> Self {
        let len = str.len();
        StrSpan {
            text: "",
            start: if len == 0 { 0 } else { len - 1 },
        }
    }

    /// Extend the range of this span to include the other span.
    pub fn extend(&mut self, other: &StrSpan<'a>, src: &'a str) {
        let start = self.start.min(other.start);
        let end = (self.start + self.len()).max(other.start + other.len());

        self.text = &src[start..end];
        self.start = start;
    }

    /// Returns the length of the span.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Return true if len == 0
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the start position of the span in the input XML.
    #[inline]
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Returns this span as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// Calculates the row and column of the span in the input XML.
    ///
    /// Warning: This is an expensive operation, and should be used for error reporting only.
    #[must_use]
    pub fn position(&self, source: &str) -> (usize, usize) {
        Self::position_in_text(self.start, source)
    }

    pub(crate) fn position_in_text(start: usize, source: &str) -> (usize, usize) {
        let mut row = 1;
        let mut col = 1;
        for (i, c) in source.char_indices() {
            if i == start {
                break;
            }
            if c == '\n' {
                row += 1;
                col = 1;
            } else {
                col += 1;
            }
        }

        (row, col)
    }
}

//
// xmlparser's span does not let us build one by hand, so we keep our own
impl<'a> From<xmlparser::StrSpan<'a>> for StrSpan<'a> {
    #[inline]
    fn from(span: xmlparser::StrSpan<'a>) -> StrSpan<'a> {
        StrSpan {
            text: span.as_str(),
            start: span.start(),
        }
    }
}

impl<'a> From<&'a str> for StrSpan<'a> {
    #[inline]
    fn from(text: &'a str) -> Self {
        StrSpan { text, start: 0 }
    }
}

impl AsRef<str> for StrSpan<'_> {
    #[inline]
    fn as_ref(&self) -> &str {
        self.text
    }
}
impl std::fmt::Display for StrSpan<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}
impl PartialEq<str> for StrSpan<'_> {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}
impl PartialEq<&str> for StrSpan<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}
impl PartialEq<StrSpan<'_>> for &str {
    fn eq(&self, other: &StrSpan<'_>) -> bool {
        *self == other.text
    }
}

/// Owned variant of `StrSpan`, kept by errors that outlive the source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct StringSpan {
    /// The string slice.
    pub text: String,

    /// The start position of the span in the input XML.
    pub start: usize,
}
impl StringSpan {
    /// Calculates the row and column of the span in the input XML.
    #[must_use]
    pub fn position(&self, source: &str) -> (usize, usize) {
        StrSpan::position_in_text(self.start, source)
    }

    /// Returns the start position of the span in the input XML.
    #[inline]
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }
}
impl From<StrSpan<'_>> for StringSpan {
    #[inline]
    fn from(span: StrSpan<'_>) -> StringSpan {
        StringSpan {
            text: span.text.to_string(),
            start: span.start,
        }
    }
}
impl AsRef<str> for StringSpan {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strspan_end() {
        let span = StrSpan::end("example");
        assert_eq!(span.as_str(), "");
        assert_eq!(span.start(), 6);
    }

    #[test]
    fn test_strspan_extend() {
        let src = "example text";
        let mut span1 = StrSpan::new(&src[0..7], 0);
        let span2 = StrSpan::new(&src[8..12], 8);
        span1.extend(&span2, src);
        assert_eq!(span1.as_str(), "example text");
        assert_eq!(span1.start(), 0);
    }

    #[test]
    fn test_strspan_position() {
        let source = "line1\nline2\nline3";
        let span = StrSpan::new("line2", 6);
        assert_eq!(span.position(source), (2, 1));

        let span = StrSpan::new("3", 16);
        assert_eq!(span.position(source), (3, 5));
    }

    #[test]
    fn test_string_span_keeps_position() {
        let source = "<a>\n  <b>";
        let span: StringSpan = StrSpan::new("<b>", 6).into();
        assert_eq!(span.as_ref(), "<b>");
        assert_eq!(span.position(source), (2, 3));
    }

    #[test]
    fn test_strspan_partial_eq() {
        let span = StrSpan::from("example");
        assert_eq!(span, "example");
        assert_eq!("example", span);
        assert!(!span.is_empty());
        assert!(StrSpan::default().is_empty());
    }
}
