use crate::{
    FormatOptions, StrSpan,
    error::{ParseError, Result, bail},
    node::{
        CdataNode, ElementNode, Node, NodeAttribute, NodeName, ProcessingInstructionNode,
        TextNode, UnsupportedKind, UnsupportedNode,
    },
};
use xmlparser::{ElementEnd, Token, Tokenizer};

/// Options controlling how source text becomes a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    /// Keep text nodes made only of whitespace.
    ///
    /// By default they are dropped, since they are usually the indentation of the source.
    pub keep_whitespace: bool,
}

/// An XML document that has been parsed into a tree.
/// All strings in the tree are references to the source string.
///
/// The top level of the tree contains, in source order:
/// - Any comments, processing instructions and DTDs before the root element
/// - The root element itself, which is a tree of nodes
/// - Any comments and processing instructions after the root element
///
/// Other things to note:
/// - The `<?xml ...?>` declaration is checked but not kept
/// - Names of elements and attributes can have a namespace prefix
/// - Text, attribute values, comments and CDATA are kept raw; entities are never expanded
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document<'src> {
    /// The top-level nodes of the document.
    pub children: Vec<Node<'src>>,

    /// The text the document was parsed from, for locating errors.
    source: &'src str,
}
impl<'src> Document<'src> {
    /// Creates a document from nodes built by hand, with no source text.
    #[must_use]
    pub fn from_nodes(children: Vec<Node<'src>>) -> Self {
        Self {
            children,
            source: "",
        }
    }

    /// Returns the text the document was parsed from.
    ///
    /// Empty for documents created with [`Document::from_nodes`].
    #[must_use]
    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Parses a document from the given source string.
    ///
    /// # Errors
    /// Returns errors if the XML is empty or not well-formed
    ///
    /// # Example
    /// ```rust
    /// use xmlpretty::Document;
    ///
    /// let doc = Document::parse("<test><test2>test</test2></test>").unwrap();
    /// assert_eq!(doc.root().unwrap().name(), "test");
    /// ```
    pub fn parse(src: &'src str) -> Result<Self> {
        Self::parse_with_options(src, &ParseOptions::default())
    }

    /// Returns the root element of the document.
    #[must_use]
    pub fn root(&self) -> Option<&ElementNode<'src>> {
        self.children.iter().find_map(Node::as_element)
    }

    /// Formats this document as a list of display lines.
    ///
    /// See [`crate::serialize`] for the rendering rules.
    ///
    /// # Errors
    /// Fails if the tree contains a node kind that cannot be formatted, like a DTD.
    pub fn to_lines(&self, options: &FormatOptions) -> Result<Vec<String>> {
        crate::serialize::serialize(self, options)
    }

    /// Formats this document as one string, lines joined with `\n`.
    ///
    /// # Errors
    /// Fails if the tree contains a node kind that cannot be formatted, like a DTD.
    ///
    /// # Example
    /// ```rust
    /// use xmlpretty::{Document, FormatOptions};
    ///
    /// let doc = Document::parse("<a><b/></a>").unwrap();
    /// let pretty = doc.to_pretty(&FormatOptions::default()).unwrap();
    /// assert_eq!(pretty, "<a>\n  <b />\n</a>");
    /// ```
    pub fn to_pretty(&self, options: &FormatOptions) -> Result<String> {
        Ok(self.to_lines(options)?.join("\n"))
    }

    /// Parses a document from the given source string.
    ///
    /// # Errors
    /// Returns errors if the XML is empty or not well-formed
    #[expect(clippy::too_many_lines, reason = "State machine; what did you expect")]
    pub fn parse_with_options(src: &'src str, options: &ParseOptions) -> Result<Self> {
        let mut tokenizer = Tokenizer::from(src);

        let mut state = ParserState::Prolog;
        let mut stack: Vec<ElementNode<'src>> = vec![];
        let mut children = vec![];
        let mut tokens = 0usize;

        loop {
            // Get the next token
            let Some(next) = tokenizer.next() else {
                if let Some(last) = stack.pop() {
                    bail!(
                        src,
                        *last.span(),
                        ParseError::UnclosedTag(last.name().to_string())
                    );
                }

                if state != ParserState::Epilog {
                    bail!(src, ParseError::UnexpectedEof);
                }

                tracing::debug!(tokens, nodes = children.len(), "parsed document");
                return Ok(Self {
                    children,
                    source: src,
                });
            };
            let next = match next {
                Ok(token) => token,
                Err(e) => bail!(src, ParseError::Xml(e)),
            };
            tokens += 1;

            match state {
                ParserState::Prolog => match next {
                    Token::ElementStart {
                        prefix,
                        local,
                        span,
                    } => {
                        stack.push(ElementNode::new(Some(prefix), local).with_span(span));
                        state = ParserState::TagAttributes;
                    }

                    Token::Declaration { span, .. } => {
                        if !children.is_empty() {
                            bail!(src, span, ParseError::DeclarationNotFirst);
                        }
                        tracing::trace!("skipping xml declaration");
                    }

                    Token::Comment { text, .. } => children.push(Node::Comment(text.into())),

                    Token::ProcessingInstruction {
                        target,
                        content,
                        span,
                    } => {
                        let node = ProcessingInstructionNode::new(span, target, content);
                        children.push(Node::ProcessingInstruction(node));
                    }

                    Token::EmptyDtd { span, .. } => {
                        let node = UnsupportedNode::new(UnsupportedKind::DocumentType, span);
                        children.push(Node::Unsupported(node));
                    }

                    Token::DtdStart { span, .. } => {
                        let span = skip_dtd(&mut tokenizer, src, span.into())?;
                        let node = UnsupportedNode::new(UnsupportedKind::DocumentType, span);
                        children.push(Node::Unsupported(node));
                    }

                    Token::Text { text } if text.as_str().trim().is_empty() => {}

                    _ => {
                        let span = next.span();
                        bail!(
                            src,
                            span,
                            msg = "Unexpected {} in prolog section",
                            next.name()
                        );
                    }
                },

                ParserState::TagAttributes => match next {
                    Token::Attribute {
                        prefix,
                        local,
                        value,
                        span,
                        ..
                    } => {
                        let attr = NodeAttribute::new(Some(prefix), local, value).with_span(span);
                        open_element(&mut stack, src, &next)?.push_attribute(attr);
                    }

                    Token::ElementEnd {
                        end: ElementEnd::Open,
                        ..
                    } => {
                        state = ParserState::TagChildren;
                    }

                    Token::ElementEnd {
                        end: ElementEnd::Empty,
                        span,
                    } => {
                        let Some(mut node) = stack.pop() else {
                            bail!(src, span, msg = "Bug; Cannot close tag; stack is empty!");
                        };

                        node.extend_span(&span.into(), src);
                        state = close_element(&mut stack, &mut children, node);
                    }

                    _ => {
                        let span = next.span();
                        bail!(
                            src,
                            span,
                            msg = "Unexpected {} in tag attributes",
                            next.name()
                        );
                    }
                },

                ParserState::TagChildren => match next {
                    Token::ElementStart {
                        prefix,
                        local,
                        span,
                    } => {
                        stack.push(ElementNode::new(Some(prefix), local).with_span(span));
                        state = ParserState::TagAttributes;
                    }

                    Token::Text { text } => {
                        let node = TextNode::new(text, text);
                        if !options.keep_whitespace && node.is_blank() {
                            continue;
                        }

                        open_element(&mut stack, src, &next)?.push_child(Node::Text(node));
                    }

                    Token::Cdata { text, span } => {
                        let node = CdataNode::new(span, text);
                        open_element(&mut stack, src, &next)?.push_child(Node::Cdata(node));
                    }

                    Token::Comment { text, .. } => {
                        open_element(&mut stack, src, &next)?.push_child(Node::Comment(text.into()));
                    }

                    Token::ProcessingInstruction {
                        target,
                        content,
                        span,
                    } => {
                        let node = ProcessingInstructionNode::new(span, target, content);
                        open_element(&mut stack, src, &next)?
                            .push_child(Node::ProcessingInstruction(node));
                    }

                    Token::ElementEnd {
                        end: ElementEnd::Close(prefix, local),
                        span,
                    } => {
                        let Some(mut node) = stack.pop() else {
                            bail!(src, span, msg = "Bug; Cannot close tag; stack is empty!");
                        };

                        let name = NodeName::new(Some(prefix), local);
                        if *node.name() != name {
                            bail!(
                                src,
                                span,
                                ParseError::MismatchedTag {
                                    expected: node.name().to_string(),
                                    found: name.to_string(),
                                }
                            );
                        }

                        node.extend_span(&span.into(), src);
                        state = close_element(&mut stack, &mut children, node);
                    }

                    _ => {
                        let span = next.span();
                        bail!(src, span, msg = "Unexpected {} inside tag", next.name());
                    }
                },

                ParserState::Epilog => match next {
                    Token::Comment { text, .. } => children.push(Node::Comment(text.into())),

                    Token::ProcessingInstruction {
                        target,
                        content,
                        span,
                    } => {
                        let node = ProcessingInstructionNode::new(span, target, content);
                        children.push(Node::ProcessingInstruction(node));
                    }

                    Token::Text { text } if text.as_str().trim().is_empty() => {}

                    _ => {
                        let span = next.span();
                        bail!(src, span, msg = "Unexpected {} after root", next.name());
                    }
                },
            }
        }
    }
}

#[derive(PartialEq, Debug, Clone, Copy)]
enum ParserState {
    Prolog,
    TagAttributes,
    TagChildren,
    Epilog,
}

/// The innermost element still open, which receives attributes and children.
fn open_element<'s, 'src>(
    stack: &'s mut [ElementNode<'src>],
    src: &str,
    token: &Token<'_>,
) -> Result<&'s mut ElementNode<'src>> {
    let Some(node) = stack.last_mut() else {
        bail!(
            src,
            token.span(),
            msg = "Bug; Cannot apply {}; stack is empty!",
            token.name()
        );
    };
    Ok(node)
}

/// Attach a finished element to its parent, or to the document if it was the root.
fn close_element<'src>(
    stack: &mut [ElementNode<'src>],
    children: &mut Vec<Node<'src>>,
    node: ElementNode<'src>,
) -> ParserState {
    if let Some(parent) = stack.last_mut() {
        parent.push_child(Node::Element(node));
        ParserState::TagChildren
    } else {
        children.push(Node::Element(node));
        ParserState::Epilog
    }
}

/// Consume a DTD's internal subset, returning the span of the whole declaration.
fn skip_dtd<'src>(
    tokenizer: &mut Tokenizer<'src>,
    src: &'src str,
    mut span: StrSpan<'src>,
) -> Result<StrSpan<'src>> {
    loop {
        match tokenizer.next() {
            None => bail!(src, span, ParseError::UnexpectedEof),
            Some(Err(e)) => bail!(src, span, ParseError::Xml(e)),
            Some(Ok(Token::DtdEnd { span: end })) => {
                span.extend(&end.into(), src);
                return Ok(span);
            }
            Some(Ok(
                Token::EntityDeclaration { .. }
                | Token::Comment { .. }
                | Token::ProcessingInstruction { .. },
            )) => {}
            Some(Ok(other)) => {
                bail!(
                    src,
                    other.span(),
                    msg = "Unexpected {} inside document type declaration",
                    other.name()
                );
            }
        }
    }
}

/// Span and name lookups the tokenizer does not provide.
trait TokenExt<'a> {
    fn span(&self) -> xmlparser::StrSpan<'a>;
    fn name(&self) -> &'static str;
}
impl<'a> TokenExt<'a> for Token<'a> {
    fn span(&self) -> xmlparser::StrSpan<'a> {
        match *self {
            Token::Declaration { span, .. }
            | Token::ProcessingInstruction { span, .. }
            | Token::Comment { span, .. }
            | Token::DtdStart { span, .. }
            | Token::EmptyDtd { span, .. }
            | Token::EntityDeclaration { span, .. }
            | Token::DtdEnd { span }
            | Token::ElementStart { span, .. }
            | Token::Attribute { span, .. }
            | Token::ElementEnd { span, .. }
            | Token::Cdata { span, .. } => span,
            Token::Text { text } => text,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Token::Declaration { .. } => "declaration",
            Token::ProcessingInstruction { .. } => "processing instruction",
            Token::Comment { .. } => "comment",
            Token::DtdStart { .. } | Token::EmptyDtd { .. } => "DTD",
            Token::EntityDeclaration { .. } => "entity declaration",
            Token::DtdEnd { .. } => "end of DTD",
            Token::ElementStart { .. } => "element",
            Token::Attribute { .. } => "attribute",
            Token::ElementEnd { .. } => "closing tag",
            Token::Text { .. } => "text",
            Token::Cdata { .. } => "CDATA",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn parse_error(src: &str) -> ErrorKind {
        match Document::parse(src) {
            Ok(doc) => panic!("expected an error, got {doc:?}"),
            Err(e) => e.kind,
        }
    }

    #[test]
    fn test_new_document() {
        let doc = Document::parse("<test><test2>test</test2></test>").unwrap();
        let root = doc.root().unwrap();
        assert_eq!(root.name(), "test");
        assert_eq!(root.children().len(), 1);
        assert_eq!(doc.children.len(), 1);
    }

    #[test]
    fn test_element_span_covers_whole_element() {
        let src = "<!--x--><a k=\"v\"><b/></a>";
        let doc = Document::parse(src).unwrap();
        assert_eq!(doc.children[1].span().as_str(), "<a k=\"v\"><b/></a>");
        assert_eq!(doc.children[1].span().position(doc.source()), (1, 9));
    }

    #[test]
    fn test_attributes_keep_order_and_prefix() {
        let doc = Document::parse(r#"<r z="1" xm:a="2" b="3"/>"#).unwrap();
        let root = doc.root().unwrap();
        let names: Vec<String> = root
            .attributes()
            .iter()
            .map(|a| a.name().to_string())
            .collect();
        assert_eq!(names, ["z", "xm:a", "b"]);
        assert_eq!(root.attributes()[1].name().prefix().unwrap(), &"xm");
        assert!(root.attributes()[0].name().prefix().is_none());
    }

    #[test]
    fn test_whitespace_text_is_dropped_by_default() {
        let src = "<a>\n  <b/>\n</a>";
        let doc = Document::parse(src).unwrap();
        assert_eq!(doc.root().unwrap().children().len(), 1);

        let options = ParseOptions {
            keep_whitespace: true,
        };
        let doc = Document::parse_with_options(src, &options).unwrap();
        assert_eq!(doc.root().unwrap().children().len(), 3);
    }

    #[test]
    fn test_text_is_raw() {
        let doc = Document::parse("<a> x &amp; y </a>").unwrap();
        let Node::Text(text) = &doc.root().unwrap().children()[0] else {
            panic!("expected text");
        };
        assert_eq!(text.text(), &" x &amp; y ");
    }

    #[test]
    fn test_document_with_prolog_and_epilog() {
        let src = "<?xml version=\"1.0\"?><!-- Comment --><root></root><?pi data?>";
        let doc = Document::parse(src).unwrap();
        assert_eq!(doc.children.len(), 3);
        assert!(matches!(doc.children[0], Node::Comment(_)));
        assert!(matches!(doc.children[1], Node::Element(_)));
        let Node::ProcessingInstruction(pi) = &doc.children[2] else {
            panic!("expected processing instruction");
        };
        assert_eq!(pi.target(), &"pi");
        assert_eq!(pi.content().unwrap(), &"data");
    }

    #[test]
    fn test_doctype_becomes_unsupported_node() {
        let src = "<!DOCTYPE note [<!ENTITY x \"y\">]><note/>";
        let doc = Document::parse(src).unwrap();
        let Node::Unsupported(node) = &doc.children[0] else {
            panic!("expected unsupported node");
        };
        assert_eq!(node.kind(), UnsupportedKind::DocumentType);
        assert!(node.span().as_str().starts_with("<!DOCTYPE"));

        let doc = Document::parse("<!DOCTYPE note SYSTEM \"note.dtd\"><note/>").unwrap();
        assert!(matches!(doc.children[0], Node::Unsupported(_)));
    }

    #[test]
    fn test_doctype_subset_with_comment_and_pi() {
        let src = "<!DOCTYPE note [<!-- c --><?pi x?><!ELEMENT note ANY>]><note/>";
        let doc = Document::parse(src).unwrap();
        let Node::Unsupported(node) = &doc.children[0] else {
            panic!("expected unsupported node");
        };
        assert_eq!(node.kind(), UnsupportedKind::DocumentType);
        assert!(node.span().as_str().ends_with("]>"));
        assert!(matches!(doc.children[1], Node::Element(_)));
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(matches!(parse_error(""), ErrorKind::Parse(_)));
        assert!(matches!(parse_error("   \n"), ErrorKind::Parse(_)));
    }

    #[test]
    fn test_parse_unclosed_tag() {
        match parse_error("<a><b/>") {
            ErrorKind::Parse(ParseError::UnclosedTag(name)) => assert_eq!(name, "a"),
            ErrorKind::Parse(_) => {}
            other => panic!("unexpected kind {other:?}"),
        }
        assert!(matches!(parse_error("<a>"), ErrorKind::Parse(_)));
    }

    #[test]
    fn test_parse_mismatched_tag() {
        match parse_error("<test><test2>test</test>") {
            ErrorKind::Parse(ParseError::MismatchedTag { expected, found }) => {
                assert_eq!(expected, "test2");
                assert_eq!(found, "test");
            }
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn test_parse_malformed_syntax() {
        assert!(matches!(parse_error("<a b=></a>"), ErrorKind::Parse(_)));
        assert!(matches!(parse_error("<a/><b/>"), ErrorKind::Parse(_)));
    }
}
