//! Document formatting module
//!
//! Turns a [`Document`] into indented display lines:
//! - An element with children is an opening tag line, its children one level deeper, and a closing tag line
//! - An element with no children is a single `<name ... />` line
//! - Attributes are written inline in the opening tag, in source order
//! - Text is written quoted: `"text"`
//! - CDATA, comments and processing instructions keep their markers
//!
//! Values are written exactly as they appear in the source; nothing is escaped or unescaped.
//!
//! Use [`Document::to_lines`] or [`Document::to_pretty`] unless you need the free function.
use crate::{
    Document,
    error::{Error, ErrorContext, ErrorKind, Result},
    node::{CdataNode, ElementNode, Node, NodeAttribute, NodeName, ProcessingInstructionNode, TextNode},
    style::{Role, StyleResolver},
};
use std::borrow::Cow;

/// The indentation written per nesting level, unless [`FormatOptions::indent`] says otherwise.
pub const INDENT: &str = "  ";

/// Options controlling how a document is formatted.
#[derive(Debug, Clone)]
pub struct FormatOptions {
    /// Written once per nesting level at the start of each line.
    pub indent: Cow<'static, str>,

    /// Decoration applied to each token.
    pub style: StyleResolver,
}
impl FormatOptions {
    /// Format with the given style and the default indentation.
    #[must_use]
    pub fn new(style: StyleResolver) -> Self {
        Self {
            indent: Cow::Borrowed(INDENT),
            style,
        }
    }

    /// Indent by `width` spaces per level.
    #[must_use]
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent = Cow::Owned(" ".repeat(width));
        self
    }
}
impl Default for FormatOptions {
    fn default() -> Self {
        Self::new(StyleResolver::plain())
    }
}

/// Format a document as a list of display lines.
///
/// Leading and trailing blank lines are dropped.
///
/// # Errors
/// Fails with [`ErrorKind::UnsupportedNodeKind`] if the tree contains a DTD or a fragment.
/// Nothing is returned for the rest of the document in that case.
pub fn serialize(document: &Document<'_>, options: &FormatOptions) -> Result<Vec<String>> {
    let tokens = Tokens {
        style: &options.style,
    };
    let mut lines = vec![];

    let mut stack: Vec<_> = document
        .children
        .iter()
        .rev()
        .map(|child| (NodeTask::Open(child), 0))
        .collect();

    while let Some((task, depth)) = stack.pop() {
        let tab = options.indent.repeat(depth);

        match task {
            NodeTask::Close(name) => {
                lines.push(format!("{tab}{}", tokens.close_tag(name)));
            }

            NodeTask::Open(Node::Element(node)) => {
                lines.push(format!("{tab}{}", tokens.open_tag(node)));
                if node.is_self_closing() {
                    continue;
                }

                stack.push((NodeTask::Close(node.name()), depth));
                for child in node.children().iter().rev() {
                    stack.push((NodeTask::Open(child), depth + 1));
                }
            }

            NodeTask::Open(Node::Text(node)) => lines.push(format!("{tab}{}", tokens.text(node))),
            NodeTask::Open(Node::Cdata(node)) => lines.push(format!("{tab}{}", tokens.cdata(node))),
            NodeTask::Open(Node::Comment(text)) => {
                lines.push(format!("{tab}{}", tokens.comment(text.as_str())));
            }
            NodeTask::Open(Node::ProcessingInstruction(node)) => {
                lines.push(format!("{tab}{}", tokens.processing_instruction(node)));
            }

            NodeTask::Open(Node::Unsupported(node)) => {
                return Err(Error::new(
                    ErrorKind::UnsupportedNodeKind(node.kind()),
                    ErrorContext::new(document.source(), *node.span()),
                ));
            }
        }
    }

    trim_blank_lines(&mut lines);
    tracing::debug!(lines = lines.len(), "serialized document");
    Ok(lines)
}

fn trim_blank_lines(lines: &mut Vec<String>) {
    let trailing = lines.iter().rev().take_while(|l| l.trim().is_empty()).count();
    lines.truncate(lines.len() - trailing);

    let leading = lines.iter().take_while(|l| l.trim().is_empty()).count();
    lines.drain(..leading);
}

enum NodeTask<'a, 'src> {
    Open(&'a Node<'src>),
    Close(&'a NodeName<'src>),
}

/// Builds the text of each line, decorating every token by its role.
struct Tokens<'a> {
    style: &'a StyleResolver,
}
impl Tokens<'_> {
    fn push(&self, out: &mut String, role: Role, token: &str) {
        out.push_str(&self.style.paint(role, token));
    }

    fn name(&self, out: &mut String, name: &NodeName<'_>, roles: [Role; 3]) {
        let [prefix_role, local_role, syntax_role] = roles;
        if let Some(prefix) = name.prefix() {
            self.push(out, prefix_role, prefix.as_str());
            self.push(out, syntax_role, ":");
        }
        self.push(out, local_role, name.local().as_str());
    }

    fn element_name(&self, out: &mut String, name: &NodeName<'_>) {
        self.name(
            out,
            name,
            [Role::ElementNamespacePrefix, Role::ElementNodeName, Role::ElementSyntax],
        );
    }

    fn attribute(&self, out: &mut String, attribute: &NodeAttribute<'_>) {
        self.name(
            out,
            attribute.name(),
            [Role::AttributeNamespacePrefix, Role::AttributeNodeName, Role::AttributeSyntax],
        );
        self.push(out, Role::AttributeSyntax, "=\"");
        self.push(out, Role::AttributeValue, attribute.value().as_str());
        self.push(out, Role::AttributeSyntax, "\"");
    }

    fn open_tag(&self, node: &ElementNode<'_>) -> String {
        let mut out = String::new();
        self.push(&mut out, Role::ElementSyntax, "<");
        self.element_name(&mut out, node.name());

        for attribute in node.attributes() {
            out.push(' ');
            self.attribute(&mut out, attribute);
        }

        let end = if node.is_self_closing() { " />" } else { ">" };
        self.push(&mut out, Role::ElementSyntax, end);
        out
    }

    fn close_tag(&self, name: &NodeName<'_>) -> String {
        let mut out = String::new();
        self.push(&mut out, Role::ElementSyntax, "</");
        self.element_name(&mut out, name);
        self.push(&mut out, Role::ElementSyntax, ">");
        out
    }

    fn text(&self, node: &TextNode<'_>) -> String {
        let mut out = String::new();
        self.push(&mut out, Role::TextSyntax, "\"");
        self.push(&mut out, Role::TextData, node.text().as_str());
        self.push(&mut out, Role::TextSyntax, "\"");
        out
    }

    fn cdata(&self, node: &CdataNode<'_>) -> String {
        let mut out = String::new();
        self.push(&mut out, Role::CdataSyntax, "<![CDATA[");
        self.push(&mut out, Role::CdataData, node.content().as_str());
        self.push(&mut out, Role::CdataSyntax, "]]>");
        out
    }

    fn comment(&self, text: &str) -> String {
        let mut out = String::new();
        self.push(&mut out, Role::CommentSyntax, "<!--");
        self.push(&mut out, Role::CommentData, text);
        self.push(&mut out, Role::CommentSyntax, "-->");
        out
    }

    fn processing_instruction(&self, node: &ProcessingInstructionNode<'_>) -> String {
        let mut out = String::new();
        self.push(&mut out, Role::ProcessingInstructionSyntax, "<?");
        self.push(&mut out, Role::ProcessingInstructionName, node.target().as_str());

        // `<?target?>` when there is nothing to say
        if let Some(content) = node.content().filter(|c| !c.is_empty()) {
            self.push(&mut out, Role::ProcessingInstructionSyntax, " ");
            self.push(&mut out, Role::ProcessingInstructionData, content.as_str());
        }

        self.push(&mut out, Role::ProcessingInstructionSyntax, "?>");
        out
    }
}
