use super::{Node, NodeName};
use crate::StrSpan;

/// An element in the document tree, with a name, attributes, and children:
/// `<name attr="value">...</name>`
///
/// Duplicate attributes are kept in source order (searches use the last attribute with the same name).
#[derive(Debug, Clone, PartialEq)]
pub struct ElementNode<'src> {
    span: StrSpan<'src>,
    name: NodeName<'src>,
    attributes: Vec<NodeAttribute<'src>>,
    children: Vec<Node<'src>>,
}
impl<'src> ElementNode<'src> {
    /// Create a new element node with no attributes or children.
    pub fn new<T: Into<StrSpan<'src>>>(prefix: Option<T>, local: T) -> Self {
        Self {
            span: StrSpan::default(),
            name: NodeName::new(prefix, local),
            attributes: vec![],
            children: vec![],
        }
    }

    pub(crate) fn with_span(mut self, span: impl Into<StrSpan<'src>>) -> Self {
        self.span = span.into();
        self
    }

    /// Append a child node.
    pub fn push_child(&mut self, child: Node<'src>) {
        self.children.push(child);
    }

    /// Append an attribute.
    pub fn push_attribute(&mut self, attribute: NodeAttribute<'src>) {
        self.attributes.push(attribute);
    }

    pub(crate) fn extend_span(&mut self, span: &StrSpan<'src>, src: &'src str) {
        self.span.extend(span, src);
    }

    /// Get the span of the node in the original source.
    #[must_use]
    pub fn span(&self) -> &StrSpan<'src> {
        &self.span
    }

    /// Get the name of the node.
    #[must_use]
    pub fn name(&self) -> &NodeName<'src> {
        &self.name
    }

    /// Get the attributes of the node, in source order.
    #[must_use]
    pub fn attributes(&self) -> &[NodeAttribute<'src>] {
        &self.attributes
    }

    /// Get the children of the node, in source order.
    #[must_use]
    pub fn children(&self) -> &[Node<'src>] {
        &self.children
    }

    /// An element with no children is written as a single `<name />` tag.
    #[must_use]
    pub fn is_self_closing(&self) -> bool {
        self.children.is_empty()
    }
}

/// An attribute set on an element, with a name and value:
/// `name="value"`
///
/// The value is kept exactly as written in the source; entity references are not expanded.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeAttribute<'src> {
    span: StrSpan<'src>,
    name: NodeName<'src>,
    value: StrSpan<'src>,
}
impl<'src> NodeAttribute<'src> {
    /// Create a new attribute.
    pub fn new<T: Into<StrSpan<'src>>>(prefix: Option<T>, local: T, value: T) -> Self {
        Self {
            span: StrSpan::default(),
            name: NodeName::new(prefix, local),
            value: value.into(),
        }
    }

    pub(crate) fn with_span(mut self, span: impl Into<StrSpan<'src>>) -> Self {
        self.span = span.into();
        self
    }

    /// Returns the name of the attribute.
    #[must_use]
    pub fn name(&self) -> &NodeName<'src> {
        &self.name
    }

    /// Returns the value of the attribute.
    #[must_use]
    pub fn value(&self) -> &StrSpan<'src> {
        &self.value
    }

    /// Returns the span of the attribute in the original source
    #[must_use]
    pub fn span(&self) -> &StrSpan<'src> {
        &self.span
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_closing() {
        let mut node = ElementNode::new(None, "root");
        assert!(node.is_self_closing());

        node.push_child(Node::Element(ElementNode::new(None, "child")));
        assert!(!node.is_self_closing());
        assert_eq!(node.children().len(), 1);
    }

}
