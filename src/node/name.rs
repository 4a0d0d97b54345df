use crate::StrSpan;

/// The name of an element or attribute, with an optional prefix:  
/// `prefix:local`
#[derive(Debug, Clone, Copy)]
pub struct NodeName<'src> {
    prefix: Option<StrSpan<'src>>,
    local: StrSpan<'src>,
}
impl<'src> NodeName<'src> {
    /// Create a new node name.
    ///
    /// An empty prefix is treated as no prefix at all.
    pub fn new<T: Into<StrSpan<'src>>>(prefix: Option<T>, local: T) -> Self {
        Self {
            prefix: prefix.map(Into::into).filter(|p: &StrSpan| !p.is_empty()),
            local: local.into(),
        }
    }

    /// Returns the prefix of the node name.
    #[must_use]
    pub fn prefix(&self) -> Option<&StrSpan<'src>> {
        self.prefix.as_ref()
    }

    /// Returns the local portion of the node name.
    #[must_use]
    pub fn local(&self) -> &StrSpan<'src> {
        &self.local
    }
}
impl std::fmt::Display for NodeName<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(prefix) = self.prefix {
            write!(f, "{prefix}:{local}", local = self.local)
        } else {
            write!(f, "{local}", local = self.local)
        }
    }
}
impl PartialEq for NodeName<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.prefix.map(|s| s.as_str()) == other.prefix.map(|s| s.as_str())
            && self.local.as_str() == other.local.as_str()
    }
}
impl PartialEq<&str> for NodeName<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.to_string().as_str() == *other
    }
}
impl PartialEq<str> for NodeName<'_> {
    fn eq(&self, other: &str) -> bool {
        self.to_string().as_str() == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_without_prefix() {
        let name = NodeName::new(None, "root");
        assert_eq!(name.to_string(), "root");
        assert!(name.prefix().is_none());
    }

    #[test]
    fn test_display_with_prefix() {
        let name = NodeName::new(Some("xs"), "element");
        assert_eq!(name.to_string(), "xs:element");
        assert_eq!(name.prefix().map(StrSpan::as_str), Some("xs"));
        assert_eq!(name.local(), &"element");
    }

    #[test]
    fn test_empty_prefix_is_dropped() {
        let name = NodeName::new(Some(""), "root");
        assert!(name.prefix().is_none());
        assert_eq!(name, "root");
        assert_eq!(name, NodeName::new(None, "root"));
    }
}
