//! Per-token decoration of formatted output
//!
//! Every token the serializer writes has a [`Role`]. A [`StyleResolver`] maps each role to a
//! [`Decoration`], applied to exactly the characters of that token as the line is built.
//!
//! Removing every decoration from decorated output with [`strip_sgr`] gives back the plain output.
use crate::error::{Error, ErrorKind, Result};
use std::{borrow::Cow, str::FromStr, sync::Arc};

/// The syntactic role of a token in formatted output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// `xm` in `xm:name="value"`
    AttributeNamespacePrefix,

    /// `name` in `xm:name="value"`
    AttributeNodeName,

    /// `:`, `="` and `"` around an attribute
    AttributeSyntax,

    /// `value` in `name="value"`
    AttributeValue,

    /// The content of a CDATA section
    CdataData,

    /// `<![CDATA[` and `]]>`
    CdataSyntax,

    /// The content of a comment
    CommentData,

    /// `<!--` and `-->`
    CommentSyntax,

    /// `ns` in `<ns:tag>`
    ElementNamespacePrefix,

    /// `tag` in `<ns:tag>`
    ElementNodeName,

    /// `<`, `</`, `:`, ` />` and `>` around an element name
    ElementSyntax,

    /// `data` in `<?target data?>`
    ProcessingInstructionData,

    /// `target` in `<?target data?>`
    ProcessingInstructionName,

    /// `<?`, the space before the data, and `?>`
    ProcessingInstructionSyntax,

    /// The content of a text node
    TextData,

    /// The quotes around a text node
    TextSyntax,
}
impl Role {
    /// Number of roles.
    pub const COUNT: usize = 16;

    /// Every role, in declaration order.
    pub const ALL: [Role; Role::COUNT] = [
        Role::AttributeNamespacePrefix,
        Role::AttributeNodeName,
        Role::AttributeSyntax,
        Role::AttributeValue,
        Role::CdataData,
        Role::CdataSyntax,
        Role::CommentData,
        Role::CommentSyntax,
        Role::ElementNamespacePrefix,
        Role::ElementNodeName,
        Role::ElementSyntax,
        Role::ProcessingInstructionData,
        Role::ProcessingInstructionName,
        Role::ProcessingInstructionSyntax,
        Role::TextData,
        Role::TextSyntax,
    ];

    /// The camelCase name of the role, as accepted in style overrides.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::AttributeNamespacePrefix => "attributeNamespacePrefix",
            Self::AttributeNodeName => "attributeNodeName",
            Self::AttributeSyntax => "attributeSyntax",
            Self::AttributeValue => "attributeValue",
            Self::CdataData => "cdataData",
            Self::CdataSyntax => "cdataSyntax",
            Self::CommentData => "commentData",
            Self::CommentSyntax => "commentSyntax",
            Self::ElementNamespacePrefix => "elementNamespacePrefix",
            Self::ElementNodeName => "elementNodeName",
            Self::ElementSyntax => "elementSyntax",
            Self::ProcessingInstructionData => "processingInstructionData",
            Self::ProcessingInstructionName => "processingInstructionName",
            Self::ProcessingInstructionSyntax => "processingInstructionSyntax",
            Self::TextData => "textData",
            Self::TextSyntax => "textSyntax",
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}
impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Role::ALL
            .into_iter()
            .find(|role| role.name() == s)
            .ok_or_else(|| ErrorKind::InvalidStyle(format!("unknown role `{s}`")).into())
    }
}

/// The ANSI SGR parameters used by [`StyleResolver::decorated`], one per role.
///
/// Roles of the same node family share a color: elements are blue, attributes yellow,
/// text the default foreground, comments grey, CDATA magenta, processing instructions cyan.
pub const DEFAULT_PALETTE: [(Role, &str); Role::COUNT] = [
    (Role::ElementSyntax, "34"),
    (Role::ElementNamespacePrefix, "2;34"),
    (Role::ElementNodeName, "1;34"),
    (Role::AttributeSyntax, "2;33"),
    (Role::AttributeNamespacePrefix, "3;33"),
    (Role::AttributeNodeName, "33"),
    (Role::AttributeValue, "1;33"),
    (Role::TextSyntax, "2;39"),
    (Role::TextData, "39"),
    (Role::CommentSyntax, "2;90"),
    (Role::CommentData, "3;90"),
    (Role::CdataSyntax, "2;35"),
    (Role::CdataData, "35"),
    (Role::ProcessingInstructionSyntax, "2;36"),
    (Role::ProcessingInstructionName, "1;36"),
    (Role::ProcessingInstructionData, "36"),
];

/// A function from a token to its decorated form.
pub type DecorateFn = dyn Fn(&str) -> String + Send + Sync;

/// How the tokens of one role are decorated.
#[derive(Clone, Default)]
pub enum Decoration {
    /// The token is written as-is
    #[default]
    Identity,

    /// The token is wrapped in an ANSI SGR sequence with these parameters, then reset:
    /// `ESC[<params>m token ESC[0m`
    Sgr(Cow<'static, str>),

    /// Any other transformation
    Custom(Arc<DecorateFn>),
}
impl Decoration {
    /// Decorate a custom way.
    pub fn custom(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(f))
    }

    /// Apply the decoration to a token.
    #[must_use]
    pub fn apply<'t>(&self, token: &'t str) -> Cow<'t, str> {
        match self {
            Self::Identity => Cow::Borrowed(token),
            Self::Sgr(params) => Cow::Owned(format!("\x1b[{params}m{token}\x1b[0m")),
            Self::Custom(f) => Cow::Owned(f(token)),
        }
    }
}
impl std::fmt::Debug for Decoration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identity => write!(f, "Identity"),
            Self::Sgr(params) => f.debug_tuple("Sgr").field(params).finish(),
            Self::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// Maps every [`Role`] to a [`Decoration`].
///
/// # Example
/// ```rust
/// use xmlpretty::{Decoration, Role, StyleResolver};
///
/// let style = StyleResolver::plain().with(Role::ElementNodeName, Decoration::custom(|t| t.to_uppercase()));
/// assert_eq!(style.paint(Role::ElementNodeName, "root"), "ROOT");
/// assert_eq!(style.paint(Role::TextData, "root"), "root");
/// ```
#[derive(Debug, Clone)]
pub struct StyleResolver {
    table: [Decoration; Role::COUNT],
}
impl StyleResolver {
    /// Every role is written as-is.
    #[must_use]
    pub fn plain() -> Self {
        Self {
            table: std::array::from_fn(|_| Decoration::Identity),
        }
    }

    /// Every role is colored with [`DEFAULT_PALETTE`].
    #[must_use]
    pub fn decorated() -> Self {
        DEFAULT_PALETTE
            .into_iter()
            .fold(Self::plain(), |style, (role, params)| {
                style.with(role, Decoration::Sgr(Cow::Borrowed(params)))
            })
    }

    /// Replace the decoration of one role.
    #[must_use]
    pub fn with(mut self, role: Role, decoration: Decoration) -> Self {
        self.table[role.index()] = decoration;
        self
    }

    /// Apply overrides of the form `role=params:role=params`.
    ///
    /// `params` are ANSI SGR parameters, like `1;31` for bold red.
    /// An empty `params` removes the decoration of that role.
    ///
    /// # Errors
    /// Fails on unknown roles, entries without `=`, or parameters that are not SGR codes.
    pub fn with_overrides(mut self, overrides: &str) -> Result<Self> {
        for entry in overrides.split(':').map(str::trim).filter(|e| !e.is_empty()) {
            let Some((role, params)) = entry.split_once('=') else {
                return Err(ErrorKind::InvalidStyle(format!("expected `role=params`, got `{entry}`")).into());
            };

            let role: Role = role.trim().parse()?;
            let params = params.trim();
            if !params.chars().all(|c| c.is_ascii_digit() || c == ';') {
                return Err(ErrorKind::InvalidStyle(format!(
                    "`{params}` is not a list of SGR codes for {role}"
                ))
                .into());
            }

            let decoration = if params.is_empty() {
                Decoration::Identity
            } else {
                Decoration::Sgr(Cow::Owned(params.to_string()))
            };
            self = self.with(role, decoration);
        }

        Ok(self)
    }

    /// Returns the decoration for a role.
    #[must_use]
    pub fn decoration(&self, role: Role) -> &Decoration {
        &self.table[role.index()]
    }

    /// True if no role is decorated.
    #[must_use]
    pub fn is_plain(&self) -> bool {
        self.table
            .iter()
            .all(|decoration| matches!(decoration, Decoration::Identity))
    }

    /// Decorate a token according to its role.
    ///
    /// Empty tokens are never decorated.
    #[must_use]
    pub fn paint<'t>(&self, role: Role, token: &'t str) -> Cow<'t, str> {
        if token.is_empty() {
            return Cow::Borrowed(token);
        }
        self.decoration(role).apply(token)
    }
}
impl Default for StyleResolver {
    fn default() -> Self {
        Self::plain()
    }
}

/// Remove every ANSI SGR sequence (`ESC[...m`) from the text.
#[must_use]
pub fn strip_sgr(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("\x1b[") {
        out.push_str(&rest[..start]);
        let seq = &rest[start + 2..];
        match seq.find(|c: char| !(c.is_ascii_digit() || c == ';')) {
            Some(end) if seq[end..].starts_with('m') => rest = &seq[end + 1..],
            _ => {
                out.push_str("\x1b[");
                rest = seq;
            }
        }
    }
    out.push_str(rest);
    out
}
