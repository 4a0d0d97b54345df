//! Pretty-printer for XML documents
//!
//! Parses a document into a borrowed tree, then writes it back out as indented display lines,
//! optionally with every token colored by its syntactic role.
//!
//! ```rust
//! use xmlpretty::{Document, FormatOptions, StyleResolver};
//!
//! let doc = Document::parse(r#"<a x="1"><b/>text</a>"#).unwrap();
//!
//! let plain = doc.to_pretty(&FormatOptions::default()).unwrap();
//! assert_eq!(plain, "<a x=\"1\">\n  <b />\n  \"text\"\n</a>");
//!
//! let options = FormatOptions::new(StyleResolver::decorated());
//! let colored = doc.to_pretty(&options).unwrap();
//! assert_eq!(xmlpretty::strip_sgr(&colored), plain);
//! ```
//!
//! This is a display format, not XML serialization: values are written exactly as in the source,
//! and text nodes are quoted.
#![warn(missing_docs)]

mod document;
pub use document::{Document, ParseOptions};

pub mod error;
pub use error::{Error, ErrorKind, ParseError, Result};

pub mod node;
pub use node::*;

pub mod serialize;
pub use serialize::{FormatOptions, INDENT};

mod strspan;
pub use strspan::{StrSpan, StringSpan};

pub mod style;
pub use style::{DEFAULT_PALETTE, Decoration, Role, StyleResolver, strip_sgr};
