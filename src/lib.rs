//! Lossless parser for HTML mixed with Django-style template directives.
//!
//! Produces a full-fidelity concrete syntax tree: every byte of the input,
//! including whitespace and malformed fragments, is present in the tree,
//! so `root.text()` always reproduces the source. That makes the tree
//! usable for formatters, linters, and highlighters that must rewrite or
//! annotate the original text.
//!
//! Parsing never fails. Broken input degrades to error tokens and a list
//! of [`SyntaxError`]s next to the tree.
//!
//! ```
//! let src = "{% if user %}<p>Hi {{ user.name }}</p>{% endif %}";
//! let parse = htmpl::parse(src);
//! assert!(parse.errors().is_empty());
//! assert_eq!(parse.syntax().text(), src);
//! ```
//!
//! The [`ast`] module layers typed accessors over the raw tree.

pub mod ast;
pub mod error;
pub mod html;
pub mod parser;
pub mod print;
pub mod syntax;

pub use error::{Error, SyntaxError};
pub use parser::{Parse, parse};
pub use syntax::{SyntaxKind, SyntaxNode, SyntaxToken, TemplateLanguage};
