//! Parsing entry point.

mod grammar;
mod scanner;

use rowan::GreenNode;

use crate::error::SyntaxError;
use crate::syntax::SyntaxNode;

/// Result of parsing a template document.
///
/// Parsing is total: every input produces a tree covering the full text,
/// with problems reported as [`SyntaxError`]s alongside it rather than as
/// a failure.
#[derive(Debug, Clone)]
pub struct Parse {
    green: GreenNode,
    errors: Vec<SyntaxError>,
}

impl Parse {
    /// Root of the syntax tree.
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn green(&self) -> &GreenNode {
        &self.green
    }

    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    /// The tree if the input was well formed, the diagnostics otherwise.
    pub fn ok(self) -> Result<SyntaxNode, Vec<SyntaxError>> {
        if self.errors.is_empty() {
            Ok(SyntaxNode::new_root(self.green))
        } else {
            Err(self.errors)
        }
    }
}

/// Parse a template document.
pub fn parse(input: &str) -> Parse {
    let _span = tracing::debug_span!("parse", len = input.len()).entered();
    let (green, errors) = grammar::parse(input);
    tracing::debug!(errors = errors.len(), "parsed document");
    Parse { green, errors }
}
