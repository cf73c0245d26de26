//! Typed views over the syntax tree.
//!
//! Thin wrappers around [`SyntaxNode`] that know which children to look
//! for. They hold no data of their own; everything is re-read from the
//! tree on access, so they stay valid views of exactly what was parsed.

use crate::syntax::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

/// A typed wrapper that can be cast from a [`SyntaxNode`] of the right kind.
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(syntax: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;
}

fn child_token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(SyntaxElement::into_token)
        .find(|t| t.kind() == kind)
}

fn child_node<N: AstNode>(node: &SyntaxNode) -> Option<N> {
    node.children().find_map(N::cast)
}

fn child_nodes<N: AstNode>(node: &SyntaxNode) -> impl Iterator<Item = N> + use<N> {
    node.children().filter_map(N::cast)
}

macro_rules! ast_node {
    ($(#[$attr:meta])* $name:ident: $($kind:ident)|+) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            syntax: SyntaxNode,
        }

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                matches!(kind, $(SyntaxKind::$kind)|+)
            }

            fn cast(syntax: SyntaxNode) -> Option<Self> {
                Self::can_cast(syntax.kind()).then(|| Self { syntax })
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.syntax
            }
        }
    };
}

ast_node!(Document: DOCUMENT);
ast_node!(Doctype: DOCTYPE);
ast_node!(
    /// An HTML element, including the script/style variants.
    Element: ELEMENT | SCRIPT_ELEMENT | STYLE_ELEMENT
);
ast_node!(StartTag: START_TAG);
ast_node!(SelfClosingTag: SELF_CLOSING_TAG);
ast_node!(EndTag: END_TAG);
ast_node!(ErroneousEndTag: ERRONEOUS_END_TAG);
ast_node!(Attribute: ATTRIBUTE);
ast_node!(QuotedAttributeValue: QUOTED_ATTRIBUTE_VALUE);
ast_node!(Variable: VARIABLE);
ast_node!(Filter: FILTER);
ast_node!(
    /// A quoted string argument, possibly with trailing filters.
    TemplateString: STRING
);
ast_node!(PairedStatement: PAIRED_STATEMENT);
ast_node!(BranchStatement: BRANCH_STATEMENT);
ast_node!(UnpairedStatement: UNPAIRED_STATEMENT);
ast_node!(UnpairedComment: UNPAIRED_COMMENT);
ast_node!(PairedComment: PAIRED_COMMENT);

impl Document {
    pub fn elements(&self) -> impl Iterator<Item = Element> + use<> {
        child_nodes(&self.syntax)
    }
}

impl Element {
    pub fn start_tag(&self) -> Option<StartTag> {
        child_node(&self.syntax)
    }

    pub fn self_closing_tag(&self) -> Option<SelfClosingTag> {
        child_node(&self.syntax)
    }

    pub fn end_tag(&self) -> Option<EndTag> {
        child_node(&self.syntax)
    }

    /// Tag name as written, from whichever opening tag is present.
    pub fn name(&self) -> Option<SyntaxToken> {
        self.start_tag()
            .and_then(|t| t.name())
            .or_else(|| self.self_closing_tag().and_then(|t| t.name()))
    }

    /// Whether the element ends without a written closing tag.
    pub fn implicitly_closed(&self) -> bool {
        self.syntax.kind() == SyntaxKind::ELEMENT
            && self.end_tag().is_none()
            && self.self_closing_tag().is_none()
    }

    pub fn child_elements(&self) -> impl Iterator<Item = Element> + use<> {
        child_nodes(&self.syntax)
    }
}

impl StartTag {
    pub fn name(&self) -> Option<SyntaxToken> {
        child_token(&self.syntax, SyntaxKind::TAG_NAME)
    }

    pub fn attributes(&self) -> impl Iterator<Item = Attribute> + use<> {
        child_nodes(&self.syntax)
    }
}

impl SelfClosingTag {
    pub fn name(&self) -> Option<SyntaxToken> {
        child_token(&self.syntax, SyntaxKind::TAG_NAME)
    }

    pub fn attributes(&self) -> impl Iterator<Item = Attribute> + use<> {
        child_nodes(&self.syntax)
    }
}

impl EndTag {
    pub fn name(&self) -> Option<SyntaxToken> {
        child_token(&self.syntax, SyntaxKind::TAG_NAME)
    }
}

impl ErroneousEndTag {
    pub fn name(&self) -> Option<SyntaxToken> {
        child_token(&self.syntax, SyntaxKind::ERRONEOUS_END_TAG_NAME)
    }
}

impl Attribute {
    pub fn name(&self) -> Option<SyntaxToken> {
        child_token(&self.syntax, SyntaxKind::ATTRIBUTE_NAME)
    }

    /// Attribute value text, quoted or not, without the quotes.
    pub fn value(&self) -> Option<SyntaxToken> {
        child_token(&self.syntax, SyntaxKind::ATTRIBUTE_VALUE).or_else(|| {
            child_node::<QuotedAttributeValue>(&self.syntax).and_then(|q| q.value())
        })
    }
}

impl QuotedAttributeValue {
    pub fn value(&self) -> Option<SyntaxToken> {
        child_token(&self.syntax, SyntaxKind::ATTRIBUTE_VALUE)
    }
}

impl Variable {
    pub fn name(&self) -> Option<SyntaxToken> {
        child_token(&self.syntax, SyntaxKind::VARIABLE_NAME)
    }

    pub fn filters(&self) -> impl Iterator<Item = Filter> + use<> {
        child_nodes(&self.syntax)
    }
}

impl Filter {
    pub fn name(&self) -> Option<SyntaxToken> {
        child_token(&self.syntax, SyntaxKind::FILTER_NAME)
    }

    pub fn argument(&self) -> Option<SyntaxToken> {
        child_token(&self.syntax, SyntaxKind::FILTER_ARGUMENT)
    }
}

impl TemplateString {
    pub fn literal(&self) -> Option<SyntaxToken> {
        child_token(&self.syntax, SyntaxKind::STRING_LITERAL)
    }

    pub fn filters(&self) -> impl Iterator<Item = Filter> + use<> {
        child_nodes(&self.syntax)
    }
}

impl PairedStatement {
    /// Opening tag name (`if`, `for`, `block`, ...).
    pub fn name(&self) -> Option<SyntaxToken> {
        child_token(&self.syntax, SyntaxKind::TAG_NAME)
    }

    /// Terminator tag name (`endif`, `endfor`, ...), when present.
    pub fn end_name(&self) -> Option<SyntaxToken> {
        self.syntax
            .children_with_tokens()
            .filter_map(SyntaxElement::into_token)
            .filter(|t| t.kind() == SyntaxKind::TAG_NAME)
            .last()
            .filter(|t| {
                self.name()
                    .is_some_and(|open| open.text_range() != t.text_range())
            })
    }

    pub fn branches(&self) -> impl Iterator<Item = BranchStatement> + use<> {
        child_nodes(&self.syntax)
    }
}

impl BranchStatement {
    pub fn name(&self) -> Option<SyntaxToken> {
        child_token(&self.syntax, SyntaxKind::TAG_NAME)
    }
}

impl UnpairedStatement {
    pub fn name(&self) -> Option<SyntaxToken> {
        child_token(&self.syntax, SyntaxKind::TAG_NAME)
    }
}

impl PairedComment {
    /// Optional label after `{% comment %}`.
    pub fn label(&self) -> Option<SyntaxToken> {
        child_token(&self.syntax, SyntaxKind::IDENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn first<N: AstNode>(input: &str) -> N {
        let root = parse(input).syntax();
        root.descendants().find_map(N::cast).unwrap()
    }

    #[test]
    fn element_accessors() {
        let el: Element = first("<a href=\"/home\" download>text</a>");
        assert_eq!(el.name().unwrap().text(), "a");
        let attrs: Vec<_> = el.start_tag().unwrap().attributes().collect();
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs[0].value().unwrap().text(), "/home");
        assert!(attrs[1].value().is_none());
        assert!(!el.implicitly_closed());
    }

    #[test]
    fn implicit_closure_is_visible() {
        let el: Element = first("<li>one");
        assert!(el.implicitly_closed());
    }

    #[test]
    fn variable_filter_chain_in_order() {
        let var: Variable = first("{{ value|default:\"none\"|upper }}");
        assert_eq!(var.name().unwrap().text(), "value");
        let filters: Vec<_> = var.filters().collect();
        assert_eq!(filters.len(), 2);
        assert_eq!(filters[0].name().unwrap().text(), "default");
        assert_eq!(filters[0].argument().unwrap().text(), "none");
        assert_eq!(filters[1].name().unwrap().text(), "upper");
        assert!(filters[1].argument().is_none());
    }

    #[test]
    fn paired_statement_names() {
        let stmt: PairedStatement = first("{% block title %}x{% endblock %}");
        assert_eq!(stmt.name().unwrap().text(), "block");
        assert_eq!(stmt.end_name().unwrap().text(), "endblock");
    }

    #[test]
    fn paired_comment_label() {
        let c: PairedComment = first("{% comment note %}hidden{% endcomment %}");
        assert_eq!(c.label().unwrap().text(), "note");
    }
}
