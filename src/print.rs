//! Tree rendering for the CLI and for golden-style assertions.

use serde::Serialize;

use crate::syntax::{SyntaxKind, SyntaxNode};

/// Tokens that carry no content of their own and are left out of the
/// s-expression rendering. The tree itself keeps them; this is display
/// policy only.
fn is_silent_token(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::WHITESPACE
            | SyntaxKind::LT
            | SyntaxKind::LT_SLASH
            | SyntaxKind::LT_BANG
            | SyntaxKind::GT
            | SyntaxKind::SLASH_GT
            | SyntaxKind::EQ
            | SyntaxKind::QUOTE
            | SyntaxKind::EXPR_OPEN
            | SyntaxKind::EXPR_CLOSE
            | SyntaxKind::STMT_OPEN
            | SyntaxKind::STMT_CLOSE
            | SyntaxKind::COMMENT_OPEN
            | SyntaxKind::COMMENT_CLOSE
            | SyntaxKind::COMMENT_CONTENT
            | SyntaxKind::PIPE
            | SyntaxKind::COLON
            | SyntaxKind::COMMA
            | SyntaxKind::DOCTYPE_KW
            | SyntaxKind::DOCTYPE_CONTENT
    )
}

fn kind_name(kind: SyntaxKind) -> String {
    format!("{kind:?}").to_lowercase()
}

/// Compact s-expression over the named structure of the tree, in the
/// style of grammar debugging dumps: `(element (start_tag (tag_name)) ...)`.
pub fn to_sexp(node: &SyntaxNode) -> String {
    let mut out = String::new();
    write_sexp(node, &mut out);
    out
}

fn write_sexp(node: &SyntaxNode, out: &mut String) {
    out.push('(');
    out.push_str(&kind_name(node.kind()));
    for child in node.children_with_tokens() {
        match child {
            rowan::NodeOrToken::Node(n) => {
                out.push(' ');
                write_sexp(&n, out);
            }
            rowan::NodeOrToken::Token(t) => {
                if !is_silent_token(t.kind()) {
                    out.push(' ');
                    out.push('(');
                    out.push_str(&kind_name(t.kind()));
                    out.push(')');
                }
            }
        }
    }
    out.push(')');
}

/// Serializable mirror of the tree for `--json` output.
#[derive(Debug, Serialize)]
pub struct JsonNode {
    pub kind: String,
    pub start: u32,
    pub end: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<JsonNode>,
}

pub fn to_json(node: &SyntaxNode) -> JsonNode {
    let range = node.text_range();
    JsonNode {
        kind: kind_name(node.kind()),
        start: range.start().into(),
        end: range.end().into(),
        text: None,
        children: node
            .children_with_tokens()
            .filter_map(|child| match child {
                rowan::NodeOrToken::Node(n) => Some(to_json(&n)),
                rowan::NodeOrToken::Token(t) => {
                    if t.kind().is_trivia() {
                        return None;
                    }
                    let range = t.text_range();
                    Some(JsonNode {
                        kind: kind_name(t.kind()),
                        start: range.start().into(),
                        end: range.end().into(),
                        text: Some(t.text().to_string()),
                        children: Vec::new(),
                    })
                }
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn sexp_shows_structure_without_trivia() {
        let root = parse("<p>{{ x }}</p>").syntax();
        assert_eq!(
            to_sexp(&root),
            "(document (element (start_tag (tag_name)) (variable (variable_name)) (end_tag (tag_name))))"
        );
    }

    #[test]
    fn json_tokens_carry_text() {
        let root = parse("hi").syntax();
        let json = to_json(&root);
        assert_eq!(json.kind, "document");
        assert_eq!(json.children[0].text.as_deref(), Some("hi"));
    }
}
