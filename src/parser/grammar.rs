//! Grammar engine: recursive descent over the scanner, emitting the
//! green tree through a [`GreenNodeBuilder`].
//!
//! Parsing is total. Every byte of input lands in the tree as some token,
//! so `root.text()` always reproduces the source; malformed constructs
//! degrade to `ERROR` tokens plus a [`SyntaxError`] instead of aborting.
//!
//! Two stacks carry the context-sensitive state: the scanner's open-tag
//! stack (which end tags close which elements) and this module's
//! statement frames (which `{% end... %}` and branch tags are live).

use rowan::{GreenNode, GreenNodeBuilder, TextRange, TextSize};

use super::scanner::{Scanner, Token};
use crate::error::SyntaxError;
use crate::html;
use crate::syntax::SyntaxKind::{self, *};

/// Directive tags that open a `{% tag %}...{% endtag %}` region and have
/// no branch tags of their own.
const PLAIN_PAIRED_TAGS: &[&str] = &[
    "autoescape",
    "block",
    "blocktranslate",
    "ifchanged",
    "spaceless",
    "verbatim",
    "with",
];

/// One open paired statement.
struct Frame {
    /// `endif`, `endfor`, ...
    terminator: String,
    /// Branch tags valid directly inside (`elif`, `else`, `empty`).
    branches: &'static [&'static str],
}

pub(crate) struct Parser<'a> {
    scanner: Scanner<'a>,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
    frames: Vec<Frame>,
}

pub(crate) fn parse(input: &str) -> (GreenNode, Vec<SyntaxError>) {
    let mut p = Parser {
        scanner: Scanner::new(input),
        builder: GreenNodeBuilder::new(),
        errors: Vec::new(),
        frames: Vec::new(),
    };
    p.document();
    (p.builder.finish(), p.errors)
}

impl<'a> Parser<'a> {
    // =========================================================================
    // Builder plumbing
    // =========================================================================

    fn token(&mut self, tok: Token<'_>) {
        self.builder.token(tok.kind.into(), tok.text);
    }

    /// Consume the literal `s` as a token of `kind` if present.
    fn take(&mut self, s: &str, kind: SyntaxKind) -> bool {
        match self.scanner.punct(s, kind) {
            Some(tok) => {
                self.token(tok);
                true
            }
            None => false,
        }
    }

    fn expect(&mut self, s: &str, kind: SyntaxKind, message: &str) {
        if !self.take(s, kind) {
            self.error_here(message);
        }
    }

    fn ws(&mut self) {
        if let Some(tok) = self.scanner.whitespace() {
            self.token(tok);
        }
    }

    fn error_here(&mut self, message: &str) {
        let pos = TextSize::new(self.scanner.pos() as u32);
        self.errors.push(SyntaxError::new(message, TextRange::empty(pos)));
    }

    fn error_span(&mut self, message: &str, start: usize) {
        let range = TextRange::new(
            TextSize::new(start as u32),
            TextSize::new(self.scanner.pos() as u32),
        );
        self.errors.push(SyntaxError::new(message, range));
    }

    /// Consume one character as an `ERROR` token and report it.
    fn bump_error(&mut self, message: &str) {
        let start = self.scanner.pos();
        if let Some(tok) = self.scanner.error_char() {
            self.token(tok);
            self.error_span(message, start);
        }
    }

    /// Skip ahead to `closer`, emitting what we pass over as error and
    /// whitespace tokens. Stops early at anything a caller further up can
    /// make sense of.
    fn recover_until(&mut self, closer: &str) {
        loop {
            if self.scanner.at_eof() || self.scanner.starts_with(closer) {
                return;
            }
            if self.scanner.starts_with("{{")
                || self.scanner.starts_with("{%")
                || self.scanner.starts_with("{#")
                || self.scanner.peek_start_tag_name().is_some()
                || self.scanner.peek_end_tag_name().is_some()
            {
                return;
            }
            if let Some(tok) = self.scanner.whitespace() {
                self.token(tok);
                continue;
            }
            if let Some(tok) = self.scanner.error_char() {
                self.token(tok);
            }
        }
    }

    // =========================================================================
    // Document and node dispatch
    // =========================================================================

    fn document(&mut self) {
        self.builder.start_node(DOCUMENT.into());
        while !self.scanner.at_eof() {
            let before = self.scanner.pos();
            self.node();
            if self.scanner.pos() == before {
                self.bump_error("unexpected character");
            }
        }
        self.builder.finish_node();
    }

    /// One child at a content position: trivia, markup, or directive.
    fn node(&mut self) {
        if let Some(tok) = self.scanner.whitespace() {
            self.token(tok);
            return;
        }
        if self.scanner.starts_with("<!--") {
            self.html_comment();
            return;
        }
        if self.scanner.starts_with("<!") {
            self.doctype();
            return;
        }
        if self.scanner.peek_end_tag_name().is_some() {
            self.erroneous_end_tag();
            return;
        }
        if self.scanner.peek_start_tag_name().is_some() {
            self.element();
            return;
        }
        if self.scanner.starts_with("{{") {
            self.expression();
            return;
        }
        if self.scanner.starts_with("{#") {
            self.unpaired_comment();
            return;
        }
        if self.scanner.starts_with("{%") {
            self.statement();
            return;
        }
        if let Some(tok) = self.scanner.entity() {
            self.token(tok);
            return;
        }
        if let Some(tok) = self.scanner.text() {
            self.token(tok);
            return;
        }
        self.bump_error("unexpected character");
    }

    fn html_comment(&mut self) {
        let start = self.scanner.pos();
        if let Some(tok) = self.scanner.comment() {
            let terminated = tok.text.ends_with("-->");
            self.token(tok);
            if !terminated {
                self.error_span("unterminated comment", start);
            }
        }
    }

    fn doctype(&mut self) {
        self.builder.start_node(DOCTYPE.into());
        self.take("<!", LT_BANG);
        match self.scanner.doctype_kw() {
            Some(tok) => self.token(tok),
            None => self.error_here("expected `doctype`"),
        }
        if let Some(tok) = self.scanner.doctype_content() {
            self.token(tok);
        }
        self.expect(">", GT, "expected `>`");
        self.builder.finish_node();
    }

    // =========================================================================
    // Elements
    // =========================================================================

    fn element(&mut self) {
        let Some(name) = self.scanner.peek_start_tag_name() else {
            self.bump_error("expected tag name");
            return;
        };
        let name = name.to_ascii_lowercase();
        let kind = match name.as_str() {
            "script" => SCRIPT_ELEMENT,
            "style" => STYLE_ELEMENT,
            _ => ELEMENT,
        };
        self.builder.start_node(kind.into());
        if self.start_tag(&name) {
            // self-closing or void: no content, no end tag
            self.builder.finish_node();
            return;
        }
        if kind == ELEMENT {
            self.element_children(&name);
        } else {
            self.raw_children(&name);
        }
        self.builder.finish_node();
    }

    /// Parse `<name attr...>` or `<name attr.../>`. Returns true when the
    /// element is already complete (self-closing syntax or a void tag).
    fn start_tag(&mut self, name: &str) -> bool {
        let cp = self.builder.checkpoint();
        self.take("<", LT);
        if let Some(tok) = self.scanner.start_tag_name() {
            self.token(tok);
        }
        self.attributes();
        if self.take("/>", SLASH_GT) {
            self.builder.start_node_at(cp, SELF_CLOSING_TAG.into());
            self.builder.finish_node();
            self.scanner.pop_tag();
            return true;
        }
        self.builder.start_node_at(cp, START_TAG.into());
        self.expect(">", GT, "expected `>`");
        self.builder.finish_node();
        if html::is_void_element(name) {
            self.scanner.pop_tag();
            return true;
        }
        false
    }

    fn attributes(&mut self) {
        loop {
            self.ws();
            if self.scanner.at_eof()
                || self.scanner.starts_with(">")
                || self.scanner.starts_with("/>")
                || self.scanner.starts_with("<")
            {
                return;
            }
            if let Some(name) = self.scanner.attribute_name() {
                self.builder.start_node(ATTRIBUTE.into());
                self.token(name);
                if self.scanner.rest().trim_start().starts_with('=') {
                    self.ws();
                    self.take("=", EQ);
                    self.ws();
                    if self.scanner.starts_with("'") || self.scanner.starts_with("\"") {
                        self.quoted_attribute_value();
                    } else if let Some(value) = self.scanner.attribute_value() {
                        self.token(value);
                    } else {
                        self.error_here("expected attribute value");
                    }
                }
                self.builder.finish_node();
                continue;
            }
            self.bump_error("unexpected character in tag");
        }
    }

    fn quoted_attribute_value(&mut self) {
        self.builder.start_node(QUOTED_ATTRIBUTE_VALUE.into());
        let (quote, mark) = if self.scanner.starts_with("'") {
            (b'\'', "'")
        } else {
            (b'"', "\"")
        };
        self.take(mark, QUOTE);
        if let Some(value) = self.scanner.quoted_span(quote, ATTRIBUTE_VALUE) {
            self.token(value);
        }
        if !self.take(mark, QUOTE) {
            self.error_here("unterminated attribute value");
        }
        self.builder.finish_node();
    }

    /// Content loop for an ordinary element. Ends on the matching end tag,
    /// or implicitly: at end of input, when an end tag for an ancestor
    /// appears, when a sibling start tag forces closure (`<p>` rules), or
    /// when an enclosing statement's terminator or branch tag arrives.
    fn element_children(&mut self, name: &str) {
        loop {
            if let Some(tok) = self.scanner.whitespace() {
                self.token(tok);
                continue;
            }
            if self.scanner.at_eof() {
                self.scanner.pop_tag();
                return;
            }
            if let Some(stmt) = self.scanner.peek_statement_name() {
                if self.statement_stops_here(stmt) {
                    self.scanner.pop_tag();
                    return;
                }
            }
            if let Some(end_name) = self.scanner.peek_end_tag_name() {
                match self.scanner.open_depth(end_name) {
                    Some(0) => {
                        self.end_tag();
                        self.scanner.pop_tag();
                        return;
                    }
                    Some(_) => {
                        // closes an ancestor: leave it for the outer loop
                        self.scanner.pop_tag();
                        return;
                    }
                    None => {
                        self.erroneous_end_tag();
                        continue;
                    }
                }
            }
            if let Some(child) = self.scanner.peek_start_tag_name() {
                if html::closes_on_start_tag(name, &child.to_ascii_lowercase()) {
                    self.scanner.pop_tag();
                    return;
                }
            }
            let before = self.scanner.pos();
            self.node();
            if self.scanner.pos() == before {
                self.bump_error("unexpected character");
            }
        }
    }

    /// Content of a script or style element: one verbatim span, then the
    /// end tag.
    fn raw_children(&mut self, name: &str) {
        if let Some(tok) = self.scanner.raw_text(name) {
            self.token(tok);
        }
        if self.scanner.peek_end_tag_name().is_some() {
            self.end_tag();
        } else {
            self.error_here("missing closing tag");
        }
        self.scanner.pop_tag();
    }

    fn end_tag(&mut self) {
        self.builder.start_node(END_TAG.into());
        self.take("</", LT_SLASH);
        if let Some(tok) = self.scanner.end_tag_name() {
            self.token(tok);
        }
        self.ws();
        self.expect(">", GT, "expected `>`");
        self.builder.finish_node();
    }

    /// An end tag that closes nothing. Kept in the tree as its own node
    /// so later tooling can see exactly what was written.
    fn erroneous_end_tag(&mut self) {
        let start = self.scanner.pos();
        self.builder.start_node(ERRONEOUS_END_TAG.into());
        self.take("</", LT_SLASH);
        if let Some(tok) = self.scanner.end_tag_name() {
            self.builder
                .token(ERRONEOUS_END_TAG_NAME.into(), tok.text);
        }
        self.ws();
        self.expect(">", GT, "expected `>`");
        self.builder.finish_node();
        self.error_span("closing tag without matching open tag", start);
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    /// `{{ variable|filter:arg }}`. The braces stay in the parent node;
    /// only the variable and its filters form a subtree.
    fn expression(&mut self) {
        self.take("{{", EXPR_OPEN);
        self.ws();
        if self.scanner.starts_with("}}") {
            self.error_here("expected variable name");
            self.take("}}", EXPR_CLOSE);
            return;
        }
        self.variable();
        self.ws();
        if !self.take("}}", EXPR_CLOSE) {
            self.error_here("expected `}}`");
            self.recover_until("}}");
            self.take("}}", EXPR_CLOSE);
        }
    }

    fn variable(&mut self) {
        self.builder.start_node(VARIABLE.into());
        match self.scanner.variable_name() {
            Some(tok) => self.token(tok),
            None => self.error_here("expected variable name"),
        }
        self.filter_chain();
        self.builder.finish_node();
    }

    /// `|filter` repetitions following a variable or string.
    fn filter_chain(&mut self) {
        while self.scanner.rest().trim_start().starts_with('|') {
            self.ws();
            self.take("|", PIPE);
            self.ws();
            self.filter();
        }
    }

    fn filter(&mut self) {
        self.builder.start_node(FILTER.into());
        match self.scanner.ident(FILTER_NAME) {
            Some(tok) => self.token(tok),
            None => self.error_here("expected filter name"),
        }
        if let Some(colon) = self.scanner.punct(":", COLON) {
            self.token(colon);
            if self.scanner.starts_with("'") || self.scanner.starts_with("\"") {
                self.quoted_filter_argument();
            } else if let Some(arg) = self.scanner.filter_argument() {
                self.token(arg);
            } else {
                self.error_here("expected filter argument");
            }
        }
        self.builder.finish_node();
    }

    fn quoted_filter_argument(&mut self) {
        let (quote, mark) = if self.scanner.starts_with("'") {
            (b'\'', "'")
        } else {
            (b'"', "\"")
        };
        self.take(mark, QUOTE);
        if let Some(arg) = self.scanner.quoted_span(quote, FILTER_ARGUMENT) {
            self.token(arg);
        }
        if !self.take(mark, QUOTE) {
            self.error_here("unterminated filter argument");
        }
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn statement(&mut self) {
        match self.scanner.peek_statement_name() {
            Some("comment") => self.paired_comment(),
            Some("if") => self.paired_statement("if", &["elif", "else"]),
            Some("for") => self.paired_statement("for", &["empty"]),
            Some("filter") => self.paired_statement("filter", &[]),
            Some(name) if PLAIN_PAIRED_TAGS.contains(&name) => {
                self.paired_statement(name, &[]);
            }
            Some(_) => self.unpaired_statement(),
            None => {
                // `{%` with no tag name behind it
                self.builder.start_node(UNPAIRED_STATEMENT.into());
                self.take("{%", STMT_OPEN);
                self.error_here("expected statement name");
                self.statement_args();
                self.ws();
                self.expect("%}", STMT_CLOSE, "expected `%}`");
                self.builder.finish_node();
            }
        }
    }

    /// `{%` plus the tag name. The caller has already peeked the name.
    fn statement_open(&mut self) {
        self.take("{%", STMT_OPEN);
        self.ws();
        if let Some(tok) = self.scanner.ident(TAG_NAME) {
            self.token(tok);
        }
    }

    fn unpaired_statement(&mut self) {
        self.builder.start_node(UNPAIRED_STATEMENT.into());
        self.statement_open();
        self.statement_args();
        self.ws();
        self.expect("%}", STMT_CLOSE, "expected `%}`");
        self.builder.finish_node();
    }

    fn paired_statement(&mut self, name: &str, branches: &'static [&'static str]) {
        let start = self.scanner.pos();
        self.builder.start_node(PAIRED_STATEMENT.into());
        self.statement_open();
        if name == "filter" {
            self.ws();
            if self.scanner.at_eof() || self.scanner.starts_with("%}") {
                self.error_here("expected filter name");
            } else {
                self.filter();
                self.filter_chain();
            }
        } else {
            self.statement_args();
        }
        self.ws();
        self.expect("%}", STMT_CLOSE, "expected `%}`");

        let terminator = format!("end{name}");
        self.frames.push(Frame {
            terminator: terminator.clone(),
            branches,
        });
        let mut terminated = false;
        loop {
            if let Some(tok) = self.scanner.whitespace() {
                self.token(tok);
                continue;
            }
            if self.scanner.at_eof() {
                break;
            }
            if let Some(stmt) = self.scanner.peek_statement_name() {
                if stmt == terminator {
                    terminated = true;
                    break;
                }
                if branches.contains(&stmt) {
                    self.branch_statement();
                    continue;
                }
                if self.outer_stops(stmt) {
                    // an enclosing statement's terminator: bail out so it
                    // can consume its own end tag
                    break;
                }
            }
            if let Some(end_name) = self.scanner.peek_end_tag_name() {
                if self.scanner.open_depth(end_name).is_some() {
                    // the enclosing element is closing under us
                    break;
                }
            }
            let before = self.scanner.pos();
            self.node();
            if self.scanner.pos() == before {
                self.bump_error("unexpected character");
            }
        }
        self.frames.pop();

        if terminated {
            self.statement_open();
            self.statement_args();
            self.ws();
            self.expect("%}", END_PAIRED_STATEMENT, "expected `%}`");
        } else {
            self.error_span(&format!("missing {{% {terminator} %}}"), start);
        }
        self.builder.finish_node();
    }

    /// `{% elif ... %}` / `{% else %}` / `{% empty %}`. Just the marker;
    /// the nodes that follow stay siblings inside the paired statement.
    fn branch_statement(&mut self) {
        self.builder.start_node(BRANCH_STATEMENT.into());
        self.statement_open();
        self.statement_args();
        self.ws();
        self.expect("%}", STMT_CLOSE, "expected `%}`");
        self.builder.finish_node();
    }

    /// Argument slots between a statement name and `%}`: keywords,
    /// operators, numbers, booleans, strings, and variables, each with an
    /// optional `,` or `=` after it.
    fn statement_args(&mut self) {
        loop {
            self.ws();
            if self.scanner.at_eof() || self.scanner.starts_with("%}") {
                return;
            }
            if self.scanner.starts_with("{%")
                || self.scanner.starts_with("{{")
                || self.scanner.starts_with("{#")
                || self.scanner.peek_start_tag_name().is_some()
                || self.scanner.peek_end_tag_name().is_some()
            {
                // unterminated head: let the caller report the missing %}
                return;
            }
            if self.take(",", COMMA) || self.take("=", EQ) {
                continue;
            }
            if self.scanner.starts_with("|") {
                self.take("|", PIPE);
                self.ws();
                self.filter();
                continue;
            }
            if let Some(tok) = self.scanner.directive_token() {
                match tok.kind {
                    VARIABLE_NAME => {
                        self.builder.start_node(VARIABLE.into());
                        self.token(tok);
                        self.filter_chain();
                        self.builder.finish_node();
                    }
                    STRING_LITERAL => {
                        self.builder.start_node(STRING.into());
                        self.token(tok);
                        self.filter_chain();
                        self.builder.finish_node();
                    }
                    _ => self.token(tok),
                }
                continue;
            }
            self.bump_error("unexpected character in statement");
        }
    }

    /// True when `name` terminates or branches any open statement frame.
    fn statement_stops_here(&self, name: &str) -> bool {
        self.frames
            .iter()
            .any(|f| f.terminator == name || f.branches.contains(&name))
    }

    /// Like [`Self::statement_stops_here`] but excluding the innermost
    /// frame, which the current loop handles itself.
    fn outer_stops(&self, name: &str) -> bool {
        let outer = self.frames.len().saturating_sub(1);
        self.frames[..outer]
            .iter()
            .any(|f| f.terminator == name || f.branches.contains(&name))
    }

    // =========================================================================
    // Template comments
    // =========================================================================

    fn unpaired_comment(&mut self) {
        let start = self.scanner.pos();
        self.builder.start_node(UNPAIRED_COMMENT.into());
        self.take("{#", COMMENT_OPEN);
        let (content, found) = self.scanner.unpaired_comment_content();
        if let Some(tok) = content {
            self.token(tok);
        }
        if found {
            self.take("#}", COMMENT_CLOSE);
        } else {
            self.error_span("unterminated comment", start);
        }
        self.builder.finish_node();
    }

    fn paired_comment(&mut self) {
        let start = self.scanner.pos();
        self.builder.start_node(PAIRED_COMMENT.into());
        self.statement_open();
        self.ws();
        if !self.scanner.starts_with("%}") {
            if let Some(label) = self.scanner.ident(IDENT) {
                self.token(label);
                self.ws();
            }
        }
        self.expect("%}", STMT_CLOSE, "expected `%}`");
        let (content, found) = self.scanner.paired_comment_content();
        if let Some(tok) = content {
            self.token(tok);
        }
        if found {
            self.statement_open();
            self.ws();
            self.expect("%}", END_PAIRED_STATEMENT, "expected `%}`");
        } else {
            self.error_span("missing {% endcomment %}", start);
        }
        self.builder.finish_node();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{SyntaxKind, SyntaxNode};

    fn root(input: &str) -> SyntaxNode {
        let (green, _) = parse(input);
        SyntaxNode::new_root(green)
    }

    #[test]
    fn lossless_over_mixed_input() {
        let src = "<ul>{% for x in items %}<li>{{ x|upper }}</li>{% endfor %}</ul>";
        assert_eq!(root(src).text(), src);
    }

    #[test]
    fn element_shape() {
        let doc = root("<div class=\"a\">hi</div>");
        let el = doc.first_child().unwrap();
        assert_eq!(el.kind(), SyntaxKind::ELEMENT);
        let kinds: Vec<_> = el.children().map(|c| c.kind()).collect();
        assert_eq!(kinds, vec![SyntaxKind::START_TAG, SyntaxKind::END_TAG]);
    }

    #[test]
    fn paragraph_closed_by_sibling() {
        let doc = root("<p>one<p>two");
        let kinds: Vec<_> = doc.children().map(|c| c.kind()).collect();
        assert_eq!(kinds, vec![SyntaxKind::ELEMENT, SyntaxKind::ELEMENT]);
    }

    #[test]
    fn void_element_has_no_end_tag() {
        let doc = root("<br><span>x</span>");
        let br = doc.first_child().unwrap();
        assert_eq!(br.kind(), SyntaxKind::ELEMENT);
        assert_eq!(br.children().count(), 1);
        assert_eq!(doc.children().count(), 2);
    }

    #[test]
    fn branch_statements_are_flat_children() {
        let doc = root("{% if a %}x{% elif b %}y{% else %}z{% endif %}");
        let stmt = doc.first_child().unwrap();
        assert_eq!(stmt.kind(), SyntaxKind::PAIRED_STATEMENT);
        let branches = stmt
            .children()
            .filter(|c| c.kind() == SyntaxKind::BRANCH_STATEMENT)
            .count();
        assert_eq!(branches, 2);
    }

    #[test]
    fn missing_terminator_is_reported() {
        let (_, errors) = parse("{% if cond %}body");
        assert!(errors.iter().any(|e| e.message.contains("endif")));
    }

    #[test]
    fn element_closes_at_statement_terminator() {
        let (green, _) = parse("{% if a %}<p>text{% endif %}");
        let doc = SyntaxNode::new_root(green);
        let stmt = doc.first_child().unwrap();
        assert_eq!(stmt.kind(), SyntaxKind::PAIRED_STATEMENT);
        let p = stmt
            .children()
            .find(|c| c.kind() == SyntaxKind::ELEMENT)
            .unwrap();
        // the paragraph stops before {% endif %} instead of swallowing it
        assert!(!p.text().to_string().contains("endif"));
    }

    #[test]
    fn erroneous_end_tag_reported_and_kept() {
        let (green, errors) = parse("<div></span></div>");
        let doc = SyntaxNode::new_root(green);
        assert_eq!(doc.text(), "<div></span></div>");
        let div = doc.first_child().unwrap();
        assert!(
            div.children()
                .any(|c| c.kind() == SyntaxKind::ERRONEOUS_END_TAG)
        );
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn script_content_is_raw() {
        let doc = root("<script>if (a < b) { x(\"<div>\"); }</script>");
        let script = doc.first_child().unwrap();
        assert_eq!(script.kind(), SyntaxKind::SCRIPT_ELEMENT);
        let raw = script
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| t.kind() == SyntaxKind::RAW_TEXT)
            .unwrap();
        assert_eq!(raw.text(), "if (a < b) { x(\"<div>\"); }");
    }

    #[test]
    fn unclosed_expression_recovers() {
        let (green, errors) = parse("{{ name <b>x</b>");
        let doc = SyntaxNode::new_root(green);
        assert_eq!(doc.text(), "{{ name <b>x</b>");
        assert!(!errors.is_empty());
        // the element after the broken expression still parses
        assert!(doc.children().any(|c| c.kind() == SyntaxKind::ELEMENT));
    }
}
