//! Markup-side behavior: elements, attributes, implicit closure, raw
//! text, and recovery from stray tags.

use htmpl::print::to_sexp;
use htmpl::{SyntaxKind, SyntaxNode, parse};
use pretty_assertions::assert_eq;

fn root(src: &str) -> SyntaxNode {
    parse(src).syntax()
}

fn sexp(src: &str) -> String {
    to_sexp(&root(src))
}

#[test]
fn doctype() {
    assert_eq!(sexp("<!DOCTYPE html>"), "(document (doctype))");
    assert_eq!(sexp("<!doctype html>"), "(document (doctype))");
}

#[test]
fn element_with_attributes() {
    assert_eq!(
        sexp("<input type=\"text\" disabled>"),
        "(document (element (start_tag (tag_name) \
         (attribute (attribute_name) (quoted_attribute_value (attribute_value))) \
         (attribute (attribute_name)))))"
    );
}

#[test]
fn unquoted_and_single_quoted_values() {
    assert_eq!(
        sexp("<a href=/home>x</a>"),
        "(document (element (start_tag (tag_name) \
         (attribute (attribute_name) (attribute_value))) (text) (end_tag (tag_name))))"
    );
    let src = "<a class='big'></a>";
    assert_eq!(root(src).text(), src);
    assert!(parse(src).errors().is_empty());
}

#[test]
fn self_closing_tag() {
    assert_eq!(
        sexp("<br/>"),
        "(document (element (self_closing_tag (tag_name))))"
    );
}

#[test]
fn void_element_without_slash() {
    // <img> takes no children and no end tag
    assert_eq!(
        sexp("<img src=x><span>y</span>"),
        "(document (element (start_tag (tag_name) (attribute (attribute_name) (attribute_value)))) \
         (element (start_tag (tag_name)) (text) (end_tag (tag_name))))"
    );
}

#[test]
fn nested_elements() {
    assert_eq!(
        sexp("<div><span>a</span></div>"),
        "(document (element (start_tag (tag_name)) \
         (element (start_tag (tag_name)) (text) (end_tag (tag_name))) \
         (end_tag (tag_name))))"
    );
}

#[test]
fn paragraph_implicitly_closed_by_paragraph() {
    let doc = root("<p>one<p>two");
    let kinds: Vec<_> = doc.children().map(|c| c.kind()).collect();
    assert_eq!(kinds, vec![SyntaxKind::ELEMENT, SyntaxKind::ELEMENT]);
}

#[test]
fn list_items_implicitly_closed() {
    assert_eq!(
        sexp("<ul><li>a<li>b</ul>"),
        "(document (element (start_tag (tag_name)) \
         (element (start_tag (tag_name)) (text)) \
         (element (start_tag (tag_name)) (text)) \
         (end_tag (tag_name))))"
    );
}

#[test]
fn ancestor_end_tag_closes_inner_elements() {
    // </div> closes the open <b> implicitly before closing the div
    let src = "<div><b>bold</div>";
    assert_eq!(
        sexp(src),
        "(document (element (start_tag (tag_name)) \
         (element (start_tag (tag_name)) (text)) \
         (end_tag (tag_name))))"
    );
    assert_eq!(root(src).text(), src);
}

#[test]
fn erroneous_end_tag_kept_in_tree() {
    let parse = parse("<div></span></div>");
    assert_eq!(
        to_sexp(&parse.syntax()),
        "(document (element (start_tag (tag_name)) \
         (erroneous_end_tag (erroneous_end_tag_name)) \
         (end_tag (tag_name))))"
    );
    assert_eq!(parse.errors().len(), 1);
}

#[test]
fn unopened_end_tag_at_top_level() {
    let parse = parse("</unopened>");
    assert_eq!(
        to_sexp(&parse.syntax()),
        "(document (erroneous_end_tag (erroneous_end_tag_name)))"
    );
    let name = parse
        .syntax()
        .descendants_with_tokens()
        .filter_map(|e| e.into_token())
        .find(|t| t.kind() == SyntaxKind::ERRONEOUS_END_TAG_NAME)
        .unwrap();
    assert_eq!(name.text(), "unopened");
    assert_eq!(parse.errors().len(), 1);
}

#[test]
fn unclosed_script_reported() {
    let parse = parse("<script>var x = 1;");
    assert_eq!(parse.syntax().text(), "<script>var x = 1;");
    assert_eq!(parse.errors().len(), 1);
    assert!(parse.errors()[0].message.contains("closing tag"));
}

#[test]
fn tag_matching_is_case_insensitive() {
    let parse = parse("<DIV>x</div>");
    assert!(parse.errors().is_empty());
    assert_eq!(
        to_sexp(&parse.syntax()),
        "(document (element (start_tag (tag_name)) (text) (end_tag (tag_name))))"
    );
}

#[test]
fn script_content_is_verbatim() {
    assert_eq!(
        sexp("<script>if (a < b) { render(\"<div>\"); }</script>"),
        "(document (script_element (start_tag (tag_name)) (raw_text) (end_tag (tag_name))))"
    );
}

#[test]
fn style_content_is_verbatim() {
    let src = "<style>p > a { color: red; }</style>";
    assert_eq!(
        sexp(src),
        "(document (style_element (start_tag (tag_name)) (raw_text) (end_tag (tag_name))))"
    );
    assert_eq!(root(src).text(), src);
}

#[test]
fn entities() {
    assert_eq!(sexp("a &amp; b"), "(document (text) (entity) (text))");
    assert_eq!(sexp("&#x26;&#38;"), "(document (entity) (entity))");
    // a bare ampersand that matches no entity is ordinary text
    assert_eq!(sexp("a && b"), "(document (text))");
}

#[test]
fn html_comment() {
    assert_eq!(sexp("<!-- note -->"), "(document (comment))");
    let parse = parse("<!-- never closed");
    assert_eq!(parse.errors().len(), 1);
    assert_eq!(parse.syntax().text(), "<!-- never closed");
}

#[test]
fn stray_angle_brackets_are_text() {
    let src = "1 < 2 > 0";
    assert_eq!(root(src).text(), src);
    assert_eq!(sexp(src), "(document (text))");
}

#[test]
fn whitespace_is_preserved() {
    let src = "  <p>\n  spaced\n  </p>\n";
    assert_eq!(root(src).text(), src);
}

#[test]
fn unclosed_elements_at_eof() {
    let src = "<div><span>dangling";
    let doc = root(src);
    assert_eq!(doc.text(), src);
    let div = doc.first_child().unwrap();
    assert_eq!(div.kind(), SyntaxKind::ELEMENT);
    let span = div.children().nth(1).unwrap();
    assert_eq!(span.kind(), SyntaxKind::ELEMENT);
}

#[test]
fn spaces_around_attribute_equals() {
    let src = "<a href = \"/x\">y</a>";
    let parse = parse(src);
    assert!(parse.errors().is_empty());
    assert_eq!(parse.syntax().text(), src);
}
