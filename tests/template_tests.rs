//! Directive-side behavior: expressions, filters, statements, branches,
//! template comments, and recovery.

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
fn bare_variable() {
    assert_eq!(
        sexp("{{ title }}"),
        "(document (variable (variable_name)))"
    );
}

#[test]
fn dotted_variable_with_filters() {
    assert_eq!(
        sexp("{{ user.name|default:\"anon\"|upper }}"),
        "(document (variable (variable_name) \
         (filter (filter_name) (filter_argument)) \
         (filter (filter_name))))"
    );
}

#[test]
fn filter_argument_forms() {
    // dotted argument
    assert_eq!(
        sexp("{{ x|add:user.age }}"),
        "(document (variable (variable_name) (filter (filter_name) (filter_argument))))"
    );
    // quoted argument keeps its text without the quotes
    let doc = root("{{ x|default:'n/a' }}");
    let arg = doc
        .descendants_with_tokens()
        .filter_map(|e| e.into_token())
        .find(|t| t.kind() == SyntaxKind::FILTER_ARGUMENT)
        .unwrap();
    assert_eq!(arg.text(), "n/a");
}

#[test]
fn if_elif_else_shape() {
    assert_eq!(
        sexp("{% if a %}x{% elif b %}y{% else %}z{% endif %}"),
        "(document (paired_statement (tag_name) (variable (variable_name)) (text) \
         (branch_statement (tag_name) (variable (variable_name))) (text) \
         (branch_statement (tag_name)) (text) \
         (tag_name) (end_paired_statement)))"
    );
}

#[test]
fn for_with_empty_branch() {
    assert_eq!(
        sexp("{% for x in xs %}{{ x }}{% empty %}none{% endfor %}"),
        "(document (paired_statement (tag_name) \
         (variable (variable_name)) (keyword_operator) (variable (variable_name)) \
         (variable (variable_name)) \
         (branch_statement (tag_name)) (text) \
         (tag_name) (end_paired_statement)))"
    );
}

#[test]
fn condition_operators() {
    assert_eq!(
        sexp("{% if a == 1 and not b %}x{% endif %}"),
        "(document (paired_statement (tag_name) \
         (variable (variable_name)) (operator) (number) \
         (keyword_operator) (keyword_operator) (variable (variable_name)) \
         (text) (tag_name) (end_paired_statement)))"
    );
}

#[test]
fn two_word_operator_stays_one_token() {
    let doc = root("{% if a not in xs %}x{% endif %}");
    let ops: Vec<_> = doc
        .descendants_with_tokens()
        .filter_map(|e| e.into_token())
        .filter(|t| t.kind() == SyntaxKind::KEYWORD_OPERATOR)
        .map(|t| t.text().to_string())
        .collect();
    assert_eq!(ops, vec!["not in"]);
}

#[test]
fn keywords_and_booleans() {
    assert_eq!(
        sexp("{% autoescape off %}x{% endautoescape %}"),
        "(document (paired_statement (tag_name) (keyword) (text) \
         (tag_name) (end_paired_statement)))"
    );
    assert_eq!(
        sexp("{% widget flag=True %}"),
        "(document (unpaired_statement (tag_name) (variable (variable_name)) (boolean)))"
    );
}

#[test]
fn string_argument_with_filter() {
    assert_eq!(
        sexp("{% with greeting=\"hi\"|upper %}{{ greeting }}{% endwith %}"),
        "(document (paired_statement (tag_name) \
         (variable (variable_name)) (string (string_literal) (filter (filter_name))) \
         (variable (variable_name)) \
         (tag_name) (end_paired_statement)))"
    );
}

#[test]
fn filter_statement() {
    assert_eq!(
        sexp("{% filter lower|truncatewords:3 %}body{% endfilter %}"),
        "(document (paired_statement (tag_name) \
         (filter (filter_name)) (filter (filter_name) (filter_argument)) \
         (text) (tag_name) (end_paired_statement)))"
    );
}

#[test]
fn unknown_tag_is_unpaired() {
    assert_eq!(
        sexp("{% csrf_token %}"),
        "(document (unpaired_statement (tag_name)))"
    );
    // an unmatched end-style name is not an error either
    let parse = parse("{% endwidget %}");
    assert!(parse.errors().is_empty());
    assert_eq!(
        to_sexp(&parse.syntax()),
        "(document (unpaired_statement (tag_name)))"
    );
}

#[test]
fn nested_paired_statements() {
    let src = "{% for r in rows %}{% if r.ok %}{{ r }}{% endif %}{% endfor %}";
    let parse = parse(src);
    assert!(parse.errors().is_empty());
    let doc = parse.syntax();
    assert_eq!(doc.text(), src);
    let outer = doc.first_child().unwrap();
    let inner = outer
        .children()
        .find(|c| c.kind() == SyntaxKind::PAIRED_STATEMENT)
        .unwrap();
    assert_eq!(inner.text(), "{% if r.ok %}{{ r }}{% endif %}");
}

#[test]
fn missing_terminator_reported() {
    let parse = parse("{% for x in xs %}<li>{{ x }}");
    assert!(parse.errors().iter().any(|e| e.message.contains("endfor")));
    assert_eq!(parse.syntax().text(), "{% for x in xs %}<li>{{ x }}");
}

#[test]
fn inner_block_breaks_at_outer_terminator() {
    let src = "{% for x in xs %}{% if x %}y{% endfor %}";
    let parse = parse(src);
    assert_eq!(parse.syntax().text(), src);
    assert!(parse.errors().iter().any(|e| e.message.contains("endif")));
    // the endfor is still consumed by the for statement
    let for_stmt = parse.syntax().first_child().unwrap();
    assert!(for_stmt.text().to_string().ends_with("{% endfor %}"));
}

#[test]
fn element_closes_before_branch_tag() {
    let src = "{% if a %}<p>yes{% else %}<p>no{% endif %}";
    let parse = parse(src);
    assert!(parse.errors().is_empty());
    let stmt = parse.syntax().first_child().unwrap();
    let paragraphs: Vec<_> = stmt
        .children()
        .filter(|c| c.kind() == SyntaxKind::ELEMENT)
        .map(|c| c.text().to_string())
        .collect();
    assert_eq!(paragraphs, vec!["<p>yes", "<p>no"]);
}

#[test]
fn unpaired_comment() {
    assert_eq!(sexp("{# todo #}"), "(document (unpaired_comment))");
    let src = "{# outer {# inner #} still outer #}";
    let doc = root(src);
    assert_eq!(doc.text(), src);
    assert_eq!(doc.first_child().unwrap().text(), src);
}

#[test]
fn paired_comment_hides_content() {
    let src = "{% comment %}<div>{% if %}{% endcomment %}";
    let parse = parse(src);
    assert!(parse.errors().is_empty());
    assert_eq!(
        to_sexp(&parse.syntax()),
        "(document (paired_comment (tag_name) (tag_name) (end_paired_statement)))"
    );
}

#[test]
fn paired_comment_nests() {
    let src = "{% comment %}a{% comment %}b{% endcomment %}c{% endcomment %}";
    let parse = parse(src);
    assert!(parse.errors().is_empty());
    assert_eq!(parse.syntax().first_child().unwrap().text(), src);
}

#[test]
fn unterminated_comments_reported() {
    assert_eq!(parse("{# open").errors().len(), 1);
    assert!(
        parse("{% comment %}open")
            .errors()
            .iter()
            .any(|e| e.message.contains("endcomment"))
    );
}

#[test]
fn empty_expression_reported() {
    let parse = parse("{{ }}");
    assert_eq!(parse.errors().len(), 1);
    assert_eq!(parse.syntax().text(), "{{ }}");
}

#[test]
fn node_text_reparses_to_same_shape() {
    let doc = root("<div>{% if a %}{{ x|upper }}{% endif %}</div>");
    let stmt = doc
        .descendants()
        .find(|n| n.kind() == SyntaxKind::PAIRED_STATEMENT)
        .unwrap();
    let reparsed = root(&stmt.text().to_string());
    assert_eq!(
        to_sexp(&reparsed.first_child().unwrap()),
        to_sexp(&stmt)
    );
}

#[test]
fn page_template_round_trip() {
    let src = "<!DOCTYPE html>\n\
        <html>\n\
        <body>\n\
        {% block content %}\n\
        <ul>\n\
        {% for item in items %}\n\
          <li class=\"row\">{{ item.label|title }} &mdash; {{ item.count }}</li>\n\
        {% empty %}\n\
          <li>nothing</li>\n\
        {% endfor %}\n\
        </ul>\n\
        {% endblock %}\n\
        </body>\n\
        </html>\n";
    let parse = parse(src);
    assert!(parse.errors().is_empty(), "{:?}", parse.errors());
    assert_eq!(parse.syntax().text(), src);
}
