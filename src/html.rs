//! HTML element classification for implicit tag closure.

/// Void elements: cannot have children or a closing tag.
/// https://html.spec.whatwg.org/multipage/syntax.html#void-elements
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input",
    "link", "meta", "param", "source", "track", "wbr",
];

/// Block-level elements that implicitly close an open <p>.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "details", "dialog",
    "dd", "div", "dl", "dt", "fieldset", "figcaption", "figure",
    "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6",
    "header", "hgroup", "hr", "li", "main", "nav", "ol", "p",
    "pre", "section", "table", "ul",
];

pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// Whether a start tag for `child` implicitly closes an open `parent`.
///
/// Covers the optional-end-tag rules browsers apply: a new <p> (or any
/// block element) ends an open <p>, a new <li> ends the previous <li>,
/// table cells end each other, and so on. Both names must already be
/// lowercased.
pub fn closes_on_start_tag(parent: &str, child: &str) -> bool {
    match parent {
        "p" => BLOCK_ELEMENTS.contains(&child),
        "li" => child == "li",
        "dt" | "dd" => matches!(child, "dt" | "dd"),
        "tr" => matches!(child, "tr" | "tbody" | "tfoot"),
        "td" | "th" => matches!(child, "td" | "th" | "tr" | "tbody" | "tfoot"),
        "thead" | "tbody" | "tfoot" => matches!(child, "tbody" | "tfoot"),
        "option" => matches!(child, "option" | "optgroup"),
        "optgroup" => child == "optgroup",
        "colgroup" => true,
        "caption" => true,
        "rt" | "rp" => matches!(child, "rt" | "rp"),
        _ => false,
    }
}
