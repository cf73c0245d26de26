//! Syntax kinds for the rowan-based CST.
//!
//! One flat enum covers tokens (leaves) and nodes (composites). Kind names
//! are the stable compatibility surface for downstream consumers
//! (highlighters, queries), so renaming a variant is a breaking change.

/// All syntax kinds (tokens and nodes) in the template language.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    WHITESPACE = 0,

    // =========================================================================
    // MARKUP TOKENS
    // =========================================================================
    TEXT,                    // running text between markup constructs
    ENTITY,                  // &amp; &#38; &#x26;
    COMMENT,                 // <!-- ... -->
    RAW_TEXT,                // verbatim script/style content
    TAG_NAME,                // div, script, if, endfor, ...
    ERRONEOUS_END_TAG_NAME,  // </name> where name was never opened
    ATTRIBUTE_NAME,
    ATTRIBUTE_VALUE,
    DOCTYPE_KW,              // the word "doctype" (any case)
    DOCTYPE_CONTENT,         // everything between "doctype" and ">"

    // Markup punctuation
    LT,        // <
    LT_SLASH,  // </
    LT_BANG,   // <!
    GT,        // >
    SLASH_GT,  // />
    EQ,        // =
    QUOTE,     // ' or "

    // =========================================================================
    // DIRECTIVE TOKENS
    // =========================================================================
    EXPR_OPEN,             // {{
    EXPR_CLOSE,            // }}
    STMT_OPEN,             // {%
    STMT_CLOSE,            // %}
    END_PAIRED_STATEMENT,  // the %} closing a paired statement
    COMMENT_OPEN,          // {#
    COMMENT_CLOSE,         // #}
    COMMENT_CONTENT,       // opaque interior of a template comment
    PIPE,                  // |
    COLON,                 // :
    COMMA,                 // ,
    VARIABLE_NAME,         // value, user.name
    FILTER_NAME,
    FILTER_ARGUMENT,
    IDENT,                 // bare identifier (e.g. a paired comment label)
    KEYWORD,               // on off with as silent only from random by
    KEYWORD_OPERATOR,      // and or not in "not in" is "is not"
    OPERATOR,              // == != < > <= >=
    NUMBER,
    BOOLEAN,               // True False
    STRING_LITERAL,        // 'quoted' or "quoted"

    // =========================================================================
    // NODES
    // =========================================================================
    DOCUMENT,
    DOCTYPE,
    ELEMENT,
    SCRIPT_ELEMENT,
    STYLE_ELEMENT,
    START_TAG,
    SELF_CLOSING_TAG,
    END_TAG,
    ERRONEOUS_END_TAG,
    ATTRIBUTE,
    QUOTED_ATTRIBUTE_VALUE,
    VARIABLE,
    FILTER,
    STRING,             // quoted string with an optional filter chain
    PAIRED_STATEMENT,   // {% tag %}...{% endtag %} (if/for/filter included)
    BRANCH_STATEMENT,   // {% elif %} / {% else %} / {% empty %}
    UNPAIRED_STATEMENT, // {% tag %} with no terminator
    UNPAIRED_COMMENT,   // {# ... #}
    PAIRED_COMMENT,     // {% comment %}...{% endcomment %}

    // Special
    ERROR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token.
    pub fn is_trivia(self) -> bool {
        self == Self::WHITESPACE
    }

    /// Check if this kind names a composite node rather than a token.
    pub fn is_node(self) -> bool {
        (self as u16) >= (Self::DOCUMENT as u16) && self != Self::__LAST
    }

    /// Statement-family nodes (paired, branch, unpaired).
    pub fn is_statement(self) -> bool {
        matches!(
            self,
            Self::PAIRED_STATEMENT | Self::BRANCH_STATEMENT | Self::UNPAIRED_STATEMENT
        )
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: repr(u16) with contiguous discriminants, bounds checked above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for rowan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TemplateLanguage {}

impl rowan::Language for TemplateLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<TemplateLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<TemplateLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<TemplateLanguage>;
pub type SyntaxNodeChildren = rowan::SyntaxNodeChildren<TemplateLanguage>;
