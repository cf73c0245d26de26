//! Context-sensitive scanner.
//!
//! Resolves the tokens a context-free grammar cannot: tag names checked
//! against the stack of currently open elements, raw-text regions inside
//! script/style, and template comments with nested delimiters. One scanner
//! instance is owned per parse and carries all lexer state; nothing here
//! is global.
//!
//! The grammar engine drives the scanner by asking for specific token
//! kinds at the current position; every method either produces a token
//! (advancing the cursor) or leaves the position untouched.

use crate::syntax::SyntaxKind;

/// A lexed token: a kind plus the exact source slice it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
}

/// Directive keywords that take an argument position (`{% x on %}`).
const KEYWORDS: &[&str] = &[
    "on", "off", "with", "as", "silent", "only", "from", "random", "by",
];

/// Word-shaped operators inside directive expressions. Two-word forms
/// first so they win over their prefixes.
const KEYWORD_OPERATORS: &[&str] = &["not in", "is not", "and", "or", "not", "in", "is"];

pub(crate) struct Scanner<'a> {
    source: &'a str,
    pos: usize,
    /// Currently open tag names, lowercased, innermost last.
    open_tags: Vec<String>,
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn is_tag_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            open_tags: Vec::new(),
        }
    }

    // =========================================================================
    // Cursor
    // =========================================================================

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    pub fn starts_with(&self, s: &str) -> bool {
        self.rest().starts_with(s)
    }

    fn bytes_at(&self, at: usize) -> &'a [u8] {
        &self.source.as_bytes()[at..]
    }

    fn token(&self, kind: SyntaxKind, start: usize) -> Token<'a> {
        Token {
            kind,
            text: &self.source[start..self.pos],
        }
    }

    /// Consume the literal `s` if present.
    pub fn punct(&mut self, s: &str, kind: SyntaxKind) -> Option<Token<'a>> {
        if !self.starts_with(s) {
            return None;
        }
        let start = self.pos;
        self.pos += s.len();
        Some(self.token(kind, start))
    }

    /// Consume a single character as an error token. Guarantees progress
    /// when no rule matches.
    pub fn error_char(&mut self) -> Option<Token<'a>> {
        let c = self.rest().chars().next()?;
        let start = self.pos;
        self.pos += c.len_utf8();
        Some(self.token(SyntaxKind::ERROR, start))
    }

    // =========================================================================
    // Trivia and text
    // =========================================================================

    pub fn whitespace(&mut self) -> Option<Token<'a>> {
        let rest = self.rest();
        let len = rest
            .find(|c: char| !c.is_whitespace())
            .unwrap_or(rest.len());
        if len == 0 {
            return None;
        }
        let start = self.pos;
        self.pos += len;
        Some(self.token(SyntaxKind::WHITESPACE, start))
    }

    /// Running text: everything up to the next construct the grammar can
    /// act on (a plausible tag, a matchable entity, or a `{{`/`{%`/`{#`
    /// opener). Trailing ASCII whitespace is left for the trivia scanner.
    pub fn text(&mut self) -> Option<Token<'a>> {
        let bytes = self.source.as_bytes();
        let start = self.pos;
        let mut i = self.pos;
        while i < bytes.len() {
            match bytes[i] {
                b'<' if self.tag_like_at(i) => break,
                b'&' if self.entity_len_at(i).is_some() => break,
                b'{' if matches!(bytes.get(i + 1), Some(b'{' | b'%' | b'#')) => break,
                _ => i += 1,
            }
        }
        let mut end = i;
        while end > start && bytes[end - 1].is_ascii_whitespace() {
            end -= 1;
        }
        if end == start {
            return None;
        }
        self.pos = end;
        Some(self.token(SyntaxKind::TEXT, start))
    }

    /// Whether the `<` at byte offset `at` plausibly opens markup.
    fn tag_like_at(&self, at: usize) -> bool {
        let b = self.bytes_at(at);
        match (b.get(1), b.get(2)) {
            (Some(c), _) if c.is_ascii_alphabetic() => true,
            (Some(b'/'), Some(c)) if c.is_ascii_alphabetic() => true,
            (Some(b'!'), _) => true,
            _ => false,
        }
    }

    // =========================================================================
    // Entities, comments, doctype
    // =========================================================================

    fn entity_len_at(&self, at: usize) -> Option<usize> {
        let b = self.bytes_at(at);
        if b.first() != Some(&b'&') {
            return None;
        }
        let mut i = 1;
        if b.get(i) == Some(&b'#') {
            i += 1;
            if matches!(b.get(i), Some(b'x' | b'X')) {
                i += 1;
                let digits = i;
                while i < b.len() && b[i].is_ascii_hexdigit() && i - digits < 6 {
                    i += 1;
                }
                if i == digits {
                    return None;
                }
            } else {
                let digits = i;
                while i < b.len() && b[i].is_ascii_digit() && i - digits < 5 {
                    i += 1;
                }
                if i == digits {
                    return None;
                }
            }
        } else {
            let letters = i;
            while i < b.len() && b[i].is_ascii_alphabetic() && i - letters < 30 {
                i += 1;
            }
            if i == letters {
                return None;
            }
        }
        if b.get(i) == Some(&b';') {
            i += 1;
        }
        Some(i)
    }

    pub fn entity(&mut self) -> Option<Token<'a>> {
        let len = self.entity_len_at(self.pos)?;
        let start = self.pos;
        self.pos += len;
        Some(self.token(SyntaxKind::ENTITY, start))
    }

    /// `<!--` through `-->`, or to end of input when unterminated.
    pub fn comment(&mut self) -> Option<Token<'a>> {
        if !self.starts_with("<!--") {
            return None;
        }
        let start = self.pos;
        self.pos = match self.rest()[4..].find("-->") {
            Some(i) => self.pos + 4 + i + 3,
            None => self.source.len(),
        };
        Some(self.token(SyntaxKind::COMMENT, start))
    }

    /// The word `doctype` in any case, right after `<!`.
    pub fn doctype_kw(&mut self) -> Option<Token<'a>> {
        let rest = self.rest();
        if rest.len() < 7 || !rest[..7].eq_ignore_ascii_case("doctype") {
            return None;
        }
        let start = self.pos;
        self.pos += 7;
        Some(self.token(SyntaxKind::DOCTYPE_KW, start))
    }

    /// Everything between the doctype keyword and the closing `>`.
    pub fn doctype_content(&mut self) -> Option<Token<'a>> {
        let rest = self.rest();
        let len = rest.find('>').unwrap_or(rest.len());
        if len == 0 {
            return None;
        }
        let start = self.pos;
        self.pos += len;
        Some(self.token(SyntaxKind::DOCTYPE_CONTENT, start))
    }

    // =========================================================================
    // Tag names and the open-tag stack
    // =========================================================================

    fn tag_name_len_at(&self, at: usize) -> usize {
        let b = self.bytes_at(at);
        if b.first().map_or(true, |c| !c.is_ascii_alphabetic()) {
            return 0;
        }
        let mut i = 1;
        while i < b.len() && is_tag_name_byte(b[i]) {
            i += 1;
        }
        i
    }

    /// Tag name following the current position's `<`, if any.
    pub fn peek_start_tag_name(&self) -> Option<&'a str> {
        if !self.starts_with("<") {
            return None;
        }
        let at = self.pos + 1;
        let len = self.tag_name_len_at(at);
        (len > 0).then(|| &self.source[at..at + len])
    }

    /// Tag name following the current position's `</`, if any.
    pub fn peek_end_tag_name(&self) -> Option<&'a str> {
        if !self.starts_with("</") {
            return None;
        }
        let at = self.pos + 2;
        let len = self.tag_name_len_at(at);
        (len > 0).then(|| &self.source[at..at + len])
    }

    /// Scan a start-tag name and push it onto the open-tag stack.
    pub fn start_tag_name(&mut self) -> Option<Token<'a>> {
        let len = self.tag_name_len_at(self.pos);
        if len == 0 {
            return None;
        }
        let start = self.pos;
        self.pos += len;
        let tok = self.token(SyntaxKind::TAG_NAME, start);
        self.open_tags.push(tok.text.to_ascii_lowercase());
        Some(tok)
    }

    /// Scan an end-tag name. Classified as `TAG_NAME` when it matches an
    /// open tag (innermost or ancestor), `ERRONEOUS_END_TAG_NAME` when the
    /// name was never opened. Matching is case-insensitive. The stack is
    /// not popped here; closure is the grammar engine's decision.
    pub fn end_tag_name(&mut self) -> Option<Token<'a>> {
        let len = self.tag_name_len_at(self.pos);
        if len == 0 {
            return None;
        }
        let start = self.pos;
        self.pos += len;
        let text = &self.source[start..self.pos];
        let kind = if self.open_depth(text).is_some() {
            SyntaxKind::TAG_NAME
        } else {
            SyntaxKind::ERRONEOUS_END_TAG_NAME
        };
        Some(Token { kind, text })
    }

    /// Depth of `name` on the open-tag stack: 0 for the innermost open
    /// tag, `None` if the name is not open at all.
    pub fn open_depth(&self, name: &str) -> Option<usize> {
        self.open_tags
            .iter()
            .rev()
            .position(|t| t.eq_ignore_ascii_case(name))
    }

    pub fn pop_tag(&mut self) {
        self.open_tags.pop();
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    pub fn attribute_name(&mut self) -> Option<Token<'a>> {
        self.span_while(SyntaxKind::ATTRIBUTE_NAME, |b| {
            !matches!(b, b'<' | b'>' | b'"' | b'\'' | b'/' | b'=') && !b.is_ascii_whitespace()
        })
    }

    pub fn attribute_value(&mut self) -> Option<Token<'a>> {
        self.span_while(SyntaxKind::ATTRIBUTE_VALUE, |b| {
            !matches!(b, b'<' | b'>' | b'"' | b'\'' | b'=') && !b.is_ascii_whitespace()
        })
    }

    /// Span of anything except the given quote character.
    pub fn quoted_span(&mut self, quote: u8, kind: SyntaxKind) -> Option<Token<'a>> {
        self.span_while(kind, |b| b != quote)
    }

    fn span_while(&mut self, kind: SyntaxKind, pred: impl Fn(u8) -> bool) -> Option<Token<'a>> {
        let bytes = self.source.as_bytes();
        let start = self.pos;
        let mut i = self.pos;
        while i < bytes.len() && pred(bytes[i]) {
            i += 1;
        }
        if i == start {
            return None;
        }
        // ASCII predicates can halt mid-character only on the leading
        // byte, which is always a boundary; continuation bytes never
        // match the ASCII ranges used here.
        self.pos = i;
        Some(self.token(kind, start))
    }

    // =========================================================================
    // Raw text
    // =========================================================================

    /// Verbatim span up to `</tag` (case-insensitive) or end of input.
    /// Markup and directive syntax inside is not interpreted.
    pub fn raw_text(&mut self, tag: &str) -> Option<Token<'a>> {
        let bytes = self.source.as_bytes();
        let start = self.pos;
        let mut i = self.pos;
        while i < bytes.len() {
            if bytes[i] == b'<' && bytes.get(i + 1) == Some(&b'/') {
                let name_at = i + 2;
                let len = self.tag_name_len_at(name_at);
                if len == tag.len()
                    && self.source[name_at..name_at + len].eq_ignore_ascii_case(tag)
                {
                    break;
                }
            }
            i += 1;
        }
        if i == start {
            return None;
        }
        self.pos = i;
        Some(self.token(SyntaxKind::RAW_TEXT, start))
    }

    // =========================================================================
    // Directive interior
    // =========================================================================

    fn word_len_at(&self, at: usize) -> usize {
        let b = self.bytes_at(at);
        let mut i = 0;
        while i < b.len() && is_word_byte(b[i]) {
            i += 1;
        }
        i
    }

    /// Statement name after a `{%` at byte offset `at`, plus the offset
    /// just past the name. Used both for lookahead and comment nesting.
    fn stmt_word_at(&self, at: usize) -> Option<(&'a str, usize)> {
        let b = self.bytes_at(at);
        if b.first() != Some(&b'{') || b.get(1) != Some(&b'%') {
            return None;
        }
        let mut i = at + 2;
        let bytes = self.source.as_bytes();
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        let len = self.word_len_at(i);
        (len > 0).then(|| (&self.source[i..i + len], i + len))
    }

    /// Peek the directive tag name if the cursor sits on `{%`.
    pub fn peek_statement_name(&self) -> Option<&'a str> {
        self.stmt_word_at(self.pos).map(|(w, _)| w)
    }

    /// A bare `\w+` identifier with the given kind.
    pub fn ident(&mut self, kind: SyntaxKind) -> Option<Token<'a>> {
        let len = self.word_len_at(self.pos);
        if len == 0 {
            return None;
        }
        let start = self.pos;
        self.pos += len;
        Some(self.token(kind, start))
    }

    /// Variable path: a letter, then word characters with interior dots
    /// (a dot must be followed by a word character).
    pub fn variable_name(&mut self) -> Option<Token<'a>> {
        let b = self.bytes_at(self.pos);
        if b.first().map_or(true, |c| !c.is_ascii_alphabetic()) {
            return None;
        }
        let mut i = 1;
        while i < b.len() {
            if is_word_byte(b[i]) {
                i += 1;
            } else if b[i] == b'.' && b.get(i + 1).is_some_and(|&c| is_word_byte(c)) {
                i += 2;
            } else {
                break;
            }
        }
        let start = self.pos;
        self.pos += i;
        Some(self.token(SyntaxKind::VARIABLE_NAME, start))
    }

    /// Filter argument: dotted word path (`user.name`, `2`).
    pub fn filter_argument(&mut self) -> Option<Token<'a>> {
        let b = self.bytes_at(self.pos);
        if b.first().map_or(true, |&c| !is_word_byte(c)) {
            return None;
        }
        let mut i = self.word_len_at(self.pos);
        while b.get(i) == Some(&b'.') && b.get(i + 1).is_some_and(|&c| is_word_byte(c)) {
            i += 1;
            i += self.word_len_at(self.pos + i);
        }
        let start = self.pos;
        self.pos += i;
        Some(self.token(SyntaxKind::FILTER_ARGUMENT, start))
    }

    /// Quoted string literal, closing quote included when present.
    /// An unterminated literal runs to end of input.
    pub fn string_literal(&mut self) -> Option<Token<'a>> {
        let quote = match self.bytes_at(self.pos).first() {
            Some(&q @ (b'\'' | b'"')) => q,
            _ => return None,
        };
        let bytes = self.source.as_bytes();
        let start = self.pos;
        let mut i = self.pos + 1;
        while i < bytes.len() && bytes[i] != quote {
            i += 1;
        }
        if i < bytes.len() {
            i += 1; // closing quote
        }
        self.pos = i;
        Some(self.token(SyntaxKind::STRING_LITERAL, start))
    }

    /// Classify and consume one argument-position token inside `{% %}` or
    /// `{{ }}`: string, number, operator, keyword, keyword operator,
    /// boolean, or variable path. The caller has already skipped
    /// whitespace and ruled out closers.
    pub fn directive_token(&mut self) -> Option<Token<'a>> {
        let b = self.bytes_at(self.pos);
        match *b.first()? {
            b'\'' | b'"' => self.string_literal(),
            b'0'..=b'9' => self.span_while(SyntaxKind::NUMBER, |c| c.is_ascii_digit()),
            b'=' if b.get(1) == Some(&b'=') => self.punct("==", SyntaxKind::OPERATOR),
            b'!' if b.get(1) == Some(&b'=') => self.punct("!=", SyntaxKind::OPERATOR),
            b'<' => self
                .punct("<=", SyntaxKind::OPERATOR)
                .or_else(|| self.punct("<", SyntaxKind::OPERATOR)),
            b'>' => self
                .punct(">=", SyntaxKind::OPERATOR)
                .or_else(|| self.punct(">", SyntaxKind::OPERATOR)),
            c if c.is_ascii_alphabetic() => self.word_token(),
            _ => None,
        }
    }

    fn word_token(&mut self) -> Option<Token<'a>> {
        let rest = self.rest();
        let len = self.word_len_at(self.pos);
        let word = &rest[..len];

        // Word boundary plus trailing whitespace, as the keyword tokens
        // require; otherwise the word is an ordinary variable.
        let at_boundary = rest[len..].starts_with(|c: char| c.is_whitespace());

        if at_boundary {
            for op in KEYWORD_OPERATORS {
                if rest.starts_with(op)
                    && rest[op.len()..].starts_with(|c: char| c.is_whitespace())
                {
                    let start = self.pos;
                    self.pos += op.len();
                    return Some(self.token(SyntaxKind::KEYWORD_OPERATOR, start));
                }
            }
            if KEYWORDS.contains(&word) {
                let start = self.pos;
                self.pos += len;
                return Some(self.token(SyntaxKind::KEYWORD, start));
            }
            if word == "True" || word == "False" {
                let start = self.pos;
                self.pos += len;
                return Some(self.token(SyntaxKind::BOOLEAN, start));
            }
        }
        self.variable_name()
    }

    // =========================================================================
    // Template comments
    // =========================================================================

    /// Interior of a `{# ... #}` comment, honoring nested `{# #}` pairs.
    /// Stops before the matching `#}`; returns whether one was found.
    pub fn unpaired_comment_content(&mut self) -> (Option<Token<'a>>, bool) {
        let bytes = self.source.as_bytes();
        let start = self.pos;
        let mut i = self.pos;
        let mut depth = 0usize;
        let mut found = false;
        while i < bytes.len() {
            if bytes[i] == b'{' && bytes.get(i + 1) == Some(&b'#') {
                depth += 1;
                i += 2;
            } else if bytes[i] == b'#' && bytes.get(i + 1) == Some(&b'}') {
                if depth == 0 {
                    found = true;
                    break;
                }
                depth -= 1;
                i += 2;
            } else {
                i += 1;
            }
        }
        self.pos = i;
        let tok = (i > start).then(|| self.token(SyntaxKind::COMMENT_CONTENT, start));
        (tok, found)
    }

    /// Interior of a `{% comment %} ... {% endcomment %}` block, honoring
    /// nested comment blocks. Stops before the matching `{% endcomment`;
    /// returns whether one was found.
    pub fn paired_comment_content(&mut self) -> (Option<Token<'a>>, bool) {
        let bytes = self.source.as_bytes();
        let start = self.pos;
        let mut i = self.pos;
        let mut depth = 0usize;
        let mut found = false;
        while i < bytes.len() {
            if bytes[i] == b'{' && bytes.get(i + 1) == Some(&b'%') {
                match self.stmt_word_at(i) {
                    Some(("comment", after)) => {
                        depth += 1;
                        i = after;
                        continue;
                    }
                    Some(("endcomment", after)) => {
                        if depth == 0 {
                            found = true;
                            break;
                        }
                        depth -= 1;
                        i = after;
                        continue;
                    }
                    _ => {}
                }
            }
            i += 1;
        }
        self.pos = i;
        let tok = (i > start).then(|| self.token(SyntaxKind::COMMENT_CONTENT, start));
        (tok, found)
    }
}
