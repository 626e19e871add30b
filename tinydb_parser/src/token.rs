use logos::Logos;

/// Position range of a token (byte offset).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

/// Token kinds recognised by the TinyDB lexer.
///
/// Keywords are matched case-sensitively and only when they make up a whole
/// whitespace-delimited word; `selected` or `from,` lex as [`Token::Word`].
/// Whitespace is Unicode `White_Space`, the same set `str::trim` strips.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
#[logos(skip r"\s+")]
pub enum Token {
    /// `select` keyword.
    #[token("select")]
    Select,
    /// `insert` keyword.
    #[token("insert")]
    Insert,
    /// `create` keyword.
    #[token("create")]
    Create,
    /// `from` keyword.
    #[token("from")]
    From,
    /// `into` keyword.
    #[token("into")]
    Into,
    /// `values` keyword.
    #[token("values")]
    Values,
    /// `table` keyword.
    #[token("table")]
    Table,
    /// Wildcard `*`.
    #[token("*")]
    Star,
    /// Any other run of non-whitespace characters.
    #[regex(r"\S+", priority = 1)]
    Word,
}

/// Output of the lexer containing token and span.
#[derive(Debug, Clone, PartialEq)]
pub struct LexItem {
    /// Token kind.
    pub kind: Token,
    /// Text span.
    pub span: Span,
}

/// Lexer iterator over `LexItem`s.
pub struct Lexer<'input> {
    inner: logos::Lexer<'input, Token>,
}

impl<'input> Lexer<'input> {
    /// Create new lexer from statement text.
    pub fn new(source: &'input str) -> Self {
        Self {
            inner: Token::lexer(source),
        }
    }
}

impl<'input> Iterator for Lexer<'input> {
    type Item = LexItem;

    fn next(&mut self) -> Option<Self::Item> {
        // `Word` already covers any non-whitespace run.
        let kind = self.inner.next()?.unwrap_or(Token::Word);
        let span = Span {
            start: self.inner.span().start,
            end: self.inner.span().end,
        };
        Some(LexItem { kind, span })
    }
}

/// A lexed token paired with its source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Word<'input> {
    /// Token kind.
    pub kind: Token,
    /// Source slice covered by the token.
    pub text: &'input str,
}

/// Split `source` into words, in order.
pub fn tokenize(source: &str) -> Vec<Word<'_>> {
    Lexer::new(source)
        .map(|item| Word {
            kind: item.kind,
            text: &source[item.span.start..item.span.end],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<Token> {
        Lexer::new(src).map(|t| t.kind).collect()
    }

    #[test]
    fn keywords_and_words() {
        assert_eq!(
            kinds("select * from people"),
            vec![Token::Select, Token::Star, Token::From, Token::Word]
        );
    }

    #[test]
    fn keywords_are_case_sensitive() {
        assert_eq!(kinds("SELECT From"), vec![Token::Word, Token::Word]);
    }

    #[test]
    fn keyword_prefix_is_a_word() {
        assert_eq!(kinds("selected fromage *x"), vec![Token::Word; 3]);
    }

    #[test]
    fn column_spec_is_one_word() {
        let words = tokenize("  name\tvarchar(32)\n");
        let texts: Vec<_> = words.iter().map(|w| w.text).collect();
        assert_eq!(texts, vec!["name", "varchar(32)"]);
    }

    #[test]
    fn unicode_whitespace_separates_words() {
        assert_eq!(
            kinds("\u{2003}select\u{a0}*\u{a0}from\u{3000}people"),
            vec![Token::Select, Token::Star, Token::From, Token::Word]
        );
        assert!(tokenize("\u{a0}\u{2003}").is_empty());
    }

    #[test]
    fn whitespace_only_is_empty() {
        assert!(tokenize(" \t\r\n ").is_empty());
    }
}
