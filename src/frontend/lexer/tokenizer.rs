//! Tokenizer: a single forward scan over UTF-8 bytes

use smallvec::SmallVec;

use super::keywords::{self, PUNCTUATION};
use super::tokens::*;
use super::unicode::{classify, CharCategory, Classified, InvalidByteSequence};
use crate::util::span::{Position, Span};

/// Character substituted for undecodable bytes inside literals
const REPLACEMENT: char = '\u{FFFD}';

/// Lexer over a byte buffer
///
/// Produces tokens lazily through [`Lexer::next_token`] (or the `Iterator`
/// impl). Errors never stop the scan; they are collected and returned by
/// [`Lexer::into_errors`]. The final token is always `Eof`.
pub struct Lexer<'a> {
    source: &'a [u8],
    offset: usize,
    line: usize,
    column: usize,
    /// Start of the token being scanned
    start: Position,
    /// Tokens split out of a compound keyword run, in reverse order
    pending: SmallVec<[Token; 4]>,
    errors: Vec<LexicalError>,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a [u8]) -> Self {
        Self {
            source,
            offset: 0,
            line: 1,
            column: 1,
            start: Position::start(),
            pending: SmallVec::new(),
            errors: Vec::new(),
            finished: false,
        }
    }

    /// Current position
    pub fn current_position(&self) -> Position {
        Position::with_offset(self.line, self.column, self.offset)
    }

    pub fn into_errors(self) -> Vec<LexicalError> {
        self.errors
    }

    /// Scan the next token; `None` after `Eof` has been returned
    pub fn next_token(&mut self) -> Option<Token> {
        if let Some(token) = self.pending.pop() {
            return Some(token);
        }
        if self.finished {
            return None;
        }

        loop {
            self.skip_trivia();
            self.start = self.current_position();

            let classified = match self.classify_here() {
                None => {
                    self.finished = true;
                    return Some(Token::eof(Span::point(self.start)));
                }
                Some(Err(_)) => {
                    self.advance();
                    continue;
                }
                Some(Ok(classified)) => classified,
            };

            let token = match classified.category {
                CharCategory::AsciiLetter | CharCategory::Ideograph | CharCategory::OtherLetter => {
                    Some(self.scan_word())
                }
                CharCategory::Digit => self.scan_number(),
                CharCategory::QuoteDelimiter => match classified.ch {
                    '"' | '『' => self.scan_string(classified.ch),
                    '「' => self.scan_quoted_identifier(),
                    ch => self.reject(ch),
                },
                CharCategory::AsciiPunct | CharCategory::FullWidthPunct => {
                    self.scan_punct(classified.ch)
                }
                CharCategory::Whitespace | CharCategory::Other => self.reject(classified.ch),
            };

            if let Some(token) = token {
                return Some(token);
            }
        }
    }

    // ------------------------------------------------------------------
    // Character access
    // ------------------------------------------------------------------

    fn classify_here(&self) -> Option<Result<Classified, InvalidByteSequence>> {
        self.classify_at(self.offset)
    }

    fn classify_at(
        &self,
        offset: usize,
    ) -> Option<Result<Classified, InvalidByteSequence>> {
        (offset < self.source.len()).then(|| classify(self.source, offset))
    }

    /// Character `n` positions ahead (0 = current)
    pub(super) fn peek_nth(
        &self,
        n: usize,
    ) -> Option<char> {
        let mut offset = self.offset;
        for _ in 0..n {
            offset += match self.classify_at(offset)? {
                Ok(c) => c.len,
                Err(_) => 1,
            };
        }
        Some(match self.classify_at(offset)? {
            Ok(c) => c.ch,
            Err(_) => REPLACEMENT,
        })
    }

    pub(super) fn peek(&self) -> Option<char> {
        self.peek_nth(0)
    }

    pub(super) fn peek_next(&self) -> Option<char> {
        self.peek_nth(1)
    }

    /// Consume one character, updating line and column
    ///
    /// An undecodable byte is reported, skipped, and returned as U+FFFD.
    pub(super) fn advance(&mut self) -> Option<char> {
        match self.classify_here()? {
            Ok(c) => {
                self.offset += c.len;
                if c.ch == '\n' {
                    self.line += 1;
                    self.column = 1;
                } else {
                    self.column += 1;
                }
                Some(c.ch)
            }
            Err(_) => {
                let here = self.current_position();
                self.offset += 1;
                self.column += 1;
                self.error(LexicalError::InvalidByteSequence {
                    span: Span::new(here, self.current_position()),
                });
                Some(REPLACEMENT)
            }
        }
    }

    /// Consume `expected` if it is next
    pub(super) fn eat(
        &mut self,
        expected: char,
    ) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(super) fn error(
        &mut self,
        error: LexicalError,
    ) {
        tracing::trace!(%error, "lexical error");
        self.errors.push(error);
    }

    /// Span from the token start to the current position
    pub(super) fn span(&self) -> Span {
        Span::new(self.start, self.current_position())
    }

    /// Source text of the current token
    pub(super) fn lexeme(&self) -> String {
        String::from_utf8_lossy(&self.source[self.start.offset..self.offset]).into_owned()
    }

    pub(super) fn make_token(
        &self,
        kind: TokenKind,
    ) -> Token {
        Token::new(kind, self.lexeme(), self.span())
    }

    fn reject(
        &mut self,
        ch: char,
    ) -> Option<Token> {
        self.advance();
        self.error(LexicalError::UnsupportedCharacter {
            ch,
            span: self.span(),
        });
        None
    }

    // ------------------------------------------------------------------
    // Trivia
    // ------------------------------------------------------------------

    /// Skip whitespace, `//` line comments and nested `「：…：」` block comments
    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(' ' | '\t' | '\r' | '\n' | '\u{3000}') => {
                    self.advance();
                }
                Some('/') if self.peek_next() == Some('/') => {
                    while !matches!(self.peek(), None | Some('\n')) {
                        self.advance();
                    }
                }
                Some('「') if self.peek_next() == Some('：') => self.skip_block_comment(),
                _ => break,
            }
        }
    }

    fn skip_block_comment(&mut self) {
        let open = self.current_position();
        self.advance();
        self.advance();
        let open_span = Span::new(open, self.current_position());

        let mut depth = 1usize;
        loop {
            match (self.peek(), self.peek_next()) {
                (None, _) => {
                    self.error(LexicalError::UnterminatedComment { span: open_span });
                    return;
                }
                (Some('「'), Some('：')) => {
                    self.advance();
                    self.advance();
                    depth += 1;
                }
                (Some('：'), Some('」')) => {
                    self.advance();
                    self.advance();
                    depth -= 1;
                    if depth == 0 {
                        return;
                    }
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Words
    // ------------------------------------------------------------------

    /// Scan a maximal identifier-class run and resolve it
    ///
    /// Order: exact keyword, ordinal particle, complete keyword segmentation,
    /// and finally a plain identifier.
    fn scan_word(&mut self) -> Token {
        while let Some(Ok(c)) = self.classify_here() {
            if !c.category.is_identifier_continue() {
                break;
            }
            self.advance();
        }

        let text = self.lexeme();
        if let Some(word) = keywords::lookup(&text) {
            return self.make_token(word.to_token_kind());
        }
        if let Some(n) = keywords::parse_ordinal(&text) {
            return self.make_token(TokenKind::Classical(ClassicalMarker::Ordinal(n)));
        }
        if let Some(pieces) = keywords::segment(&text) {
            return self.split_run(&text, &pieces);
        }
        self.make_token(TokenKind::Identifier {
            name: text,
            quoted: false,
        })
    }

    /// Emit the first piece of a segmented run and queue the rest
    fn split_run(
        &mut self,
        text: &str,
        pieces: &[(TokenKind, usize)],
    ) -> Token {
        let mut tokens: SmallVec<[Token; 4]> = SmallVec::new();
        let mut pos = self.start;
        let mut byte = 0;
        for (kind, len) in pieces {
            let piece = &text[byte..byte + len];
            let end = Position::with_offset(
                pos.line,
                pos.column + piece.chars().count(),
                pos.offset + len,
            );
            tokens.push(Token::new(kind.clone(), piece, Span::new(pos, end)));
            pos = end;
            byte += len;
        }

        // 首个词素直接返回，其余逆序入栈
        let mut rest = tokens.into_iter();
        let first = rest.next();
        self.pending.extend(rest.rev());
        first.unwrap_or_else(|| Token::eof(self.span()))
    }

    // ------------------------------------------------------------------
    // Punctuation
    // ------------------------------------------------------------------

    /// Operators and delimiters, with one character of lookahead for
    /// multi-character forms such as `<-`, `<=`, `<>`, `->`, `::`
    fn scan_punct(
        &mut self,
        ch: char,
    ) -> Option<Token> {
        let kind = match ch {
            '-' => {
                self.advance();
                if self.eat('>') {
                    TokenKind::Operator(Operator::Arrow)
                } else {
                    TokenKind::Operator(Operator::Sub)
                }
            }
            '/' => {
                self.advance();
                TokenKind::Operator(Operator::Div)
            }
            '=' => {
                self.advance();
                if self.eat('=') {
                    TokenKind::Operator(Operator::EqEq)
                } else if self.eat('>') {
                    TokenKind::Operator(Operator::FatArrow)
                } else {
                    TokenKind::Operator(Operator::Equals)
                }
            }
            '<' => {
                self.advance();
                if self.eat('-') {
                    TokenKind::Operator(Operator::Assign)
                } else if self.eat('=') {
                    TokenKind::Operator(Operator::Le)
                } else if self.eat('>') {
                    TokenKind::Operator(Operator::NotEq)
                } else {
                    TokenKind::Operator(Operator::Lt)
                }
            }
            '>' => {
                self.advance();
                if self.eat('=') {
                    TokenKind::Operator(Operator::Ge)
                } else {
                    TokenKind::Operator(Operator::Gt)
                }
            }
            '!' => {
                self.advance();
                if self.eat('=') {
                    TokenKind::Operator(Operator::NotEq)
                } else {
                    TokenKind::Operator(Operator::Not)
                }
            }
            '&' => {
                if self.peek_next() != Some('&') {
                    return self.reject('&');
                }
                self.advance();
                self.advance();
                TokenKind::Operator(Operator::And)
            }
            '|' => {
                self.advance();
                if self.eat('|') {
                    TokenKind::Operator(Operator::Or)
                } else {
                    TokenKind::Delimiter(Delimiter::Pipe)
                }
            }
            ':' => {
                self.advance();
                if self.eat(':') {
                    TokenKind::Operator(Operator::Cons)
                } else if self.eat('=') {
                    TokenKind::Operator(Operator::Assign)
                } else {
                    TokenKind::Delimiter(Delimiter::Colon)
                }
            }
            '.' => {
                self.advance();
                if self.peek() == Some('.') && self.peek_next() == Some('.') {
                    self.advance();
                    self.advance();
                    TokenKind::Operator(Operator::Ellipsis)
                } else {
                    TokenKind::Delimiter(Delimiter::Dot)
                }
            }
            other => match PUNCTUATION.get(&other) {
                Some(kind) => {
                    let kind = kind.clone();
                    self.advance();
                    kind
                }
                None => return self.reject(other),
            },
        };
        Some(self.make_token(kind))
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}
