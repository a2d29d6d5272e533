//! Token stream adapter
//!
//! A forward-only cursor over a token buffer with bounded lookahead. Reading
//! past the end always yields the terminal `Eof`.

use once_cell::sync::Lazy;

use super::tokens::{Token, TokenKind};
use crate::util::span::Span;

/// Returned when the buffer does not end in `Eof` (or is empty)
static DANGLING_EOF: Lazy<Token> = Lazy::new(|| Token::eof(Span::dummy()));

#[derive(Debug, Clone)]
pub struct TokenStream<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> TokenStream<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Token `n` ahead of the cursor (0 = current)
    pub fn peek_nth(
        &self,
        n: usize,
    ) -> &'a Token {
        match self.tokens.get(self.pos + n) {
            Some(token) => token,
            None => match self.tokens.last() {
                Some(last) if last.is_eof() => last,
                _ => &*DANGLING_EOF,
            },
        }
    }

    pub fn current(&self) -> &'a Token {
        self.peek_nth(0)
    }

    pub fn peek(&self) -> &'a Token {
        self.peek_nth(1)
    }

    pub fn kind(&self) -> &'a TokenKind {
        &self.current().kind
    }

    pub fn at(
        &self,
        kind: &TokenKind,
    ) -> bool {
        self.kind() == kind
    }

    /// Consume and return the current token; the cursor stops at `Eof`
    pub fn bump(&mut self) -> &'a Token {
        let token = self.current();
        if !token.is_eof() && self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    pub fn at_eof(&self) -> bool {
        self.current().is_eof()
    }

    /// Number of tokens consumed so far
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The most recently consumed token
    pub fn previous(&self) -> Option<&'a Token> {
        self.pos.checked_sub(1).and_then(|i| self.tokens.get(i))
    }
}
