//! Literal scanning: numbers, strings and quoted identifiers

use super::tokenizer::Lexer;
use super::tokens::*;
use crate::util::span::Span;

impl Lexer<'_> {
    fn eat_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    /// `digits [. digits] [(e|E) [+|-] digits]`
    ///
    /// A second decimal point, a dangling exponent, a letter suffix or an
    /// out-of-range integer yields `InvalidNumericLiteral` with the whole
    /// lexeme, and no token.
    pub(super) fn scan_number(&mut self) -> Option<Token> {
        let mut is_float = false;
        let mut malformed = false;

        self.eat_digits();

        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            is_float = true;
            self.advance();
            self.eat_digits();

            while self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
                malformed = true;
                self.advance();
                self.eat_digits();
            }
        }

        if matches!(self.peek(), Some('e' | 'E')) {
            let signed = matches!(self.peek_next(), Some('+' | '-'));
            let first_digit = if signed {
                self.peek_nth(2)
            } else {
                self.peek_next()
            };
            self.advance();
            if signed {
                self.advance();
            }
            if first_digit.is_some_and(|c| c.is_ascii_digit()) {
                is_float = true;
                self.eat_digits();
            } else {
                malformed = true;
            }
        }

        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            malformed = true;
            self.advance();
        }

        let lexeme = self.lexeme();
        let kind = if malformed {
            None
        } else if is_float {
            lexeme.parse::<f64>().ok().map(TokenKind::FloatLiteral)
        } else {
            lexeme.parse::<i64>().ok().map(TokenKind::IntLiteral)
        };

        match kind {
            Some(kind) => Some(self.make_token(kind)),
            None => {
                self.error(LexicalError::InvalidNumericLiteral {
                    lexeme,
                    span: self.span(),
                });
                None
            }
        }
    }

    /// `"…"` or `『…』` with escapes `\n`, `\t`, `\\` and the closing delimiter
    pub(super) fn scan_string(
        &mut self,
        open: char,
    ) -> Option<Token> {
        let close = if open == '"' { '"' } else { '』' };
        self.advance();
        let open_span = self.span();

        let mut value = String::new();
        loop {
            match self.peek() {
                None => {
                    self.error(LexicalError::UnterminatedStringLiteral { span: open_span });
                    return None;
                }
                Some(c) if c == close => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    let escape_start = self.current_position();
                    self.advance();
                    match self.advance() {
                        Some('n') => value.push('\n'),
                        Some('t') => value.push('\t'),
                        Some('\\') => value.push('\\'),
                        Some(c) if c == close => value.push(c),
                        Some(c) => {
                            self.error(LexicalError::InvalidEscape {
                                sequence: c,
                                span: Span::new(escape_start, self.current_position()),
                            });
                            value.push(c);
                        }
                        None => {}
                    }
                }
                Some(_) => {
                    if let Some(c) = self.advance() {
                        value.push(c);
                    }
                }
            }
        }

        Some(self.make_token(TokenKind::StringLiteral(value)))
    }

    /// `「…」`: the enclosed text is an identifier even if it spells a keyword
    ///
    /// Must close on the same line; escapes `\」` and `\\`.
    pub(super) fn scan_quoted_identifier(&mut self) -> Option<Token> {
        self.advance();
        let open_span = self.span();

        let mut name = String::new();
        loop {
            match self.peek() {
                None | Some('\n') => {
                    self.error(LexicalError::UnterminatedQuotedIdentifier { span: open_span });
                    return None;
                }
                Some('」') => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    let escape_start = self.current_position();
                    self.advance();
                    match self.peek() {
                        Some(c @ ('」' | '\\')) => {
                            self.advance();
                            name.push(c);
                        }
                        None | Some('\n') => {}
                        Some(c) => {
                            self.advance();
                            self.error(LexicalError::InvalidEscape {
                                sequence: c,
                                span: Span::new(escape_start, self.current_position()),
                            });
                            name.push(c);
                        }
                    }
                }
                Some(_) => {
                    if let Some(c) = self.advance() {
                        name.push(c);
                    }
                }
            }
        }

        if name.is_empty() {
            self.error(LexicalError::EmptyQuotedIdentifier { span: self.span() });
            return None;
        }
        Some(self.make_token(TokenKind::Identifier { name, quoted: true }))
    }
}
