//! Lexer module
//!
//! Converts source text into an ordered, finite token sequence ending in
//! `Eof`. Lexical errors are collected, never fatal.
//!
//! - [`unicode`]: per-character classification over UTF-8 bytes
//! - [`keywords`]: keyword, word-operator and classical-marker tables
//! - [`tokenizer`] / [`literals`]: the scanner
//! - [`stream`]: cursor with bounded lookahead used by the parser

pub mod keywords;
pub mod literals;
pub mod stream;
pub mod tokenizer;
pub mod tokens;
pub mod unicode;

#[cfg(test)]
mod tests;

pub use stream::TokenStream;
pub use tokenizer::Lexer;
pub use tokens::{ClassicalMarker, Delimiter, Keyword, LexicalError, Operator, Token, TokenKind};

use crate::util::diagnostic::Diagnostic;

/// Tokens and lexical errors of one source text
#[derive(Debug, Clone, PartialEq)]
pub struct LexOutput {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexicalError>,
}

impl LexOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.errors.iter().cloned().map(Diagnostic::from).collect()
    }

    /// Token kinds without the trailing `Eof`
    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens
            .iter()
            .filter(|t| !t.is_eof())
            .map(|t| t.kind.clone())
            .collect()
    }
}

/// Tokenize source text
pub fn tokenize(source: &str) -> LexOutput {
    tokenize_bytes(source.as_bytes())
}

/// Tokenize a raw byte buffer; undecodable bytes are reported and skipped
pub fn tokenize_bytes(source: &[u8]) -> LexOutput {
    tracing::debug!(bytes = source.len(), "lexing started");

    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token() {
        log_token(&token);
        tokens.push(token);
    }
    let errors = lexer.into_errors();

    tracing::debug!(
        tokens = tokens.len(),
        errors = errors.len(),
        "lexing finished"
    );
    LexOutput { tokens, errors }
}

/// Log a token for debugging
fn log_token(token: &Token) {
    match &token.kind {
        TokenKind::Eof => {}
        TokenKind::Identifier { name, quoted } => {
            tracing::trace!(at = %token.span.start, name = %name, quoted, "identifier")
        }
        kind => tracing::trace!(at = %token.span.start, "{}", kind.describe()),
    }
}
