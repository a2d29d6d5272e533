//! Parser module
//!
//! A Pratt parser over the lexer's token buffer. Both surface dialects, the
//! modern one (`让 x = [1, 2]`) and the classical one (`设 x 为 列开始 1 其一
//! 列结束`), produce the same AST.
//!
//! The parser never stops at the first error: each syntax error is recorded
//! and parsing resumes at the next statement boundary.

pub mod ast;
mod expr;
mod led;
mod list;
mod nud;
mod pattern;
mod state;
mod stmt;
mod type_parser;

pub use state::{ParserState, BP_HIGHEST, BP_LOWEST};

use serde::{Deserialize, Serialize};

use crate::frontend::lexer::Token;
use crate::util::diagnostic::{codes, Diagnostic};
use crate::util::span::Span;
use ast::*;

/// How `【` and `（` followed by an ordinal particle are read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Enumeration {
    /// `【其一 1 其二 2】` is a classical enumeration
    #[default]
    OrdinalLookahead,
    /// Only modern lists; an ordinal after the opener is a syntax error
    ModernOnly,
}

/// Parser configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    pub enumeration: Enumeration,
}

/// Syntax error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SyntaxError {
    #[error("expected {}, found {found}", .expected.join(" or "))]
    ExpectedToken {
        expected: Vec<String>,
        found: String,
        span: Span,
    },

    #[error("unexpected {found}")]
    UnexpectedToken { found: String, span: Span },

    #[error("{reason}")]
    InvalidSyntax { reason: String, span: Span },

    #[error("mismatched bracket: `{open}` closed by `{found}`")]
    MismatchedBracket {
        open: String,
        expected: String,
        found: String,
        span: Span,
    },
}

impl SyntaxError {
    pub fn span(&self) -> Span {
        match self {
            SyntaxError::ExpectedToken { span, .. }
            | SyntaxError::UnexpectedToken { span, .. }
            | SyntaxError::InvalidSyntax { span, .. }
            | SyntaxError::MismatchedBracket { span, .. } => *span,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            SyntaxError::ExpectedToken { .. } => codes::EXPECTED_TOKEN,
            SyntaxError::UnexpectedToken { .. } => codes::UNEXPECTED_TOKEN,
            SyntaxError::InvalidSyntax { .. } => codes::INVALID_SYNTAX,
            SyntaxError::MismatchedBracket { .. } => codes::MISMATCHED_BRACKET,
        }
    }
}

impl From<SyntaxError> for Diagnostic {
    fn from(error: SyntaxError) -> Self {
        let suggestion = match &error {
            SyntaxError::MismatchedBracket { expected, .. } => {
                Some(format!("close with `{}`", expected))
            }
            _ => None,
        };
        let diagnostic = Diagnostic::error(error.code(), error.to_string(), error.span());
        match suggestion {
            Some(help) => diagnostic.with_suggestion(help),
            None => diagnostic,
        }
    }
}

/// Result of parsing one token buffer
#[derive(Debug, Clone)]
pub struct ParseOutput {
    /// `None` when there is no usable AST
    pub module: Option<Module>,
    pub errors: Vec<SyntaxError>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.errors.iter().cloned().map(Diagnostic::from).collect()
    }
}

/// Parse tokens into a module with default options
pub fn parse(tokens: &[Token]) -> ParseOutput {
    parse_with_options(tokens, &ParserOptions::default())
}

/// Parse tokens into a module
///
/// # Example
/// ```
/// use luoyan::frontend::lexer::tokenize;
/// use luoyan::frontend::parser::parse;
///
/// let tokens = tokenize("让 甲 = 【1、2、3】").tokens;
/// let output = parse(&tokens);
/// assert!(output.errors.is_empty());
/// assert_eq!(output.module.map(|m| m.items.len()), Some(1));
/// ```
pub fn parse_with_options(
    tokens: &[Token],
    options: &ParserOptions,
) -> ParseOutput {
    tracing::debug!(tokens = tokens.len(), ?options, "parsing started");

    let mut state = ParserState::new(tokens, *options);
    let start = state.start_span();
    let id = state.next_id();
    let empty = state.at_end();

    let items = state.parse_items(|state| state.at_end());
    let span = state.span_from(start);
    let errors = state.into_errors();

    let module = if empty || (!errors.is_empty() && items.is_empty()) {
        None
    } else {
        Some(Module { id, items, span })
    };

    tracing::debug!(
        items = module.as_ref().map_or(0, |m| m.items.len()),
        errors = errors.len(),
        "parsing finished"
    );
    ParseOutput { module, errors }
}

/// Parse a single expression that must span the whole buffer
pub fn parse_expression(tokens: &[Token]) -> Result<Expr, Vec<SyntaxError>> {
    parse_expression_with_options(tokens, &ParserOptions::default())
}

pub fn parse_expression_with_options(
    tokens: &[Token],
    options: &ParserOptions,
) -> Result<Expr, Vec<SyntaxError>> {
    let mut state = ParserState::new(tokens, *options);
    let expr = state.parse_expression(BP_LOWEST);
    if expr.is_some() && !state.at_end() {
        state.error_unexpected();
    }

    match expr {
        Some(expr) if !state.has_errors() => Ok(expr),
        _ => Err(state.into_errors()),
    }
}

#[cfg(test)]
mod tests;
