//! Bracket handling and the list forms
//!
//! Every list surface form becomes `ExprKind::List`:
//!
//! | form                              | reading                      |
//! |-----------------------------------|------------------------------|
//! | `[1, 2]` `【1、2】`                | modern, element separated    |
//! | `列开始 1 其一 2 其二 列结束`      | classical, element first     |
//! | `【其一 1 其二 2】` `（其一 1）`    | enumeration, particle first  |
//! | `空空如也`                         | empty                        |

use super::ast::*;
use super::state::*;
use super::SyntaxError;
use crate::frontend::lexer::{ClassicalMarker, Delimiter, TokenKind};
use crate::util::span::Span;

/// An opening bracket that has been consumed
#[derive(Debug, Clone, Copy)]
pub(crate) struct Opener {
    pub delim: Delimiter,
    pub span: Span,
}

fn list_separator(delim: Delimiter) -> bool {
    delim.is_comma() || matches!(delim, Delimiter::Semicolon | Delimiter::FullSemicolon)
}

impl<'a> ParserState<'a> {
    /// Consume an opening bracket
    pub(crate) fn bump_opener(&mut self) -> Option<Opener> {
        match self.kind() {
            TokenKind::Delimiter(delim) if delim.closing().is_some() => {
                let delim = *delim;
                let span = self.bump().span;
                Some(Opener { delim, span })
            }
            _ => {
                self.error_expected(&["opening bracket".to_string()]);
                None
            }
        }
    }

    /// Consume the bracket closing `open`
    ///
    /// A closing bracket of the wrong kind is reported and consumed so that
    /// parsing can continue.
    pub(crate) fn expect_closer(
        &mut self,
        open: Opener,
    ) -> Option<Span> {
        let expected = open.delim.closing()?;
        match self.kind() {
            TokenKind::Delimiter(found) if *found == expected => Some(self.bump().span),
            TokenKind::Delimiter(found) if found.is_closing() => {
                let found = *found;
                self.error(SyntaxError::MismatchedBracket {
                    open: open.delim.as_str().to_string(),
                    expected: expected.as_str().to_string(),
                    found: found.as_str().to_string(),
                    span: self.current().span,
                });
                Some(self.bump().span)
            }
            _ => {
                self.error_expected(&[TokenKind::Delimiter(expected).describe()]);
                None
            }
        }
    }

    /// Comma-separated expressions up to the closer of `open`
    pub(crate) fn parse_delimited_exprs(
        &mut self,
        open: Opener,
    ) -> Option<Vec<Expr>> {
        let mut items = Vec::new();
        while !self.at_delimiter_where(Delimiter::is_closing) && !self.at_end() {
            items.push(self.parse_expression(BP_LOWEST)?);
            if !self.skip_delimiter_where(Delimiter::is_comma) {
                break;
            }
        }
        self.expect_closer(open)?;
        Some(items)
    }

    /// `[a, b]` / `【a、b】`, or an enumeration when `【` meets an ordinal
    pub(crate) fn parse_bracket_list(&mut self) -> Option<Expr> {
        if self.at_enumeration_opener() {
            return self.parse_enumeration();
        }

        let start = self.start_span();
        let open = self.bump_opener()?;

        let mut items = Vec::new();
        while !self.at_delimiter_where(Delimiter::is_closing) && !self.at_end() {
            items.push(self.parse_expression(BP_LOWEST)?);
            if !self.skip_delimiter_where(list_separator) {
                break;
            }
        }

        self.expect_closer(open)?;
        let span = self.span_from(start);
        Some(self.expr(ExprKind::List(items), span))
    }

    /// `【其一 e 其二 e】` / `（其一 e）`: each element follows its particle
    pub(crate) fn parse_enumeration(&mut self) -> Option<Expr> {
        let start = self.start_span();
        let open = self.bump_opener()?;

        let mut items = Vec::new();
        while !self.at_delimiter_where(Delimiter::is_closing) && !self.at_end() {
            if !self.skip_ordinal() {
                self.error_expected(&["ordinal particle `其…`".to_string()]);
                return None;
            }
            items.push(self.parse_expression(BP_LOWEST)?);
            self.skip_delimiter_where(list_separator);
        }

        self.expect_closer(open)?;
        let span = self.span_from(start);
        Some(self.expr(ExprKind::List(items), span))
    }

    /// `列开始 e 其一 e 其二 … 列结束`: each element precedes its particle
    ///
    /// Every element needs a particle; their numbering is not checked.
    pub(crate) fn parse_classical_list(&mut self) -> Option<Expr> {
        let start = self.start_span();
        self.bump(); // consume 列开始

        let end = TokenKind::Classical(ClassicalMarker::ListEnd);
        let mut items = Vec::new();
        while !self.at(&end) && !self.at_end() {
            items.push(self.parse_expression(BP_LOWEST)?);
            if !self.skip_ordinal() {
                self.error_expected(&["ordinal particle `其…`".to_string()]);
                return None;
            }
            self.skip_delimiter_where(list_separator);
        }

        self.expect(&end)?;
        let span = self.span_from(start);
        Some(self.expr(ExprKind::List(items), span))
    }

    /// `空空如也`
    pub(crate) fn parse_empty_list(&mut self) -> Option<Expr> {
        let span = self.bump().span;
        Some(self.expr(ExprKind::List(Vec::new()), span))
    }

    fn skip_ordinal(&mut self) -> bool {
        if matches!(self.kind(), TokenKind::Classical(ClassicalMarker::Ordinal(_))) {
            self.bump();
            true
        } else {
            false
        }
    }
}
