//! Type expression parsing
//!
//! ```text
//! type   := tuple [ (-> | →) type ]          right-associative
//! tuple  := app { (* | 乘) app }
//! app    := atom { name }                    postfix: 整数 列表
//! atom   := name | ( type {, type} )
//! ```

use super::ast::*;
use super::state::*;
use crate::frontend::lexer::{Delimiter, Operator, TokenKind};

impl<'a> ParserState<'a> {
    /// Parse a type
    pub fn parse_type(&mut self) -> Option<TypeExpr> {
        let param = self.parse_tuple_type()?;

        if self.at_operator(Operator::Arrow) {
            self.bump();
            let ret = self.parse_type()?;
            let span = param.span.to(ret.span);
            return Some(self.type_expr(
                TypeExprKind::Function {
                    param: Box::new(param),
                    ret: Box::new(ret),
                },
                span,
            ));
        }

        Some(param)
    }

    /// `A * B * C`
    fn parse_tuple_type(&mut self) -> Option<TypeExpr> {
        let first = self.parse_applied_type()?;
        if !self.at_operator(Operator::Mul) {
            return Some(first);
        }

        let start = first.span;
        let mut items = vec![first];
        while self.at_operator(Operator::Mul) {
            self.bump();
            items.push(self.parse_applied_type()?);
        }
        let span = self.span_from(start);
        Some(self.type_expr(TypeExprKind::Tuple(items), span))
    }

    /// Postfix application: `整数 列表 列表` is `(整数 列表) 列表`
    fn parse_applied_type(&mut self) -> Option<TypeExpr> {
        let start = self.start_span();
        let (mut args, mut ty) = self.parse_type_atom()?;

        while matches!(self.kind(), TokenKind::Identifier { .. }) && self.on_same_line() {
            let base = self.expect_ident()?;
            let applied = match ty {
                Some(ty) => vec![ty],
                None => std::mem::take(&mut args),
            };
            let span = self.span_from(start);
            ty = Some(self.type_expr(
                TypeExprKind::App {
                    base,
                    args: applied,
                },
                span,
            ));
        }

        match ty {
            Some(ty) => Some(ty),
            None => {
                // `(A, B)` not followed by a constructor name
                let span = self.span_from(start);
                Some(self.type_expr(TypeExprKind::Tuple(args), span))
            }
        }
    }

    /// A name, a parenthesised type, or a parenthesised argument list
    ///
    /// Returns `(args, None)` for `(A, B)` so the caller can apply a
    /// constructor to several arguments.
    fn parse_type_atom(&mut self) -> Option<(Vec<TypeExpr>, Option<TypeExpr>)> {
        match self.kind() {
            TokenKind::Identifier { name, .. } => {
                let span = self.bump().span;
                let ty = self.type_expr(TypeExprKind::Named(name.clone()), span);
                Some((Vec::new(), Some(ty)))
            }
            TokenKind::Delimiter(Delimiter::LParen | Delimiter::FullLParen) => {
                let open = self.bump_opener()?;
                let first = self.parse_type()?;
                if !self.at_delimiter_where(Delimiter::is_comma) {
                    self.expect_closer(open)?;
                    return Some((Vec::new(), Some(first)));
                }

                let mut args = vec![first];
                while self.skip_delimiter_where(Delimiter::is_comma) {
                    args.push(self.parse_type()?);
                }
                self.expect_closer(open)?;
                Some((args, None))
            }
            _ => {
                self.error_expected(&["type".to_string()]);
                None
            }
        }
    }
}
