//! Infix expression parsing (led - left denotation)

use super::ast::*;
use super::state::*;
use super::Enumeration;
use crate::frontend::lexer::{ClassicalMarker, Delimiter, Operator, TokenKind};
use crate::util::span::Span;

/// Infix parser: receives the left operand and the right binding power
pub(crate) type InfixFn<'a> = fn(&mut ParserState<'a>, Expr, u8) -> Option<Expr>;

/// Expressions that may be applied to arguments
fn is_callee(expr: &Expr) -> bool {
    matches!(
        expr.kind,
        ExprKind::Identifier(_)
            | ExprKind::FunctionCall { .. }
            | ExprKind::FieldAccess { .. }
            | ExprKind::Lambda { .. }
    )
}

impl<'a> ParserState<'a> {
    /// Get infix binding powers and parser for current token
    ///
    /// Returns `(left_bp, right_bp, parser)`. Left-associative operators use
    /// `right_bp = left_bp + 1`; `<-` and `::` are right-associative.
    pub(crate) fn infix_info(
        &self,
        lhs: &Expr,
    ) -> Option<(u8, u8, InfixFn<'a>)> {
        match self.kind() {
            TokenKind::Operator(op) => match op {
                Operator::Assign => Some((BP_ASSIGN, BP_ASSIGN, Self::parse_assign)),
                Operator::Or => Some((BP_OR, BP_OR + 1, Self::parse_binary)),
                Operator::And => Some((BP_AND, BP_AND + 1, Self::parse_binary)),
                Operator::EqEq
                | Operator::NotEq
                | Operator::Lt
                | Operator::Le
                | Operator::Gt
                | Operator::Ge => Some((BP_CMP, BP_CMP + 1, Self::parse_binary)),
                Operator::Cons => Some((BP_CONS, BP_CONS, Self::parse_binary)),
                Operator::Add | Operator::Sub => Some((BP_ADD, BP_ADD + 1, Self::parse_binary)),
                Operator::Mul | Operator::Div | Operator::Mod => {
                    Some((BP_MUL, BP_MUL + 1, Self::parse_binary))
                }
                _ => None,
            },
            // f(x, y): the parenthesis must touch the callee
            TokenKind::Delimiter(Delimiter::LParen | Delimiter::FullLParen)
                if is_callee(lhs) && self.is_adjacent() && !self.at_enumeration_opener() =>
            {
                Some((BP_POSTFIX, BP_POSTFIX + 1, Self::parse_call))
            }
            TokenKind::Delimiter(Delimiter::Dot)
                if matches!(self.peek().kind, TokenKind::Identifier { .. }) =>
            {
                Some((BP_POSTFIX, BP_POSTFIX + 1, Self::parse_field))
            }
            // f x y: juxtaposed arguments on the same line
            _ if is_callee(lhs) && self.starts_atom() && self.on_same_line() => {
                Some((BP_APPLY, BP_APPLY + 1, Self::parse_application))
            }
            _ => None,
        }
    }

    /// `【` or `（` followed by an ordinal particle, when that form is enabled
    pub(crate) fn at_enumeration_opener(&self) -> bool {
        self.options().enumeration == Enumeration::OrdinalLookahead
            && matches!(
                self.kind(),
                TokenKind::Delimiter(Delimiter::LLenticular | Delimiter::FullLParen)
            )
            && matches!(
                self.peek().kind,
                TokenKind::Classical(ClassicalMarker::Ordinal(_))
            )
    }

    /// Parse assignment expression
    fn parse_assign(
        &mut self,
        lhs: Expr,
        right_bp: u8,
    ) -> Option<Expr> {
        self.bump(); // consume '<-'
        let rhs = self.parse_expression(right_bp)?;
        let span = lhs.span.to(rhs.span);
        Some(self.expr(
            ExprKind::Assign {
                target: Box::new(lhs),
                value: Box::new(rhs),
            },
            span,
        ))
    }

    /// Parse binary operator expression
    fn parse_binary(
        &mut self,
        lhs: Expr,
        right_bp: u8,
    ) -> Option<Expr> {
        let op = match self.kind() {
            TokenKind::Operator(op) => match op {
                Operator::Add => BinOp::Add,
                Operator::Sub => BinOp::Sub,
                Operator::Mul => BinOp::Mul,
                Operator::Div => BinOp::Div,
                Operator::Mod => BinOp::Mod,
                Operator::EqEq => BinOp::Eq,
                Operator::NotEq => BinOp::NotEq,
                Operator::Lt => BinOp::Lt,
                Operator::Le => BinOp::Le,
                Operator::Gt => BinOp::Gt,
                Operator::Ge => BinOp::Ge,
                Operator::And => BinOp::And,
                Operator::Or => BinOp::Or,
                Operator::Cons => BinOp::Cons,
                _ => {
                    self.error_unexpected();
                    return None;
                }
            },
            _ => {
                self.error_unexpected();
                return None;
            }
        };
        self.bump();

        let rhs = self.parse_expression(right_bp)?;
        let span = lhs.span.to(rhs.span);
        Some(self.expr(
            ExprKind::BinaryOp {
                op,
                left: Box::new(lhs),
                right: Box::new(rhs),
            },
            span,
        ))
    }

    /// Parse one juxtaposed argument and merge it into the call
    fn parse_application(
        &mut self,
        lhs: Expr,
        right_bp: u8,
    ) -> Option<Expr> {
        let arg = self.parse_expression(right_bp)?;
        let span = lhs.span.to(arg.span);
        Some(self.extend_call(lhs, vec![arg], span))
    }

    /// Parse function call expression `f(a, b)` / `f（a，b）`
    fn parse_call(
        &mut self,
        lhs: Expr,
        _right_bp: u8,
    ) -> Option<Expr> {
        let open = self.bump_opener()?; // consume '(' / '（'
        let args = self.parse_delimited_exprs(open)?;
        let span = self.span_from(lhs.span);
        Some(self.extend_call(lhs, args, span))
    }

    /// Append `args` to an existing call, or start a new one
    fn extend_call(
        &mut self,
        lhs: Expr,
        args: Vec<Expr>,
        span: Span,
    ) -> Expr {
        match lhs.kind {
            ExprKind::FunctionCall {
                callee,
                args: mut existing,
            } => {
                existing.extend(args);
                Expr {
                    id: lhs.id,
                    kind: ExprKind::FunctionCall {
                        callee,
                        args: existing,
                    },
                    span,
                }
            }
            kind => {
                let callee = Expr {
                    id: lhs.id,
                    kind,
                    span: lhs.span,
                };
                self.expr(
                    ExprKind::FunctionCall {
                        callee: Box::new(callee),
                        args,
                    },
                    span,
                )
            }
        }
    }

    /// Parse field access expression
    fn parse_field(
        &mut self,
        lhs: Expr,
        _right_bp: u8,
    ) -> Option<Expr> {
        self.bump(); // consume '.'
        let field = self.expect_ident()?;
        let span = lhs.span.to(field.span);
        Some(self.expr(
            ExprKind::FieldAccess {
                target: Box::new(lhs),
                field,
            },
            span,
        ))
    }
}
