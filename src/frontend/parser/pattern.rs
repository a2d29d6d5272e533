//! Pattern parsing
//!
//! ```text
//! pattern := cons [ (当 | when) expr ]
//! cons    := app [ :: cons ]
//! app     := name atom*  |  atom
//! atom    := _ | literal | -number | name | ( … ) | [ … ] | 【 … 】
//!          | 空空如也 | 有首有尾 首名为 p 尾名为 p
//! ```

use super::ast::*;
use super::state::*;
use crate::frontend::lexer::{ClassicalMarker, Delimiter, Keyword, Operator, TokenKind};

impl<'a> ParserState<'a> {
    /// Parse a pattern, including an optional guard
    pub fn parse_pattern(&mut self) -> Option<Pattern> {
        let pattern = self.parse_cons_pattern()?;

        if self.skip_keyword(Keyword::When) {
            let condition = self.parse_expression(BP_LOWEST)?;
            let span = pattern.span.to(condition.span);
            return Some(self.pattern(
                PatternKind::Guard {
                    pattern: Box::new(pattern),
                    condition: Box::new(condition),
                },
                span,
            ));
        }

        Some(pattern)
    }

    /// `h :: t`, right-associative
    fn parse_cons_pattern(&mut self) -> Option<Pattern> {
        let head = self.parse_constructor_pattern()?;
        if !self.at_operator(Operator::Cons) {
            return Some(head);
        }
        self.bump();
        let tail = self.parse_cons_pattern()?;
        let span = head.span.to(tail.span);
        Some(self.pattern(
            PatternKind::HeadTail {
                head: Box::new(head),
                tail: Box::new(tail),
            },
            span,
        ))
    }

    /// `有 x`, `节点 左 值 右`; a bare name stays a binding
    fn parse_constructor_pattern(&mut self) -> Option<Pattern> {
        if !matches!(self.kind(), TokenKind::Identifier { .. }) {
            return self.parse_pattern_atom();
        }

        let name = self.expect_ident()?;
        let mut args = Vec::new();
        while self.starts_pattern_atom() && self.on_same_line() {
            args.push(self.parse_pattern_atom()?);
        }

        if args.is_empty() {
            return Some(self.pattern(PatternKind::Binding(name.name), name.span));
        }
        let span = self.span_from(name.span);
        Some(self.pattern(PatternKind::Constructor { name, args }, span))
    }

    fn starts_pattern_atom(&self) -> bool {
        match self.kind() {
            TokenKind::IntLiteral(_)
            | TokenKind::FloatLiteral(_)
            | TokenKind::StringLiteral(_)
            | TokenKind::Identifier { .. }
            | TokenKind::Keyword(Keyword::True | Keyword::False | Keyword::Wildcard)
            | TokenKind::Classical(ClassicalMarker::EmptyList | ClassicalMarker::HeadTail) => true,
            TokenKind::Delimiter(d) => matches!(
                d,
                Delimiter::LParen
                    | Delimiter::FullLParen
                    | Delimiter::LBracket
                    | Delimiter::LLenticular
            ),
            _ => false,
        }
    }

    fn parse_pattern_atom(&mut self) -> Option<Pattern> {
        let start = self.start_span();

        if let Some(literal) = self.literal_here() {
            self.bump();
            return Some(self.pattern(PatternKind::Literal(literal), start));
        }

        match self.kind() {
            TokenKind::Keyword(Keyword::Wildcard) => {
                self.bump();
                Some(self.pattern(PatternKind::Wildcard, start))
            }
            TokenKind::Identifier { name, .. } => {
                self.bump();
                Some(self.pattern(PatternKind::Binding(name.clone()), start))
            }
            // Negative numeric literal
            TokenKind::Operator(Operator::Sub) => {
                self.bump();
                let literal = match self.kind() {
                    TokenKind::IntLiteral(n) => Literal::Int(n.wrapping_neg()),
                    TokenKind::FloatLiteral(n) => Literal::Float(-n),
                    _ => {
                        self.error_expected(&["number".to_string()]);
                        return None;
                    }
                };
                self.bump();
                let span = self.span_from(start);
                Some(self.pattern(PatternKind::Literal(literal), span))
            }
            TokenKind::Delimiter(Delimiter::LParen | Delimiter::FullLParen) => {
                self.parse_paren_pattern()
            }
            TokenKind::Delimiter(Delimiter::LBracket | Delimiter::LLenticular) => {
                self.parse_list_pattern()
            }
            TokenKind::Classical(ClassicalMarker::EmptyList) => {
                self.bump();
                Some(self.pattern(PatternKind::List(Vec::new()), start))
            }
            TokenKind::Classical(ClassicalMarker::HeadTail) => {
                self.bump();
                self.expect(&TokenKind::Classical(ClassicalMarker::HeadNamed))?;
                let head = self.parse_cons_pattern()?;
                self.expect(&TokenKind::Classical(ClassicalMarker::TailNamed))?;
                let tail = self.parse_cons_pattern()?;
                let span = self.span_from(start);
                Some(self.pattern(
                    PatternKind::HeadTail {
                        head: Box::new(head),
                        tail: Box::new(tail),
                    },
                    span,
                ))
            }
            _ => {
                self.error_expected(&["pattern".to_string()]);
                None
            }
        }
    }

    /// `()`, `(p)`, `(p, q, …)`
    fn parse_paren_pattern(&mut self) -> Option<Pattern> {
        let start = self.start_span();
        let open = self.bump_opener()?;

        if self.at_delimiter_where(Delimiter::is_closing) {
            self.expect_closer(open)?;
            let span = self.span_from(start);
            return Some(self.pattern(PatternKind::Literal(Literal::Unit), span));
        }

        let first = self.parse_pattern()?;
        if !self.at_delimiter_where(Delimiter::is_comma) {
            self.expect_closer(open)?;
            return Some(first);
        }

        let mut items = vec![first];
        while self.skip_delimiter_where(Delimiter::is_comma) {
            if self.at_delimiter_where(Delimiter::is_closing) {
                break;
            }
            items.push(self.parse_pattern()?);
        }
        self.expect_closer(open)?;
        let span = self.span_from(start);
        Some(self.pattern(PatternKind::Tuple(items), span))
    }

    /// `[p, q]`, `[h, ...t]`; a rest pattern nests into head/tail pairs
    fn parse_list_pattern(&mut self) -> Option<Pattern> {
        let start = self.start_span();
        let open = self.bump_opener()?;

        let mut items = Vec::new();
        let mut rest = None;
        while !self.at_delimiter_where(Delimiter::is_closing) && !self.at_end() {
            if self.at_operator(Operator::Ellipsis) {
                self.bump();
                rest = Some(self.parse_pattern()?);
                break;
            }
            items.push(self.parse_pattern()?);
            if !self.skip_delimiter_where(|d| d.is_comma() || d == Delimiter::Semicolon) {
                break;
            }
        }
        self.expect_closer(open)?;
        let span = self.span_from(start);

        let Some(tail) = rest else {
            return Some(self.pattern(PatternKind::List(items), span));
        };
        let mut pattern = tail;
        for head in items.into_iter().rev() {
            let span = head.span.to(pattern.span);
            pattern = self.pattern(
                PatternKind::HeadTail {
                    head: Box::new(head),
                    tail: Box::new(pattern),
                },
                span,
            );
        }
        Some(pattern)
    }
}
